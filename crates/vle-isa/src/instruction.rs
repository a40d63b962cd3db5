//! Decoded instruction instances.

use crate::category::Category;
use crate::descriptor::Descriptor;
use crate::field::{self, Computed, Field, FieldSource};

/// Effective address width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AddrMode {
    #[default]
    Bits32,
    Bits64,
}

impl AddrMode {
    #[must_use]
    pub const fn from_categories(categories: Category) -> Self {
        if categories.is_64bit() {
            Self::Bits64
        } else {
            Self::Bits32
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Address width in bytes.
    #[must_use]
    pub const fn bytes(self) -> u8 {
        match self {
            Self::Bits32 => 4,
            Self::Bits64 => 8,
        }
    }

    /// Truncate an address to this width.
    #[must_use]
    pub const fn mask(self, value: u64) -> u64 {
        match self {
            Self::Bits32 => value & 0xffff_ffff,
            Self::Bits64 => value,
        }
    }
}

/// One decoded instruction.
///
/// Fields are computed on demand from the fetch word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    word: u32,
    address: u64,
    descriptor: Descriptor,
    mode: AddrMode,
}

impl Instruction {
    /// Instance for the 32-bit fetch `word` (a 2-byte instruction occupies
    /// the upper half).
    #[must_use]
    pub const fn new(word: u32, address: u64, descriptor: Descriptor, mode: AddrMode) -> Self {
        Self {
            word,
            address,
            descriptor,
            mode,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Table mnemonic, without condition or suffix resolution.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        self.descriptor.mnemonic
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.descriptor.category
    }

    /// Length in bytes.
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.descriptor.length
    }

    #[must_use]
    pub const fn address(&self) -> u64 {
        self.address
    }

    /// Address of the sequentially next instruction.
    #[must_use]
    pub const fn next_address(&self) -> u64 {
        self.mode
            .mask(self.address.wrapping_add(self.descriptor.length as u64))
    }

    #[must_use]
    pub const fn addr_mode(&self) -> AddrMode {
        self.mode
    }

    /// The instruction's own bits, right-aligned.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        if self.descriptor.length == 2 {
            self.word >> 16
        } else {
            self.word
        }
    }

    /// Declared operands in display order.
    #[must_use]
    pub const fn operands(&self) -> &'static [Field] {
        self.descriptor.operands
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        self.descriptor.is_branch
    }

    #[must_use]
    pub const fn is_conditional_branch(&self) -> bool {
        self.descriptor.is_conditional_branch
    }

    /// Check if the format defines `field`.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.descriptor.format.source(field).is_some()
    }

    /// Field value.
    ///
    /// Direct fields yield their unsigned bit splice; derived fields yield
    /// their computed value (`SCIMM` and `TARGET` already masked to the
    /// address width). `None` if the format does not define the field.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<i64> {
        match self.descriptor.format.source(field)? {
            src @ FieldSource::Bits(_) => src.extract(self.word).map(i64::from),
            FieldSource::Computed(c) => self.computed(*c),
        }
    }

    /// Direct field sign-extended by its declared width.
    #[must_use]
    pub fn field_signed(&self, field: Field) -> Option<i64> {
        let src = self.descriptor.format.source(field)?;
        let width = src.width()?;
        let value = src.extract(self.word)?;
        Some(field::sign_extend(u64::from(value), width))
    }

    /// Field value as unsigned, for fields known to be non-negative.
    #[must_use]
    pub fn field_u32(&self, field: Field) -> Option<u32> {
        self.field(field).and_then(|v| u32::try_from(v).ok())
    }

    /// Resolved branch target, for branch formats.
    #[must_use]
    pub fn target_address(&self) -> Option<u64> {
        self.field(Field::TARGET).map(|t| t as u64)
    }

    fn direct(&self, field: Field) -> Option<u32> {
        self.descriptor.format.source(field)?.extract(self.word)
    }

    fn computed(&self, computed: Computed) -> Option<i64> {
        match computed {
            Computed::ScaledImmediate => {
                let value = field::scaled_immediate(
                    self.direct(Field::F)?,
                    self.direct(Field::SCL)?,
                    self.direct(Field::UI8)?,
                    self.mode.bits(),
                );
                Some(value as i64)
            }
            Computed::OffsetImmediate => Some(i64::from(self.direct(Field::OIM5)?) + 1),
            Computed::ScaledDisplacement => {
                let sd4 = i64::from(self.direct(Field::SD4)?);
                // 8/9 byte, 10/11 half, 12/13 word.
                let shift = match self.direct(Field::OPCD)? {
                    0x8 | 0x9 => 0,
                    0xA | 0xB => 1,
                    _ => 2,
                };
                Some(sd4 << shift)
            }
            Computed::RelativeTarget { disp, bits } => {
                let raw = u64::from(self.direct(disp)?) << 1;
                let offset = field::sign_extend(raw, u32::from(bits) + 1);
                let target = self.address.wrapping_add(offset as u64);
                Some(self.mode.mask(target) as i64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;

    fn inst(word: u32, address: u64, d: Descriptor) -> Instruction {
        Instruction::new(word, address, d, AddrMode::Bits32)
    }

    #[test]
    fn test_raw_short_and_long() {
        let short = Descriptor::new("se_mr", Category::VLE, &format::RR, &[Field::RX, Field::RY]);
        assert_eq!(inst(0x0110_ABCD, 0, short).raw(), 0x0110);
        let long = Descriptor::new("e_lbz", Category::VLE, &format::D, &[Field::RT]);
        assert_eq!(inst(0x3060_0004, 0, long).raw(), 0x3060_0004);
    }

    #[test]
    fn test_signed_field() {
        let d = Descriptor::new("e_add16i", Category::VLE, &format::D, &[Field::RT, Field::RA, Field::SI]);
        let i = inst(0x1C21_FFFE, 0, d);
        assert_eq!(i.field(Field::SI), Some(0xFFFE));
        assert_eq!(i.field_signed(Field::SI), Some(-2));
        assert_eq!(i.field(Field::RT), Some(1));
    }

    #[test]
    fn test_relative_target_wraps_32() {
        let d = Descriptor::new("se_b", Category::VLE, &format::BD8, &[Field::TARGET, Field::LK]);
        // BD8 = 0xFF: displacement -2.
        let i = inst(0xE8FF_0000, 0, d);
        assert_eq!(i.target_address(), Some(0xFFFF_FFFE));
        let i = Instruction::new(0xE8FF_0000, 0, d, AddrMode::Bits64);
        assert_eq!(i.target_address(), Some(u64::MAX - 1));
    }

    #[test]
    fn test_scaled_displacement() {
        let d = Descriptor::new("se_lwz", Category::VLE, &format::SD4, &[Field::RZ, Field::RX, Field::SD4X]);
        // se_lwz r3, 12(r1): SD4 = 3
        let i = inst(0xC331_0000, 0, d);
        assert_eq!(i.field(Field::SD4X), Some(12));
        let d = Descriptor::new("se_lbz", Category::VLE, &format::SD4, &[Field::RZ, Field::RX, Field::SD4X]);
        assert_eq!(inst(0x8331_0000, 0, d).field(Field::SD4X), Some(3));
    }

    #[test]
    fn test_missing_field() {
        let d = Descriptor::new("se_illegal", Category::VLE, &format::C, &[]);
        assert_eq!(inst(0, 0, d).field(Field::RA), None);
        assert_eq!(inst(0, 0, d).target_address(), None);
    }

    #[test]
    fn test_next_address_masked() {
        let d = Descriptor::new("se_illegal", Category::VLE, &format::C, &[]);
        assert_eq!(inst(0, 0xFFFF_FFFE, d).next_address(), 0);
    }
}
