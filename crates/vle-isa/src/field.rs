//! Instruction fields.
//!
//! Bit positions are MSB-first within the instruction's own width: bit 0 is
//! the most significant bit of the first halfword. Because a 2-byte
//! instruction occupies the upper half of the 32-bit fetch word, the same
//! positions extract correctly from the fetch word for both lengths.

use std::fmt;

/// Half-open bit range `[start, end)`, MSB-first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitRange {
    pub start: u8,
    pub end: u8,
}

impl BitRange {
    #[must_use]
    pub const fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn width(self) -> u32 {
        (self.end - self.start) as u32
    }

    /// Extract this range from a 32-bit fetch word.
    #[must_use]
    pub const fn extract(self, word: u32) -> u32 {
        let width = self.width();
        let mask = if width >= 32 { u32::MAX } else { (1 << width) - 1 };
        (word >> (32 - self.end as u32)) & mask
    }

    /// Check if a key fits in this range.
    #[must_use]
    pub const fn fits(self, key: u32) -> bool {
        let width = self.width();
        width >= 32 || key < (1 << width)
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{})", self.start, self.end)
    }
}

/// One piece of a possibly split field: a bit range and its left shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitSlice {
    pub range: BitRange,
    pub shift: u8,
}

impl BitSlice {
    #[must_use]
    pub const fn new(start: u8, end: u8, shift: u8) -> Self {
        Self {
            range: BitRange::new(start, end),
            shift,
        }
    }
}

/// Field names.
///
/// Names follow the Power ISA field mnemonics. The last group are derived
/// fields whose value is computed from other fields.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    OPCD,
    XO,
    // Short-form registers.
    RX,
    RY,
    RZ,
    ARX,
    ARY,
    // Long-form registers.
    RT,
    RS,
    RA,
    RB,
    // Condition register.
    BF,
    BFA,
    BF32,
    BT,
    BA,
    BB,
    BC,
    BI16,
    BI32,
    BO16,
    BO32,
    // Branch displacements.
    BD8,
    BD15,
    BD24,
    // Immediates.
    UI5,
    OIM5,
    UI7,
    SD4,
    D,
    D8,
    SI,
    UI,
    LI20,
    F,
    SCL,
    UI8,
    SH,
    MB,
    ME,
    L,
    TO,
    MO,
    E,
    CT,
    FXM,
    SPR,
    PMRN,
    // Suffix bits.
    LK,
    Rc,
    OE,
    // Derived.
    /// Scaled 8-bit immediate, masked to the addressing width.
    SCIMM,
    /// `OIM5 + 1`.
    OIMM,
    /// `SD4` scaled by the access width.
    SD4X,
    /// Branch target address.
    TARGET,
}

impl Field {
    /// Check if consumers treat this field as two's complement.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::D | Self::D8 | Self::SI | Self::LI20 | Self::BD8 | Self::BD15 | Self::BD24
        )
    }

    /// Suffix fields are folded into the mnemonic and never rendered.
    #[must_use]
    pub const fn is_suffix(self) -> bool {
        matches!(self, Self::LK | Self::Rc | Self::OE)
    }
}

/// Derived field computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Computed {
    /// `SCIMM` from `F`, `SCL`, `UI8`.
    ScaledImmediate,
    /// `OIMM` from `OIM5`.
    OffsetImmediate,
    /// `SD4X` from `SD4`, scaled by the access width encoded in `OPCD`.
    ScaledDisplacement,
    /// `TARGET` from a halfword displacement of `bits` encoded bits.
    RelativeTarget { disp: Field, bits: u8 },
}

impl Computed {
    /// Direct fields this computation reads.
    #[must_use]
    pub const fn inputs(self) -> &'static [Field] {
        match self {
            Self::ScaledImmediate => &[Field::F, Field::SCL, Field::UI8],
            Self::OffsetImmediate => &[Field::OIM5],
            Self::ScaledDisplacement => &[Field::SD4, Field::OPCD],
            Self::RelativeTarget {
                disp: Field::BD8, ..
            } => &[Field::BD8],
            Self::RelativeTarget {
                disp: Field::BD15,
                ..
            } => &[Field::BD15],
            Self::RelativeTarget { .. } => &[Field::BD24],
        }
    }
}

/// Where a field's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// Concatenation of bit slices.
    Bits(&'static [BitSlice]),
    /// Derived from other fields.
    Computed(Computed),
}

impl FieldSource {
    /// Total encoded width of a direct field.
    #[must_use]
    pub fn width(&self) -> Option<u32> {
        match self {
            Self::Bits(slices) => Some(slices.iter().map(|s| s.range.width()).sum()),
            Self::Computed(_) => None,
        }
    }

    /// Extract a direct field from the fetch word.
    #[must_use]
    pub fn extract(&self, word: u32) -> Option<u32> {
        match self {
            Self::Bits(slices) => Some(
                slices
                    .iter()
                    .fold(0, |acc, s| acc | (s.range.extract(word) << s.shift)),
            ),
            Self::Computed(_) => None,
        }
    }
}

/// Sign-extend the low `bits` bits of `value`.
#[must_use]
pub const fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= 64 {
        return value as i64;
    }
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Scaled 8-bit immediate.
///
/// `F = 0`: `UI8 << (SCL * 8)`. `F = 1`: the shifted magnitude keeps its low
/// scale bits clear and its top bit is replicated through all higher bits.
/// The result is masked to `addr_bits`.
#[must_use]
pub const fn scaled_immediate(f: u32, scl: u32, ui8: u32, addr_bits: u32) -> u64 {
    let shift = scl * 8;
    let magnitude = (ui8 as u64 & 0xff) << shift;
    let value = if f == 0 {
        magnitude
    } else {
        sign_extend(magnitude, shift + 8) as u64
    };
    if addr_bits >= 64 {
        value
    } else {
        value & ((1u64 << addr_bits) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_range_extract() {
        // 0x4A01: se_li r1, 0x20
        let word = 0x4A01_0000;
        assert_eq!(BitRange::new(0, 4).extract(word), 0x4);
        assert_eq!(BitRange::new(5, 12).extract(word), 0x20);
        assert_eq!(BitRange::new(12, 16).extract(word), 0x1);
        assert_eq!(BitRange::new(0, 32).extract(word), word);
    }

    #[test]
    fn test_bit_range_fits() {
        assert!(BitRange::new(0, 4).fits(0xf));
        assert!(!BitRange::new(0, 4).fits(0x10));
        assert!(BitRange::new(0, 32).fits(u32::MAX));
    }

    #[test]
    fn test_split_field() {
        // LI20: [17:21) << 16 | [11:16) << 11 | [21:32)
        static LI20: [BitSlice; 3] = [
            BitSlice::new(17, 21, 16),
            BitSlice::new(11, 16, 11),
            BitSlice::new(21, 32, 0),
        ];
        let src = FieldSource::Bits(&LI20);
        assert_eq!(src.width(), Some(20));
        // li20 = 0x8_0001: top bit in [17:21), lsb in [21:32)
        let word = (0b1000 << 11) | 1;
        assert_eq!(src.extract(word), Some(0x8_0001));
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0x80, 8), -128);
        assert_eq!(sign_extend(0x7f, 8), 127);
        assert_eq!(sign_extend(0xffff, 16), -1);
        assert_eq!(sign_extend(0x1ff, 9), -1);
    }

    #[test]
    fn test_scaled_immediate_unsigned_exhaustive() {
        for scl in 0..4 {
            for ui8 in 0..=0xff {
                assert_eq!(
                    scaled_immediate(0, scl, ui8, 32),
                    u64::from(ui8) << (scl * 8)
                );
            }
        }
    }

    #[test]
    fn test_scaled_immediate_signed() {
        assert_eq!(scaled_immediate(1, 0, 0xff, 32), 0xffff_ffff);
        assert_eq!(scaled_immediate(1, 1, 0x80, 32), 0xffff_8000);
        assert_eq!(scaled_immediate(1, 2, 0xfe, 32), 0xfffe_0000);
        assert_eq!(scaled_immediate(1, 3, 0x80, 32), 0x8000_0000);
        assert_eq!(scaled_immediate(1, 1, 0x7f, 32), 0x7f00);
        assert_eq!(scaled_immediate(1, 0, 0x80, 64), 0xffff_ffff_ffff_ff80);
    }
}
