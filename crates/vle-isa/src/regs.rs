//! Register, flag, and flag-write vocabulary for the IR.

use std::fmt;

use vle_ir::{Arch, Condition};

/// Architecture marker for PowerPC VLE.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vle;

impl Arch for Vle {
    type Reg = Reg;
    type Flag = Flag;
    type FlagWrite = FlagWrite;

    const NAME: &'static str = "power-vle";
    const REG_BYTES: u8 = 4;
}

/// Stack pointer.
pub const SP: Reg = Reg::Gpr(1);

/// Architectural register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    Gpr(u8),
    Lr,
    Ctr,
    Xer,
    Cr,
    Msr,
    Srr0,
    Srr1,
    Csrr0,
    Csrr1,
    Dsrr0,
    Dsrr1,
    Mcsrr0,
    Mcsrr1,
    /// Special register without a dedicated variant.
    Spr(u16),
    /// Performance monitor register.
    Pmr(u16),
    /// Lifter scratch register.
    Temp(u8),
}

impl Reg {
    /// Map an SPR number to a register, falling back to an opaque `Spr`.
    #[must_use]
    pub const fn from_spr(n: u16) -> Self {
        match n {
            1 => Self::Xer,
            8 => Self::Lr,
            9 => Self::Ctr,
            26 => Self::Srr0,
            27 => Self::Srr1,
            58 => Self::Csrr0,
            59 => Self::Csrr1,
            570 => Self::Mcsrr0,
            571 => Self::Mcsrr1,
            574 => Self::Dsrr0,
            575 => Self::Dsrr1,
            _ => Self::Spr(n),
        }
    }
}

/// Well-known SPR names, used for `mf<name>`/`mt<name>` mnemonics.
static SPR_NAMES: &[(u16, &str)] = &[
    (1, "xer"),
    (8, "lr"),
    (9, "ctr"),
    (22, "dec"),
    (26, "srr0"),
    (27, "srr1"),
    (48, "pid"),
    (54, "decar"),
    (58, "csrr0"),
    (59, "csrr1"),
    (61, "dear"),
    (62, "esr"),
    (63, "ivpr"),
    (256, "usprg0"),
    (268, "tbl"),
    (269, "tbu"),
    (272, "sprg0"),
    (273, "sprg1"),
    (274, "sprg2"),
    (275, "sprg3"),
    (284, "tbwl"),
    (285, "tbwu"),
    (286, "pir"),
    (287, "pvr"),
    (304, "dbsr"),
    (308, "dbcr0"),
    (309, "dbcr1"),
    (310, "dbcr2"),
    (340, "tcr"),
    (336, "tsr"),
    (512, "spefscr"),
    (570, "mcsrr0"),
    (571, "mcsrr1"),
    (572, "mcsr"),
    (574, "dsrr0"),
    (575, "dsrr1"),
    (1008, "hid0"),
    (1009, "hid1"),
];

/// Name of a well-known SPR.
#[must_use]
pub fn spr_name(n: u16) -> Option<&'static str> {
    SPR_NAMES
        .iter()
        .find(|(num, _)| *num == n)
        .map(|(_, name)| *name)
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpr(n) => write!(f, "r{n}"),
            Self::Lr => f.write_str("lr"),
            Self::Ctr => f.write_str("ctr"),
            Self::Xer => f.write_str("xer"),
            Self::Cr => f.write_str("cr"),
            Self::Msr => f.write_str("msr"),
            Self::Srr0 => f.write_str("srr0"),
            Self::Srr1 => f.write_str("srr1"),
            Self::Csrr0 => f.write_str("csrr0"),
            Self::Csrr1 => f.write_str("csrr1"),
            Self::Dsrr0 => f.write_str("dsrr0"),
            Self::Dsrr1 => f.write_str("dsrr1"),
            Self::Mcsrr0 => f.write_str("mcsrr0"),
            Self::Mcsrr1 => f.write_str("mcsrr1"),
            Self::Spr(n) => match spr_name(*n) {
                Some(name) => f.write_str(name),
                None => write!(f, "spr{n}"),
            },
            Self::Pmr(n) => write!(f, "pmr{n}"),
            Self::Temp(n) => write!(f, "temp{n}"),
        }
    }
}

/// Bit within a condition register field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrBit {
    Lt,
    Gt,
    Eq,
    So,
}

impl CrBit {
    pub const ALL: [Self; 4] = [Self::Lt, Self::Gt, Self::Eq, Self::So];

    #[must_use]
    pub const fn from_index(i: u8) -> Self {
        match i & 3 {
            0 => Self::Lt,
            1 => Self::Gt,
            2 => Self::Eq,
            _ => Self::So,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::So => "so",
        }
    }
}

/// Single status flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    Cr { field: u8, bit: CrBit },
    XerSo,
    XerOv,
    XerCa,
}

impl Flag {
    /// Flag for CR bit `n` (0..32), numbered MSB-first as in `BI`/`BT`.
    #[must_use]
    pub const fn cr_bit(n: u8) -> Self {
        Self::Cr {
            field: (n >> 2) & 7,
            bit: CrBit::from_index(n),
        }
    }

    #[must_use]
    pub const fn cr(field: u8, bit: CrBit) -> Self {
        Self::Cr { field, bit }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cr { field, bit } => write!(f, "cr{field}{}", bit.name()),
            Self::XerSo => f.write_str("xer_so"),
            Self::XerOv => f.write_str("xer_ov"),
            Self::XerCa => f.write_str("xer_ca"),
        }
    }
}

/// How a compare-style write interprets its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareKind {
    Signed,
    Unsigned,
    Float,
}

/// Flag-write tag: which flags an operation updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlagWrite {
    /// CR field from a comparison of the result against zero.
    Cr { field: u8, kind: CompareKind },
    /// `xer_so`, `xer_ov`, `xer_ca`.
    Xer,
    XerCa,
    XerOvSo,
    /// CR field loaded from the corresponding nibble of the result.
    Mtcr(u8),
    /// CR field left undefined.
    Invalidate(u8),
    /// Every CR field left undefined.
    InvalidateAll,
}

impl FlagWrite {
    /// `crNs`: signed comparison into field `n`.
    #[must_use]
    pub const fn signed(field: u8) -> Self {
        Self::Cr {
            field,
            kind: CompareKind::Signed,
        }
    }

    /// `crNu`: unsigned comparison into field `n`.
    #[must_use]
    pub const fn unsigned(field: u8) -> Self {
        Self::Cr {
            field,
            kind: CompareKind::Unsigned,
        }
    }

    /// `crNf`: float comparison into field `n`.
    #[must_use]
    pub const fn float(field: u8) -> Self {
        Self::Cr {
            field,
            kind: CompareKind::Float,
        }
    }

    /// Every tag in the taxonomy.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8)
            .flat_map(|n| {
                [
                    Self::signed(n),
                    Self::unsigned(n),
                    Self::float(n),
                    Self::Mtcr(n),
                    Self::Invalidate(n),
                ]
            })
            .chain([Self::Xer, Self::XerCa, Self::XerOvSo, Self::InvalidateAll])
    }

    /// Flags this tag writes.
    #[must_use]
    pub fn flags(self) -> Vec<Flag> {
        match self {
            Self::Cr { field, .. } | Self::Mtcr(field) | Self::Invalidate(field) => {
                CrBit::ALL.iter().map(|&bit| Flag::cr(field, bit)).collect()
            }
            Self::Xer => vec![Flag::XerSo, Flag::XerOv, Flag::XerCa],
            Self::XerCa => vec![Flag::XerCa],
            Self::XerOvSo => vec![Flag::XerOv, Flag::XerSo],
            Self::InvalidateAll => (0..8)
                .flat_map(|field| CrBit::ALL.iter().map(move |&bit| Flag::cr(field, bit)))
                .collect(),
        }
    }

    /// Condition deriving `flag` from `result <cond> 0`, for comparison tags.
    ///
    /// `so` bits copy `xer_so` and have no condition.
    #[must_use]
    pub const fn condition(self, flag: Flag) -> Option<Condition> {
        let Self::Cr { field, kind } = self else {
            return None;
        };
        let Flag::Cr { field: f, bit } = flag else {
            return None;
        };
        if f != field {
            return None;
        }
        Some(match (kind, bit) {
            (_, CrBit::So) => return None,
            (_, CrBit::Eq) => Condition::Eq,
            (CompareKind::Signed, CrBit::Lt) => Condition::Slt,
            (CompareKind::Signed, CrBit::Gt) => Condition::Sgt,
            (CompareKind::Unsigned, CrBit::Lt) => Condition::Ult,
            (CompareKind::Unsigned, CrBit::Gt) => Condition::Ugt,
            (CompareKind::Float, CrBit::Lt) => Condition::FloatLt,
            (CompareKind::Float, CrBit::Gt) => Condition::FloatGt,
        })
    }
}

impl fmt::Display for FlagWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cr { field, kind } => {
                let suffix = match kind {
                    CompareKind::Signed => 's',
                    CompareKind::Unsigned => 'u',
                    CompareKind::Float => 'f',
                };
                write!(f, "cr{field}{suffix}")
            }
            Self::Xer => f.write_str("xer"),
            Self::XerCa => f.write_str("xer_ca"),
            Self::XerOvSo => f.write_str("xer_ov_so"),
            Self::Mtcr(n) => write!(f, "mtcr{n}"),
            Self::Invalidate(n) => write!(f, "invl{n}"),
            Self::InvalidateAll => f.write_str("invall"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spr() {
        assert_eq!(Reg::from_spr(8), Reg::Lr);
        assert_eq!(Reg::from_spr(9), Reg::Ctr);
        assert_eq!(Reg::from_spr(575), Reg::Dsrr1);
        assert_eq!(Reg::from_spr(48), Reg::Spr(48));
        assert_eq!(Reg::Spr(48).to_string(), "pid");
        assert_eq!(Reg::Spr(999).to_string(), "spr999");
    }

    #[test]
    fn test_cr_bit_numbering() {
        assert_eq!(Flag::cr_bit(2), Flag::cr(0, CrBit::Eq));
        assert_eq!(Flag::cr_bit(7), Flag::cr(1, CrBit::So));
        assert_eq!(Flag::cr_bit(30).to_string(), "cr7eq");
    }

    #[test]
    fn test_flag_write_names_unique() {
        let names: Vec<String> = FlagWrite::all().map(|w| w.to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len());
        assert_eq!(names.len(), 44);
        assert!(names.contains(&"cr0s".to_string()));
        assert!(names.contains(&"xer_ov_so".to_string()));
        assert!(names.contains(&"invall".to_string()));
    }

    #[test]
    fn test_flag_write_flags() {
        assert_eq!(FlagWrite::XerCa.flags(), vec![Flag::XerCa]);
        assert_eq!(FlagWrite::signed(3).flags().len(), 4);
        assert_eq!(FlagWrite::InvalidateAll.flags().len(), 32);
    }

    #[test]
    fn test_flag_write_condition() {
        let w = FlagWrite::unsigned(1);
        assert_eq!(w.condition(Flag::cr(1, CrBit::Lt)), Some(Condition::Ult));
        assert_eq!(w.condition(Flag::cr(1, CrBit::So)), None);
        assert_eq!(w.condition(Flag::cr(0, CrBit::Lt)), None);
        assert_eq!(FlagWrite::Xer.condition(Flag::XerCa), None);
    }
}
