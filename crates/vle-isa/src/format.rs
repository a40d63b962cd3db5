//! Instruction formats.
//!
//! A format maps field names to their bit layout for one encoding shape.
//! Several names may alias the same bits (`RT`/`RS`, `XO`/`Rc`); descriptors
//! pick the names that fit their semantics.

use crate::field::{BitSlice, Computed, Field, FieldSource};

/// Bit layout of one encoding shape.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Format {
    pub name: &'static str,
    /// Encoding length in bytes.
    pub length: u8,
    pub fields: &'static [(Field, FieldSource)],
}

impl Format {
    /// Source of `field` in this format.
    #[must_use]
    pub fn source(&self, field: Field) -> Option<&FieldSource> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, src)| src)
    }

    /// Check if `field` is a direct (bit-sliced) field of this format.
    #[must_use]
    pub fn is_direct(&self, field: Field) -> bool {
        matches!(self.source(field), Some(FieldSource::Bits(_)))
    }
}

// Multi-slice arm first: a parenthesized triple also parses as an `expr`.
macro_rules! bits {
    ($(($s:expr, $e:expr, $sh:expr)),+ $(,)?) => {
        FieldSource::Bits(&[$(BitSlice::new($s, $e, $sh)),+])
    };
    ($s:expr, $e:expr) => {
        FieldSource::Bits(&[BitSlice::new($s, $e, 0)])
    };
}

const fn target(disp: Field, bits: u8) -> FieldSource {
    FieldSource::Computed(Computed::RelativeTarget { disp, bits })
}

/// 16-bit conditional and unconditional branch.
pub static BD8: Format = Format {
    name: "BD8",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 5)),
        (Field::BO16, bits!(5, 6)),
        (Field::BI16, bits!(6, 8)),
        (Field::XO, bits!(6, 7)),
        (Field::LK, bits!(7, 8)),
        (Field::BD8, bits!(8, 16)),
        (Field::TARGET, target(Field::BD8, 8)),
    ],
};

/// 32-bit conditional branch.
pub static BD15: Format = Format {
    name: "BD15",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 10)),
        (Field::BO32, bits!(10, 12)),
        (Field::BI32, bits!(12, 16)),
        (Field::BD15, bits!(16, 31)),
        (Field::LK, bits!(31, 32)),
        (Field::TARGET, target(Field::BD15, 15)),
    ],
};

/// 32-bit unconditional branch.
pub static BD24: Format = Format {
    name: "BD24",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::BD24, bits!(7, 31)),
        (Field::LK, bits!(31, 32)),
        (Field::TARGET, target(Field::BD24, 24)),
    ],
};

pub static C: Format = Format {
    name: "C",
    length: 2,
    fields: &[(Field::OPCD, bits!(0, 16)), (Field::LK, bits!(15, 16))],
};

pub static IM5: Format = Format {
    name: "IM5",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::XO, bits!(6, 7)),
        (Field::UI5, bits!(7, 12)),
        (Field::RX, bits!(12, 16)),
    ],
};

pub static OIM5: Format = Format {
    name: "OIM5",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::XO, bits!(6, 7)),
        (Field::Rc, bits!(6, 7)),
        (Field::OIM5, bits!(7, 12)),
        (Field::RX, bits!(12, 16)),
        (Field::OIMM, FieldSource::Computed(Computed::OffsetImmediate)),
    ],
};

pub static IM7: Format = Format {
    name: "IM7",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 5)),
        (Field::UI7, bits!(5, 12)),
        (Field::RX, bits!(12, 16)),
    ],
};

pub static R: Format = Format {
    name: "R",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::XO, bits!(6, 12)),
        (Field::RX, bits!(12, 16)),
    ],
};

pub static RR: Format = Format {
    name: "RR",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::XO, bits!(6, 8)),
        (Field::Rc, bits!(7, 8)),
        (Field::RY, bits!(8, 12)),
        (Field::ARY, bits!(8, 12)),
        (Field::RX, bits!(12, 16)),
        (Field::ARX, bits!(12, 16)),
    ],
};

/// 16-bit load/store with scaled 4-bit displacement.
pub static SD4: Format = Format {
    name: "SD4",
    length: 2,
    fields: &[
        (Field::OPCD, bits!(0, 4)),
        (Field::SD4, bits!(4, 8)),
        (Field::RZ, bits!(8, 12)),
        (Field::RX, bits!(12, 16)),
        (Field::SD4X, FieldSource::Computed(Computed::ScaledDisplacement)),
    ],
};

pub static D: Format = Format {
    name: "D",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::D, bits!(16, 32)),
        (Field::SI, bits!(16, 32)),
        (Field::UI, bits!(16, 32)),
    ],
};

pub static D8: Format = Format {
    name: "D8",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::XO, bits!(16, 24)),
        (Field::D8, bits!(24, 32)),
    ],
};

/// 16-bit immediate split around `RA`.
pub static I16A: Format = Format {
    name: "I16A",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RA, bits!(11, 16)),
        (Field::XO, bits!(16, 21)),
        (Field::SI, bits!((6, 11, 11), (21, 32, 0))),
        (Field::UI, bits!((6, 11, 11), (21, 32, 0))),
    ],
};

/// 16-bit immediate split around `XO`, destination in `RT`.
pub static I16L: Format = Format {
    name: "I16L",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::XO, bits!(16, 21)),
        (Field::UI, bits!((11, 16, 11), (21, 32, 0))),
    ],
};

pub static M: Format = Format {
    name: "M",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RS, bits!(6, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::RB, bits!(16, 21)),
        (Field::SH, bits!(16, 21)),
        (Field::MB, bits!(21, 26)),
        (Field::ME, bits!(26, 31)),
        (Field::XO, bits!(31, 32)),
    ],
};

/// Scaled 8-bit immediate.
pub static SCI8: Format = Format {
    name: "SCI8",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::BF32, bits!(9, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::XO, bits!(16, 20)),
        (Field::Rc, bits!(20, 21)),
        (Field::F, bits!(21, 22)),
        (Field::SCL, bits!(22, 24)),
        (Field::UI8, bits!(24, 32)),
        (Field::SCIMM, FieldSource::Computed(Computed::ScaledImmediate)),
    ],
};

/// 20-bit load immediate.
pub static LI20: Format = Format {
    name: "LI20",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::XO, bits!(16, 17)),
        (Field::LI20, bits!((17, 21, 16), (11, 16, 11), (21, 32, 0))),
    ],
};

pub static X: Format = Format {
    name: "X",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::TO, bits!(6, 11)),
        (Field::MO, bits!(6, 11)),
        (Field::BF, bits!(6, 9)),
        (Field::CT, bits!(7, 11)),
        (Field::L, bits!(10, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::BFA, bits!(11, 14)),
        (Field::RB, bits!(16, 21)),
        (Field::SH, bits!(16, 21)),
        (Field::E, bits!(16, 17)),
        (Field::XO, bits!(21, 31)),
        (Field::Rc, bits!(31, 32)),
    ],
};

/// Condition register logical.
pub static XL: Format = Format {
    name: "XL",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::BT, bits!(6, 11)),
        (Field::BF, bits!(6, 9)),
        (Field::BA, bits!(11, 16)),
        (Field::BFA, bits!(11, 14)),
        (Field::BB, bits!(16, 21)),
        (Field::XO, bits!(21, 31)),
    ],
};

/// Integer arithmetic with overflow enable.
pub static XO: Format = Format {
    name: "XO",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::RB, bits!(16, 21)),
        (Field::OE, bits!(21, 22)),
        (Field::XO, bits!(22, 31)),
        (Field::Rc, bits!(31, 32)),
    ],
};

/// Special register moves. The 10-bit register numbers are stored with their
/// two 5-bit halves swapped.
pub static XFX: Format = Format {
    name: "XFX",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::FXM, bits!(12, 20)),
        (Field::SPR, bits!((16, 21, 5), (11, 16, 0))),
        (Field::PMRN, bits!((16, 21, 5), (11, 16, 0))),
        (Field::XO, bits!(21, 31)),
    ],
};

pub static A: Format = Format {
    name: "A",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RA, bits!(11, 16)),
        (Field::RB, bits!(16, 21)),
        (Field::BC, bits!(21, 26)),
        (Field::XO, bits!(26, 31)),
    ],
};

/// Signal processing / embedded floating point.
pub static EVX: Format = Format {
    name: "EVX",
    length: 4,
    fields: &[
        (Field::OPCD, bits!(0, 6)),
        (Field::RT, bits!(6, 11)),
        (Field::RS, bits!(6, 11)),
        (Field::BF, bits!(6, 9)),
        (Field::RA, bits!(11, 16)),
        (Field::RB, bits!(16, 21)),
        (Field::XO, bits!(21, 32)),
    ],
};

/// Every format, for table-wide checks.
pub static ALL: &[&Format] = &[
    &BD8, &BD15, &BD24, &C, &IM5, &OIM5, &IM7, &R, &RR, &SD4, &D, &D8, &I16A, &I16L, &M, &SCI8,
    &LI20, &X, &XL, &XO, &XFX, &A, &EVX,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_fit_length() {
        for format in ALL {
            for (field, src) in format.fields {
                if let FieldSource::Bits(slices) = src {
                    for s in *slices {
                        assert!(
                            u32::from(s.range.end) <= u32::from(format.length) * 8,
                            "{} {field:?} {}",
                            format.name,
                            s.range
                        );
                        assert!(s.range.start < s.range.end);
                    }
                }
            }
        }
    }

    #[test]
    fn test_computed_inputs_are_direct() {
        for format in ALL {
            for (field, src) in format.fields {
                if let FieldSource::Computed(c) = src {
                    for input in c.inputs() {
                        assert!(format.is_direct(*input), "{} {field:?}", format.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_split_slices_do_not_overlap() {
        for format in ALL {
            for (_, src) in format.fields {
                if let FieldSource::Bits(slices) = src {
                    for (i, a) in slices.iter().enumerate() {
                        for b in &slices[i + 1..] {
                            assert!(
                                a.range.end <= b.range.start || b.range.end <= a.range.start
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_split_immediate_joins_slices() {
        // e_add2is: SI[0:4] in bits 6..11, SI[5:15] in bits 21..32.
        let word = (28 << 26) | (0b10101 << 21) | 0x123;
        let si = I16A.source(Field::SI).and_then(|s| s.extract(word));
        assert_eq!(si, Some((0b10101 << 11) | 0x123));
        let word = (28 << 26) | (0b00011 << 16) | 0x7FF;
        let ui = I16L.source(Field::UI).and_then(|s| s.extract(word));
        assert_eq!(ui, Some((0b00011 << 11) | 0x7FF));
    }

    #[test]
    fn test_spr_halves_swapped() {
        // mfspr r3, lr: SPR 8 encodes as spr[5:9] = 0b01000 in bits 11..16.
        let word = (31 << 26) | (3 << 21) | (8 << 16) | (339 << 1);
        let spr = XFX.source(Field::SPR).and_then(|s| s.extract(word));
        assert_eq!(spr, Some(8));
    }
}
