//! Operand resolution and text rendering.

use std::fmt;

use tracing::warn;

use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{CrBit, Flag, Reg};

/// Token rendered for an operand that cannot be resolved.
pub const UNAVAILABLE: &str = "#UNAVAILABLE";

/// Resolved operand value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Reg(Reg),
    /// Condition register field.
    CrField(u8),
    /// Single condition register bit.
    CrBit(Flag),
    Imm(i64),
    Address(u64),
    /// Displacement off a base register.
    Mem { base: Reg, disp: i64 },
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Reg(reg) => write!(f, "{reg}"),
            Self::CrField(n) => write!(f, "cr{n}"),
            Self::CrBit(flag) => write!(f, "{flag}"),
            Self::Imm(v) => fmt_imm(f, v),
            Self::Address(a) => write!(f, "{a:#x}"),
            Self::Mem { base, disp } => write!(f, "{disp}({base})"),
        }
    }
}

fn fmt_imm(f: &mut fmt::Formatter<'_>, v: i64) -> fmt::Result {
    if (-10..10).contains(&v) {
        write!(f, "{v}")
    } else if v < 0 {
        write!(f, "-{:#x}", v.unsigned_abs())
    } else {
        write!(f, "{v:#x}")
    }
}

/// Register numbering of the short-form register fields.
const fn short_gpr(n: u32) -> u32 {
    if n < 8 { n } else { n + 16 }
}

impl Instruction {
    /// General-purpose register named by a register field.
    #[must_use]
    pub fn gpr(&self, field: Field) -> Option<Reg> {
        let n = self.field_u32(field)?;
        let n = match field {
            Field::RA | Field::RB | Field::RT | Field::RS => n,
            Field::RX | Field::RY | Field::RZ => short_gpr(n),
            Field::ARX | Field::ARY => n + 8,
            _ => return None,
        };
        u8::try_from(n).ok().map(Reg::Gpr)
    }

    /// Resolve one operand field.
    #[must_use]
    pub fn operand(&self, field: Field) -> Option<Operand> {
        let narrow = |v: i64| u8::try_from(v).ok();
        Some(match field {
            Field::RA
            | Field::RB
            | Field::RT
            | Field::RS
            | Field::RX
            | Field::RY
            | Field::RZ
            | Field::ARX
            | Field::ARY => Operand::Reg(self.gpr(field)?),
            Field::BT | Field::BA | Field::BB | Field::BC | Field::BI32 => {
                Operand::CrBit(Flag::cr_bit(narrow(self.field(field)?)?))
            }
            Field::BI16 => Operand::CrBit(Flag::cr(0, CrBit::from_index(narrow(self.field(field)?)?))),
            Field::BF | Field::BFA | Field::BF32 => Operand::CrField(narrow(self.field(field)?)?),
            Field::SPR => Operand::Reg(Reg::from_spr(u16::try_from(self.field(field)?).ok()?)),
            Field::PMRN => Operand::Reg(Reg::Pmr(u16::try_from(self.field(field)?).ok()?)),
            Field::TARGET => Operand::Address(self.target_address()?),
            f if f.is_signed() => Operand::Imm(self.field_signed(f)?),
            f => Operand::Imm(self.field(f)?),
        })
    }

    /// Operands as rendered in listings.
    ///
    /// A displacement directly after its base register folds into one
    /// `disp(base)` operand. Unresolvable operands are `None`.
    #[must_use]
    pub fn resolved_operands(&self) -> Vec<Option<Operand>> {
        let mut out: Vec<Option<Operand>> = Vec::new();
        for field in self.display_operands() {
            let op = self.operand(field);
            if matches!(field, Field::D | Field::D8 | Field::SD4X)
                && let Some(Operand::Imm(disp)) = op
                && let Some(Some(Operand::Reg(base))) = out.last().copied()
            {
                out.pop();
                out.push(Some(Operand::Mem { base, disp }));
                continue;
            }
            out.push(op);
        }
        out
    }

    /// Listing text: display mnemonic and operands.
    #[must_use]
    pub fn text(&self) -> String {
        let mnemonic = self.display_mnemonic();
        let operands: Vec<String> = self
            .resolved_operands()
            .into_iter()
            .map(|op| match op {
                Some(op) => op.to_string(),
                None => {
                    warn!(
                        mnemonic = %mnemonic,
                        address = self.address(),
                        "operand unavailable"
                    );
                    UNAVAILABLE.to_string()
                }
            })
            .collect();
        if operands.is_empty() {
            mnemonic
        } else {
            format!("{mnemonic} {}", operands.join(", "))
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::decoder::Decoder;
    use crate::descriptor::Descriptor;
    use crate::format;
    use crate::instruction::AddrMode;

    fn text(bytes: &[u8], address: u64) -> String {
        Decoder::new(Category::all())
            .unwrap()
            .decode(bytes, address)
            .unwrap()
            .text()
    }

    #[test]
    fn test_short_register_mapping() {
        // se_mr r24, r7: RX=8, RY=7
        assert_eq!(text(&[0x01, 0x78], 0), "se_mr r24, r7");
        // se_mtar r8, r0: ARX=0
        assert_eq!(text(&[0x02, 0x00], 0), "se_mtar r8, r0");
    }

    #[test]
    fn test_memory_operands() {
        // se_lwz r3, 12(r1)
        assert_eq!(text(&[0xC3, 0x31], 0), "se_lwz r3, 12(r1)");
        // e_lbz r3, -4(r1)
        assert_eq!(text(&[0x30, 0x61, 0xFF, 0xFC], 0), "e_lbz r3, -4(r1)");
    }

    #[test]
    fn test_branch_target() {
        assert_eq!(text(&[0xE8, 0x04], 0x1000), "se_b 0x1008");
        assert_eq!(text(&[0xE2, 0x00], 0x1000), "se_bne cr0eq, 0x1000");
    }

    #[test]
    fn test_named_spr_and_immediates() {
        assert_eq!(text(&[0x7C, 0x68, 0x02, 0xA6], 0), "mflr r3");
        // e_add16i r1, r1, -16
        assert_eq!(text(&[0x1C, 0x21, 0xFF, 0xF0], 0), "e_add16i r1, r1, -0x10");
    }

    #[test]
    fn test_unavailable_operand() {
        // RA is not a field of the C format.
        let d = Descriptor::new("x_probe", Category::VLE, &format::C, &[Field::RA]);
        let inst = Instruction::new(0, 0, d, AddrMode::Bits32);
        assert_eq!(inst.text(), format!("x_probe {UNAVAILABLE}"));
    }
}
