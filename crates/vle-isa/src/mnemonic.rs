//! Extended and condensed mnemonics.

use std::fmt;

use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::spr_name;

/// Condition a conditional branch tests.
///
/// The first row branches when the tested CR bit is clear, the second when
/// it is set; the last column of each row is a counter test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchCondition {
    Ge,
    Le,
    Ne,
    Ns,
    Dnz,
    Lt,
    Gt,
    Eq,
    So,
    Dz,
}

impl BranchCondition {
    const TABLE: [[Self; 5]; 2] = [
        [Self::Ge, Self::Le, Self::Ne, Self::Ns, Self::Dnz],
        [Self::Lt, Self::Gt, Self::Eq, Self::So, Self::Dz],
    ];

    /// Condition at `row` (branch-if-set) and `column` (CR bit, or 4 for
    /// the counter).
    #[must_use]
    pub const fn from_table(row: u32, column: u32) -> Self {
        Self::TABLE[(row & 1) as usize][if column > 4 { 4 } else { column as usize }]
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Ge => "ge",
            Self::Le => "le",
            Self::Ne => "ne",
            Self::Ns => "ns",
            Self::Dnz => "dnz",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::So => "so",
            Self::Dz => "dz",
        }
    }

    /// Check if the branch tests the counter instead of a CR bit.
    #[must_use]
    pub const fn is_counter(self) -> bool {
        matches!(self, Self::Dnz | Self::Dz)
    }

    /// Value the CR bit must have for the branch to be taken.
    #[must_use]
    pub const fn taken_if_set(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::Eq | Self::So | Self::Dz)
    }
}

impl fmt::Display for BranchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl Instruction {
    /// Condition of a conditional branch; `None` for other instructions.
    #[must_use]
    pub fn branch_condition(&self) -> Option<BranchCondition> {
        if !self.is_conditional_branch() {
            return None;
        }
        if let Some(bo) = self.field_u32(Field::BO32) {
            let bi = self.field_u32(Field::BI32)?;
            let column = if bo & 2 != 0 { 4 } else { bi % 4 };
            return Some(BranchCondition::from_table(bo & 1, column));
        }
        let bo = self.field_u32(Field::BO16)?;
        let bi = self.field_u32(Field::BI16)?;
        Some(BranchCondition::from_table(bo, bi))
    }

    /// CR field a conditional branch reads.
    #[must_use]
    pub fn branch_condition_index(&self) -> Option<u8> {
        if !self.is_conditional_branch() {
            return None;
        }
        match self.field_u32(Field::BI32) {
            Some(bi) => u8::try_from(bi >> 2).ok(),
            None => Some(0),
        }
    }

    /// Check if a declared suffix field is set.
    #[must_use]
    pub fn suffix_set(&self, field: Field) -> bool {
        self.descriptor().declares(field) && self.field(field).is_some_and(|v| v != 0)
    }

    /// Well-known name of the SPR a `mfspr`/`mtspr` names.
    fn named_spr(&self) -> Option<&'static str> {
        if !matches!(self.mnemonic(), "mfspr" | "mtspr") {
            return None;
        }
        let spr = u16::try_from(self.field(Field::SPR)?).ok()?;
        spr_name(spr)
    }

    fn is_full_mtcrf(&self) -> bool {
        self.mnemonic() == "mtcrf" && self.field(Field::FXM) == Some(0xFF)
    }

    /// Mnemonic with condition, link, record, and alias resolution applied.
    #[must_use]
    pub fn display_mnemonic(&self) -> String {
        let base = self.mnemonic();
        let mut name = if let Some(cond) = self.branch_condition() {
            let stem = &base[..base.len() - 1];
            format!("{stem}{cond}")
        } else if let Some(spr) = self.named_spr() {
            format!("{}{spr}", &base[..2])
        } else if self.is_full_mtcrf() {
            "mtcr".to_string()
        } else {
            base.to_string()
        };
        if self.suffix_set(Field::LK) {
            name.push('l');
        }
        if self.suffix_set(Field::Rc) {
            name.push('.');
        }
        name
    }

    /// Operands that appear in listings, in order.
    ///
    /// Suffix bits are folded into the mnemonic, and aliases drop the operand
    /// they absorb.
    #[must_use]
    pub fn display_operands(&self) -> Vec<Field> {
        let hide_spr = self.named_spr().is_some();
        let hide_fxm = self.is_full_mtcrf();
        self.operands()
            .iter()
            .copied()
            .filter(|f| !f.is_suffix())
            .filter(|f| !(hide_spr && *f == Field::SPR))
            .filter(|f| !(hide_fxm && *f == Field::FXM))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::decoder::Decoder;

    fn decode(bytes: &[u8]) -> Instruction {
        Decoder::new(Category::empty())
            .unwrap()
            .decode(bytes, 0x1000)
            .unwrap()
    }

    #[test]
    fn test_se_bc_conditions() {
        // se_bc BO16=0 BI16=2: branch if eq clear.
        let i = decode(&[0xE2, 0x00]);
        assert_eq!(i.branch_condition(), Some(BranchCondition::Ne));
        assert_eq!(i.display_mnemonic(), "se_bne");
        assert_eq!(i.branch_condition_index(), Some(0));
        // BO16=1 BI16=0.
        let i = decode(&[0xE4, 0x00]);
        assert_eq!(i.display_mnemonic(), "se_blt");
    }

    #[test]
    fn test_e_bc_conditions() {
        // e_bc BO32=1 BI32=6 (cr1 eq), LK=1.
        let i = decode(&[0x7A, 0x16, 0x00, 0x09]);
        assert_eq!(i.mnemonic(), "e_bc");
        assert_eq!(i.branch_condition(), Some(BranchCondition::Eq));
        assert_eq!(i.branch_condition_index(), Some(1));
        assert_eq!(i.display_mnemonic(), "e_beql");
        // BO32=2: decrement and branch if nonzero.
        let i = decode(&[0x7A, 0x20, 0x00, 0x08]);
        assert_eq!(i.branch_condition(), Some(BranchCondition::Dnz));
        assert_eq!(i.display_mnemonic(), "e_bdnz");
    }

    #[test]
    fn test_link_and_record_suffixes() {
        // se_blrl
        assert_eq!(decode(&[0x00, 0x05]).display_mnemonic(), "se_blrl");
        assert_eq!(decode(&[0x00, 0x04]).display_mnemonic(), "se_blr");
        // se_and. r0, r1
        let i = decode(&[0x47, 0x10]);
        assert_eq!(i.display_mnemonic(), "se_and.");
        assert_eq!(i.display_operands(), vec![Field::RX, Field::RY]);
    }

    #[test]
    fn test_spr_alias() {
        // mfspr r3, lr: SPR 8 -> halves (8, 0).
        let i = decode(&[0x7C, 0x68, 0x02, 0xA6]);
        assert_eq!(i.mnemonic(), "mfspr");
        assert_eq!(i.display_mnemonic(), "mflr");
        assert_eq!(i.display_operands(), vec![Field::RT]);
        // mtspr 1023, r3 stays numeric.
        let i = decode(&[0x7C, 0x7F, 0xFB, 0xA6]);
        assert_eq!(i.display_mnemonic(), "mtspr");
        assert_eq!(i.display_operands(), vec![Field::SPR, Field::RS]);
    }

    #[test]
    fn test_mtcr_alias() {
        // mtcrf 0xff, r3
        let i = decode(&[0x7C, 0x6F, 0xF1, 0x20]);
        assert_eq!(i.display_mnemonic(), "mtcr");
        assert_eq!(i.display_operands(), vec![Field::RS]);
        // mtcrf 0x80, r3
        let i = decode(&[0x7C, 0x68, 0x01, 0x20]);
        assert_eq!(i.display_mnemonic(), "mtcrf");
    }

    #[test]
    fn test_non_branch_has_no_condition() {
        let i = decode(&[0x01, 0x10]);
        assert_eq!(i.branch_condition(), None);
        assert_eq!(i.branch_condition_index(), None);
    }
}
