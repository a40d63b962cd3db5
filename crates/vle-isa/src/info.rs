//! Control-flow summary for analysis passes.

use crate::field::Field;
use crate::instruction::Instruction;

/// Kind of control-flow edge an instruction can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchKind {
    Unconditional(u64),
    Call(u64),
    True(u64),
    False(u64),
    /// Jump through a register.
    Indirect,
    /// Call through a register.
    Unresolved,
    FunctionReturn,
    SystemCall,
}

/// Length and outgoing edges of one instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionInfo {
    pub length: u8,
    pub branches: Vec<BranchKind>,
}

impl InstructionInfo {
    /// Placeholder for bytes that do not decode.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            length: 4,
            branches: Vec::new(),
        }
    }

    /// Info for a decoded instruction.
    #[must_use]
    pub fn of(inst: &Instruction) -> Self {
        let next = inst.next_address();
        let link = inst.suffix_set(Field::LK);
        let branches = match inst.mnemonic() {
            "e_b" | "se_b" => match inst.target_address() {
                Some(target) if target != next => {
                    if link {
                        vec![BranchKind::Call(target)]
                    } else {
                        vec![BranchKind::Unconditional(target)]
                    }
                }
                _ => Vec::new(),
            },
            "e_bc" | "se_bc" => match inst.target_address() {
                Some(target) if target != next => {
                    vec![BranchKind::True(target), BranchKind::False(next)]
                }
                _ => Vec::new(),
            },
            "se_blr" | "se_bctr" if link => vec![BranchKind::Unresolved],
            "se_blr" => vec![BranchKind::FunctionReturn],
            "se_bctr" => vec![BranchKind::Indirect],
            "se_rfi" | "se_rfci" | "se_rfdi" | "se_rfmci" => vec![BranchKind::FunctionReturn],
            "se_sc" => vec![BranchKind::SystemCall],
            _ => Vec::new(),
        };
        Self {
            length: inst.length(),
            branches,
        }
    }

    /// Check if control can leave other than by falling through.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        !self.branches.is_empty()
    }
}

impl From<&Instruction> for InstructionInfo {
    fn from(inst: &Instruction) -> Self {
        Self::of(inst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::decoder::Decoder;

    fn info(bytes: &[u8], address: u64) -> InstructionInfo {
        let decoder = Decoder::new(Category::empty()).unwrap();
        InstructionInfo::of(&decoder.decode(bytes, address).unwrap())
    }

    #[test]
    fn test_direct_branches() {
        // se_b +8
        assert_eq!(
            info(&[0xE8, 0x04], 0x100).branches,
            vec![BranchKind::Unconditional(0x108)]
        );
        // se_bl +8
        assert_eq!(
            info(&[0xE9, 0x04], 0x100).branches,
            vec![BranchKind::Call(0x108)]
        );
        // se_b +2 is a fall-through.
        assert!(info(&[0xE8, 0x01], 0x100).branches.is_empty());
    }

    #[test]
    fn test_conditional_branch_edges() {
        // se_bne +0
        let i = info(&[0xE2, 0x00], 0x100);
        assert_eq!(i.length, 2);
        assert_eq!(
            i.branches,
            vec![BranchKind::True(0x100), BranchKind::False(0x102)]
        );
        // se_bne +2 lands on the next instruction either way.
        assert!(info(&[0xE2, 0x01], 0x100).branches.is_empty());
    }

    #[test]
    fn test_register_branches() {
        assert_eq!(info(&[0x00, 0x04], 0).branches, vec![BranchKind::FunctionReturn]);
        assert_eq!(info(&[0x00, 0x05], 0).branches, vec![BranchKind::Unresolved]);
        assert_eq!(info(&[0x00, 0x06], 0).branches, vec![BranchKind::Indirect]);
        assert_eq!(info(&[0x00, 0x07], 0).branches, vec![BranchKind::Unresolved]);
        assert_eq!(info(&[0x00, 0x08], 0).branches, vec![BranchKind::FunctionReturn]);
        assert_eq!(info(&[0x00, 0x02], 0).branches, vec![BranchKind::SystemCall]);
    }

    #[test]
    fn test_plain_instruction_has_no_edges() {
        let i = info(&[0x01, 0x10], 0);
        assert!(!i.is_branch());
        assert_eq!(i.length, 2);
    }

    #[test]
    fn test_unknown_placeholder() {
        assert_eq!(InstructionInfo::unknown().length, 4);
    }
}
