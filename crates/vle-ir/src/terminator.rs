//! Control-flow summary of one lifted instruction.

/// How control leaves an instruction, derived from its recorded IR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminator {
    /// Fall through to the next instruction.
    Fall { next: u64 },
    /// Unconditional jump; `target` is `None` when computed at run time.
    Jump { target: Option<u64> },
    /// Call; execution resumes at `next`.
    Call { target: Option<u64>, next: u64 },
    /// Return from a function or exception handler.
    Return,
    /// Conditional branch with both successors.
    Branch { taken: u64, fall: u64 },
    /// System call; execution resumes at `next`.
    SystemCall { next: u64 },
    /// Architecturally undefined behavior.
    Undefined,
    /// No translation available.
    Unimplemented,
}

impl Terminator {
    /// Check if this terminator is a fall-through.
    pub const fn is_fall(&self) -> bool {
        matches!(self, Self::Fall { .. })
    }

    /// Check if this terminator is a conditional branch.
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }

    /// Check if this terminator is an indirect jump or call.
    pub const fn is_indirect(&self) -> bool {
        matches!(
            self,
            Self::Jump { target: None } | Self::Call { target: None, .. }
        )
    }

    /// Check if this terminator ends a basic block.
    pub const fn is_control_flow(&self) -> bool {
        !matches!(self, Self::Fall { .. } | Self::Unimplemented)
    }

    /// Statically known successor addresses.
    pub fn static_targets(&self) -> Vec<u64> {
        match *self {
            Self::Fall { next } | Self::SystemCall { next } => vec![next],
            Self::Jump { target: Some(t) } => vec![t],
            Self::Call {
                target: Some(t),
                next,
            } => vec![t, next],
            Self::Call { target: None, next } => vec![next],
            Self::Branch { taken, fall } => vec![taken, fall],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_targets() {
        assert_eq!(
            Terminator::Branch {
                taken: 0x20,
                fall: 0x4
            }
            .static_targets(),
            vec![0x20, 0x4]
        );
        assert!(Terminator::Jump { target: None }.static_targets().is_empty());
        assert!(Terminator::Jump { target: None }.is_indirect());
    }

    #[test]
    fn test_block_end() {
        assert!(!Terminator::Fall { next: 4 }.is_control_flow());
        assert!(!Terminator::Unimplemented.is_control_flow());
        assert!(Terminator::Return.is_control_flow());
    }
}
