//! Single instruction IR.

use std::fmt;

use crate::arch::Arch;
use crate::expr::{Expr, ExprId, Label};
use crate::terminator::Terminator;

/// Recorded IR for a single instruction.
#[derive(Clone, Debug)]
pub struct InstrIr<A: Arch> {
    /// Address of this instruction.
    pub address: u64,
    /// Instruction length in bytes (2 or 4).
    pub length: u8,
    exprs: Vec<Expr<A>>,
    labels: Vec<u64>,
    roots: Vec<ExprId>,
}

impl<A: Arch> InstrIr<A> {
    pub(crate) const fn new(
        address: u64,
        length: u8,
        exprs: Vec<Expr<A>>,
        labels: Vec<u64>,
        roots: Vec<ExprId>,
    ) -> Self {
        Self {
            address,
            length,
            exprs,
            labels,
            roots,
        }
    }

    /// Node behind `id`.
    #[must_use]
    pub fn get(&self, id: ExprId) -> &Expr<A> {
        &self.exprs[id.index()]
    }

    /// Appended statements, in order.
    #[must_use]
    pub fn roots(&self) -> &[ExprId] {
        &self.roots
    }

    /// Statement nodes, in order.
    pub fn statements(&self) -> impl Iterator<Item = &Expr<A>> {
        self.roots.iter().map(|id| self.get(*id))
    }

    /// Address a label refers to.
    #[must_use]
    pub fn label_address(&self, label: Label) -> Option<u64> {
        self.labels.get(label.index()).copied()
    }

    /// Address of the next sequential instruction.
    #[must_use]
    pub const fn next_address(&self) -> u64 {
        self.address.wrapping_add(self.length as u64)
    }

    /// Check if the lifter had no translation for this instruction.
    #[must_use]
    pub fn is_unimplemented(&self) -> bool {
        self.statements().any(|e| matches!(e, Expr::Unimplemented))
    }

    /// Derive the control-flow terminator from the recorded statements.
    #[must_use]
    pub fn terminator(&self) -> Terminator {
        let next = self.next_address();
        if self.is_unimplemented() {
            return Terminator::Unimplemented;
        }
        let last = self
            .roots
            .iter()
            .rev()
            .map(|id| self.get(*id))
            .find(|e| e.is_control_flow());
        let Some(last) = last else {
            return Terminator::Fall { next };
        };
        match last {
            Expr::Jump(dest) => Terminator::Jump {
                target: self.get(*dest).as_const(),
            },
            Expr::Call(dest) => Terminator::Call {
                target: self.get(*dest).as_const(),
                next,
            },
            Expr::Ret(_) => Terminator::Return,
            Expr::If {
                then_label,
                else_label,
                ..
            } => Terminator::Branch {
                taken: self.label_address(*then_label).unwrap_or(next),
                fall: self.label_address(*else_label).unwrap_or(next),
            },
            Expr::SystemCall => Terminator::SystemCall { next },
            _ => Terminator::Undefined,
        }
    }

    /// Check if this instruction ends a basic block.
    #[must_use]
    pub fn is_block_end(&self) -> bool {
        self.terminator().is_control_flow()
    }

    fn fmt_expr(&self, f: &mut fmt::Formatter<'_>, id: ExprId) -> fmt::Result {
        match self.get(id) {
            Expr::Const { value, .. } => write!(f, "{value:#x}"),
            Expr::Reg { reg, .. } => write!(f, "{reg}"),
            Expr::SetReg {
                reg, value, flags, ..
            } => {
                write!(f, "{reg} = ")?;
                self.fmt_expr(f, *value)?;
                if let Some(flags) = flags {
                    write!(f, " @{flags}")?;
                }
                Ok(())
            }
            Expr::Flag(flag) => write!(f, "{flag}"),
            Expr::SetFlag { flag, value } => {
                write!(f, "{flag} = ")?;
                self.fmt_expr(f, *value)
            }
            Expr::Load { size, addr } => {
                write!(f, "[")?;
                self.fmt_expr(f, *addr)?;
                write!(f, "].{size}")
            }
            Expr::Store { size, addr, value } => {
                write!(f, "[")?;
                self.fmt_expr(f, *addr)?;
                write!(f, "].{size} = ")?;
                self.fmt_expr(f, *value)
            }
            Expr::Unary {
                op,
                size,
                operand,
                flags,
            } => {
                write!(f, "{op}.{size}(")?;
                self.fmt_expr(f, *operand)?;
                write!(f, ")")?;
                if let Some(flags) = flags {
                    write!(f, " @{flags}")?;
                }
                Ok(())
            }
            Expr::Binary {
                op,
                left,
                right,
                flags,
                ..
            } => {
                write!(f, "(")?;
                self.fmt_expr(f, *left)?;
                write!(f, " {op} ")?;
                self.fmt_expr(f, *right)?;
                write!(f, ")")?;
                if let Some(flags) = flags {
                    write!(f, " @{flags}")?;
                }
                Ok(())
            }
            Expr::Carry {
                op,
                left,
                right,
                carry,
                flags,
                ..
            } => {
                write!(f, "{}(", op.name())?;
                self.fmt_expr(f, *left)?;
                write!(f, ", ")?;
                self.fmt_expr(f, *right)?;
                write!(f, ", ")?;
                self.fmt_expr(f, *carry)?;
                write!(f, ")")?;
                if let Some(flags) = flags {
                    write!(f, " @{flags}")?;
                }
                Ok(())
            }
            Expr::Compare {
                cond, left, right, ..
            } => {
                self.fmt_expr(f, *left)?;
                write!(f, " {cond} ")?;
                self.fmt_expr(f, *right)
            }
            Expr::TestBit { value, bit, .. } => {
                write!(f, "test_bit(")?;
                self.fmt_expr(f, *value)?;
                write!(f, ", ")?;
                self.fmt_expr(f, *bit)?;
                write!(f, ")")
            }
            Expr::Select {
                cond,
                if_true,
                if_false,
                ..
            } => {
                self.fmt_expr(f, *cond)?;
                write!(f, " ? ")?;
                self.fmt_expr(f, *if_true)?;
                write!(f, " : ")?;
                self.fmt_expr(f, *if_false)
            }
            Expr::Jump(dest) => {
                write!(f, "jump(")?;
                self.fmt_expr(f, *dest)?;
                write!(f, ")")
            }
            Expr::Call(dest) => {
                write!(f, "call(")?;
                self.fmt_expr(f, *dest)?;
                write!(f, ")")
            }
            Expr::Ret(dest) => {
                write!(f, "return(")?;
                self.fmt_expr(f, *dest)?;
                write!(f, ")")
            }
            Expr::If {
                cond,
                then_label,
                else_label,
            } => {
                write!(f, "if (")?;
                self.fmt_expr(f, *cond)?;
                write!(f, ") then ")?;
                fmt_label(f, self.label_address(*then_label))?;
                write!(f, " else ")?;
                fmt_label(f, self.label_address(*else_label))
            }
            Expr::Intrinsic { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.fmt_expr(f, *arg)?;
                }
                write!(f, ")")
            }
            Expr::SystemCall => write!(f, "syscall"),
            Expr::Nop => write!(f, "nop"),
            Expr::Undefined => write!(f, "undefined"),
            Expr::Unimplemented => write!(f, "unimplemented"),
        }
    }
}

fn fmt_label(f: &mut fmt::Formatter<'_>, address: Option<u64>) -> fmt::Result {
    match address {
        Some(a) => write!(f, "{a:#x}"),
        None => write!(f, "?"),
    }
}

impl<A: Arch> fmt::Display for InstrIr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, root) in self.roots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            self.fmt_expr(f, *root)?;
        }
        Ok(())
    }
}
