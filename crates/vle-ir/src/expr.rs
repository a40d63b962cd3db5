//! Expression IR.
//!
//! Every IR node, including side-effecting ones such as register writes and
//! jumps, lives in a per-instruction arena and is addressed by [`ExprId`].

use std::fmt;

use crate::arch::Arch;

/// Handle to an expression in a builder's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Branch label handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(u32);

impl Label {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Unary operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    /// Sign-extend the operand to the result size.
    SignExtend,
    /// Zero-extend the operand to the result size.
    ZeroExtend,
    /// Truncate the operand to the result size.
    LowPart,
    /// Reverse byte order within the result size.
    ByteSwap,
    /// Count leading zero bits.
    Clz,
    FloatNeg,
    FloatAbs,
    /// Signed integer to float.
    IntToFloat,
    /// Unsigned integer to float.
    UIntToFloat,
    /// Float to signed integer, rounding toward zero.
    FloatToInt,
    /// Float to unsigned integer, rounding toward zero.
    FloatToUInt,
}

/// Binary operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Signed multiply producing a double-width result.
    MulsDp,
    /// Unsigned multiply producing a double-width result.
    MuluDp,
    DivS,
    DivU,
    And,
    Or,
    Xor,
    Lsl,
    Lsr,
    Asr,
    Rol,
    Ror,
    FloatAdd,
    FloatSub,
    FloatMul,
    FloatDiv,
}

/// Operations consuming an explicit carry input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CarryOp {
    /// `left + right + carry`.
    AddCarry,
    /// `left - right - !carry` (PowerPC borrow convention).
    SubBorrow,
}

/// Comparison conditions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Condition {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
    Ult,
    Ule,
    Ugt,
    Uge,
    FloatEq,
    FloatLt,
    FloatGt,
}

/// IR node.
#[derive(Clone, Debug)]
pub enum Expr<A: Arch> {
    Const {
        size: u8,
        value: u64,
    },
    Reg {
        size: u8,
        reg: A::Reg,
    },
    SetReg {
        size: u8,
        reg: A::Reg,
        value: ExprId,
        flags: Option<A::FlagWrite>,
    },
    Flag(A::Flag),
    SetFlag {
        flag: A::Flag,
        value: ExprId,
    },
    Load {
        size: u8,
        addr: ExprId,
    },
    Store {
        size: u8,
        addr: ExprId,
        value: ExprId,
    },
    Unary {
        op: UnaryOp,
        size: u8,
        operand: ExprId,
        flags: Option<A::FlagWrite>,
    },
    Binary {
        op: BinaryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        flags: Option<A::FlagWrite>,
    },
    Carry {
        op: CarryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        carry: ExprId,
        flags: Option<A::FlagWrite>,
    },
    Compare {
        cond: Condition,
        size: u8,
        left: ExprId,
        right: ExprId,
    },
    TestBit {
        size: u8,
        value: ExprId,
        bit: ExprId,
    },
    /// `cond ? if_true : if_false`.
    Select {
        size: u8,
        cond: ExprId,
        if_true: ExprId,
        if_false: ExprId,
    },
    Jump(ExprId),
    Call(ExprId),
    Ret(ExprId),
    If {
        cond: ExprId,
        then_label: Label,
        else_label: Label,
    },
    Intrinsic {
        name: &'static str,
        args: Vec<ExprId>,
    },
    SystemCall,
    Nop,
    /// Architecturally undefined behavior.
    Undefined,
    /// No translation exists for this instruction.
    Unimplemented,
}

impl<A: Arch> Expr<A> {
    /// Check if this node transfers control.
    pub const fn is_control_flow(&self) -> bool {
        matches!(
            self,
            Self::Jump(_)
                | Self::Call(_)
                | Self::Ret(_)
                | Self::If { .. }
                | Self::SystemCall
                | Self::Undefined
        )
    }

    /// Constant value, if this node is a constant.
    pub const fn as_const(&self) -> Option<u64> {
        match self {
            Self::Const { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl UnaryOp {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Not => "not",
            Self::SignExtend => "sx",
            Self::ZeroExtend => "zx",
            Self::LowPart => "low",
            Self::ByteSwap => "bswap",
            Self::Clz => "clz",
            Self::FloatNeg => "fneg",
            Self::FloatAbs => "fabs",
            Self::IntToFloat => "int_to_float",
            Self::UIntToFloat => "uint_to_float",
            Self::FloatToInt => "float_to_int",
            Self::FloatToUInt => "float_to_uint",
        }
    }
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::MulsDp => "*s",
            Self::MuluDp => "*u",
            Self::DivS => "/s",
            Self::DivU => "/u",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Lsl => "<<",
            Self::Lsr => "u>>",
            Self::Asr => "s>>",
            Self::Rol => "rol",
            Self::Ror => "ror",
            Self::FloatAdd => "f+",
            Self::FloatSub => "f-",
            Self::FloatMul => "f*",
            Self::FloatDiv => "f/",
        }
    }
}

impl CarryOp {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddCarry => "adc",
            Self::SubBorrow => "sbb",
        }
    }
}

impl Condition {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Slt => "s<",
            Self::Sle => "s<=",
            Self::Sgt => "s>",
            Self::Sge => "s>=",
            Self::Ult => "u<",
            Self::Ule => "u<=",
            Self::Ugt => "u>",
            Self::Uge => "u>=",
            Self::FloatEq => "f==",
            Self::FloatLt => "f<",
            Self::FloatGt => "f>",
        }
    }

    /// Evaluate on two constants of the given size.
    ///
    /// Float conditions are never folded.
    #[must_use]
    pub const fn eval(self, size: u8, left: u64, right: u64) -> Option<bool> {
        let l = crate::arch::mask_to(left, size);
        let r = crate::arch::mask_to(right, size);
        let ls = crate::arch::sign_extend_bytes(l, size) as i64;
        let rs = crate::arch::sign_extend_bytes(r, size) as i64;
        Some(match self {
            Self::Eq => l == r,
            Self::Ne => l != r,
            Self::Slt => ls < rs,
            Self::Sle => ls <= rs,
            Self::Sgt => ls > rs,
            Self::Sge => ls >= rs,
            Self::Ult => l < r,
            Self::Ule => l <= r,
            Self::Ugt => l > r,
            Self::Uge => l >= r,
            Self::FloatEq | Self::FloatLt | Self::FloatGt => return None,
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_eval_signed_vs_unsigned() {
        assert_eq!(Condition::Slt.eval(4, 0xffff_ffff, 0), Some(true));
        assert_eq!(Condition::Ult.eval(4, 0xffff_ffff, 0), Some(false));
        assert_eq!(Condition::Sgt.eval(2, 0x7fff, 0x8000), Some(true));
    }

    #[test]
    fn test_condition_eval_float_not_folded() {
        assert_eq!(Condition::FloatEq.eval(4, 1, 1), None);
    }

    #[test]
    fn test_expr_id_index() {
        assert_eq!(ExprId::new(7).index(), 7);
        assert_eq!(Label::new(3).index(), 3);
    }
}
