//! Abstract IR emission interface.

use crate::arch::Arch;
use crate::expr::{BinaryOp, CarryOp, Condition, ExprId, Label, UnaryOp};

/// Emission interface a lifter writes into.
///
/// Node constructors return an [`ExprId`]; nothing is executed until a node is
/// passed to [`IrBuilder::append`]. The trait is object safe so lifters can be
/// stored as plain function pointers taking `&mut dyn IrBuilder<A>`.
pub trait IrBuilder<A: Arch> {
    /// Constant of `size` bytes.
    fn constant(&mut self, size: u8, value: u64) -> ExprId;

    /// Read `size` bytes of a register.
    fn reg(&mut self, size: u8, reg: A::Reg) -> ExprId;

    /// Write a register, optionally updating flags from the written value.
    fn set_reg(&mut self, size: u8, reg: A::Reg, value: ExprId, flags: Option<A::FlagWrite>)
    -> ExprId;

    /// Read a single flag.
    fn flag(&mut self, flag: A::Flag) -> ExprId;

    /// Write a single flag.
    fn set_flag(&mut self, flag: A::Flag, value: ExprId) -> ExprId;

    /// Load `size` bytes from memory.
    fn load(&mut self, size: u8, addr: ExprId) -> ExprId;

    /// Store `size` bytes to memory.
    fn store(&mut self, size: u8, addr: ExprId, value: ExprId) -> ExprId;

    fn unary(&mut self, op: UnaryOp, size: u8, operand: ExprId, flags: Option<A::FlagWrite>)
    -> ExprId;

    fn binary(
        &mut self,
        op: BinaryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId;

    /// Binary operation with an explicit carry input.
    fn with_carry(
        &mut self,
        op: CarryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        carry: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId;

    fn compare(&mut self, cond: Condition, size: u8, left: ExprId, right: ExprId) -> ExprId;

    /// Test whether bit `bit` of `value` is set.
    fn test_bit(&mut self, size: u8, value: ExprId, bit: ExprId) -> ExprId;

    /// Pick one of two values of `size` bytes.
    fn select(&mut self, size: u8, cond: ExprId, if_true: ExprId, if_false: ExprId) -> ExprId;

    fn jump(&mut self, dest: ExprId) -> ExprId;

    fn call(&mut self, dest: ExprId) -> ExprId;

    fn ret(&mut self, dest: ExprId) -> ExprId;

    /// Label for a code address outside the current instruction.
    fn label_for_address(&mut self, address: u64) -> Label;

    /// Conditional branch to one of two labels.
    fn if_goto(&mut self, cond: ExprId, then_label: Label, else_label: Label) -> ExprId;

    /// Opaque operation with side effects the IR does not model.
    fn intrinsic(&mut self, name: &'static str, args: &[ExprId]) -> ExprId;

    fn system_call(&mut self) -> ExprId;

    fn nop(&mut self) -> ExprId;

    /// Marker for architecturally undefined behavior.
    fn undefined(&mut self) -> ExprId;

    /// Marker for an instruction without a translation.
    fn unimplemented(&mut self) -> ExprId;

    /// Append a node to the instruction's statement list.
    fn append(&mut self, expr: ExprId);

    // Convenience wrappers.

    fn add(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Add, size, left, right, flags)
    }

    fn sub(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Sub, size, left, right, flags)
    }

    fn mul(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Mul, size, left, right, flags)
    }

    fn and(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::And, size, left, right, flags)
    }

    fn or(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Or, size, left, right, flags)
    }

    fn xor(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Xor, size, left, right, flags)
    }

    fn shl(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Lsl, size, left, right, flags)
    }

    fn lshr(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Lsr, size, left, right, flags)
    }

    fn ashr(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Asr, size, left, right, flags)
    }

    fn rotl(&mut self, size: u8, left: ExprId, right: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.binary(BinaryOp::Rol, size, left, right, flags)
    }

    fn neg(&mut self, size: u8, operand: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.unary(UnaryOp::Neg, size, operand, flags)
    }

    fn not(&mut self, size: u8, operand: ExprId, flags: Option<A::FlagWrite>) -> ExprId {
        self.unary(UnaryOp::Not, size, operand, flags)
    }

    fn sign_extend(&mut self, size: u8, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::SignExtend, size, operand, None)
    }

    fn zero_extend(&mut self, size: u8, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::ZeroExtend, size, operand, None)
    }

    fn low_part(&mut self, size: u8, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::LowPart, size, operand, None)
    }
}
