//! Recording IR builder.
//!
//! [`IrRecorder`] stores every node in an arena and folds operations whose
//! operands are constants, the same way the expression factories do in a
//! statement-level IR. The result is an [`InstrIr`] for inspection and display.

use crate::arch::{Arch, mask_to, sign_extend_bytes};
use crate::builder::IrBuilder;
use crate::expr::{BinaryOp, CarryOp, Condition, Expr, ExprId, Label, UnaryOp};
use crate::instr::InstrIr;

/// Builder that records emitted IR for one instruction.
#[derive(Clone, Debug)]
pub struct IrRecorder<A: Arch> {
    address: u64,
    length: u8,
    exprs: Vec<Expr<A>>,
    labels: Vec<u64>,
    roots: Vec<ExprId>,
}

impl<A: Arch> IrRecorder<A> {
    /// Create a recorder for the instruction at `address`.
    #[must_use]
    pub const fn new(address: u64, length: u8) -> Self {
        Self {
            address,
            length,
            exprs: Vec::new(),
            labels: Vec::new(),
            roots: Vec::new(),
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

    /// Finish recording.
    #[must_use]
    pub fn finish(self) -> InstrIr<A> {
        InstrIr::new(self.address, self.length, self.exprs, self.labels, self.roots)
    }

    fn push(&mut self, expr: Expr<A>) -> ExprId {
        let id = ExprId::new(u32::try_from(self.exprs.len()).unwrap_or(u32::MAX));
        self.exprs.push(expr);
        id
    }

    fn const_of(&self, id: ExprId) -> Option<u64> {
        self.get(id).as_const()
    }

    /// Result size of a value-producing node, if it has one.
    fn size_of(&self, id: ExprId) -> Option<u8> {
        match self.get(id) {
            Expr::Const { size, .. }
            | Expr::Reg { size, .. }
            | Expr::Load { size, .. }
            | Expr::Unary { size, .. }
            | Expr::Binary { size, .. }
            | Expr::Carry { size, .. }
            | Expr::Select { size, .. } => Some(*size),
            Expr::Flag(_) | Expr::Compare { .. } | Expr::TestBit { .. } => Some(1),
            _ => None,
        }
    }

    fn fold_unary(&self, op: UnaryOp, size: u8, operand: ExprId) -> Option<u64> {
        let value = self.const_of(operand)?;
        let from = self.size_of(operand).unwrap_or(size);
        let folded = match op {
            UnaryOp::Neg => value.wrapping_neg(),
            UnaryOp::Not => !value,
            UnaryOp::SignExtend => sign_extend_bytes(mask_to(value, from), from),
            UnaryOp::ZeroExtend => mask_to(value, from),
            UnaryOp::LowPart => value,
            UnaryOp::Clz => {
                u64::from(mask_to(value, size).leading_zeros()) - (64 - u64::from(size) * 8)
            }
            _ => return None,
        };
        Some(mask_to(folded, size))
    }

    fn fold_binary(&self, op: BinaryOp, size: u8, left: ExprId, right: ExprId) -> Option<u64> {
        let l = mask_to(self.const_of(left)?, size);
        let r = mask_to(self.const_of(right)?, size);
        let bits = u64::from(size) * 8;
        let folded = match op {
            BinaryOp::Add => l.wrapping_add(r),
            BinaryOp::Sub => l.wrapping_sub(r),
            BinaryOp::Mul => l.wrapping_mul(r),
            BinaryOp::And => l & r,
            BinaryOp::Or => l | r,
            BinaryOp::Xor => l ^ r,
            BinaryOp::Lsl if r < bits => l << r,
            BinaryOp::Lsr if r < bits => l >> r,
            BinaryOp::Lsl | BinaryOp::Lsr => 0,
            _ => return None,
        };
        Some(mask_to(folded, size))
    }
}

impl<A: Arch> IrBuilder<A> for IrRecorder<A> {
    fn constant(&mut self, size: u8, value: u64) -> ExprId {
        self.push(Expr::Const {
            size,
            value: mask_to(value, size),
        })
    }

    fn reg(&mut self, size: u8, reg: A::Reg) -> ExprId {
        self.push(Expr::Reg { size, reg })
    }

    fn set_reg(
        &mut self,
        size: u8,
        reg: A::Reg,
        value: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId {
        self.push(Expr::SetReg {
            size,
            reg,
            value,
            flags,
        })
    }

    fn flag(&mut self, flag: A::Flag) -> ExprId {
        self.push(Expr::Flag(flag))
    }

    fn set_flag(&mut self, flag: A::Flag, value: ExprId) -> ExprId {
        self.push(Expr::SetFlag { flag, value })
    }

    fn load(&mut self, size: u8, addr: ExprId) -> ExprId {
        self.push(Expr::Load { size, addr })
    }

    fn store(&mut self, size: u8, addr: ExprId, value: ExprId) -> ExprId {
        self.push(Expr::Store { size, addr, value })
    }

    fn unary(
        &mut self,
        op: UnaryOp,
        size: u8,
        operand: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId {
        if flags.is_none()
            && let Some(value) = self.fold_unary(op, size, operand)
        {
            return self.constant(size, value);
        }
        self.push(Expr::Unary {
            op,
            size,
            operand,
            flags,
        })
    }

    fn binary(
        &mut self,
        op: BinaryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId {
        if flags.is_none()
            && let Some(value) = self.fold_binary(op, size, left, right)
        {
            return self.constant(size, value);
        }
        self.push(Expr::Binary {
            op,
            size,
            left,
            right,
            flags,
        })
    }

    fn with_carry(
        &mut self,
        op: CarryOp,
        size: u8,
        left: ExprId,
        right: ExprId,
        carry: ExprId,
        flags: Option<A::FlagWrite>,
    ) -> ExprId {
        self.push(Expr::Carry {
            op,
            size,
            left,
            right,
            carry,
            flags,
        })
    }

    fn compare(&mut self, cond: Condition, size: u8, left: ExprId, right: ExprId) -> ExprId {
        if let (Some(l), Some(r)) = (self.const_of(left), self.const_of(right))
            && let Some(result) = cond.eval(size, l, r)
        {
            return self.constant(1, u64::from(result));
        }
        self.push(Expr::Compare {
            cond,
            size,
            left,
            right,
        })
    }

    fn test_bit(&mut self, size: u8, value: ExprId, bit: ExprId) -> ExprId {
        self.push(Expr::TestBit { size, value, bit })
    }

    fn select(&mut self, size: u8, cond: ExprId, if_true: ExprId, if_false: ExprId) -> ExprId {
        if let Some(c) = self.const_of(cond) {
            return if c == 0 { if_false } else { if_true };
        }
        self.push(Expr::Select {
            size,
            cond,
            if_true,
            if_false,
        })
    }

    fn jump(&mut self, dest: ExprId) -> ExprId {
        self.push(Expr::Jump(dest))
    }

    fn call(&mut self, dest: ExprId) -> ExprId {
        self.push(Expr::Call(dest))
    }

    fn ret(&mut self, dest: ExprId) -> ExprId {
        self.push(Expr::Ret(dest))
    }

    fn label_for_address(&mut self, address: u64) -> Label {
        if let Some(pos) = self.labels.iter().position(|&a| a == address) {
            return Label::new(u32::try_from(pos).unwrap_or(u32::MAX));
        }
        self.labels.push(address);
        Label::new(u32::try_from(self.labels.len() - 1).unwrap_or(u32::MAX))
    }

    fn if_goto(&mut self, cond: ExprId, then_label: Label, else_label: Label) -> ExprId {
        self.push(Expr::If {
            cond,
            then_label,
            else_label,
        })
    }

    fn intrinsic(&mut self, name: &'static str, args: &[ExprId]) -> ExprId {
        self.push(Expr::Intrinsic {
            name,
            args: args.to_vec(),
        })
    }

    fn system_call(&mut self) -> ExprId {
        self.push(Expr::SystemCall)
    }

    fn nop(&mut self) -> ExprId {
        self.push(Expr::Nop)
    }

    fn undefined(&mut self) -> ExprId {
        self.push(Expr::Undefined)
    }

    fn unimplemented(&mut self) -> ExprId {
        self.push(Expr::Unimplemented)
    }

    fn append(&mut self, expr: ExprId) {
        self.roots.push(expr);
    }
}

#[cfg(test)]
mod tests;
