//! Shifts and rotates.

use vle_ir::{BinaryOp, Condition, ExprId, IrBuilder};

use super::{LiftFn, W, imm, read, record, write};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{FlagWrite, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    // Short forms.
    ("se_slw", |i, il| short_by_register(i, il, BinaryOp::Lsl)),
    ("se_srw", |i, il| short_by_register(i, il, BinaryOp::Lsr)),
    ("se_sraw", |i, il| short_by_register(i, il, BinaryOp::Asr)),
    ("se_slwi", |i, il| short_by_immediate(i, il, BinaryOp::Lsl)),
    ("se_srwi", |i, il| short_by_immediate(i, il, BinaryOp::Lsr)),
    ("se_srawi", |i, il| short_by_immediate(i, il, BinaryOp::Asr)),
    // Long forms.
    ("e_slwi", |i, il| by_immediate(i, il, BinaryOp::Lsl)),
    ("e_srwi", |i, il| by_immediate(i, il, BinaryOp::Lsr)),
    ("e_rlwi", |i, il| by_immediate(i, il, BinaryOp::Rol)),
    ("e_rlw", e_rlw),
    ("e_rlwinm", e_rlwinm),
    ("e_rlwimi", e_rlwimi),
    // Book-E.
    ("slw", |i, il| by_register(i, il, BinaryOp::Lsl)),
    ("srw", |i, il| by_register(i, il, BinaryOp::Lsr)),
    ("sraw", |i, il| by_register(i, il, BinaryOp::Asr)),
    ("srawi", |i, il| by_immediate(i, il, BinaryOp::Asr)),
];

/// Rotate mask with ones from big-endian bit `mb` through `me`, wrapping
/// when `mb > me`.
#[must_use]
pub const fn gen_mask(mb: u32, me: u32) -> u32 {
    let begin = u32::MAX >> (mb & 31);
    let end = u32::MAX << (31 - (me & 31));
    if mb <= me { begin & end } else { begin | end }
}

/// Algebraic right shifts report the carry.
fn shift_flags(op: BinaryOp) -> Option<FlagWrite> {
    (op == BinaryOp::Asr).then_some(FlagWrite::XerCa)
}

/// Shift by the low six bits of a register. Amounts of 32 or more clear the
/// result, or fill it with the sign for algebraic shifts.
fn shift_by_register(
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    value: ExprId,
    amount: ExprId,
) -> ExprId {
    let mask = il.constant(W, 0x3f);
    let amount = il.and(W, amount, mask, None);
    let shifted = il.binary(op, W, value, amount, shift_flags(op));
    let limit = il.constant(W, 32);
    let wide = il.compare(Condition::Uge, W, amount, limit);
    let saturated = if op == BinaryOp::Asr {
        let sign = il.constant(W, 31);
        il.ashr(W, value, sign, None)
    } else {
        il.constant(W, 0)
    };
    il.select(W, wide, saturated, shifted)
}

fn short_by_register(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    let value = shift_by_register(il, op, a, b);
    write(inst, il, Field::RX, value, None)
}

fn short_by_immediate(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::UI5)?;
    let value = il.binary(op, W, a, b, shift_flags(op));
    write(inst, il, Field::RX, value, None)
}

/// `RA <- RS op SH`.
fn by_immediate(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let b = imm(inst, il, Field::SH)?;
    let value = il.binary(op, W, a, b, shift_flags(op));
    write(inst, il, Field::RA, value, record(inst))
}

/// `RA <- RS op RB`.
fn by_register(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let b = read(inst, il, Field::RB)?;
    let value = shift_by_register(il, op, a, b);
    write(inst, il, Field::RA, value, record(inst))
}

fn e_rlw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let b = read(inst, il, Field::RB)?;
    let mask = il.constant(W, 0x1f);
    let amount = il.and(W, b, mask, None);
    let value = il.rotl(W, a, amount, None);
    write(inst, il, Field::RA, value, record(inst))
}

/// `rotl(RS, SH)` and its mask.
fn rotated(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<(ExprId, u32)> {
    let a = read(inst, il, Field::RS)?;
    let sh = imm(inst, il, Field::SH)?;
    let mask = gen_mask(inst.field_u32(Field::MB)?, inst.field_u32(Field::ME)?);
    Some((il.rotl(W, a, sh, None), mask))
}

fn e_rlwinm(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let (rot, mask) = rotated(inst, il)?;
    let mask = il.constant(W, u64::from(mask));
    let value = il.and(W, rot, mask, None);
    write(inst, il, Field::RA, value, None)
}

/// Insert the rotated bits under the mask, keeping `RA` elsewhere.
fn e_rlwimi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let (rot, mask) = rotated(inst, il)?;
    let inserted_mask = il.constant(W, u64::from(mask));
    let inserted = il.and(W, rot, inserted_mask, None);
    let old = read(inst, il, Field::RA)?;
    let kept_mask = il.constant(W, u64::from(!mask));
    let kept = il.and(W, old, kept_mask, None);
    let value = il.or(W, inserted, kept, None);
    write(inst, il, Field::RA, value, None)
}

#[cfg(test)]
mod tests {
    use super::gen_mask;

    #[test]
    fn test_gen_mask() {
        assert_eq!(gen_mask(0, 31), 0xffff_ffff);
        assert_eq!(gen_mask(16, 31), 0x0000_ffff);
        assert_eq!(gen_mask(0, 0), 0x8000_0000);
        assert_eq!(gen_mask(31, 31), 0x0000_0001);
        // Wrapping.
        assert_eq!(gen_mask(28, 3), 0xf000_000f);
    }
}
