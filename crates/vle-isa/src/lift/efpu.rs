//! Embedded single-precision floating point, operating on GPRs.

use vle_ir::{BinaryOp, IrBuilder, UnaryOp};

use super::{LiftFn, W, cr_field, read, write};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{FlagWrite, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    ("efsadd", |i, il| arith(i, il, BinaryOp::FloatAdd)),
    ("efssub", |i, il| arith(i, il, BinaryOp::FloatSub)),
    ("efsmul", |i, il| arith(i, il, BinaryOp::FloatMul)),
    ("efsdiv", |i, il| arith(i, il, BinaryOp::FloatDiv)),
    ("efsmadd", |i, il| multiply_add(i, il, BinaryOp::FloatAdd, false)),
    ("efsmsub", |i, il| multiply_add(i, il, BinaryOp::FloatSub, false)),
    ("efsnmadd", |i, il| multiply_add(i, il, BinaryOp::FloatAdd, true)),
    ("efsnmsub", |i, il| multiply_add(i, il, BinaryOp::FloatSub, true)),
    ("efsabs", |i, il| sign(i, il, &[UnaryOp::FloatAbs])),
    ("efsnabs", |i, il| sign(i, il, &[UnaryOp::FloatAbs, UnaryOp::FloatNeg])),
    ("efsneg", |i, il| sign(i, il, &[UnaryOp::FloatNeg])),
    ("efscmpgt", compare),
    ("efscmplt", compare),
    ("efscmpeq", compare),
    ("efststgt", compare),
    ("efststlt", compare),
    ("efststeq", compare),
    ("efscfsi", |i, il| convert(i, il, UnaryOp::IntToFloat)),
    ("efscfui", |i, il| convert(i, il, UnaryOp::UIntToFloat)),
    ("efsctsiz", |i, il| convert(i, il, UnaryOp::FloatToInt)),
    ("efsctuiz", |i, il| convert(i, il, UnaryOp::FloatToUInt)),
];

/// `RT <- RA op RB`.
fn arith(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let value = il.binary(op, W, a, b, None);
    write(inst, il, Field::RT, value, None)
}

/// `RT <- [-] ((RA * RB) op RT)`.
fn multiply_add(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    negate: bool,
) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let product = il.binary(BinaryOp::FloatMul, W, a, b, None);
    let acc = read(inst, il, Field::RT)?;
    let mut value = il.binary(op, W, product, acc, None);
    if negate {
        value = il.unary(UnaryOp::FloatNeg, W, value, None);
    }
    write(inst, il, Field::RT, value, None)
}

/// Sign manipulation: apply `ops` to `RA` in order.
fn sign(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, ops: &[UnaryOp]) -> Option<()> {
    let mut value = read(inst, il, Field::RA)?;
    for &op in ops {
        value = il.unary(op, W, value, None);
    }
    write(inst, il, Field::RT, value, None)
}

/// Compares and tests share one form: a float subtraction whose flag write
/// sets `CR[BF]`.
fn compare(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let flags = FlagWrite::float(cr_field(inst, Field::BF)?);
    let cmp = il.binary(BinaryOp::FloatSub, W, a, b, Some(flags));
    il.append(cmp);
    Some(())
}

fn convert(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: UnaryOp) -> Option<()> {
    let b = read(inst, il, Field::RB)?;
    let value = il.unary(op, W, b, None);
    write(inst, il, Field::RT, value, None)
}
