//! Condition register logical and move instructions.

use vle_ir::{BinaryOp, IrBuilder};

use super::{LiftFn, cr_field};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{CrBit, Flag, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    ("e_crand", e_crand),
    ("e_crandc", e_crandc),
    ("e_creqv", e_creqv),
    ("e_crnand", e_crnand),
    ("e_crnor", e_crnor),
    ("e_cror", e_cror),
    ("e_crorc", e_crorc),
    ("e_crxor", e_crxor),
    ("e_mcrf", e_mcrf),
    ("mcrxr", mcrxr),
];

fn cr_bit(inst: &Instruction, field: Field) -> Option<Flag> {
    Some(Flag::cr_bit(u8::try_from(inst.field(field)?).ok()?))
}

/// `BT <- [not] (BA op [not] BB)`.
fn cr_logical(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    complement_b: bool,
    complement_result: bool,
) -> Option<()> {
    let bt = cr_bit(inst, Field::BT)?;
    let a = il.flag(cr_bit(inst, Field::BA)?);
    let mut b = il.flag(cr_bit(inst, Field::BB)?);
    if complement_b {
        b = il.not(1, b, None);
    }
    let mut value = il.binary(op, 1, a, b, None);
    if complement_result {
        value = il.not(1, value, None);
    }
    let write = il.set_flag(bt, value);
    il.append(write);
    Some(())
}

fn e_crand(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::And, false, false)
}

fn e_crandc(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::And, true, false)
}

fn e_creqv(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::Xor, false, true)
}

fn e_crnand(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::And, false, true)
}

fn e_crnor(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::Or, false, true)
}

fn e_cror(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::Or, false, false)
}

fn e_crorc(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::Or, true, false)
}

fn e_crxor(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    cr_logical(inst, il, BinaryOp::Xor, false, false)
}

fn e_mcrf(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let bf = cr_field(inst, Field::BF)?;
    let bfa = cr_field(inst, Field::BFA)?;
    for bit in CrBit::ALL {
        let value = il.flag(Flag::cr(bfa, bit));
        let write = il.set_flag(Flag::cr(bf, bit), value);
        il.append(write);
    }
    Some(())
}

/// `CR[BF] <- SO || OV || CA || 0`, then clear the three XER bits.
fn mcrxr(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let bf = cr_field(inst, Field::BF)?;
    let sources = [Flag::XerSo, Flag::XerOv, Flag::XerCa];
    for (bit, src) in CrBit::ALL.into_iter().zip(sources) {
        let value = il.flag(src);
        let write = il.set_flag(Flag::cr(bf, bit), value);
        il.append(write);
    }
    let zero = il.constant(1, 0);
    let write = il.set_flag(Flag::cr(bf, CrBit::So), zero);
    il.append(write);
    for src in sources {
        let write = il.set_flag(src, zero);
        il.append(write);
    }
    Some(())
}
