//! Compares and bit tests.
//!
//! A compare is a subtraction whose only effect is its flag write.

use vle_ir::{Condition, ExprId, IrBuilder};

use super::{LiftFn, W, cr_field, imm, read, simm};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{CrBit, Flag, FlagWrite, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    ("se_cmp", se_cmp),
    ("se_cmpl", se_cmpl),
    ("se_cmph", se_cmph),
    ("se_cmphl", se_cmphl),
    ("se_cmpi", se_cmpi),
    ("se_cmpli", se_cmpli),
    ("se_btsti", se_btsti),
    ("e_cmp16i", e_cmp16i),
    ("e_cmpl16i", e_cmpl16i),
    ("e_cmph16i", e_cmph16i),
    ("e_cmphl16i", e_cmphl16i),
    ("e_cmpi", e_cmpi),
    ("e_cmpli", e_cmpli),
    ("e_cmph", e_cmph),
    ("e_cmphl", e_cmphl),
    ("cmp", cmp),
    ("cmpl", cmpl),
];

fn emit(il: &mut dyn IrBuilder<Vle>, left: ExprId, right: ExprId, flags: FlagWrite) {
    let cmp = il.sub(W, left, right, Some(flags));
    il.append(cmp);
}

/// Low halfword of a GPR, widened.
fn half(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    field: Field,
    signed: bool,
) -> Option<ExprId> {
    let h = il.reg(2, inst.gpr(field)?);
    Some(if signed {
        il.sign_extend(W, h)
    } else {
        il.zero_extend(W, h)
    })
}

fn se_cmp(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    emit(il, a, b, FlagWrite::signed(0));
    Some(())
}

fn se_cmpl(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    emit(il, a, b, FlagWrite::unsigned(0));
    Some(())
}

fn se_cmph(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RX, true)?;
    let b = half(inst, il, Field::RY, true)?;
    emit(il, a, b, FlagWrite::signed(0));
    Some(())
}

fn se_cmphl(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RX, false)?;
    let b = half(inst, il, Field::RY, false)?;
    emit(il, a, b, FlagWrite::unsigned(0));
    Some(())
}

fn se_cmpi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::UI5)?;
    emit(il, a, b, FlagWrite::signed(0));
    Some(())
}

fn se_cmpli(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::OIMM)?;
    emit(il, a, b, FlagWrite::unsigned(0));
    Some(())
}

/// `cr0.gt` gets the tested bit, `cr0.eq` its complement, `cr0.lt` is
/// cleared.
fn se_btsti(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let bit = il.constant(W, 31 - inst.field(Field::UI5)? as u64);
    let set = il.test_bit(W, a, bit);
    let zero = il.constant(1, 0);
    let clear = il.compare(Condition::Eq, 1, set, zero);
    for (flag, value) in [(CrBit::Lt, zero), (CrBit::Gt, set), (CrBit::Eq, clear)] {
        let write = il.set_flag(Flag::cr(0, flag), value);
        il.append(write);
    }
    Some(())
}

fn e_cmp16i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = simm(inst, il, Field::SI)?;
    emit(il, a, b, FlagWrite::signed(0));
    Some(())
}

fn e_cmpl16i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::UI)?;
    emit(il, a, b, FlagWrite::unsigned(0));
    Some(())
}

fn e_cmph16i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RA, true)?;
    let b = simm(inst, il, Field::SI)?;
    emit(il, a, b, FlagWrite::signed(0));
    Some(())
}

fn e_cmphl16i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RA, false)?;
    let b = imm(inst, il, Field::UI)?;
    emit(il, a, b, FlagWrite::unsigned(0));
    Some(())
}

fn e_cmpi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::SCIMM)?;
    emit(il, a, b, FlagWrite::signed(cr_field(inst, Field::BF32)?));
    Some(())
}

fn e_cmpli(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::SCIMM)?;
    emit(il, a, b, FlagWrite::unsigned(cr_field(inst, Field::BF32)?));
    Some(())
}

fn e_cmph(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RA, true)?;
    let b = half(inst, il, Field::RB, true)?;
    emit(il, a, b, FlagWrite::signed(cr_field(inst, Field::BF)?));
    Some(())
}

fn e_cmphl(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = half(inst, il, Field::RA, false)?;
    let b = half(inst, il, Field::RB, false)?;
    emit(il, a, b, FlagWrite::unsigned(cr_field(inst, Field::BF)?));
    Some(())
}

fn cmp(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    emit(il, a, b, FlagWrite::signed(cr_field(inst, Field::BF)?));
    Some(())
}

fn cmpl(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    emit(il, a, b, FlagWrite::unsigned(cr_field(inst, Field::BF)?));
    Some(())
}
