//! Integer arithmetic.

use vle_ir::{BinaryOp, CarryOp, ExprId, IrBuilder};

use super::{LiftFn, W, imm, read, record, simm, write};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{Flag, FlagWrite, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    // Short forms.
    ("se_add", se_add),
    ("se_addi", se_addi),
    ("se_sub", se_sub),
    ("se_subf", se_subf),
    ("se_subi", se_subi),
    ("se_neg", se_neg),
    ("se_mullw", se_mullw),
    // Long forms.
    ("e_add16i", e_add16i),
    ("e_add2i.", e_add2i),
    ("e_add2is", e_add2is),
    ("e_addi", e_addi),
    ("e_addic", e_addic),
    ("e_subfic", e_subfic),
    ("e_mulli", e_mulli),
    ("e_mull2i", e_mull2i),
    // Book-E.
    ("add", add),
    ("addo", add),
    ("addc", addc),
    ("addco", addc),
    ("adde", adde),
    ("addeo", adde),
    ("addze", addze),
    ("addzeo", addze),
    ("addme", addme),
    ("addmeo", addme),
    ("subf", subf),
    ("subfo", subf),
    ("subfc", subfc),
    ("subfco", subfc),
    ("subfe", subfe),
    ("subfeo", subfe),
    ("subfze", subfze),
    ("subfzeo", subfze),
    ("subfme", subfme),
    ("subfmeo", subfme),
    ("neg", neg),
    ("nego", neg),
    ("mullw", mullw),
    ("mullwo", mullw),
    ("mulhw", mulhw),
    ("mulhwu", mulhwu),
    ("divw", divw),
    ("divwo", divw),
    ("divwu", divwu),
    ("divwuo", divwu),
];

/// XER tag for an XO-form result: carry and/or overflow.
fn xo_flags(inst: &Instruction, carry: bool) -> Option<FlagWrite> {
    match (carry, inst.suffix_set(Field::OE)) {
        (true, true) => Some(FlagWrite::Xer),
        (true, false) => Some(FlagWrite::XerCa),
        (false, true) => Some(FlagWrite::XerOvSo),
        (false, false) => None,
    }
}

fn se_add(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RX, sum, None)
}

fn se_addi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::OIMM)?;
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RX, sum, None)
}

fn se_sub(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    let diff = il.sub(W, a, b, None);
    write(inst, il, Field::RX, diff, None)
}

fn se_subf(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RY)?;
    let b = read(inst, il, Field::RX)?;
    let diff = il.sub(W, a, b, None);
    write(inst, il, Field::RX, diff, None)
}

fn se_subi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::OIMM)?;
    let diff = il.sub(W, a, b, None);
    write(inst, il, Field::RX, diff, record(inst))
}

fn se_neg(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let value = il.neg(W, a, None);
    write(inst, il, Field::RX, value, None)
}

fn se_mullw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = read(inst, il, Field::RY)?;
    let product = il.mul(W, a, b, None);
    write(inst, il, Field::RX, product, None)
}

fn e_add16i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = simm(inst, il, Field::SI)?;
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RT, sum, None)
}

fn e_add2i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = simm(inst, il, Field::SI)?;
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RA, sum, Some(FlagWrite::signed(0)))
}

fn e_add2is(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = il.constant(W, (inst.field(Field::SI)? as u64) << 16);
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RA, sum, None)
}

fn e_addi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::SCIMM)?;
    let sum = il.add(W, a, b, None);
    write(inst, il, Field::RT, sum, record(inst))
}

fn e_addic(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::SCIMM)?;
    let sum = il.add(W, a, b, Some(FlagWrite::XerCa));
    write(inst, il, Field::RT, sum, record(inst))
}

fn e_subfic(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = imm(inst, il, Field::SCIMM)?;
    let b = read(inst, il, Field::RA)?;
    let diff = il.sub(W, a, b, Some(FlagWrite::XerCa));
    write(inst, il, Field::RT, diff, record(inst))
}

fn e_mulli(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = imm(inst, il, Field::SCIMM)?;
    let product = il.mul(W, a, b, None);
    write(inst, il, Field::RT, product, None)
}

fn e_mull2i(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = simm(inst, il, Field::SI)?;
    let product = il.mul(W, a, b, None);
    write(inst, il, Field::RA, product, None)
}

/// `RT <- op(RA, RB)` with XO-form flag handling.
fn xo_binary(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    swap: bool,
    carry: bool,
) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let (l, r) = if swap { (b, a) } else { (a, b) };
    let value = il.binary(op, W, l, r, xo_flags(inst, carry));
    write(inst, il, Field::RT, value, record(inst))
}

/// `RT <- left + right + CA`.
fn xo_extended(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    left: ExprId,
    right: ExprId,
) -> Option<()> {
    let ca = il.flag(Flag::XerCa);
    let value = il.with_carry(CarryOp::AddCarry, W, left, right, ca, xo_flags(inst, true));
    write(inst, il, Field::RT, value, record(inst))
}

fn add(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::Add, false, false)
}

fn addc(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::Add, false, true)
}

fn adde(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    xo_extended(inst, il, a, b)
}

fn addze(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let zero = il.constant(W, 0);
    xo_extended(inst, il, a, zero)
}

fn addme(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let ones = il.constant(W, u64::MAX);
    xo_extended(inst, il, a, ones)
}

fn subf(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::Sub, true, false)
}

fn subfc(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::Sub, true, true)
}

fn subfe(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let ca = il.flag(Flag::XerCa);
    let value = il.with_carry(CarryOp::SubBorrow, W, b, a, ca, xo_flags(inst, true));
    write(inst, il, Field::RT, value, record(inst))
}

fn subfze(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let not_a = il.not(W, a, None);
    let zero = il.constant(W, 0);
    xo_extended(inst, il, not_a, zero)
}

fn subfme(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let not_a = il.not(W, a, None);
    let ones = il.constant(W, u64::MAX);
    xo_extended(inst, il, not_a, ones)
}

fn neg(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let value = il.neg(W, a, xo_flags(inst, false));
    write(inst, il, Field::RT, value, record(inst))
}

fn mullw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::Mul, false, false)
}

/// High word of the double-width product.
fn mul_high(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let product = il.binary(op, 2 * W, a, b, None);
    let shift = il.constant(1, 32);
    let high = il.lshr(2 * W, product, shift, None);
    let value = il.low_part(W, high);
    write(inst, il, Field::RT, value, record(inst))
}

fn mulhw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    mul_high(inst, il, BinaryOp::MulsDp)
}

fn mulhwu(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    mul_high(inst, il, BinaryOp::MuluDp)
}

fn divw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::DivS, false, false)
}

fn divwu(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    xo_binary(inst, il, BinaryOp::DivU, false, false)
}
