//! Logical operations, moves, immediates, extensions, count leading zeros,
//! and integer select.

use vle_ir::{BinaryOp, IrBuilder, UnaryOp};

use super::{LiftFn, W, imm, read, read_or_zero, record, write};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{Flag, FlagWrite, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    // Short forms.
    ("se_and", |i, il| short_rr(i, il, BinaryOp::And, false)),
    ("se_andc", |i, il| short_rr(i, il, BinaryOp::And, true)),
    ("se_or", |i, il| short_rr(i, il, BinaryOp::Or, false)),
    ("se_not", se_not),
    ("se_andi", se_andi),
    ("se_bmaski", se_bmaski),
    ("se_bclri", se_bclri),
    ("se_bgeni", se_bgeni),
    ("se_bseti", se_bseti),
    ("se_li", se_li),
    ("se_mr", |i, il| short_move(i, il, Field::RY, Field::RX)),
    ("se_mfar", |i, il| short_move(i, il, Field::ARY, Field::RX)),
    ("se_mtar", |i, il| short_move(i, il, Field::RY, Field::ARX)),
    ("se_extzb", |i, il| short_extend(i, il, 1, UnaryOp::ZeroExtend)),
    ("se_extsb", |i, il| short_extend(i, il, 1, UnaryOp::SignExtend)),
    ("se_extzh", |i, il| short_extend(i, il, 2, UnaryOp::ZeroExtend)),
    ("se_extsh", |i, il| short_extend(i, il, 2, UnaryOp::SignExtend)),
    // Long forms.
    ("e_andi", |i, il| scaled(i, il, BinaryOp::And)),
    ("e_ori", |i, il| scaled(i, il, BinaryOp::Or)),
    ("e_xori", |i, il| scaled(i, il, BinaryOp::Xor)),
    ("e_and2i.", |i, il| two_operand(i, il, BinaryOp::And, 0, true)),
    ("e_and2is.", |i, il| two_operand(i, il, BinaryOp::And, 16, true)),
    ("e_or2i", |i, il| two_operand(i, il, BinaryOp::Or, 0, false)),
    ("e_or2is", |i, il| two_operand(i, il, BinaryOp::Or, 16, false)),
    ("e_li", e_li),
    ("e_lis", e_lis),
    // Book-E.
    ("and", |i, il| x_logical(i, il, BinaryOp::And, false, false)),
    ("andc", |i, il| x_logical(i, il, BinaryOp::And, true, false)),
    ("or", |i, il| x_logical(i, il, BinaryOp::Or, false, false)),
    ("orc", |i, il| x_logical(i, il, BinaryOp::Or, true, false)),
    ("xor", |i, il| x_logical(i, il, BinaryOp::Xor, false, false)),
    ("nand", |i, il| x_logical(i, il, BinaryOp::And, false, true)),
    ("nor", |i, il| x_logical(i, il, BinaryOp::Or, false, true)),
    ("eqv", |i, il| x_logical(i, il, BinaryOp::Xor, false, true)),
    ("extsb", |i, il| x_extend(i, il, 1)),
    ("extsh", |i, il| x_extend(i, il, 2)),
    ("cntlzw", cntlzw),
    ("isel", isel),
];

/// `RX <- RX op [not] RY`.
fn short_rr(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    complement: bool,
) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let mut b = read(inst, il, Field::RY)?;
    if complement {
        b = il.not(W, b, None);
    }
    let value = il.binary(op, W, a, b, None);
    write(inst, il, Field::RX, value, record(inst))
}

fn se_not(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let value = il.not(W, a, None);
    write(inst, il, Field::RX, value, None)
}

fn se_andi(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let b = imm(inst, il, Field::UI5)?;
    let value = il.and(W, a, b, None);
    write(inst, il, Field::RX, value, None)
}

/// Word with only big-endian bit `UI5` set.
fn bit_mask(inst: &Instruction) -> Option<u64> {
    Some(1u64 << (31 - inst.field(Field::UI5)?))
}

fn se_bmaski(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let n = inst.field(Field::UI5)?;
    // Zero encodes a full mask.
    let mask = if n == 0 { 0xffff_ffff } else { (1u64 << n) - 1 };
    let value = il.constant(W, mask);
    write(inst, il, Field::RX, value, None)
}

fn se_bclri(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let mask = il.constant(W, !bit_mask(inst)?);
    let value = il.and(W, a, mask, None);
    write(inst, il, Field::RX, value, None)
}

fn se_bgeni(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let value = il.constant(W, bit_mask(inst)?);
    write(inst, il, Field::RX, value, None)
}

fn se_bseti(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RX)?;
    let mask = il.constant(W, bit_mask(inst)?);
    let value = il.or(W, a, mask, None);
    write(inst, il, Field::RX, value, None)
}

fn se_li(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let value = imm(inst, il, Field::UI7)?;
    write(inst, il, Field::RX, value, None)
}

fn short_move(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, from: Field, to: Field) -> Option<()> {
    let value = read(inst, il, from)?;
    write(inst, il, to, value, None)
}

fn short_extend(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    size: u8,
    op: UnaryOp,
) -> Option<()> {
    let low = il.reg(size, inst.gpr(Field::RX)?);
    let value = il.unary(op, W, low, None);
    write(inst, il, Field::RX, value, None)
}

/// `RA <- RS op SCIMM`.
fn scaled(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, op: BinaryOp) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let b = imm(inst, il, Field::SCIMM)?;
    let value = il.binary(op, W, a, b, None);
    write(inst, il, Field::RA, value, record(inst))
}

/// `RT <- RT op (UI << shift)`.
fn two_operand(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    shift: u32,
    dot: bool,
) -> Option<()> {
    let a = read(inst, il, Field::RT)?;
    let b = il.constant(W, (inst.field(Field::UI)? as u64) << shift);
    let value = il.binary(op, W, a, b, None);
    write(inst, il, Field::RT, value, dot.then_some(FlagWrite::signed(0)))
}

fn e_li(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let value = il.constant(W, inst.field_signed(Field::LI20)? as u64);
    write(inst, il, Field::RT, value, None)
}

fn e_lis(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let value = il.constant(W, (inst.field(Field::UI)? as u64) << 16);
    write(inst, il, Field::RT, value, None)
}

/// `RA <- [not] (RS op [not] RB)`.
fn x_logical(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    op: BinaryOp,
    complement_b: bool,
    complement_result: bool,
) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let mut b = read(inst, il, Field::RB)?;
    if complement_b {
        b = il.not(W, b, None);
    }
    let mut value = il.binary(op, W, a, b, None);
    if complement_result {
        value = il.not(W, value, None);
    }
    write(inst, il, Field::RA, value, record(inst))
}

fn x_extend(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, size: u8) -> Option<()> {
    let low = il.reg(size, inst.gpr(Field::RS)?);
    let value = il.sign_extend(W, low);
    write(inst, il, Field::RA, value, record(inst))
}

fn cntlzw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let a = read(inst, il, Field::RS)?;
    let value = il.unary(UnaryOp::Clz, W, a, None);
    write(inst, il, Field::RA, value, record(inst))
}

/// `RT <- CR[BC] ? (RA|0) : RB`.
fn isel(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let bit = il.flag(Flag::cr_bit(u8::try_from(inst.field(Field::BC)?).ok()?));
    let a = read_or_zero(inst, il, Field::RA)?;
    let b = read(inst, il, Field::RB)?;
    let value = il.select(W, bit, a, b);
    write(inst, il, Field::RT, value, None)
}
