//! Special registers, traps, interrupt returns, and privileged or cache
//! operations.
//!
//! Operations with no data-flow effect the IR can express become named
//! intrinsics.

use vle_ir::{ExprId, IrBuilder};

use super::{LiftFn, W, aw, clear_low_bit, read, read_or_zero, write, write_reg, write_reg_sized};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{FlagWrite, Reg, Vle};

/// `MSR[EE]`.
const MSR_EE: u64 = 0x8000;

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    ("se_mflr", |i, il| move_from(i, il, Reg::Lr)),
    ("se_mtlr", |i, il| move_to(i, il, Field::RX, Reg::Lr)),
    ("se_mfctr", |i, il| move_from(i, il, Reg::Ctr)),
    ("se_mtctr", |i, il| move_to(i, il, Field::RX, Reg::Ctr)),
    ("mfspr", mfspr),
    ("mtspr", mtspr),
    ("mfpmr", mfpmr),
    ("mtpmr", mtpmr),
    ("mfmsr", |i, il| move_from_rt(i, il, Reg::Msr)),
    ("mtmsr", |i, il| move_to(i, il, Field::RS, Reg::Msr)),
    ("mfcr", |i, il| move_from_rt(i, il, Reg::Cr)),
    ("mtcrf", mtcrf),
    ("wrtee", wrtee),
    ("wrteei", wrteei),
    ("se_sc", se_sc),
    ("se_illegal", se_illegal),
    ("se_rfi", |i, il| interrupt_return(i, il, Reg::Srr0, Reg::Srr1)),
    ("se_rfci", |i, il| interrupt_return(i, il, Reg::Csrr0, Reg::Csrr1)),
    ("se_rfdi", |i, il| interrupt_return(i, il, Reg::Dsrr0, Reg::Dsrr1)),
    ("se_rfmci", |i, il| interrupt_return(i, il, Reg::Mcsrr0, Reg::Mcsrr1)),
    // Barriers, TLB management, and messaging.
    ("se_isync", |_, il| intrinsic(il, "isync", &[])),
    ("msync", |_, il| intrinsic(il, "msync", &[])),
    ("mbar", |_, il| intrinsic(il, "mbar", &[])),
    ("tlbsync", |_, il| intrinsic(il, "tlbsync", &[])),
    ("tlbre", |_, il| intrinsic(il, "tlbre", &[])),
    ("tlbwe", |_, il| intrinsic(il, "tlbwe", &[])),
    ("tlbivax", |i, il| cache_op(i, il, "tlbivax")),
    ("tlbsx", |i, il| cache_op(i, il, "tlbsx")),
    ("msgsnd", |i, il| with_rb(i, il, "msgsnd")),
    ("msgclr", |i, il| with_rb(i, il, "msgclr")),
    ("dci", |_, il| intrinsic(il, "dci", &[])),
    ("ici", |_, il| intrinsic(il, "ici", &[])),
    ("dnh", |_, il| intrinsic(il, "dnh", &[])),
    ("wait", |_, il| intrinsic(il, "wait", &[])),
    // Cache block operations on `(RA|0) + RB`.
    ("dcbst", |i, il| cache_op(i, il, "dcbst")),
    ("dcbf", |i, il| cache_op(i, il, "dcbf")),
    ("dcbtst", |i, il| cache_op(i, il, "dcbtst")),
    ("dcbt", |i, il| cache_op(i, il, "dcbt")),
    ("dcbi", |i, il| cache_op(i, il, "dcbi")),
    ("icbi", |i, il| cache_op(i, il, "icbi")),
    ("dcbz", |i, il| cache_op(i, il, "dcbz")),
];

fn move_from(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, reg: Reg) -> Option<()> {
    let value = il.reg(W, reg);
    write(inst, il, Field::RX, value, None)
}

fn move_from_rt(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, reg: Reg) -> Option<()> {
    let value = il.reg(W, reg);
    write(inst, il, Field::RT, value, None)
}

fn move_to(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, from: Field, reg: Reg) -> Option<()> {
    let value = read(inst, il, from)?;
    write_reg(il, reg, value, None);
    Some(())
}

fn spr(inst: &Instruction) -> Option<Reg> {
    Some(Reg::from_spr(u16::try_from(inst.field(Field::SPR)?).ok()?))
}

fn pmr(inst: &Instruction) -> Option<Reg> {
    Some(Reg::Pmr(u16::try_from(inst.field(Field::PMRN)?).ok()?))
}

fn mfspr(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    move_from_rt(inst, il, spr(inst)?)
}

fn mtspr(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    move_to(inst, il, Field::RS, spr(inst)?)
}

fn mfpmr(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    move_from_rt(inst, il, pmr(inst)?)
}

fn mtpmr(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    move_to(inst, il, Field::RS, pmr(inst)?)
}

/// One statement per selected field, each loading that field's nibble of
/// `RS` into the CR.
fn mtcrf(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let fxm = inst.field(Field::FXM)?;
    for field in 0..8u8 {
        if fxm & (0x80 >> field) == 0 {
            continue;
        }
        let rs = read(inst, il, Field::RS)?;
        let zero = il.constant(W, 0);
        let load = il.or(W, rs, zero, Some(FlagWrite::Mtcr(field)));
        il.append(load);
    }
    Some(())
}

/// `MSR <- (MSR & !EE) | value`.
fn set_external_enable(il: &mut dyn IrBuilder<Vle>, value: ExprId) {
    let msr = il.reg(W, Reg::Msr);
    let keep = il.constant(W, !MSR_EE & 0xffff_ffff);
    let kept = il.and(W, msr, keep, None);
    let merged = il.or(W, kept, value, None);
    write_reg(il, Reg::Msr, merged, None);
}

fn wrtee(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let rs = read(inst, il, Field::RS)?;
    let ee = il.constant(W, MSR_EE);
    let bit = il.and(W, rs, ee, None);
    set_external_enable(il, bit);
    Some(())
}

fn wrteei(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let bit = if inst.field(Field::E)? == 0 { 0 } else { MSR_EE };
    let bit = il.constant(W, bit);
    set_external_enable(il, bit);
    Some(())
}

/// Save the machine state and enter the system call handler.
fn se_sc(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let msr = il.reg(W, Reg::Msr);
    write_reg(il, Reg::Srr1, msr, None);
    let next = il.constant(aw(inst), inst.next_address());
    write_reg_sized(il, aw(inst), Reg::Srr0, next, None);
    let call = il.system_call();
    il.append(call);
    Some(())
}

fn se_illegal(_: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let undefined = il.undefined();
    il.append(undefined);
    Some(())
}

/// `MSR <- save1; return to save0`.
fn interrupt_return(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    save0: Reg,
    save1: Reg,
) -> Option<()> {
    let msr = il.reg(W, save1);
    write_reg(il, Reg::Msr, msr, None);
    let dest = il.reg(aw(inst), save0);
    let dest = clear_low_bit(il, aw(inst), dest);
    let ret = il.ret(dest);
    il.append(ret);
    Some(())
}

fn intrinsic(il: &mut dyn IrBuilder<Vle>, name: &'static str, args: &[ExprId]) -> Option<()> {
    let call = il.intrinsic(name, args);
    il.append(call);
    Some(())
}

fn cache_op(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, name: &'static str) -> Option<()> {
    let base = read_or_zero(inst, il, Field::RA)?;
    let index = read(inst, il, Field::RB)?;
    let ea = il.add(W, base, index, None);
    intrinsic(il, name, &[ea])
}

fn with_rb(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, name: &'static str) -> Option<()> {
    let rb = read(inst, il, Field::RB)?;
    intrinsic(il, name, &[rb])
}
