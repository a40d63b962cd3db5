//! Branches.

use vle_ir::{Condition, ExprId, IrBuilder};

use super::{LiftFn, aw, clear_low_bit, write_reg_sized};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::mnemonic::BranchCondition;
use crate::regs::{CrBit, Flag, Reg, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    ("e_b", direct),
    ("se_b", direct),
    ("e_bc", conditional),
    ("se_bc", conditional),
    ("se_blr", to_link),
    ("se_bctr", to_count),
];

fn set_link(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) {
    let next = il.constant(aw(inst), inst.next_address());
    write_reg_sized(il, aw(inst), Reg::Lr, next, None);
}

fn direct(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let target = inst.target_address()?;
    let dest = il.constant(aw(inst), target);
    let branch = if inst.suffix_set(Field::LK) {
        set_link(inst, il);
        il.call(dest)
    } else {
        il.jump(dest)
    };
    il.append(branch);
    Some(())
}

/// Taken condition of a conditional branch. Counter forms decrement `ctr`
/// first.
fn condition(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    cond: BranchCondition,
) -> Option<ExprId> {
    if cond.is_counter() {
        let size = aw(inst);
        let ctr = il.reg(size, Reg::Ctr);
        let one = il.constant(size, 1);
        let dec = il.sub(size, ctr, one, None);
        write_reg_sized(il, size, Reg::Ctr, dec, None);
        let ctr = il.reg(size, Reg::Ctr);
        let zero = il.constant(size, 0);
        let test = if cond == BranchCondition::Dz {
            Condition::Eq
        } else {
            Condition::Ne
        };
        return Some(il.compare(test, size, ctr, zero));
    }
    let flag = match inst.field(Field::BI32) {
        Some(bi) => Flag::cr_bit(u8::try_from(bi).ok()?),
        None => Flag::cr(0, CrBit::from_index(u8::try_from(inst.field(Field::BI16)?).ok()?)),
    };
    let bit = il.flag(flag);
    if cond.taken_if_set() {
        Some(bit)
    } else {
        let zero = il.constant(1, 0);
        Some(il.compare(Condition::Eq, 1, bit, zero))
    }
}

fn conditional(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let target = inst.target_address()?;
    let cond = condition(inst, il, inst.branch_condition()?)?;
    if inst.suffix_set(Field::LK) {
        set_link(inst, il);
    }
    let taken = il.label_for_address(target);
    let fall = il.label_for_address(inst.next_address());
    let branch = il.if_goto(cond, taken, fall);
    il.append(branch);
    Some(())
}

fn to_link(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let size = aw(inst);
    let lr = il.reg(size, Reg::Lr);
    let dest = clear_low_bit(il, size, lr);
    if inst.suffix_set(Field::LK) {
        // Latch the old link before overwriting it.
        write_reg_sized(il, size, Reg::Temp(0), dest, None);
        set_link(inst, il);
        let dest = il.reg(size, Reg::Temp(0));
        let call = il.call(dest);
        il.append(call);
    } else {
        let ret = il.ret(dest);
        il.append(ret);
    }
    Some(())
}

fn to_count(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    let size = aw(inst);
    let ctr = il.reg(size, Reg::Ctr);
    let dest = clear_low_bit(il, size, ctr);
    let branch = if inst.suffix_set(Field::LK) {
        set_link(inst, il);
        il.call(dest)
    } else {
        il.jump(dest)
    };
    il.append(branch);
    Some(())
}
