//! IR lifting.
//!
//! Each group module contributes a `LIFTS` list of `(mnemonic, function)`
//! pairs; [`Lifter::new`] merges them into one table and rejects a mnemonic
//! registered twice. Lift functions are pure: everything they need comes from
//! the instruction, and everything they produce goes to the builder.
//!
//! A lift function returns `None` when a field it needs is missing; the
//! lifter then emits the "not translated" marker.

mod arith;
mod branch;
mod compare;
mod cond_reg;
mod efpu;
mod load_store;
mod logical;
mod shift;
mod sysreg;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};
use vle_ir::{ExprId, IrBuilder};

use crate::error::{BuildError, Result};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{FlagWrite, Reg, Vle};

/// Translation function for one mnemonic.
pub type LiftFn = fn(&Instruction, &mut dyn IrBuilder<Vle>) -> Option<()>;

/// Register width in bytes.
const W: u8 = 4;

/// Width of addresses and the registers holding them (`lr`, `ctr`, `srrN`).
const fn aw(inst: &Instruction) -> u8 {
    inst.addr_mode().bytes()
}

const GROUPS: &[&[(&str, LiftFn)]] = &[
    arith::LIFTS,
    branch::LIFTS,
    compare::LIFTS,
    cond_reg::LIFTS,
    efpu::LIFTS,
    load_store::LIFTS,
    logical::LIFTS,
    shift::LIFTS,
    sysreg::LIFTS,
];

/// Mnemonic-keyed lift table.
#[derive(Clone, Debug)]
pub struct Lifter {
    table: FxHashMap<&'static str, LiftFn>,
}

impl Lifter {
    /// Build the table from every group.
    pub fn new() -> Result<Self> {
        Self::from_groups(GROUPS)
    }

    fn from_groups(groups: &[&[(&'static str, LiftFn)]]) -> Result<Self> {
        let mut table = FxHashMap::default();
        for &(mnemonic, lift) in groups.iter().flat_map(|g| g.iter()) {
            if table.insert(mnemonic, lift).is_some() {
                return Err(BuildError::DuplicateLifter(mnemonic));
            }
        }
        debug!(mnemonics = table.len(), "lifter built");
        Ok(Self { table })
    }

    /// Check if `mnemonic` has a translation.
    #[must_use]
    pub fn is_registered(&self, mnemonic: &str) -> bool {
        self.table.contains_key(mnemonic)
    }

    /// Registered mnemonics, sorted.
    #[must_use]
    pub fn mnemonics(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.table.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Emit IR for `inst`. Returns `false` if the instruction was not
    /// translated.
    pub fn lift(&self, inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> bool {
        let lifted = self
            .table
            .get(inst.mnemonic())
            .and_then(|lift| lift(inst, il))
            .is_some();
        if !lifted {
            trace!(mnemonic = inst.mnemonic(), address = inst.address(), "not translated");
            let marker = il.unimplemented();
            il.append(marker);
        }
        lifted
    }
}

// Shared helpers for the group modules.

/// Read the GPR named by `field`.
fn read(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, field: Field) -> Option<ExprId> {
    Some(il.reg(W, inst.gpr(field)?))
}

/// Read `RA`, or zero when the field names `r0`.
fn read_or_zero(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, field: Field) -> Option<ExprId> {
    match inst.gpr(field)? {
        Reg::Gpr(0) => Some(il.constant(W, 0)),
        reg => Some(il.reg(W, reg)),
    }
}

/// Write the GPR named by `field` and append the write.
fn write(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    field: Field,
    value: ExprId,
    flags: Option<FlagWrite>,
) -> Option<()> {
    let set = il.set_reg(W, inst.gpr(field)?, value, flags);
    il.append(set);
    Some(())
}

/// Write a register and append the write.
fn write_reg(il: &mut dyn IrBuilder<Vle>, reg: Reg, value: ExprId, flags: Option<FlagWrite>) {
    write_reg_sized(il, W, reg, value, flags);
}

/// Write a register of `size` bytes and append the write.
fn write_reg_sized(
    il: &mut dyn IrBuilder<Vle>,
    size: u8,
    reg: Reg,
    value: ExprId,
    flags: Option<FlagWrite>,
) {
    let set = il.set_reg(size, reg, value, flags);
    il.append(set);
}

/// Unsigned field as a word constant.
fn imm(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, field: Field) -> Option<ExprId> {
    Some(il.constant(W, inst.field(field)? as u64))
}

/// Sign-extended field as a word constant.
fn simm(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, field: Field) -> Option<ExprId> {
    Some(il.constant(W, inst.field_signed(field)? as u64))
}

/// `cr0s` when the record bit is set.
fn record(inst: &Instruction) -> Option<FlagWrite> {
    inst.suffix_set(Field::Rc).then_some(FlagWrite::signed(0))
}

/// CR field number of a field operand.
fn cr_field(inst: &Instruction, field: Field) -> Option<u8> {
    u8::try_from(inst.field(field)?).ok()
}

/// Address with its low bit cleared.
fn clear_low_bit(il: &mut dyn IrBuilder<Vle>, size: u8, value: ExprId) -> ExprId {
    let mask = il.constant(size, !1);
    il.and(size, value, mask, None)
}

#[cfg(test)]
mod tests;
