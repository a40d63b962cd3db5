//! Loads and stores: displacement, update, indexed, byte-reversed, and
//! multiple-register forms.

use vle_ir::{ExprId, IrBuilder, UnaryOp};

use super::{LiftFn, W, read, read_or_zero, write, write_reg};
use crate::field::Field;
use crate::instruction::Instruction;
use crate::regs::{FlagWrite, Reg, Vle};

pub(super) const LIFTS: &[(&str, LiftFn)] = &[
    // Short forms.
    ("se_lbz", |i, il| load_sd4(i, il, 1)),
    ("se_lhz", |i, il| load_sd4(i, il, 2)),
    ("se_lwz", |i, il| load_sd4(i, il, 4)),
    ("se_stb", |i, il| store_sd4(i, il, 1)),
    ("se_sth", |i, il| store_sd4(i, il, 2)),
    ("se_stw", |i, il| store_sd4(i, il, 4)),
    // D form.
    ("e_lbz", |i, il| load_d(i, il, Access::zero(1))),
    ("e_lhz", |i, il| load_d(i, il, Access::zero(2))),
    ("e_lwz", |i, il| load_d(i, il, Access::zero(4))),
    ("e_lha", |i, il| load_d(i, il, Access::signed(2))),
    ("e_stb", |i, il| store_d(i, il, 1)),
    ("e_sth", |i, il| store_d(i, il, 2)),
    ("e_stw", |i, il| store_d(i, il, 4)),
    // D8 update form.
    ("e_lbzu", |i, il| load_update(i, il, Access::zero(1))),
    ("e_lhzu", |i, il| load_update(i, il, Access::zero(2))),
    ("e_lwzu", |i, il| load_update(i, il, Access::zero(4))),
    ("e_lhau", |i, il| load_update(i, il, Access::signed(2))),
    ("e_stbu", |i, il| store_update(i, il, 1)),
    ("e_sthu", |i, il| store_update(i, il, 2)),
    ("e_stwu", |i, il| store_update(i, il, 4)),
    // X form.
    ("lbzx", |i, il| load_x(i, il, Access::zero(1), false)),
    ("lhzx", |i, il| load_x(i, il, Access::zero(2), false)),
    ("lwzx", |i, il| load_x(i, il, Access::zero(4), false)),
    ("lhax", |i, il| load_x(i, il, Access::signed(2), false)),
    ("lbzux", |i, il| load_x(i, il, Access::zero(1), true)),
    ("lhzux", |i, il| load_x(i, il, Access::zero(2), true)),
    ("lwzux", |i, il| load_x(i, il, Access::zero(4), true)),
    ("lhaux", |i, il| load_x(i, il, Access::signed(2), true)),
    ("lhbrx", |i, il| load_x(i, il, Access::reversed(2), false)),
    ("lwbrx", |i, il| load_x(i, il, Access::reversed(4), false)),
    ("stbx", |i, il| store_x(i, il, 1, false, false)),
    ("sthx", |i, il| store_x(i, il, 2, false, false)),
    ("stwx", |i, il| store_x(i, il, 4, false, false)),
    ("stbux", |i, il| store_x(i, il, 1, true, false)),
    ("sthux", |i, il| store_x(i, il, 2, true, false)),
    ("stwux", |i, il| store_x(i, il, 4, true, false)),
    ("sthbrx", |i, il| store_x(i, il, 2, false, true)),
    ("stwbrx", |i, il| store_x(i, il, 4, false, true)),
    // Multiple.
    ("e_lmw", e_lmw),
    ("e_stmw", e_stmw),
    ("e_lmvgprw", |i, il| load_words(i, il, &VOLATILE_GPRS)),
    ("e_lmvsprw", |i, il| load_words(i, il, &VOLATILE_SPRS)),
    ("e_lmvsrrw", |i, il| load_words(i, il, &[Reg::Srr0, Reg::Srr1])),
    ("e_lmvcsrrw", |i, il| load_words(i, il, &[Reg::Csrr0, Reg::Csrr1])),
    ("e_lmvdsrrw", |i, il| load_words(i, il, &[Reg::Dsrr0, Reg::Dsrr1])),
    ("e_lmvmcsrrw", |i, il| load_words(i, il, &[Reg::Mcsrr0, Reg::Mcsrr1])),
    ("e_stmvgprw", |i, il| store_words(i, il, &VOLATILE_GPRS)),
    ("e_stmvsprw", |i, il| store_words(i, il, &VOLATILE_SPRS)),
    ("e_stmvsrrw", |i, il| store_words(i, il, &[Reg::Srr0, Reg::Srr1])),
    ("e_stmvcsrrw", |i, il| store_words(i, il, &[Reg::Csrr0, Reg::Csrr1])),
    ("e_stmvdsrrw", |i, il| store_words(i, il, &[Reg::Dsrr0, Reg::Dsrr1])),
    ("e_stmvmcsrrw", |i, il| store_words(i, il, &[Reg::Mcsrr0, Reg::Mcsrr1])),
];

/// `r0`, `r3`..`r12`.
const VOLATILE_GPRS: [Reg; 11] = [
    Reg::Gpr(0),
    Reg::Gpr(3),
    Reg::Gpr(4),
    Reg::Gpr(5),
    Reg::Gpr(6),
    Reg::Gpr(7),
    Reg::Gpr(8),
    Reg::Gpr(9),
    Reg::Gpr(10),
    Reg::Gpr(11),
    Reg::Gpr(12),
];

const VOLATILE_SPRS: [Reg; 4] = [Reg::Cr, Reg::Lr, Reg::Ctr, Reg::Xer];

/// Width and extension of a load.
#[derive(Clone, Copy)]
struct Access {
    size: u8,
    extend: UnaryOp,
    reversed: bool,
}

impl Access {
    const fn zero(size: u8) -> Self {
        Self {
            size,
            extend: UnaryOp::ZeroExtend,
            reversed: false,
        }
    }

    const fn signed(size: u8) -> Self {
        Self {
            size,
            extend: UnaryOp::SignExtend,
            reversed: false,
        }
    }

    const fn reversed(size: u8) -> Self {
        Self {
            size,
            extend: UnaryOp::ZeroExtend,
            reversed: true,
        }
    }

    fn load(self, il: &mut dyn IrBuilder<Vle>, ea: ExprId) -> ExprId {
        let mut value = il.load(self.size, ea);
        if self.reversed {
            value = il.unary(UnaryOp::ByteSwap, self.size, value, None);
        }
        if self.size < W {
            value = il.unary(self.extend, W, value, None);
        }
        value
    }
}

/// Store the low `size` bytes of `value`, optionally byte-reversed.
fn emit_store(
    il: &mut dyn IrBuilder<Vle>,
    size: u8,
    ea: ExprId,
    value: ExprId,
    reversed: bool,
) {
    let mut value = if size < W { il.low_part(size, value) } else { value };
    if reversed {
        value = il.unary(UnaryOp::ByteSwap, size, value, None);
    }
    let store = il.store(size, ea, value);
    il.append(store);
}

/// `base + disp`.
fn offset(il: &mut dyn IrBuilder<Vle>, base: ExprId, disp: i64) -> ExprId {
    let disp = il.constant(W, disp as u64);
    il.add(W, base, disp, None)
}

/// `GPR(RX) + SD4X`.
fn sd4_address(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<ExprId> {
    let base = read(inst, il, Field::RX)?;
    Some(offset(il, base, inst.field(Field::SD4X)?))
}

fn load_sd4(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, size: u8) -> Option<()> {
    let ea = sd4_address(inst, il)?;
    let value = Access::zero(size).load(il, ea);
    write(inst, il, Field::RZ, value, None)
}

fn store_sd4(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, size: u8) -> Option<()> {
    let ea = sd4_address(inst, il)?;
    let value = read(inst, il, Field::RZ)?;
    emit_store(il, size, ea, value, false);
    Some(())
}

/// `(RA|0) + EXTS(D)`.
fn d_address(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<ExprId> {
    let base = read_or_zero(inst, il, Field::RA)?;
    Some(offset(il, base, inst.field_signed(Field::D)?))
}

fn load_d(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, access: Access) -> Option<()> {
    let ea = d_address(inst, il)?;
    let value = access.load(il, ea);
    write(inst, il, Field::RT, value, None)
}

fn store_d(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, size: u8) -> Option<()> {
    let ea = d_address(inst, il)?;
    let value = read(inst, il, Field::RS)?;
    emit_store(il, size, ea, value, false);
    Some(())
}

/// `RA + EXTS(D8)`, with `RA` written back after the access.
fn update_address(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<ExprId> {
    let base = read(inst, il, Field::RA)?;
    Some(offset(il, base, inst.field_signed(Field::D8)?))
}

fn load_update(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, access: Access) -> Option<()> {
    let ea = update_address(inst, il)?;
    let value = access.load(il, ea);
    write(inst, il, Field::RT, value, None)?;
    write(inst, il, Field::RA, ea, None)
}

fn store_update(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, size: u8) -> Option<()> {
    let ea = update_address(inst, il)?;
    let value = read(inst, il, Field::RS)?;
    emit_store(il, size, ea, value, false);
    write(inst, il, Field::RA, ea, None)
}

/// `(RA|0) + RB`, or `RA + RB` for update forms.
fn x_address(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, update: bool) -> Option<ExprId> {
    let base = if update {
        read(inst, il, Field::RA)?
    } else {
        read_or_zero(inst, il, Field::RA)?
    };
    let index = read(inst, il, Field::RB)?;
    Some(il.add(W, base, index, None))
}

fn load_x(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    access: Access,
    update: bool,
) -> Option<()> {
    let ea = x_address(inst, il, update)?;
    let value = access.load(il, ea);
    write(inst, il, Field::RT, value, None)?;
    if update {
        write(inst, il, Field::RA, ea, None)?;
    }
    Some(())
}

fn store_x(
    inst: &Instruction,
    il: &mut dyn IrBuilder<Vle>,
    size: u8,
    update: bool,
    reversed: bool,
) -> Option<()> {
    let ea = x_address(inst, il, update)?;
    let value = read(inst, il, Field::RS)?;
    emit_store(il, size, ea, value, reversed);
    if update {
        write(inst, il, Field::RA, ea, None)?;
    }
    Some(())
}

/// `RT`..`r31`.
fn register_range(inst: &Instruction, field: Field) -> Option<Vec<Reg>> {
    let Reg::Gpr(first) = inst.gpr(field)? else {
        return None;
    };
    Some((first..32).map(Reg::Gpr).collect())
}

/// Load `regs` from consecutive words. Loading over the base register is
/// undefined.
fn load_words(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, regs: &[Reg]) -> Option<()> {
    let base = inst.gpr(Field::RA)?;
    if regs.contains(&base) {
        let marker = il.undefined();
        il.append(marker);
        return Some(());
    }
    let start = inst.field_signed(Field::D8)?;
    for (i, &reg) in regs.iter().enumerate() {
        let base = read_or_zero(inst, il, Field::RA)?;
        let ea = offset(il, base, start + 4 * i as i64);
        let value = il.load(W, ea);
        // Loading CR replaces every field.
        let flags = (reg == Reg::Cr).then_some(FlagWrite::InvalidateAll);
        write_reg(il, reg, value, flags);
    }
    Some(())
}

fn store_words(inst: &Instruction, il: &mut dyn IrBuilder<Vle>, regs: &[Reg]) -> Option<()> {
    let start = inst.field_signed(Field::D8)?;
    for (i, &reg) in regs.iter().enumerate() {
        let base = read_or_zero(inst, il, Field::RA)?;
        let ea = offset(il, base, start + 4 * i as i64);
        let value = il.reg(W, reg);
        let store = il.store(W, ea, value);
        il.append(store);
    }
    Some(())
}

fn e_lmw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    load_words(inst, il, &register_range(inst, Field::RT)?)
}

fn e_stmw(inst: &Instruction, il: &mut dyn IrBuilder<Vle>) -> Option<()> {
    store_words(inst, il, &register_range(inst, Field::RS)?)
}
