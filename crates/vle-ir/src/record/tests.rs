use std::fmt;

use super::*;
use crate::Terminator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Toy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ToyReg(u8);

impl fmt::Display for ToyReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl Arch for Toy {
    type Reg = ToyReg;
    type Flag = ToyReg;
    type FlagWrite = ToyReg;

    const NAME: &'static str = "toy";
    const REG_BYTES: u8 = 4;
}

#[test]
fn test_constant_masked_to_size() {
    let mut il = IrRecorder::<Toy>::new(0, 2);
    let c = il.constant(1, 0x1ff);
    assert_eq!(il.get(c).as_const(), Some(0xff));
}

#[test]
fn test_add_folds_constants() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.constant(4, 0xffff_fff0);
    let b = il.constant(4, 0x20);
    let sum = il.add(4, a, b, None);
    assert_eq!(il.get(sum).as_const(), Some(0x10));
}

#[test]
fn test_add_with_flags_not_folded() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.constant(4, 1);
    let b = il.constant(4, 2);
    let sum = il.add(4, a, b, Some(ToyReg(0)));
    assert!(matches!(
        il.get(sum),
        Expr::Binary {
            op: BinaryOp::Add,
            flags: Some(_),
            ..
        }
    ));
}

#[test]
fn test_add_register_not_folded() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.reg(4, ToyReg(3));
    let b = il.constant(4, 2);
    let sum = il.add(4, a, b, None);
    assert!(matches!(il.get(sum), Expr::Binary { .. }));
}

#[test]
fn test_sign_extend_uses_operand_size() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let byte = il.constant(1, 0x80);
    let wide = il.sign_extend(4, byte);
    assert_eq!(il.get(wide).as_const(), Some(0xffff_ff80));
    let zx = il.zero_extend(4, byte);
    assert_eq!(il.get(zx).as_const(), Some(0x80));
}

#[test]
fn test_shift_past_width_folds_to_zero() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.constant(4, 1);
    let b = il.constant(4, 40);
    let shifted = il.shl(4, a, b, None);
    assert_eq!(il.get(shifted).as_const(), Some(0));
}

#[test]
fn test_compare_folds() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.constant(4, 0xffff_ffff);
    let b = il.constant(4, 0);
    let lt = il.compare(Condition::Slt, 4, a, b);
    assert_eq!(il.get(lt).as_const(), Some(1));
}

#[test]
fn test_labels_deduplicated() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let a = il.label_for_address(0x100);
    let b = il.label_for_address(0x104);
    let c = il.label_for_address(0x100);
    assert_eq!(a, c);
    assert_ne!(a, b);
}

#[test]
fn test_finish_records_roots_in_order() {
    let mut il = IrRecorder::<Toy>::new(0x1000, 2);
    let v = il.constant(4, 5);
    let w = il.set_reg(4, ToyReg(1), v, None);
    il.append(w);
    let n = il.nop();
    il.append(n);
    let ir = il.finish();
    assert_eq!(ir.roots().len(), 2);
    assert!(matches!(ir.get(ir.roots()[0]), Expr::SetReg { .. }));
    assert!(matches!(ir.terminator(), Terminator::Fall { next: 0x1002 }));
}

#[test]
fn test_select_folds_on_constant_condition() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let yes = il.reg(4, ToyReg(1));
    let no = il.reg(4, ToyReg(2));
    let cond = il.constant(1, 0);
    assert_eq!(il.select(4, cond, yes, no), no);
    let live = il.flag(ToyReg(0));
    let picked = il.select(4, live, yes, no);
    assert!(matches!(il.get(picked), Expr::Select { .. }));
}

#[test]
fn test_clz_folds() {
    let mut il = IrRecorder::<Toy>::new(0, 4);
    let zero = il.constant(4, 0);
    let n = il.unary(UnaryOp::Clz, 4, zero, None);
    assert_eq!(il.get(n).as_const(), Some(32));
    let one = il.constant(4, 0x0001_0000);
    let n = il.unary(UnaryOp::Clz, 4, one, None);
    assert_eq!(il.get(n).as_const(), Some(15));
}
