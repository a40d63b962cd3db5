use vle_ir::{BinaryOp, Expr, InstrIr, IrRecorder, Terminator};

use super::*;
use crate::category::Category;
use crate::decoder::Decoder;

fn lift_at(bytes: &[u8], address: u64) -> (bool, InstrIr<Vle>) {
    lift_with(Category::all(), bytes, address)
}

fn lift_with(categories: Category, bytes: &[u8], address: u64) -> (bool, InstrIr<Vle>) {
    let decoder = Decoder::new(categories).unwrap();
    let lifter = Lifter::new().unwrap();
    let inst = decoder.decode(bytes, address).unwrap();
    let mut il = IrRecorder::<Vle>::new(address, inst.length());
    let lifted = lifter.lift(&inst, &mut il);
    (lifted, il.finish())
}

fn lift(bytes: &[u8]) -> InstrIr<Vle> {
    lift_at(bytes, 0x1000).1
}

#[test]
fn test_table_builds() {
    let lifter = Lifter::new().unwrap();
    assert!(lifter.is_registered("se_add"));
    assert!(lifter.is_registered("e_lmvgprw"));
    assert!(!lifter.is_registered("tw"));
    let names = lifter.mnemonics();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_duplicate_registration_rejected() {
    fn nothing(_: &Instruction, _: &mut dyn IrBuilder<Vle>) -> Option<()> {
        Some(())
    }
    let a: &[(&str, LiftFn)] = &[("se_nop", nothing)];
    let b: &[(&str, LiftFn)] = &[("se_nop", nothing)];
    assert_eq!(
        Lifter::from_groups(&[a, b]).unwrap_err(),
        BuildError::DuplicateLifter("se_nop")
    );
}

#[test]
fn test_unregistered_marks_unimplemented() {
    // tw 0, r0, r0
    let (lifted, ir) = lift_at(&[0x7C, 0x00, 0x00, 0x08], 0);
    assert!(!lifted);
    assert!(ir.is_unimplemented());
    assert_eq!(ir.terminator(), Terminator::Unimplemented);
}

#[test]
fn test_branch_terminators() {
    // se_b +8
    assert_eq!(lift(&[0xE8, 0x04]).terminator(), Terminator::Jump { target: Some(0x1008) });
    // se_bl +8
    assert_eq!(
        lift(&[0xE9, 0x04]).terminator(),
        Terminator::Call {
            target: Some(0x1008),
            next: 0x1002
        }
    );
    // se_bne +0
    let Terminator::Branch { taken, fall } = lift(&[0xE2, 0x00]).terminator() else {
        panic!("se_bne is not a conditional branch");
    };
    assert_eq!(fall - taken, 2);
    assert_eq!(lift(&[0x00, 0x04]).terminator(), Terminator::Return);
    assert_eq!(lift(&[0x00, 0x06]).terminator(), Terminator::Jump { target: None });
    assert_eq!(
        lift(&[0x00, 0x02]).terminator(),
        Terminator::SystemCall { next: 0x1002 }
    );
    assert_eq!(lift(&[0x00, 0x00]).terminator(), Terminator::Undefined);
}

#[test]
fn test_branch_targets_keep_address_width() {
    // se_b +8, se_bl +8 above 4 GiB
    let (_, ir) = lift_with(Category::X64, &[0xE8, 0x04], 0x1_0000_0000);
    assert_eq!(ir.terminator(), Terminator::Jump { target: Some(0x1_0000_0008) });
    let (_, ir) = lift_with(Category::X64, &[0xE9, 0x04], 0x1_0000_0000);
    assert_eq!(
        ir.terminator(),
        Terminator::Call {
            target: Some(0x1_0000_0008),
            next: 0x1_0000_0002
        }
    );
    let Some(Expr::SetReg { reg: Reg::Lr, size, value, .. }) = ir.statements().next() else {
        panic!("se_bl does not write lr first");
    };
    assert_eq!(*size, 8);
    assert!(matches!(ir.get(*value), Expr::Const { value: 0x1_0000_0002, .. }));

    // se_bne +0
    let (_, ir) = lift_with(Category::X64, &[0xE2, 0x00], 0x1_0000_0000);
    assert_eq!(
        ir.terminator(),
        Terminator::Branch {
            taken: 0x1_0000_0000,
            fall: 0x1_0000_0002
        }
    );

    // 32-bit: se_b -2 from zero wraps
    let (_, ir) = lift_with(Category::empty(), &[0xE8, 0xFF], 0);
    assert_eq!(ir.terminator(), Terminator::Jump { target: Some(0xFFFF_FFFE) });
}

#[test]
fn test_branch_and_link_latches_old_link() {
    // se_blrl
    let ir = lift(&[0x00, 0x05]);
    let first = ir.statements().next().unwrap();
    assert!(matches!(first, Expr::SetReg { reg: Reg::Temp(0), .. }));
    assert_eq!(ir.terminator(), Terminator::Call { target: None, next: 0x1002 });
}

#[test]
fn test_plain_instruction_falls_through() {
    // se_add r3, r4
    let ir = lift(&[0x04, 0x43]);
    assert_eq!(ir.terminator(), Terminator::Fall { next: 0x1002 });
    assert!(matches!(
        ir.statements().next(),
        Some(Expr::SetReg { reg: Reg::Gpr(3), .. })
    ));
}

#[test]
fn test_compare_tags_cr0() {
    // se_cmp r3, r4
    let ir = lift(&[0x0C, 0x43]);
    let stmts: Vec<_> = ir.statements().collect();
    assert_eq!(stmts.len(), 1);
    assert!(matches!(
        stmts[0],
        Expr::Binary {
            op: BinaryOp::Sub,
            flags: Some(FlagWrite::Cr { field: 0, .. }),
            ..
        }
    ));
}

#[test]
fn test_load_multiple_overlap_is_undefined() {
    // e_lmw r28, 0(r30)
    let ir = lift(&[0x1B, 0x9E, 0x08, 0x00]);
    let stmts: Vec<_> = ir.statements().collect();
    assert_eq!(stmts.len(), 1);
    assert!(matches!(stmts[0], Expr::Undefined));

    // e_lmw r28, 0(r1)
    let ir = lift(&[0x1B, 0x81, 0x08, 0x00]);
    let writes = ir
        .statements()
        .filter(|e| matches!(e, Expr::SetReg { reg: Reg::Gpr(28..=31), .. }))
        .count();
    assert_eq!(writes, 4);
}

#[test]
fn test_load_update_reuses_address() {
    // e_lwzu r3, 4(r1)
    let ir = lift(&[0x18, 0x61, 0x02, 0x04]);
    let stmts: Vec<_> = ir.statements().collect();
    assert_eq!(stmts.len(), 2);
    let Expr::SetReg { reg: Reg::Gpr(3), value: loaded, .. } = stmts[0] else {
        panic!("e_lwzu does not write rt first");
    };
    let Expr::Load { addr, .. } = ir.get(*loaded) else {
        panic!("rt is not loaded from memory");
    };
    let Expr::SetReg { reg: Reg::Gpr(1), value: updated, .. } = stmts[1] else {
        panic!("e_lwzu does not update ra");
    };
    assert_eq!(addr, updated);

    // lwzux r3, r1, r4
    let ir = lift(&[0x7C, 0x61, 0x20, 0x6E]);
    let stmts: Vec<_> = ir.statements().collect();
    let (Expr::SetReg { value: loaded, .. }, Expr::SetReg { value: updated, .. }) =
        (stmts[0], stmts[1])
    else {
        panic!("lwzux writes two registers");
    };
    assert!(matches!(ir.get(*loaded), Expr::Load { addr, .. } if addr == updated));
}

#[test]
fn test_isel_selects() {
    // isel r3, r4, r5, 2
    let ir = lift(&[0x7C, 0x64, 0x28, 0x9E]);
    let Some(Expr::SetReg { reg, value, .. }) = ir.statements().next() else {
        panic!("isel wrote nothing");
    };
    assert_eq!(*reg, Reg::Gpr(3));
    assert!(matches!(ir.get(*value), Expr::Select { .. }));
}

#[test]
fn test_mtcrf_per_field() {
    // mtcrf 0x80, r3
    let ir = lift(&[0x7C, 0x68, 0x01, 0x20]);
    let tags: Vec<_> = ir
        .statements()
        .filter_map(|e| match e {
            Expr::Binary { flags, .. } => *flags,
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec![FlagWrite::Mtcr(0)]);

    // mtcr r3
    let ir = lift(&[0x7C, 0x6F, 0xF1, 0x20]);
    assert_eq!(ir.statements().count(), 8);
}

#[test]
fn test_every_registered_mnemonic_is_decodable() {
    let decoder = Decoder::new(Category::all()).unwrap();
    let lifter = Lifter::new().unwrap();
    let decodable: rustc_hash::FxHashSet<_> = decoder
        .trie()
        .leaves()
        .iter()
        .map(|d| d.mnemonic)
        .collect();
    for name in lifter.mnemonics() {
        assert!(decodable.contains(name), "{name} has no encoding");
    }
}
