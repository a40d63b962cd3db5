//! Concrete decode, render, and lift scenarios.

use vle_ir::Terminator;
use vle_isa::{BranchCondition, BranchKind, Category, Decoder, Field, Session};

fn session() -> Session {
    Session::new(Category::empty()).unwrap()
}

#[test]
fn test_zero_halfword_is_illegal() {
    let s = session();
    let inst = s.decode(&[0x00, 0x00], 0).unwrap();
    assert_eq!(inst.mnemonic(), "se_illegal");
    assert_eq!(inst.length(), 2);
    assert_eq!(s.lift_to_ir(&inst).terminator(), Terminator::Undefined);
}

#[test]
fn test_short_load_immediate() {
    let inst = session().decode(&[0x4A, 0x01], 0).unwrap();
    assert_eq!(inst.mnemonic(), "se_li");
    assert_eq!(inst.field(Field::RX), Some(1));
    assert_eq!(inst.field(Field::UI7), Some(0x20));
    assert_eq!(inst.to_string(), "se_li r1, 0x20");
}

#[test]
fn test_add16i_signed_immediate() {
    // e_add16i r1, r1, -16
    let inst = session().decode(&[0x1C, 0x21, 0xFF, 0xF0], 0).unwrap();
    assert_eq!(inst.mnemonic(), "e_add16i");
    assert_eq!(inst.length(), 4);
    assert_eq!(inst.field_signed(Field::SI), Some(-16));
    assert_eq!(inst.field(Field::SI), Some(0xFFF0));
}

#[test]
fn test_zero_word_ignores_unrelated_extensions() {
    let bytes = [0u8; 4];
    let plain = Decoder::new(Category::empty()).unwrap();
    let extended = Decoder::new(Category::SP | Category::V | Category::E_PM).unwrap();
    let a = plain.decode(&bytes, 0x100).unwrap();
    let b = extended.decode(&bytes, 0x100).unwrap();
    assert_eq!(a.mnemonic(), b.mnemonic());
    assert_eq!(a.length(), b.length());
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_short_branch_not_equal() {
    let s = session();
    let inst = s.decode(&[0xE2, 0x00], 0x2000).unwrap();
    assert_eq!(inst.mnemonic(), "se_bc");
    assert_eq!(inst.display_mnemonic(), "se_bne");
    assert_eq!(inst.branch_condition(), Some(BranchCondition::Ne));
    assert!(inst.is_conditional_branch());

    let info = s.info(&[0xE2, 0x00], 0x2000);
    assert_eq!(
        info.branches,
        vec![BranchKind::True(0x2000), BranchKind::False(0x2002)]
    );
    let Terminator::Branch { taken, fall } = s.lift_to_ir(&inst).terminator() else {
        panic!("se_bne did not lift to a conditional branch");
    };
    assert_eq!(fall - taken, 2);
}

#[test]
fn test_long_sequence_walk() {
    // e_stwu r1, -16(r1); se_mflr r0; e_stw r0, 20(r1); se_blr
    let code = [
        0x18, 0x21, 0x06, 0xF0, //
        0x00, 0x80, //
        0x54, 0x01, 0x00, 0x14, //
        0x00, 0x04,
    ];
    let s = session();
    let mut address = 0x1000u64;
    let mut offset = 0;
    let mut texts = Vec::new();
    while offset < code.len() {
        let inst = s.decode(&code[offset..], address).unwrap();
        texts.push(inst.to_string());
        offset += usize::from(inst.length());
        address = inst.next_address();
    }
    assert_eq!(
        texts,
        [
            "e_stwu r1, -16(r1)",
            "se_mflr r0",
            "e_stw r0, 20(r1)",
            "se_blr",
        ]
    );
}
