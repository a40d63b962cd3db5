//! Short (`se_*`) and long (`e_*`) VLE forms.

use crate::trie::{Node, level};

/// Base table with `opcode31` entries merged under primary opcode 31.
pub(super) fn table(opcode31: Vec<(u32, Node)>) -> Node {
    level(
        0,
        4,
        [
            (0x0, group0()),
            (0x1, group1()),
            (
                0x2,
                level(
                    0,
                    7,
                    [
                        (0b001_0000, inst!(VLE, "se_addi", OIM5, [RX, OIMM])),
                        (0b001_0001, inst!(VLE, "se_cmpli", OIM5, [RX, OIMM])),
                        (0b001_0010, inst!(VLE, "se_subi", OIM5, [RX, OIMM, Rc])),
                        (0b001_0011, inst!(VLE, "se_subi", OIM5, [RX, OIMM, Rc])),
                        (0b001_0101, inst!(VLE, "se_cmpi", IM5, [RX, UI5])),
                        (0b001_0110, inst!(VLE, "se_bmaski", IM5, [RX, UI5])),
                        (0b001_0111, inst!(VLE, "se_andi", IM5, [RX, UI5])),
                    ],
                ),
            ),
            (
                0x3,
                level(
                    0,
                    6,
                    [
                        (0b00_1100, inst!(VLE, "e_lbz", D, [RT, RA, D])),
                        (0b00_1101, inst!(VLE, "e_stb", D, [RS, RA, D])),
                        (0b00_1110, inst!(VLE, "e_lha", D, [RT, RA, D])),
                    ],
                ),
            ),
            (
                0x4,
                level(
                    4,
                    6,
                    [
                        (
                            0b00,
                            level(
                                6,
                                8,
                                [
                                    (0, inst!(VLE, "se_srw", RR, [RX, RY])),
                                    (1, inst!(VLE, "se_sraw", RR, [RX, RY])),
                                    (2, inst!(VLE, "se_slw", RR, [RX, RY])),
                                ],
                            ),
                        ),
                        (
                            0b01,
                            level(
                                6,
                                8,
                                [
                                    (0, inst!(VLE, "se_or", RR, [RX, RY])),
                                    (1, inst!(VLE, "se_andc", RR, [RX, RY])),
                                    (2, inst!(VLE, "se_and", RR, [RX, RY, Rc])),
                                    (3, inst!(VLE, "se_and", RR, [RX, RY, Rc])),
                                ],
                            ),
                        ),
                        // Bit 5 is the top bit of UI7.
                        (0b10, inst!(VLE, "se_li", IM7, [RX, UI7])),
                        (0b11, inst!(VLE, "se_li", IM7, [RX, UI7])),
                    ],
                ),
            ),
            (
                0x5,
                level(
                    0,
                    6,
                    [
                        (0b01_0100, inst!(VLE, "e_lwz", D, [RT, RA, D])),
                        (0b01_0101, inst!(VLE, "e_stw", D, [RS, RA, D])),
                        (0b01_0110, inst!(VLE, "e_lhz", D, [RT, RA, D])),
                        (0b01_0111, inst!(VLE, "e_sth", D, [RS, RA, D])),
                    ],
                ),
            ),
            (
                0x6,
                level(
                    0,
                    7,
                    [
                        (0b011_0000, inst!(VLE, "se_bclri", IM5, [RX, UI5])),
                        (0b011_0001, inst!(VLE, "se_bgeni", IM5, [RX, UI5])),
                        (0b011_0010, inst!(VLE, "se_bseti", IM5, [RX, UI5])),
                        (0b011_0011, inst!(VLE, "se_btsti", IM5, [RX, UI5])),
                        (0b011_0100, inst!(VLE, "se_srwi", IM5, [RX, UI5])),
                        (0b011_0101, inst!(VLE, "se_srawi", IM5, [RX, UI5])),
                        (0b011_0110, inst!(VLE, "se_slwi", IM5, [RX, UI5])),
                    ],
                ),
            ),
            (0x7, group7(opcode31)),
            (0x8, inst!(VLE, "se_lbz", SD4, [RZ, RX, SD4X])),
            (0x9, inst!(VLE, "se_stb", SD4, [RZ, RX, SD4X])),
            (0xA, inst!(VLE, "se_lhz", SD4, [RZ, RX, SD4X])),
            (0xB, inst!(VLE, "se_sth", SD4, [RZ, RX, SD4X])),
            (0xC, inst!(VLE, "se_lwz", SD4, [RZ, RX, SD4X])),
            (0xD, inst!(VLE, "se_stw", SD4, [RZ, RX, SD4X])),
            (
                0xE,
                level(
                    4,
                    5,
                    [
                        (0, inst!(VLE, "se_bc", BD8, [BI16, TARGET], conditional)),
                        (1, inst!(VLE, "se_b", BD8, [TARGET, LK], branch)),
                    ],
                ),
            ),
        ],
    )
}

fn group0() -> Node {
    level(
        4,
        8,
        [
            (
                0x0,
                level(
                    8,
                    12,
                    [
                        (
                            0x0,
                            level(
                                12,
                                16,
                                [
                                    (0x0, inst!(VLE, "se_illegal", C, [])),
                                    (0x1, inst!(VLE, "se_isync", C, [])),
                                    (0x2, inst!(VLE, "se_sc", C, [])),
                                    (0x4, inst!(VLE, "se_blr", C, [LK], branch)),
                                    (0x5, inst!(VLE, "se_blr", C, [LK], branch)),
                                    (0x6, inst!(VLE, "se_bctr", C, [LK], branch)),
                                    (0x7, inst!(VLE, "se_bctr", C, [LK], branch)),
                                    (0x8, inst!(VLE, "se_rfi", C, [])),
                                    (0x9, inst!(VLE, "se_rfci", C, [])),
                                    (0xA, inst!(VLE, "se_rfdi", C, [])),
                                    (0xB, inst!(VLE, "se_rfmci", C, [])),
                                ],
                            ),
                        ),
                        (0x2, inst!(VLE, "se_not", R, [RX])),
                        (0x3, inst!(VLE, "se_neg", R, [RX])),
                        (0x8, inst!(VLE, "se_mflr", R, [RX])),
                        (0x9, inst!(VLE, "se_mtlr", R, [RX])),
                        (0xA, inst!(VLE, "se_mfctr", R, [RX])),
                        (0xB, inst!(VLE, "se_mtctr", R, [RX])),
                        (0xC, inst!(VLE, "se_extzb", R, [RX])),
                        (0xD, inst!(VLE, "se_extsb", R, [RX])),
                        (0xE, inst!(VLE, "se_extzh", R, [RX])),
                        (0xF, inst!(VLE, "se_extsh", R, [RX])),
                    ],
                ),
            ),
            (0x1, inst!(VLE, "se_mr", RR, [RX, RY])),
            (0x2, inst!(VLE, "se_mtar", RR, [ARX, RY])),
            (0x3, inst!(VLE, "se_mfar", RR, [RX, ARY])),
            (0x4, inst!(VLE, "se_add", RR, [RX, RY])),
            (0x5, inst!(VLE, "se_mullw", RR, [RX, RY])),
            (0x6, inst!(VLE, "se_sub", RR, [RX, RY])),
            (0x7, inst!(VLE, "se_subf", RR, [RX, RY])),
            (0xC, inst!(VLE, "se_cmp", RR, [RX, RY])),
            (0xD, inst!(VLE, "se_cmpl", RR, [RX, RY])),
            (0xE, inst!(VLE, "se_cmph", RR, [RX, RY])),
            (0xF, inst!(VLE, "se_cmphl", RR, [RX, RY])),
        ],
    )
}

fn group1() -> Node {
    level(
        4,
        6,
        [
            (
                0b10,
                level(
                    16,
                    20,
                    [
                        (
                            0x0,
                            level(
                                20,
                                24,
                                [
                                    (0x0, inst!(VLE, "e_lbzu", D8, [RT, RA, D8])),
                                    (0x1, inst!(VLE, "e_lhzu", D8, [RT, RA, D8])),
                                    (0x2, inst!(VLE, "e_lwzu", D8, [RT, RA, D8])),
                                    (0x3, inst!(VLE, "e_lhau", D8, [RT, RA, D8])),
                                    (0x4, inst!(VLE, "e_stbu", D8, [RS, RA, D8])),
                                    (0x5, inst!(VLE, "e_sthu", D8, [RS, RA, D8])),
                                    (0x6, inst!(VLE, "e_stwu", D8, [RS, RA, D8])),
                                    (0x8, inst!(VLE, "e_lmw", D8, [RT, RA, D8])),
                                    (0x9, inst!(VLE, "e_stmw", D8, [RS, RA, D8])),
                                ],
                            ),
                        ),
                        (0x8, inst!(VLE, "e_addi", SCI8, [RT, RA, SCIMM, Rc])),
                        (0x9, inst!(VLE, "e_addic", SCI8, [RT, RA, SCIMM, Rc])),
                        (
                            0xA,
                            level(
                                20,
                                21,
                                [
                                    (0, inst!(VLE, "e_mulli", SCI8, [RT, RA, SCIMM])),
                                    (
                                        1,
                                        level(
                                            6,
                                            7,
                                            [
                                                (0, inst!(VLE, "e_cmpi", SCI8, [BF32, RA, SCIMM])),
                                                (1, inst!(VLE, "e_cmpli", SCI8, [BF32, RA, SCIMM])),
                                            ],
                                        ),
                                    ),
                                ],
                            ),
                        ),
                        (0xB, inst!(VLE, "e_subfic", SCI8, [RT, RA, SCIMM, Rc])),
                        (0xC, inst!(VLE, "e_andi", SCI8, [RA, RS, SCIMM, Rc])),
                        (0xD, inst!(VLE, "e_ori", SCI8, [RA, RS, SCIMM, Rc])),
                        (0xE, inst!(VLE, "e_xori", SCI8, [RA, RS, SCIMM, Rc])),
                    ],
                ),
            ),
            (0b11, inst!(VLE, "e_add16i", D, [RT, RA, SI])),
        ],
    )
}

fn group7(opcode31: Vec<(u32, Node)>) -> Node {
    level(
        0,
        6,
        [
            (
                0b01_1100,
                level(
                    16,
                    17,
                    [
                        (0, inst!(VLE, "e_li", LI20, [RT, LI20])),
                        (
                            1,
                            level(
                                17,
                                21,
                                [
                                    (0b0001, inst!(VLE, "e_add2i.", I16A, [RA, SI])),
                                    (0b0010, inst!(VLE, "e_add2is", I16A, [RA, SI])),
                                    (0b0011, inst!(VLE, "e_cmp16i", I16A, [RA, SI])),
                                    (0b0100, inst!(VLE, "e_mull2i", I16A, [RA, SI])),
                                    (0b0101, inst!(VLE, "e_cmpl16i", I16A, [RA, UI])),
                                    (0b0110, inst!(VLE, "e_cmph16i", I16A, [RA, SI])),
                                    (0b0111, inst!(VLE, "e_cmphl16i", I16A, [RA, UI])),
                                    (0b1000, inst!(VLE, "e_or2i", I16L, [RT, UI])),
                                    (0b1001, inst!(VLE, "e_and2i.", I16L, [RT, UI])),
                                    (0b1010, inst!(VLE, "e_or2is", I16L, [RT, UI])),
                                    (0b1100, inst!(VLE, "e_lis", I16L, [RT, UI])),
                                    (0b1101, inst!(VLE, "e_and2is.", I16L, [RT, UI])),
                                ],
                            ),
                        ),
                    ],
                ),
            ),
            (
                0b01_1101,
                level(
                    31,
                    32,
                    [
                        (0, inst!(VLE, "e_rlwimi", M, [RA, RS, SH, MB, ME])),
                        (1, inst!(VLE, "e_rlwinm", M, [RA, RS, SH, MB, ME])),
                    ],
                ),
            ),
            (
                0b01_1110,
                level(
                    6,
                    7,
                    [
                        (0, inst!(VLE, "e_b", BD24, [TARGET, LK], branch)),
                        (1, inst!(VLE, "e_bc", BD15, [BI32, TARGET, LK], conditional)),
                    ],
                ),
            ),
            (0b01_1111, level(21, 31, opcode31)),
        ],
    )
}

/// VLE entries in the opcode-31 space, keyed by the 10-bit extended opcode.
pub(super) fn opcode31() -> Vec<(u32, Node)> {
    vec![
        (16, inst!(VLE, "e_mcrf", XL, [BF, BFA])),
        (33, inst!(VLE, "e_crnor", XL, [BT, BA, BB])),
        (129, inst!(VLE, "e_crandc", XL, [BT, BA, BB])),
        (193, inst!(VLE, "e_crxor", XL, [BT, BA, BB])),
        (225, inst!(VLE, "e_crnand", XL, [BT, BA, BB])),
        (257, inst!(VLE, "e_crand", XL, [BT, BA, BB])),
        (289, inst!(VLE, "e_creqv", XL, [BT, BA, BB])),
        (417, inst!(VLE, "e_crorc", XL, [BT, BA, BB])),
        (449, inst!(VLE, "e_cror", XL, [BT, BA, BB])),
        (56, inst!(VLE, "e_slwi", X, [RA, RS, SH, Rc])),
        (280, inst!(VLE, "e_rlw", X, [RA, RS, RB, Rc])),
        (312, inst!(VLE, "e_rlwi", X, [RA, RS, SH, Rc])),
        (568, inst!(VLE, "e_srwi", X, [RA, RS, SH, Rc])),
        (14, inst!(VLE, "e_cmph", X, [BF, RA, RB])),
        (46, inst!(VLE, "e_cmphl", X, [BF, RA, RB])),
    ]
}
