//! Standard category extensions.

use super::{DecodeExtension, under_opcode31};
use crate::category::Category;
use crate::trie::{Node, level};

/// Embedded platform control (`E`).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedPlatform;

impl DecodeExtension for EmbeddedPlatform {
    fn category(&self) -> Category {
        Category::E
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![
            (131, inst!(E, "wrtee", X, [RS])),
            (163, inst!(E, "wrteei", X, [E])),
            (512, inst!(E, "mcrxr", X, [BF])),
            (566, inst!(E, "tlbsync", X, [])),
            (786, inst!(E, "tlbivax", X, [RA, RB])),
            (854, inst!(E, "mbar", X, [MO])),
            (914, inst!(E, "tlbsx", X, [RA, RB])),
            (946, inst!(E, "tlbre", X, [])),
            (978, inst!(E, "tlbwe", X, [])),
        ])
    }
}

/// Performance monitor registers (`E.PM`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PerformanceMonitor;

impl DecodeExtension for PerformanceMonitor {
    fn category(&self) -> Category {
        Category::E_PM
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![
            (334, inst!(E_PM, "mfpmr", XFX, [RT, PMRN])),
            (462, inst!(E_PM, "mtpmr", XFX, [PMRN, RS])),
        ])
    }
}

/// Processor control messages (`E.PC`).
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessorControl;

impl DecodeExtension for ProcessorControl {
    fn category(&self) -> Category {
        Category::E_PC
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![
            (206, inst!(E_PC, "msgsnd", X, [RB])),
            (238, inst!(E_PC, "msgclr", X, [RB])),
        ])
    }
}

/// Cache initialization (`E.CI`).
#[derive(Clone, Copy, Debug, Default)]
pub struct CacheInit;

impl DecodeExtension for CacheInit {
    fn category(&self) -> Category {
        Category::E_CI
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![
            (454, inst!(E_CI, "dci", X, [CT])),
            (966, inst!(E_CI, "ici", X, [CT])),
        ])
    }
}

/// Enhanced debug (`E.ED`).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedDebug;

impl DecodeExtension for EmbeddedDebug {
    fn category(&self) -> Category {
        Category::E_ED
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![(198, inst!(E_ED, "dnh", X, []))])
    }
}

/// `wait` (`WT`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Wait;

impl DecodeExtension for Wait {
    fn category(&self) -> Category {
        Category::WT
    }

    fn trie(&self) -> Node {
        under_opcode31(vec![(62, inst!(WT, "wait", X, []))])
    }
}

/// Load/store multiple volatile (`LMV`).
///
/// Shares the D8 space of `e_lbzu` and friends; `RT` selects the register
/// group.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolatileMultiple;

impl DecodeExtension for VolatileMultiple {
    fn category(&self) -> Category {
        Category::LMV
    }

    fn trie(&self) -> Node {
        let loads = level(
            6,
            11,
            [
                (0, inst!(LMV, "e_lmvgprw", D8, [RA, D8])),
                (1, inst!(LMV, "e_lmvsprw", D8, [RA, D8])),
                (4, inst!(LMV, "e_lmvsrrw", D8, [RA, D8])),
                (5, inst!(LMV, "e_lmvcsrrw", D8, [RA, D8])),
                (6, inst!(LMV, "e_lmvdsrrw", D8, [RA, D8])),
                (7, inst!(LMV, "e_lmvmcsrrw", D8, [RA, D8])),
            ],
        );
        let stores = level(
            6,
            11,
            [
                (0, inst!(LMV, "e_stmvgprw", D8, [RA, D8])),
                (1, inst!(LMV, "e_stmvsprw", D8, [RA, D8])),
                (4, inst!(LMV, "e_stmvsrrw", D8, [RA, D8])),
                (5, inst!(LMV, "e_stmvcsrrw", D8, [RA, D8])),
                (6, inst!(LMV, "e_stmvdsrrw", D8, [RA, D8])),
                (7, inst!(LMV, "e_stmvmcsrrw", D8, [RA, D8])),
            ],
        );
        level(
            0,
            4,
            [(
                0x1,
                level(
                    4,
                    6,
                    [(0b10, level(16, 20, [(0x1, level(20, 24, [(0, loads), (1, stores)]))]))],
                ),
            )],
        )
    }
}

/// Embedded scalar single-precision floating point (`SP`).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedFloat;

impl DecodeExtension for EmbeddedFloat {
    fn category(&self) -> Category {
        Category::SP
    }

    fn trie(&self) -> Node {
        let entries = [
            (0x2C0, inst!(SP, "efsadd", EVX, [RT, RA, RB])),
            (0x2C1, inst!(SP, "efssub", EVX, [RT, RA, RB])),
            (0x2C2, inst!(SP, "efsmadd", EVX, [RT, RA, RB])),
            (0x2C3, inst!(SP, "efsmsub", EVX, [RT, RA, RB])),
            (0x2C4, inst!(SP, "efsabs", EVX, [RT, RA])),
            (0x2C5, inst!(SP, "efsnabs", EVX, [RT, RA])),
            (0x2C6, inst!(SP, "efsneg", EVX, [RT, RA])),
            (0x2C8, inst!(SP, "efsmul", EVX, [RT, RA, RB])),
            (0x2C9, inst!(SP, "efsdiv", EVX, [RT, RA, RB])),
            (0x2CA, inst!(SP, "efsnmadd", EVX, [RT, RA, RB])),
            (0x2CB, inst!(SP, "efsnmsub", EVX, [RT, RA, RB])),
            (0x2CC, inst!(SP, "efscmpgt", EVX, [BF, RA, RB])),
            (0x2CD, inst!(SP, "efscmplt", EVX, [BF, RA, RB])),
            (0x2CE, inst!(SP, "efscmpeq", EVX, [BF, RA, RB])),
            (0x2D0, inst!(SP, "efscfui", EVX, [RT, RB])),
            (0x2D1, inst!(SP, "efscfsi", EVX, [RT, RB])),
            (0x2D2, inst!(SP, "efscfuf", EVX, [RT, RB])),
            (0x2D3, inst!(SP, "efscfsf", EVX, [RT, RB])),
            (0x2D4, inst!(SP, "efsctui", EVX, [RT, RB])),
            (0x2D5, inst!(SP, "efsctsi", EVX, [RT, RB])),
            (0x2D6, inst!(SP, "efsctuf", EVX, [RT, RB])),
            (0x2D7, inst!(SP, "efsctsf", EVX, [RT, RB])),
            (0x2D8, inst!(SP, "efsctuiz", EVX, [RT, RB])),
            (0x2DA, inst!(SP, "efsctsiz", EVX, [RT, RB])),
            (0x2DC, inst!(SP, "efststgt", EVX, [BF, RA, RB])),
            (0x2DD, inst!(SP, "efststlt", EVX, [BF, RA, RB])),
            (0x2DE, inst!(SP, "efststeq", EVX, [BF, RA, RB])),
        ];
        // Primary opcode 4.
        level(0, 4, [(0x1, level(4, 6, [(0b00, level(21, 32, entries))]))])
    }
}

/// Vector (`V`): no VLE encodings are decoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vector;

impl DecodeExtension for Vector {
    fn category(&self) -> Category {
        Category::V
    }

    fn trie(&self) -> Node {
        level(0, 4, [])
    }
}
