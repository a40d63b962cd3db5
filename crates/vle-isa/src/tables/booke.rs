//! Book-E integer instructions in the opcode-31 space (category `B`).
//!
//! Keys are the 10-bit extended opcode in bits 21..31. For XO-form
//! arithmetic the key includes `OE`, so overflow-enabled variants get their
//! own entries.

use crate::trie::Node;

pub(super) fn opcode31() -> Vec<(u32, Node)> {
    let mut entries = vec![
        (0, inst!(B, "cmp", X, [BF, L, RA, RB])),
        (32, inst!(B, "cmpl", X, [BF, L, RA, RB])),
        (4, inst!(B, "tw", X, [TO, RA, RB])),
        // Arithmetic.
        (8, inst!(B, "subfc", XO, [RT, RA, RB, OE, Rc])),
        (520, inst!(B, "subfco", XO, [RT, RA, RB, OE, Rc])),
        (10, inst!(B, "addc", XO, [RT, RA, RB, OE, Rc])),
        (522, inst!(B, "addco", XO, [RT, RA, RB, OE, Rc])),
        (11, inst!(B, "mulhwu", XO, [RT, RA, RB, Rc])),
        (40, inst!(B, "subf", XO, [RT, RA, RB, OE, Rc])),
        (552, inst!(B, "subfo", XO, [RT, RA, RB, OE, Rc])),
        (75, inst!(B, "mulhw", XO, [RT, RA, RB, Rc])),
        (104, inst!(B, "neg", XO, [RT, RA, OE, Rc])),
        (616, inst!(B, "nego", XO, [RT, RA, OE, Rc])),
        (136, inst!(B, "subfe", XO, [RT, RA, RB, OE, Rc])),
        (648, inst!(B, "subfeo", XO, [RT, RA, RB, OE, Rc])),
        (138, inst!(B, "adde", XO, [RT, RA, RB, OE, Rc])),
        (650, inst!(B, "addeo", XO, [RT, RA, RB, OE, Rc])),
        (200, inst!(B, "subfze", XO, [RT, RA, OE, Rc])),
        (712, inst!(B, "subfzeo", XO, [RT, RA, OE, Rc])),
        (202, inst!(B, "addze", XO, [RT, RA, OE, Rc])),
        (714, inst!(B, "addzeo", XO, [RT, RA, OE, Rc])),
        (232, inst!(B, "subfme", XO, [RT, RA, OE, Rc])),
        (744, inst!(B, "subfmeo", XO, [RT, RA, OE, Rc])),
        (234, inst!(B, "addme", XO, [RT, RA, OE, Rc])),
        (746, inst!(B, "addmeo", XO, [RT, RA, OE, Rc])),
        (235, inst!(B, "mullw", XO, [RT, RA, RB, OE, Rc])),
        (747, inst!(B, "mullwo", XO, [RT, RA, RB, OE, Rc])),
        (266, inst!(B, "add", XO, [RT, RA, RB, OE, Rc])),
        (778, inst!(B, "addo", XO, [RT, RA, RB, OE, Rc])),
        (459, inst!(B, "divwu", XO, [RT, RA, RB, OE, Rc])),
        (971, inst!(B, "divwuo", XO, [RT, RA, RB, OE, Rc])),
        (491, inst!(B, "divw", XO, [RT, RA, RB, OE, Rc])),
        (1003, inst!(B, "divwo", XO, [RT, RA, RB, OE, Rc])),
        // Logical, shift, count.
        (24, inst!(B, "slw", X, [RA, RS, RB, Rc])),
        (26, inst!(B, "cntlzw", X, [RA, RS, Rc])),
        (28, inst!(B, "and", X, [RA, RS, RB, Rc])),
        (60, inst!(B, "andc", X, [RA, RS, RB, Rc])),
        (124, inst!(B, "nor", X, [RA, RS, RB, Rc])),
        (284, inst!(B, "eqv", X, [RA, RS, RB, Rc])),
        (316, inst!(B, "xor", X, [RA, RS, RB, Rc])),
        (412, inst!(B, "orc", X, [RA, RS, RB, Rc])),
        (444, inst!(B, "or", X, [RA, RS, RB, Rc])),
        (476, inst!(B, "nand", X, [RA, RS, RB, Rc])),
        (536, inst!(B, "srw", X, [RA, RS, RB, Rc])),
        (792, inst!(B, "sraw", X, [RA, RS, RB, Rc])),
        (824, inst!(B, "srawi", X, [RA, RS, SH, Rc])),
        (922, inst!(B, "extsh", X, [RA, RS, Rc])),
        (954, inst!(B, "extsb", X, [RA, RS, Rc])),
        // Loads.
        (20, inst!(B, "lwarx", X, [RT, RA, RB])),
        (23, inst!(B, "lwzx", X, [RT, RA, RB])),
        (55, inst!(B, "lwzux", X, [RT, RA, RB])),
        (87, inst!(B, "lbzx", X, [RT, RA, RB])),
        (119, inst!(B, "lbzux", X, [RT, RA, RB])),
        (279, inst!(B, "lhzx", X, [RT, RA, RB])),
        (311, inst!(B, "lhzux", X, [RT, RA, RB])),
        (343, inst!(B, "lhax", X, [RT, RA, RB])),
        (375, inst!(B, "lhaux", X, [RT, RA, RB])),
        (534, inst!(B, "lwbrx", X, [RT, RA, RB])),
        (790, inst!(B, "lhbrx", X, [RT, RA, RB])),
        // Stores.
        (150, inst!(B, "stwcx.", X, [RS, RA, RB])),
        (151, inst!(B, "stwx", X, [RS, RA, RB])),
        (183, inst!(B, "stwux", X, [RS, RA, RB])),
        (215, inst!(B, "stbx", X, [RS, RA, RB])),
        (247, inst!(B, "stbux", X, [RS, RA, RB])),
        (407, inst!(B, "sthx", X, [RS, RA, RB])),
        (439, inst!(B, "sthux", X, [RS, RA, RB])),
        (662, inst!(B, "stwbrx", X, [RS, RA, RB])),
        (918, inst!(B, "sthbrx", X, [RS, RA, RB])),
        // Cache management.
        (54, inst!(B, "dcbst", X, [RA, RB])),
        (86, inst!(B, "dcbf", X, [RA, RB])),
        (246, inst!(B, "dcbtst", X, [RA, RB])),
        (278, inst!(B, "dcbt", X, [RA, RB])),
        (470, inst!(B, "dcbi", X, [RA, RB])),
        (982, inst!(B, "icbi", X, [RA, RB])),
        (1014, inst!(B, "dcbz", X, [RA, RB])),
        (598, inst!(B, "msync", X, [])),
        // System registers.
        (19, inst!(B, "mfcr", X, [RT])),
        (83, inst!(B, "mfmsr", X, [RT])),
        (146, inst!(B, "mtmsr", X, [RS])),
        (144, inst!(B, "mtcrf", XFX, [FXM, RS])),
        (339, inst!(B, "mfspr", XFX, [RT, SPR])),
        (467, inst!(B, "mtspr", XFX, [SPR, RS])),
    ];
    // isel: A-form, the low five key bits are the extended opcode and the
    // high five select the CR bit.
    entries.extend((0..32).map(|bc| ((bc << 5) | 15, inst!(B, "isel", A, [RT, RA, RB, BC]))));
    entries
}
