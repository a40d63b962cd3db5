//! Decode tables.
//!
//! The base table covers every `se_*` and `e_*` instruction plus the Book-E
//! integer subset of primary opcode 31. Optional categories contribute
//! partial tries through [`DecodeExtension`] implementations.

/// Leaf node for a descriptor: `inst!(CATEGORY, "name", FORMAT, [OPERANDS], marker?)`.
macro_rules! inst {
    ($cat:ident, $name:literal, $fmt:ident, [$($op:ident),* $(,)?] $(, $marker:ident)?) => {
        $crate::trie::Node::Inst(
            $crate::descriptor::Descriptor::new(
                $name,
                $crate::category::Category::$cat,
                &$crate::format::$fmt,
                &[$($crate::field::Field::$op),*],
            )$(.$marker())?,
        )
    };
}

mod booke;
mod ext;
mod vle;

use crate::category::Category;
use crate::trie::{Node, level};

pub use ext::{
    CacheInit, EmbeddedDebug, EmbeddedFloat, EmbeddedPlatform, PerformanceMonitor,
    ProcessorControl, Vector, VolatileMultiple, Wait,
};

/// Source of a partial decode trie for one category.
pub trait DecodeExtension: Send + Sync {
    /// Category gating this extension.
    fn category(&self) -> Category;

    /// Partial trie, rooted at the same selector as the base table.
    fn trie(&self) -> Node;
}

/// Base table: short forms, long forms, and Book-E opcode 31.
#[must_use]
pub fn base() -> Node {
    let mut opcode31 = vle::opcode31();
    opcode31.extend(booke::opcode31());
    vle::table(opcode31)
}

/// Standard extensions, one per supported category.
#[must_use]
pub fn standard_extensions() -> Vec<Box<dyn DecodeExtension>> {
    vec![
        Box::new(EmbeddedPlatform),
        Box::new(PerformanceMonitor),
        Box::new(ProcessorControl),
        Box::new(CacheInit),
        Box::new(EmbeddedDebug),
        Box::new(Wait),
        Box::new(VolatileMultiple),
        Box::new(EmbeddedFloat),
        Box::new(Vector),
    ]
}

/// Wrap opcode-31 entries (keyed by the 10-bit extended opcode) in the
/// levels leading to them.
fn under_opcode31(entries: Vec<(u32, Node)>) -> Node {
    level(0, 4, [(0x7, level(0, 6, [(0b01_1111, level(21, 31, entries))]))])
}
