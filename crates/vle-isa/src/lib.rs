//! PowerPC VLE instruction decoder and IR lifter.
//!
//! Decoding walks a bit-range trie built once per category set; the result is
//! an [`Instruction`] that resolves fields, mnemonics, branch edges, and
//! operand text on demand. The lifter translates instructions into any
//! [`vle_ir::IrBuilder`] for the [`Vle`] architecture.
//!
//! ```ignore
//! let session = Session::new(Category::E | Category::SP)?;
//! let inst = session.decode(&[0x18, 0x21, 0x84, 0xF0], 0x1000).unwrap();
//! println!("{inst}");
//! ```

#[macro_use]
pub mod tables;

mod category;
mod decoder;
mod descriptor;
mod disasm;
mod error;
mod field;
pub mod format;
mod info;
mod instruction;
pub mod lift;
mod mnemonic;
mod regs;
mod session;
mod trie;

pub use category::Category;
pub use decoder::{Decoder, DecoderBuilder};
pub use descriptor::Descriptor;
pub use disasm::{Operand, UNAVAILABLE};
pub use error::{BuildError, Result};
pub use field::{BitRange, BitSlice, Computed, Field, FieldSource, scaled_immediate, sign_extend};
pub use format::Format;
pub use info::{BranchKind, InstructionInfo};
pub use instruction::{AddrMode, Instruction};
pub use lift::{LiftFn, Lifter};
pub use mnemonic::BranchCondition;
pub use regs::{CompareKind, CrBit, Flag, FlagWrite, Reg, Vle, spr_name};
pub use session::Session;
pub use trie::{DecodeNode, DecodeTrie, Node, level};
