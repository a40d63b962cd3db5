//! Intermediate representation for the VLE lifter.
//!
//! This crate provides the abstract emission interface ([`IrBuilder`]) that
//! lifters write into, plus a recording implementation used by tools and tests.
//! It has no PowerPC-specific knowledge: registers, flags and flag-write tags
//! are supplied by an [`Arch`] implementation in `vle-isa`.

mod arch;
mod builder;
mod expr;
mod instr;
mod record;
mod terminator;

pub use arch::*;
pub use builder::*;
pub use expr::*;
pub use instr::*;
pub use record::*;
pub use terminator::*;
