use thiserror::Error;

use crate::field::{BitRange, Field};

/// Session setup errors.
///
/// Decode-time conditions (unknown or truncated encodings) are not errors;
/// they surface as `None` from the decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("decode collision at {path}: {existing} and {incoming} claim the same encoding")]
    Collision {
        path: String,
        existing: &'static str,
        incoming: &'static str,
    },
    #[error("selector mismatch at {path}: level {existing} cannot absorb level {incoming}")]
    SelectorMismatch {
        path: String,
        existing: BitRange,
        incoming: BitRange,
    },
    #[error("{mnemonic}: operand {field:?} does not resolve in format {format}")]
    UnresolvedOperand {
        mnemonic: &'static str,
        field: Field,
        format: &'static str,
    },
    #[error("{mnemonic}: computed field {field:?} depends on {input:?}, which is not a direct field")]
    IndirectInput {
        mnemonic: &'static str,
        field: Field,
        input: Field,
    },
    #[error("{mnemonic}: selector {range} reaches past its {length}-byte encoding")]
    SelectorPastLength {
        mnemonic: &'static str,
        range: BitRange,
        length: u8,
    },
    #[error("{mnemonic}: format {format} is {format_length} bytes, descriptor says {length}")]
    LengthMismatch {
        mnemonic: &'static str,
        format: &'static str,
        format_length: u8,
        length: u8,
    },
    #[error("key {key:#x} does not fit selector {range}")]
    KeyOverflow { key: u32, range: BitRange },
    #[error("mnemonic {0} registered twice in the lift table")]
    DuplicateLifter(&'static str),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
