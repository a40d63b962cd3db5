use thiserror::Error;

/// Image loading and session errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session setup failed: {0}")]
    Build(#[from] vle_isa::BuildError),
    #[error("range 0x{start:x}+0x{length:x} is outside the {size}-byte image")]
    Range {
        start: u64,
        length: u64,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
