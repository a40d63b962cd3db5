//! Architecture vocabulary consumed by the IR.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Marker trait describing an architecture to the IR.
///
/// Uses a marker type with associated types so the IR stays generic over the
/// register, flag, and flag-write vocabularies without knowing their meaning.
pub trait Arch: Copy + Clone + Send + Sync + Default + Debug + 'static {
    /// Register identifier.
    type Reg: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// Single status flag.
    type Flag: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// Flag-write tag: a named policy for which flags an operation updates.
    type FlagWrite: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// Architecture name (for listings).
    const NAME: &'static str;

    /// Bytes per general-purpose register.
    const REG_BYTES: u8;
}

/// Truncate `value` to `size` bytes.
#[must_use]
pub const fn mask_to(value: u64, size: u8) -> u64 {
    if size >= 8 {
        value
    } else {
        value & ((1u64 << (size as u32 * 8)) - 1)
    }
}

/// Sign-extend the low `size` bytes of `value` to 64 bits.
#[must_use]
pub const fn sign_extend_bytes(value: u64, size: u8) -> u64 {
    if size >= 8 {
        return value;
    }
    let shift = 64 - size as u32 * 8;
    (((value << shift) as i64) >> shift) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_to() {
        assert_eq!(mask_to(0x1_2345_6789, 4), 0x2345_6789);
        assert_eq!(mask_to(0x1ff, 1), 0xff);
        assert_eq!(mask_to(u64::MAX, 8), u64::MAX);
    }

    #[test]
    fn test_sign_extend_bytes() {
        assert_eq!(sign_extend_bytes(0x80, 1), 0xffff_ffff_ffff_ff80);
        assert_eq!(sign_extend_bytes(0x7fff, 2), 0x7fff);
        assert_eq!(sign_extend_bytes(0xffff_fffe, 4), (-2i64) as u64);
    }
}
