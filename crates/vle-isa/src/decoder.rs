//! Decoder construction and lookup.

use tracing::debug;

use crate::category::Category;
use crate::error::Result;
use crate::instruction::{AddrMode, Instruction};
use crate::tables::{self, DecodeExtension};
use crate::trie::DecodeTrie;

/// Decoder for one category set.
///
/// Built once; lookups are pure and the decoder is freely shared between
/// threads.
#[derive(Clone, Debug)]
pub struct Decoder {
    trie: DecodeTrie,
    mode: AddrMode,
}

/// Composes the base table with category extensions.
///
/// ```ignore
/// let decoder = Decoder::builder(Category::E | Category::SP).build()?;
/// ```
pub struct DecoderBuilder {
    categories: Category,
    extensions: Vec<Box<dyn DecodeExtension>>,
}

impl DecoderBuilder {
    /// Builder with no extensions registered.
    #[must_use]
    pub fn new(categories: Category) -> Self {
        Self {
            categories,
            extensions: Vec::new(),
        }
    }

    /// Builder with the standard extension set registered.
    #[must_use]
    pub fn standard(categories: Category) -> Self {
        Self {
            categories,
            extensions: tables::standard_extensions(),
        }
    }

    /// Register an extension. It is merged only if its category is active.
    #[must_use]
    pub fn with_extension(mut self, extension: impl DecodeExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Merge and validate.
    pub fn build(self) -> Result<Decoder> {
        let effective = self.categories.effective();
        let active = self
            .extensions
            .iter()
            .filter(|ext| effective.contains(ext.category()))
            .map(|ext| ext.trie());
        let trie = DecodeTrie::build(tables::base(), active, effective)?;
        debug!(
            categories = %effective,
            leaves = trie.leaves().len(),
            depth = trie.depth(),
            "decoder built"
        );
        Ok(Decoder {
            trie,
            mode: AddrMode::from_categories(effective),
        })
    }
}

impl Decoder {
    /// Decoder with the standard extensions for `categories`.
    pub fn new(categories: Category) -> Result<Self> {
        DecoderBuilder::standard(categories).build()
    }

    /// Builder for custom extension sets.
    #[must_use]
    pub fn builder(categories: Category) -> DecoderBuilder {
        DecoderBuilder::standard(categories)
    }

    /// Effective category set.
    #[must_use]
    pub const fn categories(&self) -> Category {
        self.trie.categories()
    }

    #[must_use]
    pub const fn addr_mode(&self) -> AddrMode {
        self.mode
    }

    #[must_use]
    pub const fn trie(&self) -> &DecodeTrie {
        &self.trie
    }

    /// Decode the instruction at the start of `bytes`.
    ///
    /// Reads up to four bytes big-endian, zero-padding a shorter slice.
    /// Returns `None` for unknown encodings and when `bytes` is shorter than
    /// the matched instruction.
    #[must_use]
    pub fn decode(&self, bytes: &[u8], address: u64) -> Option<Instruction> {
        let mut buf = [0u8; 4];
        let n = bytes.len().min(4);
        buf[..n].copy_from_slice(&bytes[..n]);
        let word = u32::from_be_bytes(buf);
        let descriptor = self.trie.lookup(word)?;
        if bytes.len() < usize::from(descriptor.length) {
            return None;
        }
        Some(Instruction::new(word, address, *descriptor, self.mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::trie::{Node, level};

    struct Clash;

    impl DecodeExtension for Clash {
        fn category(&self) -> Category {
            Category::STM
        }

        fn trie(&self) -> Node {
            // Same position as se_illegal.
            level(
                0,
                4,
                [(
                    0x0,
                    level(4, 8, [(0x0, level(8, 12, [(0x0, level(12, 16, [(0x0, inst!(STM, "x_clash", C, []))]))]))]),
                )],
            )
        }
    }

    #[test]
    fn test_standard_sets_build() {
        for categories in [
            Category::empty(),
            Category::E,
            Category::SP | Category::LMV,
            Category::all(),
        ] {
            assert!(Decoder::new(categories).is_ok(), "{categories}");
        }
    }

    #[test]
    fn test_inactive_extension_ignored() {
        let decoder = Decoder::builder(Category::empty())
            .with_extension(Clash)
            .build()
            .unwrap();
        assert_eq!(
            decoder.decode(&[0, 0], 0).map(|i| i.mnemonic()),
            Some("se_illegal")
        );
    }

    #[test]
    fn test_active_collision_fails() {
        let err = Decoder::builder(Category::STM)
            .with_extension(Clash)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Collision {
                existing: "se_illegal",
                incoming: "x_clash",
                ..
            }
        ));
    }

    #[test]
    fn test_short_buffer() {
        let decoder = Decoder::new(Category::empty()).unwrap();
        // e_add16i needs four bytes.
        assert!(decoder.decode(&[0x1C, 0x00], 0).is_none());
        assert!(decoder.decode(&[0x1C, 0x00, 0x00, 0x00], 0).is_some());
        // se_mr fits in two.
        assert_eq!(
            decoder.decode(&[0x01, 0x10], 0).map(|i| i.mnemonic()),
            Some("se_mr")
        );
    }

    #[test]
    fn test_x64_mode() {
        let decoder = Decoder::new(Category::X64).unwrap();
        assert_eq!(decoder.addr_mode(), AddrMode::Bits64);
        assert!(decoder.categories().contains(Category::BASE));
    }
}
