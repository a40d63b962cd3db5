//! Raw code images.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Flat image loaded at `base`.
#[derive(Clone, Debug)]
pub struct Image {
    bytes: Vec<u8>,
    base: u64,
}

impl Image {
    pub const fn new(bytes: Vec<u8>, base: u64) -> Self {
        Self { bytes, base }
    }

    /// Read a whole file as an image.
    pub fn open(path: impl AsRef<Path>, base: u64) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), size = bytes.len(), base, "image loaded");
        Ok(Self::new(bytes, base))
    }

    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes from file offset `start`, `length` long or to the end.
    pub fn window(&self, start: u64, length: Option<u64>) -> Result<&[u8]> {
        let size = self.bytes.len();
        let out_of_range = || Error::Range {
            start,
            length: length.unwrap_or(0),
            size,
        };
        let begin = usize::try_from(start).map_err(|_| out_of_range())?;
        let end = match length {
            Some(n) => begin
                .checked_add(usize::try_from(n).map_err(|_| out_of_range())?)
                .ok_or_else(out_of_range)?,
            None => size,
        };
        if begin > end || end > size {
            return Err(out_of_range());
        }
        Ok(&self.bytes[begin..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let image = Image::new(vec![0, 1, 2, 3, 4, 5], 0x100);
        assert_eq!(image.window(0, None).unwrap(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(image.window(2, Some(2)).unwrap(), &[2, 3]);
        assert_eq!(image.window(6, None).unwrap(), &[] as &[u8]);
        assert!(matches!(image.window(4, Some(4)), Err(Error::Range { .. })));
        assert!(image.window(7, None).is_err());
    }
}
