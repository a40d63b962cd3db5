//! VLE - PowerPC VLE disassembler and lifter
//!
//! Loads a raw code image, decodes a window of it sequentially, and lifts the
//! decoded instructions in parallel.
//!
//! # Example
//!
//! ```ignore
//! use vle::{Image, Tally, scan};
//! use vle_isa::{Category, Session};
//!
//! let session = Session::new(Category::E | Category::SP)?;
//! let image = Image::open("flash.bin", 0x0080_0000)?;
//! let decoded = scan(&session, image.window(0, None)?, image.base());
//! let tally = Tally::collect(&session, &decoded);
//! ```

mod error;
mod image;
mod scan;
mod tally;

pub use error::{Error, Result};
pub use image::Image;
pub use scan::{Decoded, lift_all, scan};
pub use tally::Tally;
