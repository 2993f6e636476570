//! # RGB12 Core
//!
//! Core components for the RGB12 image codec library.
//!
//! This crate provides the fundamental building blocks shared by every
//! payload algorithm:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for Huffman codes
//! - [`window`]: Bounded nibble windows for the LZ77 codec
//! - [`image`]: In-memory pixel model and the 12-bit color views
//! - [`algorithm`]: Payload algorithm identifiers
//! - [`traits`]: Core traits for codecs and file handlers
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! RGB12 is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Tooling                                             │
//! │     rgb12 CLI (info, import, export, convert, test)    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     .rgb12 header framing, Rgb12Container handler      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     444 bit density, Huffman, LZ77, Grayscale          │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     BitReader/BitWriter, NibbleWindow, Image, errors   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rgb12_core::image::{Color, Image, PixelDepth};
//!
//! let mut image = Image::new(2, 1, PixelDepth::Rgb12);
//! image.set_pixel(1, 0, Color::from_packed(0xABC));
//! assert_eq!(image.packed().collect::<Vec<_>>(), vec![0x000, 0xABC]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithm;
pub mod bitstream;
pub mod error;
pub mod image;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use algorithm::Algorithm;
pub use bitstream::{BitReader, BitWriter};
pub use error::{Result, Rgb12Error};
pub use image::{Color, Image, PixelDepth};
pub use traits::{ImageHandler, PixelCodec};
pub use window::NibbleWindow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::algorithm::Algorithm;
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{Result, Rgb12Error};
    pub use crate::image::{Color, Image, PixelDepth};
    pub use crate::traits::{ImageHandler, PixelCodec};
    pub use crate::window::NibbleWindow;
}
