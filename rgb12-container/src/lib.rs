//! # RGB12 Container
//!
//! The `.rgb12` file format: a small header naming the image size and
//! payload algorithm, followed by the payload itself.
//!
//! - [`header`]: [`FileHeader`] parsing and writing
//! - [`container`]: [`Rgb12Container`], which owns an image and dispatches
//!   to the codecs of `rgb12-codec`
//!
//! ## Example
//!
//! ```rust,no_run
//! use rgb12_container::{Algorithm, ImageHandler, Rgb12Container};
//! use rgb12_core::{Image, PixelDepth};
//!
//! let image = Image::new(64, 48, PixelDepth::Rgb12);
//! let container = Rgb12Container::from_image(image, Algorithm::Huffman);
//! let path = container.save("picture").unwrap();
//! assert!(path.to_string_lossy().ends_with(".rgb12"));
//!
//! let mut loaded = Rgb12Container::new();
//! loaded.load(&path).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod header;

// Re-exports
pub use container::Rgb12Container;
pub use header::{EXTENSION, FileHeader, MAX_TAG_LEN};
pub use rgb12_core::{Algorithm, ImageHandler};
