//! # RGB12 Codec
//!
//! Pixel payload codecs for the RGB12 image format.
//!
//! Every codec works on a whole in-memory [`Image`] and implements
//! [`PixelCodec`]:
//!
//! - **444** ([`BitDensityCodec`]): two channel nibbles per byte, no compression
//! - **Huffman** ([`HuffmanCodec`]): prefix codes over packed 12-bit colors
//! - **LZ77** ([`Lz77Codec`]): back-references over the channel nibble stream
//! - **Grayscale** ([`GrayscaleCodec`]): one luma nibble per pixel
//!
//! [`Codec`] selects one of them from an [`Algorithm`] id.
//!
//! ## Example
//!
//! ```rust
//! use rgb12_codec::Codec;
//! use rgb12_core::{Algorithm, Color, Image, PixelCodec, PixelDepth};
//!
//! let mut image = Image::new(4, 4, PixelDepth::Rgb12);
//! image.set_pixel(0, 0, Color::from_packed(0xF00));
//!
//! let codec = Codec::for_algorithm(Algorithm::Huffman);
//! let payload = codec.encode_to_vec(&image).unwrap();
//! let decoded = codec.decode_from_slice(&payload, 4, 4).unwrap();
//! assert_eq!(decoded, image);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod density;
pub mod grayscale;
pub mod huffman;
pub mod lz77;
pub mod nibble;

// Re-exports
pub use density::BitDensityCodec;
pub use grayscale::GrayscaleCodec;
pub use huffman::{CodeTable, FrequencyTable, HuffmanCodec, HuffmanTree};
pub use lz77::{Lz77Codec, Lz77Encoder, Lz77Token};

use rgb12_core::error::Result;
use rgb12_core::{Algorithm, Image, PixelCodec};
use std::io::{Read, Write};

/// One codec per known algorithm.
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    /// 444 bit density.
    BitDensity(BitDensityCodec),
    /// Huffman.
    Huffman(HuffmanCodec),
    /// LZ77.
    Lz77(Lz77Codec),
    /// Grayscale.
    Grayscale(GrayscaleCodec),
}

impl Codec {
    /// The codec that reads and writes `algorithm` payloads.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::BitDensity => Self::BitDensity(BitDensityCodec),
            Algorithm::Huffman => Self::Huffman(HuffmanCodec),
            Algorithm::Lz77 => Self::Lz77(Lz77Codec),
            Algorithm::Grayscale => Self::Grayscale(GrayscaleCodec),
        }
    }
}

impl From<Algorithm> for Codec {
    fn from(algorithm: Algorithm) -> Self {
        Self::for_algorithm(algorithm)
    }
}

impl PixelCodec for Codec {
    fn algorithm(&self) -> Algorithm {
        match self {
            Self::BitDensity(c) => c.algorithm(),
            Self::Huffman(c) => c.algorithm(),
            Self::Lz77(c) => c.algorithm(),
            Self::Grayscale(c) => c.algorithm(),
        }
    }

    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()> {
        match self {
            Self::BitDensity(c) => c.encode(sink, image),
            Self::Huffman(c) => c.encode(sink, image),
            Self::Lz77(c) => c.encode(sink, image),
            Self::Grayscale(c) => c.encode(sink, image),
        }
    }

    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()> {
        match self {
            Self::BitDensity(c) => c.decode(source, image),
            Self::Huffman(c) => c.decode(source, image),
            Self::Lz77(c) => c.decode(source, image),
            Self::Grayscale(c) => c.decode(source, image),
        }
    }
}
