//! Payload algorithm identifiers.
//!
//! The algorithm id is the single byte in the file header that selects how
//! the pixel payload is laid out.

use crate::error::{Rgb12Error, Result};
use std::fmt;
use std::str::FromStr;

/// Pixel payload algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Algorithm {
    /// Two channel nibbles per byte, no compression ("444").
    #[default]
    BitDensity = 0,
    /// Huffman coding over packed 12-bit colors.
    Huffman = 1,
    /// LZ77 over the channel nibble stream.
    Lz77 = 2,
    /// One luma nibble per pixel, two pixels per byte.
    Grayscale = 3,
}

impl Algorithm {
    /// Every known algorithm, in id order.
    pub const ALL: [Algorithm; 4] = [
        Self::BitDensity,
        Self::Huffman,
        Self::Lz77,
        Self::Grayscale,
    ];

    /// The on-disk id byte.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Look up an algorithm by its id byte.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::BitDensity),
            1 => Ok(Self::Huffman),
            2 => Ok(Self::Lz77),
            3 => Ok(Self::Grayscale),
            _ => Err(Rgb12Error::unknown_algorithm(id)),
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BitDensity => "444",
            Self::Huffman => "huffman",
            Self::Lz77 => "lz77",
            Self::Grayscale => "grayscale",
        }
    }

    /// Check whether this algorithm stores full color.
    pub fn is_color(&self) -> bool {
        !matches!(self, Self::Grayscale)
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = Rgb12Error;

    fn try_from(id: u8) -> Result<Self> {
        Self::from_id(id)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "444" | "bit-density" | "bitdensity" | "density" => Ok(Self::BitDensity),
            "huffman" | "huff" => Ok(Self::Huffman),
            "lz77" | "lz" => Ok(Self::Lz77),
            "gray" | "grey" | "grayscale" | "greyscale" => Ok(Self::Grayscale),
            other => Err(format!("unknown algorithm '{}'", other)),
        }
    }
}
