//! Grayscale codec.
//!
//! Each pixel is reduced to the upper nibble of its luma and two pixels
//! share a byte, the earlier one in the upper half. With an odd pixel
//! count the last byte carries one pixel and a zero lower half, so the
//! payload is always `ceil(w * h / 2)` bytes.

use crate::nibble::{read_payload, split_byte, write_nibble_pairs};
use rgb12_core::error::Result;
use rgb12_core::image::{Color, Image};
use rgb12_core::{Algorithm, PixelCodec};
use std::io::{Read, Write};

/// Payload size in bytes for an image of `pixels` pixels.
pub fn payload_len(pixels: usize) -> usize {
    pixels.div_ceil(2)
}

/// The gray color a pixel is stored as.
pub fn gray_of(color: Color) -> Color {
    Color::gray(color.luma_nibble() << 4)
}

/// Grayscale payload codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleCodec;

impl GrayscaleCodec {
    /// Create a new grayscale codec.
    pub fn new() -> Self {
        Self
    }
}

impl PixelCodec for GrayscaleCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Grayscale
    }

    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()> {
        write_nibble_pairs(sink, image.pixels().iter().map(Color::luma_nibble))?;
        Ok(())
    }

    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()> {
        let payload = read_payload(source, payload_len(image.pixel_count()))?;

        let levels = payload.into_iter().flat_map(split_byte);
        for (pixel, level) in image.pixels_mut().iter_mut().zip(levels) {
            *pixel = Color::gray(level << 4);
        }
        Ok(())
    }
}
