//! The "444" bit density codec.
//!
//! No compression: the channel nibble stream is packed two nibbles per
//! byte, so a `w x h` image takes exactly `ceil(3 * w * h / 2)` bytes.

use crate::nibble::{NibbleSink, channel_nibbles, read_payload, split_byte, write_nibble_pairs};
use rgb12_core::error::Result;
use rgb12_core::image::Image;
use rgb12_core::{Algorithm, PixelCodec};
use std::io::{Read, Write};

/// Payload size in bytes for an image of `pixels` pixels.
pub fn payload_len(pixels: usize) -> usize {
    (pixels * 3).div_ceil(2)
}

/// 444 bit density payload codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitDensityCodec;

impl BitDensityCodec {
    /// Create a new bit density codec.
    pub fn new() -> Self {
        Self
    }
}

impl PixelCodec for BitDensityCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BitDensity
    }

    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()> {
        let written = write_nibble_pairs(sink, image.nibbles())?;
        log::trace!(
            "444: {} nibbles -> {} bytes",
            channel_nibbles(image),
            written
        );
        Ok(())
    }

    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()> {
        let payload = read_payload(source, payload_len(image.pixel_count()))?;

        let mut sink = NibbleSink::new(image);
        for nibble in payload.into_iter().flat_map(split_byte) {
            if sink.is_complete() {
                break;
            }
            sink.push(nibble)?;
        }
        Ok(())
    }
}
