//! Nibble stream helpers shared by the byte-packed codecs.
//!
//! The 444, grayscale and LZ77 payloads all view an image as a stream of
//! 4-bit values. [`NibbleSink`] regroups a decoded stream into pixels,
//! [`write_nibble_pairs`] and [`read_payload`] handle two-per-byte packing.

use rgb12_core::error::{Result, Rgb12Error};
use rgb12_core::image::{Color, Image};
use std::io::{Read, Write};

/// Number of channel nibbles in `image` (three per pixel).
pub fn channel_nibbles(image: &Image) -> u64 {
    image.pixel_count() as u64 * 3
}

/// Pack nibbles two per byte, first nibble in the upper half.
///
/// An odd trailing nibble gets a zero lower half. Returns the number of
/// bytes written.
pub fn write_nibble_pairs<W, I>(sink: &mut W, nibbles: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = u8>,
{
    let mut packed = Vec::new();
    let mut high: Option<u8> = None;

    for nibble in nibbles {
        match high.take() {
            Some(h) => packed.push(h << 4 | (nibble & 0x0F)),
            None => high = Some(nibble & 0x0F),
        }
    }
    if let Some(h) = high {
        packed.push(h << 4);
    }

    sink.write_all(&packed)?;
    Ok(packed.len())
}

/// Read exactly `needed` payload bytes.
///
/// A short source is reported as [`Rgb12Error::OutOfData`] in bytes; bytes
/// past `needed` are left unread.
pub fn read_payload<R: Read>(source: &mut R, needed: usize) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(needed);
    source.take(needed as u64).read_to_end(&mut payload)?;

    if payload.len() < needed {
        return Err(Rgb12Error::out_of_data(needed as u64, payload.len() as u64));
    }
    Ok(payload)
}

/// Split a byte into its upper and lower nibble.
#[inline]
pub fn split_byte(byte: u8) -> [u8; 2] {
    [byte >> 4, byte & 0x0F]
}

/// Regroups a channel nibble stream into row-major pixels.
///
/// Every third nibble completes a pixel, whose channels get the nibbles in
/// their upper halves. Nibbles pushed after the last pixel is complete are
/// rejected.
#[derive(Debug)]
pub struct NibbleSink<'a> {
    pixels: &'a mut [Color],
    pending: [u8; 3],
    filled: usize,
    next_pixel: usize,
}

impl<'a> NibbleSink<'a> {
    /// Create a sink writing into `image`, starting at its first pixel.
    pub fn new(image: &'a mut Image) -> Self {
        Self {
            pixels: image.pixels_mut(),
            pending: [0; 3],
            filled: 0,
            next_pixel: 0,
        }
    }

    /// Nibbles the sink accepts in total.
    pub fn expected(&self) -> u64 {
        self.pixels.len() as u64 * 3
    }

    /// Nibbles accepted so far.
    pub fn produced(&self) -> u64 {
        self.next_pixel as u64 * 3 + self.filled as u64
    }

    /// Check whether every pixel has been written.
    pub fn is_complete(&self) -> bool {
        self.next_pixel == self.pixels.len()
    }

    /// Accept one nibble.
    pub fn push(&mut self, nibble: u8) -> Result<()> {
        if self.is_complete() {
            return Err(Rgb12Error::format(format!(
                "nibble stream overruns the image ({} nibbles expected)",
                self.expected()
            )));
        }

        self.pending[self.filled] = nibble & 0x0F;
        self.filled += 1;

        if self.filled == 3 {
            let [r, g, b] = self.pending;
            self.pixels[self.next_pixel] = Color::from_nibbles(r, g, b);
            self.next_pixel += 1;
            self.filled = 0;
        }
        Ok(())
    }
}
