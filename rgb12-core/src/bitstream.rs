//! Bit-level I/O for variable-length codes.
//!
//! This module provides `BitWriter` and `BitReader` for packing and
//! unpacking data one bit at a time, which the Huffman codec relies on.
//!
//! # Bit Ordering
//!
//! Unlike DEFLATE-style streams, RGB12 packs bits MSB-first: the first bit
//! written lands in bit 7 of the first byte. A partially filled final byte
//! is padded with zero bits in its low positions, so `N` bits always occupy
//! exactly `ceil(N / 8)` bytes.
//!
//! # Example
//!
//! ```
//! use rgb12_core::bitstream::{BitReader, BitWriter};
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bit(true).unwrap();
//!     writer.write_bits(&[false, true]).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1010_0000]);
//!
//! let mut reader = BitReader::from_bytes(output);
//! assert!(reader.next_bit().unwrap());
//! assert!(!reader.next_bit().unwrap());
//! assert!(reader.next_bit().unwrap());
//! ```

use crate::error::{Rgb12Error, Result};
use std::io::{Read, Write};

/// A bit-level writer that wraps any `Write` implementation.
///
/// Bits accumulate in an 8-bit register and are emitted as soon as a byte
/// is complete. Call [`BitWriter::flush`] once all bits are written to emit
/// a trailing partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit accumulator (MSB-first).
    accumulator: u8,
    /// Number of bits currently held in the accumulator (0-7).
    pending: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            accumulator: 0,
            pending: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flush remaining bits and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.accumulator = (self.accumulator << 1) | bit as u8;
        self.pending += 1;
        self.total_bits_written += 1;

        if self.pending == 8 {
            self.writer.write_all(&[self.accumulator])?;
            self.accumulator = 0;
            self.pending = 0;
        }

        Ok(())
    }

    /// Write a sequence of bits in order.
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// `count` may be at most 64.
    pub fn write_code(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Emit any partial byte, padded with trailing zero bits.
    ///
    /// This is a no-op when the accumulator is empty.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending > 0 {
            let byte = self.accumulator << (8 - self.pending);
            self.writer.write_all(&[byte])?;
            self.accumulator = 0;
            self.pending = 0;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// A bit-level reader over a fully buffered byte source.
///
/// The whole remaining source is loaded into memory on construction. The
/// reader is a finite sequence: once exhausted it keeps failing with
/// [`Rgb12Error::OutOfData`].
#[derive(Debug, Clone)]
pub struct BitReader {
    /// Buffered input.
    data: Vec<u8>,
    /// Index of the byte currently being read.
    byte_pos: usize,
    /// Bit cursor within the current byte (0 = MSB).
    bit_pos: u8,
}

impl BitReader {
    /// Read the remainder of `source` into memory and create a reader over it.
    pub fn new<R: Read>(mut source: R) -> Result<Self> {
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    /// Create a reader over an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.byte_pos as u64 * 8 + self.bit_pos as u64
    }

    /// Number of bits left in the buffer.
    pub fn remaining_bits(&self) -> u64 {
        self.data.len() as u64 * 8 - self.bits_read()
    }

    /// Return the next bit, MSB-first.
    #[inline]
    pub fn next_bit(&mut self) -> Result<bool> {
        let byte = match self.data.get(self.byte_pos) {
            Some(&byte) => byte,
            None => {
                return Err(Rgb12Error::out_of_data(
                    self.bits_read() + 1,
                    self.bits_read(),
                ));
            }
        };

        let bit = (byte >> (7 - self.bit_pos)) & 1 == 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }

        Ok(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitwriter_basic() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            // Write 0b10110101 bit by bit
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_bitwriter_pads_partial_byte() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_code(0b111, 3).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0b1110_0000]);
    }

    #[test]
    fn test_bitwriter_flush_is_noop_when_empty() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_code(0xA5, 8).unwrap();
            writer.flush().unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xA5]);
    }

    #[test]
    fn test_bitwriter_output_length() {
        for n in 0..40u64 {
            let mut output = Vec::new();
            let mut writer = BitWriter::new(&mut output);
            for i in 0..n {
                writer.write_bit(i % 3 == 0).unwrap();
            }
            assert_eq!(writer.bits_written(), n);
            writer.flush().unwrap();
            assert_eq!(output.len() as u64, n.div_ceil(8));
        }
    }

    #[test]
    fn test_bitreader_basic() {
        let mut reader = BitReader::from_bytes(vec![0b1000_0001]);
        assert!(reader.next_bit().unwrap());
        for _ in 0..6 {
            assert!(!reader.next_bit().unwrap());
        }
        assert!(reader.next_bit().unwrap());
        assert!(reader.next_bit().unwrap_err().is_out_of_data());
    }

    #[test]
    fn test_bitreader_from_reader() {
        let mut reader = BitReader::new(Cursor::new(vec![0xF0, 0x0F])).unwrap();
        assert_eq!(reader.remaining_bits(), 16);
        let bits: Vec<bool> = (0..16).map(|_| reader.next_bit().unwrap()).collect();
        assert_eq!(&bits[..4], &[true; 4]);
        assert_eq!(&bits[4..12], &[false; 8]);
        assert_eq!(&bits[12..], &[true; 4]);
        assert_eq!(reader.bits_read(), 16);
    }

    #[test]
    fn test_roundtrip() {
        let mut output = Vec::new();
        {
            let mut writer = BitWriter::new(&mut output);
            writer.write_code(0b101, 3).unwrap();
            writer.write_bits(&[true, true, false]).unwrap();
            writer.write_code(0b110011, 6).unwrap();
            writer.flush().unwrap();
        }

        let mut reader = BitReader::from_bytes(output);
        let bits: Vec<bool> = (0..12).map(|_| reader.next_bit().unwrap()).collect();
        assert_eq!(
            bits,
            vec![
                true, false, true, true, true, false, true, true, false, false, true, true
            ]
        );
    }
}
