//! `.rgb12` file header parsing and writing.
//!
//! ```text
//! [u64 tag length][tag bytes][u32 width][u32 height][u8 algorithm id]
//! ```
//!
//! Integers are little-endian. The tag is the format extension, `.rgb12`.

use rgb12_core::Algorithm;
use rgb12_core::error::{Result, Rgb12Error};
use std::io::{Read, Write};

/// File extension and header tag.
pub const EXTENSION: &str = ".rgb12";

/// Tag lengths at or above this are treated as corruption.
pub const MAX_TAG_LEN: u64 = 1000;

/// `.rgb12` file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Payload algorithm.
    pub algorithm: Algorithm,
}

impl FileHeader {
    /// Create a header.
    pub fn new(width: u32, height: u32, algorithm: Algorithm) -> Self {
        Self {
            width,
            height,
            algorithm,
        }
    }

    /// Size of the encoded header in bytes.
    pub fn encoded_len() -> u64 {
        8 + EXTENSION.len() as u64 + 4 + 4 + 1
    }

    /// Number of pixels the header declares.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exact payload size for the fixed-size algorithms.
    ///
    /// Huffman and LZ77 payloads depend on the content, so this is `None`
    /// for them.
    pub fn payload_len(&self) -> Option<u64> {
        match self.algorithm {
            Algorithm::BitDensity => Some((self.pixel_count() * 3).div_ceil(2)),
            Algorithm::Grayscale => Some(self.pixel_count().div_ceil(2)),
            Algorithm::Huffman | Algorithm::Lz77 => None,
        }
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        // Tag
        writer.write_all(&(EXTENSION.len() as u64).to_le_bytes())?;
        writer.write_all(EXTENSION.as_bytes())?;

        // Dimensions
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;

        // Algorithm
        writer.write_all(&[self.algorithm.id()])?;

        Ok(())
    }

    /// Read and validate a header.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Self::read_inner(reader).map_err(|e| e.eof_as_format("header"))
    }

    fn read_inner<R: Read>(reader: &mut R) -> Result<Self> {
        let mut len_buf = [0u8; 8];
        reader.read_exact(&mut len_buf)?;
        let tag_len = u64::from_le_bytes(len_buf);

        if tag_len >= MAX_TAG_LEN {
            return Err(Rgb12Error::format(format!(
                "tag length {} is implausible",
                tag_len
            )));
        }

        let mut tag = vec![0u8; tag_len as usize];
        reader.read_exact(&mut tag)?;
        if tag != EXTENSION.as_bytes() {
            return Err(Rgb12Error::format(format!(
                "bad tag {:?}, expected {:?}",
                String::from_utf8_lossy(&tag),
                EXTENSION
            )));
        }

        let mut buf = [0u8; 9];
        reader.read_exact(&mut buf)?;
        let width = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let height = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let algorithm = Algorithm::from_id(buf[8])?;

        Ok(Self {
            width,
            height,
            algorithm,
        })
    }
}
