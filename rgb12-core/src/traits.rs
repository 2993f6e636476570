//! Core traits for pixel codecs and image file handlers.
//!
//! [`PixelCodec`] is implemented by every payload algorithm. It turns a
//! whole in-memory image into bytes and back; there is no incremental API.
//! [`ImageHandler`] is implemented by file formats that frame a payload
//! with a header.

use crate::algorithm::Algorithm;
use crate::error::{Rgb12Error, Result};
use crate::image::{Image, PixelDepth};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// A whole-image pixel payload codec.
///
/// Implementations keep no state between calls: every frequency table,
/// tree, window, or cursor lives for the duration of one call.
pub trait PixelCodec {
    /// The algorithm id this codec writes under.
    fn algorithm(&self) -> Algorithm;

    /// Encode every pixel of `image`, in row-major order, into `sink`.
    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()>;

    /// Decode a payload from `source` into the pre-sized `image`.
    ///
    /// On failure the image is left partially populated.
    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()>;

    /// Encode into a fresh buffer (convenience method).
    fn encode_to_vec(&self, image: &Image) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.encode(&mut output, image)?;
        Ok(output)
    }

    /// Decode a buffered payload into a new 12-bit image (convenience method).
    fn decode_from_slice(&self, mut data: &[u8], width: u32, height: u32) -> Result<Image> {
        let mut image = Image::new(width, height, PixelDepth::Rgb12);
        self.decode(&mut data, &mut image)?;
        Ok(image)
    }
}

/// An image file format that owns one image at a time.
pub trait ImageHandler {
    /// File extension including its leading dot (e.g. `".rgb12"`).
    fn extension(&self) -> &'static str;

    /// The currently held image.
    fn image(&self) -> &Image;

    /// Replace the held image wholesale.
    fn replace_image(&mut self, image: Image);

    /// Write `image` in this format.
    fn store<W: Write>(&self, writer: &mut W, image: &Image) -> Result<()>;

    /// Read an image in this format.
    fn recover<R: Read>(&mut self, reader: &mut R) -> Result<Image>;

    /// Save the held image to `path`.
    ///
    /// The extension is appended when `path` does not already end with it.
    /// Returns the path actually written.
    fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        if self.image().is_empty() {
            return Err(Rgb12Error::invalid_image("cannot save an empty image"));
        }

        let path = with_extension(path.as_ref(), self.extension());
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        self.store(&mut writer, self.image())?;
        writer.flush()?;

        Ok(path)
    }

    /// Load an image from `path`, replacing the held image.
    fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let image = self.recover(&mut reader)?;
        self.replace_image(image);
        Ok(())
    }
}

/// Append `extension` to `path` unless the file name already ends with it.
pub fn with_extension(path: &Path, extension: &str) -> PathBuf {
    let has_extension = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(extension));

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(extension);
        PathBuf::from(name)
    }
}
