//! The `.rgb12` image container.
//!
//! [`Rgb12Container`] owns one image and an algorithm selection. Storing
//! writes a [`FileHeader`] followed by the payload of the selected codec;
//! recovering decodes with whatever algorithm the file header names.

use crate::header::{EXTENSION, FileHeader};
use rgb12_codec::Codec;
use rgb12_codec::grayscale::gray_of;
use rgb12_core::error::Result;
use rgb12_core::{Algorithm, Image, ImageHandler, PixelCodec, PixelDepth};
use std::borrow::Cow;
use std::io::{Read, Write};

/// A `.rgb12` image container.
#[derive(Debug, Clone, Default)]
pub struct Rgb12Container {
    image: Image,
    algorithm: Algorithm,
}

impl Rgb12Container {
    /// Create an empty container using the default algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding `image`, quantized to 12 bits.
    pub fn from_image(image: Image, algorithm: Algorithm) -> Self {
        let mut container = Self {
            image: Image::default(),
            algorithm,
        };
        container.set_image(image);
        container
    }

    /// The held image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Take the held image.
    pub fn into_image(self) -> Image {
        self.image
    }

    /// Replace the held image, quantizing it to 12 bits.
    pub fn set_image(&mut self, image: Image) {
        self.image = quantize(Cow::Owned(image)).into_owned();
    }

    /// Algorithm used by [`ImageHandler::store`] and `save`.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Select the algorithm for subsequent saves.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Replace every pixel with its gray level.
    ///
    /// A container set to the 444 layout switches to grayscale packing,
    /// the compressing algorithms stay selected.
    pub fn to_grayscale(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = gray_of(*pixel);
        }

        if self.algorithm == Algorithm::BitDensity {
            self.algorithm = Algorithm::Grayscale;
        }
    }
}

/// Truncate a non-12-bit image to the 12-bit profile.
fn quantize(image: Cow<'_, Image>) -> Cow<'_, Image> {
    if image.depth() == PixelDepth::Rgb12 {
        return image;
    }

    if !image.is_quantized() {
        log::warn!(
            "{}x{} image loses the low 4 bits of each channel",
            image.width(),
            image.height()
        );
    }
    Cow::Owned(image.quantized())
}

impl ImageHandler for Rgb12Container {
    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn image(&self) -> &Image {
        &self.image
    }

    fn replace_image(&mut self, image: Image) {
        self.set_image(image);
    }

    fn store<W: Write>(&self, writer: &mut W, image: &Image) -> Result<()> {
        let image = quantize(Cow::Borrowed(image));
        let header = FileHeader::new(image.width(), image.height(), self.algorithm);

        log::debug!(
            "storing {}x{} image as {}",
            header.width,
            header.height,
            header.algorithm
        );

        header.write(writer)?;
        Codec::for_algorithm(self.algorithm).encode(writer, &image)
    }

    fn recover<R: Read>(&mut self, reader: &mut R) -> Result<Image> {
        let header = FileHeader::read_from(reader)?;

        log::debug!(
            "recovering {}x{} image stored as {}",
            header.width,
            header.height,
            header.algorithm
        );

        let mut image = Image::try_new(header.width, header.height, PixelDepth::Rgb12)?;
        Codec::for_algorithm(header.algorithm).decode(reader, &mut image)?;
        Ok(image)
    }
}
