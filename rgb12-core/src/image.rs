//! In-memory pixel model.
//!
//! An [`Image`] is a row-major grid of RGB pixels stored with 8 bits per
//! channel. Images in the 12-bit profile ([`PixelDepth::Rgb12`]) only keep
//! the upper nibble of each channel significant; the lower nibble is zero.
//!
//! The codecs see pixels through two views:
//!
//! - [`Color`]: three 8-bit channels (`r`, `g`, `b`).
//! - the packed 16-bit scalar from [`Color::packed`]: `R4 << 8 | G4 << 4 | B4`,
//!   the Huffman alphabet key.

use crate::error::{Rgb12Error, Result};

/// Mask selecting the significant upper nibble of a channel.
pub const CHANNEL_MASK: u8 = 0xF0;

/// Largest valid packed color.
pub const MAX_PACKED: u16 = 0x0FFF;

/// Storage profile of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelDepth {
    /// 4 significant bits per channel (RGB444).
    #[default]
    Rgb12,
    /// 8 significant bits per channel.
    Rgb24,
}

impl PixelDepth {
    /// Bits per pixel for this profile.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Rgb12 => 12,
            Self::Rgb24 => 24,
        }
    }
}

/// A pixel color with three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Create a color from three nibbles, each expanded into the upper half
    /// of its channel.
    pub const fn from_nibbles(r: u8, g: u8, b: u8) -> Self {
        Self::new((r & 0x0F) << 4, (g & 0x0F) << 4, (b & 0x0F) << 4)
    }

    /// Unpack a `R4 << 8 | G4 << 4 | B4` scalar.
    pub const fn from_packed(packed: u16) -> Self {
        Self::from_nibbles((packed >> 8) as u8, (packed >> 4) as u8, packed as u8)
    }

    /// The packed 12-bit form of this color.
    ///
    /// Only the upper nibble of each channel contributes.
    pub const fn packed(&self) -> u16 {
        ((self.r >> 4) as u16) << 8 | ((self.g >> 4) as u16) << 4 | (self.b >> 4) as u16
    }

    /// Channels in R, G, B order.
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel nibbles (upper half of each channel) in R, G, B order.
    pub const fn nibbles(&self) -> [u8; 3] {
        [self.r >> 4, self.g >> 4, self.b >> 4]
    }

    /// This color truncated to the 12-bit profile.
    ///
    /// The lower nibble of every channel is cleared; no rounding.
    pub const fn quantized(&self) -> Self {
        Self::new(
            self.r & CHANNEL_MASK,
            self.g & CHANNEL_MASK,
            self.b & CHANNEL_MASK,
        )
    }

    /// Check whether this color is representable in the 12-bit profile.
    pub const fn is_quantized(&self) -> bool {
        (self.r | self.g | self.b) & !CHANNEL_MASK == 0
    }

    /// Perceptual brightness, `0.2126 R + 0.7152 G + 0.0722 B`, truncated.
    ///
    /// Evaluated in fixed point (weights scaled by 10 000, which sum to
    /// exactly 10 000), so a gray color maps to its own level.
    pub fn luma(&self) -> u8 {
        let weighted = 2126 * self.r as u32 + 7152 * self.g as u32 + 722 * self.b as u32;
        (weighted / 10_000) as u8
    }

    /// Luma truncated to 4 significant bits, as a nibble (0-15).
    pub fn luma_nibble(&self) -> u8 {
        self.luma() >> 4
    }
}

/// A row-major RGB image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    width: u32,
    height: u32,
    depth: PixelDepth,
    pixels: Vec<Color>,
}

impl Image {
    /// Create a black image of the given dimensions.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            depth,
            pixels: vec![Color::BLACK; count],
        }
    }

    /// Create a black image, reporting allocation failure instead of
    /// aborting.
    ///
    /// Used when the dimensions come from untrusted input such as a file
    /// header.
    pub fn try_new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Rgb12Error::invalid_image(format!("{}x{} overflows", width, height)))?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(count).map_err(|_| {
            Rgb12Error::invalid_image(format!("cannot allocate a {}x{} image", width, height))
        })?;
        pixels.resize(count, Color::BLACK);

        Ok(Self {
            width,
            height,
            depth,
            pixels,
        })
    }

    /// Create an image from row-major pixels.
    pub fn from_pixels(
        width: u32,
        height: u32,
        depth: PixelDepth,
        pixels: Vec<Color>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Rgb12Error::invalid_image(format!(
                "{}x{} image needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            depth,
            pixels,
        })
    }

    /// Create a 24-bit image from interleaved `RGBRGB...` bytes.
    pub fn from_rgb24(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(Rgb12Error::invalid_image(format!(
                "{}x{} RGB24 data needs {} bytes, got {}",
                width,
                height,
                expected,
                bytes.len()
            )));
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Color::new(c[0], c[1], c[2]))
            .collect();
        Self::from_pixels(width, height, PixelDepth::Rgb24, pixels)
    }

    /// Interleaved `RGBRGB...` bytes of this image.
    pub fn to_rgb24(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.channels()).collect()
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage profile.
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Check whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`; returns `false` when out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Packed 12-bit colors in row-major order.
    pub fn packed(&self) -> impl Iterator<Item = u16> + '_ {
        self.pixels.iter().map(Color::packed)
    }

    /// Channel nibbles in stream order: R, G, B of pixel 0, then pixel 1, ...
    pub fn nibbles(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(Color::nibbles)
    }

    /// Copy of this image converted to the 12-bit profile.
    ///
    /// Already 12-bit images are returned unchanged; otherwise every channel
    /// is truncated to its upper nibble.
    pub fn quantized(&self) -> Self {
        if self.depth == PixelDepth::Rgb12 {
            return self.clone();
        }

        Self {
            width: self.width,
            height: self.height,
            depth: PixelDepth::Rgb12,
            pixels: self.pixels.iter().map(Color::quantized).collect(),
        }
    }

    /// Check whether every pixel is representable in the 12-bit profile.
    pub fn is_quantized(&self) -> bool {
        self.pixels.iter().all(Color::is_quantized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        let color = Color::new(0xA0, 0xB0, 0xC0);
        assert_eq!(color.packed(), 0xABC);
        assert_eq!(Color::from_packed(0xABC), color);
        assert_eq!(Color::new(0xAF, 0xB1, 0xC7).packed(), 0xABC);
        assert!(Color::from_packed(MAX_PACKED).is_quantized());
    }

    #[test]
    fn test_quantize_truncates() {
        let color = Color::new(0xFF, 0x1F, 0x0F);
        assert_eq!(color.quantized(), Color::new(0xF0, 0x10, 0x00));
        assert!(!color.is_quantized());
    }

    #[test]
    fn test_luma() {
        assert_eq!(Color::BLACK.luma(), 0);
        assert_eq!(Color::new(0xF0, 0, 0).luma(), 51);
        assert_eq!(Color::new(0, 0xF0, 0).luma(), 171);
        assert_eq!(Color::new(0, 0, 0xF0).luma(), 17);
        assert_eq!(Color::new(0xF0, 0, 0).luma_nibble(), 0x3);

        // Gray levels are fixed points.
        for level in (0..=0xF0).step_by(0x10) {
            assert_eq!(Color::gray(level).luma(), level);
        }
    }

    #[test]
    fn test_try_new() {
        let image = Image::try_new(4, 3, PixelDepth::Rgb12).unwrap();
        assert_eq!(image, Image::new(4, 3, PixelDepth::Rgb12));
        assert!(Image::try_new(u32::MAX, u32::MAX, PixelDepth::Rgb12).is_err());
    }

    #[test]
    fn test_image_row_major() {
        let mut image = Image::new(3, 2, PixelDepth::Rgb12);
        assert!(image.set_pixel(2, 1, Color::from_packed(0x123)));
        assert!(!image.set_pixel(3, 0, Color::BLACK));
        assert_eq!(image.pixels()[5].packed(), 0x123);
        assert_eq!(image.pixel(2, 1), Some(Color::from_packed(0x123)));
        assert_eq!(image.pixel(0, 2), None);
    }

    #[test]
    fn test_nibble_stream_order() {
        let image = Image::from_pixels(
            2,
            1,
            PixelDepth::Rgb12,
            vec![Color::from_packed(0x123), Color::from_packed(0x456)],
        )
        .unwrap();
        assert_eq!(image.nibbles().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rgb24_conversion() {
        let bytes = [0x12, 0x34, 0x56, 0xFF, 0x80, 0x01];
        let image = Image::from_rgb24(2, 1, &bytes).unwrap();
        assert_eq!(image.depth(), PixelDepth::Rgb24);
        assert_eq!(image.to_rgb24(), bytes.to_vec());

        let quantized = image.quantized();
        assert_eq!(quantized.depth(), PixelDepth::Rgb12);
        assert_eq!(quantized.to_rgb24(), vec![0x10, 0x30, 0x50, 0xF0, 0x80, 0x00]);
        assert!(quantized.is_quantized());

        assert!(Image::from_rgb24(2, 2, &bytes).is_err());
    }
}
