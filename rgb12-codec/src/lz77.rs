//! LZ77 over the channel nibble stream.
//!
//! The image is viewed as `3 * width * height` nibbles (R, G, B of each
//! pixel in row-major order). Each payload byte is one token:
//!
//! ```text
//! literal: 0000 nnnn          n = nibble
//! match:   1lll oooo          l = length - 2 (2..=9), o = window slot (0..=15)
//! ```
//!
//! The first byte is always a literal seed. Both sides then start from a
//! 17-slot search window filled with the seed nibble, so early matches can
//! reference it before any real history exists. Slot 0 is the oldest
//! nibble. A match may run past the newest slot into nibbles it produces
//! itself; the decoder copies one nibble at a time, which makes such
//! overlapping copies well defined.

use crate::nibble::{NibbleSink, channel_nibbles};
use rgb12_core::error::{Result, Rgb12Error};
use rgb12_core::image::Image;
use rgb12_core::window::NibbleWindow;
use rgb12_core::{Algorithm, PixelCodec};
use std::io::{Read, Write};

/// Shortest match worth a coded byte.
pub const MIN_MATCH: usize = 2;

/// Longest match a coded byte can express.
pub const MAX_MATCH: usize = 9;

/// Highest window slot a coded byte can address.
pub const MAX_OFFSET: u8 = 0x0F;

/// Flag bit marking a coded (match) byte.
const MATCH_FLAG: u8 = 0x80;

/// LZ77 token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz77Token {
    /// A single nibble.
    Literal(u8),
    /// A copy out of the search window.
    Match {
        /// Number of nibbles to copy (2-9).
        length: u8,
        /// Window slot the copy starts at (0 = oldest).
        offset: u8,
    },
}

impl Lz77Token {
    /// Encode this token as its payload byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Literal(nibble) => nibble & 0x0F,
            Self::Match { length, offset } => {
                MATCH_FLAG | (length - MIN_MATCH as u8) << 4 | (offset & MAX_OFFSET)
            }
        }
    }

    /// Decode a payload byte.
    pub fn from_byte(byte: u8) -> Self {
        if byte & MATCH_FLAG == 0 {
            Self::Literal(byte & 0x0F)
        } else {
            Self::Match {
                length: ((byte >> 4) & 0x07) + MIN_MATCH as u8,
                offset: byte & MAX_OFFSET,
            }
        }
    }

    /// Number of nibbles this token produces.
    pub fn nibble_count(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Match { length, .. } => *length as usize,
        }
    }

    /// Check whether this is a match token.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

/// Tokenizer over a nibble stream.
///
/// Yields the literal seed first, then one token per step until the
/// stream and the lookahead window are both exhausted.
#[derive(Debug)]
pub struct Lz77Encoder<I: Iterator<Item = u8>> {
    stream: I,
    seed: Option<u8>,
    search: NibbleWindow,
    lookahead: NibbleWindow,
}

impl<I: Iterator<Item = u8>> Lz77Encoder<I> {
    /// Create an encoder pulling nibbles from `stream`.
    pub fn new(stream: impl IntoIterator<IntoIter = I>) -> Self {
        let mut stream = stream.into_iter();
        let seed = stream.next().map(|n| n & 0x0F);

        Self {
            stream,
            seed,
            search: NibbleWindow::search(seed.unwrap_or(0)),
            lookahead: NibbleWindow::lookahead(),
        }
    }

    fn refill(&mut self) {
        while !self.lookahead.is_full() {
            match self.stream.next() {
                Some(nibble) => {
                    self.lookahead.try_push(nibble);
                }
                None => break,
            }
        }
    }

    /// Nibble `k` positions after window slot `offset`, reading on into
    /// the lookahead window past the newest slot.
    fn source_at(&self, offset: usize, k: usize) -> Option<u8> {
        let pos = offset + k;
        match pos.checked_sub(self.search.len()) {
            Some(ahead) => self.lookahead.get(ahead),
            None => self.search.get(pos),
        }
    }

    /// Longest match for the lookahead prefix, most recent slot on ties.
    fn find_match(&self) -> (usize, u8) {
        let max_len = self.lookahead.len().min(MAX_MATCH);
        let mut best_len = 0;
        let mut best_offset = 0;

        for offset in (0..=MAX_OFFSET as usize).rev() {
            let mut len = 0;
            while len < max_len && self.source_at(offset, len) == self.lookahead.get(len) {
                len += 1;
            }

            if len > best_len {
                best_len = len;
                best_offset = offset as u8;
                if len == max_len {
                    break;
                }
            }
        }

        (best_len, best_offset)
    }
}

impl<I: Iterator<Item = u8>> Iterator for Lz77Encoder<I> {
    type Item = Lz77Token;

    fn next(&mut self) -> Option<Lz77Token> {
        if let Some(seed) = self.seed.take() {
            return Some(Lz77Token::Literal(seed));
        }

        self.refill();
        let first = self.lookahead.get(0)?;

        let (len, offset) = self.find_match();
        let token = if len < MIN_MATCH {
            Lz77Token::Literal(first)
        } else {
            Lz77Token::Match {
                length: len as u8,
                offset,
            }
        };

        for slot in 0..token.nibble_count() {
            if let Some(nibble) = self.lookahead.get(slot) {
                self.search.slide(nibble);
            }
        }
        self.lookahead.consume(token.nibble_count());

        Some(token)
    }
}

/// LZ77 payload codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz77Codec;

impl Lz77Codec {
    /// Create a new LZ77 codec.
    pub fn new() -> Self {
        Self
    }

    /// Tokens the encoder produces for `image`.
    pub fn tokens(image: &Image) -> Vec<Lz77Token> {
        Lz77Encoder::new(image.nibbles()).collect()
    }
}

impl PixelCodec for Lz77Codec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lz77
    }

    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()> {
        let mut payload = Vec::new();
        let mut matches = 0usize;

        for token in Lz77Encoder::new(image.nibbles()) {
            matches += token.is_match() as usize;
            payload.push(token.to_byte());
        }

        log::debug!(
            "LZ77: {} nibbles -> {} bytes ({} matches)",
            channel_nibbles(image),
            payload.len(),
            matches
        );

        sink.write_all(&payload)?;
        Ok(())
    }

    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()> {
        if image.is_empty() {
            return Ok(());
        }

        let mut payload = Vec::new();
        source.read_to_end(&mut payload)?;

        let mut sink = NibbleSink::new(image);
        let mut bytes = payload.into_iter();

        let seed = match bytes.next().map(Lz77Token::from_byte) {
            Some(Lz77Token::Literal(seed)) => seed,
            Some(Lz77Token::Match { .. }) => {
                return Err(Rgb12Error::format("LZ77 payload must start with a literal"));
            }
            None => return Err(Rgb12Error::out_of_data(sink.expected(), 0)),
        };
        sink.push(seed)?;
        let mut window = NibbleWindow::search(seed);

        while !sink.is_complete() {
            let Some(byte) = bytes.next() else {
                return Err(Rgb12Error::out_of_data(sink.expected(), sink.produced()));
            };

            match Lz77Token::from_byte(byte) {
                Lz77Token::Literal(nibble) => {
                    window.slide(nibble);
                    sink.push(nibble)?;
                }
                Lz77Token::Match { length, offset } => {
                    if sink.produced() + length as u64 > sink.expected() {
                        return Err(Rgb12Error::format(format!(
                            "LZ77 match of {} nibbles overruns the image at nibble {}",
                            length,
                            sink.produced()
                        )));
                    }

                    let from = window.start() + offset as u64;
                    for i in 0..length as u64 {
                        let nibble = window.at(from + i).ok_or_else(|| {
                            Rgb12Error::format(format!("LZ77 offset {} outside window", offset))
                        })?;
                        window.slide(nibble);
                        sink.push(nibble)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb12_core::image::{Color, PixelDepth};

    fn image_of(width: u32, height: u32, packed: &[u16]) -> Image {
        let pixels = packed.iter().map(|&p| Color::from_packed(p)).collect();
        Image::from_pixels(width, height, PixelDepth::Rgb12, pixels).unwrap()
    }

    #[test]
    fn test_token_bytes() {
        assert_eq!(Lz77Token::Literal(0xF).to_byte(), 0x0F);
        assert_eq!(Lz77Token::from_byte(0x0F), Lz77Token::Literal(0xF));

        let token = Lz77Token::Match {
            length: 9,
            offset: 15,
        };
        assert_eq!(token.to_byte(), 0xFF);
        assert_eq!(Lz77Token::from_byte(0xFF), token);
        assert_eq!(
            Lz77Token::from_byte(0x80),
            Lz77Token::Match {
                length: 2,
                offset: 0
            }
        );
    }

    #[test]
    fn test_literal_nibbles_roundtrip() {
        for nibble in 0..16 {
            let byte = Lz77Token::Literal(nibble).to_byte();
            assert_eq!(byte & MATCH_FLAG, 0);
            assert_eq!(Lz77Token::from_byte(byte), Lz77Token::Literal(nibble));
        }
    }

    #[test]
    fn test_seed_run_matches_window() {
        // Every nibble equals the seed, so the first real token copies the
        // longest run straight out of the seeded window.
        let image = image_of(2, 2, &[0x555; 4]);
        let tokens = Lz77Codec::tokens(&image);
        assert_eq!(tokens[0], Lz77Token::Literal(5));
        assert_eq!(
            tokens[1],
            Lz77Token::Match {
                length: 9,
                offset: 15
            }
        );
        assert_eq!(tokens.iter().map(Lz77Token::nibble_count).sum::<usize>(), 12);
    }

    #[test]
    fn test_single_nibble_is_literal() {
        let image = image_of(1, 1, &[0x1F2]);
        let tokens = Lz77Codec::tokens(&image);
        assert_eq!(
            tokens,
            vec![
                Lz77Token::Literal(1),
                Lz77Token::Literal(0xF),
                Lz77Token::Literal(2)
            ]
        );
    }

    #[test]
    fn test_empty_image() {
        let image = Image::new(0, 0, PixelDepth::Rgb12);
        let codec = Lz77Codec::new();
        assert!(codec.encode_to_vec(&image).unwrap().is_empty());
        assert!(codec.decode_from_slice(&[], 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_decode_errors() {
        let codec = Lz77Codec::new();

        let err = codec.decode_from_slice(&[], 1, 1).unwrap_err();
        assert!(err.is_out_of_data());

        let err = codec.decode_from_slice(&[0x80], 1, 1).unwrap_err();
        assert!(err.is_format());

        // Seed plus a 9-nibble match on a 1x1 image overruns 3 nibbles.
        let err = codec.decode_from_slice(&[0x01, 0xFF], 1, 1).unwrap_err();
        assert!(err.is_format());

        let err = codec.decode_from_slice(&[0x01, 0x02], 1, 1).unwrap_err();
        assert!(matches!(
            err,
            Rgb12Error::OutOfData {
                expected: 3,
                consumed: 2
            }
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let codec = Lz77Codec::new();
        let image = codec
            .decode_from_slice(&[0x01, 0x02, 0x03, 0x7F, 0xFF], 1, 1)
            .unwrap();
        assert_eq!(image.pixels()[0].packed(), 0x123);
    }
}
