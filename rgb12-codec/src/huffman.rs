//! Huffman coding over packed 12-bit colors.
//!
//! The alphabet is the set of distinct packed colors in the image. The
//! payload starts with the frequency table in first-seen order; the decoder
//! replays the same deterministic tree build over that table, so no code
//! lengths are transmitted.
//!
//! ```text
//! [u64 distinct][distinct x (u32 color, u32 count)][MSB-first codes, zero padded]
//! ```
//!
//! All integers are little-endian.

use rgb12_core::bitstream::{BitReader, BitWriter};
use rgb12_core::error::{Result, Rgb12Error};
use rgb12_core::image::{Color, Image, MAX_PACKED};
use rgb12_core::{Algorithm, PixelCodec};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::io::{Read, Write};

/// Largest alphabet: every 12-bit color.
pub const MAX_DISTINCT_COLORS: u64 = MAX_PACKED as u64 + 1;

/// Maximum supported code length in bits.
pub const MAX_CODE_LENGTH: u8 = 64;

/// Per-color pixel counts in first-seen scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(u16, u32)>,
    index: HashMap<u16, usize>,
}

impl FrequencyTable {
    /// Count the packed colors of `image` in row-major order.
    pub fn from_image(image: &Image) -> Result<Self> {
        let mut table = Self::default();

        for color in image.packed() {
            match table.index.get(&color) {
                Some(&i) => {
                    let count = &mut table.entries[i].1;
                    *count = count.checked_add(1).ok_or_else(|| {
                        Rgb12Error::invalid_image(format!(
                            "color {:#05x} occurs more than {} times",
                            color,
                            u32::MAX
                        ))
                    })?;
                }
                None => {
                    table.index.insert(color, table.entries.len());
                    table.entries.push((color, 1));
                }
            }
        }

        Ok(table)
    }

    /// Build a table from `(color, count)` pairs, keeping their order.
    ///
    /// Fails on a color outside 12 bits, a zero count, or a repeated color.
    pub fn from_entries(entries: Vec<(u16, u32)>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (i, &(color, count)) in entries.iter().enumerate() {
            if color > MAX_PACKED {
                return Err(Rgb12Error::format(format!(
                    "Huffman color {:#x} exceeds 12 bits",
                    color
                )));
            }
            if count == 0 {
                return Err(Rgb12Error::format(format!(
                    "Huffman color {:#05x} has a zero count",
                    color
                )));
            }
            if index.insert(color, i).is_some() {
                return Err(Rgb12Error::format(format!(
                    "Huffman color {:#05x} listed twice",
                    color
                )));
            }
        }

        Ok(Self { entries, index })
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[(u16, u32)] {
        &self.entries
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no colors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count recorded for `color`.
    pub fn count(&self, color: u16) -> Option<u32> {
        self.index.get(&color).map(|&i| self.entries[i].1)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count as u64).sum()
    }

    /// Serialize the table header.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&(self.entries.len() as u64).to_le_bytes())?;
        for &(color, count) in &self.entries {
            writer.write_all(&(color as u32).to_le_bytes())?;
            writer.write_all(&count.to_le_bytes())?;
        }
        Ok(())
    }

    /// Parse a table header whose counts must sum to `expected_pixels`.
    pub fn read_from<R: Read>(reader: &mut R, expected_pixels: u64) -> Result<Self> {
        let distinct = read_u64_le(reader)?;

        if distinct == 0 && expected_pixels > 0 {
            return Err(Rgb12Error::format(
                "Huffman header lists no colors for a non-empty image",
            ));
        }
        if distinct > MAX_DISTINCT_COLORS {
            return Err(Rgb12Error::format(format!(
                "Huffman header lists {} colors, at most {} exist",
                distinct, MAX_DISTINCT_COLORS
            )));
        }

        let mut entries = Vec::with_capacity(distinct as usize);
        for _ in 0..distinct {
            let color = read_u32_le(reader)?;
            let count = read_u32_le(reader)?;
            let color = u16::try_from(color)
                .ok()
                .filter(|&c| c <= MAX_PACKED)
                .ok_or_else(|| {
                    Rgb12Error::format(format!("Huffman color {:#x} exceeds 12 bits", color))
                })?;
            entries.push((color, count));
        }

        let table = Self::from_entries(entries)?;
        if table.total() != expected_pixels {
            return Err(Rgb12Error::format(format!(
                "Huffman counts sum to {}, image has {} pixels",
                table.total(),
                expected_pixels
            )));
        }

        Ok(table)
    }
}

fn read_u64_le<R: Read>(reader: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader
        .read_exact(&mut buf)
        .map_err(|e| Rgb12Error::from(e).eof_as_format("Huffman header"))?;
    Ok(u64::from_le_bytes(buf))
}

fn read_u32_le<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| Rgb12Error::from(e).eof_as_format("Huffman header"))?;
    Ok(u32::from_le_bytes(buf))
}

/// A node in the tree arena.
#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf { color: u16, weight: u64 },
    /// Zero-weight sibling of a lone color.
    Placeholder,
    Internal { weight: u64, left: usize, right: usize },
}

impl Node {
    fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
            Node::Placeholder => 0,
        }
    }
}

/// Huffman tree built from a [`FrequencyTable`].
///
/// Nodes live in an arena and refer to their children by index. Arena
/// position doubles as the tie-break sequence: among equal weights, the
/// node created first is combined first, and the first node taken becomes
/// the left child.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Rgb12Error::format(
                "cannot build a Huffman tree without colors",
            ));
        }

        let mut nodes: Vec<Node> = table
            .entries()
            .iter()
            .map(|&(color, count)| Node::Leaf {
                color,
                weight: count as u64,
            })
            .collect();

        if nodes.len() == 1 {
            let weight = nodes[0].weight();
            nodes.push(Node::Placeholder);
            nodes.push(Node::Internal {
                weight,
                left: 0,
                right: 1,
            });
            return Ok(Self { nodes, root: 2 });
        }

        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| Reverse((node.weight(), i)))
            .collect();

        while heap.len() > 1 {
            let (Some(Reverse((wl, left))), Some(Reverse((wr, right)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let weight = wl + wr;
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, nodes.len() - 1)));
        }

        let root = nodes.len() - 1;
        Ok(Self { nodes, root })
    }

    /// Total weight at the root.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Generate the code table by walking the tree.
    pub fn codes(&self) -> Result<CodeTable> {
        let mut codes = Vec::new();
        let mut stack = vec![(self.root, 0u64, 0u8)];

        while let Some((index, bits, len)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf { color, .. } => codes.push(Code { color, bits, len }),
                Node::Placeholder => {}
                Node::Internal { left, right, .. } => {
                    if len >= MAX_CODE_LENGTH {
                        return Err(Rgb12Error::format(format!(
                            "Huffman tree deeper than {} bits",
                            MAX_CODE_LENGTH
                        )));
                    }
                    stack.push((right, bits << 1 | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
            }
        }

        Ok(CodeTable::new(codes))
    }
}

/// A color and its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// Packed color.
    pub color: u16,
    /// Code bits, right aligned; the first bit sent is bit `len - 1`.
    pub bits: u64,
    /// Code length in bits (1-64).
    pub len: u8,
}

impl Code {
    /// Check whether this code is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for shift in (0..self.len).rev() {
            f.write_str(if (self.bits >> shift) & 1 == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes sorted by `(len, bits)`, with lookups for both directions.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Code>,
    by_color: HashMap<u16, Code>,
    by_code: HashMap<(u8, u64), u16>,
    max_len: u8,
}

impl CodeTable {
    fn new(mut codes: Vec<Code>) -> Self {
        codes.sort_by_key(|c| (c.len, c.bits));

        let by_color = codes.iter().map(|&c| (c.color, c)).collect();
        let by_code = codes.iter().map(|c| ((c.len, c.bits), c.color)).collect();
        let max_len = codes.iter().map(|c| c.len).max().unwrap_or(0);

        Self {
            codes,
            by_color,
            by_code,
            max_len,
        }
    }

    /// All codes, shortest first.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Longest code length.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Code for `color`.
    pub fn code_for(&self, color: u16) -> Option<Code> {
        self.by_color.get(&color).copied()
    }

    /// Color whose code is exactly `len` bits equal to `bits`.
    pub fn color_for(&self, len: u8, bits: u64) -> Option<u16> {
        self.by_code.get(&(len, bits)).copied()
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.codes.iter().enumerate().all(|(i, a)| {
            self.codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

/// Huffman payload codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Create a new Huffman codec.
    pub fn new() -> Self {
        Self
    }
}

impl PixelCodec for HuffmanCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Huffman
    }

    fn encode<W: Write>(&self, sink: &mut W, image: &Image) -> Result<()> {
        let table = FrequencyTable::from_image(image)?;
        table.write_to(sink)?;

        if table.is_empty() {
            return Ok(());
        }

        let codes = HuffmanTree::build(&table)?.codes()?;
        log::debug!(
            "Huffman: {} colors, longest code {} bits",
            table.len(),
            codes.max_len()
        );

        let mut writer = BitWriter::new(sink);
        for color in image.packed() {
            let code = codes.code_for(color).ok_or_else(|| {
                Rgb12Error::format(format!("no Huffman code for color {:#05x}", color))
            })?;
            writer.write_code(code.bits, code.len)?;
        }
        writer.flush()?;

        Ok(())
    }

    fn decode<R: Read>(&self, source: &mut R, image: &mut Image) -> Result<()> {
        let expected = image.pixel_count() as u64;
        let table = FrequencyTable::read_from(source, expected)?;

        if expected == 0 {
            return Ok(());
        }

        let codes = HuffmanTree::build(&table)?.codes()?;
        let mut reader = BitReader::new(source)?;

        for pixel in image.pixels_mut() {
            let mut bits = 0u64;
            let mut len = 0u8;

            loop {
                bits = bits << 1 | reader.next_bit()? as u64;
                len += 1;

                if let Some(color) = codes.color_for(len, bits) {
                    *pixel = Color::from_packed(color);
                    break;
                }
                if len >= codes.max_len() {
                    return Err(Rgb12Error::format(format!(
                        "invalid Huffman code at bit {}",
                        reader.bits_read()
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb12_core::image::PixelDepth;
    use std::io::Cursor;

    fn image_of(width: u32, height: u32, packed: &[u16]) -> Image {
        let pixels = packed.iter().map(|&p| Color::from_packed(p)).collect();
        Image::from_pixels(width, height, PixelDepth::Rgb12, pixels).unwrap()
    }

    #[test]
    fn test_frequency_first_seen_order() {
        let image = image_of(5, 1, &[0x300, 0x100, 0x300, 0x200, 0x100]);
        let table = FrequencyTable::from_image(&image).unwrap();
        assert_eq!(table.entries(), &[(0x300, 2), (0x100, 2), (0x200, 1)]);
        assert_eq!(table.total(), 5);
        assert_eq!(table.count(0x200), Some(1));
    }

    #[test]
    fn test_single_color_gets_one_bit_code() {
        let table = FrequencyTable::from_entries(vec![(0xABC, 4)]).unwrap();
        let codes = HuffmanTree::build(&table).unwrap().codes().unwrap();
        assert_eq!(codes.codes().len(), 1);
        let code = codes.code_for(0xABC).unwrap();
        assert_eq!((code.bits, code.len), (0, 1));
    }

    #[test]
    fn test_tie_break_is_first_seen() {
        // Equal weights: the first two entries combine first, and the
        // first one popped sits on the left.
        let table = FrequencyTable::from_entries(vec![(0x001, 1), (0x002, 1), (0x003, 1)]).unwrap();
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.weight(), 3);

        let codes = tree.codes().unwrap();
        assert_eq!(codes.code_for(0x003).unwrap().to_string(), "0");
        assert_eq!(codes.code_for(0x001).unwrap().to_string(), "10");
        assert_eq!(codes.code_for(0x002).unwrap().to_string(), "11");
    }

    #[test]
    fn test_codes_sorted_and_prefix_free() {
        let table = FrequencyTable::from_entries(vec![
            (0x010, 40),
            (0x020, 3),
            (0x030, 9),
            (0x040, 1),
            (0x050, 17),
            (0x060, 2),
        ])
        .unwrap();
        let codes = HuffmanTree::build(&table).unwrap().codes().unwrap();
        assert!(codes.is_prefix_free());
        assert!(
            codes
                .codes()
                .windows(2)
                .all(|w| (w[0].len, w[0].bits) < (w[1].len, w[1].bits))
        );
        assert_eq!(codes.code_for(0x010).unwrap().len, 1);
    }

    #[test]
    fn test_header_layout() {
        let table = FrequencyTable::from_entries(vec![(0xABC, 4)]).unwrap();
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        assert_eq!(
            out,
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0xBC, 0x0A, 0, 0, 4, 0, 0, 0]
        );
    }

    #[test]
    fn test_read_rejects_bad_tables() {
        let header = |entries: &[(u32, u32)]| {
            let mut out = (entries.len() as u64).to_le_bytes().to_vec();
            for &(color, count) in entries {
                out.extend_from_slice(&color.to_le_bytes());
                out.extend_from_slice(&count.to_le_bytes());
            }
            out
        };

        let cases = [
            (header(&[]), 4),
            (header(&[(0x1000, 4)]), 4),
            (header(&[(0x001, 0), (0x002, 4)]), 4),
            (header(&[(0x001, 2), (0x001, 2)]), 4),
            (header(&[(0x001, 3)]), 4),
        ];
        for (bytes, pixels) in cases {
            let err = FrequencyTable::read_from(&mut Cursor::new(bytes), pixels).unwrap_err();
            assert!(err.is_format(), "{}", err);
        }

        let mut too_many = Cursor::new(5000u64.to_le_bytes().to_vec());
        assert!(
            FrequencyTable::read_from(&mut too_many, 5000)
                .unwrap_err()
                .is_format()
        );

        let mut truncated = Cursor::new(vec![1u8, 0, 0]);
        assert!(
            FrequencyTable::read_from(&mut truncated, 1)
                .unwrap_err()
                .is_format()
        );
    }

    #[test]
    fn test_roundtrip_two_colors() {
        let image = image_of(3, 2, &[0x000, 0xFFF, 0x000, 0xFFF, 0x000, 0x000]);
        let codec = HuffmanCodec::new();
        let encoded = codec.encode_to_vec(&image).unwrap();
        // header (8 + 2 * 8) + 6 one-bit codes
        assert_eq!(encoded.len(), 24 + 1);

        let decoded = codec.decode_from_slice(&encoded, 3, 2).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_out_of_data() {
        let image = image_of(4, 4, &[0x123; 16]);
        let codec = HuffmanCodec::new();
        let mut encoded = codec.encode_to_vec(&image).unwrap();
        encoded.pop();

        let err = codec.decode_from_slice(&encoded, 4, 4).unwrap_err();
        assert!(err.is_out_of_data());
    }
}
