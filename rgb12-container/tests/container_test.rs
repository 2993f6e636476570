//! File-level tests for the `.rgb12` container.

use rgb12_container::{Algorithm, FileHeader, ImageHandler, Rgb12Container};
use rgb12_core::{Color, Image, PixelDepth, Rgb12Error};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Path for a temporary test file, without the `.rgb12` extension.
fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rgb12_container_test_{}", name))
}

/// Remove a temporary file.
fn remove_temp_file(path: &Path) {
    let _ = fs::remove_file(path);
}

fn checkerboard(width: u32, height: u32) -> Image {
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            if (x + y) % 2 == 0 {
                Color::from_packed(0x1A2)
            } else {
                Color::from_packed(0xE5D)
            }
        })
        .collect();
    Image::from_pixels(width, height, PixelDepth::Rgb12, pixels).expect("pixel count")
}

fn stored_bytes(image: Image, algorithm: Algorithm) -> Vec<u8> {
    let container = Rgb12Container::from_image(image, algorithm);
    let mut bytes = Vec::new();
    container
        .store(&mut bytes, container.image())
        .expect("store failed");
    bytes
}

#[test]
fn test_save_and_load_every_algorithm() {
    let image = checkerboard(7, 5);

    for algorithm in Algorithm::ALL {
        let container = Rgb12Container::from_image(image.clone(), algorithm);
        let path = container
            .save(temp_path(&format!("roundtrip_{}", algorithm)))
            .expect("save failed");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("rgb12"));

        let mut loaded = Rgb12Container::new();
        loaded.load(&path).expect("load failed");
        remove_temp_file(&path);

        if algorithm.is_color() {
            assert_eq!(loaded.image(), &image, "{}", algorithm);
        } else {
            let mut gray = Rgb12Container::from_image(image.clone(), algorithm);
            gray.to_grayscale();
            assert_eq!(loaded.image(), gray.image());
        }
    }
}

#[test]
fn test_save_keeps_existing_extension() {
    let container = Rgb12Container::from_image(checkerboard(2, 2), Algorithm::Lz77);
    let wanted = temp_path("named.rgb12");
    let path = container.save(&wanted).expect("save failed");
    assert_eq!(path, wanted);
    remove_temp_file(&path);
}

#[test]
fn test_save_rejects_empty_image() {
    let container = Rgb12Container::new();
    let err = container.save(temp_path("empty")).unwrap_err();
    assert!(matches!(err, Rgb12Error::InvalidImage { .. }));
}

#[test]
fn test_load_missing_file() {
    let mut container = Rgb12Container::new();
    let err = container.load(temp_path("does_not_exist.rgb12")).unwrap_err();
    assert!(matches!(err, Rgb12Error::Io(_)));
}

#[test]
fn test_grayscale_after_to_grayscale() {
    let mut container = Rgb12Container::from_image(checkerboard(3, 3), Algorithm::default());
    container.to_grayscale();
    assert_eq!(container.algorithm(), Algorithm::Grayscale);

    let bytes = stored_bytes(container.image().clone(), container.algorithm());
    // 23 header bytes + ceil(9 / 2) payload bytes
    assert_eq!(bytes.len(), 23 + 5);

    let mut reader = Rgb12Container::new();
    let image = reader.recover(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(&image, container.image());
}

#[test]
fn test_corrupted_tag() {
    let mut bytes = stored_bytes(checkerboard(2, 2), Algorithm::Huffman);
    bytes[10] ^= 0xFF;

    let err = Rgb12Container::new()
        .recover(&mut Cursor::new(bytes))
        .unwrap_err();
    assert!(err.is_format());
}

#[test]
fn test_unknown_algorithm_id() {
    let mut bytes = stored_bytes(checkerboard(2, 2), Algorithm::BitDensity);
    bytes[22] = 4;

    let err = Rgb12Container::new()
        .recover(&mut Cursor::new(bytes))
        .unwrap_err();
    assert!(matches!(err, Rgb12Error::UnknownAlgorithm(4)));
}

#[test]
fn test_truncated_payload() {
    for algorithm in [Algorithm::BitDensity, Algorithm::Huffman, Algorithm::Lz77] {
        let mut bytes = stored_bytes(checkerboard(8, 8), algorithm);
        bytes.truncate(bytes.len() - 2);

        let err = Rgb12Container::new()
            .recover(&mut Cursor::new(bytes))
            .unwrap_err();
        assert!(err.is_out_of_data(), "{}: {}", algorithm, err);
    }
}

#[test]
fn test_header_inspection() {
    let bytes = stored_bytes(checkerboard(6, 4), Algorithm::BitDensity);
    let header = FileHeader::read_from(&mut Cursor::new(&bytes)).unwrap();

    assert_eq!((header.width, header.height), (6, 4));
    assert_eq!(header.algorithm, Algorithm::BitDensity);
    assert_eq!(
        header.payload_len(),
        Some(bytes.len() as u64 - FileHeader::encoded_len())
    );
}
