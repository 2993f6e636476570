//! Import command implementation.

use rgb12_container::{Algorithm, ImageHandler, Rgb12Container};
use rgb12_core::Image;
use std::path::Path;

pub fn cmd_import(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    algorithm: Algorithm,
    grayscale: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    log::info!("read {} bytes of RGB24 from {}", bytes.len(), input.display());

    let image = Image::from_rgb24(width, height, &bytes)?;
    let mut container = Rgb12Container::from_image(image, algorithm);
    if grayscale {
        container.to_grayscale();
    }

    let path = container.save(output)?;
    let size = std::fs::metadata(&path)?.len();
    println!(
        "Wrote {} ({}x{}, {}, {} bytes)",
        path.display(),
        width,
        height,
        container.algorithm(),
        size
    );

    Ok(())
}
