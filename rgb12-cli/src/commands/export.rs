//! Export command implementation.

use rgb12_container::{ImageHandler, Rgb12Container};
use std::path::Path;

pub fn cmd_export(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut container = Rgb12Container::new();
    container.load(input)?;

    let image = container.into_image();
    let bytes = image.to_rgb24();
    std::fs::write(output, &bytes)?;

    println!(
        "Wrote {} ({}x{}, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(())
}
