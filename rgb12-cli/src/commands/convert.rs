//! Convert command implementation.

use rgb12_container::{Algorithm, FileHeader, ImageHandler, Rgb12Container};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn cmd_convert(
    input: &Path,
    output: &Path,
    algorithm: Option<Algorithm>,
    grayscale: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = FileHeader::read_from(&mut BufReader::new(File::open(input)?))?;
    let algorithm = algorithm.unwrap_or(source.algorithm);

    let mut container = Rgb12Container::new();
    container.load(input)?;
    container.set_algorithm(algorithm);
    if grayscale {
        container.to_grayscale();
    }

    log::info!(
        "converting {} from {} to {}",
        input.display(),
        source.algorithm,
        container.algorithm()
    );

    let path = container.save(output)?;
    let input_size = std::fs::metadata(input)?.len();
    let output_size = std::fs::metadata(&path)?.len();

    println!(
        "{} ({}, {} bytes) -> {} ({}, {} bytes)",
        input.display(),
        source.algorithm,
        input_size,
        path.display(),
        container.algorithm(),
        output_size
    );

    Ok(())
}
