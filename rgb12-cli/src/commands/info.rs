//! Info command implementation.

use crate::utils::{raw_size, space_savings};
use rgb12_container::FileHeader;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON output for file information.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    width: u32,
    height: u32,
    algorithm: String,
    algorithm_id: u8,
    file_size: u64,
    payload_size: u64,
    raw_size: u64,
    savings: f64,
}

pub fn cmd_info(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let header = FileHeader::read_from(&mut BufReader::new(file))?;

    let payload_size = file_size.saturating_sub(FileHeader::encoded_len());
    let raw = raw_size(&header);
    let savings = space_savings(file_size, raw);

    if let Some(expected) = header.payload_len() {
        if expected != payload_size {
            log::warn!(
                "{}: payload is {} bytes, {} expected",
                path.display(),
                payload_size,
                expected
            );
        }
    }

    if json {
        let info = InfoJson {
            file: path.display().to_string(),
            width: header.width,
            height: header.height,
            algorithm: header.algorithm.to_string(),
            algorithm_id: header.algorithm.id(),
            file_size,
            payload_size,
            raw_size: raw,
            savings,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("RGB12 Information");
    println!("=================");
    println!("File: {}", path.display());
    println!("Dimensions: {}x{}", header.width, header.height);
    println!(
        "Algorithm: {} (id {})",
        header.algorithm,
        header.algorithm.id()
    );
    println!("Size: {} bytes", file_size);
    println!("Payload: {} bytes", payload_size);
    println!("Raw RGB24 size: {} bytes", raw);
    if raw > 0 {
        println!("Space savings: {:.1}%", savings);
    }

    Ok(())
}
