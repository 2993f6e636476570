//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use rgb12_container::FileHeader;
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Size of the same image stored as raw 24-bit RGB.
pub fn raw_size(header: &FileHeader) -> u64 {
    header.pixel_count() * 3
}

/// Space saved relative to raw 24-bit RGB, in percent.
pub fn space_savings(stored: u64, raw: u64) -> f64 {
    if raw == 0 {
        return 0.0;
    }
    (1.0 - stored as f64 / raw as f64) * 100.0
}

/// File name for progress and report lines.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
