//! Error types for RGB12 operations.
//!
//! Every codec and container failure is reported through [`Rgb12Error`].
//! A failed call aborts as a whole; there is no partial-success result.

use std::io;
use thiserror::Error;

/// The main error type for RGB12 operations.
#[derive(Debug, Error)]
pub enum Rgb12Error {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed header or payload framing.
    #[error("Format error: {message}")]
    Format {
        /// Description of what was malformed.
        message: String,
    },

    /// Algorithm id outside the known set.
    #[error("Unknown algorithm id: {0}")]
    UnknownAlgorithm(u8),

    /// A bit or byte source ran dry before the expected number of symbols
    /// was produced.
    #[error("Out of data: source exhausted after {consumed} units, {expected} expected")]
    OutOfData {
        /// Units (bits, nibbles or bytes) the decoder needed in total.
        expected: u64,
        /// Units actually consumed before exhaustion.
        consumed: u64,
    },

    /// Image unusable for the requested operation.
    #[error("Invalid image: {message}")]
    InvalidImage {
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for RGB12 operations.
pub type Result<T> = std::result::Result<T, Rgb12Error>;

impl Rgb12Error {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an unknown algorithm error.
    pub fn unknown_algorithm(id: u8) -> Self {
        Self::UnknownAlgorithm(id)
    }

    /// Create an out-of-data error.
    pub fn out_of_data(expected: u64, consumed: u64) -> Self {
        Self::OutOfData { expected, consumed }
    }

    /// Create an invalid image error.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    /// Map an `UnexpectedEof` I/O error to a format error with `context`,
    /// leaving every other error untouched.
    ///
    /// Used while parsing fixed-size framing, where a short read means the
    /// file is truncated rather than that the device failed.
    pub fn eof_as_format(self, context: &str) -> Self {
        match self {
            Self::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Self::format(format!("unexpected end of {}", context))
            }
            other => other,
        }
    }

    /// Check whether this error is a [`Rgb12Error::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Check whether this error is a [`Rgb12Error::OutOfData`].
    pub fn is_out_of_data(&self) -> bool {
        matches!(self, Self::OutOfData { .. })
    }
}
