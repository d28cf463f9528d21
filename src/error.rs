//! Error types for prcrust library

use std::io;
use thiserror::Error;

/// Broad classification of a [`PrcError`].
///
/// The writer is a deterministic single-pass encoder, so none of these are
/// retryable without changing the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected where it was constructed or added
    Validation,
    /// An operation was called out of order
    State,
    /// Output, compression, or format-limit failure
    Io,
}

/// Main error type for prcrust operations
#[derive(Debug, Error)]
pub enum PrcError {
    /// IO error occurred while writing the output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error during section compression
    #[error("Compression error: {0}")]
    Compression(String),

    /// Entity geometry failed validation
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Colour with a non-finite channel
    #[error("Invalid colour: {0}")]
    InvalidColour(String),

    /// Writer configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Entity routed to a file structure that does not exist
    #[error("File structure index {index} out of range (document has {count})")]
    StructureIndexOutOfRange { index: u32, count: u32 },

    /// The identifier source kept producing an identifier already in use
    #[error("Duplicate file structure identifier: {0}")]
    DuplicateIdentifier(String),

    /// Size or byte access on a section that has not been prepared
    #[error("Section not prepared: {0}")]
    NotPrepared(String),

    /// Operation not allowed in the current lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A length or offset does not fit the format's 32-bit fields
    #[error("Size overflow: {0}")]
    SizeOverflow(String),

    /// Bytes emitted differ from the measured size
    #[error("Size mismatch: expected {expected} bytes, wrote {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}

impl PrcError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrcError::InvalidGeometry(_)
            | PrcError::InvalidColour(_)
            | PrcError::InvalidConfiguration(_)
            | PrcError::StructureIndexOutOfRange { .. }
            | PrcError::DuplicateIdentifier(_) => ErrorKind::Validation,
            PrcError::NotPrepared(_) | PrcError::InvalidState(_) => ErrorKind::State,
            PrcError::Io(_)
            | PrcError::Compression(_)
            | PrcError::SizeOverflow(_)
            | PrcError::SizeMismatch { .. } => ErrorKind::Io,
        }
    }
}

/// Result type alias for prcrust operations
pub type Result<T> = std::result::Result<T, PrcError>;

/// Convert a buffer length into the format's 32-bit length field.
pub(crate) fn to_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| PrcError::SizeOverflow(format!("{what} of {value} bytes exceeds u32")))
}
