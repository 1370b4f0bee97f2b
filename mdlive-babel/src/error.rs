//! Error types for format, export and persistence operations

use std::io;
use thiserror::Error;

/// Errors that can occur inside a single format implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// A format option carried a value the format cannot use
    #[error("Invalid value '{value}' for option '{key}'")]
    InvalidOption { key: String, value: String },
    /// Operation not supported by the format
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Errors surfaced by the export entry point.
///
/// Encoding failures always carry the format that was requested so callers can
/// phrase their own message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),
    #[error("failed to export as {format}: {source}")]
    Encoding {
        format: String,
        #[source]
        source: FormatError,
    },
}

impl ExportError {
    pub fn encoding(format: impl Into<String>, source: FormatError) -> Self {
        ExportError::Encoding {
            format: format.into(),
            source,
        }
    }
}

/// Errors raised by a [`crate::storage::Persistence`] backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Rejected buffer edits. The buffer is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is out of bounds for a buffer of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset {0} does not fall on a character boundary")]
    NotCharBoundary(usize),
}
