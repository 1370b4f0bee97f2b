//! Plain-text format
//!
//! Text export is the markdown source unchanged, only labelled as
//! `text/plain` with a `.txt` filename.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};

/// Format implementation for plain text
pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Markdown source as plain text"
    }

    fn aliases(&self) -> &[&str] {
        &["txt"]
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &str {
        "text/plain"
    }

    fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(source.to_string()))
    }
}
