//! Format trait definition
//!
//! This module defines the core Format trait that all export formats implement.
//! Every format consumes the raw markdown source; formats that need structure
//! (HTML) parse it themselves, formats that don't (markdown, text, PDF) work
//! on the literal text.

use crate::error::FormatError;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// File stem used for suggested filenames unless a format overrides it.
pub const DEFAULT_FILE_STEM: &str = "markdown_preview";

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedDocument {
    /// UTF-8 text output (e.g., markdown, HTML)
    Text(String),
    /// Binary output (e.g., PDF)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SerializedDocument::Text(text) => text.as_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, SerializedDocument::Binary(_))
    }
}

/// Trait for export formats
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn mime_type(&self) -> &str {
///         "text/plain"
///     }
///
///     fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
///         Ok(SerializedDocument::Text(source.to_uppercase()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html", "pdf")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Alternative names accepted by the registry (e.g., "md" for markdown)
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// The first extension is the one used for suggested filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// MIME type of the serialized output
    fn mime_type(&self) -> &str;

    /// Filename offered to the user when saving an export
    fn suggested_filename(&self) -> String {
        let extension = self
            .file_extensions()
            .first()
            .copied()
            .unwrap_or_else(|| self.name());
        format!("{DEFAULT_FILE_STEM}.{extension}")
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize the markdown source into this format
    fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError>;

    /// Serialize the markdown source, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which
    /// rejects any parameter it is given.
    fn serialize_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(source)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shout;

    impl Format for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn mime_type(&self) -> &str {
            "text/plain"
        }

        fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
            Ok(SerializedDocument::Text(source.to_uppercase()))
        }
    }

    #[test]
    fn suggested_filename_falls_back_to_name() {
        assert_eq!(Shout.suggested_filename(), "markdown_preview.shout");
    }

    #[test]
    fn default_parse_is_not_supported() {
        assert!(!Shout.supports_parsing());
        assert!(matches!(
            Shout.parse("x"),
            Err(FormatError::NotSupported(_))
        ));
    }

    #[test]
    fn options_are_rejected_by_default() {
        let mut options = HashMap::new();
        options.insert("anything".to_string(), "1".to_string());
        assert!(Shout.serialize_with_options("a", &options).is_err());
        assert_eq!(
            Shout.serialize_with_options("a", &HashMap::new()).unwrap(),
            SerializedDocument::Text("A".to_string())
        );
    }

    #[test]
    fn serialized_document_bytes() {
        let text = SerializedDocument::Text("hi".to_string());
        assert_eq!(text.as_bytes(), b"hi");
        assert!(!text.is_binary());
        let binary = SerializedDocument::Binary(vec![1, 2]);
        assert!(binary.is_binary());
        assert_eq!(binary.into_bytes(), vec![1, 2]);
    }
}
