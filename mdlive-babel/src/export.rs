//! Export pipeline.
//!
//! Provides the single entry point for turning markdown source into a
//! downloadable artifact. This module bridges the format registry and file
//! I/O: callers pick a format, get back bytes plus a suggested filename and
//! MIME type, and may write the artifact to disk atomically.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::ExportError;
use crate::registry::FormatRegistry;
use crate::storage::write_atomic;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Markdown,
    Html,
    Text,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Markdown,
        ExportFormat::Html,
        ExportFormat::Text,
        ExportFormat::Pdf,
    ];

    /// Registry name of the format.
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
            ExportFormat::Text => "text",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" | "htm" => Ok(ExportFormat::Html),
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// What to export.
///
/// ```ignore
/// let request = ExportRequest::new(ExportFormat::Pdf, source)
///     .with_option("font-size", "12");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub source_text: String,
    /// Format-specific options (e.g., page size for PDF, title for HTML).
    pub options: HashMap<String, String>,
}

impl ExportRequest {
    pub fn new(format: ExportFormat, source_text: impl Into<String>) -> Self {
        Self {
            format,
            source_text: source_text.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// Export output: bytes plus the metadata needed to offer it as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub suggested_filename: String,
    pub mime_type: String,
}

impl Artifact {
    /// The bytes as UTF-8, if they are.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Write the artifact to `path` atomically.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        write_atomic(path.as_ref(), &self.bytes)
    }
}

/// Encode a request with the default formats.
pub fn encode(request: ExportRequest) -> Result<Artifact, ExportError> {
    encode_with(&FormatRegistry::with_defaults(), &request)
}

/// Encode a request with the formats of `registry`.
pub fn encode_with(
    registry: &FormatRegistry,
    request: &ExportRequest,
) -> Result<Artifact, ExportError> {
    let name = request.format.name();
    let format = registry
        .get(name)
        .map_err(|_| ExportError::UnknownFormat(name.to_string()))?;

    let serialized = format
        .serialize_with_options(&request.source_text, &request.options)
        .map_err(|err| ExportError::encoding(name, err))?;

    let artifact = Artifact {
        bytes: serialized.into_bytes(),
        suggested_filename: format.suggested_filename(),
        mime_type: format.mime_type().to_string(),
    };
    tracing::debug!(
        format = name,
        bytes = artifact.bytes.len(),
        "exported document"
    );
    Ok(artifact)
}

/// Export `source_text` as the format named `format` (`md`, `html`, `txt`, `pdf`, ...).
pub fn export_document(source_text: &str, format: &str) -> Result<Artifact, ExportError> {
    let format = format.parse::<ExportFormat>()?;
    encode(ExportRequest::new(format, source_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "# Title\n\nParagraph text.\n";

    #[test]
    fn test_format_names_and_aliases() {
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!(
            "docx".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat("docx".to_string()))
        );
    }

    #[test]
    fn test_markdown_and_text_are_identity() {
        for format in ["markdown", "text"] {
            let artifact = export_document(SAMPLE, format).unwrap();
            assert_eq!(artifact.bytes, SAMPLE.as_bytes());
        }
    }

    #[test]
    fn test_artifact_metadata() {
        let cases = [
            ("md", "markdown_preview.md", "text/markdown"),
            ("html", "markdown_preview.html", "text/html"),
            ("txt", "markdown_preview.txt", "text/plain"),
            ("pdf", "document.pdf", "application/pdf"),
        ];
        for (format, filename, mime) in cases {
            let artifact = export_document("", format).unwrap();
            assert_eq!(artifact.suggested_filename, filename);
            assert_eq!(artifact.mime_type, mime);
        }
        assert!(export_document("", "pdf").unwrap().bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_html_export_contains_content() {
        let artifact = export_document(SAMPLE, "html").unwrap();
        let html = artifact.text().unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("Paragraph text."));
    }

    #[test]
    fn test_encoding_failure_names_format() {
        let request = ExportRequest::new(ExportFormat::Pdf, SAMPLE).with_option("margin", "-");
        match encode(request) {
            Err(ExportError::Encoding { format, source }) => {
                assert_eq!(format, "pdf");
                assert!(matches!(source, FormatError::InvalidOption { .. }));
            }
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_format_in_registry() {
        let registry = FormatRegistry::new();
        let request = ExportRequest::new(ExportFormat::Html, SAMPLE);
        assert_eq!(
            encode_with(&registry, &request),
            Err(ExportError::UnknownFormat("html".to_string()))
        );
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let artifact = export_document(SAMPLE, "pdf").unwrap();
        artifact.write_to(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), artifact.bytes);
    }
}
