//! Markdown format implementation
//!
//! Markdown is both the input of every pipeline and one of the export
//! targets. Exporting as markdown returns the source byte-for-byte.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for parsing, restricted to the CommonMark core.
//!
//! # Element Mapping Table
//!
//! | Markdown                 | Document node              | Notes                                  |
//! |--------------------------|----------------------------|----------------------------------------|
//! | `#` .. `######`, setext  | Heading                    | Level 1..6                             |
//! | Paragraph                | Paragraph                  | Empty paragraphs are dropped           |
//! | Fenced / indented code   | CodeFence                  | First info word → language             |
//! | `-` / `1.` lists         | List                       | One block sequence per item            |
//! | `>`                      | Quote                      |                                        |
//! | `---`, `***`             | ThematicBreak              |                                        |
//! | HTML block               | RawHtml                    | Passed through on HTML export          |
//! | `<script>`/`<style>` block | Paragraph of Text         | Escaped on HTML export                 |
//! | Inline HTML              | Text                       | Escaped on HTML export                 |
//! | Soft / hard line break   | Text("\n")                 |                                        |
//!
//! Emphasis follows CommonMark delimiter rules; unmatched markers stay literal.

pub mod parser;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::nodes::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown source"
    }

    fn aliases(&self) -> &[&str] {
        &["md"]
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn mime_type(&self) -> &str {
        "text/markdown"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parser::parse_markdown(source))
    }

    fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(source.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_is_identity() {
        let source = "# T\n\n*not* rewritten   \n\n\n";
        assert_eq!(
            MarkdownFormat.serialize(source).unwrap(),
            SerializedDocument::Text(source.to_string())
        );
    }

    #[test]
    fn test_metadata() {
        assert_eq!(MarkdownFormat.suggested_filename(), "markdown_preview.md");
        assert_eq!(MarkdownFormat.mime_type(), "text/markdown");
        assert!(MarkdownFormat.supports_parsing());
    }
}
