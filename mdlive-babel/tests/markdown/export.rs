//! Export tests for Markdown and plain text (identity exports)

use crate::common::load_fixture;
use mdlive_babel::export_document;

#[test]
fn test_markdown_export_is_byte_identical() {
    let source = load_fixture("kitchensink.md");
    let artifact = export_document(&source, "markdown").unwrap();
    assert_eq!(artifact.bytes, source.as_bytes());
    assert_eq!(artifact.suggested_filename, "markdown_preview.md");
}

#[test]
fn test_text_export_decodes_to_source() {
    let source = load_fixture("kitchensink.md");
    let artifact = export_document(&source, "txt").unwrap();
    assert_eq!(artifact.text(), Some(source.as_str()));
    assert_eq!(artifact.mime_type, "text/plain");
}

#[test]
fn test_empty_source_exports() {
    for format in ["md", "text"] {
        let artifact = export_document("", format).unwrap();
        assert!(artifact.bytes.is_empty());
    }
}
