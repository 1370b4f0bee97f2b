//! HTML format implementation
//!
//! Exports markdown as a standalone HTML5 document.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for serialization: the
//! document is built as an RcDom tree and html5ever takes care of escaping.
//!
//! # Element Mapping Table
//!
//! | Node            | HTML                                                         |
//! |-----------------|--------------------------------------------------------------|
//! | Heading         | `<h1>` .. `<h6>`                                             |
//! | Paragraph       | `<p>`                                                        |
//! | List            | `<ul>` / `<ol>` with `<li>` per item                         |
//! | Quote           | `<blockquote>`                                               |
//! | ThematicBreak   | `<hr>`                                                       |
//! | CodeFence       | `<pre class="code-block" data-language="..."><code>`         |
//! | RawHtml         | Emitted verbatim                                             |
//! | Emphasis/Strong | `<em>` / `<strong>`                                          |
//! | Code            | `<code>`                                                     |
//! | Link / Image    | `<a href title>` / `<img src alt>`                           |
//!
//! Highlighted code fragments become `<span class="{style}">`. The class
//! names match the stylesheet from [`crate::highlight::highlight_css`].
//!
//! # Options
//!
//! - `title`: document title (defaults to the first heading, then "Markdown Preview")
//! - `css`: stylesheet embedded in the head

pub mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::highlight::{Highlighter, SyntectHighlighter};
use std::collections::HashMap;

pub use serializer::{serialize_to_html, view_to_html, HtmlOptions, DEFAULT_TITLE};

/// Format implementation for HTML
pub struct HtmlFormat {
    highlighter: Box<dyn Highlighter>,
    options: HtmlOptions,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(SyntectHighlighter::new())
    }
}

impl HtmlFormat {
    /// Create an HTML format that highlights code with `highlighter`
    pub fn new(highlighter: impl Highlighter + 'static) -> Self {
        Self {
            highlighter: Box::new(highlighter),
            options: HtmlOptions::default(),
        }
    }

    /// Base options, overridden per call by `serialize_with_options`
    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML5 document"
    }

    fn aliases(&self) -> &[&str] {
        &["htm"]
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn mime_type(&self) -> &str {
        "text/html"
    }

    fn serialize(&self, source: &str) -> Result<SerializedDocument, FormatError> {
        serialize_to_html(source, self.highlighter.as_ref(), &self.options)
            .map(SerializedDocument::Text)
    }

    fn serialize_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let mut html_options = self.options.clone();
        for (key, value) in options {
            match key.as_str() {
                "title" => html_options.title = Some(value.clone()),
                "css" => html_options.stylesheet = Some(value.clone()),
                _ => {
                    return Err(FormatError::NotSupported(format!(
                        "HTML export does not support option '{key}'"
                    )))
                }
            }
        }

        serialize_to_html(source, self.highlighter.as_ref(), &html_options)
            .map(SerializedDocument::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::PlainHighlighter;

    #[test]
    fn test_metadata() {
        let format = HtmlFormat::default();
        assert_eq!(format.suggested_filename(), "markdown_preview.html");
        assert_eq!(format.mime_type(), "text/html");
    }

    #[test]
    fn test_options() {
        let format = HtmlFormat::new(PlainHighlighter);
        let mut options = HashMap::new();
        options.insert("title".to_string(), "Custom".to_string());
        options.insert("css".to_string(), "p { margin: 0; }".to_string());

        let SerializedDocument::Text(html) = format.serialize_with_options("# H\n", &options).unwrap()
        else {
            panic!("expected text output");
        };
        assert!(html.contains("<title>Custom</title>"));
        assert!(html.contains("p { margin: 0; }"));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut options = HashMap::new();
        options.insert("theme".to_string(), "dark".to_string());
        assert!(matches!(
            HtmlFormat::default().serialize_with_options("x", &options),
            Err(FormatError::NotSupported(_))
        ));
    }

    #[test]
    fn test_highlighted_code_uses_spans() {
        let SerializedDocument::Text(html) = HtmlFormat::default()
            .serialize("```js\nconst s = \"hi\";\n```\n")
            .unwrap()
        else {
            panic!("expected text output");
        };
        assert!(html.contains("<span class=\""));
        assert!(html.contains("data-language=\"js\""));
    }
}
