//! The rendered view: a document tree whose code blocks carry highlighted
//! fragments instead of raw text.

use crate::highlight::StyledFragment;
use crate::ir::nodes::Inline;
use serde::Serialize;

/// Tree isomorphic to [`crate::ir::nodes::Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedView {
    pub blocks: Vec<ViewBlock>,
    /// Plain text of the first heading, carried over from the document.
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewBlock {
    Paragraph {
        content: Vec<Inline>,
    },
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    CodeBlock {
        language: Option<String>,
        fragments: Vec<StyledFragment>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<ViewBlock>>,
    },
    Quote {
        children: Vec<ViewBlock>,
    },
    ThematicBreak,
    RawHtml {
        html: String,
    },
}
