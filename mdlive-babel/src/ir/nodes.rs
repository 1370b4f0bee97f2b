//! Core data structures for the parsed document tree.

use serde::Serialize;

/// The root of a parsed document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of the first heading, if the document has one.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading(heading) => Some(plain_text(&heading.content)),
            _ => None,
        })
    }
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    CodeFence(CodeFence),
    List(List),
    Quote(Quote),
    ThematicBreak,
    RawHtml(RawHtml),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<Inline>,
}

/// A heading. `level` is always within `1..=6`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<Inline>,
}

impl Heading {
    /// Builds a heading, clamping the level into `1..=6`.
    pub fn new(level: u8, content: Vec<Inline>) -> Self {
        Self {
            level: level.clamp(1, 6),
            content,
        }
    }
}

/// A fenced (or indented) code block.
///
/// `language` is either absent or a non-empty tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeFence {
    pub language: Option<String>,
    pub text: String,
}

impl CodeFence {
    pub fn new(language: Option<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.filter(|lang| !lang.is_empty()),
            text: text.into(),
        }
    }
}

/// A list; each item is its own sequence of blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Block>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub children: Vec<Block>,
}

/// Author-trusted HTML emitted verbatim by the HTML encoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawHtml {
    pub html: String,
}

/// Inline node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Code(String),
    Link(Link),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    pub title: String,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Concatenated text of a run of inlines, ignoring all markup.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(inlines, &mut out);
    out
}

fn collect_plain_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Emphasis(children) | Inline::Strong(children) => {
                collect_plain_text(children, out)
            }
            Inline::Link(link) => collect_plain_text(&link.children, out),
            Inline::Image(image) => out.push_str(&image.alt),
        }
    }
}

/// Appends `inline`, merging it into a trailing `Text` node when both are text.
pub fn push_inline(content: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(text) = &inline {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = content.last_mut() {
            last.push_str(text);
            return;
        }
    }
    content.push(inline);
}
