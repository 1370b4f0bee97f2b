//! HTML serialization (Markdown → HTML export)
//!
//! Pipeline: Markdown string → Document → RenderedView → RcDom → HTML string
//!
//! Text and attribute values are escaped by the html5ever serializer. Raw HTML
//! blocks can't live inside the DOM without being escaped, so each one is
//! stood in for by a marker comment and spliced back in after serialization.
//! Attribute values keep `<` unescaped, so the marker prefix is bumped until it
//! occurs nowhere else in the serialized output.

use crate::error::FormatError;
use crate::formats::markdown::parser::parse_markdown;
use crate::highlight::{Highlighter, StyledFragment};
use crate::ir::nodes::Inline;
use crate::ir::view::{RenderedView, ViewBlock};
use crate::render::render;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Title used when the document has no heading and none was given.
pub const DEFAULT_TITLE: &str = "Markdown Preview";

const RAW_MARKER_PREFIX: &str = "mdlive-raw:";

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Overrides the title derived from the first heading
    pub title: Option<String>,
    /// Stylesheet embedded in a `<style>` element in the head
    pub stylesheet: Option<String>,
}

impl HtmlOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = Some(css.into());
        self
    }
}

/// Serialize markdown source to a complete HTML document
pub fn serialize_to_html(
    source: &str,
    highlighter: &dyn Highlighter,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let doc = parse_markdown(source);
    let view = render(&doc, highlighter);
    let body = view_to_html(&view)?;

    let title = options
        .title
        .clone()
        .or_else(|| view.title.clone())
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(wrap_in_document(&body, &title, options))
}

/// Serialize a rendered view to an HTML fragment (the body content only)
pub fn view_to_html(view: &RenderedView) -> Result<String, FormatError> {
    let mut nonce = 0usize;
    loop {
        let marker_prefix = format!("{RAW_MARKER_PREFIX}{nonce}:");
        let mut raw_blocks: Vec<&str> = vec![];
        let mut output = String::new();

        for block in &view.blocks {
            let node = build_block(block, &marker_prefix, &mut raw_blocks);
            output.push_str(&serialize_node(&node)?);
            output.push('\n');
        }

        let open = format!("<!--{marker_prefix}");
        if output.matches(open.as_str()).count() == raw_blocks.len() {
            return Ok(splice_raw_blocks(&output, &open, &raw_blocks));
        }
        nonce += 1;
    }
}

fn build_block<'v>(
    block: &'v ViewBlock,
    marker_prefix: &str,
    raw_blocks: &mut Vec<&'v str>,
) -> Handle {
    match block {
        ViewBlock::Paragraph { content } => {
            let para = create_element("p", vec![]);
            add_inlines(&para, content);
            para
        }

        ViewBlock::Heading { level, content } => {
            let heading = create_element(&format!("h{}", (*level).clamp(1, 6)), vec![]);
            add_inlines(&heading, content);
            heading
        }

        ViewBlock::CodeBlock {
            language,
            fragments,
        } => build_code_block(language.as_deref(), fragments),

        ViewBlock::List { ordered, items } => {
            let list = create_element(if *ordered { "ol" } else { "ul" }, vec![]);
            for item in items {
                let li = create_element("li", vec![]);
                for child in item {
                    append(&li, build_block(child, marker_prefix, raw_blocks));
                }
                append(&list, li);
            }
            list
        }

        ViewBlock::Quote { children } => {
            let quote = create_element("blockquote", vec![]);
            for child in children {
                append(&quote, build_block(child, marker_prefix, raw_blocks));
            }
            quote
        }

        ViewBlock::ThematicBreak => create_element("hr", vec![]),

        ViewBlock::RawHtml { html } => {
            let marker = format!("{marker_prefix}{}", raw_blocks.len());
            raw_blocks.push(html);
            create_comment(&marker)
        }
    }
}

fn build_code_block(language: Option<&str>, fragments: &[StyledFragment]) -> Handle {
    let mut pre_attrs = vec![("class", "code-block")];
    if let Some(lang) = language {
        pre_attrs.push(("data-language", lang));
    }
    let pre = create_element("pre", pre_attrs);

    let code_class = language.map(|lang| format!("language-{lang}"));
    let code_attrs = match &code_class {
        Some(class) => vec![("class", class.as_str())],
        None => vec![],
    };
    let code = create_element("code", code_attrs);

    for fragment in fragments {
        if fragment.is_plain() {
            append(&code, create_text(&fragment.text));
        } else {
            let span = create_element("span", vec![("class", fragment.style.as_str())]);
            append(&span, create_text(&fragment.text));
            append(&code, span);
        }
    }

    append(&pre, code);
    pre
}

fn add_inlines(parent: &Handle, inlines: &[Inline]) {
    for inline in inlines {
        add_inline_to_node(parent, inline);
    }
}

fn add_inline_to_node(parent: &Handle, inline: &Inline) {
    match inline {
        Inline::Text(text) => append(parent, create_text(text)),

        Inline::Strong(children) => {
            let strong = create_element("strong", vec![]);
            add_inlines(&strong, children);
            append(parent, strong);
        }

        Inline::Emphasis(children) => {
            let em = create_element("em", vec![]);
            add_inlines(&em, children);
            append(parent, em);
        }

        Inline::Code(code_text) => {
            let code = create_element("code", vec![]);
            append(&code, create_text(code_text));
            append(parent, code);
        }

        Inline::Link(link) => {
            let mut attrs = vec![("href", link.href.as_str())];
            if !link.title.is_empty() {
                attrs.push(("title", link.title.as_str()));
            }
            let anchor = create_element("a", attrs);
            add_inlines(&anchor, &link.children);
            append(parent, anchor);
        }

        Inline::Image(image) => {
            let img = create_element(
                "img",
                vec![("src", image.src.as_str()), ("alt", image.alt.as_str())],
            );
            append(parent, img);
        }
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Create a comment node
fn create_comment(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Comment {
            contents: text.to_string().into(),
        },
    })
}

/// Serialize one node and its subtree
fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        FormatError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Replace every raw marker comment with its block, in one left-to-right pass.
///
/// Raw content is never rescanned, so markers appearing inside it are inert.
fn splice_raw_blocks(serialized: &str, open: &str, raw_blocks: &[&str]) -> String {
    if raw_blocks.is_empty() {
        return serialized.to_string();
    }

    let mut output = String::with_capacity(serialized.len());
    let mut rest = serialized;

    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find("-->") else {
            break;
        };
        match after_open[..end]
            .parse::<usize>()
            .ok()
            .and_then(|index| raw_blocks.get(index))
        {
            Some(raw) => {
                output.push_str(&rest[..start]);
                output.push_str(raw.trim_end_matches('\n'));
            }
            None => output.push_str(&rest[..start + open.len() + end + 3]),
        }
        rest = &after_open[end + 3..];
    }
    output.push_str(rest);
    output
}

/// Wrap the body in a complete HTML document
pub(crate) fn wrap_in_document(body_html: &str, title: &str, options: &HtmlOptions) -> String {
    let escaped_title = html_escape(title);
    let style = match &options.stylesheet {
        Some(css) if !css.trim().is_empty() => format!("<style>\n{}\n</style>\n", css.trim_end()),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="generator" content="mdlive">
<title>{escaped_title}</title>
{style}</head>
<body>
{body_html}</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
