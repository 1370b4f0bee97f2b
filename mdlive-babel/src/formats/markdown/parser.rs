//! Markdown parsing (Markdown → Document)
//!
//! Pipeline: Markdown string → Comrak AST → Document tree.
//!
//! Parsing is total: every input, however malformed, yields a document.
//! Constructs the tree has no node for (footnotes, tables, ...) are never
//! produced because only the CommonMark core is enabled; anything unexpected
//! that still shows up is flattened into its children.

use crate::ir::nodes::{
    plain_text, push_inline, Block, CodeFence, Document, Heading, Image, Inline, Link, List,
    Paragraph, Quote, RawHtml,
};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// CommonMark HTML block start condition 1 (`<script`, `<pre`, `<style`, `<textarea`).
const VERBATIM_HTML_BLOCK: u8 = 1;

/// Parse a Markdown string into a [`Document`].
pub fn parse_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = commonmark_options();
    let root = parse_document(&arena, source, &options);

    let document = Document::new(collect_blocks(root));
    tracing::trace!(blocks = document.blocks.len(), "parsed markdown");
    document
}

/// Plain CommonMark: no tables, strikethrough, autolinks or front matter.
fn commonmark_options() -> ComrakOptions<'static> {
    ComrakOptions::default()
}

fn collect_blocks<'a>(parent: &'a AstNode<'a>) -> Vec<Block> {
    let mut blocks = vec![];
    for child in parent.children() {
        convert_block(child, &mut blocks);
    }
    blocks
}

fn convert_block<'a>(node: &'a AstNode<'a>, blocks: &mut Vec<Block>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Document => blocks.extend(collect_blocks(node)),

        NodeValue::Paragraph => {
            let content = collect_inlines(node);
            if !content.is_empty() {
                blocks.push(Block::Paragraph(Paragraph { content }));
            }
        }

        NodeValue::Heading(heading) => {
            blocks.push(Block::Heading(Heading::new(
                heading.level,
                collect_inlines(node),
            )));
        }

        NodeValue::CodeBlock(code_block) => {
            let text = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal);
            blocks.push(Block::CodeFence(CodeFence::new(
                language_from_info(&code_block.info),
                text,
            )));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let items = node.children().map(collect_blocks).collect();
            blocks.push(Block::List(List { ordered, items }));
        }

        NodeValue::BlockQuote => {
            blocks.push(Block::Quote(Quote {
                children: collect_blocks(node),
            }));
        }

        NodeValue::ThematicBreak => blocks.push(Block::ThematicBreak),

        // script, pre, style and textarea blocks are kept as escaped text
        NodeValue::HtmlBlock(html) if html.block_type == VERBATIM_HTML_BLOCK => {
            let literal = html.literal.trim_end_matches('\n');
            if !literal.is_empty() {
                blocks.push(Block::Paragraph(Paragraph {
                    content: vec![Inline::Text(literal.to_string())],
                }));
            }
        }

        NodeValue::HtmlBlock(html) => {
            blocks.push(Block::RawHtml(RawHtml {
                html: html.literal.clone(),
            }));
        }

        _ => {
            // Unknown container, keep whatever blocks it holds
            blocks.extend(collect_blocks(node));
        }
    }
}

/// The language tag is the first word of the info string.
fn language_from_info(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_string)
}

fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut content = vec![];
    for child in node.children() {
        convert_inline(child, &mut content);
    }
    content
}

fn convert_inline<'a>(node: &'a AstNode<'a>, content: &mut Vec<Inline>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => push_inline(content, Inline::Text(text.to_string())),

        NodeValue::SoftBreak | NodeValue::LineBreak => {
            push_inline(content, Inline::Text("\n".to_string()))
        }

        NodeValue::Code(code) => content.push(Inline::Code(code.literal.clone())),

        // Inline tags are not trusted, they are shown as text
        NodeValue::HtmlInline(html) => push_inline(content, Inline::Text(html.to_string())),

        NodeValue::Emph => content.push(Inline::Emphasis(collect_inlines(node))),

        NodeValue::Strong => content.push(Inline::Strong(collect_inlines(node))),

        NodeValue::Link(link) => content.push(Inline::Link(Link {
            href: link.url.clone(),
            title: link.title.clone(),
            children: collect_inlines(node),
        })),

        NodeValue::Image(link) => content.push(Inline::Image(Image {
            src: link.url.clone(),
            alt: plain_text(&collect_inlines(node)),
        })),

        _ => {
            for child in node.children() {
                convert_inline(child, content);
            }
        }
    }
}
