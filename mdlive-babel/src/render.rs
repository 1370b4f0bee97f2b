//! Document → rendered view.
//!
//! Rendering walks the document once and swaps every code block's text for
//! the fragments returned by the [`Highlighter`]. All other nodes are carried
//! over unchanged, so the view tree has the same shape as the document.

use crate::highlight::{Highlighter, PLAIN_LANGUAGE};
use crate::ir::nodes::{Block, Document};
use crate::ir::view::{RenderedView, ViewBlock};

/// Render a parsed document, highlighting code blocks with `highlighter`.
///
/// Code blocks without a language are highlighted as [`PLAIN_LANGUAGE`].
pub fn render(doc: &Document, highlighter: &dyn Highlighter) -> RenderedView {
    RenderedView {
        blocks: render_blocks(&doc.blocks, highlighter),
        title: doc.title(),
    }
}

fn render_blocks(blocks: &[Block], highlighter: &dyn Highlighter) -> Vec<ViewBlock> {
    blocks
        .iter()
        .map(|block| render_block(block, highlighter))
        .collect()
}

fn render_block(block: &Block, highlighter: &dyn Highlighter) -> ViewBlock {
    match block {
        Block::Paragraph(paragraph) => ViewBlock::Paragraph {
            content: paragraph.content.clone(),
        },
        Block::Heading(heading) => ViewBlock::Heading {
            level: heading.level,
            content: heading.content.clone(),
        },
        Block::CodeFence(fence) => {
            let language = fence.language.as_deref().unwrap_or(PLAIN_LANGUAGE);
            ViewBlock::CodeBlock {
                language: fence.language.clone(),
                fragments: highlighter.highlight(&fence.text, Some(language)),
            }
        }
        Block::List(list) => ViewBlock::List {
            ordered: list.ordered,
            items: list
                .items
                .iter()
                .map(|item| render_blocks(item, highlighter))
                .collect(),
        },
        Block::Quote(quote) => ViewBlock::Quote {
            children: render_blocks(&quote.children, highlighter),
        },
        Block::ThematicBreak => ViewBlock::ThematicBreak,
        Block::RawHtml(raw) => ViewBlock::RawHtml {
            html: raw.html.clone(),
        },
    }
}
