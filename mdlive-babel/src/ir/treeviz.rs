//! Treeviz rendering of a parsed document
//!
//! A visual, line based dump of the tree, one node per line:
//!
//!     <prefix><connector> <icon> <label>
//!
//! Nesting is drawn with box characters, labels are truncated to 30 characters.
//!
//!     ⧉ Document (3 blocks)
//!     ├─ # Title
//!     ├─ ¶ Some intro text
//!     └─ ☰ 2 items
//!       ├─ • item
//!       │ └─ ¶ one
//!       └─ • item
//!         └─ ¶ two
//!
//! Icons
//!     Document: ⧉
//!     Heading: #
//!     Paragraph: ¶
//!     CodeFence: 𝒱
//!     List: ☰
//!     ListItem: •
//!     Quote: "
//!     ThematicBreak: ⎯
//!     RawHtml: ‹›

use super::nodes::{plain_text, Block, Document};

const LABEL_WIDTH: usize = 30;

pub fn icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "#",
        "Paragraph" => "¶",
        "CodeFence" => "𝒱",
        "List" => "☰",
        "ListItem" => "•",
        "Quote" => "\"",
        "ThematicBreak" => "⎯",
        "RawHtml" => "‹›",
        _ => "○",
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!("{} Document ({} blocks)\n", icon("Document"), doc.blocks.len());
    format_children(&doc.blocks, "", &mut output);
    output
}

fn format_children(blocks: &[Block], prefix: &str, output: &mut String) {
    for (i, block) in blocks.iter().enumerate() {
        format_block(block, prefix, i == blocks.len() - 1, output);
    }
}

fn format_block(block: &Block, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    let (node_type, label) = describe(block);
    output.push_str(&format!(
        "{prefix}{connector} {} {}\n",
        icon(node_type),
        truncate(&label)
    ));

    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    match block {
        Block::List(list) => {
            for (i, item) in list.items.iter().enumerate() {
                let item_last = i == list.items.len() - 1;
                let item_connector = if item_last { "└─" } else { "├─" };
                output.push_str(&format!(
                    "{child_prefix}{item_connector} {} item\n",
                    icon("ListItem")
                ));
                let item_prefix = format!("{child_prefix}{}", if item_last { "  " } else { "│ " });
                format_children(item, &item_prefix, output);
            }
        }
        Block::Quote(quote) => format_children(&quote.children, &child_prefix, output),
        _ => {}
    }
}

fn describe(block: &Block) -> (&'static str, String) {
    match block {
        Block::Paragraph(paragraph) => ("Paragraph", plain_text(&paragraph.content)),
        Block::Heading(heading) => (
            "Heading",
            format!("h{} {}", heading.level, plain_text(&heading.content)),
        ),
        Block::CodeFence(fence) => (
            "CodeFence",
            format!(
                "[{}] {}",
                fence.language.as_deref().unwrap_or("plain"),
                fence.text.lines().next().unwrap_or("")
            ),
        ),
        Block::List(list) => (
            "List",
            format!(
                "{} items{}",
                list.items.len(),
                if list.ordered { ", ordered" } else { "" }
            ),
        ),
        Block::Quote(quote) => ("Quote", format!("{} blocks", quote.children.len())),
        Block::ThematicBreak => ("ThematicBreak", String::new()),
        Block::RawHtml(raw) => ("RawHtml", raw.html.lines().next().unwrap_or("").to_string()),
    }
}

fn truncate(label: &str) -> String {
    let label = label.replace('\n', " ");
    if label.chars().count() <= LABEL_WIDTH {
        label
    } else {
        let mut short: String = label.chars().take(LABEL_WIDTH - 1).collect();
        short.push('…');
        short
    }
}
