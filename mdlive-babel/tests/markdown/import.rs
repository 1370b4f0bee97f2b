//! Import tests for Markdown (Markdown → Document)
//!
//! These tests verify that markdown sources are converted to the expected
//! document tree.

use crate::common::load_fixture;
use insta::assert_debug_snapshot;
use mdlive_babel::ir::nodes::{Block, Inline};
use mdlive_babel::parse;

fn block_kinds(blocks: &[Block]) -> Vec<&'static str> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(_) => "paragraph",
            Block::Heading(_) => "heading",
            Block::CodeFence(_) => "code",
            Block::List(_) => "list",
            Block::Quote(_) => "quote",
            Block::ThematicBreak => "break",
            Block::RawHtml(_) => "raw",
        })
        .collect()
}

#[test]
fn test_heading_and_code_fence() {
    let doc = parse("# Title\n\n```js\nconsole.log(1)\n```");
    assert_debug_snapshot!(doc.blocks, @r###"
    [
        Heading(
            Heading {
                level: 1,
                content: [
                    Text(
                        "Title",
                    ),
                ],
            },
        ),
        CodeFence(
            CodeFence {
                language: Some(
                    "js",
                ),
                text: "console.log(1)",
            },
        ),
    ]
    "###);
}

#[test]
fn test_kitchensink_structure() {
    let doc = parse(&load_fixture("kitchensink.md"));
    assert_eq!(
        block_kinds(&doc.blocks),
        vec![
            "heading",
            "paragraph",
            "heading",
            "list",
            "list",
            "quote",
            "break",
            "code",
            "code",
            "raw",
            "paragraph",
            "paragraph",
        ]
    );
    assert_eq!(doc.title().as_deref(), Some("Kitchen Sink"));
}

#[test]
fn test_kitchensink_code_blocks() {
    let doc = parse(&load_fixture("kitchensink.md"));
    let fences: Vec<_> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::CodeFence(fence) => Some(fence),
            _ => None,
        })
        .collect();

    assert_eq!(fences[0].language.as_deref(), Some("rust"));
    assert_eq!(fences[0].text, "fn main() {\n    println!(\"hello\");\n}");
    assert_eq!(fences[1].language, None);
    assert_eq!(fences[1].text, "indented code");
}

#[test]
fn test_setext_heading_levels() {
    let doc = parse("Big\n===\n\nSmall\n-----\n");
    let levels: Vec<_> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading(heading) => Some(heading.level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2]);
}

#[test]
fn test_nested_lists() {
    let doc = parse("- outer\n  - inner\n");
    let Block::List(outer) = &doc.blocks[0] else {
        panic!("expected list");
    };
    assert_eq!(outer.items.len(), 1);
    assert!(matches!(outer.items[0][1], Block::List(_)));
}

#[test]
fn test_malformed_input_degrades_to_text() {
    let doc = parse("[unterminated link\n\n```\nunclosed fence");
    match &doc.blocks[..] {
        [Block::Paragraph(paragraph), Block::CodeFence(fence)] => {
            assert_eq!(
                paragraph.content,
                vec![Inline::Text("[unterminated link".to_string())]
            );
            assert_eq!(fence.text, "unclosed fence");
        }
        other => panic!("unexpected blocks: {other:?}"),
    }
}
