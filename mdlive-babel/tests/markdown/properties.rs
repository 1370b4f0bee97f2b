//! Property tests for parsing and identity exports

use mdlive_babel::ir::nodes::{Block, Inline, Paragraph};
use mdlive_babel::{export_document, parse};
use proptest::prelude::*;

/// Fragments that exercise the tricky corners of the grammar.
fn markdown_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("```".to_string()),
        Just("~~~".to_string()),
        Just("*".to_string()),
        Just("**".to_string()),
        Just("_".to_string()),
        Just("[".to_string()),
        Just("](".to_string()),
        Just(")".to_string()),
        Just("<".to_string()),
        Just("<div>".to_string()),
        Just("# ".to_string()),
        Just("> ".to_string()),
        Just("- ".to_string()),
        Just("1. ".to_string()),
        Just("    ".to_string()),
        Just("\n".to_string()),
        Just("\n\n".to_string()),
        Just("\t".to_string()),
        "[a-z ]{1,8}",
    ]
}

fn markdownish() -> impl Strategy<Value = String> {
    prop::collection::vec(markdown_fragment(), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn plain_text_is_one_paragraph(text in "[a-zA-Z][a-zA-Z ,]{0,60}[a-zA-Z]") {
        let doc = parse(&text);
        prop_assert_eq!(
            doc.blocks,
            vec![Block::Paragraph(Paragraph {
                content: vec![Inline::Text(text.clone())],
            })]
        );
    }

    #[test]
    fn plain_text_with_trailing_newline(text in "[a-zA-Z][a-zA-Z ,]{0,60}[a-zA-Z]") {
        let with_newline = format!("{text}\n");
        prop_assert_eq!(parse(&with_newline), parse(&text));
    }

    #[test]
    fn parse_never_panics_on_markdownish_input(source in markdownish()) {
        let _ = parse(&source);
    }

    #[test]
    fn parse_never_panics_on_arbitrary_input(source in any::<String>()) {
        let _ = parse(&source);
    }

    #[test]
    fn markdown_and_text_exports_are_identity(source in any::<String>()) {
        for format in ["markdown", "text"] {
            let artifact = export_document(&source, format).unwrap();
            prop_assert_eq!(artifact.bytes, source.as_bytes().to_vec());
        }
    }
}
