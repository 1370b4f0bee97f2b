//! Escaping rules for HTML export
//!
//! Text reached through parsing is always escaped. Only block-level raw HTML
//! is emitted verbatim, and script, style, pre and textarea blocks never are.

use mdlive_babel::export_document;
use proptest::prelude::*;

fn html_of(source: &str) -> String {
    export_document(source, "html")
        .unwrap()
        .text()
        .unwrap()
        .to_string()
}

#[test]
fn test_inline_script_is_escaped() {
    let html = html_of("Text with <script>alert('x')</script> inside");
    assert!(html.contains("&lt;script&gt;alert('x')&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_bare_script_source_is_escaped() {
    let html = html_of("<script>");
    assert!(!html.contains("<script>"));
    assert!(html.contains("<p>&lt;script&gt;</p>"));
    assert!(html.ends_with("</body>\n</html>\n"));
}

#[test]
fn test_script_and_style_blocks_are_escaped() {
    let html = html_of("<script>\nalert(1)\n</script>\n\n<style>body { display: none }</style>\n");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<style>"));
    assert!(html.contains("&lt;script&gt;\nalert(1)\n&lt;/script&gt;"));
    assert!(html.contains("&lt;style&gt;body { display: none }&lt;/style&gt;"));
}

#[test]
fn test_marker_lookalike_in_link_title_survives() {
    let html = html_of("[x](u \"<!--mdlive-raw:0-->\")\n\n<div class=\"a\">raw</div>\n");
    assert!(html.contains("<a href=\"u\" title=\"<!--mdlive-raw:0-->\">x</a>"));
    assert!(html.contains("<div class=\"a\">raw</div>"));
}

#[test]
fn test_script_in_code_is_escaped() {
    let html = html_of("`<script>`\n\n```html\n<script>evil()</script>\n```\n");
    assert!(!html.contains("<script>"));
    assert!(html.contains("<code>&lt;script&gt;</code>"));
}

#[test]
fn test_attribute_values_are_escaped() {
    let html = html_of("[x](https://e.test/?a=1&b=\"2\")\n");
    assert!(html.contains("href=\"https://e.test/?a=1&amp;b=&quot;2&quot;\""));
}

#[test]
fn test_ampersands_in_text() {
    let html = html_of("Fish &amp; chips & peas");
    assert!(html.contains("<p>Fish &amp; chips &amp; peas</p>"));
}

#[test]
fn test_raw_html_block_is_verbatim() {
    let html = html_of("<table><tr><td>cell</td></tr></table>\n");
    assert!(html.contains("<table><tr><td>cell</td></tr></table>"));
}

proptest! {
    #[test]
    fn inline_tags_never_survive(word in "[a-z]{1,10}") {
        let source = format!("before <{word}>middle</{word}> after");
        let html = html_of(&source);
        let expected = format!("&lt;{word}&gt;middle&lt;/{word}&gt;");
        prop_assert!(html.contains(&expected));
    }
}
