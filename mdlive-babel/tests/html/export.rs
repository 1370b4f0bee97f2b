//! Export tests for HTML (Markdown → HTML)

use crate::common::load_fixture;
use mdlive_babel::export_document;
use mdlive_babel::format::Format;
use mdlive_babel::formats::html::HtmlFormat;
use mdlive_babel::highlight::PlainHighlighter;
use regex::Regex;
use std::collections::HashMap;

fn html_of(source: &str) -> String {
    let artifact = export_document(source, "html").unwrap();
    artifact.text().unwrap().to_string()
}

#[test]
fn test_title_and_highlighted_code() {
    let html = html_of("# Title\n\n```js\nconsole.log(1)\n```");

    assert!(html.contains("<title>Title</title>"));
    assert!(html.contains("<h1>Title</h1>"));

    let code_block = Regex::new(
        r#"(?s)<pre class="code-block" data-language="js"><code class="language-js">(.*?)</code></pre>"#,
    )
    .unwrap();
    let inner = &code_block.captures(&html).expect("code block present")[1];
    assert!(inner.contains("<span class=\""));

    let text_only = Regex::new(r"<[^>]+>").unwrap().replace_all(inner, "");
    assert_eq!(text_only, "console.log(1)");
}

#[test]
fn test_document_envelope() {
    let html = html_of("plain");
    let envelope = Regex::new(
        r"(?s)^<!DOCTYPE html>\n<html>\n<head>\n.*<title>Markdown Preview</title>\n.*</head>\n<body>\n<p>plain</p>\n</body>\n</html>\n$",
    )
    .unwrap();
    assert!(envelope.is_match(&html), "unexpected envelope:\n{html}");
}

#[test]
fn test_kitchensink_elements() {
    let html = html_of(&load_fixture("kitchensink.md"));

    for needle in [
        "<h1>Kitchen Sink</h1>",
        "<h2>Lists</h2>",
        "<em>emphasis</em>",
        "<strong>strong text</strong>",
        "<code>inline code</code>",
        "<a href=\"https://example.com\" title=\"Example\">link</a>",
        "<ul><li>",
        "<ol><li>",
        "<blockquote>",
        "<hr>",
        "data-language=\"rust\"",
        "<pre class=\"code-block\"><code>indented code</code></pre>",
        "<div class=\"callout\">\nRaw <em>trusted</em> HTML.\n</div>",
        "<img src=\"diagram.png\" alt=\"diagram\">",
        "Inline &lt;span&gt;tags&lt;/span&gt; are shown as text.",
    ] {
        assert!(html.contains(needle), "missing {needle:?} in:\n{html}");
    }
}

#[test]
fn test_one_span_per_styled_fragment() {
    let format = HtmlFormat::default();
    let html = format
        .serialize("```rust\nlet x = \"s\";\n```\n")
        .unwrap();
    let html = String::from_utf8(html.into_bytes()).unwrap();

    let spans = Regex::new(r#"<span class="([^"]+)">"#).unwrap();
    let classes: Vec<_> = spans
        .captures_iter(&html)
        .map(|c| c[1].to_string())
        .collect();
    assert!(!classes.is_empty());
    assert!(classes.iter().all(|class| !class.contains('.')));
    assert!(!classes.iter().any(|class| class == "plain"));
}

#[test]
fn test_plain_highlighter_emits_no_spans() {
    let format = HtmlFormat::new(PlainHighlighter);
    let html = format.serialize("```rust\nlet x = 1;\n```\n").unwrap();
    let html = String::from_utf8(html.into_bytes()).unwrap();
    assert!(!html.contains("<span"));
    assert!(html.contains("let x = 1;"));
}

#[test]
fn test_title_option_and_css() {
    let format = HtmlFormat::new(PlainHighlighter);
    let mut options = HashMap::new();
    options.insert("title".to_string(), "Export <1>".to_string());
    options.insert("css".to_string(), "body { color: #333; }".to_string());
    let html = format.serialize_with_options("# Ignored\n", &options).unwrap();
    let html = String::from_utf8(html.into_bytes()).unwrap();

    assert!(html.contains("<title>Export &lt;1&gt;</title>"));
    assert!(html.contains("<style>\nbody { color: #333; }\n</style>"));
}

#[test]
fn test_empty_source_is_valid_document() {
    let html = html_of("");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</html>\n"));
}
