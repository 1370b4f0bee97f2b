//! Code-block highlighting capability
//!
//! The renderer never colours code itself: it hands every code block to a
//! [`Highlighter`] and stores the fragments it gets back. Highlighters are
//! total, an unknown or absent language yields the code as one fragment with
//! the neutral [`PLAIN_STYLE`] tag.
//!
//! [`SyntectHighlighter`] produces class-style tags (the atoms of the innermost
//! syntect scope separated by spaces, e.g. `string quoted double js`). These
//! line up with the selectors emitted by [`highlight_css`], so HTML output only
//! needs `<span class="{style}">` per fragment.
//!
//! Fragments are flat. Theme rules that select on an enclosing scope (descendant
//! selectors such as `.source.rust .entity`) have no ancestor span to match and
//! never apply; only single-scope rules colour the output.

use crate::error::FormatError;
use once_cell::sync::Lazy;
use serde::Serialize;
use syntect::easy::ScopeRangeIterator;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Style tag of fragments that carry no colouring.
pub const PLAIN_STYLE: &str = "plain";

/// Language used when a code block declares none.
pub const PLAIN_LANGUAGE: &str = "plain";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// A run of code text sharing one style tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledFragment {
    pub text: String,
    pub style: String,
}

impl StyledFragment {
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, PLAIN_STYLE)
    }

    pub fn is_plain(&self) -> bool {
        self.style == PLAIN_STYLE
    }
}

/// Maps `(code, language)` to styled fragments.
///
/// Implementations must be pure functions of their inputs and must never fail.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<StyledFragment>;
}

/// No-op highlighter: returns the code as a single neutral fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: Option<&str>) -> Vec<StyledFragment> {
        vec![StyledFragment::plain(code)]
    }
}

/// Highlighter backed by syntect's bundled syntax definitions.
#[derive(Debug, Clone, Copy)]
pub struct SyntectHighlighter {
    syntaxes: &'static SyntaxSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self {
            syntaxes: Lazy::force(&SYNTAX_SET),
        }
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given language tag resolves to a known syntax.
    pub fn supports(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    fn find_syntax(&self, language: &str) -> Option<&'static SyntaxReference> {
        if is_plain_language(language) {
            return None;
        }
        self.syntaxes.find_syntax_by_token(language)
    }

    fn highlight_with(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<Vec<StyledFragment>, String> {
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut fragments: Vec<StyledFragment> = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state
                .parse_line(line, self.syntaxes)
                .map_err(|e| format!("{e:?}"))?;
            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack.apply(op).map_err(|e| format!("{e:?}"))?;
                if range.is_empty() {
                    continue;
                }
                push_fragment(&mut fragments, &line[range], style_tag(&stack));
            }
        }

        Ok(fragments)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<StyledFragment> {
        let language = language.unwrap_or(PLAIN_LANGUAGE);
        let Some(syntax) = self.find_syntax(language) else {
            tracing::debug!(language, "no syntax for language, using plain fallback");
            return vec![StyledFragment::plain(code)];
        };

        match self.highlight_with(code, syntax) {
            Ok(fragments) if !fragments.is_empty() => fragments,
            Ok(_) => vec![StyledFragment::plain(code)],
            Err(err) => {
                tracing::warn!(language, error = %err, "highlighting failed, using plain fallback");
                vec![StyledFragment::plain(code)]
            }
        }
    }
}

/// Class-based stylesheet for one of syntect's bundled themes.
///
/// Descendant selectors in the result never match exported HTML, see the
/// module docs.
pub fn highlight_css(theme_name: &str) -> Result<String, FormatError> {
    let theme = THEME_SET
        .themes
        .get(theme_name)
        .ok_or_else(|| FormatError::InvalidOption {
            key: "theme".to_string(),
            value: theme_name.to_string(),
        })?;
    css_for_theme_with_class_style(theme, ClassStyle::Spaced)
        .map_err(|e| FormatError::SerializationError(format!("highlight CSS failed: {e}")))
}

/// Names of the bundled themes accepted by [`highlight_css`] (sorted).
pub fn available_themes() -> Vec<String> {
    let mut names: Vec<_> = THEME_SET.themes.keys().cloned().collect();
    names.sort();
    names
}

fn is_plain_language(language: &str) -> bool {
    matches!(
        language.to_ascii_lowercase().as_str(),
        "" | "plain" | "text" | "plaintext" | "txt"
    )
}

/// Class tag of the innermost scope; enclosing scopes are dropped.
fn style_tag(stack: &ScopeStack) -> String {
    match stack.as_slice().last() {
        Some(scope) => scope.build_string().replace('.', " "),
        None => PLAIN_STYLE.to_string(),
    }
}

fn push_fragment(fragments: &mut Vec<StyledFragment>, text: &str, style: String) {
    if let Some(last) = fragments.last_mut() {
        if last.style == style {
            last.text.push_str(text);
            return;
        }
    }
    fragments.push(StyledFragment::new(text, style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn joined(fragments: &[StyledFragment]) -> String {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn plain_highlighter_returns_single_fragment() {
        let fragments = PlainHighlighter.highlight("let x = 1;", Some("rust"));
        assert_eq!(fragments, vec![StyledFragment::plain("let x = 1;")]);
    }

    #[test]
    fn unknown_language_is_one_neutral_fragment() {
        let fragments = SyntectHighlighter::new().highlight("foo bar", Some("no-such-lang"));
        assert_eq!(fragments, vec![StyledFragment::plain("foo bar")]);
    }

    #[test]
    fn absent_language_uses_plain_fallback() {
        let fragments = SyntectHighlighter::new().highlight("SELECT 1", None);
        assert_eq!(fragments, vec![StyledFragment::plain("SELECT 1")]);
    }

    #[test]
    fn known_language_is_styled_and_lossless() {
        let code = "console.log(\"hi\");\nlet x = 1;";
        let fragments = SyntectHighlighter::new().highlight(code, Some("js"));
        assert_eq!(joined(&fragments), code);
        assert!(fragments.iter().any(|f| !f.is_plain()));
        assert!(fragments.iter().all(|f| !f.style.contains('.')));
    }

    #[test]
    fn adjacent_fragments_never_share_a_style() {
        let fragments = SyntectHighlighter::new().highlight("fn main() {}\n", Some("rust"));
        for pair in fragments.windows(2) {
            assert_ne!(pair[0].style, pair[1].style);
        }
    }

    #[test]
    fn empty_code_still_yields_a_fragment() {
        let fragments = SyntectHighlighter::new().highlight("", Some("rust"));
        assert_eq!(fragments, vec![StyledFragment::plain("")]);
    }

    #[test]
    fn plain_aliases_are_recognized() {
        let highlighter = SyntectHighlighter::new();
        assert!(!highlighter.supports("plain"));
        assert!(!highlighter.supports("TEXT"));
        assert!(highlighter.supports("rust"));
    }

    #[test]
    fn style_tag_keeps_only_innermost_scope() {
        let stack =
            ScopeStack::from_str("source.rust meta.function.rust entity.name.function.rust")
                .unwrap();
        assert_eq!(style_tag(&stack), "entity name function rust");
        assert_eq!(style_tag(&ScopeStack::new()), PLAIN_STYLE);
    }

    #[test]
    fn css_for_known_theme() {
        let css = highlight_css("InspiredGitHub").unwrap();
        assert!(css.contains('{'));
        assert!(available_themes().contains(&"InspiredGitHub".to_string()));
    }

    #[test]
    fn css_for_unknown_theme_is_an_error() {
        assert!(matches!(
            highlight_css("does-not-exist"),
            Err(FormatError::InvalidOption { .. })
        ));
    }
}
