//! Standalone preview pages.
//!
//! A preview page is the rendered view wrapped in an HTML document styled by
//! the viewer's [`ViewSettings`]. Settings only affect the page chrome; they
//! never reach the parser or the export formats.

use crate::error::FormatError;
use crate::formats::html::serializer::{view_to_html, wrap_in_document, HtmlOptions, DEFAULT_TITLE};
use crate::ir::view::RenderedView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 24;
pub const DEFAULT_FONT_SIZE: u8 = 16;
/// Step used by the font size controls.
pub const FONT_SIZE_STEP: i32 = 2;

/// Accent colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Neon,
    Purple,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Neon => "neon",
            Theme::Purple => "purple",
        }
    }

    fn accent(self) -> &'static str {
        match self {
            Theme::Neon => "#00d4ff",
            Theme::Purple => "#9333ea",
        }
    }

    fn secondary(self) -> &'static str {
        match self {
            Theme::Neon => "#39ff14",
            Theme::Purple => "#c084fc",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "neon" => Ok(Theme::Neon),
            "purple" => Ok(Theme::Purple),
            _ => Err(FormatError::InvalidOption {
                key: "theme".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Presentation state of the previewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSettings {
    pub theme: Theme,
    pub dark_mode: bool,
    font_size: u8,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            dark_mode: true,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ViewSettings {
    pub fn new(theme: Theme, dark_mode: bool, font_size: i64) -> Self {
        Self {
            theme,
            dark_mode,
            font_size: clamp_font_size(font_size),
        }
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    /// Shift the font size by `delta`, staying within 12..=24.
    pub fn adjust_font_size(&mut self, delta: i32) -> u8 {
        self.font_size = clamp_font_size(i64::from(self.font_size) + i64::from(delta));
        self.font_size
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Stylesheet for the page chrome.
    pub fn stylesheet(&self) -> String {
        let (background, panel, text) = if self.dark_mode {
            ("#111827", "#1f2937", "#ffffff")
        } else {
            ("#f3f4f6", "#ffffff", "#111827")
        };
        format!(
            "body {{ margin: 0; background: {background}; color: {text}; font-family: system-ui, sans-serif; }}\n\
             .preview {{ max-width: 56rem; margin: 1rem auto; padding: 1rem; border-radius: 0.5rem; background: {panel}; font-size: {size}px; }}\n\
             .preview h1, .preview h2, .preview h3 {{ color: {accent}; }}\n\
             .preview a {{ color: {secondary}; }}\n\
             .preview pre.code-block {{ padding: 0.75rem; overflow-x: auto; border-radius: 0.375rem; }}\n\
             .preview blockquote {{ margin-left: 0; padding-left: 1rem; border-left: 4px solid {accent}; }}",
            size = self.font_size,
            accent = self.theme.accent(),
            secondary = self.theme.secondary(),
        )
    }
}

fn clamp_font_size(size: i64) -> u8 {
    size.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE)) as u8
}

/// Build a standalone preview page for `view`.
///
/// `highlight_css` is appended to the page stylesheet when given.
pub fn preview_page(
    view: &RenderedView,
    settings: &ViewSettings,
    highlight_css: Option<&str>,
) -> Result<String, FormatError> {
    let mut stylesheet = settings.stylesheet();
    if let Some(css) = highlight_css {
        stylesheet.push('\n');
        stylesheet.push_str(css);
    }

    let classes = format!(
        "preview theme-{} {}",
        settings.theme,
        if settings.dark_mode { "dark" } else { "light" }
    );
    let body = format!(
        "<main class=\"{classes}\">\n{}</main>\n",
        view_to_html(view)?
    );

    let title = view.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let options = HtmlOptions::default().with_stylesheet(stylesheet);
    Ok(wrap_in_document(&body, title, &options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parser::parse_markdown;
    use crate::highlight::PlainHighlighter;
    use crate::render::render;

    #[test]
    fn test_font_size_is_clamped() {
        let mut settings = ViewSettings::default();
        assert_eq!(settings.font_size(), 16);
        for _ in 0..10 {
            settings.adjust_font_size(FONT_SIZE_STEP);
        }
        assert_eq!(settings.font_size(), MAX_FONT_SIZE);
        assert_eq!(settings.adjust_font_size(-100), MIN_FONT_SIZE);
        assert_eq!(ViewSettings::new(Theme::Purple, false, 99).font_size(), 24);
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Purple".parse::<Theme>().unwrap(), Theme::Purple);
        assert!("green".parse::<Theme>().is_err());
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut settings = ViewSettings::default();
        assert!(settings.dark_mode);
        assert!(!settings.toggle_dark_mode());
        assert!(settings.stylesheet().contains("#f3f4f6"));
    }

    #[test]
    fn test_preview_page() {
        let view = render(&parse_markdown("# Notes\n\nbody"), &PlainHighlighter);
        let settings = ViewSettings::new(Theme::Purple, true, 18);
        let page = preview_page(&view, &settings, Some(".hl { color: red; }")).unwrap();

        assert!(page.contains("<title>Notes</title>"));
        assert!(page.contains("<main class=\"preview theme-purple dark\">"));
        assert!(page.contains("font-size: 18px"));
        assert!(page.contains("#9333ea"));
        assert!(page.contains(".hl { color: red; }"));
        assert!(page.contains("<p>body</p>"));
    }
}
