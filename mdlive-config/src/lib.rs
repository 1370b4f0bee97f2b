//! Shared configuration loader for the mdlive toolchain.
//!
//! `defaults/mdlive.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdliveConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use mdlive_babel::formats::pdf::layout::PageGeometry;
use mdlive_babel::{Theme, ViewSettings};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/mdlive.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "mdlive.toml";

/// Top-level configuration consumed by mdlive applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdliveConfig {
    pub view: ViewConfig,
    pub highlight: HighlightConfig,
    pub convert: ConvertConfig,
    pub storage: StorageConfig,
}

/// Presentation of the preview page.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    pub theme: Theme,
    pub dark_mode: bool,
    pub font_size: i64,
}

impl From<&ViewConfig> for ViewSettings {
    fn from(config: &ViewConfig) -> Self {
        ViewSettings::new(config.theme, config.dark_mode, config.font_size)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub enabled: bool,
    pub light_theme: String,
    pub dark_theme: String,
}

impl HighlightConfig {
    /// The syntect theme matching the page mode.
    pub fn theme_for(&self, dark_mode: bool) -> &str {
        if dark_mode {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub embed_highlight_css: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl From<&PdfConfig> for PageGeometry {
    fn from(config: &PdfConfig) -> Self {
        PageGeometry {
            page_width: config.page_width,
            page_height: config.page_height,
            margin: config.margin,
            font_size: config.font_size,
            line_height: config.line_height,
        }
    }
}

/// Where drafts live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub directory: String,
    pub draft_key: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdliveConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdliveConfig, ConfigError> {
    Loader::new().build()
}
