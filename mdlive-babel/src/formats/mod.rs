//! Format implementations
//!
//! Every format turns markdown source into an export artifact. Markdown and
//! text are identity exports, HTML parses and renders, PDF lays out the
//! literal text.

pub mod html;
pub mod markdown;
pub mod pdf;
pub mod text;

pub use html::{HtmlFormat, HtmlOptions};
pub use markdown::MarkdownFormat;
pub use pdf::PdfFormat;
pub use text::TextFormat;
