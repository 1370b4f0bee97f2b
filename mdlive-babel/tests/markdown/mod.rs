//! Markdown format tests
//!
//! Parsing (markdown → Document) and identity export.

mod export;
mod import;
mod properties;
