//! Inspection transforms
//!
//! Each transform is a stage + format combination:
//!
//! - `ast-treeviz`: the parsed document as a tree visualization (default)
//! - `ast-json`: the parsed document as JSON
//! - `view-json`: the rendered view, highlighted fragments included, as JSON
//!
//! Example: `mdlive inspect notes.md view-json`

use mdlive_babel::ir::treeviz::to_treeviz_str;
use mdlive_babel::{parse, render, Highlighter};

pub use crate::cli::AVAILABLE_TRANSFORMS;

pub const DEFAULT_TRANSFORM: &str = "ast-treeviz";

/// Execute a named transform on markdown source.
///
/// Returns the transformed output, or an error message for unknown transforms.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    highlighter: &dyn Highlighter,
) -> Result<String, String> {
    let doc = parse(source);
    match transform_name {
        "ast-treeviz" => Ok(to_treeviz_str(&doc)),
        "ast-json" => serde_json::to_string_pretty(&doc)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "view-json" => serde_json::to_string_pretty(&render(&doc, highlighter))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}
