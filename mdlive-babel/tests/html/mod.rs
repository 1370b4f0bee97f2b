//! HTML format tests
//!
//! Export only: markdown → standalone HTML document.

mod escaping;
mod export;
