//! Intermediate Representation (IR) for markdown documents.
//!
//! [`nodes`] holds the parsed document tree produced by the markdown parser.
//! [`view`] holds the rendered view: the same tree with code blocks replaced
//! by highlighted fragments. Both are immutable snapshots; a new parse or
//! render supersedes them instead of mutating them. [`treeviz`] draws the
//! parsed tree for inspection.

pub mod nodes;
pub mod treeviz;
pub mod view;
