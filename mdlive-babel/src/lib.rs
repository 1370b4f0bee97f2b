//! Markdown parsing, live preview rendering and multi-format export
//!
//!     This crate turns markdown source into a document tree, renders that tree into a view
//!     with highlighted code blocks, and exports the source as markdown, plain text, HTML or
//!     PDF. It also keeps the editing session: a source buffer persisted on every change and a
//!     live preview that only ever shows the newest render.
//!
//!     This is a pure lib, that is, it powers mdlive-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std printing, env vars etc. Diagnostics go
//!     through `tracing`.
//!
//! Architecture
//!
//!     The pipeline is linear:
//!
//!         source text ──parse──▶ Document ──render(highlighter)──▶ RenderedView
//!              │                                                        │
//!              └──────────── Format::serialize ◀── html uses the view ──┘
//!
//!     Parsing is total. Any input yields a Document; constructs that don't map to a node are
//!     flattened or kept as literal text, never reported as errors.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── export.rs               # ExportRequest → Artifact entry point
//!     ├── highlight.rs            # Highlighter trait + syntect implementation
//!     ├── render.rs               # Document → RenderedView
//!     ├── preview.rs              # ViewSettings + standalone preview pages
//!     ├── session.rs              # SourceBuffer, EditSession, LivePreview
//!     ├── storage.rs              # Persistence trait, memory and file stores
//!     ├── formats
//!     │   ├── markdown            # comrak parser, identity export
//!     │   ├── text                # identity export
//!     │   ├── html                # RcDom serializer
//!     │   └── pdf                 # page layout + pdf-writer
//!     └── ir                      # Document and RenderedView trees, treeviz dump
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── <format>
//!     │   └── <testname>.rs
//!     ├── pdf.rs
//!     └── session.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     We never write a markdown parser or a PDF writer ourselves. comrak parses, syntect
//!     highlights, html5ever serializes HTML and pdf-writer produces PDF. The code here adapts
//!     between their models and ours.
//!
pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod highlight;
pub mod preview;
pub mod registry;
pub mod render;
pub mod session;
pub mod storage;

pub mod ir;

pub use error::{BufferError, ExportError, FormatError, PersistenceError};
pub use export::{encode, export_document, Artifact, ExportFormat, ExportRequest};
pub use format::{Format, SerializedDocument};
pub use highlight::{Highlighter, PlainHighlighter, StyledFragment, SyntectHighlighter};
pub use ir::nodes::Document;
pub use ir::view::RenderedView;
pub use preview::{Theme, ViewSettings};
pub use registry::FormatRegistry;
pub use session::{BufferState, EditSession, LivePreview, Snapshot, SourceBuffer};
pub use storage::{FileStore, MemoryStore, Persistence};

/// Parses markdown source into a [`Document`].
///
/// Never fails: malformed markdown degrades to literal text.
pub fn parse(source_text: &str) -> Document {
    formats::markdown::parser::parse_markdown(source_text)
}

/// Renders a document, highlighting its code blocks with `highlighter`.
pub fn render(doc: &Document, highlighter: &dyn Highlighter) -> RenderedView {
    render::render(doc, highlighter)
}
