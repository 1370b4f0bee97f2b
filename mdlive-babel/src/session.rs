//! Editing session: the source buffer, its persistence and the live preview.
//!
//! A buffer is `Clean` when its text equals the last value written to the
//! store and `Dirty` otherwise. Every successful edit bumps the revision and
//! immediately tries to persist; a failing store is logged and leaves the
//! buffer `Dirty`, editing carries on.
//!
//! Readers never borrow the buffer. They take a [`Snapshot`] (revision plus
//! shared text) and hand it to a [`LivePreview`], which keeps only the newest
//! render by revision.

use crate::error::BufferError;
use crate::formats::markdown::parser::parse_markdown;
use crate::highlight::Highlighter;
use crate::ir::view::RenderedView;
use crate::render::render;
use crate::storage::Persistence;
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Clean,
    Dirty,
}

/// Editable text plus the value last written to storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBuffer {
    text: String,
    persisted: String,
}

impl SourceBuffer {
    /// A clean buffer holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        let text = initial.into();
        Self {
            persisted: text.clone(),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> BufferState {
        if self.text == self.persisted {
            BufferState::Clean
        } else {
            BufferState::Dirty
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        self.check_offset(offset)?;
        self.text.insert_str(offset, text);
        Ok(())
    }

    pub fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<(), BufferError> {
        self.check_offset(range.start)?;
        self.check_offset(range.end)?;
        if range.start > range.end {
            return Err(BufferError::OutOfBounds {
                offset: range.start,
                len: self.text.len(),
            });
        }
        self.text.replace_range(range, text);
        Ok(())
    }

    /// Record that the current text is what storage holds.
    pub fn mark_persisted(&mut self) {
        self.persisted.clone_from(&self.text);
    }

    fn check_offset(&self, offset: usize) -> Result<(), BufferError> {
        if offset > self.text.len() {
            return Err(BufferError::OutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(BufferError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

/// Immutable view of the buffer at one revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub revision: u64,
    pub text: Arc<str>,
}

/// One editor session bound to a storage key.
#[derive(Debug)]
pub struct EditSession<P: Persistence> {
    store: P,
    key: String,
    buffer: SourceBuffer,
    revision: u64,
}

impl<P: Persistence> EditSession<P> {
    /// Seed the buffer from `store`. A failed load starts an empty session.
    pub fn start(store: P, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = match store.load(&key) {
            Ok(Some(text)) => text,
            Ok(None) => String::new(),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "could not load draft, starting empty");
                String::new()
            }
        };

        Self {
            store,
            key,
            buffer: SourceBuffer::new(initial),
            revision: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn state(&self) -> BufferState {
        self.buffer.state()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn into_store(self) -> P {
        self.store
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: impl Into<String>) -> BufferState {
        self.buffer.set_text(text);
        self.after_edit()
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<BufferState, BufferError> {
        self.buffer.insert(offset, text)?;
        Ok(self.after_edit())
    }

    pub fn replace_range(
        &mut self,
        range: Range<usize>,
        text: &str,
    ) -> Result<BufferState, BufferError> {
        self.buffer.replace_range(range, text)?;
        Ok(self.after_edit())
    }

    /// Write the current text if it differs from the stored value.
    pub fn persist(&mut self) -> BufferState {
        if self.buffer.state() == BufferState::Clean {
            return BufferState::Clean;
        }
        match self.store.save(&self.key, self.buffer.text()) {
            Ok(()) => self.buffer.mark_persisted(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "could not persist draft");
            }
        }
        self.buffer.state()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            text: Arc::from(self.buffer.text()),
        }
    }

    fn after_edit(&mut self) -> BufferState {
        self.revision += 1;
        self.persist()
    }
}

/// Latest rendered view, installed last-writer-wins by revision.
#[derive(Debug, Clone, Default)]
pub struct LivePreview {
    revision: Option<u64>,
    view: Option<Arc<RenderedView>>,
}

impl LivePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn view(&self) -> Option<Arc<RenderedView>> {
        self.view.clone()
    }

    /// Render `snapshot` and install it unless a newer revision is showing.
    ///
    /// Returns whether the view was replaced.
    pub fn update(&mut self, snapshot: &Snapshot, highlighter: &dyn Highlighter) -> bool {
        if self.is_stale(snapshot.revision) {
            tracing::debug!(revision = snapshot.revision, "skipping stale render");
            return false;
        }
        let view = render(&parse_markdown(&snapshot.text), highlighter);
        self.install(snapshot.revision, view)
    }

    /// Install an already rendered view for `revision`.
    pub fn install(&mut self, revision: u64, view: RenderedView) -> bool {
        if self.is_stale(revision) {
            tracing::debug!(revision, "discarding stale render");
            return false;
        }
        self.revision = Some(revision);
        self.view = Some(Arc::new(view));
        true
    }

    fn is_stale(&self, revision: u64) -> bool {
        self.revision.is_some_and(|current| revision < current)
    }
}
