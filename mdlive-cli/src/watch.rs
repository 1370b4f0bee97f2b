//! File watching for `mdlive preview --watch`.
//!
//! The watcher observes the directory holding the input rather than the file
//! itself: most editors save by writing a new file and renaming it over the old
//! one, which drops a watch placed on the file. Events arrive over a channel and
//! are handled in order on the calling thread.

use crate::error::CliError;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    file_name: Option<OsString>,
}

impl FileWatcher {
    pub fn new(path: &Path) -> Result<Self, CliError> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&watch_root(path), RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file_name: path.file_name().map(|name| name.to_os_string()),
        })
    }

    /// Block until the watched file changes.
    ///
    /// Returns `None` once the watcher is gone.
    pub fn next_change(&self) -> Option<Result<(), CliError>> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) if self.is_relevant(&event) => return Some(Ok(())),
                Ok(Ok(_)) => continue,
                Ok(Err(err)) => return Some(Err(err.into())),
                Err(_) => return None,
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            return false;
        }
        event
            .paths
            .iter()
            .any(|path| path.file_name().map(|name| name.to_os_string()) == self.file_name)
    }
}

fn watch_root(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Run `on_change` for every change of `path` until the watcher stops.
///
/// A failing `on_change` is logged and watching continues.
pub fn watch_file<F>(path: &Path, mut on_change: F) -> Result<(), CliError>
where
    F: FnMut() -> Result<(), CliError>,
{
    let watcher = FileWatcher::new(path)?;
    tracing::info!(path = %path.display(), "watching for changes");

    while let Some(change) = watcher.next_change() {
        change?;
        if let Err(err) = on_change() {
            tracing::warn!(error = %err, "re-render failed");
        }
    }
    Ok(())
}
