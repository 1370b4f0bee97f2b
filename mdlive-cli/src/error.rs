use mdlive_babel::{ExportError, FormatError, PersistenceError};
use mdlive_config::ConfigError;
use std::io;
use thiserror::Error;

/// Everything a command can fail with. `main` prints it and exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error reading file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Error writing file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Execution error: {0}")]
    Transform(String),
    #[error("Binary formats (like PDF) require an output file. Use -o <path>.")]
    BinaryToStdout,
    #[error("Draft could not be saved under key '{0}'")]
    DraftNotSaved(String),
    #[error("Invalid value '{value}' for --extra-{flag}")]
    InvalidExtra { flag: String, value: String },
}
