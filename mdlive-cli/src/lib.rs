//! Support modules for the `mdlive` binary.
//!
//! The binary itself lives in `main.rs`; what is here is shared with its tests.

pub mod cli;
pub mod error;
pub mod transforms;
pub mod watch;

pub use error::CliError;
