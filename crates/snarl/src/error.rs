//! Error types for snarl operations.
//!
//! The graph engine itself is total over well-formed input and never errors;
//! everything here belongs to the snapshot, config, and CLI layers.

use std::io;
use thiserror::Error;

/// The error type for snarl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot could not be read or parsed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

/// A specialized Result type for snarl operations.
pub type Result<T> = std::result::Result<T, Error>;
