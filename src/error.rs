//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and configuration errors, and provides semantic variants
//! for argument validation and external tool failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External tool failed ({status}) while running `{command}`\n{output}")]
    ExternalTool {
        command: String,
        status: String,
        output: String,
    },

    #[error("External tool timed out after {secs}s while running `{command}`")]
    Timeout { command: String, secs: u64 },

    #[error("Expected output was not produced: {}", path.display())]
    MissingArtifact { path: PathBuf },
}

impl Error {
    pub fn missing<S: Into<String>>(arg: S) -> Self {
        Error::MissingArgument { arg: arg.into() }
    }
}
