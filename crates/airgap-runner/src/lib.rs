//! Library support for the `airgap` binary.
//!
//! The binary stays thin; loading fetched payload files and formatting the
//! clearance report live here so they can be unit tested.

pub mod input;
pub mod report;

use thiserror::Error;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Reading an input file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The offending path.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The YAML configuration did not parse.
    #[error("Configuration decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The depths payload did not parse.
    #[error("Depths decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `--gage` argument was not an `ID=PATH` pair.
    #[error("Invalid gage argument {0:?}, expected ID=PATH")]
    BadGageArgument(String),

    /// Building or refreshing the session failed.
    #[error(transparent)]
    Clearance(#[from] airgap_clearance::ClearanceError),
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
