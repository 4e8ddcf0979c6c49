// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required external program is absent or failed its probe.
    #[error("required program \"{program}\" not found: {reason}")]
    ToolMissing { program: String, reason: String },

    /// The external program for a single item could not be started.
    #[error("could not start \"{program}\": {reason}")]
    Launch { program: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BatchError {
    /// Process exit code for an error that reaches `main`.
    ///
    /// Every fatal error maps to 1; per-item failures never get here.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
