//! Error types for msgbuild
//!
//! Library code returns `BuildError`; the binary wraps it in `anyhow`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for msgbuild operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for msgbuild operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Filesystem operation failed on a specific path
    #[error("{action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external program could not be started
    #[error("failed to start command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program ran and reported failure
    #[error("command '{command}' failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Pass-through requested for a tool outside the allow-list
    #[error("'{name}' is not a direct tool (allowed: {allowed})")]
    UnknownTool { name: String, allowed: String },
}

impl BuildError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Exit status the process should terminate with for this error.
    ///
    /// A failed subprocess hands its own code through when it fits in a
    /// process exit status; everything else maps to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CommandFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
