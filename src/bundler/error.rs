//! Error types for the bundling pipeline.
//!
//! [`Error`] covers every failure inside `crate::bundler`. The [`ErrorExt`] and
//! [`Context`] traits attach paths and messages to failures, and the
//! [`bail!`](crate::bail) macro returns early with a formatted message.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, analyzing and assembling a bundle.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// A required input (entry script, hooks directory, ...) does not exist.
    #[error("missing {what}: {}", path.display())]
    MissingInput {
        /// Human readable name of the input.
        what: &'static str,
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// Filesystem error with the path and action that failed.
    #[error("{action} `{}`: {source}", path.display())]
    Fs {
        /// What was being attempted.
        action: &'static str,
        /// Path involved in the failing operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An artifact's logical name cannot be placed in the distribution.
    #[error("invalid artifact name `{name}`: {reason}")]
    InvalidArtifactName {
        /// Name reported by the analyzer.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Plain I/O error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// An external program could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program name.
        command: String,
        /// Spawn error.
        error: io::Error,
    },

    /// The analyzer ran but reported failure.
    #[error("analyzer `{program}` failed with {status}: {stderr}")]
    AnalyzerFailed {
        /// Analyzer program.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Zip archive could not be written.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal failed.
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Invalid glob pattern while discovering hooks.
    #[error("pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attach path context to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`] naming `action` and `path`.
    fn fs_context(self, action: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, action: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Attach a message to a missing value.
pub trait Context<T> {
    /// Turns `None` into [`Error::GenericError`] carrying `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_names_the_path() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .fs_context("copying binary", "/tmp/msvcp90.dll");
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("copying binary"));
        assert!(msg.contains("msvcp90.dll"));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let value: Option<u8> = None;
        let err = value.context("name is required").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "name is required"));
    }
}
