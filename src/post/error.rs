//! Per-post error type.
//!
//! None of these abort a batch: the driver logs the error, skips the post
//! and moves on.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    /// Head block delimiters missing, or the head is not valid YAML.
    #[error("malformed document `{}`: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    /// Filename does not follow `<prefix>.<slug>.<extension>`.
    #[error("unrecognized filename `{0}`")]
    UnrecognizedFilename(String),

    #[error("IO error on `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to serialize head block")]
    Serialize(#[from] serde_yaml::Error),
}

impl PostError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
