//! `[build]` section: compiled tree output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory receiving `<slug>.json` trees (relative to project root).
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "build/trees".into(),
        }
    }
}
