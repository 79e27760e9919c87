//! `[index]` section: the post summary index.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image used for posts that do not declare one.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/blog_no_image_placeholder.webp";

/// Summary index settings.
///
/// # Example
///
/// ```toml
/// [index]
/// output = "tools/posts-summaries.json"
/// placeholder_image = "/images/blog_no_image_placeholder.webp"
/// rewrite = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index file path (relative to project root).
    pub output: PathBuf,
    /// Image path filled into posts without an `image`.
    pub placeholder_image: String,
    /// Write augmented heads back into post files.
    pub rewrite: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: "tools/posts-summaries.json".into(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.into(),
            rewrite: true,
        }
    }
}

impl IndexConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("index.output");
    pub const PLACEHOLDER_IMAGE: FieldPath = FieldPath::new("index.placeholder_image");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::OUTPUT, "must not be empty");
        }
        if self.placeholder_image.trim().is_empty() {
            diag.error_with_hint(
                Self::PLACEHOLDER_IMAGE,
                "must not be empty",
                format!("the default is `{DEFAULT_PLACEHOLDER_IMAGE}`"),
            );
        }
    }
}
