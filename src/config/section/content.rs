//! `[content]` section: where posts live and how they are named.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Corpus location and the `<prefix>.<slug>.<extension>` naming convention.
///
/// # Example
///
/// ```toml
/// [content]
/// dir = "app/routes"
/// prefix = "posts"
/// extension = "mdx"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the post files (relative to project root).
    pub dir: PathBuf,
    /// Leading filename segment shared by all posts.
    pub prefix: String,
    /// File extension without the leading dot.
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "app/routes".into(),
            prefix: "posts".into(),
            extension: "mdx".into(),
        }
    }
}

impl ContentConfig {
    pub const PREFIX: FieldPath = FieldPath::new("content.prefix");
    pub const EXTENSION: FieldPath = FieldPath::new("content.extension");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.prefix.is_empty() {
            diag.error(Self::PREFIX, "must not be empty");
        } else if self.prefix.contains(['/', '\\']) {
            diag.error(Self::PREFIX, "must be a filename segment, not a path");
        }

        if self.extension.is_empty() {
            diag.error(Self::EXTENSION, "must not be empty");
        } else if self.extension.starts_with('.') {
            diag.error_with_hint(
                Self::EXTENSION,
                format!("`{}` starts with a dot", self.extension),
                format!("use `{}`", self.extension.trim_start_matches('.')),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.content.dir, PathBuf::from("app/routes"));
        assert_eq!(config.content.prefix, "posts");
        assert_eq!(config.content.extension, "mdx");
    }

    #[test]
    fn test_custom_naming() {
        let config =
            test_parse_config("[content]\ndir = \"blog\"\nprefix = \"notes\"\nextension = \"md\"");
        assert_eq!(config.content.dir, PathBuf::from("blog"));
        assert_eq!(config.content.prefix, "notes");
        assert_eq!(config.content.extension, "md");
    }

    #[test]
    fn test_validate() {
        let mut diag = ConfigDiagnostics::new();
        ContentConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let config = ContentConfig {
            prefix: String::new(),
            extension: ".mdx".into(),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[1].hint.as_deref(), Some("use `mdx`"));
    }
}
