//! Project configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── code       # [code]
//! │   ├── content    # [content]
//! │   ├── index      # [index]
//! │   └── read_time  # [read_time]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The config file is optional: without one, every section uses its
//! defaults and paths are resolved against the current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, CodeConfig, ContentConfig, IndexConfig, ReadTimeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Corpus location and naming
    #[serde(default)]
    pub content: ContentConfig,

    /// Summary index settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Reading speeds
    #[serde(default)]
    pub read_time: ReadTimeConfig,

    /// Code block component settings
    #[serde(default)]
    pub code: CodeConfig,

    /// Tree output settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no config file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = config
            .config_path
            .parent()
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        crate::logger::set_verbose(cli.verbose);
        config.apply_command_options(cli);
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI overrides.
    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.content.dir, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Index { args } => {
                Self::update_option(&mut self.index.output, args.file.as_ref());
                if args.no_rewrite {
                    self.index.rewrite = false;
                }
            }
            Commands::Compile { args } => {
                if args.no_highlight {
                    self.code.highlight = false;
                }
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.set_root(&root);

        if !self.config_path.as_os_str().is_empty() {
            self.config_path = normalize_path(&self.config_path);
        }

        self.content.dir = normalize_path(&root.join(&self.content.dir));
        self.index.output = normalize_path(&root.join(&self.index.output));
        self.build.output = normalize_path(&root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, collecting every error before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.content.validate(&mut diag);
        self.index.validate(&mut diag);
        self.read_time.validate(&mut diag);
        self.code.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[content\ndir = \"posts\"").is_err());
    }

    #[test]
    fn test_root_relative() {
        let mut config = SiteConfig::default();
        config.set_root(Path::new("/blog"));
        assert_eq!(
            config.root_relative("/blog/app/routes/posts.a.mdx"),
            PathBuf::from("app/routes/posts.a.mdx")
        );
        assert_eq!(config.root_relative("/elsewhere"), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[content]\nprefix = \"posts\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.content.prefix, "posts");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "quire", "-c", "blog", "-o", "out", "index", "-f", "idx.json", "--no-rewrite",
        ]);
        let mut config = SiteConfig::default();
        config.apply_command_options(&cli);
        config.normalize_paths(Path::new("/site"));

        assert_eq!(config.content.dir, PathBuf::from("/site/blog"));
        assert_eq!(config.build.output, PathBuf::from("/site/out"));
        assert_eq!(config.index.output, PathBuf::from("/site/idx.json"));
        assert!(!config.index.rewrite);
        assert!(config.code.highlight);
    }

    #[test]
    fn test_compile_no_highlight() {
        let cli = Cli::parse_from(["quire", "compile", "--no-highlight"]);
        let mut config = SiteConfig::default();
        config.apply_command_options(&cli);
        assert!(!config.code.highlight);
        assert!(config.index.rewrite);
    }

    #[test]
    fn test_validate_reports_all_sections() {
        let config = test_parse_config(
            "[content]\nprefix = \"\"\n[read_time]\ncjk_per_minute = 0\n[code]\ncomponent = \"pre\"",
        );
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }
}
