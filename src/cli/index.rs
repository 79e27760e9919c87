//! Index command implementation.

use anyhow::Result;

use crate::cli::IndexArgs;
use crate::config::SiteConfig;
use crate::index::{BatchReport, IndexOptions, build_index};

/// Execute the index command.
///
/// `--file` and `--no-rewrite` are already folded into `config` by
/// [`SiteConfig::load`].
pub fn run(config: &SiteConfig, args: &IndexArgs) -> Result<BatchReport> {
    let options = IndexOptions {
        dry_run: args.dry_run,
        no_rewrite: args.no_rewrite,
    };
    build_index(config, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_dry() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.content.dir = dir.path().to_path_buf();
        config.index.output = dir.path().join("index.json");
        fs::write(dir.path().join("posts.a.mdx"), "---\n---\nbody\n").unwrap();

        let args = IndexArgs {
            file: None,
            dry_run: true,
            no_rewrite: false,
        };
        let report = run(&config, &args).unwrap();
        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.summaries[0].slug, "a");
        assert!(!config.index.output.exists());
    }
}
