//! Post metadata extraction and head rewriting.
//!
//! # Module Structure
//!
//! ```text
//! post/
//! ├── error.rs      # PostError
//! ├── head.rs       # `---` head block location and YAML parsing
//! ├── meta.rs       # MetadataBlock, MetaEntry
//! ├── read_time.rs  # estimated reading time
//! ├── rewrite.rs    # head re-serialization
//! ├── slug.rs       # filename convention
//! ├── social.rs     # twitter/og card entries
//! └── summary.rs    # PostSummary derivation
//! ```
//!
//! # Flow
//!
//! ```text
//! source ─► parse_head ─► derive_summary ─► rewrite_if_needed ─► write_atomic
//!                              │
//!                              └─► PostSummary (index entry)
//! ```

mod error;
pub mod head;
mod meta;
pub mod read_time;
mod rewrite;
pub mod slug;
pub mod social;
mod summary;

pub use error::PostError;
use head::parse_head;
pub use meta::{MetaEntry, MetadataBlock};
pub use read_time::ReadRates;
pub use rewrite::rewrite_if_needed;
pub use slug::SlugPattern;
pub use summary::{Derived, PostSummary, derive_summary};

use crate::{config::SiteConfig, utils::date::DateTimeUtc, utils::path::write_atomic};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything per-post processing needs, resolved once per run.
#[derive(Debug, Clone)]
pub struct PostContext {
    /// `YYYY-MM-DD` filled into undated posts.
    pub today: String,
    pub placeholder_image: String,
    pub rates: ReadRates,
    pub pattern: SlugPattern,
}

impl PostContext {
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let pattern = SlugPattern::new(&config.content.prefix, &config.content.extension)
            .context("Invalid post filename pattern")?;
        Ok(Self {
            today: DateTimeUtc::today().to_ymd(),
            placeholder_image: config.index.placeholder_image.clone(),
            rates: ReadRates::from(&config.read_time),
            pattern,
        })
    }
}

/// Outcome of processing one post's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub summary: PostSummary,
    /// New source text when the head was augmented.
    pub rewritten: Option<String>,
}

/// Parse, derive and (if needed) re-serialize one post. No I/O.
pub fn process_source(path: &Path, source: &str, ctx: &PostContext) -> Result<Processed, PostError> {
    let filename = file_name(path);
    // Identity first: a post with an unknown name is never parsed or mutated.
    ctx.pattern.slug(&filename)?;

    let parsed = parse_head(path, source)?;
    let mut block = parsed.block.clone();
    let Derived {
        summary,
        need_rewrite,
    } = derive_summary(&mut block, &filename, parsed.body(source), ctx)?;
    let rewritten = rewrite_if_needed(source, &parsed, &block, need_rewrite)?;

    Ok(Processed { summary, rewritten })
}

/// Result of [`process_file`].
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub summary: PostSummary,
    /// The head needed augmentation.
    pub needs_rewrite: bool,
    /// The file on disk was replaced.
    pub written: bool,
}

/// Process the post at `path`, replacing the file atomically when its head
/// was augmented and `write` is set.
pub fn process_file(path: &Path, ctx: &PostContext, write: bool) -> Result<FileOutcome, PostError> {
    let source = fs::read_to_string(path).map_err(|e| PostError::Io(path.to_path_buf(), e))?;
    let Processed { summary, rewritten } = process_source(path, &source, ctx)?;

    let needs_rewrite = rewritten.is_some();
    let written = match rewritten {
        Some(contents) if write => {
            write_atomic(path, contents).map_err(|e| PostError::Io(path.to_path_buf(), e))?;
            true
        }
        _ => false,
    };

    Ok(FileOutcome {
        summary,
        needs_rewrite,
        written,
    })
}

/// List candidate post files in `dir`, sorted by name.
///
/// Fails only when the directory itself cannot be read.
pub fn collect_posts(dir: &Path, pattern: &SlugPattern) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read content directory {}", dir.display()))?;

    let mut posts: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.path())
        .filter(|path| pattern.is_candidate(&file_name(path)))
        .collect();
    posts.sort();
    Ok(posts)
}

/// Slug of the post at `path` under `pattern`.
pub fn slug_of(path: &Path, pattern: &SlugPattern) -> Result<String, PostError> {
    pattern.slug(&file_name(path)).map(str::to_string)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Context with a fixed `today` for deterministic tests.
#[cfg(test)]
pub fn test_context() -> PostContext {
    let mut ctx = PostContext::from_config(&SiteConfig::default()).unwrap();
    ctx.today = "2024-06-15".into();
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BARE: &str = "---\nmeta:\n  - title: Hi\n---\nHello world\n";

    #[test]
    fn test_process_source_idempotent() {
        let ctx = test_context();
        let path = Path::new("posts.hi.mdx");

        let first = process_source(path, BARE, &ctx).unwrap();
        let rewritten = first.rewritten.expect("bare post is augmented");
        assert!(rewritten.ends_with("---\nHello world\n"));

        let second = process_source(path, &rewritten, &ctx).unwrap();
        assert_eq!(second.rewritten, None);
        assert_eq!(second.summary, first.summary);
    }

    #[test]
    fn test_read_time_excludes_head() {
        let ctx = test_context();
        let long_title = "a".repeat(500);
        let source = format!("---\nmeta:\n  - title: {long_title}\n---\nshort\n");
        let processed = process_source(Path::new("posts.x.mdx"), &source, &ctx).unwrap();
        assert_eq!(processed.summary.estimated_read_time, 1);
    }

    #[test]
    fn test_lenient_head_values_are_indexed() {
        let ctx = test_context();
        let path = Path::new("posts.a.mdx");

        let source = "---\nmeta:\n  - title: Hi\ntags: [rust, 2024]\n---\nx\n";
        let processed = process_source(path, source, &ctx).unwrap();
        assert_eq!(processed.summary.tags, ["rust", "2024"]);

        let source = "---\nmeta: [{title: Hi}, \"just a string\"]\n---\nx\n";
        let processed = process_source(path, source, &ctx).unwrap();
        assert_eq!(processed.summary.title, "Hi");
        let rewritten = processed.rewritten.expect("bare post is augmented");
        assert!(rewritten.contains("just a string"));
    }

    #[test]
    fn test_bom_kept_on_rewrite() {
        let ctx = test_context();
        let source = format!("\u{feff}{BARE}");
        let processed = process_source(Path::new("posts.hi.mdx"), &source, &ctx).unwrap();
        assert_eq!(processed.summary.title, "Hi");

        let rewritten = processed.rewritten.expect("bare post is augmented");
        assert!(rewritten.starts_with("\u{feff}---\n"));
        assert!(rewritten.ends_with("---\nHello world\n"));
    }

    #[test]
    fn test_unrecognized_name_checked_before_head() {
        let ctx = test_context();
        let err = process_source(Path::new("posts.mdx"), "no head", &ctx).unwrap_err();
        assert!(matches!(err, PostError::UnrecognizedFilename(_)));
    }

    #[test]
    fn test_process_file_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.hi.mdx");
        fs::write(&path, BARE).unwrap();
        let ctx = test_context();

        let outcome = process_file(&path, &ctx, true).unwrap();
        assert!(outcome.needs_rewrite && outcome.written);
        let after_first = fs::read(&path).unwrap();

        let outcome = process_file(&path, &ctx, true).unwrap();
        assert!(!outcome.needs_rewrite && !outcome.written);
        assert_eq!(fs::read(&path).unwrap(), after_first);
    }

    #[test]
    fn test_process_file_without_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.hi.mdx");
        fs::write(&path, BARE).unwrap();

        let outcome = process_file(&path, &test_context(), false).unwrap();
        assert!(outcome.needs_rewrite);
        assert!(!outcome.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), BARE);
    }

    #[test]
    fn test_process_file_missing() {
        let err = process_file(Path::new("/nonexistent/posts.a.mdx"), &test_context(), true)
            .unwrap_err();
        assert!(matches!(err, PostError::Io(..)));
    }

    #[test]
    fn test_collect_posts() {
        let dir = TempDir::new().unwrap();
        for name in ["posts.b.mdx", "posts.a.mdx", "_index.tsx", "posts.c.md"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("posts.dir.mdx")).unwrap();

        let ctx = test_context();
        let posts = collect_posts(dir.path(), &ctx.pattern).unwrap();
        let names: Vec<_> = posts.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, ["posts.a.mdx", "posts.b.mdx"]);
    }

    #[test]
    fn test_collect_posts_unreadable() {
        let ctx = test_context();
        assert!(collect_posts(Path::new("/nonexistent/routes"), &ctx.pattern).is_err());
    }
}
