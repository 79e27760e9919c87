//! Summary index batch driver.
//!
//! Processes every post in the content directory in parallel, augments
//! heads that need it, and replaces the index file with all summaries
//! sorted newest first.
//!
//! Per-post failures are logged and skipped. The only fatal error is an
//! unreadable content directory, which aborts before anything is written.

use crate::{
    config::SiteConfig,
    debug, log,
    logger::ProgressLine,
    post::{self, FileOutcome, PostContext, PostSummary},
    utils::{path::write_if_changed, plural_count},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{cmp::Ordering, path::Path};

/// Knobs for one index run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Write the index but leave post files untouched.
    pub no_rewrite: bool,
}

/// What an index run did.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Sorted summaries, as written to the index.
    pub summaries: Vec<PostSummary>,
    /// Posts whose head was augmented (or would be, on a dry run).
    pub rewritten: usize,
    /// Posts excluded because of an error.
    pub skipped: usize,
    /// The index file content changed.
    pub index_written: bool,
}

/// Build the summary index for the configured corpus.
pub fn build_index(config: &SiteConfig, options: IndexOptions) -> Result<BatchReport> {
    let ctx = PostContext::from_config(config)?;
    let posts = post::collect_posts(&config.content.dir, &ctx.pattern)?;
    let write_posts = config.index.rewrite && !options.no_rewrite && !options.dry_run;

    debug!("index"; "found {} in {}", plural_count(posts.len(), "post"), config.content.dir.display());

    let progress = ProgressLine::new("index", &[("posts", posts.len())]);
    let outcomes: Vec<Option<FileOutcome>> = posts
        .par_iter()
        .map(|path| {
            let outcome = post::process_file(path, &ctx, write_posts);
            progress.inc("posts");
            match outcome {
                Ok(outcome) => {
                    if outcome.written {
                        debug!("index"; "rewrote {}", config.root_relative(path).display());
                    }
                    Some(outcome)
                }
                Err(e) => {
                    log!("skip"; "{}", e);
                    None
                }
            }
        })
        .collect();
    progress.finish();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Some(outcome) => {
                if outcome.needs_rewrite {
                    report.rewritten += 1;
                }
                report.summaries.push(outcome.summary);
            }
            None => report.skipped += 1,
        }
    }
    sort_summaries(&mut report.summaries);

    if !options.dry_run {
        report.index_written = write_index(&config.index.output, &report.summaries)?;
    }

    log!(
        "index";
        "{}, {} {}, {} skipped{}",
        plural_count(report.summaries.len(), "post"),
        report.rewritten,
        if write_posts { "rewritten" } else { "need rewrite" },
        report.skipped,
        if options.dry_run { " (dry run)" } else { "" }
    );

    Ok(report)
}

/// Sort newest first; same dates by title ascending.
pub fn sort_summaries(summaries: &mut [PostSummary]) {
    summaries.sort_by(compare_summaries);
}

fn compare_summaries(a: &PostSummary, b: &PostSummary) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title))
}

/// Serialize `summaries` as 2-space indented JSON and replace `path`.
///
/// Returns `false` without touching the file when it already holds the same bytes.
pub fn write_index(path: &Path, summaries: &[PostSummary]) -> Result<bool> {
    let json = serde_json::to_string_pretty(summaries).context("Failed to serialize index")?;

    let written = write_if_changed(path, &json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if !written {
        debug!("index"; "{} unchanged", path.display());
    }
    Ok(written)
}
