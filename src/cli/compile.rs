//! Compile command implementation.
//!
//! Turns each post body into a JSON tree at `<build.output>/<slug>.json`
//! with its code blocks relabeled for the rendering component.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::CompileArgs;
use crate::config::SiteConfig;
use crate::logger::ProgressLine;
use crate::pipeline;
use crate::post::{self, PostError, SlugPattern, head::split_head};
use crate::tree::{MarkdownOptions, from_markdown};
use crate::utils::{path::resolve_path, path::write_if_changed, plural_count};
use crate::{debug, log};

/// What a compile run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Trees produced (written or already up to date).
    pub compiled: usize,
    /// Trees whose file content changed.
    pub written: usize,
    /// Posts excluded because of an error.
    pub skipped: usize,
}

/// Execute the compile command.
pub fn run(config: &SiteConfig, args: &CompileArgs) -> Result<CompileReport> {
    let pattern = SlugPattern::new(&config.content.prefix, &config.content.extension)
        .context("Invalid post filename pattern")?;

    let posts: Vec<PathBuf> = if args.paths.is_empty() {
        post::collect_posts(&config.content.dir, &pattern)?
    } else {
        args.paths
            .iter()
            .map(|path| resolve_path(path, &config.content.dir))
            .collect()
    };

    let progress = ProgressLine::new("compile", &[("posts", posts.len())]);
    let results: Vec<Option<bool>> = posts
        .par_iter()
        .map(|path| {
            let result = compile_file(path, &pattern, config);
            progress.inc("posts");
            match result {
                Ok(written) => Some(written),
                Err(e) => {
                    log!("skip"; "{:#}", e);
                    None
                }
            }
        })
        .collect();
    progress.finish();

    let mut report = CompileReport::default();
    for result in results {
        match result {
            Some(written) => {
                report.compiled += 1;
                report.written += usize::from(written);
            }
            None => report.skipped += 1,
        }
    }

    log!(
        "compile";
        "{}, {} written, {} skipped",
        plural_count(report.compiled, "tree"),
        report.written,
        report.skipped
    );
    Ok(report)
}

/// Compile one post. Returns whether the tree file changed.
fn compile_file(path: &Path, pattern: &SlugPattern, config: &SiteConfig) -> Result<bool> {
    let slug = post::slug_of(path, pattern)?;
    let source = fs::read_to_string(path).map_err(|e| PostError::Io(path.to_path_buf(), e))?;
    let head = split_head(&source)
        .ok_or_else(|| PostError::malformed(path, "missing `---` head block delimiters"))?;

    let doc = from_markdown(&source[head.body_start..], &MarkdownOptions::all());
    let doc = pipeline::compile(doc, &config.code);
    debug!("compile"; "{}: {} code blocks", slug, doc.count_tag(&config.code.component));

    let json = serde_json::to_string_pretty(&doc).context("Failed to serialize tree")?;
    let output = config.build.output.join(format!("{slug}.json"));

    let written = write_if_changed(&output, &json)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    if !written {
        debug!("compile"; "{} unchanged", config.root_relative(&output).display());
    }
    Ok(written)
}
