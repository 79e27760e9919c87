//! Head block location and parsing.
//!
//! A post starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---\n
//! meta:\n
//!   - title: Hello\n
//! ---\n
//! body...
//! ```
//!
//! `\r\n` line endings are accepted. An empty head (`---\n---\n`) is valid.

use super::{MetadataBlock, PostError};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::{ops::Range, path::Path, sync::LazyLock};

/// Group 1 spans both delimiters, group 2 the YAML between them.
static HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(---\r?\n(?:(.*?)\r?\n)?---)(?:\r?\n|\z)").unwrap()
});

/// Location of the head block inside a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head<'a> {
    /// YAML text between the delimiters.
    pub yaml: &'a str,
    /// Byte range from the opening `---` through the closing `---`.
    pub span: Range<usize>,
    /// Byte offset where the body starts.
    pub body_start: usize,
    /// Line ending used by the opening delimiter.
    pub eol: &'static str,
}

/// A located head with its parsed contents.
#[derive(Debug, Clone)]
pub struct ParsedHead<'a> {
    pub head: Head<'a>,
    /// Raw mapping in source key order.
    pub mapping: Mapping,
    pub block: MetadataBlock,
}

const BOM: char = '\u{feff}';

/// Locate the head block, or `None` when the delimiters are missing.
///
/// A leading byte order mark is skipped; spans still index into `source`.
pub fn split_head(source: &str) -> Option<Head<'_>> {
    let offset = if source.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    let rest = &source[offset..];

    let caps = HEAD_RE.captures(rest)?;
    let fenced = caps.get(1)?;
    let whole = caps.get(0)?;
    let eol = if rest.starts_with("---\r\n") {
        "\r\n"
    } else {
        "\n"
    };

    Some(Head {
        yaml: caps.get(2).map_or("", |m| m.as_str()),
        span: fenced.start() + offset..fenced.end() + offset,
        body_start: whole.end() + offset,
        eol,
    })
}

/// Locate and parse the head block of the post at `path`.
pub fn parse_head<'a>(path: &Path, source: &'a str) -> Result<ParsedHead<'a>, PostError> {
    let head = split_head(source)
        .ok_or_else(|| PostError::malformed(path, "missing `---` head block delimiters"))?;

    let mapping = parse_mapping(head.yaml).map_err(|reason| PostError::malformed(path, reason))?;
    let block = serde_yaml::from_value(Value::Mapping(mapping.clone()))
        .map_err(|e| PostError::malformed(path, e.to_string()))?;

    Ok(ParsedHead {
        head,
        mapping,
        block,
    })
}

fn parse_mapping(yaml: &str) -> Result<Mapping, String> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml).map_err(|e| e.to_string())? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err("head block is not a mapping".to_string()),
    }
}

impl ParsedHead<'_> {
    /// Body text after the head block.
    pub fn body<'s>(&self, source: &'s str) -> &'s str {
        &source[self.head.body_start..]
    }
}
