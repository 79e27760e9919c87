//! Estimated reading time.
//!
//! CJK ideographs and ASCII letters are read at different speeds, so each
//! bucket is rounded up to whole minutes on its own before summing.

use crate::config::ReadTimeConfig;
use std::ops::RangeInclusive;

/// CJK Unified Ideographs counted as Chinese text.
const CJK_RANGE: RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';

/// Characters per minute for each script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRates {
    pub cjk_per_minute: usize,
    pub ascii_per_minute: usize,
}

impl Default for ReadRates {
    fn default() -> Self {
        Self::from(&ReadTimeConfig::default())
    }
}

impl From<&ReadTimeConfig> for ReadRates {
    fn from(config: &ReadTimeConfig) -> Self {
        Self {
            cjk_per_minute: config.cjk_per_minute as usize,
            ascii_per_minute: config.ascii_per_minute as usize,
        }
    }
}

/// Character counts per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharCounts {
    pub cjk: usize,
    pub ascii: usize,
}

pub fn count_chars(text: &str) -> CharCounts {
    text.chars().fold(CharCounts::default(), |mut counts, c| {
        if c.is_ascii_alphabetic() {
            counts.ascii += 1;
        } else if CJK_RANGE.contains(&c) {
            counts.cjk += 1;
        }
        counts
    })
}

/// Minutes to read `text`: `ceil(cjk / cjk_rate) + ceil(ascii / ascii_rate)`.
pub fn estimate_read_time(text: &str, rates: ReadRates) -> usize {
    let counts = count_chars(text);
    counts.cjk.div_ceil(rates.cjk_per_minute.max(1))
        + counts.ascii.div_ceil(rates.ascii_per_minute.max(1))
}
