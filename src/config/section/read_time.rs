//! `[read_time]` section: reading speeds for the estimated read time.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Characters read per minute, per script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadTimeConfig {
    /// CJK ideographs per minute.
    pub cjk_per_minute: u32,
    /// ASCII letters per minute.
    pub ascii_per_minute: u32,
}

impl Default for ReadTimeConfig {
    fn default() -> Self {
        Self {
            cjk_per_minute: 350,
            ascii_per_minute: 225,
        }
    }
}

impl ReadTimeConfig {
    pub const CJK_PER_MINUTE: FieldPath = FieldPath::new("read_time.cjk_per_minute");
    pub const ASCII_PER_MINUTE: FieldPath = FieldPath::new("read_time.ascii_per_minute");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.cjk_per_minute == 0 {
            diag.error_with_hint(
                Self::CJK_PER_MINUTE,
                "must be greater than zero",
                "the default is 350",
            );
        }
        if self.ascii_per_minute == 0 {
            diag.error_with_hint(
                Self::ASCII_PER_MINUTE,
                "must be greater than zero",
                "the default is 225",
            );
        }
    }
}
