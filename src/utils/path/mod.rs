//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization and atomic file replacement

pub mod fs;

pub use fs::{normalize_path, resolve_path, write_atomic, write_if_changed};
