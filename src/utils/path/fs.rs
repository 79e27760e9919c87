//! Filesystem path helpers.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - resolve relative paths with fallback directory
//! - `write_atomic` - replace a file without ever exposing a partial write
//! - `write_if_changed` - `write_atomic` unless the file already holds the bytes

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a path that may be relative to cwd or a fallback directory.
///
/// Always returns an absolute path.
///
/// Tries in order:
/// 1. If absolute, use as-is
/// 2. If exists relative to cwd, normalize to absolute
/// 3. Otherwise, resolve relative to fallback_dir
///
/// # Example
/// ```ignore
/// // User passes "posts.hello.mdx", fallback is the content dir
/// let resolved = resolve_path(Path::new("posts.hello.mdx"), content_dir);
/// ```
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if path.exists() {
        return normalize_path(path);
    }

    normalize_path(&fallback_dir.join(path))
}

/// Replace `path` with `contents` atomically.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
/// Permissions of an existing target are carried over.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_ref())?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Atomically replace `path` unless it already holds exactly `contents`.
///
/// Returns whether the file was written. Unchanged files keep their mtime.
pub fn write_if_changed(path: &Path, contents: impl AsRef<[u8]>) -> io::Result<bool> {
    let contents = contents.as_ref();
    if fs::read(path).is_ok_and(|current| current == contents) {
        return Ok(false);
    }
    write_atomic(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_resolve_path_absolute() {
        let path = Path::new("/absolute/path");
        let resolved = resolve_path(path, Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_resolve_path_fallback() {
        let path = Path::new("nonexistent/path");
        let resolved = resolve_path(path, Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/nonexistent/path"));
    }

    #[test]
    fn test_write_atomic_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out.json");

        write_atomic(&target, "[]").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("posts.hello.mdx");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, "new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        // No temp files left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_if_changed() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("index.json");

        assert!(write_if_changed(&target, "[]").unwrap());
        assert!(!write_if_changed(&target, "[]").unwrap());
        assert!(write_if_changed(&target, "[1]").unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "[1]");
    }
}
