//! Post identity from the `<prefix>.<slug>.<extension>` filename convention.

use super::PostError;
use regex::Regex;

/// Filename matcher for one naming convention.
#[derive(Debug, Clone)]
pub struct SlugPattern {
    prefix: String,
    suffix: String,
    regex: Regex,
}

impl SlugPattern {
    pub fn new(prefix: &str, extension: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"\A{}\.(.+)\.{}\z",
            regex::escape(prefix),
            regex::escape(extension)
        ))?;
        Ok(Self {
            prefix: format!("{prefix}."),
            suffix: format!(".{extension}"),
            regex,
        })
    }

    /// Whether a directory entry should be treated as a post at all.
    ///
    /// Looser than [`slug`](Self::slug): `posts.mdx` is a candidate that then
    /// fails with `UnrecognizedFilename`.
    pub fn is_candidate(&self, filename: &str) -> bool {
        filename.starts_with(&self.prefix) && filename.ends_with(&self.suffix)
    }

    /// Extract the slug. The capture is greedy, so `posts.a.b.mdx` is `a.b`.
    pub fn slug<'a>(&self, filename: &'a str) -> Result<&'a str, PostError> {
        self.regex
            .captures(filename)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| PostError::UnrecognizedFilename(filename.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> SlugPattern {
        SlugPattern::new("posts", "mdx").unwrap()
    }

    #[test]
    fn test_slug() {
        let pattern = pattern();
        assert_eq!(pattern.slug("posts.hello-world.mdx").unwrap(), "hello-world");
        assert_eq!(pattern.slug("posts.a.b.mdx").unwrap(), "a.b");
    }

    #[test]
    fn test_unrecognized() {
        let pattern = pattern();
        for name in ["posts.mdx", "post.a.mdx", "posts.a.md", "xposts.a.mdx", "posts.a.mdx.bak"] {
            assert!(
                matches!(pattern.slug(name), Err(PostError::UnrecognizedFilename(n)) if n == name),
                "{name}"
            );
        }
    }

    #[test]
    fn test_is_candidate() {
        let pattern = pattern();
        assert!(pattern.is_candidate("posts.a.mdx"));
        assert!(pattern.is_candidate("posts.mdx.mdx"));
        assert!(!pattern.is_candidate("_index.tsx"));
        assert!(!pattern.is_candidate("posts.a.md"));
    }

    #[test]
    fn test_prefix_is_literal() {
        let pattern = SlugPattern::new("a+b", "md").unwrap();
        assert_eq!(pattern.slug("a+b.x.md").unwrap(), "x");
        assert!(pattern.slug("aab.x.md").is_err());
    }
}
