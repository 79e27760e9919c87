//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 posts)
/// - `plural_s(1)` -> `""` (1 post)
/// - `plural_s(5)` -> `"s"` (5 posts)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "post")` -> `"0 posts"`
/// - `plural_count(1, "post")` -> `"1 post"`
/// - `plural_count(5, "post")` -> `"5 posts"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
