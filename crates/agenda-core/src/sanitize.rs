//! Event title sanitizing.
//!
//! Titles end up inside markdown wiki-links and are commonly used as note
//! file names, so characters that break either are removed or replaced.

/// Literal replacements applied by [`sanitize_title`], in order.
///
/// Matching is case-sensitive and replaces every occurrence.
pub const TITLE_REPLACEMENTS: [(&str, &str); 7] = [
    ("FW: ", ""),
    (":", ""),
    ("&", "and"),
    ("<", ""),
    (">", ""),
    ("*", ""),
    ("/", "-"),
];

/// Removes characters that are unsafe in file names and wiki-links.
///
/// # Example
///
/// ```rust
/// use agenda_core::sanitize_title;
///
/// assert_eq!(sanitize_title("FW: 1:1 Carl<>Frank"), "11 CarlFrank");
/// assert_eq!(sanitize_title("Q&A / Planning"), "QandA - Planning");
/// ```
pub fn sanitize_title(title: &str) -> String {
    TITLE_REPLACEMENTS
        .iter()
        .fold(title.to_string(), |acc, (from, to)| acc.replace(from, to))
}
