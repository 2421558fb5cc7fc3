//! Small string helpers shared across layers.

/// Collapse all runs of whitespace (including newlines) into single spaces
/// and trim the ends.
///
/// Bot replies arrive as multi-line DOM text or message fragments; the
/// scoring gateway and the containment check both want a flat form.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to `max_chars`, appending `...` if shortened.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// Reduce arbitrary question text to a filesystem-safe slug for artifact
/// filenames: alphanumerics and spaces kept, spaces become hyphens, capped
/// at 50 characters.
pub fn slugify(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    let slug = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    slug.chars().take(50).collect()
}
