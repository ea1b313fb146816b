/// Keyword matching primitives shared by the scorer and the session engine.

/// Split text into lower-cased word tokens.
///
/// Characters that are neither alphanumeric, underscore, nor whitespace are
/// stripped before splitting on whitespace runs. Empty tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(|s| s.to_string())
        .collect()
}

/// Returns true if the lower-cased text contains any of the given keywords
/// as a substring. First-match semantics are the caller's concern; this is
/// a plain containment check.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|kw| lowered.contains(kw))
}
