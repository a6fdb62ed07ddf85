//! Entity name normalization and matching.
//!
//! Decides whether two free-text names refer to the same real-world entity
//! using case-insensitive substring containment over normalized forms.
//! This is deliberately simple: no phonetic or edit-distance matching.
//! Containment produces both false positives ("Bank of America" vs
//! "America" matches) and false negatives (unrelated spellings of the same
//! entity never match). Callers rely on this exact behavior, so the
//! heuristic is preserved as-is; the short-string gate below is the only
//! guard against spurious matches on initials.

/// Minimum normalized length of the shorter name for a containment match
/// to count. Blocks matches on bare initials like "A." or "JD".
pub const MIN_MATCH_LEN: usize = 3;

/// Normalize an entity name for comparison.
///
/// Lowercases, trims, strips periods and commas (punctuation that does not
/// change entity identity), and collapses runs of whitespace.
pub fn normalize_entity(raw: &str) -> String {
    let lowered: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ','))
        .collect();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    words.join(" ")
}

/// Whether two names refer to the same entity.
///
/// Symmetric: containment is checked in both directions, so
/// `entities_match(a, b) == entities_match(b, a)`.
pub fn entities_match(a: &str, b: &str) -> bool {
    let na = normalize_entity(a);
    let nb = normalize_entity(b);
    if na.len().min(nb.len()) < MIN_MATCH_LEN {
        return false;
    }
    na.contains(&nb) || nb.contains(&na)
}

/// Match confidence for weighted callers: 1.0 on a containment match,
/// 0.0 otherwise. Containment is all-or-nothing, so there are no
/// intermediate confidences.
pub fn match_confidence(a: &str, b: &str) -> f64 {
    if entities_match(a, b) {
        1.0
    } else {
        0.0
    }
}
