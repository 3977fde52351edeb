//! Display-name canonicalization used for duplicate detection.

/// Trims the name and collapses interior whitespace runs to one space.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Identity of a name for duplicate detection: the normalized form, lowercased
/// with full Unicode case mapping so `"ÁLVARO"` and `"álvaro"` collide.
pub fn identity_key(raw: &str) -> String {
    normalize(raw).to_lowercase()
}
