//! Key Namespace Module
//!
//! Deterministic mapping between logical entry names and storage keys.

// == Public Constants ==
/// Match-any token accepted in entry names for bulk get/del.
pub const WILDCARD: &str = "*";

// == Resolve ==
/// Resolves a logical entry name to its storage key.
///
/// One trailing colon is stripped from `prefix`, so the key carries
/// exactly one colon separator no matter how the prefix was configured.
/// Total over all inputs: an empty `name` resolves to a key ending in a
/// bare colon.
pub fn resolve_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.strip_suffix(':').unwrap_or(prefix);
    format!("{prefix}:{name}")
}

// == Wildcard Detection ==
/// Returns true if the key contains the wildcard token.
pub fn has_wildcard(key: &str) -> bool {
    key.contains(WILDCARD)
}

// == Split ==
/// Splits a storage key back into `(prefix, name)` at the first colon.
///
/// Keys produced by `resolve_key` always contain a colon; a key without
/// one is treated as all prefix with an empty name.
pub fn split_key(key: &str) -> (&str, &str) {
    match key.split_once(':') {
        Some((prefix, name)) => (prefix, name),
        None => (key, ""),
    }
}
