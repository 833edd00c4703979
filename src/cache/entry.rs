//! Cache Entry Module
//!
//! The structured record stored per key and its hash field codec.
//! Entries are written as field/value pairs rather than one blob, so a
//! single field can be read back without deserializing the whole body.

use chrono::Utc;
use serde::Serialize;

use crate::cache::keys::split_key;

// == Wire Field Names ==
const FIELD_BODY: &str = "body";
const FIELD_TYPE: &str = "type";
const FIELD_STATUS: &str = "status";
const FIELD_TOUCHED: &str = "touched";
const FIELD_EXPIRE: &str = "expire";

/// Status recorded when an entry does not specify one.
pub const DEFAULT_STATUS: u16 = 200;

/// Wire sentinel meaning "never expires".
const NEVER_SENTINEL: i64 = -1;

// == Expiry ==
/// Expiration policy for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expiry {
    /// No TTL; the store keeps the entry until it is deleted
    Never,
    /// The store evicts the entry after this many seconds (always > 0)
    After(u64),
}

impl Expiry {
    /// Resolves a caller-requested raw TTL against the configured default.
    ///
    /// `-1` is the never-expire sentinel and positive values request a
    /// TTL. Zero and other negatives mean "no explicit expiration
    /// requested" and fall back to `default`, as does an absent request.
    pub fn resolve(requested: Option<i64>, default: Expiry) -> Expiry {
        match requested {
            Some(NEVER_SENTINEL) => Expiry::Never,
            Some(seconds) if seconds > 0 => Expiry::After(seconds as u64),
            _ => default,
        }
    }

    /// Wire form of the policy: `-1` for never, else the TTL in seconds.
    pub fn raw_seconds(&self) -> i64 {
        match self {
            Expiry::Never => NEVER_SENTINEL,
            Expiry::After(seconds) => *seconds as i64,
        }
    }

    fn from_raw(raw: i64) -> Expiry {
        if raw > 0 {
            Expiry::After(raw as u64)
        } else {
            Expiry::Never
        }
    }
}

// == Cache Entry ==
/// One record per storage key: the cached payload plus its metadata.
///
/// Entries are never mutated in place; overwriting a name replaces the
/// record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheEntry {
    /// The cached payload
    pub body: String,
    /// How the body should be interpreted by the caller
    pub content_type: String,
    /// Outcome code associated with the cached response
    pub status: u16,
    /// Unix milliseconds of the last write; 0 marks a vacant entry
    pub touched_at: i64,
    /// Expiration policy
    pub expire: Expiry,
    /// Logical entry name (the part of the key after the prefix)
    pub name: String,
    /// Namespace prefix the entry was stored under
    pub prefix: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Builds a fresh entry for a write, stamping `touched_at` with the
    /// current time.
    pub fn new(
        prefix: &str,
        name: &str,
        body: String,
        content_type: String,
        status: u16,
        expire: Expiry,
    ) -> Self {
        Self {
            body,
            content_type,
            status,
            touched_at: current_timestamp_ms(),
            expire,
            name: name.to_string(),
            prefix: prefix.to_string(),
        }
    }

    // == Vacant ==
    /// Placeholder for a wildcard match whose record vanished between key
    /// listing and fetch. `touched_at` stays 0 and `is_vacant` reports true.
    pub fn vacant(key: &str) -> Self {
        let (prefix, name) = split_key(key);
        Self {
            body: String::new(),
            content_type: String::new(),
            status: 0,
            touched_at: 0,
            expire: Expiry::Never,
            name: name.to_string(),
            prefix: prefix.to_string(),
        }
    }

    /// True for placeholder entries produced when a listed key had no
    /// record left by fetch time.
    pub fn is_vacant(&self) -> bool {
        self.touched_at == 0
    }

    // == Encode ==
    /// Hash field/value pairs written to the store.
    ///
    /// `name` and `prefix` are not stored; they are reattached from the
    /// storage key on decode.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            (FIELD_BODY.to_string(), self.body.clone()),
            (FIELD_TYPE.to_string(), self.content_type.clone()),
            (FIELD_STATUS.to_string(), self.status.to_string()),
            (FIELD_TOUCHED.to_string(), self.touched_at.to_string()),
            (FIELD_EXPIRE.to_string(), self.expire.raw_seconds().to_string()),
        ]
    }

    // == Decode ==
    /// Rebuilds an entry from stored fields, attaching `name` and `prefix`
    /// split from the storage key.
    ///
    /// Returns `None` when the store produced no fields (absent key).
    /// Missing or garbled numeric fields fall back to their defaults
    /// rather than failing the read.
    pub fn from_fields(key: &str, fields: &[(String, String)]) -> Option<Self> {
        if fields.is_empty() {
            return None;
        }

        let (prefix, name) = split_key(key);
        let mut entry = Self {
            body: String::new(),
            content_type: String::new(),
            status: DEFAULT_STATUS,
            touched_at: 0,
            expire: Expiry::Never,
            name: name.to_string(),
            prefix: prefix.to_string(),
        };

        for (field, value) in fields {
            match field.as_str() {
                FIELD_BODY => entry.body = value.clone(),
                FIELD_TYPE => entry.content_type = value.clone(),
                FIELD_STATUS => entry.status = value.parse().unwrap_or(DEFAULT_STATUS),
                FIELD_TOUCHED => entry.touched_at = value.parse().unwrap_or(0),
                FIELD_EXPIRE => {
                    entry.expire = value.parse().map(Expiry::from_raw).unwrap_or(Expiry::Never)
                }
                _ => {}
            }
        }

        Some(entry)
    }

    // == Approximate Size ==
    /// Approximate encoded size in bytes, used for diagnostic messages.
    pub fn approx_size(&self) -> usize {
        self.to_fields()
            .iter()
            .map(|(field, value)| field.len() + value.len())
            .sum()
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_resolve_explicit_seconds() {
        assert_eq!(Expiry::resolve(Some(60), Expiry::Never), Expiry::After(60));
    }

    #[test]
    fn test_expiry_resolve_never_sentinel() {
        assert_eq!(Expiry::resolve(Some(-1), Expiry::After(30)), Expiry::Never);
    }

    #[test]
    fn test_expiry_resolve_unset_falls_back() {
        assert_eq!(Expiry::resolve(None, Expiry::After(30)), Expiry::After(30));
        assert_eq!(Expiry::resolve(Some(0), Expiry::After(30)), Expiry::After(30));
        assert_eq!(Expiry::resolve(Some(-7), Expiry::After(30)), Expiry::After(30));
        assert_eq!(Expiry::resolve(None, Expiry::Never), Expiry::Never);
    }

    #[test]
    fn test_expiry_raw_seconds() {
        assert_eq!(Expiry::Never.raw_seconds(), -1);
        assert_eq!(Expiry::After(60).raw_seconds(), 60);
    }

    #[test]
    fn test_new_stamps_touched_at() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new(
            "cache",
            "home",
            "<html></html>".to_string(),
            "text/html".to_string(),
            200,
            Expiry::After(60),
        );

        assert!(entry.touched_at >= before);
        assert!(!entry.is_vacant());
        assert_eq!(entry.name, "home");
        assert_eq!(entry.prefix, "cache");
    }

    #[test]
    fn test_fields_roundtrip() {
        let entry = CacheEntry::new(
            "cache",
            "home",
            "<html></html>".to_string(),
            "text/html".to_string(),
            200,
            Expiry::After(60),
        );

        let decoded = CacheEntry::from_fields("cache:home", &entry.to_fields()).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_from_fields_empty_is_none() {
        assert!(CacheEntry::from_fields("cache:home", &[]).is_none());
    }

    #[test]
    fn test_from_fields_garbled_numbers_fall_back() {
        let fields = vec![
            (FIELD_BODY.to_string(), "payload".to_string()),
            (FIELD_STATUS.to_string(), "not-a-number".to_string()),
            (FIELD_EXPIRE.to_string(), "also-bad".to_string()),
        ];

        let entry = CacheEntry::from_fields("cache:home", &fields).unwrap();
        assert_eq!(entry.status, DEFAULT_STATUS);
        assert_eq!(entry.expire, Expiry::Never);
        assert_eq!(entry.body, "payload");
    }

    #[test]
    fn test_from_fields_ignores_unknown_fields() {
        let fields = vec![
            (FIELD_BODY.to_string(), "payload".to_string()),
            ("unrelated".to_string(), "value".to_string()),
        ];

        let entry = CacheEntry::from_fields("cache:home", &fields).unwrap();
        assert_eq!(entry.body, "payload");
    }

    #[test]
    fn test_entry_serializes_for_inspection() {
        let entry = CacheEntry::new(
            "cache",
            "home",
            "<html></html>".to_string(),
            "text/html".to_string(),
            200,
            Expiry::Never,
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["name"], "home");
        assert_eq!(json["prefix"], "cache");
    }

    #[test]
    fn test_vacant_marker() {
        let entry = CacheEntry::vacant("cache:gone");
        assert!(entry.is_vacant());
        assert_eq!(entry.name, "gone");
        assert_eq!(entry.prefix, "cache");
        assert!(entry.body.is_empty());
    }

    #[test]
    fn test_approx_size_counts_encoded_fields() {
        let entry = CacheEntry::new(
            "cache",
            "home",
            "x".repeat(100),
            "text/html".to_string(),
            200,
            Expiry::Never,
        );

        let size = entry.approx_size();
        assert!(size > 100, "size {size} should cover body and metadata");
    }
}
