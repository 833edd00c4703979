//! Cache Module
//!
//! Namespaced storage keys, the per-key entry record and its codec,
//! connection readiness tracking, and the add/get/del operations.

mod connection;
mod entry;
mod keys;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use connection::ConnectionState;
pub use entry::{current_timestamp_ms, CacheEntry, Expiry, DEFAULT_STATUS};
pub use keys::{has_wildcard, resolve_key, split_key, WILDCARD};
pub use store::{AddOptions, Added, ResponseCache, SizeEstimator};
