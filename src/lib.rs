//! Response Cache - a Redis-backed cache for rendered responses
//!
//! Stores response bodies as hash records under namespaced keys, with TTL
//! support, wildcard read/invalidation, and connection-gated operations
//! that degrade to cache misses while the backing store is unreachable.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod events;

pub use cache::{AddOptions, Added, CacheEntry, ConnectionState, Expiry, ResponseCache};
pub use client::{ClientPath, ConnectionEvent, StoreClient, StoreError};
pub use config::Config;
pub use error::{CacheError, Result};
pub use events::{EventSink, NullSink, TracingSink};
