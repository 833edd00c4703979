//! Store Client Facade
//!
//! The seam between the cache and a Redis-compatible backing store. The
//! cache consumes the small capability set below and never speaks the wire
//! protocol itself; integration tests plug an in-memory client in here.

use async_trait::async_trait;
use thiserror::Error;

// == Store Error ==
/// Failure surfaced by the underlying store client (network, protocol,
/// timeout). Opaque to the cache, which only forwards it.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wraps a client-side failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

// == Client Path ==
/// Which half of the read/write client pair a lifecycle event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPath {
    Read,
    Write,
}

// == Connection Event ==
/// Lifecycle notification from a store client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// TCP connection established, commands not yet accepted
    Connecting,
    /// The client is ready to serve commands
    Ready,
    /// A terminal client error
    Error,
    /// The connection was closed
    Closed,
}

// == Store Client Trait ==
/// Capability set the cache consumes from a Redis-compatible store.
///
/// An empty field list from `hash_get_all` means the key is absent;
/// `keys` expands a wildcard pattern to the currently matching keys.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Writes a hash record, replacing the fields it names.
    async fn hash_set(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> std::result::Result<(), StoreError>;

    /// Reads every field of a hash record; empty when the key is absent.
    async fn hash_get_all(
        &self,
        key: &str,
    ) -> std::result::Result<Vec<(String, String)>, StoreError>;

    /// Tells the store to evict a key after `seconds`.
    async fn expire(&self, key: &str, seconds: u64) -> std::result::Result<(), StoreError>;

    /// Lists the keys currently matching a wildcard pattern.
    async fn keys(&self, pattern: &str) -> std::result::Result<Vec<String>, StoreError>;

    /// Deletes one key, returning how many keys were removed (0 or 1).
    async fn delete(&self, key: &str) -> std::result::Result<u64, StoreError>;
}
