//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.
//!
//! An unreachable store is deliberately not an error: operations degrade
//! to a cache miss instead, so the request path being accelerated never
//! fails because the cache is down.

use thiserror::Error;

use crate::client::StoreError;

// == Cache Error Enum ==
/// Unified error type for cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required argument was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store reported a failure
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
