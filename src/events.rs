//! Event Sink
//!
//! Fire-and-forget diagnostics channel. Operations report through their
//! returned `Result`; the sink only observes, is never awaited, and is
//! never required for correctness, so tests can verify behavior without
//! subscribing to events.

use tracing::{debug, error, info};

use crate::error::CacheError;

// == Event Sink Trait ==
/// Observer for cache diagnostics and connection lifecycle notices.
///
/// Every method has a no-op default, so implementors subscribe only to
/// what they care about.
pub trait EventSink: Send + Sync {
    /// Informational notice, e.g. `SET cache:home ~0.12 Kb`.
    fn message(&self, _message: &str) {}

    /// An operation failure, mirrored from the operation's `Result`.
    fn error(&self, _error: &CacheError) {}

    /// The store connection became ready.
    fn connected(&self, _host: &str, _port: u16) {}

    /// The store connection was lost.
    fn disconnected(&self, _host: &str, _port: u16) {}
}

// == Tracing Sink ==
/// Default sink: forwards events to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn message(&self, message: &str) {
        debug!("{message}");
    }

    fn error(&self, error: &CacheError) {
        error!("{error}");
    }

    fn connected(&self, host: &str, port: u16) {
        info!("connected to redis://{host}:{port}");
    }

    fn disconnected(&self, host: &str, port: u16) {
        info!("disconnected from redis://{host}:{port}");
    }
}

// == Null Sink ==
/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {}
