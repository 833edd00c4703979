//! Connection State Tracker
//!
//! Two readiness flags, one per client path, updated from store client
//! lifecycle events. Every cache operation reads them to decide whether
//! to proceed or degrade to a miss.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::{ClientPath, ConnectionEvent};

// == Connection State ==
/// Tracks read-path and write-path readiness.
///
/// Both flags start false and flip true on a `Ready` event for their
/// path. Any `Error` or `Closed` event on either path drops both flags:
/// the paths are coupled, so one broken client degrades the whole cache
/// to miss-only mode rather than risk inconsistent reads.
#[derive(Debug)]
pub struct ConnectionState {
    read_ready: AtomicBool,
    write_ready: AtomicBool,
    /// When tracking is disabled both flags are pinned true permanently.
    pinned: bool,
}

impl ConnectionState {
    // == Constructors ==
    /// Creates a tracker with both paths not yet ready.
    pub fn new() -> Self {
        Self {
            read_ready: AtomicBool::new(false),
            write_ready: AtomicBool::new(false),
            pinned: false,
        }
    }

    /// Creates a tracker pinned permanently ready, for configurations
    /// that disable connection tracking.
    pub fn pinned() -> Self {
        Self {
            read_ready: AtomicBool::new(true),
            write_ready: AtomicBool::new(true),
            pinned: true,
        }
    }

    // == Readiness ==
    /// True when the read path has reported ready.
    pub fn read_ready(&self) -> bool {
        self.read_ready.load(Ordering::SeqCst)
    }

    /// True when the write path has reported ready.
    pub fn write_ready(&self) -> bool {
        self.write_ready.load(Ordering::SeqCst)
    }

    // == Apply Event ==
    /// Applies a store client lifecycle event to the flags.
    pub fn apply(&self, path: ClientPath, event: ConnectionEvent) {
        if self.pinned {
            return;
        }

        match event {
            ConnectionEvent::Ready => match path {
                ClientPath::Read => self.read_ready.store(true, Ordering::SeqCst),
                ClientPath::Write => self.write_ready.store(true, Ordering::SeqCst),
            },
            ConnectionEvent::Error | ConnectionEvent::Closed => self.force_down(),
            ConnectionEvent::Connecting => {}
        }
    }

    // == Force Down ==
    /// Drops both flags, degrading the cache to miss-only mode. Used by
    /// `add` after a store failure to fail safe against partial state.
    pub fn force_down(&self) {
        if self.pinned {
            return;
        }

        self.read_ready.store(false, Ordering::SeqCst);
        self.write_ready.store(false, Ordering::SeqCst);
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_ready() {
        let state = ConnectionState::new();
        assert!(!state.read_ready());
        assert!(!state.write_ready());
    }

    #[test]
    fn test_ready_is_per_path() {
        let state = ConnectionState::new();

        state.apply(ClientPath::Read, ConnectionEvent::Ready);
        assert!(state.read_ready());
        assert!(!state.write_ready());

        state.apply(ClientPath::Write, ConnectionEvent::Ready);
        assert!(state.write_ready());
    }

    #[test]
    fn test_error_drops_both_paths() {
        let state = ConnectionState::new();
        state.apply(ClientPath::Read, ConnectionEvent::Ready);
        state.apply(ClientPath::Write, ConnectionEvent::Ready);

        state.apply(ClientPath::Read, ConnectionEvent::Error);
        assert!(!state.read_ready());
        assert!(!state.write_ready());
    }

    #[test]
    fn test_closed_drops_both_paths() {
        let state = ConnectionState::new();
        state.apply(ClientPath::Read, ConnectionEvent::Ready);
        state.apply(ClientPath::Write, ConnectionEvent::Ready);

        state.apply(ClientPath::Write, ConnectionEvent::Closed);
        assert!(!state.read_ready());
        assert!(!state.write_ready());
    }

    #[test]
    fn test_connecting_does_not_mark_ready() {
        let state = ConnectionState::new();
        state.apply(ClientPath::Read, ConnectionEvent::Connecting);
        assert!(!state.read_ready());
    }

    #[test]
    fn test_force_down() {
        let state = ConnectionState::new();
        state.apply(ClientPath::Read, ConnectionEvent::Ready);
        state.apply(ClientPath::Write, ConnectionEvent::Ready);

        state.force_down();
        assert!(!state.read_ready());
        assert!(!state.write_ready());
    }

    #[test]
    fn test_pinned_ignores_events() {
        let state = ConnectionState::pinned();
        assert!(state.read_ready());
        assert!(state.write_ready());

        state.apply(ClientPath::Read, ConnectionEvent::Error);
        state.force_down();
        assert!(state.read_ready());
        assert!(state.write_ready());
    }
}
