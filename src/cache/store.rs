//! Cache Operations Module
//!
//! The add/get/del protocol over the store client facade, with connection
//! gating, wildcard expansion, and diagnostic messages in the
//! `SET key ~size Kb` / `GET key ~size Kb` / `DEL key` format.

use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::cache::connection::ConnectionState;
use crate::cache::entry::{CacheEntry, Expiry, DEFAULT_STATUS};
use crate::cache::keys::{has_wildcard, resolve_key, split_key, WILDCARD};
use crate::client::{ClientPath, ConnectionEvent, StoreClient, StoreError};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::events::{EventSink, TracingSink};

// == Size Estimator ==
/// Pluggable entry-size estimator, used only for diagnostic messages.
pub type SizeEstimator = Arc<dyn Fn(&CacheEntry) -> usize + Send + Sync>;

// == Add Options ==
/// Optional per-entry overrides for [`ResponseCache::add`].
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Overrides the configured default content type
    pub content_type: Option<String>,
    /// Overrides the default status of 200
    pub status: Option<u16>,
    /// Raw TTL request: `-1` never expires, a positive value expires
    /// after that many seconds, anything else uses the configured default
    pub expire: Option<i64>,
}

// == Added ==
/// Successful `add` outcome: the entry exactly as written.
#[derive(Debug, Clone)]
pub struct Added {
    pub name: String,
    pub entry: CacheEntry,
}

// == Response Cache ==
/// Redis-backed cache for rendered response bodies.
///
/// Every operation checks connection readiness first and degrades to a
/// miss-shaped success while the store is unavailable, so callers treat
/// "cache down" exactly like "cache empty". The cache never retries;
/// retry policy belongs to the caller.
pub struct ResponseCache {
    client: Arc<dyn StoreClient>,
    config: Config,
    connection: ConnectionState,
    events: Arc<dyn EventSink>,
    sizer: SizeEstimator,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a cache over a store client.
    ///
    /// Diagnostics go to a [`TracingSink`] unless replaced, and entry
    /// sizes come from [`CacheEntry::approx_size`] unless replaced.
    pub fn new(client: Arc<dyn StoreClient>, config: Config) -> Self {
        let connection = if config.disable_connection_tracking {
            ConnectionState::pinned()
        } else {
            ConnectionState::new()
        };

        Self {
            client,
            connection,
            events: Arc::new(TracingSink),
            sizer: Arc::new(CacheEntry::approx_size),
            config,
        }
    }

    /// Replaces the diagnostic event sink.
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Replaces the entry-size estimator used in diagnostic messages.
    pub fn with_size_estimator(mut self, sizer: SizeEstimator) -> Self {
        self.sizer = sizer;
        self
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current connection readiness.
    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    // == Connection Events ==
    /// Feeds a store client lifecycle event into the readiness tracker.
    ///
    /// Callers wire this to their client's notification hooks, once per
    /// path. With connection tracking disabled the flags stay pinned but
    /// the events are still reported to the sink.
    pub fn handle_connection_event(&self, path: ClientPath, event: ConnectionEvent) {
        self.connection.apply(path, event);

        let host = &self.config.host;
        let port = self.config.port;
        match event {
            ConnectionEvent::Connecting => {
                self.events
                    .message(&format!("TCP connection established to redis://{host}:{port}"));
            }
            ConnectionEvent::Ready => {
                self.events.connected(host, port);
                self.events
                    .message(&format!("OK connected to redis://{host}:{port}"));
            }
            ConnectionEvent::Closed => {
                self.events.disconnected(host, port);
                self.events
                    .message(&format!("Disconnected from redis://{host}:{port}"));
            }
            ConnectionEvent::Error => {
                let path_name = match path {
                    ClientPath::Read => "read",
                    ClientPath::Write => "write",
                };
                self.events.error(&CacheError::Store(StoreError::new(format!(
                    "connection error on {path_name} client (redis://{host}:{port})"
                ))));
            }
        }
    }

    // == Add ==
    /// Writes one entry under `name`, replacing any previous record.
    ///
    /// Returns `Ok(None)` without touching the store when either path is
    /// not ready; callers treat that exactly like a miss. A store failure
    /// during the write or the follow-up expire drops both readiness
    /// flags before the error is returned.
    pub async fn add(
        &self,
        name: &str,
        body: impl Into<String>,
        options: AddOptions,
    ) -> Result<Option<Added>> {
        if !self.connection.write_ready() || !self.connection.read_ready() {
            return Ok(None);
        }

        let key = resolve_key(&self.config.prefix, name);
        // Trimmed prefix, so the entry matches what a later decode attaches
        let entry = CacheEntry::new(
            split_key(&key).0,
            name,
            body.into(),
            options
                .content_type
                .unwrap_or_else(|| self.config.default_content_type.clone()),
            options.status.unwrap_or(DEFAULT_STATUS),
            Expiry::resolve(options.expire, self.config.default_expire),
        );

        match self.write_entry(&key, &entry).await {
            Ok(()) => Ok(Some(Added {
                name: name.to_string(),
                entry,
            })),
            Err(store_error) => {
                // A partial write leaves unknown state behind; treat it
                // as a full disconnect.
                self.connection.force_down();
                Err(self.report(store_error))
            }
        }
    }

    async fn write_entry(
        &self,
        key: &str,
        entry: &CacheEntry,
    ) -> std::result::Result<(), StoreError> {
        self.client.hash_set(key, &entry.to_fields()).await?;

        let kb = (self.sizer)(entry) as f64 / 1024.0;
        match entry.expire {
            Expiry::After(seconds) => {
                self.client.expire(key, seconds).await?;
                self.events
                    .message(&format!("SET {key} ~{kb:.2} Kb {seconds} TTL (sec)"));
            }
            Expiry::Never => {
                self.events.message(&format!("SET {key} ~{kb:.2} Kb"));
            }
        }

        Ok(())
    }

    // == Get ==
    /// Reads entries by name; `None` reads every entry under the prefix.
    ///
    /// Wildcard names expand via key listing and the matching records are
    /// fetched concurrently; the result follows the store's listing
    /// order, so it is deterministic for a fixed store snapshot. Listed
    /// keys whose record vanished before the fetch come back as vacant
    /// entries ([`CacheEntry::is_vacant`]).
    pub async fn get(&self, name: Option<&str>) -> Result<Vec<CacheEntry>> {
        if !self.connection.read_ready() {
            return Ok(Vec::new());
        }

        let name = name.unwrap_or(WILDCARD);
        let key = resolve_key(&self.config.prefix, name);

        let outcome = if has_wildcard(&key) {
            self.get_matching(&key).await
        } else {
            self.get_single(&key).await
        };

        outcome.map_err(|store_error| self.report(store_error))
    }

    async fn get_single(&self, key: &str) -> std::result::Result<Vec<CacheEntry>, StoreError> {
        let entry = self.fetch_key(key).await?;
        Ok(entry.into_iter().collect())
    }

    async fn get_matching(
        &self,
        pattern: &str,
    ) -> std::result::Result<Vec<CacheEntry>, StoreError> {
        let keys = self.client.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        // try_join_all returns results in listing order even though the
        // fetches complete in any order
        let fetches = keys.iter().map(|key| self.fetch_key(key));
        let results = try_join_all(fetches).await?;

        Ok(results
            .into_iter()
            .zip(&keys)
            .map(|(entry, key)| entry.unwrap_or_else(|| CacheEntry::vacant(key)))
            .collect())
    }

    /// Fetches and decodes one key, emitting a GET message for non-empty
    /// records.
    async fn fetch_key(&self, key: &str) -> std::result::Result<Option<CacheEntry>, StoreError> {
        let fields = self.client.hash_get_all(key).await?;
        let entry = CacheEntry::from_fields(key, &fields);

        if let Some(entry) = &entry {
            let kb = (self.sizer)(entry) as f64 / 1024.0;
            self.events.message(&format!("GET {key} ~{kb:.2} Kb"));
        }

        Ok(entry)
    }

    // == Del ==
    /// Deletes entries by name; wildcard names delete every match.
    ///
    /// The returned count is the number of keys matched at listing time,
    /// not the number confirmed removed: a key that a concurrent process
    /// deleted between listing and deletion still counts. Deleting a
    /// missing non-wildcard name returns 0, not an error.
    pub async fn del(&self, name: &str) -> Result<u64> {
        if name.is_empty() {
            let error = CacheError::InvalidArgument(
                "del requires a non-empty entry name".to_string(),
            );
            self.events.error(&error);
            return Err(error);
        }

        if !self.connection.write_ready() {
            return Ok(0);
        }

        let key = resolve_key(&self.config.prefix, name);

        let outcome = if has_wildcard(&key) {
            self.del_matching(&key).await
        } else {
            self.del_single(&key).await
        };

        outcome.map_err(|store_error| self.report(store_error))
    }

    async fn del_single(&self, key: &str) -> std::result::Result<u64, StoreError> {
        let removed = self.client.delete(key).await?;
        self.events.message(&format!("DEL {key}"));
        Ok(removed)
    }

    async fn del_matching(&self, pattern: &str) -> std::result::Result<u64, StoreError> {
        let keys = self.client.keys(pattern).await?;

        // Sequential on purpose: the first failure aborts the remaining
        // deletions, and completed ones stay deleted
        for key in &keys {
            self.client.delete(key).await?;
            self.events.message(&format!("DEL {key}"));
        }

        Ok(keys.len() as u64)
    }

    // == Failure Reporting ==
    /// Converts a store failure into the operation error, mirroring it to
    /// the event sink.
    fn report(&self, store_error: StoreError) -> CacheError {
        let error = CacheError::Store(store_error);
        self.events.error(&error);
        error
    }
}
