//! Two-tier cache manager
//!
//! Fast tier: in-process map, lost on restart. Slow tier: durable
//! key/value store, authoritative across restarts. Memory is a
//! write-through, read-aside subset of the durable tier and is promoted
//! from it only on a memory miss.
//!
//! The cache is an optimization layer, not a source of truth: every
//! durable-tier failure is swallowed, logged and counted, and degrades to
//! miss/best-effort behavior. `get` and `set` never fail from the
//! caller's point of view.
//!
//! Known race, accepted: two `set`s for one key may finish their durable
//! writes out of order. Memory then holds the freshest value and wins
//! until it is dropped, because durable data only re-enters via a miss.

use super::clock::Clock;
use super::entry::CacheEntry;
use super::policy::CacheKey;
use super::store::KeyValueStore;
use crate::constants::{CACHE_KEY_PREFIX, CACHE_METADATA_KEY};
use crate::errors::StoreError;
use crate::logger::{self, LogTag};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Diagnostic snapshot of both tiers
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub memory_count: usize,
    pub durable_count: usize,
    pub total_size_formatted: String,
    pub oldest_key: Option<String>,
    pub newest_key: Option<String>,
    /// Swallowed durable-tier failures since startup; a growing number
    /// with an "empty" cache points at a broken store, not a cold one
    pub store_failures: u64,
}

/// Per-key usage record, diagnostics only; droppable and rebuilt by `set`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyUsage {
    pub last_updated: i64,
    pub ttl_minutes: u64,
    pub approx_size_bytes: usize,
}

type UsageMetadata = HashMap<String, KeyUsage>;

pub struct CacheManager {
    memory: RwLock<HashMap<String, CacheEntry<Value>>>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    store_failures: AtomicU64,
}

impl CacheManager {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            memory: RwLock::new(HashMap::new()),
            store,
            clock,
            store_failures: AtomicU64::new(0),
        }
    }

    /// Read a cached value
    ///
    /// Memory tier first; on a memory miss the durable tier is consulted
    /// and a valid entry is promoted back into memory. Invalid entries
    /// (expired, wrong schema version, empty payload, unparsable) are
    /// evicted from both tiers and reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();

        let memory_entry = self.memory.read().get(key).cloned();
        if let Some(entry) = memory_entry {
            if entry.is_valid(now) {
                match serde_json::from_value(entry.data) {
                    Ok(value) => {
                        logger::debug(LogTag::Cache, &format!("memory hit: {}", key));
                        return Some(value);
                    }
                    Err(e) => {
                        logger::warning(
                            LogTag::Cache,
                            &format!("cached payload for {} does not fit requested type: {}", key, e),
                        );
                        self.evict(key).await;
                        return None;
                    }
                }
            }
            // Stale in memory; durable copy gets its own validity check below
            self.memory.write().remove(key);
        }

        let raw = match self.store.get_item(&storage_key(key)).await {
            Ok(raw) => raw,
            Err(e) => {
                self.note_store_failure("get", key, &e);
                return None;
            }
        };
        let raw = raw?;

        let entry: CacheEntry<Value> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                logger::warning(
                    LogTag::Cache,
                    &format!("corrupt durable entry for {}: {}", key, e),
                );
                self.evict(key).await;
                return None;
            }
        };

        if !entry.is_valid(now) {
            self.evict(key).await;
            logger::debug(LogTag::Cache, &format!("invalid durable entry evicted: {}", key));
            return None;
        }

        match serde_json::from_value::<T>(entry.data.clone()) {
            Ok(value) => {
                // Tier promotion: the durable hit becomes next read's memory hit
                self.memory.write().insert(key.to_string(), entry);
                logger::debug(LogTag::Cache, &format!("durable hit, promoted: {}", key));
                Some(value)
            }
            Err(e) => {
                logger::warning(
                    LogTag::Cache,
                    &format!("cached payload for {} does not fit requested type: {}", key, e),
                );
                self.evict(key).await;
                None
            }
        }
    }

    /// Write a value under `key`
    ///
    /// TTL is the override if given, else the key's resource-kind policy.
    /// Memory is updated first and unconditionally; a durable write
    /// failure leaves the memory entry standing. The usage-metadata
    /// record is refreshed best-effort afterwards.
    pub async fn set<T: Serialize>(&self, key: &CacheKey, data: &T, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or_else(|| key.kind().ttl());
        let now = self.clock.now_ms();

        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                logger::error(
                    LogTag::Cache,
                    &format!("refusing to cache unserializable payload for {}: {}", key, e),
                );
                return;
            }
        };

        let entry = CacheEntry::new(value, now, ttl);
        let serialized = match serde_json::to_string(&entry) {
            Ok(serialized) => serialized,
            Err(e) => {
                logger::error(LogTag::Cache, &format!("entry encode failed for {}: {}", key, e));
                return;
            }
        };
        let approx_size = serialized.len();

        self.memory
            .write()
            .insert(key.as_str().to_string(), entry);

        if let Err(e) = self.store.set_item(&storage_key(key.as_str()), &serialized).await {
            // Memory entry still stands; callers keep their fast tier
            self.note_store_failure("set", key.as_str(), &e);
        }

        self.update_metadata(key.as_str(), now, ttl, approx_size).await;
    }

    /// Delete `key` from both tiers; no-op when absent
    pub async fn remove(&self, key: &str) {
        self.memory.write().remove(key);
        if let Err(e) = self.store.remove_item(&storage_key(key)).await {
            self.note_store_failure("remove", key, &e);
        }
        self.prune_metadata(&[key.to_string()]).await;
    }

    /// Wipe everything: memory immediately, durable best-effort
    pub async fn clear(&self) {
        self.memory.write().clear();

        match self.store.get_all_keys().await {
            Ok(keys) => {
                // The metadata record shares the namespace prefix, so one
                // sweep removes entries and diagnostics alike
                let doomed: Vec<String> = keys
                    .into_iter()
                    .filter(|k| k.starts_with(CACHE_KEY_PREFIX))
                    .collect();
                if doomed.is_empty() {
                    return;
                }
                let count = doomed.len();
                if let Err(e) = self.store.multi_remove(&doomed).await {
                    self.note_store_failure("clear", "*", &e);
                } else {
                    logger::info(LogTag::Cache, &format!("cleared {} durable keys", count));
                }
            }
            Err(e) => self.note_store_failure("clear", "*", &e),
        }
    }

    /// Sweep the durable tier, batch-deleting every invalid or unparsable
    /// entry and dropping its memory copy
    ///
    /// The only operation reclaiming space without a `get`/`remove`; run
    /// it at startup or periodically, not inside the hot path.
    pub async fn clean_expired(&self) {
        let now = self.clock.now_ms();

        let keys = match self.store.get_all_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                self.note_store_failure("clean_expired", "*", &e);
                return;
            }
        };

        let mut doomed: Vec<String> = Vec::new();
        for storage_key in keys.iter().filter(|k| logical_key(k).is_some()) {
            match self.store.get_item(storage_key).await {
                Ok(Some(raw)) => match serde_json::from_str::<CacheEntry<Value>>(&raw) {
                    Ok(entry) if entry.is_valid(now) => {}
                    _ => doomed.push(storage_key.clone()),
                },
                Ok(None) => {}
                // Unreadable is not proof of invalidity; leave it for the
                // next lazy eviction and move on
                Err(e) => self.note_store_failure("clean_expired", storage_key, &e),
            }
        }

        if doomed.is_empty() {
            logger::debug(LogTag::Cache, "sweep found nothing to remove");
            return;
        }

        match self.store.multi_remove(&doomed).await {
            Ok(()) => {
                let logical: Vec<String> = doomed
                    .iter()
                    .filter_map(|k| logical_key(k))
                    .map(str::to_string)
                    .collect();
                {
                    let mut memory = self.memory.write();
                    for key in &logical {
                        memory.remove(key);
                    }
                }
                self.prune_metadata(&logical).await;
                logger::info(
                    LogTag::Cache,
                    &format!("sweep removed {} invalid entries", logical.len()),
                );
            }
            Err(e) => self.note_store_failure("clean_expired", "*", &e),
        }
    }

    /// Delete every key containing `pattern` from both tiers
    ///
    /// Used to drop a resource family at once, e.g. all chart variants of
    /// one symbol via `keys::symbol_pattern`.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        let mut removed = {
            let mut memory = self.memory.write();
            let before = memory.len();
            memory.retain(|k, _| !k.contains(pattern));
            before - memory.len()
        };

        match self.store.get_all_keys().await {
            Ok(keys) => {
                let doomed: Vec<String> = keys
                    .into_iter()
                    .filter(|k| logical_key(k).map_or(false, |l| l.contains(pattern)))
                    .collect();
                if !doomed.is_empty() {
                    match self.store.multi_remove(&doomed).await {
                        Ok(()) => {
                            removed = removed.max(doomed.len());
                            let logical: Vec<String> = doomed
                                .iter()
                                .filter_map(|k| logical_key(k))
                                .map(str::to_string)
                                .collect();
                            self.prune_metadata(&logical).await;
                        }
                        Err(e) => self.note_store_failure("invalidate_pattern", pattern, &e),
                    }
                }
            }
            Err(e) => self.note_store_failure("invalidate_pattern", pattern, &e),
        }

        logger::debug(
            LogTag::Cache,
            &format!("invalidated {} keys matching '{}'", removed, pattern),
        );
    }

    /// Pure-read diagnostic snapshot of both tiers
    pub async fn stats(&self) -> CacheStats {
        let memory_count = self.memory.read().len();

        let mut durable_count = 0usize;
        let mut total_bytes = 0usize;
        let mut oldest: Option<(i64, String)> = None;
        let mut newest: Option<(i64, String)> = None;

        match self.store.get_all_keys().await {
            Ok(keys) => {
                for storage_key in keys {
                    let Some(logical) = logical_key(&storage_key) else {
                        continue;
                    };
                    match self.store.get_item(&storage_key).await {
                        Ok(Some(raw)) => {
                            durable_count += 1;
                            total_bytes += raw.len();
                            if let Ok(entry) = serde_json::from_str::<CacheEntry<Value>>(&raw) {
                                let stamp = entry.created_at;
                                if oldest.as_ref().map_or(true, |(t, _)| stamp < *t) {
                                    oldest = Some((stamp, logical.to_string()));
                                }
                                if newest.as_ref().map_or(true, |(t, _)| stamp > *t) {
                                    newest = Some((stamp, logical.to_string()));
                                }
                            }
                        }
                        Ok(None) => {}
                        Err(e) => self.note_store_failure("stats", &storage_key, &e),
                    }
                }
            }
            Err(e) => self.note_store_failure("stats", "*", &e),
        }

        CacheStats {
            memory_count,
            durable_count,
            total_size_formatted: format_bytes(total_bytes),
            oldest_key: oldest.map(|(_, k)| k),
            newest_key: newest.map(|(_, k)| k),
            store_failures: self.store_failures.load(Ordering::Relaxed),
        }
    }

    /// Remove `key` from memory and, best-effort, from the durable tier
    async fn evict(&self, key: &str) {
        self.memory.write().remove(key);
        if let Err(e) = self.store.remove_item(&storage_key(key)).await {
            self.note_store_failure("evict", key, &e);
        }
    }

    fn note_store_failure(&self, op: &str, key: &str, error: &StoreError) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
        logger::warning(
            LogTag::Store,
            &format!("durable tier failed during {} for {}: {}", op, key, error),
        );
    }

    // Metadata record: read-modify-write under a fixed key, best-effort
    // end to end. It must never affect the primary operation's outcome.

    async fn load_metadata(&self) -> UsageMetadata {
        match self.store.get_item(CACHE_METADATA_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            _ => UsageMetadata::default(),
        }
    }

    async fn save_metadata(&self, metadata: &UsageMetadata) {
        if let Ok(raw) = serde_json::to_string(metadata) {
            if let Err(e) = self.store.set_item(CACHE_METADATA_KEY, &raw).await {
                self.store_failures.fetch_add(1, Ordering::Relaxed);
                logger::debug(LogTag::Store, &format!("metadata write failed: {}", e));
            }
        }
    }

    async fn update_metadata(&self, key: &str, now: i64, ttl: Duration, size: usize) {
        let mut metadata = self.load_metadata().await;
        metadata.insert(
            key.to_string(),
            KeyUsage {
                last_updated: now,
                ttl_minutes: ttl.as_secs() / 60,
                approx_size_bytes: size,
            },
        );
        self.save_metadata(&metadata).await;
    }

    async fn prune_metadata(&self, keys: &[String]) {
        let mut metadata = self.load_metadata().await;
        let before = metadata.len();
        for key in keys {
            metadata.remove(key);
        }
        if metadata.len() != before {
            self.save_metadata(&metadata).await;
        }
    }
}

fn storage_key(key: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, key)
}

/// Logical key of a durable entry, or `None` for foreign keys and the
/// metadata record
fn logical_key(storage_key: &str) -> Option<&str> {
    if storage_key == CACHE_METADATA_KEY {
        return None;
    }
    storage_key.strip_prefix(CACHE_KEY_PREFIX)
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::cache::keys;
    use crate::cache::policy::{ChartPeriod, ResourceKind};
    use crate::cache::store::{MemoryStore, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    const START: i64 = 1_700_000_000_000;

    fn fixture() -> (Arc<MemoryStore>, Arc<ManualClock>, CacheManager) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(START));
        let cache = CacheManager::new(store.clone(), clock.clone());
        (store, clock, cache)
    }

    #[tokio::test]
    async fn round_trip_preserves_payload() {
        let (_, _, cache) = fixture();
        let key = keys::quote("AAPL");

        let payload = json!({"price": 185.3, "volume": 51234321});
        cache.set(&key, &payload, None).await;

        let got: Option<serde_json::Value> = cache.get(key.as_str()).await;
        assert_eq!(got, Some(payload));
    }

    #[tokio::test]
    async fn quote_ttl_is_exactly_two_minutes() {
        let (store, _, cache) = fixture();
        let key = keys::quote("AAPL");
        cache.set(&key, &json!({"price": 1.0}), None).await;

        let raw = store.get_item("cache_quote_AAPL").await.unwrap().unwrap();
        let entry: CacheEntry<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.created_at, START);
        assert_eq!(entry.expires_at - entry.created_at, 120_000);
    }

    #[tokio::test]
    async fn ttl_override_beats_the_policy_table() {
        let (store, _, cache) = fixture();
        let key = keys::quote("AAPL");
        cache
            .set(&key, &json!(1), Some(Duration::from_secs(600)))
            .await;

        let raw = store.get_item("cache_quote_AAPL").await.unwrap().unwrap();
        let entry: CacheEntry<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.expires_at - entry.created_at, 600_000);
    }

    #[tokio::test]
    async fn cold_start_scenario() {
        let (_, clock, cache) = fixture();
        let key = keys::quote("TSLA");

        // Empty cache: miss
        assert_eq!(cache.get::<Value>(key.as_str()).await, None);

        // Set with the quote policy (2 minutes), immediate read hits
        cache.set(&key, &json!({"price": 185.3}), None).await;
        assert_eq!(
            cache.get::<Value>(key.as_str()).await,
            Some(json!({"price": 185.3}))
        );

        // Three minutes later the entry has expired
        clock.advance_minutes(3);
        assert_eq!(cache.get::<Value>(key.as_str()).await, None);
    }

    #[tokio::test]
    async fn expired_entry_is_lazily_removed_from_durable_tier() {
        let (store, clock, cache) = fixture();
        let key = keys::quote("NVDA");
        cache.set(&key, &json!(1), None).await;
        clock.advance_minutes(3);

        assert_eq!(cache.get::<Value>(key.as_str()).await, None);
        assert_eq!(store.get_item("cache_quote_NVDA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn schema_version_mismatch_reads_as_absent() {
        let (store, _, cache) = fixture();

        // Entry written by an older cache format, not yet expired
        let stale = serde_json::json!({
            "data": {"price": 10.0},
            "created_at": START,
            "expires_at": START + 3_600_000,
            "schema_version": "0.9.0"
        });
        store
            .set_item("cache_quote_AMD", &stale.to_string())
            .await
            .unwrap();

        assert_eq!(cache.get::<Value>("quote_AMD").await, None);
        // And it was evicted, not just skipped
        assert_eq!(store.get_item("cache_quote_AMD").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_durable_entry_reads_as_absent_and_is_evicted() {
        let (store, _, cache) = fixture();
        store
            .set_item("cache_quote_AMD", "{not valid json")
            .await
            .unwrap();

        assert_eq!(cache.get::<Value>("quote_AMD").await, None);
        assert_eq!(store.get_item("cache_quote_AMD").await.unwrap(), None);
    }

    #[tokio::test]
    async fn restart_promotes_from_durable_tier() {
        let (store, clock, cache) = fixture();
        let key = keys::overview("MSFT");
        cache.set(&key, &json!({"name": "Microsoft"}), None).await;

        // Fresh manager over the same store: memory tier is empty, the
        // durable entry survives and is promoted on first read
        let restarted = CacheManager::new(store.clone(), clock.clone());
        assert_eq!(restarted.stats().await.memory_count, 0);
        assert_eq!(
            restarted.get::<Value>(key.as_str()).await,
            Some(json!({"name": "Microsoft"}))
        );
        assert_eq!(restarted.stats().await.memory_count, 1);
    }

    #[tokio::test]
    async fn remove_and_clear_are_idempotent() {
        let (_, _, cache) = fixture();

        cache.remove("quote_GONE").await;
        cache.clear().await;

        let stats = cache.stats().await;
        assert_eq!(stats.memory_count, 0);
        assert_eq!(stats.durable_count, 0);

        let key = keys::quote("IBM");
        cache.set(&key, &json!(1), None).await;
        cache.remove(key.as_str()).await;
        cache.remove(key.as_str()).await;
        assert_eq!(cache.get::<Value>(key.as_str()).await, None);
    }

    #[tokio::test]
    async fn clear_wipes_entries_and_metadata() {
        let (store, _, cache) = fixture();
        cache.set(&keys::quote("AAPL"), &json!(1), None).await;
        cache.set(&keys::overview("AAPL"), &json!(2), None).await;
        assert!(store
            .get_item(CACHE_METADATA_KEY)
            .await
            .unwrap()
            .is_some());

        cache.clear().await;

        assert!(store.get_all_keys().await.unwrap().is_empty());
        assert_eq!(cache.get::<Value>("quote_AAPL").await, None);
    }

    #[tokio::test]
    async fn pattern_invalidation_spares_unrelated_keys() {
        let (_, _, cache) = fixture();
        cache
            .set(&keys::chart("AAPL", ChartPeriod::OneDay), &json!([1]), None)
            .await;
        cache
            .set(&keys::chart("AAPL", ChartPeriod::OneWeek), &json!([2]), None)
            .await;
        cache.set(&keys::quote("AAPL"), &json!(3), None).await;

        cache.invalidate_pattern("chart_AAPL").await;

        assert_eq!(cache.get::<Value>("chart_AAPL_1D").await, None);
        assert_eq!(cache.get::<Value>("chart_AAPL_1W").await, None);
        assert_eq!(cache.get::<Value>("quote_AAPL").await, Some(json!(3)));
    }

    #[tokio::test]
    async fn sweep_removes_exactly_the_expired_entries() {
        let (store, clock, cache) = fixture();

        // Quote expires in 2 minutes; overview (60m) and profile (24h) do not
        cache.set(&keys::quote("AAPL"), &json!("q"), None).await;
        cache.set(&keys::overview("AAPL"), &json!("o"), None).await;
        cache.set(&keys::profile("AAPL"), &json!("p"), None).await;
        clock.advance_minutes(5);

        cache.clean_expired().await;

        assert_eq!(
            store.get_item("cache_quote_AAPL").await.unwrap(),
            None
        );
        assert_eq!(cache.get::<Value>("overview_AAPL").await, Some(json!("o")));
        assert_eq!(cache.get::<Value>("profile_AAPL").await, Some(json!("p")));
    }

    #[tokio::test]
    async fn stats_reports_counts_sizes_and_age_extremes() {
        let (_, clock, cache) = fixture();
        cache.set(&keys::quote("OLD"), &json!("x"), None).await;
        clock.advance_ms(1_000);
        cache.set(&keys::quote("NEW"), &json!("y"), None).await;

        let stats = cache.stats().await;
        assert_eq!(stats.memory_count, 2);
        assert_eq!(stats.durable_count, 2);
        assert_eq!(stats.oldest_key.as_deref(), Some("quote_OLD"));
        assert_eq!(stats.newest_key.as_deref(), Some("quote_NEW"));
        assert!(stats.total_size_formatted.ends_with("B"));
        assert_eq!(stats.store_failures, 0);
    }

    #[tokio::test]
    async fn null_payload_is_never_served() {
        let (_, _, cache) = fixture();
        let key = keys::quote("NUL");
        cache.set(&key, &Value::Null, None).await;
        assert_eq!(cache.get::<Value>(key.as_str()).await, None);
    }

    /// Store that fails every operation, simulating a broken durable tier
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        async fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        async fn remove_item(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        async fn get_all_keys(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
        async fn multi_remove(&self, _keys: &[String]) -> StoreResult<()> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    #[tokio::test]
    async fn broken_durable_tier_degrades_to_memory_only() {
        let clock = Arc::new(ManualClock::new(START));
        let cache = CacheManager::new(Arc::new(BrokenStore), clock);
        let key = keys::quote("AAPL");

        // set succeeds into memory despite the durable write failing
        cache.set(&key, &json!({"price": 2.0}), None).await;
        assert_eq!(
            cache.get::<Value>(key.as_str()).await,
            Some(json!({"price": 2.0}))
        );

        // None of these may panic or error out
        cache.remove("quote_X").await;
        cache.clear().await;
        cache.clean_expired().await;
        cache.invalidate_pattern("chart").await;

        let stats = cache.stats().await;
        assert!(stats.store_failures > 0);
    }

    #[tokio::test]
    async fn other_kind_uses_default_ttl() {
        let (store, _, cache) = fixture();
        let key = CacheKey::new(ResourceKind::Other, "custom_thing");
        cache.set(&key, &json!(1), None).await;

        let raw = store.get_item("cache_custom_thing").await.unwrap().unwrap();
        let entry: CacheEntry<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.expires_at - entry.created_at, 30 * 60_000);
    }
}
