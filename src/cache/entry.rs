//! Cache entry structure and validity rules

use crate::constants::CACHE_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One cached value with its freshness envelope
///
/// An entry is valid only while `now < expires_at`, its schema version
/// matches the current one, and its payload carries actual data. Invalid
/// entries must never be handed to a caller; they are evicted lazily on
/// the next access at latest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Creation time, epoch milliseconds
    pub created_at: i64,
    /// `created_at + ttl`
    pub expires_at: i64,
    /// Cache format version; a mismatch invalidates the entry wholesale
    pub schema_version: String,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, now_ms: i64, ttl: Duration) -> Self {
        Self {
            data,
            created_at: now_ms,
            expires_at: now_ms + ttl.as_millis() as i64,
            schema_version: CACHE_SCHEMA_VERSION.to_string(),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    pub fn matches_schema(&self) -> bool {
        self.schema_version == CACHE_SCHEMA_VERSION
    }
}

impl CacheEntry<Value> {
    /// Full validity check: fresh, current schema, meaningful payload
    pub fn is_valid(&self, now_ms: i64) -> bool {
        !self.is_expired(now_ms) && self.matches_schema() && payload_has_data(&self.data)
    }
}

/// JSON `null` and the empty string are treated as "no data"; empty
/// arrays/objects are legitimate payloads.
pub fn payload_has_data(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let entry = CacheEntry::new(json!({"price": 185.3}), NOW, Duration::from_secs(120));
        assert_eq!(entry.expires_at - entry.created_at, 120_000);
        assert!(!entry.is_expired(NOW));
        assert!(!entry.is_expired(NOW + 119_999));
        assert!(entry.is_expired(NOW + 120_000));
    }

    #[test]
    fn schema_mismatch_invalidates() {
        let mut entry = CacheEntry::new(json!(42), NOW, Duration::from_secs(60));
        assert!(entry.is_valid(NOW));
        entry.schema_version = "0.9.9".to_string();
        assert!(!entry.is_valid(NOW));
    }

    #[test]
    fn null_and_empty_string_payloads_are_invalid() {
        let entry = CacheEntry::new(Value::Null, NOW, Duration::from_secs(60));
        assert!(!entry.is_valid(NOW));

        let entry = CacheEntry::new(json!(""), NOW, Duration::from_secs(60));
        assert!(!entry.is_valid(NOW));

        // Empty collections still count as data
        let entry = CacheEntry::new(json!([]), NOW, Duration::from_secs(60));
        assert!(entry.is_valid(NOW));
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = CacheEntry::new(json!({"symbol": "TSLA"}), NOW, Duration::from_secs(60));
        let raw = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.created_at, entry.created_at);
        assert_eq!(back.expires_at, entry.expires_at);
        assert_eq!(back.data, entry.data);
    }
}
