/// Global constants used across stockwatch
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Prefix for every cache entry key in the durable store
pub const CACHE_KEY_PREFIX: &str = "cache_";

/// Fixed durable key holding the per-key usage metadata record
pub const CACHE_METADATA_KEY: &str = "cache_metadata";

/// Version tag written into every entry; bump to invalidate all cached data
pub const CACHE_SCHEMA_VERSION: &str = "1.0.0";

/// Fallback TTL in minutes for keys without a dedicated policy
pub const DEFAULT_TTL_MINUTES: u64 = 30;

// ============================================================================
// MARKET DATA CONSTANTS
// ============================================================================

/// Base URL of the quote API
pub const QUOTE_API_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Request timeout for quote API calls in milliseconds
pub const QUOTE_API_TIMEOUT_MS: u64 = 10_000;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV_VAR: &str = "STOCKWATCH_API_KEY";
