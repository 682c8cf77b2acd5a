/// Structured error types for stockwatch
///
/// The cache layer never surfaces these to its callers (it degrades to
/// miss/best-effort instead); they exist for logging and for the market
/// data layer, whose failures are the only ones a caller can observe.
use thiserror::Error;

/// Errors from the durable key/value store or the entry codec.
///
/// Always swallowed inside `CacheManager`: a broken store must look like
/// an empty store to the rest of the app.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to open store at {path}: {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },

    #[error("entry serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors from the external quote API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("quote API rejected the request: {message}")]
    Rejected { message: String },

    #[error("rate limit reached: {message}")]
    RateLimited { message: String },

    #[error("malformed response for {data_type}: {reason}")]
    MalformedResponse { data_type: String, reason: String },
}

/// Configuration load/validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("missing API key: set it in the config file or the {0} environment variable")]
    MissingApiKey(String),
}
