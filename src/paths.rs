//! Centralized path resolution for stockwatch
//!
//! All file and directory paths are resolved through this module to ensure
//! consistent behavior across platforms.
//!
//! ## Path Strategy
//!
//! Platform-standard application data locations:
//! - **macOS**: `~/Library/Application Support/stockwatch/`
//! - **Windows**: `%LOCALAPPDATA%\stockwatch\`
//! - **Linux**: `$XDG_DATA_HOME/stockwatch/` (fallback `~/.local/share/stockwatch/`)
//!
//! ## Directory Structure
//!
//! ```text
//! stockwatch/
//! ├── data/
//! │   ├── config.toml
//! │   └── cache.db
//! └── logs/
//!     └── stockwatch_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

/// Resolves the base directory for all stockwatch data
fn resolve_base_directory() -> PathBuf {
    const APP_DIR: &str = "stockwatch";

    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(format!(".{}", APP_DIR));
    }

    PathBuf::from(APP_DIR)
}

/// Returns the base directory for all stockwatch data
pub fn base_dir() -> PathBuf {
    BASE_DIRECTORY.clone()
}

/// Returns the data directory (config, databases)
pub fn data_dir() -> PathBuf {
    base_dir().join("data")
}

/// Returns the logs directory
pub fn logs_dir() -> PathBuf {
    base_dir().join("logs")
}

/// Returns the path of the TOML config file
pub fn config_file() -> PathBuf {
    data_dir().join("config.toml")
}

/// Returns the path of the SQLite cache database
pub fn cache_db_path() -> PathBuf {
    data_dir().join("cache.db")
}

/// Creates every directory the app needs; call before logger init
pub fn ensure_all_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_and_logs_live_under_base() {
        assert!(data_dir().starts_with(base_dir()));
        assert!(logs_dir().starts_with(base_dir()));
    }

    #[test]
    fn cache_db_lives_in_data_dir() {
        assert_eq!(cache_db_path().parent().unwrap(), data_dir());
    }
}
