//! Structured logging for stockwatch
//!
//! Clean, ergonomic logging with:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Tagged output per subsystem
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockwatch::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Cache, "Durable store unavailable, serving misses");
//! logger::info(LogTag::System, "Startup complete");
//! logger::debug(LogTag::Store, "3 keys swept"); // Only at debug level
//! ```
//!
//! Call `logger::init()` once at startup (before any logging) to set up
//! file output; until then messages go to the console only.

mod file;
mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Minimum level that will be emitted; Error always passes
static MIN_LEVEL: Lazy<RwLock<LogLevel>> = Lazy::new(|| RwLock::new(LogLevel::Info));

/// Initialize the logger system
///
/// Sets the minimum level (from config or CLI) and opens the log file.
pub fn init(min_level: LogLevel) {
    *MIN_LEVEL.write() = min_level;
    file::init_file_logging();
}

/// Current minimum level
pub fn min_level() -> LogLevel {
    *MIN_LEVEL.read()
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    // Errors always log; everything else respects the threshold
    if level != LogLevel::Error && level > min_level() {
        return;
    }
    format::format_and_log(tag, level.as_str(), message);
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}
