//! File output for the logger
//!
//! One log file per process start, created lazily under the logs directory.
//! File logging is best-effort: failures never interrupt the app.

use chrono::Local;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

static LOG_FILE: OnceCell<Option<Mutex<File>>> = OnceCell::new();

/// Initialize file logging; called once from `logger::init`
pub fn init_file_logging() {
    LOG_FILE.get_or_init(open_log_file);
}

fn open_log_file() -> Option<Mutex<File>> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()
        .map(Mutex::new)
}

fn log_file_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    crate::paths::logs_dir().join(format!("stockwatch_{}.log", stamp))
}

/// Append one line to the log file, if file logging is active
pub fn write_to_file(line: &str) {
    if let Some(Some(file)) = LOG_FILE.get().map(|f| f.as_ref()) {
        let mut file = file.lock();
        let _ = writeln!(file, "{}", line);
    }
}
