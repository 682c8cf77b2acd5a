//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Dual output (console + file)
//! - Broken pipe handling for piped commands

use super::file::write_to_file;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 8;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: &str, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let prefix = format!("{} ", time).dimmed().to_string();
    let tag_str = format_tag(&tag);
    let level_str = format_level(level);

    let console_line = format!("{}[{}] [{}] {}", prefix, tag_str, level_str, message);
    print_stdout_safe(&console_line);

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let file_line = format!(
        "{} [{}] [{}] {}",
        timestamp,
        tag.to_plain_string(),
        level,
        message
    );
    write_to_file(&file_line);
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Cache => padded.bright_cyan().bold(),
        LogTag::Store => padded.bright_blue().bold(),
        LogTag::Api => padded.bright_green().bold(),
        LogTag::Market => padded.bright_magenta().bold(),
        LogTag::Config => padded.white().bold(),
    }
}

/// Format a level string with appropriate color
fn format_level(level: &str) -> ColoredString {
    match level {
        "ERROR" => level.red().bold(),
        "WARNING" => level.yellow().bold(),
        "INFO" => level.normal(),
        "DEBUG" => level.dimmed(),
        _ => level.normal(),
    }
}

/// Print to stdout, ignoring broken pipes (e.g. `stockwatch movers | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
    let _ = out.flush();
}
