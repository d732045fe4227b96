//! Log formatting and console output with ANSI colors
//!
//! Handles:
//! - Colorized console output with aligned tag and level columns
//! - Broken pipe handling for piped commands
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Column width for the tag field
const TAG_WIDTH: usize = 9;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let level_str = match level {
        LogLevel::Error => level.as_str().red().bold(),
        LogLevel::Warning => level.as_str().yellow().bold(),
        LogLevel::Info => level.as_str().normal(),
        LogLevel::Debug => level.as_str().purple(),
        LogLevel::Verbose => level.as_str().dimmed(),
    };

    let message = match level {
        LogLevel::Error => message.red().to_string(),
        LogLevel::Warning => message.yellow().to_string(),
        LogLevel::Verbose => message.dimmed().to_string(),
        _ => message.to_string(),
    };

    let line = format!(
        "{} [{:<width$}] [{}] {}",
        time.dimmed(),
        tag.colored(),
        level_str,
        message,
        width = TAG_WIDTH
    );

    print_stdout_safe(&line);
}

/// Print to stdout, swallowing broken-pipe errors (e.g. `orbitra | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
    let _ = out.flush();
}
