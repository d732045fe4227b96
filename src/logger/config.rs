/// Logger configuration and per-module debug gating
///
/// Built once at startup from the command-line arguments. Debug logs for a
/// tag are shown only when `--debug-<tag>` was passed; `--verbose` raises
/// the threshold to show everything.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::OnceCell;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level threshold (Info by default)
    pub min_level: LogLevel,

    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,

    /// Tags with --verbose-<tag> enabled
    pub verbose_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: OnceCell<LoggerConfig> = OnceCell::new();

/// Build the logger configuration from command-line arguments
///
/// Called once from `logger::init()`. Later calls are no-ops.
pub fn init_from_args() {
    let args = arguments::get_cmd_args();

    let mut config = LoggerConfig::default();

    if args.iter().any(|a| a == "--verbose") {
        config.min_level = LogLevel::Verbose;
    } else if args.iter().any(|a| a == "--quiet") {
        config.min_level = LogLevel::Warning;
    }

    for arg in &args {
        if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_string());
        }
        if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_string());
        }
    }

    let _ = LOGGER_CONFIG.set(config);
}

/// Current logger configuration (defaults if init was never called)
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.get().cloned().unwrap_or_default()
}

/// Whether --debug-<tag> was passed for this tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config().debug_tags.contains(tag.to_debug_key())
}

/// Whether --verbose-<tag> was passed for this tag
pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config()
        .verbose_tags
        .contains(tag.to_debug_key())
}
