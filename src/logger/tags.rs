/// Log tag definitions
///
/// Every log line carries a tag naming the subsystem it came from. Tags are
/// also the unit of debug gating: `--debug-<tag>` enables debug logs for
/// that subsystem only.
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Tracker,
    Webserver,
    Hub,
}

impl LogTag {
    /// Plain uppercase name used in file-style output and tests
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Cache => "CACHE",
            LogTag::Tracker => "TRACKER",
            LogTag::Webserver => "WEBSERVER",
            LogTag::Hub => "HUB",
        }
    }

    /// Key used when matching `--debug-<key>` flags
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Cache => "cache",
            LogTag::Tracker => "tracker",
            LogTag::Webserver => "webserver",
            LogTag::Hub => "hub",
        }
    }

    /// Colored representation for console output
    pub fn colored(&self) -> ColoredString {
        match self {
            LogTag::System => self.as_str().green().bold(),
            LogTag::Config => self.as_str().blue().bold(),
            LogTag::Cache => self.as_str().cyan().bold(),
            LogTag::Tracker => self.as_str().yellow().bold(),
            LogTag::Webserver => self.as_str().magenta().bold(),
            LogTag::Hub => self.as_str().bright_blue().bold(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_are_lowercase_names() {
        for tag in &[
            LogTag::System,
            LogTag::Config,
            LogTag::Cache,
            LogTag::Tracker,
            LogTag::Webserver,
            LogTag::Hub,
        ] {
            assert_eq!(tag.to_debug_key(), tag.as_str().to_lowercase());
        }
    }
}
