/// Log tags identifying which subsystem produced a message
///
/// Tags drive per-module debug gating: `--debug-coinbase` enables Debug
/// level output for `LogTag::Coinbase` only.
use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Coinbase,
    Analysis,
    Webserver,
}

impl LogTag {
    /// Display label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Cache => "CACHE",
            LogTag::Coinbase => "COINBASE",
            LogTag::Analysis => "ANALYSIS",
            LogTag::Webserver => "WEBSERVER",
        }
    }

    /// Key used for `--debug-<key>` command-line flags
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Cache => "cache",
            LogTag::Coinbase => "coinbase",
            LogTag::Analysis => "analysis",
            LogTag::Webserver => "webserver",
        }
    }

    /// Colored label for console output
    pub fn colored_label(&self) -> ColoredString {
        match self {
            LogTag::System => self.label().green().bold(),
            LogTag::Config => self.label().cyan().bold(),
            LogTag::Cache => self.label().bright_blue().bold(),
            LogTag::Coinbase => self.label().yellow().bold(),
            LogTag::Analysis => self.label().magenta().bold(),
            LogTag::Webserver => self.label().bright_green().bold(),
        }
    }
}
