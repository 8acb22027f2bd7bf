/// Console formatting for log output
///
/// Formats a tag + level + message into a colored console line with a
/// timestamp. Numbers and status words get highlighted so operational
/// output is scannable.
use chrono::Utc;
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

use super::levels::LogLevel;
use super::tags::LogTag;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?[\d,]+\.?\d*%?)").unwrap());

/// Format and print a single log line
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let timestamp = Utc::now().format("%H:%M:%S").to_string();

    let level_marker = match level {
        LogLevel::Error => "❌".red().bold(),
        LogLevel::Warning => "⚠".yellow().bold(),
        LogLevel::Info => "ℹ".blue().bold(),
        LogLevel::Debug => "🐛".purple().bold(),
        LogLevel::Verbose => "🔍".dimmed(),
    };

    let body = match level {
        LogLevel::Error => message.red().to_string(),
        LogLevel::Warning => message.yellow().to_string(),
        LogLevel::Debug | LogLevel::Verbose => message.dimmed().to_string(),
        LogLevel::Info => highlight_message(message),
    };

    println!(
        "{} {} {} {}",
        level_marker,
        tag.colored_label(),
        format!("[{}]", timestamp).dimmed(),
        body
    );
}

/// Print a startup banner
pub fn print_header(title: &str) {
    println!();
    println!(
        "{} {} {}",
        "🏛".green().bold(),
        "Pantheon Server".green().bold(),
        format!("- {}", title).bright_white().bold()
    );
    println!("{}", "─".repeat(50).dimmed());
}

// Highlight numbers and status words in info messages
fn highlight_message(message: &str) -> String {
    let mut formatted = NUMBER_RE
        .replace_all(message, |caps: &regex::Captures| {
            caps[1].bright_white().bold().to_string()
        })
        .to_string();

    formatted = formatted
        .replace("SUCCESS", &"SUCCESS".green().bold().to_string())
        .replace("FAILED", &"FAILED".red().bold().to_string())
        .replace("ERROR", &"ERROR".red().bold().to_string());

    formatted
}
