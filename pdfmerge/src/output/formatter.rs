//! Message formatting and display.
//!
//! This module provides formatted, localized output for different message
//! types with support for quiet and verbose modes.
//!
//! # Examples
//!
//! ```
//! use pdfmerge::i18n::{Locale, MessageKey};
//! use pdfmerge::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false).with_locale(Locale::German);
//! formatter.info(&formatter.text(MessageKey::MergingPdfs));
//! formatter.success("Operation completed");
//! formatter.error("Something went wrong");
//! ```

use std::fmt;
use std::io::IsTerminal;

use crate::config::Config;
use crate::files::{DerivedState, DocumentRef};
use crate::i18n::{self, Locale, MessageKey};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m", // Green
            Self::Warning => "\x1b[33m", // Yellow
            Self::Error => "\x1b[31m",   // Red
            Self::Debug => "\x1b[36m",   // Cyan
        }
    }
}

/// Output formatter with configurable verbosity and language.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
    /// Language of localized messages.
    locale: Locale,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
            locale: Locale::default(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose).with_locale(config.locale)
    }

    /// Create a quiet formatter (only errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Use `locale` for localized messages.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Force colors on or off.
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        std::io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Language of localized messages.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Localized message without arguments.
    pub fn text(&self, key: MessageKey) -> String {
        i18n::text(self.locale, key)
    }

    /// Localized message with positional arguments.
    pub fn format(&self, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
        i18n::format(self.locale, key, args)
    }

    /// Print an informational message.
    ///
    /// Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", self.render(MessageLevel::Info, message));
        }
    }

    /// Print a success message.
    ///
    /// Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{}", self.render(MessageLevel::Success, message));
        }
    }

    /// Print a warning message to stderr.
    ///
    /// Always displayed (even in quiet mode).
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.render(MessageLevel::Warning, message));
    }

    /// Print an error message to stderr.
    ///
    /// Always displayed.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render(MessageLevel::Error, message));
    }

    /// Print a debug/verbose message.
    ///
    /// Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("{}", self.render(MessageLevel::Debug, message));
        }
    }

    /// Format a message with level-appropriate prefix and color.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color = level.color();

        if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Print a section header.
    ///
    /// Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a labelled value.
    ///
    /// Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a blank line.
    ///
    /// Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Print a list item.
    ///
    /// Suppressed in quiet mode.
    ///
    /// # Arguments
    ///
    /// * `index` - Item index (1-based)
    /// * `message` - Item message
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Print the file list with one row per entry, then the status line.
    pub fn file_list<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a DocumentRef>,
        state: &DerivedState,
    ) {
        if self.quiet {
            return;
        }

        for (index, entry) in entries.into_iter().enumerate() {
            println!("{}", file_row(index + 1, entry));
        }
        self.info(&state.status.text(self.locale));
    }

    /// Check if output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// One list row: `  2. report.pdf  (12.3 KB • 4 pages)`.
pub fn file_row(index: usize, entry: &DocumentRef) -> String {
    format!("  {index}. {}  ({})", entry.display_name(), entry.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::DocumentId;
    use crate::files::StatusMessage;

    #[test]
    fn test_new_formatter() {
        let formatter = OutputFormatter::new(false, false);
        assert!(!formatter.is_quiet());
        assert!(!formatter.is_verbose());
        assert!(formatter.should_print());
        assert_eq!(formatter.locale(), Locale::English);
    }

    #[test]
    fn test_quiet_formatter() {
        let formatter = OutputFormatter::quiet();
        assert!(formatter.is_quiet());
        assert!(!formatter.should_print());
    }

    #[test]
    fn test_verbose_formatter() {
        let formatter = OutputFormatter::verbose();
        assert!(formatter.is_verbose());
        assert!(formatter.should_print());
    }

    #[test]
    fn test_render_plain() {
        let formatter = OutputFormatter::new(false, false).with_color(false);
        assert_eq!(formatter.render(MessageLevel::Info, "hello"), "hello");
        assert_eq!(formatter.render(MessageLevel::Success, "done"), "✓ done");
        assert_eq!(formatter.render(MessageLevel::Error, "bad"), "✗ bad");
    }

    #[test]
    fn test_render_colored() {
        let formatter = OutputFormatter::new(false, false).with_color(true);
        let warning = formatter.render(MessageLevel::Warning, "careful");
        assert!(warning.starts_with("\x1b[33m"));
        assert!(warning.ends_with("\x1b[0m"));
        // Info is never colored.
        assert_eq!(formatter.render(MessageLevel::Info, "plain"), "plain");
    }

    #[test]
    fn test_localized_text() {
        let formatter = OutputFormatter::quiet().with_locale(Locale::German);
        assert_eq!(
            formatter.format(MessageKey::MergeSuccess, &[&"out.pdf"]),
            "Zusammengeführte PDF gespeichert als 'out.pdf'"
        );
    }

    #[test]
    fn test_file_row() {
        let entry = DocumentRef::with_page_count(DocumentId::new(1), "/nonexistent/a.pdf", 3);
        assert_eq!(file_row(2, &entry), "  2. a.pdf  (Unknown • 3 pages)");
    }

    #[test]
    fn test_quiet_file_list_prints_nothing() {
        let formatter = OutputFormatter::quiet();
        let state = DerivedState::for_count(0);
        assert_eq!(state.status, StatusMessage::AddToBegin);
        formatter.file_list(std::iter::empty(), &state);
    }
}
