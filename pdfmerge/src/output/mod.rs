//! Output formatting and display for pdfmerge.
//!
//! This module handles all user-facing output including:
//! - Formatted, localized status messages
//! - Merge progress
//! - Summary reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::output::OutputFormatter;
//! use pdfmerge::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter, file_row};
pub use progress::{MergeProgress, ProgressBar};

use crate::files::BatchAddSummary;
use crate::i18n::MessageKey;
use crate::merge::MergeStatistics;

/// Report the outcome of adding a batch of files.
///
/// The summary line is a warning when nothing could be added.
pub fn display_batch_summary(formatter: &OutputFormatter, summary: &BatchAddSummary) {
    let message = summary.message(formatter.locale());
    if summary.added.is_empty() {
        formatter.warning(&message);
    } else {
        formatter.info(&message);
    }
}

/// Report a finished merge; statistics are shown in verbose mode.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    let name = stats
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| stats.output_path.display().to_string());

    formatter.success(&formatter.format(MessageKey::MergeSuccess, &[&name]));

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input files", &stats.files_merged.to_string());
        formatter.detail("Total pages", &stats.total_pages.to_string());
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Output size", &stats.format_output_size());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", stats.load_time.as_secs_f64()),
        );
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", stats.merge_time.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", stats.write_time.as_secs_f64()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_display_helpers_do_not_panic() {
        let formatter = OutputFormatter::quiet();
        display_batch_summary(&formatter, &BatchAddSummary::default());

        let stats = MergeStatistics {
            files_merged: 2,
            total_pages: 5,
            input_size: 10,
            output_size: 20,
            output_path: PathBuf::from("/tmp/out.pdf"),
            load_time: Duration::ZERO,
            merge_time: Duration::ZERO,
            write_time: Duration::ZERO,
        };
        display_merge_statistics(&OutputFormatter::verbose(), &stats);
    }
}
