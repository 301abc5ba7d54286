//! Progress bar and indicators.
//!
//! This module provides visual progress for a running merge. [`MergeProgress`]
//! maps each [`MergeStage`] onto a step of a [`ProgressBar`].
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::progress::ProgressBar;
//!
//! let mut progress = ProgressBar::new(10);
//! progress.set_message("Merging");
//!
//! for i in 0..=10 {
//!     progress.update(i);
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::merge::MergeStage;
use crate::utils::file_name;

/// Progress bar for visual feedback during operations: `[=====>    ] 50%`.
#[derive(Debug)]
pub struct ProgressBar {
    /// Total number of steps.
    total: usize,
    /// Current progress.
    current: usize,
    /// Optional message to display.
    message: Option<String>,
    /// Last update time (for rate limiting).
    last_update: Instant,
    /// Minimum time between updates.
    update_interval: Duration,
    /// Whether the progress bar is enabled.
    enabled: bool,
}

impl ProgressBar {
    /// Create a new progress bar.
    ///
    /// Output is enabled only when stdout is a terminal.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            message: None,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100),
            enabled: io::stdout().is_terminal(),
        }
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Update the progress bar to a specific value.
    pub fn update(&mut self, current: usize) {
        self.current = current;

        // Rate limit updates
        if self.last_update.elapsed() < self.update_interval && current < self.total {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Mark the progress bar as finished.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled {
            self.render();
            println!();
        }
    }

    /// Clear the progress bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }

        print!("\r\x1b[K{}", self.render_bar());
        io::stdout().flush().ok();
    }

    fn render_bar(&self) -> String {
        let width = 30;
        let filled = (width * self.current) / self.total.max(1);
        let empty = width - filled.min(width);

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let mut parts = vec![bar, format!("{:.0}%", self.percent())];
        if let Some(ref msg) = self.message {
            parts.push(msg.clone());
        }
        parts.join(" ")
    }

    /// Get the current progress percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Progress display fed by [`MergeStage`] events.
///
/// Each input contributes two steps (opening and copying); writing is the
/// final step.
#[derive(Debug)]
pub struct MergeProgress {
    bar: ProgressBar,
    names: Vec<String>,
}

impl MergeProgress {
    /// Progress for merging `inputs`. Nothing is drawn unless `enabled`.
    pub fn new(inputs: &[PathBuf], enabled: bool) -> Self {
        let mut bar = ProgressBar::new(inputs.len() * 2 + 1);
        bar.enabled &= enabled;

        Self {
            bar,
            names: inputs.iter().map(|p| file_name(p)).collect(),
        }
    }

    /// Advance to `stage`.
    pub fn on_stage(&mut self, stage: MergeStage) {
        match stage {
            MergeStage::Opening(index) => {
                let name = self.name(index);
                self.bar.set_message(format!("Opening {name}"));
                self.bar.update(index * 2);
            }
            MergeStage::Copying(index) => {
                let name = self.name(index);
                self.bar.set_message(format!("Copying {name}"));
                self.bar.update(index * 2 + 1);
            }
            MergeStage::Writing => {
                self.bar.set_message("Writing");
                self.bar.update(self.bar.total - 1);
            }
            MergeStage::Done => self.bar.finish(),
            MergeStage::Failed => self.bar.clear(),
        }
    }

    /// Completed fraction in percent.
    pub fn percent(&self) -> f64 {
        self.bar.percent()
    }

    fn name(&self, index: usize) -> String {
        self.names.get(index).cloned().unwrap_or_default()
    }
}
