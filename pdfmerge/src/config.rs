//! Configuration module for pdfmerge.
//!
//! This module holds the validated configuration that drives a merge run and
//! the small set of user settings persisted between runs:
//! - Validation of argument combinations
//! - Output collision behavior
//! - The remembered interface language

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfMergeError, Result};
use crate::files::MIN_MERGE_INPUTS;
use crate::i18n::Locale;
use crate::utils::path_key;

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask the user; on refusal save under a timestamped name (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
    /// Keep the existing file and save under a timestamped name.
    Rename,
}

impl FromStr for OverwriteMode {
    type Err = PdfMergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "force" => Ok(Self::Force),
            "no-clobber" | "noclobber" => Ok(Self::NoClobber),
            "rename" => Ok(Self::Rename),
            _ => Err(PdfMergeError::invalid_config(format!(
                "Invalid overwrite mode: {s}. Must be one of: prompt, force, no-clobber, rename"
            ))),
        }
    }
}

/// Complete configuration for a merge run.
///
/// This structure contains all settings needed to perform a merge,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in merge order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Language of user-facing messages.
    pub locale: Locale,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::InvalidConfig`] if:
    /// - Fewer than two input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - The output path is one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.len() < MIN_MERGE_INPUTS {
            return Err(PdfMergeError::invalid_config(format!(
                "At least {MIN_MERGE_INPUTS} input files are required, got {}",
                self.inputs.len()
            )));
        }

        if self.verbose && self.quiet {
            return Err(PdfMergeError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        let output = path_key(&self.output);
        if let Some(input) = self.inputs.iter().find(|i| path_key(i) == output) {
            return Err(PdfMergeError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                input.display()
            )));
        }

        Ok(())
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

/// User preferences kept between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interface language.
    pub language: Locale,
}

impl Settings {
    /// Name of the settings file inside the configuration directory.
    pub const FILE_NAME: &'static str = "settings.json";

    /// Default settings location: `<config dir>/pdfmerge/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::NAME).join(Self::FILE_NAME))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::Settings`] if the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(settings_error(path, e)),
        };

        serde_json::from_str(&text).map_err(|e| settings_error(path, e))
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}");
            Self::default()
        })
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| settings_error(path, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| settings_error(path, e))?;
        std::fs::write(path, json).map_err(|e| settings_error(path, e))?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }
}

fn settings_error(path: &Path, err: impl std::fmt::Display) -> PdfMergeError {
    PdfMergeError::Settings {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
