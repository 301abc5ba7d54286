//! Where file and folder choices come from.
//!
//! The library never talks to a file dialog. A front end implements
//! [`FilePicker`]; the command line builds one from its arguments.

use std::path::PathBuf;

use crate::error::Result;
use crate::utils::{collect_paths_for_patterns, list_pdfs_in_dir};

/// Source of user-selected files and folders.
pub trait FilePicker {
    /// Files the user picked, in the order they should be added.
    fn pick_files(&mut self) -> Result<Vec<PathBuf>>;

    /// Output folder the user picked, if any.
    fn pick_folder(&mut self) -> Option<PathBuf>;
}

/// Picker backed by glob patterns and an optional folder scan.
///
/// Pattern matches come first, in pattern order, followed by the PDFs of
/// `scan_dir` sorted by name.
#[derive(Debug, Clone, Default)]
pub struct PatternPicker {
    patterns: Vec<String>,
    scan_dir: Option<PathBuf>,
    recursive: bool,
    output_dir: Option<PathBuf>,
}

impl PatternPicker {
    /// Picker over `patterns`, expanded with `glob`.
    pub fn new(patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Also add every PDF found in `dir`.
    pub fn scan_dir(mut self, dir: impl Into<PathBuf>, recursive: bool) -> Self {
        self.scan_dir = Some(dir.into());
        self.recursive = recursive;
        self
    }

    /// Folder returned by [`FilePicker::pick_folder`].
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl FilePicker for PatternPicker {
    fn pick_files(&mut self) -> Result<Vec<PathBuf>> {
        let mut paths = collect_paths_for_patterns(&self.patterns)?;

        if let Some(dir) = &self.scan_dir {
            paths.extend(list_pdfs_in_dir(dir, self.recursive)?);
        }

        log::debug!("picked {} file(s)", paths.len());
        Ok(paths)
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.output_dir.clone()
    }
}
