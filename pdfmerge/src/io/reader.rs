//! PDF reading and probing operations.
//!
//! This module opens PDF documents from disk for two purposes:
//! - Probing a candidate file before it enters the file list
//! - Loading inputs read-only for a merge
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("a.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfMergeError, Result};
use crate::io::DocumentProbe;
use crate::utils::has_pdf_extension;

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// PDF reader backed by `lopdf`.
///
/// As a [`DocumentProbe`] it only accepts files named `*.pdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a PDF document on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::InputUnreadable`] if the file cannot be read
    /// or parsed.
    pub fn load_blocking(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();

        let document =
            Document::load(path).map_err(|e| PdfMergeError::input_unreadable(path, describe(&e)))?;

        log::debug!(
            "loaded {} ({} objects) in {:?}",
            path.display(),
            document.objects.len(),
            start.elapsed()
        );

        Ok(LoadedPdf::new(document, path.to_path_buf(), start.elapsed()))
    }

    /// Load a PDF document without blocking the async runtime.
    ///
    /// Parsing runs on tokio's blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::InputUnreadable`] if the file cannot be read
    /// or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let reader = *self;
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || reader.load_blocking(&path_buf))
            .await
            .map_err(|e| PdfMergeError::input_unreadable(path, format!("Load task failed: {e}")))?
    }

    /// Count the pages of a PDF, returning `0` if it cannot be opened.
    pub fn page_count_lossy(&self, path: &Path) -> usize {
        match self.load_blocking(path) {
            Ok(loaded) => loaded.page_count,
            Err(e) => {
                log::warn!("could not count pages of {}: {e}", path.display());
                0
            }
        }
    }
}

impl DocumentProbe for PdfReader {
    fn probe(&self, path: &Path) -> Result<usize> {
        if !path.is_file() {
            return Err(PdfMergeError::not_a_pdf(path, "file does not exist"));
        }

        if !has_pdf_extension(path) {
            return Err(PdfMergeError::not_a_pdf(path, "file name does not end in .pdf"));
        }

        let document =
            Document::load(path).map_err(|e| PdfMergeError::not_a_pdf(path, describe(&e)))?;

        Ok(document.get_pages().len())
    }
}

/// Turn a parser error into a message, flagging encrypted documents.
fn describe(err: &lopdf::Error) -> String {
    let msg = err.to_string();
    if msg.contains("encrypt") || msg.contains("password") {
        format!("{msg} (the PDF is encrypted; decrypt it first)")
    } else {
        msg
    }
}
