//! PDF file access.
//!
//! This module is the only place that touches PDF bytes on disk:
//! - Probing a candidate file before it enters the file list
//! - Loading inputs read-only for a merge
//! - Writing the merged document atomically
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::{DocumentProbe, PdfReader};
//! use std::path::Path;
//!
//! let pages = PdfReader::new().probe(Path::new("input.pdf"))?;
//! println!("{pages} pages");
//! # Ok::<(), pdfmerge::PdfMergeError>(())
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};

use crate::error::Result;
use std::path::Path;

/// Decides whether a file can be opened as a PDF.
///
/// The file list calls this once per added path. Implementations return the
/// page count on success and [`PdfMergeError::NotAPdf`] otherwise.
///
/// [`PdfMergeError::NotAPdf`]: crate::PdfMergeError::NotAPdf
pub trait DocumentProbe {
    /// Open `path` and count its pages.
    fn probe(&self, path: &Path) -> Result<usize>;
}

impl<P: DocumentProbe + ?Sized> DocumentProbe for &P {
    fn probe(&self, path: &Path) -> Result<usize> {
        (**self).probe(path)
    }
}
