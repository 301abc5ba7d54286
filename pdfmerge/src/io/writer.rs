//! PDF writing and saving operations.
//!
//! Output is written atomically: the document is serialized into a uniquely
//! named temporary file next to the destination, which is renamed onto the
//! destination only once it is complete. A failed write never leaves a file
//! at the destination, and no other file in the folder is touched.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::writer::PdfWriter;
//! use lopdf::Document;
//! ```

use lopdf::Document;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tokio::task;

use crate::error::{PdfMergeError, Result};
use crate::utils::format_file_size;

/// Buffer size for writing (in bytes).
const BUFFER_SIZE: usize = 64 * 1024;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Atomic PDF writer. Documents are saved uncompressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::WriteFailed`] naming `path` if the document
    /// cannot be written. Nothing is left at `path` in that case.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// Serialization runs on tokio's blocking pool.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::io::writer::PdfWriter;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let writer = PdfWriter::new();
    /// let stats = writer.save_with_stats(doc, Path::new("output.pdf")).await?;
    /// println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let writer = *self;
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || writer.save_blocking(doc, &path_buf))
            .await
            .map_err(|e| PdfMergeError::write_failed(path, std::io::Error::other(e)))?
    }

    /// Save a PDF on the calling thread.
    pub fn save_blocking(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        let mut staged =
            staging_file(path).map_err(|source| PdfMergeError::write_failed(path, source))?;
        log::debug!("writing {} via {}", path.display(), staged.path().display());

        // Dropping `staged` on any early return removes the temporary file.
        write_document(&mut doc, staged.as_file_mut())
            .map_err(|source| PdfMergeError::write_failed(path, source))?;
        staged
            .persist(path)
            .map_err(|e| PdfMergeError::write_failed(path, e.error))?;

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path.to_path_buf(),
        })
    }
}

/// Uniquely named temporary file in the destination's folder, so the final
/// rename stays on one filesystem.
fn staging_file(path: &Path) -> std::io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdfmerge-").suffix(".part");

    // NamedTempFile defaults to 0600; the result should get the usual mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(dir)
}

fn write_document(doc: &mut Document, file: &mut File) -> std::io::Result<()> {
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, &mut *file);
    doc.save_to(&mut writer).map_err(std::io::Error::other)?;
    writer.flush()?;
    drop(writer);
    file.sync_all()
}
