//! A single entry of the file list.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::io::PdfReader;
use crate::utils::file_name;

/// Stable handle for an entry in a [`FileList`](super::FileList).
///
/// Ids are assigned at insertion and never reused within one list, so a
/// caller can keep an id across reorders and removals of other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One input PDF in the file list.
#[derive(Debug)]
pub struct DocumentRef {
    id: DocumentId,
    path: PathBuf,
    page_count: OnceLock<usize>,
}

impl DocumentRef {
    /// Create an entry whose page count is computed on first access.
    pub fn new(id: DocumentId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
            page_count: OnceLock::new(),
        }
    }

    /// Create an entry with an already known page count.
    pub fn with_page_count(id: DocumentId, path: impl Into<PathBuf>, page_count: usize) -> Self {
        let entry = Self::new(id, path);
        let _ = entry.page_count.set(page_count);
        entry
    }

    /// Handle of this entry.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Path as it was added.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file.
    pub fn display_name(&self) -> String {
        file_name(&self.path)
    }

    /// Number of pages, or `0` if the file cannot be opened.
    pub fn page_count(&self) -> usize {
        *self
            .page_count
            .get_or_init(|| PdfReader::new().page_count_lossy(&self.path))
    }

    /// Size on disk in bytes, if the file is still readable.
    pub fn file_size(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// One-line description such as `12.3 KB • 4 pages`.
    pub fn summary(&self) -> String {
        let size = self
            .file_size()
            .map(compact_size)
            .unwrap_or_else(|| "Unknown".to_string());
        let pages = self.page_count();
        let noun = if pages == 1 { "page" } else { "pages" };
        format!("{size} • {pages} {noun}")
    }
}

/// Size with one decimal, as shown in list rows.
fn compact_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / KB)
    } else {
        format!("{:.1} MB", bytes as f64 / (KB * KB))
    }
}
