//! The ordered list of PDFs to merge.
//!
//! [`FileList`] owns the user's selection. Insertion order is merge order.
//! Two entries never share a path (absolute, normalized and compared
//! case-insensitively); entries
//! that only share a file name are allowed and reported to the caller.
//!
//! Every mutation either applies fully or leaves the list untouched. After
//! each mutation that changed the list, subscribed observers receive the new
//! [`DerivedState`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::files::FileList;
//!
//! let mut files = FileList::new();
//! let first = files.add("a.pdf")?.id;
//! files.add("b.pdf")?;
//! files.move_to_bottom(first);
//!
//! assert!(files.derived_state().can_merge);
//! # Ok::<(), pdfmerge::PdfMergeError>(())
//! ```

mod document;

pub use document::{DocumentId, DocumentRef};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PdfMergeError, Result};
use crate::i18n::{self, Locale, MessageKey};
use crate::io::{DocumentProbe, PdfReader};
use crate::utils::{name_key, normalize_path, path_key};

/// Minimum number of files a merge needs.
pub const MIN_MERGE_INPUTS: usize = 2;

/// Callback invoked with the new state after the list changed.
pub type Observer = Box<dyn Fn(&DerivedState) + Send + Sync>;

/// Result of a successful [`FileList::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Id of the new entry.
    pub id: DocumentId,

    /// Existing entry with the same file name but a different path.
    pub duplicate_name: Option<DocumentId>,
}

/// Status line shown for the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    /// The list is empty.
    AddToBegin,
    /// One file; merging needs another.
    AddMoreToEnable,
    /// Two or more files.
    ReadyToMerge(usize),
}

impl StatusMessage {
    /// Render the status in `locale`.
    pub fn text(&self, locale: Locale) -> String {
        match self {
            Self::AddToBegin => i18n::text(locale, MessageKey::AddToBegin),
            Self::AddMoreToEnable => i18n::text(locale, MessageKey::AddMoreToEnable),
            Self::ReadyToMerge(count) => i18n::format(locale, MessageKey::ReadyToMerge, &[count]),
        }
    }
}

/// View state computed from the list contents alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedState {
    /// Number of entries.
    pub count: usize,
    /// At least two entries.
    pub can_merge: bool,
    /// At least one entry.
    pub has_files: bool,
    /// Status line for the list.
    pub status: StatusMessage,
}

impl DerivedState {
    /// State for a list holding `count` entries.
    pub fn for_count(count: usize) -> Self {
        let status = match count {
            0 => StatusMessage::AddToBegin,
            1 => StatusMessage::AddMoreToEnable,
            n => StatusMessage::ReadyToMerge(n),
        };

        Self {
            count,
            can_merge: count >= MIN_MERGE_INPUTS,
            has_files: count > 0,
            status,
        }
    }
}

/// What happened to each path of a [`FileList::add_all`] batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchAddSummary {
    /// Ids of the entries that were appended, in order.
    pub added: Vec<DocumentId>,

    /// Paths that did not exist.
    pub missing: usize,

    /// Paths that exist but are not PDFs.
    pub invalid: usize,

    /// Paths already in the list.
    pub duplicates: usize,

    /// File names of added entries that clash with an existing name.
    pub duplicate_names: Vec<String>,
}

impl BatchAddSummary {
    /// Duplicate names are listed individually up to this many.
    const MAX_LISTED_NAMES: usize = 3;

    /// Human readable report of the batch in `locale`.
    pub fn message(&self, locale: Locale) -> String {
        if !self.added.is_empty() {
            let mut message = i18n::format(locale, MessageKey::AddedFiles, &[&self.added.len()]);

            if self.invalid > 0 {
                let skipped = i18n::format(locale, MessageKey::SkippedInvalid, &[&self.invalid]);
                message.push_str(&format!(" ({skipped})"));
            }
            if self.duplicates > 0 {
                let skipped =
                    i18n::format(locale, MessageKey::SkippedDuplicates, &[&self.duplicates]);
                message.push_str(&format!(" ({skipped})"));
            }
            if !self.duplicate_names.is_empty() {
                message.push('\n');
                message.push_str(&i18n::format(
                    locale,
                    MessageKey::DuplicateNamesNotice,
                    &[&self.duplicate_names.len()],
                ));
                if self.duplicate_names.len() <= Self::MAX_LISTED_NAMES {
                    message.push_str(": ");
                    message.push_str(&self.duplicate_names.join(", "));
                }
            }
            message
        } else if self.invalid > 0 {
            i18n::format(locale, MessageKey::NoValidFiles, &[&self.invalid])
        } else if self.duplicates > 0 {
            i18n::format(locale, MessageKey::NothingNew, &[&self.duplicates])
        } else {
            i18n::text(locale, MessageKey::NothingProvided)
        }
    }
}

/// Ordered, duplicate-aware list of input PDFs.
///
/// The probe decides whether a path is a PDF; [`PdfReader`] is used unless
/// another [`DocumentProbe`] is supplied.
pub struct FileList<P: DocumentProbe = PdfReader> {
    probe: P,
    entries: Vec<DocumentRef>,
    next_id: u64,
    observers: Vec<Observer>,
}

impl FileList<PdfReader> {
    /// Create an empty list that probes files with [`PdfReader`].
    pub fn new() -> Self {
        Self::with_probe(PdfReader::new())
    }
}

impl Default for FileList<PdfReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DocumentProbe> FileList<P> {
    /// Create an empty list that probes files with `probe`.
    pub fn with_probe(probe: P) -> Self {
        Self {
            probe,
            entries: Vec::new(),
            next_id: 1,
            observers: Vec::new(),
        }
    }

    /// Register a callback that receives the derived state after every
    /// change to the list.
    pub fn subscribe(&mut self, observer: impl Fn(&DerivedState) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Append `path` to the end of the list.
    ///
    /// The entry stores the absolute, normalized form of `path`, so `a.pdf`
    /// and `./a.pdf` name the same entry.
    ///
    /// # Errors
    ///
    /// - [`PdfMergeError::NotAPdf`] if the probe cannot open the file
    /// - [`PdfMergeError::AlreadyPresent`] if the path is already listed
    ///
    /// The list is unchanged on error.
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<AddOutcome> {
        let path = normalize_path(path.as_ref());
        let page_count = self.probe.probe(&path)?;

        if self.contains_path(&path) {
            log::debug!("already listed: {}", path.display());
            return Err(PdfMergeError::already_present(&path));
        }

        let duplicate_name = self.find_duplicate_name(&path).map(DocumentRef::id);
        let id = DocumentId::new(self.next_id);
        self.next_id += 1;

        self.entries
            .push(DocumentRef::with_page_count(id, &path, page_count));
        log::debug!("added {} as {id} ({page_count} pages)", path.display());
        self.notify();

        Ok(AddOutcome { id, duplicate_name })
    }

    /// Add several paths in order, skipping the ones that cannot be added.
    ///
    /// Missing files are skipped silently. Other rejections are counted in
    /// the returned summary.
    pub fn add_all<I>(&mut self, paths: I) -> BatchAddSummary
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut summary = BatchAddSummary::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                log::debug!("skipping missing file {}", path.display());
                summary.missing += 1;
                continue;
            }

            match self.add(path) {
                Ok(outcome) => {
                    summary.added.push(outcome.id);
                    if outcome.duplicate_name.is_some() {
                        let name = crate::utils::file_name(path);
                        if !summary.duplicate_names.contains(&name) {
                            summary.duplicate_names.push(name);
                        }
                    }
                }
                Err(PdfMergeError::AlreadyPresent { .. }) => summary.duplicates += 1,
                Err(e) => {
                    log::debug!("rejected {}: {e}", path.display());
                    summary.invalid += 1;
                }
            }
        }

        summary
    }

    /// Remove the entry with `id`. Returns `false` if there is none.
    pub fn remove(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.notify();
        }
    }

    /// Swap the entry with its predecessor. No-op for the first entry.
    pub fn move_up(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.entries.swap(index, index - 1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Swap the entry with its successor. No-op for the last entry.
    pub fn move_down(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.entries.len() => {
                self.entries.swap(index, index + 1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Move the entry to the front, keeping the others in order.
    pub fn move_to_top(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.entries[..=index].rotate_right(1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Move the entry to the back, keeping the others in order.
    pub fn move_to_bottom(&mut self, id: DocumentId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.entries.len() => {
                self.entries[index..].rotate_left(1);
                self.notify();
                true
            }
            _ => false,
        }
    }

    /// Current view state.
    pub fn derived_state(&self) -> DerivedState {
        DerivedState::for_count(self.entries.len())
    }

    /// First entry whose file name equals that of `path`, ignoring case.
    ///
    /// The entry for `path` itself matches too; [`add`](Self::add) rejects
    /// such a path as already present before asking.
    pub fn find_duplicate_name(&self, path: &Path) -> Option<&DocumentRef> {
        let name = name_key(path);
        self.entries
            .iter()
            .find(|entry| name_key(entry.path()) == name)
    }

    /// Snapshot of the paths in merge order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(|entry| entry.path().to_path_buf())
            .collect()
    }

    /// Entry with `id`.
    pub fn get(&self, id: DocumentId) -> Option<&DocumentRef> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Zero-based index of the entry with `id`.
    pub fn position(&self, id: DocumentId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Id of the entry at zero-based `index`.
    pub fn id_at(&self, index: usize) -> Option<DocumentId> {
        self.entries.get(index).map(DocumentRef::id)
    }

    /// Entries in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRef> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the page counts of all entries.
    pub fn total_pages(&self) -> usize {
        self.entries.iter().map(DocumentRef::page_count).sum()
    }

    fn contains_path(&self, path: &Path) -> bool {
        let key = path_key(path);
        self.entries.iter().any(|entry| path_key(entry.path()) == key)
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let state = self.derived_state();
        for observer in &self.observers {
            observer(&state);
        }
    }
}

impl<'a, P: DocumentProbe> IntoIterator for &'a FileList<P> {
    type Item = &'a DocumentRef;
    type IntoIter = std::slice::Iter<'a, DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: DocumentProbe> fmt::Debug for FileList<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileList")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}
