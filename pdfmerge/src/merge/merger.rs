//! Core PDF merging implementation.
//!
//! Inputs are opened one at a time, their pages are appended to a fresh
//! output document in native order, and each input is released before the
//! next one is opened. Page content is copied as-is: nothing is re-encoded,
//! compressed or deduplicated.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergeError, Result};
use crate::files::MIN_MERGE_INPUTS;
use crate::io::{PdfReader, PdfWriter};
use crate::utils::format_file_size;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Progress of a running merge.
///
/// Indices are zero-based positions in the input list. A merge reports
/// `Opening(0), Copying(0), Opening(1), ..., Writing` and then exactly one of
/// `Done` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    /// Loading input `i`.
    Opening(usize),
    /// Appending the pages of input `i`.
    Copying(usize),
    /// Persisting the merged document.
    Writing,
    /// The destination file is complete.
    Done,
    /// The merge stopped; nothing was written to the destination.
    Failed,
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total size of input files.
    pub input_size: u64,

    /// Size of the written output file.
    pub output_size: u64,

    /// Where the merged document was written.
    pub output_path: PathBuf,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Time spent copying pages.
    pub merge_time: Duration,

    /// Time taken to write the output.
    pub write_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }

    /// Wall time of the whole merge.
    pub fn total_time(&self) -> Duration {
        self.load_time + self.merge_time + self.write_time
    }
}

/// PDF merger that concatenates documents page by page.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    /// Reader for loading PDFs.
    reader: PdfReader,

    /// Writer for the merged output.
    writer: PdfWriter,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `ordered_paths` into a single PDF at `destination`.
    ///
    /// The output holds every page of the first input, then every page of
    /// the second, and so on. `destination` is overwritten if it exists;
    /// collision handling belongs to [`destination::resolve`].
    ///
    /// # Errors
    ///
    /// - [`PdfMergeError::InsufficientInputs`] for fewer than two paths, before
    ///   any file is touched
    /// - [`PdfMergeError::InputUnreadable`] naming the first input that
    ///   cannot be opened
    /// - [`PdfMergeError::WriteFailed`] if the output cannot be persisted
    ///
    /// On error nothing is left at `destination`.
    ///
    /// [`destination::resolve`]: super::destination::resolve
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::Merger;
    /// # use std::path::{Path, PathBuf};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let stats = Merger::new().merge(&inputs, Path::new("merged.pdf")).await?;
    /// println!("Merged {} files into {} pages",
    ///          stats.files_merged,
    ///          stats.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(
        &self,
        ordered_paths: &[PathBuf],
        destination: &Path,
    ) -> Result<MergeStatistics> {
        self.merge_with_progress(ordered_paths, destination, |_| {})
            .await
    }

    /// Like [`merge`](Self::merge), reporting each [`MergeStage`] to
    /// `on_stage`.
    pub async fn merge_with_progress<F>(
        &self,
        ordered_paths: &[PathBuf],
        destination: &Path,
        mut on_stage: F,
    ) -> Result<MergeStatistics>
    where
        F: FnMut(MergeStage),
    {
        let result = self.run(ordered_paths, destination, &mut on_stage).await;

        match &result {
            Ok(stats) => {
                log::debug!(
                    "merged {} files ({} pages) into {} in {:?}",
                    stats.files_merged,
                    stats.total_pages,
                    destination.display(),
                    stats.total_time()
                );
                on_stage(MergeStage::Done);
            }
            Err(e) => {
                log::debug!("merge into {} failed: {e}", destination.display());
                on_stage(MergeStage::Failed);
            }
        }

        result
    }

    async fn run<F>(
        &self,
        ordered_paths: &[PathBuf],
        destination: &Path,
        on_stage: &mut F,
    ) -> Result<MergeStatistics>
    where
        F: FnMut(MergeStage),
    {
        if ordered_paths.len() < MIN_MERGE_INPUTS {
            return Err(PdfMergeError::InsufficientInputs {
                count: ordered_paths.len(),
            });
        }

        let mut output = OutputDocument::new();
        let mut load_time = Duration::ZERO;
        let mut merge_time = Duration::ZERO;
        let mut input_size = 0;

        for (index, path) in ordered_paths.iter().enumerate() {
            on_stage(MergeStage::Opening(index));
            let loaded = self.reader.load(path).await?;
            load_time += loaded.load_time;
            input_size += loaded.file_size;

            on_stage(MergeStage::Copying(index));
            let copy_start = Instant::now();
            let pages = output.append(loaded.document, path)?;
            merge_time += copy_start.elapsed();

            log::debug!("copied {pages} pages from {}", path.display());
        }

        let total_pages = output.page_count();
        let document = output.finish();

        on_stage(MergeStage::Writing);
        let written = self.writer.save_with_stats(document, destination).await?;

        Ok(MergeStatistics {
            files_merged: ordered_paths.len(),
            total_pages,
            input_size,
            output_size: written.file_size,
            output_path: written.output_path,
            load_time,
            merge_time,
            write_time: written.write_time,
        })
    }
}

/// Output document under construction.
///
/// The page tree root is reserved up front; pages from each input are
/// re-parented onto it.
struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl OutputDocument {
    fn new() -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append every page of `source`, consuming it. Returns the number of
    /// pages copied.
    fn append(&mut self, mut source: Document, path: &Path) -> Result<usize> {
        source.renumber_objects_with(self.document.max_id + 1);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        let mut tree_nodes = BTreeSet::new();
        if let Ok(root) = source.trailer.get(b"Root").and_then(Object::as_reference) {
            tree_nodes.insert(root);
        }

        let mut pages = Vec::with_capacity(page_ids.len());
        for page_id in page_ids {
            let mut page = source
                .get_dictionary(page_id)
                .map_err(|e| {
                    PdfMergeError::input_unreadable(path, format!("page {page_id:?}: {e}"))
                })?
                .clone();

            let ancestors = ancestors(&source, &page);
            inherit_attributes(&source, &mut page, &ancestors);
            tree_nodes.extend(ancestors);

            page.set("Parent", self.pages_id);
            pages.push((page_id, page));
        }

        let copied = pages.len();
        self.document.max_id = self.document.max_id.max(source.max_id);

        for (id, object) in source.objects {
            if !tree_nodes.contains(&id) {
                self.document.objects.insert(id, object);
            }
        }
        for (id, page) in pages {
            self.document.objects.insert(id, Object::Dictionary(page));
            self.kids.push(Object::Reference(id));
        }

        Ok(copied)
    }

    /// Attach the page tree and catalog.
    fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document
    }
}

/// Page tree nodes above `page`, nearest first.
fn ancestors(doc: &Document, page: &Dictionary) -> Vec<ObjectId> {
    let mut chain = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    while let Some(id) = parent {
        if chain.contains(&id) {
            break;
        }
        chain.push(id);
        parent = doc
            .get_dictionary(id)
            .and_then(|node| node.get(b"Parent"))
            .and_then(Object::as_reference)
            .ok();
    }

    chain
}

/// Copy inheritable attributes the page lacks from its nearest ancestor.
fn inherit_attributes(doc: &Document, page: &mut Dictionary, ancestors: &[ObjectId]) {
    for key in INHERITABLE {
        if page.has(key) {
            continue;
        }

        let inherited = ancestors
            .iter()
            .filter_map(|&id| doc.get_dictionary(id).ok())
            .find_map(|node| node.get(key).ok());

        if let Some(value) = inherited {
            page.set(key, value.clone());
        }
    }
}
