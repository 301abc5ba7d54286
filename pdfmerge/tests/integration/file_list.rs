//! Integration tests for building and reordering the file list.

use pdfmerge::error::PdfMergeError;
use pdfmerge::files::{DerivedState, FileList, StatusMessage};
use pdfmerge::i18n::Locale;
use pdfmerge::merge::merge_pdfs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf, write_text};

#[test]
fn test_duplicate_path_and_duplicate_name() {
    let temp_dir = TempDir::new().unwrap();
    let x = write_pdf(temp_dir.path(), "x.pdf", &["x"]);
    let y = write_pdf(temp_dir.path(), "y.pdf", &["y"]);
    let sub_x = write_pdf(temp_dir.path(), "sub/x.pdf", &["sub x"]);

    let mut files = FileList::new();
    let x_id = files.add(&x).unwrap().id;
    files.add(&y).unwrap();

    let err = files.add(&x).unwrap_err();
    assert!(matches!(err, PdfMergeError::AlreadyPresent { .. }));
    assert_eq!(files.len(), 2);

    let outcome = files.add(&sub_x).unwrap();
    assert_eq!(outcome.duplicate_name, Some(x_id));
    assert_eq!(files.len(), 3);
    assert_eq!(files.paths(), vec![x, y, sub_x]);
}

#[test]
fn test_non_pdf_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let notes = write_text(temp_dir.path(), "notes.pdf");

    let mut files = FileList::new();
    let err = files.add(&notes).unwrap_err();

    assert!(matches!(err, PdfMergeError::NotAPdf { .. }));
    assert!(files.is_empty());
}

#[test]
fn test_batch_add_summary() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["a"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["b1", "b2"]);
    let notes = write_text(temp_dir.path(), "notes.txt");
    let missing = temp_dir.path().join("missing.pdf");

    let mut files = FileList::new();
    files.add(&a).unwrap();

    let summary = files.add_all([&a, &b, &notes, &missing]);

    assert_eq!(summary.added.len(), 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.missing, 1);
    assert_eq!(
        summary.message(Locale::English),
        "Added 1 PDF file(s) (skipped 1 non-PDF file(s)) (skipped 1 duplicate file(s))"
    );
    assert_eq!(files.total_pages(), 3);
}

#[test]
fn test_reorder_then_merge() {
    let temp_dir = TempDir::new().unwrap();
    let mut files = FileList::new();
    let ids: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| {
            let path = write_pdf(temp_dir.path(), &format!("{name}.pdf"), &[name]);
            files.add(path).unwrap().id
        })
        .collect();

    files.move_to_top(ids[2]);
    files.move_to_bottom(ids[2]);
    assert_eq!(files.position(ids[2]), Some(3));

    assert!(files.move_up(ids[3]));
    assert!(files.move_up(ids[3]));
    assert!(!files.move_up(ids[3]));
    files.remove(ids[1]);

    let order: Vec<String> = files.iter().map(|entry| entry.display_name()).collect();
    assert_eq!(order, vec!["d.pdf", "a.pdf", "c.pdf"]);

    let output = temp_dir.path().join("out.pdf");
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(merge_pdfs(&files.paths(), &output))
        .unwrap();
    assert_eq!(page_markers(&output), vec!["d", "a", "c"]);
}

#[test]
fn test_observers_follow_changes() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["a"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["b"]);

    let seen: Arc<Mutex<Vec<DerivedState>>> = Arc::default();
    let mut files = FileList::new();
    let sink = Arc::clone(&seen);
    files.subscribe(move |state| sink.lock().unwrap().push(*state));

    files.add(&a).unwrap();
    files.add(&b).unwrap();
    let _ = files.add(&a);
    files.clear();

    let statuses: Vec<StatusMessage> = seen.lock().unwrap().iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            StatusMessage::AddMoreToEnable,
            StatusMessage::ReadyToMerge(2),
            StatusMessage::AddToBegin,
        ]
    );
    assert!(!files.derived_state().has_files);
}
