//! Integration tests for merging generated PDFs.

use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::{MergeStage, Merger, merge_pdfs};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf, write_text};

#[tokio::test]
async fn test_merge_preserves_list_and_page_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1", "A2"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["B1", "B2", "B3"]);
    let output = temp_dir.path().join("merged.pdf");

    let stats = merge_pdfs(&[a, b], &output).await.unwrap();

    assert_eq!(stats.files_merged, 2);
    assert_eq!(stats.total_pages, 5);
    assert_eq!(stats.output_path, output);
    assert_eq!(page_markers(&output), vec!["A1", "A2", "B1", "B2", "B3"]);
}

#[tokio::test]
async fn test_merge_three_files_reversed() {
    let temp_dir = TempDir::new().unwrap();
    let one = write_pdf(temp_dir.path(), "1.pdf", &["one"]);
    let two = write_pdf(temp_dir.path(), "2.pdf", &["two"]);
    let three = write_pdf(temp_dir.path(), "3.pdf", &["three"]);
    let output = temp_dir.path().join("out.pdf");

    merge_pdfs(&[three, two, one], &output).await.unwrap();

    assert_eq!(page_markers(&output), vec!["three", "two", "one"]);
}

#[tokio::test]
async fn test_output_is_a_loadable_pdf() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["B1"]);
    let output = temp_dir.path().join("merged.pdf");

    let stats = merge_pdfs(&[a, b], &output).await.unwrap();

    let doc = lopdf::Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    assert_eq!(stats.output_size, std::fs::metadata(&output).unwrap().len());
}

#[tokio::test]
async fn test_single_input_is_rejected_before_io() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let output = temp_dir.path().join("merged.pdf");

    let result = merge_pdfs(&[a], &output).await;

    assert!(matches!(
        result,
        Err(PdfMergeError::InsufficientInputs { count: 1 })
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_input_leaves_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let b = temp_dir.path().join("gone.pdf");
    let output = temp_dir.path().join("merged.pdf");

    let result = merge_pdfs(&[a, b.clone()], &output).await;

    match result {
        Err(PdfMergeError::InputUnreadable { path, .. }) => assert_eq!(path, b),
        other => panic!("expected InputUnreadable, got {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn test_non_pdf_input_is_unreadable() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let notes = write_text(temp_dir.path(), "notes.pdf");
    let output = temp_dir.path().join("merged.pdf");

    let result = merge_pdfs(&[a, notes], &output).await;

    assert!(matches!(result, Err(PdfMergeError::InputUnreadable { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_merge_keeps_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let output = temp_dir.path().join("merged.pdf");
    std::fs::write(&output, b"previous").unwrap();

    let result = merge_pdfs(&[a, temp_dir.path().join("gone.pdf")], &output).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[tokio::test]
async fn test_merge_replaces_existing_destination() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["B1"]);
    let output = temp_dir.path().join("merged.pdf");
    std::fs::write(&output, b"previous").unwrap();

    merge_pdfs(&[a, b], &output).await.unwrap();

    assert_eq!(page_markers(&output), vec!["A1", "B1"]);
}

#[tokio::test]
async fn test_unwritable_destination() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", &["A1"]);
    let b = write_pdf(temp_dir.path(), "b.pdf", &["B1"]);
    let output = temp_dir.path().join("missing").join("merged.pdf");

    let result = merge_pdfs(&[a, b], &output).await;

    match result {
        Err(PdfMergeError::WriteFailed { path, .. }) => assert_eq!(path, output),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_progress_reports_each_input() {
    let temp_dir = TempDir::new().unwrap();
    let inputs: Vec<PathBuf> = ["a", "b", "c"]
        .iter()
        .map(|name| write_pdf(temp_dir.path(), &format!("{name}.pdf"), &[name]))
        .collect();
    let output = temp_dir.path().join("merged.pdf");

    let mut stages = Vec::new();
    Merger::new()
        .merge_with_progress(&inputs, &output, |stage| stages.push(stage))
        .await
        .unwrap();

    assert_eq!(
        stages,
        vec![
            MergeStage::Opening(0),
            MergeStage::Copying(0),
            MergeStage::Opening(1),
            MergeStage::Copying(1),
            MergeStage::Opening(2),
            MergeStage::Copying(2),
            MergeStage::Writing,
            MergeStage::Done,
        ]
    );
}
