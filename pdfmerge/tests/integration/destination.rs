//! Integration tests for output naming and collision handling.

use chrono::NaiveDate;
use pdfmerge::config::OverwriteMode;
use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::destination::{default_destination, resolve, resolve_at};
use std::path::Path;
use tempfile::TempDir;

fn at_noon() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 31)
        .unwrap()
        .and_hms_opt(12, 0, 5)
        .unwrap()
}

#[test]
fn test_default_destination_next_to_first_input() {
    let path = default_destination(Path::new("/scans/Invoice March.pdf"));
    assert_eq!(path, Path::new("/scans/Invoice March_merged.pdf"));
}

#[test]
fn test_declined_prompt_uses_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let taken = temp_dir.path().join("report.pdf");
    std::fs::write(&taken, b"old").unwrap();

    let mut asked = None;
    let resolved = resolve_at(&taken, OverwriteMode::Prompt, at_noon(), |path| {
        asked = Some(path.to_path_buf());
        false
    })
    .unwrap();

    assert_eq!(asked.as_deref(), Some(taken.as_path()));
    assert_eq!(resolved, temp_dir.path().join("report_20250131_120005.pdf"));
    assert_eq!(std::fs::read(&taken).unwrap(), b"old");
}

#[test]
fn test_accepted_prompt_keeps_path() {
    let temp_dir = TempDir::new().unwrap();
    let taken = temp_dir.path().join("report.pdf");
    std::fs::write(&taken, b"old").unwrap();

    let resolved = resolve(&taken, OverwriteMode::Prompt, |_| true).unwrap();
    assert_eq!(resolved, taken);
}

#[test]
fn test_free_path_is_never_prompted() {
    let temp_dir = TempDir::new().unwrap();
    let free = temp_dir.path().join("new.pdf");

    let resolved = resolve(&free, OverwriteMode::Prompt, |_| panic!("prompted")).unwrap();
    assert_eq!(resolved, free);
}

#[test]
fn test_no_clobber_and_rename() {
    let temp_dir = TempDir::new().unwrap();
    let taken = temp_dir.path().join("report.pdf");
    std::fs::write(&taken, b"old").unwrap();
    std::fs::write(temp_dir.path().join("report_20250131_120005.pdf"), b"").unwrap();

    let err = resolve_at(&taken, OverwriteMode::NoClobber, at_noon(), |_| true).unwrap_err();
    assert!(matches!(err, PdfMergeError::OutputExists { .. }));

    let renamed = resolve_at(&taken, OverwriteMode::Rename, at_noon(), |_| true).unwrap();
    assert_eq!(renamed, temp_dir.path().join("report_20250131_120005_2.pdf"));
}
