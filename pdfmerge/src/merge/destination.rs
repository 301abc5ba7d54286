//! Choosing where the merged document is written.
//!
//! The merger itself always writes to the path it is given. These helpers
//! pick a default location and resolve collisions with existing files before
//! the merge starts.

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::error::{PdfMergeError, Result};
use crate::utils::has_pdf_extension;

/// `strftime` pattern of the suffix added to colliding names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Further numbered names tried when the timestamped name is also taken.
const MAX_EXTRA_ATTEMPTS: u32 = 99;

/// Default output name for a merge whose first input is `first_input`:
/// `<stem>_merged.pdf`.
pub fn default_file_name(first_input: &Path) -> String {
    match first_input.file_stem() {
        Some(stem) if !stem.is_empty() => format!("{}_merged.pdf", stem.to_string_lossy()),
        _ => "merged.pdf".to_string(),
    }
}

/// Default output directory: the first input's folder, then the user's
/// documents folder, then the current directory.
pub fn default_directory(first_input: Option<&Path>) -> PathBuf {
    first_input
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(dirs::document_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default output path next to `first_input`.
pub fn default_destination(first_input: &Path) -> PathBuf {
    default_directory(Some(first_input)).join(default_file_name(first_input))
}

/// Append `.pdf` unless the name already ends in it (ignoring case).
pub fn ensure_pdf_extension(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    if has_pdf_extension(&path) {
        return path;
    }

    let mut name = path.clone().into_os_string();
    name.push(".pdf");
    PathBuf::from(name)
}

/// `<stem>_<YYYYMMDD_HHmmss>.pdf` in the same directory as `path`.
pub fn timestamped(path: &Path, now: NaiveDateTime) -> PathBuf {
    with_suffix(path, &now.format(TIMESTAMP_FORMAT).to_string())
}

/// Resolve `path` against an existing file using the current local time.
///
/// See [`resolve_at`].
pub fn resolve<F>(path: &Path, mode: OverwriteMode, confirm: F) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> bool,
{
    resolve_at(path, mode, Local::now().naive_local(), confirm)
}

/// Decide the final output path.
///
/// A path that does not exist is returned unchanged. Otherwise:
/// - `Force` keeps `path`
/// - `NoClobber` fails with [`PdfMergeError::OutputExists`]
/// - `Rename` picks a timestamped alternate
/// - `Prompt` calls `confirm(path)`: `true` keeps `path`, `false` picks a
///   timestamped alternate
///
/// If the timestamped name is taken too, `_2`, `_3`, ... are appended.
pub fn resolve_at<F>(
    path: &Path,
    mode: OverwriteMode,
    now: NaiveDateTime,
    confirm: F,
) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> bool,
{
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    match mode {
        OverwriteMode::Force => Ok(path.to_path_buf()),
        OverwriteMode::NoClobber => Err(PdfMergeError::output_exists(path)),
        OverwriteMode::Rename => unused_alternate(path, now),
        OverwriteMode::Prompt => {
            if confirm(path) {
                Ok(path.to_path_buf())
            } else {
                unused_alternate(path, now)
            }
        }
    }
}

fn unused_alternate(path: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let stamp = now.format(TIMESTAMP_FORMAT).to_string();

    let first = with_suffix(path, &stamp);
    if !first.exists() {
        log::debug!("{} exists, using {}", path.display(), first.display());
        return Ok(first);
    }

    (2..=MAX_EXTRA_ATTEMPTS + 1)
        .map(|n| with_suffix(path, &format!("{stamp}_{n}")))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| PdfMergeError::output_exists(path))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{suffix}.pdf"))
}
