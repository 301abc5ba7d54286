//! PDF merging operations.
//!
//! This module provides the merge engine and the destination policy that
//! runs before it:
//! - [`Merger`] concatenates the pages of N inputs in order
//! - [`destination`] picks default output names and resolves collisions
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::OverwriteMode;
//! use pdfmerge::merge::{Merger, destination};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let output = destination::resolve(
//!     &destination::default_destination(&inputs[0]),
//!     OverwriteMode::Rename,
//!     |_| false,
//! )?;
//!
//! let stats = Merger::new().merge(&inputs, &output).await?;
//! println!("Merged {} pages", stats.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod destination;
pub mod merger;

pub use merger::{MergeStage, MergeStatistics, Merger};

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Merge `ordered_paths` into `destination` with a default [`Merger`].
///
/// # Errors
///
/// Returns an error if any merge step fails.
pub async fn merge_pdfs(ordered_paths: &[PathBuf], destination: &Path) -> Result<MergeStatistics> {
    Merger::new().merge(ordered_paths, destination).await
}
