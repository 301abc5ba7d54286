//! pdfmerge - Collect, order and merge PDF files into a single document.
//!
//! This library provides the two halves of a PDF merge tool:
//!
//! - [`files::FileList`]: an ordered, duplicate-aware selection of input
//!   files with derived view state
//! - [`merge::Merger`]: an order-preserving page concatenation that writes
//!   its output atomically
//!
//! Around them sit the destination policy ([`merge::destination`]), localized
//! messages ([`i18n`]) and persisted settings ([`config::Settings`]).
//!
//! # Examples
//!
//! ## Building a list and merging it
//!
//! ```no_run
//! use pdfmerge::files::FileList;
//! use pdfmerge::merge::{Merger, destination};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut files = FileList::new();
//! files.add("chapter1.pdf")?;
//! let appendix = files.add("appendix.pdf")?.id;
//! files.add("chapter2.pdf")?;
//! files.move_to_bottom(appendix);
//!
//! let inputs = files.paths();
//! let output = destination::default_destination(&inputs[0]);
//! let stats = Merger::new().merge(&inputs, &output).await?;
//! println!("Created {} page document", stats.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Reacting to list changes
//!
//! ```
//! use pdfmerge::files::FileList;
//! use pdfmerge::i18n::Locale;
//!
//! let mut files = FileList::new();
//! files.subscribe(|state| println!("{}", state.status.text(Locale::English)));
//! assert_eq!(files.derived_state().count, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod files;
pub mod i18n;
pub mod io;
pub mod merge;
pub mod output;
pub mod picker;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, OverwriteMode, Settings};
pub use error::{PdfMergeError, Result};
pub use files::{DerivedState, DocumentId, DocumentRef, FileList};
pub use i18n::Locale;
pub use merge::{MergeStage, MergeStatistics, Merger};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
