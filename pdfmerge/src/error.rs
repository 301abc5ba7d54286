//! Error types for pdfmerge.
//!
//! Every failure the library can produce is a variant of [`PdfMergeError`].
//! Errors carry the offending path so callers can show the user exactly which
//! file caused the problem.
//!
//! # Error Categories
//!
//! - **List errors**: a file was rejected by the file list (`NotAPdf`,
//!   `AlreadyPresent`)
//! - **Merge errors**: the merge could not start or an input failed
//!   (`InsufficientInputs`, `InputUnreadable`)
//! - **Output errors**: the destination could not be written or is taken
//!   (`WriteFailed`, `OutputExists`)
//! - **Configuration errors**: invalid arguments or unreadable settings

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// The file could not be opened as a PDF document.
    #[error("Not a valid PDF file: {}\n  Reason: {reason}", .path.display())]
    NotAPdf {
        /// Path of the rejected file.
        path: PathBuf,
        /// Why the file was rejected.
        reason: String,
    },

    /// The file is already in the list (paths compare case-insensitively).
    #[error("File is already in the list: {}", .path.display())]
    AlreadyPresent {
        /// Path that was added a second time.
        path: PathBuf,
    },

    /// A merge needs at least two inputs.
    #[error("At least two PDF files are needed to merge, got {count}")]
    InsufficientInputs {
        /// Number of inputs that were supplied.
        count: usize,
    },

    /// An input could not be opened or read during a merge.
    #[error("Cannot read input PDF: {}\n  Reason: {reason}", .path.display())]
    InputUnreadable {
        /// Path to the input that failed.
        path: PathBuf,
        /// Underlying parser or I/O message.
        reason: String,
    },

    /// The merged document could not be persisted.
    #[error("Failed to write output file: {}\n  Reason: {source}", .path.display())]
    WriteFailed {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or --rename to pick a new name",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Persisted settings could not be read or written.
    #[error("Settings file error: {}\n  Reason: {reason}", .path.display())]
    Settings {
        /// Path to the settings file.
        path: PathBuf,
        /// Details about the failure.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfMergeError {
    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::NotAPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an AlreadyPresent error.
    pub fn already_present(path: impl Into<PathBuf>) -> Self {
        Self::AlreadyPresent { path: path.into() }
    }

    /// Create an InputUnreadable error.
    pub fn input_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a WriteFailed error.
    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotAPdf { .. } => 3,
            Self::AlreadyPresent { .. } => 1,
            Self::InsufficientInputs { .. } => 1,
            Self::InputUnreadable { .. } => 3,
            Self::WriteFailed { .. } => 5,
            Self::OutputExists { .. } => 4,
            Self::InvalidConfig { .. } => 1,
            Self::Settings { .. } => 2,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
