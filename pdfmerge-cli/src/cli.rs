//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.
//!
//! # Examples
//!
//! ```ignore
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("Adding {} pattern(s)", cli.inputs.len());
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};

use pdfmerge::config::{Config, OverwriteMode, Settings};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::i18n::Locale;
use pdfmerge::merge::destination::{default_directory, default_file_name, ensure_pdf_extension};
use pdfmerge::picker::PatternPicker;

/// Merge PDF files into a single document.
///
/// pdfmerge collects PDF files into an ordered list and concatenates every
/// page of every file, in list order, into one new PDF. Files that are not
/// PDFs or are already listed are skipped with a summary.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge PDF files into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files or glob patterns (in order)
    ///
    /// Files are merged in the order provided. A pattern expands to its
    /// matches in sorted order.
    ///
    /// Examples:
    ///   pdfmerge cover.pdf report.pdf
    ///   pdfmerge 'chapter*.pdf' -o book.pdf
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Also add every PDF in this folder (sorted by path)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Scan --dir recursively
    #[arg(short, long, requires = "dir")]
    pub recursive: bool,

    /// Output PDF file path
    ///
    /// `.pdf` is appended when missing. Defaults to `<first>_merged.pdf`
    /// next to the first input.
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Folder for the default output name
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    ///
    /// Exit with an error instead of prompting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Keep an existing output file and save under a timestamped name
    #[arg(long, conflicts_with_all = ["force", "no_clobber"])]
    pub rename: bool,

    /// Dry run - list the files and the output path without merging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show page counts, sizes and timings
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// An existing output file is never replaced in quiet mode unless
    /// --force or --rename is given.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Message language (en, de)
    ///
    /// Defaults to the remembered language, or English.
    #[arg(long, value_name = "LANG", env = "PDFMERGE_LANG")]
    pub lang: Option<String>,

    /// Remember --lang for later runs
    #[arg(long, requires = "lang")]
    pub remember_lang: bool,

    /// Edit the file list interactively before merging
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if no input source is given outside interactive mode,
    /// or if the language code is unknown.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.dir.is_none() && !self.interactive {
            return Err(PdfMergeError::invalid_config("No input files specified"));
        }

        if let Some(ref lang) = self.lang {
            lang.parse::<Locale>()?;
        }

        Ok(())
    }

    /// Resolve overwrite flags into a mode.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else if self.rename {
            OverwriteMode::Rename
        } else {
            OverwriteMode::Prompt
        }
    }

    /// Language for this run: `--lang`, else the remembered one.
    pub fn locale(&self, settings: &Settings) -> Result<Locale> {
        match self.lang {
            Some(ref lang) => lang.parse(),
            None => Ok(settings.language),
        }
    }

    /// File picker over the positional patterns and `--dir`.
    pub fn picker(&self) -> PatternPicker {
        let mut picker = PatternPicker::new(self.inputs.iter().cloned());

        if let Some(ref dir) = self.dir {
            picker = picker.scan_dir(dir, self.recursive);
        }
        if let Some(ref dir) = self.output_dir {
            picker = picker.output_dir(dir);
        }

        picker
    }

    /// Output path before collision handling.
    ///
    /// `-o` wins. Otherwise the default name for `first_input` is placed in
    /// `folder`, or next to `first_input`.
    pub fn output_path(&self, first_input: Option<&Path>, folder: Option<PathBuf>) -> PathBuf {
        if let Some(ref output) = self.output {
            return ensure_pdf_extension(output);
        }

        let dir = folder.unwrap_or_else(|| default_directory(first_input));
        let name = first_input.map_or_else(|| "merged.pdf".to_string(), default_file_name);
        dir.join(name)
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn to_config(
        &self,
        inputs: Vec<PathBuf>,
        output: PathBuf,
        locale: Locale,
    ) -> Result<Config> {
        let config = Config {
            inputs,
            output,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode: self.overwrite_mode(),
            locale,
        };

        config.validate()?;

        Ok(config)
    }
}
