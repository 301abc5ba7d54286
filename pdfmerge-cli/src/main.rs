//! pdfmerge - Merge PDF files into a single document.
//!
//! Collects PDFs from paths, glob patterns and folders into an ordered list,
//! optionally lets the user edit it, and concatenates it into one file.

mod actions;
mod cli;
mod logger;
mod session;

use clap::Parser;
use std::path::PathBuf;
use std::process;

use crate::cli::Cli;
use crate::logger::StderrLogger;
use crate::session::Session;
use pdfmerge::config::Settings;
use pdfmerge::error::PdfMergeError;
use pdfmerge::files::FileList;
use pdfmerge::i18n::Locale;
use pdfmerge::output::{OutputFormatter, display_batch_summary};
use pdfmerge::picker::FilePicker;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Err(err) = StderrLogger::for_flags(cli.verbose, cli.quiet).init() {
        eprintln!("Warning: {err}");
    }

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMergeError> {
    // Validate CLI arguments
    cli.validate()?;

    let locale = resolve_locale(&cli)?;
    let formatter = OutputFormatter::new(cli.quiet, cli.verbose).with_locale(locale);

    // Print header
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
        formatter.blank_line();
    }

    // Collect the initial list
    let mut picker = cli.picker();
    let picked = picker.pick_files()?;
    let mut files = FileList::new();

    if !picked.is_empty() {
        let summary = files.add_all(&picked);
        if summary.missing > 0 {
            formatter.warning(&format!("Skipped {} missing file(s)", summary.missing));
        }
        display_batch_summary(&formatter, &summary);
    }

    let output_dir = picker.pick_folder();
    let stdin = std::io::stdin();

    if cli.interactive {
        let mut session = Session::new(files, &formatter, stdin.lock())
            .overwrite_mode(cli.overwrite_mode())
            .dry_run(cli.dry_run)
            .output(cli.output.clone())
            .output_dir(output_dir);
        return session.run().await;
    }

    if formatter.is_verbose() {
        formatter.blank_line();
        formatter.file_list(&files, &files.derived_state());
    }

    let inputs = files.paths();
    let output = cli.output_path(inputs.first().map(PathBuf::as_path), output_dir);
    let config = cli.to_config(inputs, output, locale)?;

    actions::run_merge(&config, &formatter, &mut stdin.lock()).await?;

    Ok(())
}

/// Pick the message language and persist it when asked to.
fn resolve_locale(cli: &Cli) -> Result<Locale, PdfMergeError> {
    let settings = Settings::load_or_default();
    let locale = cli.locale(&settings)?;

    if cli.remember_lang && locale != settings.language {
        match Settings::default_path() {
            Some(path) => Settings { language: locale }.save(&path)?,
            None => log::warn!("no configuration directory, language not saved"),
        }
    }

    Ok(locale)
}
