//! Steps shared by the one-shot run and the interactive session.

use std::io::{BufRead, Write};
use std::path::Path;

use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::error::Result;
use pdfmerge::i18n::MessageKey;
use pdfmerge::merge::{MergeStatistics, Merger, destination};
use pdfmerge::output::{MergeProgress, OutputFormatter, display_merge_statistics};

/// Quiet runs never block on a prompt, so `Prompt` acts as `NoClobber`.
pub fn effective_mode(mode: OverwriteMode, quiet: bool) -> OverwriteMode {
    match mode {
        OverwriteMode::Prompt if quiet => OverwriteMode::NoClobber,
        mode => mode,
    }
}

/// Ask whether `path` may be replaced. Anything but yes means no.
pub fn confirm_replace<R: BufRead>(
    formatter: &OutputFormatter,
    path: &Path,
    input: &mut R,
) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    confirm(&formatter.format(MessageKey::ReplaceQuestion, &[&name]), input)
}

/// Print `question` with a `[y/N]` suffix and read the answer from `input`.
/// Anything but yes means no.
pub fn confirm<R: BufRead>(question: &str, input: &mut R) -> bool {
    print!("{question} [y/N]: ");
    std::io::stdout().flush().ok();

    let mut response = String::new();
    match input.read_line(&mut response) {
        Ok(_) => is_yes(&response),
        Err(err) => {
            log::warn!("failed to read answer: {err}");
            false
        }
    }
}

fn is_yes(response: &str) -> bool {
    matches!(
        response.trim().to_lowercase().as_str(),
        "y" | "yes" | "j" | "ja"
    )
}

/// Resolve the destination of `config` and merge its inputs into it.
///
/// Returns `None` for a dry run.
pub async fn run_merge<R: BufRead>(
    config: &Config,
    formatter: &OutputFormatter,
    input: &mut R,
) -> Result<Option<MergeStatistics>> {
    let mode = effective_mode(config.overwrite_mode, config.quiet);

    if config.dry_run {
        let output = destination::resolve(&config.output, mode, |_| true)?;
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(None);
    }

    let output = destination::resolve(&config.output, mode, |path| {
        confirm_replace(formatter, path, input)
    })?;
    if output != config.output {
        formatter.debug(&format!("Saving as {}", output.display()));
    }

    formatter.info(&formatter.text(MessageKey::MergingPdfs));

    let mut progress = MergeProgress::new(config.inputs(), formatter.should_print());
    let stats = Merger::new()
        .merge_with_progress(config.inputs(), &output, |stage| progress.on_stage(stage))
        .await?;

    display_merge_statistics(formatter, &stats);
    Ok(Some(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfmerge::error::PdfMergeError;
    use rstest::rstest;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[rstest]
    #[case(OverwriteMode::Prompt, true, OverwriteMode::NoClobber)]
    #[case(OverwriteMode::Prompt, false, OverwriteMode::Prompt)]
    #[case(OverwriteMode::Force, true, OverwriteMode::Force)]
    #[case(OverwriteMode::Rename, true, OverwriteMode::Rename)]
    fn test_effective_mode(
        #[case] mode: OverwriteMode,
        #[case] quiet: bool,
        #[case] expected: OverwriteMode,
    ) {
        assert_eq!(effective_mode(mode, quiet), expected);
    }

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case("ja\n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    fn test_confirm_replace(#[case] answer: &str, #[case] expected: bool) {
        let formatter = OutputFormatter::quiet();
        let mut input = Cursor::new(answer.as_bytes());
        assert_eq!(
            confirm_replace(&formatter, Path::new("out.pdf"), &mut input),
            expected
        );
    }

    #[rstest]
    #[case("j\n", true)]
    #[case("  Yes  \n", true)]
    #[case("nein\n", false)]
    #[case("yess\n", false)]
    fn test_confirm(#[case] answer: &str, #[case] expected: bool) {
        let mut input = Cursor::new(answer.as_bytes());
        assert_eq!(confirm("Remove all files from the list?", &mut input), expected);
    }

    fn config_for(output: PathBuf) -> Config {
        Config {
            inputs: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
            output,
            dry_run: true,
            verbose: false,
            quiet: true,
            overwrite_mode: OverwriteMode::Prompt,
            locale: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.pdf");
        let formatter = OutputFormatter::quiet();

        let result = run_merge(&config_for(output.clone()), &formatter, &mut Cursor::new(""))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_quiet_prompt_refuses_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.pdf");
        std::fs::write(&output, b"keep").unwrap();
        let formatter = OutputFormatter::quiet();

        let mut config = config_for(output.clone());
        config.dry_run = false;

        let result = run_merge(&config, &formatter, &mut Cursor::new("y\n")).await;
        assert!(matches!(result, Err(PdfMergeError::OutputExists { .. })));
        assert_eq!(std::fs::read(&output).unwrap(), b"keep");
    }
}
