//! Line-oriented editing of the file list.
//!
//! Positions typed by the user are 1-based, as printed by `list`.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::error::{PdfMergeError, Result};
use pdfmerge::files::{DocumentId, DocumentRef, FileList};
use pdfmerge::i18n::MessageKey;
use pdfmerge::merge::destination;
use pdfmerge::output::{OutputFormatter, display_batch_summary};
use pdfmerge::picker::{FilePicker, PatternPicker};

use crate::actions;

const HELP: &str = "\
Commands:
  list             show the files in merge order
  add <PATTERN>    add files matching a path or glob pattern
  rm <N>           remove the file at position N
  up <N>           move the file at position N one place up
  down <N>         move the file at position N one place down
  top <N>          move the file at position N to the top
  bottom <N>       move the file at position N to the bottom
  clear            remove all files
  merge [FILE]     merge the list, optionally into FILE
  help             show this help
  quit             leave without merging";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(String),
    Remove(usize),
    Up(usize),
    Down(usize),
    Top(usize),
    Bottom(usize),
    Clear,
    Merge(Option<PathBuf>),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = PdfMergeError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "add" if !rest.is_empty() => Self::Add(rest.to_string()),
            "add" => return Err(PdfMergeError::invalid_config("Usage: add <PATTERN>")),
            "rm" | "remove" => Self::Remove(position(rest)?),
            "up" => Self::Up(position(rest)?),
            "down" => Self::Down(position(rest)?),
            "top" => Self::Top(position(rest)?),
            "bottom" => Self::Bottom(position(rest)?),
            "clear" => Self::Clear,
            "merge" => Self::Merge((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => {
                return Err(PdfMergeError::invalid_config(format!(
                    "Unknown command: {word}. Type 'help' for a list of commands"
                )));
            }
        };

        Ok(command)
    }
}

fn position(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PdfMergeError::invalid_config(format!(
            "Expected a position (1, 2, ...), got '{arg}'"
        ))),
    }
}

/// Interactive session over a [`FileList`].
pub struct Session<'a, R> {
    files: FileList,
    formatter: &'a OutputFormatter,
    overwrite_mode: OverwriteMode,
    dry_run: bool,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    input: R,
}

impl<'a, R: BufRead> Session<'a, R> {
    pub fn new(files: FileList, formatter: &'a OutputFormatter, input: R) -> Self {
        Self {
            files,
            formatter,
            overwrite_mode: OverwriteMode::default(),
            dry_run: false,
            output: None,
            output_dir: None,
            input,
        }
    }

    pub fn overwrite_mode(mut self, mode: OverwriteMode) -> Self {
        self.overwrite_mode = mode;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Output for `merge` without a file name.
    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Folder for merges without an explicit file name.
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// Command errors are reported and the session continues; only a failure
    /// to read input ends it with an error.
    pub async fn run(&mut self) -> Result<()> {
        self.show_list();

        loop {
            if self.formatter.should_print() {
                print!("> ");
                std::io::stdout().flush().ok();
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => self.formatter.warning(&e.to_string()),
            }
        }

        Ok(())
    }

    /// Apply a single command.
    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::List => self.show_list(),
            Command::Add(pattern) => self.add(pattern),
            Command::Remove(n) => self.remove(n),
            Command::Up(n) => self.with_entry(n, |files, id| files.move_up(id)),
            Command::Down(n) => self.with_entry(n, |files, id| files.move_down(id)),
            Command::Top(n) => self.with_entry(n, |files, id| files.move_to_top(id)),
            Command::Bottom(n) => self.with_entry(n, |files, id| files.move_to_bottom(id)),
            Command::Clear => self.clear(),
            Command::Merge(output) => self.merge(output).await,
            Command::Help => self.formatter.info(HELP),
            Command::Quit => {}
        }
    }

    fn show_list(&self) {
        self.formatter
            .file_list(&self.files, &self.files.derived_state());
    }

    fn add(&mut self, pattern: String) {
        let picked = PatternPicker::new([pattern]).pick_files();
        match picked {
            Ok(paths) => {
                let summary = self.files.add_all(paths);
                display_batch_summary(self.formatter, &summary);
                self.show_list();
            }
            Err(e) => self.formatter.warning(&e.to_string()),
        }
    }

    fn entry_at(&self, position: usize) -> Option<DocumentId> {
        let id = position.checked_sub(1).and_then(|i| self.files.id_at(i));
        if id.is_none() {
            self.formatter
                .warning(&format!("No file at position {position}"));
        }
        id
    }

    fn with_entry<F>(&mut self, position: usize, action: F)
    where
        F: FnOnce(&mut FileList, DocumentId) -> bool,
    {
        let Some(id) = self.entry_at(position) else {
            return;
        };

        if action(&mut self.files, id) {
            self.show_list();
        }
    }

    fn remove(&mut self, position: usize) {
        let Some(name) = self
            .entry_at(position)
            .and_then(|id| self.files.get(id))
            .map(DocumentRef::display_name)
        else {
            return;
        };

        let question = self.formatter.format(MessageKey::RemoveFileQuestion, &[&name]);
        if actions::confirm(&question, &mut self.input) {
            self.with_entry(position, |files, id| files.remove(id));
        }
    }

    fn clear(&mut self) {
        if !self.files.is_empty() {
            let question = self.formatter.text(MessageKey::ClearFilesQuestion);
            if !actions::confirm(&question, &mut self.input) {
                return;
            }
            self.files.clear();
        }
        self.show_list();
    }

    async fn merge(&mut self, output: Option<PathBuf>) {
        if !self.files.derived_state().can_merge {
            self.formatter
                .warning(&self.formatter.text(MessageKey::NeedTwoFiles));
            return;
        }

        let inputs = self.files.paths();
        let output = match output.or_else(|| self.output.clone()) {
            Some(path) => destination::ensure_pdf_extension(path),
            None => {
                let first = &inputs[0];
                let dir = self
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| destination::default_directory(Some(first.as_path())));
                dir.join(destination::default_file_name(first))
            }
        };

        let config = Config {
            inputs,
            output,
            dry_run: self.dry_run,
            verbose: self.formatter.is_verbose(),
            quiet: self.formatter.is_quiet(),
            overwrite_mode: self.overwrite_mode,
            locale: self.formatter.locale(),
        };

        let result = match config.validate() {
            Ok(()) => actions::run_merge(&config, self.formatter, &mut self.input).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            self.formatter
                .error(&self.formatter.format(MessageKey::MergeFailed, &[&e]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, dictionary};
    use rstest::rstest;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    /// Write a one-page PDF to `dir/name`.
    fn write_pdf(dir: &Path, name: &str) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1_i64,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let path = dir.join(name);
        doc.save(&path).unwrap();
        path
    }

    fn two_files(dir: &Path) -> FileList {
        let mut files = FileList::new();
        files.add(write_pdf(dir, "a.pdf")).unwrap();
        files.add(write_pdf(dir, "b.pdf")).unwrap();
        files
    }

    #[rstest]
    #[case("list", Command::List)]
    #[case("  LS  ", Command::List)]
    #[case("add docs/*.pdf", Command::Add("docs/*.pdf".into()))]
    #[case("add My Scans/a.pdf", Command::Add("My Scans/a.pdf".into()))]
    #[case("rm 2", Command::Remove(2))]
    #[case("up 1", Command::Up(1))]
    #[case("down 3", Command::Down(3))]
    #[case("top 4", Command::Top(4))]
    #[case("bottom 1", Command::Bottom(1))]
    #[case("clear", Command::Clear)]
    #[case("merge", Command::Merge(None))]
    #[case("merge out/book.pdf", Command::Merge(Some(PathBuf::from("out/book.pdf"))))]
    #[case("?", Command::Help)]
    #[case("exit", Command::Quit)]
    fn test_parse_command(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(line.parse::<Command>().unwrap(), expected);
    }

    #[rstest]
    #[case("rm")]
    #[case("rm 0")]
    #[case("up x")]
    #[case("add")]
    #[case("frobnicate")]
    fn test_parse_invalid_command(#[case] line: &str) {
        assert!(line.parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let formatter = OutputFormatter::quiet();
        let input = Cursor::new("help\nbogus\n\nquit\nclear\n");

        let mut session = Session::new(FileList::new(), &formatter, input);
        session.run().await.unwrap();

        assert!(session.files().is_empty());
    }

    #[tokio::test]
    async fn test_merge_needs_two_files() {
        let formatter = OutputFormatter::quiet();
        let mut session = Session::new(FileList::new(), &formatter, Cursor::new(""));

        session.execute(Command::Merge(None)).await;
        assert!(session.files().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_position_is_ignored() {
        let formatter = OutputFormatter::quiet();
        let mut session = Session::new(FileList::new(), &formatter, Cursor::new(""));

        session.execute(Command::Remove(3)).await;
        session.execute(Command::Top(1)).await;
        assert!(session.files().is_empty());
    }

    #[tokio::test]
    async fn test_remove_asks_first() {
        let temp_dir = TempDir::new().unwrap();
        let formatter = OutputFormatter::quiet();
        let input = Cursor::new("n\ny\n");
        let mut session = Session::new(two_files(temp_dir.path()), &formatter, input);

        session.execute(Command::Remove(1)).await;
        assert_eq!(session.files().len(), 2);

        session.execute(Command::Remove(1)).await;
        let names: Vec<String> = session.files().iter().map(DocumentRef::display_name).collect();
        assert_eq!(names, ["b.pdf"]);
    }

    #[tokio::test]
    async fn test_clear_asks_first() {
        let temp_dir = TempDir::new().unwrap();
        let formatter = OutputFormatter::quiet();
        let input = Cursor::new("\nja\n");
        let mut session = Session::new(two_files(temp_dir.path()), &formatter, input);

        session.execute(Command::Clear).await;
        assert_eq!(session.files().len(), 2);

        session.execute(Command::Clear).await;
        assert!(session.files().is_empty());
    }
}
