//! Localized user-facing strings.
//!
//! Messages are looked up by [`MessageKey`] for an explicit [`Locale`].
//! Templates use positional placeholders (`{0}`, `{1}`, ...) that are filled
//! by [`format`].
//!
//! # Examples
//!
//! ```
//! use pdfmerge::i18n::{self, Locale, MessageKey};
//!
//! let text = i18n::format(Locale::English, MessageKey::ReadyToMerge, &[&3]);
//! assert_eq!(text, "Ready to merge 3 files");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PdfMergeError;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// German.
    #[serde(rename = "de")]
    German,
}

impl Locale {
    /// All supported locales, in menu order.
    pub const ALL: [Locale; 2] = [Locale::English, Locale::German];

    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
        }
    }

    /// Name of the language, written in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::German => "Deutsch",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = PdfMergeError;

    /// Parse a language code. Region suffixes are ignored, so `de-AT` and
    /// `de_DE.UTF-8` both select German.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "en" => Ok(Self::English),
            "de" => Ok(Self::German),
            _ => Err(PdfMergeError::invalid_config(format!(
                "Unsupported language: {s}. Must be one of: en, de"
            ))),
        }
    }
}

/// Identifier of a localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Status with an empty list.
    AddToBegin,
    /// Status with exactly one file.
    AddMoreToEnable,
    /// Status with two or more files. `{0}` = file count.
    ReadyToMerge,
    /// `{0}` = number of files added.
    AddedFiles,
    /// `{0}` = number of skipped non-PDF files.
    SkippedInvalid,
    /// `{0}` = number of skipped files already in the list.
    SkippedDuplicates,
    /// `{0}` = number of added files sharing a name with an existing entry.
    DuplicateNamesNotice,
    /// Nothing added, `{0}` invalid files.
    NoValidFiles,
    /// Nothing added, `{0}` files were already listed.
    NothingNew,
    /// Nothing added and nothing rejected.
    NothingProvided,
    /// `{0}` = file name already in the list.
    FileWithSameNameExists,
    /// `{0}` = output file name.
    ReplaceQuestion,
    /// `{0}` = name of the file about to be removed.
    RemoveFileQuestion,
    /// Asked before emptying the list.
    ClearFilesQuestion,
    /// Merge in progress.
    MergingPdfs,
    /// `{0}` = output file name.
    MergeSuccess,
    /// `{0}` = error message.
    MergeFailed,
    /// A merge was requested with fewer than two files.
    NeedTwoFiles,
}

impl MessageKey {
    fn english(self) -> &'static str {
        match self {
            Self::AddToBegin => "Add PDF files to begin",
            Self::AddMoreToEnable => "Add more files to enable merging",
            Self::ReadyToMerge => "Ready to merge {0} files",
            Self::AddedFiles => "Added {0} PDF file(s)",
            Self::SkippedInvalid => "skipped {0} non-PDF file(s)",
            Self::SkippedDuplicates => "skipped {0} duplicate file(s)",
            Self::DuplicateNamesNotice => "Notice: {0} file(s) with duplicate names added",
            Self::NoValidFiles => "No valid PDF files found. Skipped {0} non-PDF file(s)",
            Self::NothingNew => "No new files added. All {0} file(s) were already in the list.",
            Self::NothingProvided => "No valid PDF files found",
            Self::FileWithSameNameExists => "A file named '{0}' is already in the list",
            Self::ReplaceQuestion => "'{0}' already exists. Replace it?",
            Self::RemoveFileQuestion => "Remove '{0}' from the list?",
            Self::ClearFilesQuestion => "Remove all files from the list?",
            Self::MergingPdfs => "Merging PDF files...",
            Self::MergeSuccess => "Merged PDF saved as '{0}'",
            Self::MergeFailed => "Merge failed: {0}",
            Self::NeedTwoFiles => "Add at least two PDF files to merge",
        }
    }

    fn german(self) -> &'static str {
        match self {
            Self::AddToBegin => "PDF-Dateien hinzufügen, um zu beginnen",
            Self::AddMoreToEnable => "Weitere Dateien hinzufügen, um das Zusammenführen zu aktivieren",
            Self::ReadyToMerge => "Bereit, {0} Dateien zusammenzuführen",
            Self::AddedFiles => "{0} PDF-Datei(en) hinzugefügt",
            Self::SkippedInvalid => "{0} Nicht-PDF-Datei(en) übersprungen",
            Self::SkippedDuplicates => "{0} doppelte Datei(en) übersprungen",
            Self::DuplicateNamesNotice => "Hinweis: {0} Datei(en) mit doppeltem Namen hinzugefügt",
            Self::NoValidFiles => {
                "Keine gültigen PDF-Dateien gefunden. {0} Nicht-PDF-Datei(en) übersprungen"
            }
            Self::NothingNew => {
                "Keine neuen Dateien hinzugefügt. Alle {0} Datei(en) sind bereits in der Liste."
            }
            Self::NothingProvided => "Keine gültigen PDF-Dateien gefunden",
            Self::FileWithSameNameExists => "Eine Datei namens '{0}' ist bereits in der Liste",
            Self::ReplaceQuestion => "'{0}' existiert bereits. Ersetzen?",
            Self::RemoveFileQuestion => "'{0}' aus der Liste entfernen?",
            Self::ClearFilesQuestion => "Alle Dateien aus der Liste entfernen?",
            Self::MergingPdfs => "PDF-Dateien werden zusammengeführt...",
            Self::MergeSuccess => "Zusammengeführte PDF gespeichert als '{0}'",
            Self::MergeFailed => "Zusammenführen fehlgeschlagen: {0}",
            Self::NeedTwoFiles => "Mindestens zwei PDF-Dateien zum Zusammenführen hinzufügen",
        }
    }
}

/// Look up the raw template for `key` in `locale`.
pub fn template(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::English => key.english(),
        Locale::German => key.german(),
    }
}

/// Look up `key` in `locale` and substitute positional arguments.
///
/// Placeholders without a matching argument are left untouched.
pub fn format(locale: Locale, key: MessageKey, args: &[&dyn fmt::Display]) -> String {
    let mut text = template(locale, key).to_string();
    for (idx, arg) in args.iter().enumerate() {
        text = text.replace(&format!("{{{idx}}}"), &arg.to_string());
    }
    text
}

/// Look up `key` in `locale` without arguments.
pub fn text(locale: Locale, key: MessageKey) -> String {
    format(locale, key, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Locale::English)]
    #[case("EN", Locale::English)]
    #[case("de", Locale::German)]
    #[case("de-AT", Locale::German)]
    #[case("de_DE.UTF-8", Locale::German)]
    fn test_locale_from_str(#[case] input: &str, #[case] expected: Locale) {
        assert_eq!(input.parse::<Locale>().unwrap(), expected);
    }

    #[test]
    fn test_locale_from_str_unsupported() {
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_format_substitutes_arguments() {
        assert_eq!(
            format(Locale::English, MessageKey::ReadyToMerge, &[&5]),
            "Ready to merge 5 files"
        );
        assert_eq!(
            format(Locale::German, MessageKey::ReadyToMerge, &[&5]),
            "Bereit, 5 Dateien zusammenzuführen"
        );
    }

    #[test]
    fn test_format_without_arguments_keeps_placeholder() {
        assert_eq!(
            text(Locale::English, MessageKey::MergeFailed),
            "Merge failed: {0}"
        );
    }

    #[test]
    fn test_locale_serde_uses_codes() {
        let json = serde_json::to_string(&Locale::German).unwrap();
        assert_eq!(json, "\"de\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::English);
    }

    #[test]
    fn test_every_locale_has_every_status() {
        for locale in Locale::ALL {
            for key in [
                MessageKey::AddToBegin,
                MessageKey::AddMoreToEnable,
                MessageKey::ReadyToMerge,
            ] {
                assert!(!template(locale, key).is_empty());
            }
        }
    }
}
