//! Mapping from LeetCode language identifiers to file extensions.

use crate::error::{Result, SyncError};

const LANG_TO_EXTENSION: &[(&str, &str)] = &[
    ("bash", "sh"),
    ("c", "c"),
    ("cpp", "cpp"),
    ("csharp", "cs"),
    ("dart", "dart"),
    ("elixir", "ex"),
    ("erlang", "erl"),
    ("golang", "go"),
    ("java", "java"),
    ("javascript", "js"),
    ("kotlin", "kt"),
    ("mssql", "sql"),
    ("mysql", "sql"),
    ("oraclesql", "sql"),
    ("php", "php"),
    ("postgresql", "sql"),
    ("python", "py"),
    ("python3", "py"),
    ("pythondata", "py"),
    ("racket", "rkt"),
    ("ruby", "rb"),
    ("scala", "scala"),
    ("swift", "swift"),
    ("typescript", "ts"),
];

/// Resolve the file extension for a submission language.
pub fn extension_for(lang: &str) -> Result<&'static str> {
    LANG_TO_EXTENSION
        .iter()
        .find(|(name, _)| *name == lang)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| SyncError::UnsupportedLanguage {
            lang: lang.to_string(),
        })
}

/// All registered language identifiers.
pub fn registered_languages() -> impl Iterator<Item = &'static str> {
    LANG_TO_EXTENSION.iter().map(|(name, _)| *name)
}
