use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the letter hints a puzzle starts from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LegendError {
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("cypher '{cypher}' is already mapped to '{existing}', cannot map it to '{plain}'")]
    ConflictingHint {
        cypher: char,
        plain: char,
        existing: char,
    },
    #[error("plain '{plain}' is already the target of cypher '{other}', cannot map '{cypher}' to it")]
    DuplicateTarget {
        cypher: char,
        plain: char,
        other: char,
    },
    #[error("malformed hint {0:?}, expected something like \"b=t\"")]
    MalformedHint(String),
}

/// Errors returned while setting up a puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid starting legend: {0}")]
    InvalidStartingLegend(#[from] LegendError),
}

/// Errors returned while loading a word list.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("unable to read word list {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
