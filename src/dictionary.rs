use std::fs;
use std::path::Path;

use fxhash::FxHashSet;
use log::debug;

use crate::error::DictionaryError;

/// A short list of common words, enough for the self test and for small puzzles. Real use
/// wants something like enable1.txt or /usr/share/dict/words; note that enable1 has no "a"
/// or "i", which matters for quips.
const BUNDLED: &str = include_str!("../resources/words.txt");

/// An ordered word list with no repeats. Order matters: it's the order candidates are tried in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Lowercases everything and drops blanks, repeats and anything that isn't a word once
    /// apostrophes are taken out.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let words = words
            .into_iter()
            .filter_map(|word| {
                let word: String = word
                    .as_ref()
                    .trim()
                    .chars()
                    .filter(|&c| c != '\'')
                    .map(|c| c.to_ascii_lowercase())
                    .collect();

                if !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()) {
                    Some(word)
                } else {
                    None
                }
            })
            .filter(|word| seen.insert(word.clone()))
            .collect();

        Dictionary { words }
    }

    /// Reads a whitespace separated word list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Dictionary::from_words(text.split_whitespace());
        debug!("{} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// The word list compiled into the crate.
    pub fn bundled() -> Self {
        Dictionary::from_words(BUNDLED.split_whitespace())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
