use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use fxhash::FxHashSet;

use crate::cypher_word::{normalize, CypherWord, Pattern};
use crate::legend::Legend;

/// One word of the puzzle along with every dictionary word that has the same shape.
///
/// Candidates keep the order they were offered in, which is what makes the attack
/// reproducible for a given dictionary.
#[derive(Debug, Clone)]
pub struct PuzzlePiece {
    word: CypherWord,
    candidates: Vec<String>,
    seen: FxHashSet<String>,
}

impl PuzzlePiece {
    pub fn new(word: CypherWord) -> Self {
        PuzzlePiece {
            word,
            candidates: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    pub fn cypher_word(&self) -> &CypherWord {
        &self.word
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// How many candidates are still possible under `legend`. Zero means whatever branch
    /// produced `legend` is a dead end.
    pub fn candidate_count_under_legend(&self, legend: &Legend) -> usize {
        self.candidates
            .iter()
            .filter(|candidate| self.word.can_match(candidate, legend))
            .count()
    }

    /// Adds `word` as a candidate if it has the right shape. Offering the same word twice is
    /// harmless.
    pub fn check_and_maybe_add(&mut self, word: &str) -> bool {
        let word = normalize(word);
        let pattern = Pattern::of(&word);
        self.offer(&word, &pattern)
    }

    /// Same as `check_and_maybe_add` for a word that's already normalized and whose pattern
    /// has been worked out, so a dictionary word only pays for that once across all pieces.
    pub(crate) fn offer(&mut self, word: &str, pattern: &Pattern) -> bool {
        if self.word.pattern() != pattern {
            return false;
        }

        self.add_candidate(word);
        true
    }

    /// Adds a candidate without looking at its pattern. Returns `false` for a duplicate.
    pub fn add_candidate(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.seen.contains(&word) {
            return false;
        }

        self.seen.insert(word.clone());
        self.candidates.push(word);
        true
    }

    pub fn remove_candidate(&mut self, word: &str) -> bool {
        if !self.seen.remove(word) {
            return false;
        }

        self.candidates.retain(|x| x != word);
        true
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.seen.clear();
    }

    /// Shorter cypher words first.
    pub fn compare_length(&self, other: &PuzzlePiece) -> Ordering {
        self.word.len().cmp(&other.word.len())
    }

    /// Fewer candidates first.
    pub fn compare_candidate_count(&self, other: &PuzzlePiece) -> Ordering {
        self.candidate_count().cmp(&other.candidate_count())
    }
}

/// Two pieces are the same if they hold the same word and the same candidates, in order.
impl PartialEq for PuzzlePiece {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.candidates == other.candidates
    }
}

impl Eq for PuzzlePiece {}

impl Hash for PuzzlePiece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
        self.candidates.hash(state);
    }
}
