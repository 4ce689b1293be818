use std::hash::{Hash, Hasher};

use log::{debug, trace};

use crate::config::{PieceOrder, SolverConfig};
use crate::cypher_word::{normalize, CypherWord, Pattern};
use crate::error::Error;
use crate::legend::Legend;
use crate::puzzle_piece::PuzzlePiece;

/// Counters from the most recent word block attack.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttackStats {
    /// Calls into the search, terminal ones included.
    pub nodes: u64,
    pub pruned_by_match: u64,
    pub pruned_by_incorporation: u64,
    pub pruned_by_lookahead: u64,
    /// Complete decodes reached, whether or not they were already known.
    pub solutions: u64,
    /// The node limit cut the search short.
    pub truncated: bool,
}

/// A whole cryptoquip: the phrase, the hint it was published with, one puzzle piece per
/// word and whatever solutions have turned up so far.
#[derive(Debug, Clone)]
pub struct Quip {
    cyphertext: String,
    starting_legend: Legend,
    pieces: Vec<PuzzlePiece>,
    solutions: Vec<String>,
    config: SolverConfig,
    stats: AttackStats,
}

impl Quip {
    /// Sets up a puzzle from its cyphertext, the `cypher = plain` hint and a word list.
    pub fn new<I>(
        cyphertext: impl Into<String>,
        cypher: char,
        plain: char,
        words: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let legend = Legend::with_hint(cypher, plain)?;
        let mut quip = Quip::from_legend(cyphertext, legend);
        quip.load_words(words);
        Ok(quip)
    }

    /// Sets up a puzzle with no candidates yet; see `load_words`.
    ///
    /// Words are split on anything that isn't a letter or an apostrophe, so "O--ncc" is two
    /// words and "don't" is one.
    pub fn from_legend(cyphertext: impl Into<String>, starting_legend: Legend) -> Self {
        let cyphertext = cyphertext.into();
        let pieces: Vec<_> = cyphertext
            .split(|c: char| !(c.is_ascii_alphabetic() || c == '\''))
            .map(CypherWord::new)
            .filter(|word| !word.is_empty())
            .map(PuzzlePiece::new)
            .collect();

        debug!("{} puzzle pieces in {:?}", pieces.len(), cyphertext);

        Quip {
            cyphertext,
            starting_legend,
            pieces,
            solutions: Vec::new(),
            config: SolverConfig::default(),
            stats: AttackStats::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Offers every word to every piece. Each word is normalized and patterned once, no matter
    /// how many pieces there are.
    pub fn load_words<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in words {
            let word = normalize(word);
            if word.is_empty() {
                continue;
            }

            let pattern = Pattern::of(&word);
            for piece in &mut self.pieces {
                piece.offer(&word, &pattern);
            }
        }

        for piece in &self.pieces {
            debug!(
                "{} ({}): {} candidates",
                piece.cypher_word(),
                piece.cypher_word().pattern(),
                piece.candidate_count()
            );
        }
    }

    pub fn cyphertext(&self) -> &str {
        &self.cyphertext
    }

    pub fn starting_legend(&self) -> &Legend {
        &self.starting_legend
    }

    pub fn pieces(&self) -> &[PuzzlePiece] {
        &self.pieces
    }

    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> &AttackStats {
        &self.stats
    }

    pub fn add_piece(&mut self, piece: PuzzlePiece) {
        self.pieces.push(piece);
    }

    /// Removes the first piece equal to `piece`.
    pub fn remove_piece(&mut self, piece: &PuzzlePiece) -> bool {
        match self.pieces.iter().position(|x| x == piece) {
            Some(idx) => {
                self.pieces.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear_pieces(&mut self) {
        self.pieces.clear();
    }

    /// Records a solution unless we already have it.
    pub fn add_solution(&mut self, plaintext: impl Into<String>) -> bool {
        record(&mut self.solutions, plaintext.into())
    }

    pub fn remove_solution(&mut self, plaintext: &str) -> bool {
        let before = self.solutions.len();
        self.solutions.retain(|x| x != plaintext);
        self.solutions.len() != before
    }

    pub fn clear_solutions(&mut self) {
        self.solutions.clear();
    }

    /// The word block attack: starting from the hint, try each candidate for one word at a
    /// time, carrying the legend it implies on to the next word, and keep every legend that
    /// decodes the whole phrase once all the words have been placed.
    ///
    /// Returns `true` if this attack reached at least one complete decode. Solutions pile up
    /// in `solutions()` across attacks without repeats.
    pub fn attempt_word_block_attack(&mut self) -> bool {
        let order = self.visit_order();
        let Quip {
            cyphertext,
            starting_legend,
            pieces,
            solutions,
            config,
            stats,
        } = self;

        let mut attack = Attack {
            cyphertext,
            pieces,
            order: &order,
            config: *config,
            solutions,
            stats: AttackStats::default(),
        };
        attack.attack(0, starting_legend);

        *stats = attack.stats;
        debug!("word block attack finished: {:?}", stats);
        stats.solutions > 0
    }

    /// Indices into `pieces` in the order the attack should visit them. Sorting is stable, so
    /// ties stay in phrase order.
    fn visit_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.pieces.len()).collect();
        let pieces = &self.pieces;

        match self.config.order {
            PieceOrder::Phrase => (),
            PieceOrder::FewestCandidates => {
                order.sort_by(|&a, &b| pieces[a].compare_candidate_count(&pieces[b]))
            }
            PieceOrder::LongestFirst => {
                order.sort_by(|&a, &b| pieces[b].compare_length(&pieces[a]))
            }
        }

        order
    }
}

/// Two quips are the same puzzle if they have the same cyphertext and the same cypher words,
/// whatever candidates or solutions they've collected.
impl PartialEq for Quip {
    fn eq(&self, other: &Self) -> bool {
        self.cyphertext == other.cyphertext
            && self
                .pieces
                .iter()
                .map(PuzzlePiece::cypher_word)
                .eq(other.pieces.iter().map(PuzzlePiece::cypher_word))
    }
}

impl Eq for Quip {}

impl Hash for Quip {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cyphertext.hash(state);
        for piece in &self.pieces {
            piece.cypher_word().hash(state);
        }
    }
}

fn record(solutions: &mut Vec<String>, plaintext: String) -> bool {
    if solutions.contains(&plaintext) {
        return false;
    }

    solutions.push(plaintext);
    true
}

/// State for one run of the search. Every branch gets its own copy of the legend, so sibling
/// branches never see each other's guesses and nothing needs undoing on the way back up.
struct Attack<'a> {
    cyphertext: &'a str,
    pieces: &'a [PuzzlePiece],
    order: &'a [usize],
    config: SolverConfig,
    solutions: &'a mut Vec<String>,
    stats: AttackStats,
}

impl<'a> Attack<'a> {
    /// Returns `false` once the node limit has been hit, which unwinds the whole search.
    fn attack(&mut self, depth: usize, legend: &Legend) -> bool {
        if let Some(limit) = self.config.node_limit {
            if self.stats.nodes >= limit {
                self.stats.truncated = true;
                return false;
            }
        }
        self.stats.nodes += 1;

        let (pieces, order) = (self.pieces, self.order);
        let piece = match order.get(depth) {
            Some(&idx) => &pieces[idx],
            None => {
                self.finish(legend);
                return true;
            }
        };
        let word = piece.cypher_word();

        for candidate in piece.candidates() {
            if !word.can_match(candidate, legend) {
                self.stats.pruned_by_match += 1;
                continue;
            }

            let mut extended = *legend;
            if !extended.incorporate(word, candidate) {
                trace!("{} -> {}: inconsistent with legend", word, candidate);
                self.stats.pruned_by_incorporation += 1;
                continue;
            }

            if self.config.forward_check && self.dead_end(depth + 1, &extended) {
                trace!("{} -> {}: leaves a later word without candidates", word, candidate);
                self.stats.pruned_by_lookahead += 1;
                continue;
            }

            trace!("{} -> {} at depth {}", word, candidate, depth);
            if !self.attack(depth + 1, &extended) {
                return false;
            }
        }

        true
    }

    /// Every piece has been placed. That doesn't have to mean every letter of the phrase is
    /// decoded, so only a complete decode counts.
    fn finish(&mut self, legend: &Legend) {
        match legend.try_decode(self.cyphertext) {
            Some(plaintext) => {
                self.stats.solutions += 1;
                debug!("solution: {}", plaintext);
                record(self.solutions, plaintext);
            }
            None => trace!(
                "all words placed but {:?} is incomplete",
                legend.decode(self.cyphertext)
            ),
        }
    }

    fn dead_end(&self, depth: usize, legend: &Legend) -> bool {
        self.order[depth..]
            .iter()
            .any(|&idx| self.pieces[idx].candidate_count_under_legend(legend) == 0)
    }
}
