use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::cypher_word::CypherWord;
use crate::error::LegendError;

/// Stands in for a cypher letter the legend has no plaintext for.
pub const UNMAPPED: char = '.';

/// Maps an ascii letter of either case onto `0..26`.
fn slot(c: char) -> Option<usize> {
    if c.is_ascii_alphabetic() {
        Some((c.to_ascii_lowercase() as u8 - b'a') as usize)
    } else {
        None
    }
}

fn letter(idx: usize) -> char {
    (b'a' + idx as u8) as char
}

/// The key to a puzzle: a partial, one-to-one mapping of cypher letters to plain letters.
///
/// The inverse mapping is kept alongside the forward one so that both directions are
/// constant-time lookups. Equality and hashing only look at the forward mapping.
#[derive(Clone, Copy, Default)]
pub struct Legend {
    map: [Option<u8>; 26],
    inverse: [Option<u8>; 26],
}

impl Legend {
    /// An empty legend. Nothing decodes.
    pub fn new() -> Self {
        Legend::default()
    }

    /// A legend holding the single `cypher -> plain` hint a quip is published with.
    pub fn with_hint(cypher: char, plain: char) -> Result<Self, LegendError> {
        Legend::from_hints(&[(cypher, plain)])
    }

    /// Builds a legend from any number of hints, rejecting hints that contradict each other.
    pub fn from_hints(hints: &[(char, char)]) -> Result<Self, LegendError> {
        let mut legend = Legend::new();

        for &(cypher, plain) in hints {
            let c = slot(cypher).ok_or(LegendError::NotALetter(cypher))?;
            let p = slot(plain).ok_or(LegendError::NotALetter(plain))?;
            let (cypher, plain) = (letter(c), letter(p));

            if let Some(existing) = legend.map_cypher_char(cypher) {
                if existing != plain {
                    return Err(LegendError::ConflictingHint {
                        cypher,
                        plain,
                        existing,
                    });
                }
            }

            if let Some(other) = legend.map_plain_char(plain) {
                if other != cypher {
                    return Err(LegendError::DuplicateTarget {
                        cypher,
                        plain,
                        other,
                    });
                }
            }

            legend.set_mapping(cypher, plain);
        }

        Ok(legend)
    }

    /// The plaintext letter for a cypher letter, if there is one.
    pub fn map_cypher_char(&self, c: char) -> Option<char> {
        slot(c).and_then(|idx| self.map[idx]).map(char::from)
    }

    /// The cypher letter that decodes to a plaintext letter, if there is one.
    pub fn map_plain_char(&self, p: char) -> Option<char> {
        slot(p).and_then(|idx| self.inverse[idx]).map(char::from)
    }

    /// Records `c -> p` without checking that the legend stays one-to-one; that's the job of
    /// `can_incorporate`. Non-letters are ignored.
    pub fn set_mapping(&mut self, c: char, p: char) {
        let (c, p) = match (slot(c), slot(p)) {
            (Some(c), Some(p)) => (c, p),
            _ => return,
        };

        if let Some(old) = self.map[c].take() {
            self.inverse[(old - b'a') as usize] = None;
        }

        self.map[c] = Some(b'a' + p as u8);
        self.inverse[p] = Some(b'a' + c as u8);
    }

    /// Forgets whatever `c` was mapped to. Undoes exactly one `set_mapping`.
    pub fn clear_mapping(&mut self, c: char) {
        if let Some(c) = slot(c) {
            if let Some(p) = self.map[c].take() {
                self.inverse[(p - b'a') as usize] = None;
            }
        }
    }

    /// Number of cypher letters with a plaintext letter.
    pub fn mapped_count(&self) -> usize {
        self.map.iter().filter(|x| x.is_some()).count()
    }

    /// Decodes arbitrary text. Case survives, non-letters pass straight through and letters we
    /// can't decode come out as `UNMAPPED`.
    pub fn decode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match self.map_cypher_char(c) {
                Some(p) if c.is_ascii_uppercase() => p.to_ascii_uppercase(),
                Some(p) => p,
                None if c.is_ascii_alphabetic() => UNMAPPED,
                None => c,
            })
            .collect()
    }

    /// Like `decode`, but only answers when every letter in `text` has a mapping.
    ///
    /// Completeness is judged by the legend rather than by looking for `UNMAPPED` in the
    /// output, since the text is free to contain that character as punctuation.
    pub fn try_decode(&self, text: &str) -> Option<String> {
        let mut decoded = String::with_capacity(text.len());

        for c in text.chars() {
            if c.is_ascii_alphabetic() {
                let p = self.map_cypher_char(c)?;
                decoded.push(if c.is_ascii_uppercase() {
                    p.to_ascii_uppercase()
                } else {
                    p
                });
            } else {
                decoded.push(c);
            }
        }

        Some(decoded)
    }

    /// Whether aligning `word` against `plain` can extend this legend without contradicting it.
    pub fn can_incorporate(&self, word: &CypherWord, plain: &str) -> bool {
        self.try_extend(word, plain).is_some()
    }

    /// Adds every mapping implied by aligning `word` against `plain`. Either all of them go in
    /// and we get `true`, or nothing changes and we get `false`.
    pub fn incorporate(&mut self, word: &CypherWord, plain: &str) -> bool {
        match self.try_extend(word, plain) {
            Some(extended) => {
                *self = extended;
                true
            }
            None => false,
        }
    }

    /// Works on a copy so that a failure halfway through leaves nothing behind. Checking against
    /// the copy (rather than `self`) also catches a word that would map two of its own cypher
    /// letters onto one plain letter.
    fn try_extend(&self, word: &CypherWord, plain: &str) -> Option<Legend> {
        let plain = plain.as_bytes();
        if plain.len() != word.len() {
            return None;
        }

        let mut extended = *self;

        for (&u_encoded, &u_decoded) in word.as_bytes().iter().zip(plain) {
            if !u_decoded.is_ascii_alphabetic() {
                return None;
            }
            let (c, p) = (u_encoded as char, u_decoded.to_ascii_lowercase() as char);

            match extended.map_cypher_char(c) {
                Some(mapped) if mapped != p => return None,
                Some(_) => continue,
                None => (),
            }

            match extended.map_plain_char(p) {
                Some(other) if other != c => return None,
                _ => extended.set_mapping(c, p),
            }
        }

        Some(extended)
    }
}

impl PartialEq for Legend {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for Legend {}

impl Hash for Legend {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl fmt::Debug for Legend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Legend({})", self.decode("abcdefghijklmnopqrstuvwxyz"))
    }
}

impl Display for Legend {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "abcdefghijklmnopqrstuvwxyz")?;
        write!(f, "{}", self.decode("abcdefghijklmnopqrstuvwxyz"))
    }
}

/// A `cypher=plain` letter pair as a puzzle is usually published, e.g. `b=t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub cypher: char,
    pub plain: char,
}

impl FromStr for Hint {
    type Err = LegendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, |c: char| c == '=' || c == ':');
        let (cypher, plain) = match (parts.next(), parts.next()) {
            (Some(cypher), Some(plain)) => (cypher.trim(), plain.trim()),
            _ => return Err(LegendError::MalformedHint(s.to_string())),
        };

        let single = |part: &str| {
            let mut chars = part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
                (Some(c), None) => Err(LegendError::NotALetter(c)),
                _ => Err(LegendError::MalformedHint(s.to_string())),
            }
        };

        Ok(Hint {
            cypher: single(cypher)?,
            plain: single(plain)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> CypherWord {
        CypherWord::new(s)
    }

    #[test]
    fn lookups_work_in_both_directions() {
        let legend = Legend::with_hint('b', 't').unwrap();
        assert_eq!(legend.map_cypher_char('b'), Some('t'));
        assert_eq!(legend.map_cypher_char('B'), Some('t'));
        assert_eq!(legend.map_plain_char('t'), Some('b'));
        assert_eq!(legend.map_cypher_char('t'), None);
        assert_eq!(legend.map_plain_char('b'), None);
        assert_eq!(legend.map_cypher_char('!'), None);
    }

    #[test]
    fn hints_must_be_letters() {
        assert_eq!(Legend::with_hint('1', 't'), Err(LegendError::NotALetter('1')));
        assert_eq!(Legend::with_hint('b', ' '), Err(LegendError::NotALetter(' ')));
    }

    #[test]
    fn contradictory_hints_are_rejected() {
        assert_eq!(
            Legend::from_hints(&[('b', 't'), ('b', 'e')]),
            Err(LegendError::ConflictingHint {
                cypher: 'b',
                plain: 'e',
                existing: 't',
            })
        );
        assert_eq!(
            Legend::from_hints(&[('b', 't'), ('q', 't')]),
            Err(LegendError::DuplicateTarget {
                cypher: 'q',
                plain: 't',
                other: 'b',
            })
        );
        assert!(Legend::from_hints(&[('b', 't'), ('B', 'T')]).is_ok());
    }

    #[test]
    fn clear_mapping_undoes_set_mapping() {
        let original = Legend::with_hint('b', 't').unwrap();
        let mut legend = original;

        legend.set_mapping('x', 'q');
        assert_eq!(legend.map_plain_char('q'), Some('x'));
        assert_ne!(legend, original);

        legend.clear_mapping('x');
        assert_eq!(legend, original);
        assert_eq!(legend.map_plain_char('q'), None);
    }

    #[test]
    fn remapping_a_letter_releases_its_old_target() {
        let mut legend = Legend::new();
        legend.set_mapping('a', 'x');
        legend.set_mapping('a', 'y');
        assert_eq!(legend.map_plain_char('x'), None);
        assert_eq!(legend.map_plain_char('y'), Some('a'));
        assert_eq!(legend.mapped_count(), 1);
    }

    #[test]
    fn decode_keeps_case_and_punctuation() {
        let mut legend = Legend::new();
        legend.set_mapping('f', 'w');
        legend.set_mapping('i', 'h');
        assert_eq!(legend.decode("Fi, fix!"), "Wh, wh.!");
        assert_eq!(legend.try_decode("Fi, fix!"), None);
        assert_eq!(legend.try_decode("Fi, if!"), Some("Wh, hw!".to_string()));
    }

    #[test]
    fn try_decode_is_not_fooled_by_sentinel_punctuation() {
        let legend = Legend::with_hint('b', 't').unwrap();
        assert_eq!(legend.try_decode("b..."), Some("t...".to_string()));
    }

    #[test]
    fn incorporate_extends_consistent_words() {
        let mut legend = Legend::with_hint('b', 't').unwrap();
        assert!(legend.incorporate(&word("pt"), "an"));
        assert_eq!(legend.map_cypher_char('p'), Some('a'));
        assert_eq!(legend.map_cypher_char('t'), Some('n'));
        assert_eq!(legend.mapped_count(), 3);
    }

    #[test]
    fn incorporate_rejects_conflicts_without_side_effects() {
        let start = Legend::with_hint('b', 't').unwrap();

        // b is already t
        let mut legend = start;
        assert!(!legend.can_incorporate(&word("ba"), "an"));
        assert!(!legend.incorporate(&word("ba"), "an"));
        assert_eq!(legend, start);

        // t is already the target of b; the first position would have succeeded
        let mut legend = start;
        assert!(!legend.incorporate(&word("xq"), "at"));
        assert_eq!(legend, start);
        assert_eq!(legend.map_cypher_char('x'), None);
    }

    #[test]
    fn incorporate_never_maps_two_letters_onto_one() {
        let mut legend = Legend::new();
        assert!(!legend.incorporate(&word("ab"), "ee"));
        assert_eq!(legend, Legend::new());
    }

    #[test]
    fn incorporate_requires_equal_lengths() {
        let mut legend = Legend::new();
        assert!(!legend.incorporate(&word("abc"), "ab"));
    }

    #[test]
    fn incorporate_rejects_plaintext_that_is_not_all_letters() {
        // "a1" has the same shape as "ab" but can't map b to anything
        let start = Legend::with_hint('q', 'z').unwrap();
        let mut legend = start;
        assert!(!legend.can_incorporate(&word("ab"), "a1"));
        assert!(!legend.incorporate(&word("ab"), "a1"));
        assert_eq!(legend, start);
        assert_eq!(legend.map_cypher_char('a'), None);
    }

    #[test]
    fn equality_is_structural() {
        let mut a = Legend::new();
        a.set_mapping('c', 'e');
        a.set_mapping('b', 't');
        let b = Legend::from_hints(&[('b', 't'), ('c', 'e')]).unwrap();
        assert_eq!(a, b);

        let set: std::collections::HashSet<_> = vec![a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_shows_the_key() {
        let legend = Legend::with_hint('b', 't').unwrap();
        assert_eq!(
            legend.to_string(),
            "abcdefghijklmnopqrstuvwxyz\n.t........................"
        );
    }

    #[test]
    fn hints_parse() {
        assert_eq!("b=t".parse::<Hint>(), Ok(Hint { cypher: 'b', plain: 't' }));
        assert_eq!(" B : T ".parse::<Hint>(), Ok(Hint { cypher: 'b', plain: 't' }));
        assert_eq!("b=".parse::<Hint>(), Err(LegendError::MalformedHint("b=".into())));
        assert_eq!("bt".parse::<Hint>(), Err(LegendError::MalformedHint("bt".into())));
        assert_eq!("b=7".parse::<Hint>(), Err(LegendError::NotALetter('7')));
    }
}
