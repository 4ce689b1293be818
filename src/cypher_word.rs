use std::fmt::{self, Display, Formatter};

use crate::legend::Legend;

/// Lowercase ascii letters only; everything else in a token is dropped.
pub fn normalize(text: impl AsRef<str>) -> String {
    text.as_ref()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The shape of a word with the actual letters taken out: each letter is replaced by the
/// symbol for the position it first showed up at, so "see" and "bee" are both "abb" and
/// "rabbit" is "abccef".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    /// Expects normalized text; see `normalize`.
    pub fn of(word: &str) -> Self {
        let bytes = word.as_bytes();
        let pattern = bytes
            .iter()
            .enumerate()
            .map(|(idx, u)| {
                // first occurrence always exists, it's at worst `idx` itself
                let first = bytes.iter().position(|x| x == u).unwrap_or(idx);
                std::char::from_u32(u32::from(b'a') + first as u32)
                    .unwrap_or(std::char::REPLACEMENT_CHARACTER)
            })
            .collect();

        Pattern(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One word of the cyphertext, reduced to lowercase letters, along with its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CypherWord {
    text: String,
    pattern: Pattern,
}

impl CypherWord {
    pub fn new(token: impl AsRef<str>) -> Self {
        let text = normalize(token);
        let pattern = Pattern::of(&text);
        CypherWord { text, pattern }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Cheap structural test: same length and same repeated-letter layout. Nothing that fails
    /// this can ever decode from this word.
    pub fn matches_pattern(&self, candidate: &str) -> bool {
        self.pattern == Pattern::of(&normalize(candidate))
    }

    /// Partial test against a legend. Every letter the legend can decode must agree with the
    /// candidate; letters it can't decode are ignored.
    pub fn can_match(&self, candidate: &str, legend: &Legend) -> bool {
        let candidate = candidate.as_bytes();
        if candidate.len() != self.len() {
            return false;
        }

        self.text
            .chars()
            .zip(candidate)
            .all(|(c, &u)| match legend.map_cypher_char(c) {
                Some(p) => p == u.to_ascii_lowercase() as char,
                None => true,
            })
    }

    /// Full test against a legend: every letter decodes and the result is `candidate`.
    pub fn decodes_to(&self, candidate: &str, legend: &Legend) -> bool {
        self.create_plaintext(legend)
            .map_or(false, |plain| plain.eq_ignore_ascii_case(candidate))
    }

    /// The decoded word, if the legend covers all of it.
    pub fn create_plaintext(&self, legend: &Legend) -> Option<String> {
        legend.try_decode(&self.text)
    }
}

impl Display for CypherWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> String {
        CypherWord::new(s).pattern().to_string()
    }

    #[test]
    fn patterns_follow_first_occurrence() {
        assert_eq!(pattern("see"), "abb");
        assert_eq!(pattern("rabbit"), "abccef");
        assert_eq!(pattern("abc"), "abc");
        assert_eq!(pattern("a"), "a");
        assert_eq!(pattern(""), "");
    }

    #[test]
    fn patterns_ignore_which_letters_are_used() {
        assert_eq!(pattern("see"), pattern("bee"));
        assert_eq!(pattern("see"), pattern("all"));
        assert_ne!(pattern("see"), pattern("sea"));
        assert_eq!(pattern("vzglcddp"), pattern("umbrella"));
    }

    #[test]
    fn tokens_are_normalized() {
        let word = CypherWord::new("Fict,");
        assert_eq!(word.as_str(), "fict");
        assert_eq!(word.len(), 4);
        assert!(CypherWord::new("--").is_empty());
        assert_eq!(normalize("Don't"), "dont");
    }

    #[test]
    fn matches_pattern_needs_same_shape_and_length() {
        let word = CypherWord::new("ncc");
        assert!(word.matches_pattern("see"));
        assert!(word.matches_pattern("Too"));
        assert!(!word.matches_pattern("sea"));
        assert!(!word.matches_pattern("seen"));
    }

    #[test]
    fn can_match_only_checks_decoded_letters() {
        let word = CypherWord::new("ncc");
        let legend = Legend::with_hint('c', 'e').unwrap();
        assert!(word.can_match("see", &legend));
        assert!(word.can_match("bee", &legend));
        assert!(!word.can_match("all", &legend));
        assert!(!word.can_match("seen", &legend));
        assert!(word.can_match("xyz", &Legend::new()));
    }

    #[test]
    fn can_match_does_not_imply_decodes_to() {
        // only the first letter is known
        let word = CypherWord::new("abc");
        let legend = Legend::with_hint('a', 't').unwrap();
        assert!(word.can_match("the", &legend));
        assert!(!word.decodes_to("the", &legend));
        assert_eq!(word.create_plaintext(&legend), None);
    }

    #[test]
    fn decodes_to_implies_can_match() {
        let word = CypherWord::new("pt");
        let legend = Legend::from_hints(&[('p', 'a'), ('t', 'n')]).unwrap();
        for candidate in &["an", "in", "on", "at", "AN"] {
            if word.decodes_to(candidate, &legend) {
                assert!(word.can_match(candidate, &legend));
                assert!(word.matches_pattern(candidate));
            }
        }
        assert!(word.decodes_to("an", &legend));
        assert!(word.decodes_to("AN", &legend));
        assert_eq!(word.create_plaintext(&legend), Some("an".to_string()));
    }
}
