//! Solver for cryptoquips: a phrase run through a simple substitution cipher, published with
//! one letter of the key as a hint.
//!
//! Every cypher word becomes a [`PuzzlePiece`] holding the dictionary words with the same
//! letter pattern. [`Quip::attempt_word_block_attack`] then walks the pieces one word at a
//! time, growing a [`Legend`] from the hint and backing out of any word that contradicts it.
//!
//! ```
//! use cryptoquip::Quip;
//!
//! let words = ["an", "in", "at", "for", "nor"];
//! let mut quip = Quip::new("Pt ukl", 'b', 't', words.iter()).unwrap();
//! assert!(quip.attempt_word_block_attack());
//! assert_eq!(quip.solutions(), &["An for", "In for"]);
//! ```

pub mod config;
pub mod cypher_word;
pub mod dictionary;
pub mod error;
pub mod legend;
pub mod puzzle_piece;
pub mod quip;

pub use crate::config::{PieceOrder, SolverConfig};
pub use crate::cypher_word::{CypherWord, Pattern};
pub use crate::dictionary::Dictionary;
pub use crate::error::{DictionaryError, Error, LegendError};
pub use crate::legend::{Hint, Legend, UNMAPPED};
pub use crate::puzzle_piece::PuzzlePiece;
pub use crate::quip::{AttackStats, Quip};
