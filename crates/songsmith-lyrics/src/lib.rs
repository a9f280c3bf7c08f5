//! Songsmith Lyrics Library
//!
//! Text-analysis helpers for the lyrics editor: syllable counting, rhyme
//! classification and rhyme-scheme inference. Everything here is pure and
//! deterministic.
//!
//! # Example
//!
//! ```
//! use songsmith_lyrics::{classify_rhyme, count_line_syllables, RhymeKind};
//!
//! assert_eq!(count_line_syllables("Let it be, let it be"), 6);
//! assert_eq!(classify_rhyme("light", "night"), RhymeKind::Perfect);
//! ```

mod rhyme;
mod scheme;
mod syllables;
mod words;


pub use rhyme::{classify_rhyme, rhyme_region, RhymeKind, SLANT_THRESHOLD};
pub use scheme::{
    analyze_lyrics, rhyme_scheme, rhyme_scheme_string, scheme_letter, stanza_scheme, stanzas,
    LineReport, StanzaReport, NO_WORD, OVERFLOW,
};
pub use syllables::{count_line_syllables, count_syllables};
pub use words::{last_word, words};
