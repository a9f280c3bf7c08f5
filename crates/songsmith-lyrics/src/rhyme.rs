//! Rhyme classification between two words.
//!
//! Words are compared on their rhyme region: the letters from the start of
//! the last vowel group to the end of the word. A silent final `e` is
//! skipped when locating that group but stays in the region, so `make`
//! gives `ake`.

use serde::Serialize;

use crate::words::{is_vowel, letters};

/// Common-suffix share above which two regions count as a slant rhyme.
pub const SLANT_THRESHOLD: f64 = 0.5;

/// How two words rhyme, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RhymeKind {
    Perfect,
    Slant,
    Assonance,
    Consonance,
    None,
}

impl RhymeKind {
    /// Perfect and slant rhymes put lines in the same rhyme class.
    pub fn is_rhyme(&self) -> bool {
        matches!(self, RhymeKind::Perfect | RhymeKind::Slant)
    }
}

/// Rhyme region of a word, lowercased.
///
/// # Examples
/// ```
/// use songsmith_lyrics::rhyme_region;
///
/// assert_eq!(rhyme_region("Light"), "ight");
/// assert_eq!(rhyme_region("make"), "ake");
/// assert_eq!(rhyme_region("away"), "ay");
/// ```
pub fn rhyme_region(word: &str) -> String {
    let letters = letters(word);
    let n = letters.len();

    let search_end = if n >= 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) {
        n - 1
    } else {
        n
    };

    let Some(last_vowel) = letters[..search_end].iter().rposition(|c| is_vowel(*c)) else {
        return letters.into_iter().collect();
    };
    let mut start = last_vowel;
    while start > 0 && is_vowel(letters[start - 1]) {
        start -= 1;
    }
    letters[start..].iter().collect()
}

/// Classify how two words rhyme.
///
/// Checks run in priority order and the first match wins: identical rhyme
/// regions, a common suffix covering more than half of the longer region,
/// equal vowels, equal consonants.
pub fn classify_rhyme(a: &str, b: &str) -> RhymeKind {
    let a = rhyme_region(a);
    let b = rhyme_region(b);
    if a.is_empty() || b.is_empty() {
        return RhymeKind::None;
    }
    if a == b {
        return RhymeKind::Perfect;
    }

    let longest = a.chars().count().max(b.chars().count());
    let suffix = a
        .chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count();
    if suffix as f64 / longest as f64 > SLANT_THRESHOLD {
        return RhymeKind::Slant;
    }

    let vowels = |s: &str| -> String { s.chars().filter(|c| is_vowel(*c)).collect() };
    let consonants = |s: &str| -> String { s.chars().filter(|c| !is_vowel(*c)).collect() };

    let (va, vb) = (vowels(&a), vowels(&b));
    if !va.is_empty() && va == vb {
        return RhymeKind::Assonance;
    }
    let (ca, cb) = (consonants(&a), consonants(&b));
    if !ca.is_empty() && ca == cb {
        return RhymeKind::Consonance;
    }
    RhymeKind::None
}
