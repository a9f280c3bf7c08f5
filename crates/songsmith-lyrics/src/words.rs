//! Word tokenization.

use std::sync::OnceLock;

use regex::Regex;

/// Letters (any script, with combining marks) and optional inner apostrophes
/// (`don't`, `rock'n'roll`, `t'aime`).
const WORD_PATTERN: &str = r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)*";

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(WORD_PATTERN).expect("invalid regex pattern"))
}

/// Words of a line, in order. Punctuation and digits are dropped.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    word_regex().find_iter(line).map(|m| m.as_str())
}

/// Last word of a line, if any.
pub fn last_word(line: &str) -> Option<&str> {
    words(line).last()
}

/// Lowercase letters of a word, everything else removed.
pub(crate) fn letters(word: &str) -> Vec<char> {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `aeiouy` plus their accented Latin forms.
pub(crate) fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e'
            | 'i'
            | 'o'
            | 'u'
            | 'y'
            | 'à'..='æ'
            | 'è'..='ï'
            | 'ò'..='ö'
            | 'ø'..='ü'
            | 'ý'
            | 'ÿ'
            | 'ā'..='ą'
            | 'ē'..='ě'
            | 'ĩ'..='ı'
            | 'ō'..='œ'
            | 'ũ'..='ų'
    )
}
