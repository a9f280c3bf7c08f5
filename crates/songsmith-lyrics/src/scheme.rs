//! Rhyme-scheme inference and per-line lyric analysis.

use serde::Serialize;

use crate::rhyme::classify_rhyme;
use crate::syllables::count_line_syllables;
use crate::words::last_word;

/// Scheme letter for lines without a word to rhyme.
pub const NO_WORD: char = '-';

/// Scheme letter once the 52 letters are used up.
pub const OVERFLOW: char = '?';

/// Analysis of one lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub text: String,
    pub syllables: usize,
    pub end_word: Option<String>,
    pub rhyme: char,
}

/// Analysis of one stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StanzaReport {
    pub scheme: String,
    pub lines: Vec<LineReport>,
}

/// Letter for the `index`-th rhyme class: `A..Z`, then `a..z`.
pub fn scheme_letter(index: usize) -> char {
    match index {
        0..=25 => (b'A' + index as u8) as char,
        26..=51 => (b'a' + (index - 26) as u8) as char,
        _ => OVERFLOW,
    }
}

/// Non-blank lines grouped into stanzas separated by blank lines.
pub fn stanzas(lyrics: &str) -> Vec<Vec<&str>> {
    let mut out: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lyrics.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Rhyme letters for one stanza.
///
/// Each line's last word is compared against the first word of every class
/// seen so far; a perfect or slant rhyme joins that class, otherwise the
/// line opens a new class with the next letter.
pub fn stanza_scheme(lines: &[&str]) -> String {
    let mut representatives: Vec<&str> = Vec::new();
    lines
        .iter()
        .map(|line| {
            let Some(word) = last_word(line) else {
                return NO_WORD;
            };
            match representatives
                .iter()
                .position(|rep| classify_rhyme(rep, word).is_rhyme())
            {
                Some(index) => scheme_letter(index),
                None => {
                    representatives.push(word);
                    scheme_letter(representatives.len() - 1)
                }
            }
        })
        .collect()
}

/// Per-stanza rhyme schemes.
pub fn rhyme_scheme(lyrics: &str) -> Vec<String> {
    stanzas(lyrics)
        .iter()
        .map(|lines| stanza_scheme(lines))
        .collect()
}

/// Stanza schemes joined by spaces.
///
/// # Examples
/// ```
/// use songsmith_lyrics::rhyme_scheme_string;
///
/// let lyrics = "I see the light\nYou feel it right\nWe walk away\nNo more delay";
/// assert_eq!(rhyme_scheme_string(lyrics), "AABB");
/// ```
pub fn rhyme_scheme_string(lyrics: &str) -> String {
    rhyme_scheme(lyrics).join(" ")
}

/// Syllables, end words and rhyme letters for every stanza.
pub fn analyze_lyrics(lyrics: &str) -> Vec<StanzaReport> {
    stanzas(lyrics)
        .iter()
        .map(|lines| {
            let scheme = stanza_scheme(lines);
            let lines = lines
                .iter()
                .zip(scheme.chars())
                .map(|(line, rhyme)| LineReport {
                    text: line.to_string(),
                    syllables: count_line_syllables(line),
                    end_word: last_word(line).map(str::to_string),
                    rhyme,
                })
                .collect();
            StanzaReport { scheme, lines }
        })
        .collect()
}
