//! Chord symbol parsing and formatting.
//!
//! The parser understands Harte notation (`C:min7`, `Bb:hdim7/b3`,
//! `D:(1,b3,5)`) as well as the compact spellings used in lead sheets
//! (`Cm7`, `F#maj7`, `G7sus4`). It is total: any non-empty symbol that is not
//! a no-chord marker produces a chord, falling back to a C root or a major
//! quality when a part cannot be recognized. [`ParsedSymbol::exact`] reports
//! whether such a fallback was taken.
//!
//! Formatting is lossy. Roots are always spelled with sharps, bass notes are
//! dropped, and extensions collapse into the seventh-chord parent (`C:9` and
//! `C:13` both format as `C7`). A second parse/format pass is a fixed point.

use super::pitch::{degree_semitones, pitch_class, pitch_class_name, split_note_name, transpose};
use super::quality::{Chord, ChordQuality};

/// Symbols meaning "no chord sounding".
pub const NO_CHORD_SYMBOLS: &[&str] = &["N", "X", "NC", "N.C.", "N/C"];

/// Quality prefixes, most specific first. Matched case-sensitively so that
/// `M7` (major seventh) and `m7` (minor seventh) stay distinct.
const QUALITY_PREFIXES: &[(&str, ChordQuality)] = &[
    ("minmaj7", ChordQuality::MinorMajor7),
    ("mMaj7", ChordQuality::MinorMajor7),
    ("mmaj7", ChordQuality::MinorMajor7),
    ("mM7", ChordQuality::MinorMajor7),
    ("hdim7", ChordQuality::HalfDiminished),
    ("hdim", ChordQuality::HalfDiminished),
    ("min7b5", ChordQuality::HalfDiminished),
    ("m7b5", ChordQuality::HalfDiminished),
    ("ø7", ChordQuality::HalfDiminished),
    ("ø", ChordQuality::HalfDiminished),
    ("dim7", ChordQuality::Diminished7),
    ("°7", ChordQuality::Diminished7),
    ("o7", ChordQuality::Diminished7),
    ("maj13", ChordQuality::Major7),
    ("maj11", ChordQuality::Major7),
    ("maj9", ChordQuality::Major7),
    ("maj7", ChordQuality::Major7),
    ("M7", ChordQuality::Major7),
    ("Δ7", ChordQuality::Major7),
    ("Δ", ChordQuality::Major7),
    ("maj6", ChordQuality::Major6),
    ("min13", ChordQuality::Minor7),
    ("min11", ChordQuality::Minor7),
    ("min9", ChordQuality::Minor7),
    ("min7", ChordQuality::Minor7),
    ("min6", ChordQuality::Minor6),
    ("min", ChordQuality::Minor),
    ("m13", ChordQuality::Minor7),
    ("m11", ChordQuality::Minor7),
    ("m9", ChordQuality::Minor7),
    ("m7", ChordQuality::Minor7),
    ("m6", ChordQuality::Minor6),
    ("maj", ChordQuality::Major),
    ("dim", ChordQuality::Diminished),
    ("°", ChordQuality::Diminished),
    ("aug", ChordQuality::Augmented),
    ("+", ChordQuality::Augmented),
    ("sus2", ChordQuality::Sus2),
    ("sus4", ChordQuality::Sus4),
    ("sus", ChordQuality::Sus4),
    ("13", ChordQuality::Dominant7),
    ("11", ChordQuality::Dominant7),
    ("9", ChordQuality::Dominant7),
    ("7", ChordQuality::Dominant7),
    ("6", ChordQuality::Major6),
    ("m", ChordQuality::Minor),
    ("-", ChordQuality::Minor),
    ("M", ChordQuality::Major),
    ("o", ChordQuality::Diminished),
];

/// Result of parsing a chord symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSymbol {
    pub chord: Chord,
    /// False when the root, quality or bass fell back to a default.
    pub exact: bool,
}

/// Returns true for empty symbols and no-chord markers.
pub fn is_no_chord(symbol: &str) -> bool {
    let trimmed = symbol.trim();
    trimmed.is_empty()
        || NO_CHORD_SYMBOLS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(trimmed))
}

/// Parse a chord symbol into a structured chord.
///
/// Returns `None` only for empty input and no-chord markers.
///
/// # Examples
/// ```
/// use songsmith_model::theory::{parse_chord_symbol, ChordQuality};
///
/// let parsed = parse_chord_symbol("Db:min7").unwrap();
/// assert_eq!(parsed.chord.root, 1);
/// assert_eq!(parsed.chord.quality, ChordQuality::Minor7);
/// assert!(parsed.exact);
///
/// assert!(parse_chord_symbol("N").is_none());
/// ```
pub fn parse_chord_symbol(symbol: &str) -> Option<ParsedSymbol> {
    let symbol = symbol.trim();
    if is_no_chord(symbol) {
        return None;
    }

    let mut exact = true;

    let (main, bass) = match symbol.rsplit_once('/') {
        Some((a, b)) => (a.trim(), Some(b.trim())),
        None => (symbol, None),
    };

    let (root, rest) = match split_note_name(main) {
        Some((pc, used)) => (pc, &main[used..]),
        None => {
            exact = false;
            let rest = main.split_once(':').map(|(_, q)| q).unwrap_or("");
            (0, rest)
        }
    };
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim();

    let (token, degree_list) = match rest.split_once('(') {
        Some((t, list)) => (t.trim(), Some(list.trim_end_matches(')'))),
        None => (rest, None),
    };

    let quality = if token.is_empty() {
        match degree_list.map(quality_from_degree_list) {
            Some(Some(q)) => q,
            Some(None) => {
                exact = false;
                ChordQuality::Major
            }
            None => ChordQuality::Major,
        }
    } else {
        match match_quality_prefix(token) {
            Some(q) => q,
            None => {
                exact = false;
                ChordQuality::Major
            }
        }
    };

    let bass = match bass {
        Some(b) => {
            let pc = pitch_class(b).or_else(|| degree_semitones(b).map(|s| transpose(root, s)));
            if pc.is_none() {
                exact = false;
            }
            pc
        }
        None => None,
    };

    Some(ParsedSymbol {
        chord: Chord {
            root,
            quality,
            bass,
        },
        exact,
    })
}

fn match_quality_prefix(token: &str) -> Option<ChordQuality> {
    QUALITY_PREFIXES
        .iter()
        .find(|(prefix, _)| token.starts_with(prefix))
        .map(|(_, q)| *q)
}

/// Harte interval list such as `1,b3,5`. Omitted degrees (`*5`) are skipped.
fn quality_from_degree_list(list: &str) -> Option<ChordQuality> {
    let mut intervals = vec![0u8];
    for item in list.split(',').map(str::trim) {
        if item.is_empty() || item.starts_with('*') {
            continue;
        }
        let semis = degree_semitones(item)?;
        intervals.push(semis.rem_euclid(12) as u8);
    }
    ChordQuality::from_intervals(&intervals)
}

/// Render a chord as a compact symbol (`C`, `Am7`, `F#m7b5`).
pub fn format_chord_symbol(root: u8, quality: ChordQuality) -> String {
    format!("{}{}", pitch_class_name(root), quality.compact_suffix())
}

/// Render a chord in Harte notation (`C:maj`, `A:min7`, `F#:hdim7`).
pub fn format_harte_symbol(root: u8, quality: ChordQuality) -> String {
    format!("{}:{}", pitch_class_name(root), quality.harte_suffix())
}

/// Parse then re-format a symbol in compact form. `None` for no-chord markers.
pub fn normalize_chord_symbol(symbol: &str) -> Option<String> {
    parse_chord_symbol(symbol).map(|p| format_chord_symbol(p.chord.root, p.chord.quality))
}
