//! Harmonic analysis relative to a key: function, Roman numeral, key detection.

use serde::{Deserialize, Serialize};

use super::key::{Key, Mode};
use super::pitch::interval;
use super::quality::{ChordQuality, QualityFamily};

/// Role of a chord within a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicFunction {
    Tonic,
    Subdominant,
    Dominant,
}

impl HarmonicFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "tonic",
            HarmonicFunction::Subdominant => "subdominant",
            HarmonicFunction::Dominant => "dominant",
        }
    }
}

impl std::fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Function by semitone distance from the tonic. `None` entries are chromatic
/// degrees resolved by [`harmonic_function`].
const FUNCTION_TABLE: [Option<HarmonicFunction>; 12] = [
    Some(HarmonicFunction::Tonic),       // 0  I
    Some(HarmonicFunction::Subdominant), // 1  bII
    Some(HarmonicFunction::Subdominant), // 2  II
    None,                                // 3  bIII
    Some(HarmonicFunction::Tonic),       // 4  III
    Some(HarmonicFunction::Subdominant), // 5  IV
    None,                                // 6  bV
    Some(HarmonicFunction::Dominant),    // 7  V
    None,                                // 8  bVI
    Some(HarmonicFunction::Tonic),       // 9  VI
    Some(HarmonicFunction::Dominant),    // 10 bVII
    Some(HarmonicFunction::Dominant),    // 11 VII
];

/// Scale-degree labels by semitone distance from the tonic.
pub const ROMAN_NUMERALS: [&str; 12] = [
    "I", "bII", "II", "bIII", "III", "IV", "bV", "V", "bVI", "VI", "bVII", "VII",
];

/// Classify a chord by its interval above the tonic.
///
/// Total over every interval and quality. Chromatic degrees missing from the
/// table resolve to dominant for dominant-seventh chords, otherwise bIII is
/// tonic, bVI subdominant and bV dominant.
pub fn harmonic_function(interval: u8, quality: ChordQuality) -> HarmonicFunction {
    let interval = interval % 12;
    if let Some(function) = FUNCTION_TABLE[interval as usize] {
        return function;
    }
    if quality == ChordQuality::Dominant7 {
        return HarmonicFunction::Dominant;
    }
    match interval {
        3 => HarmonicFunction::Tonic,
        8 => HarmonicFunction::Subdominant,
        _ => HarmonicFunction::Dominant,
    }
}

/// Positional Roman numeral for an interval above the tonic.
///
/// Quality is not reflected: a minor chord on the tonic is still `I`.
pub fn roman_numeral(interval: u8) -> &'static str {
    ROMAN_NUMERALS[(interval % 12) as usize]
}

/// Roman numeral and function of a chord in a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordRole {
    pub roman_numeral: &'static str,
    pub function: HarmonicFunction,
}

/// Derive a chord's Roman numeral and harmonic function relative to `key`.
pub fn chord_role(root: u8, quality: ChordQuality, key: &Key) -> ChordRole {
    let distance = interval(key.root, root);
    ChordRole {
        roman_numeral: roman_numeral(distance),
        function: harmonic_function(distance, quality),
    }
}

/// Outcome of histogram key detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEstimate {
    pub key: Key,
    /// Share of chords rooted on the detected tonic (0..=1).
    pub confidence: f64,
    /// Number of chords considered.
    pub sample_count: usize,
}

/// Estimate a key from chord roots and qualities.
///
/// The most frequent root is the tonic; ties go to the lowest pitch class.
/// Mode is major unless minor-family chords strictly outnumber major-family
/// chords. Returns `None` when there are no chords.
///
/// # Examples
/// ```
/// use songsmith_model::theory::{detect_key, ChordQuality, Key, Mode};
///
/// let chords = [(0, ChordQuality::Major), (7, ChordQuality::Major), (0, ChordQuality::Major)];
/// let estimate = detect_key(chords).unwrap();
/// assert_eq!(estimate.key, Key::new(0, Mode::Major));
/// ```
pub fn detect_key<I>(chords: I) -> Option<KeyEstimate>
where
    I: IntoIterator<Item = (u8, ChordQuality)>,
{
    let mut histogram = [0usize; 12];
    let mut major = 0usize;
    let mut minor = 0usize;
    let mut total = 0usize;

    for (root, quality) in chords {
        histogram[(root % 12) as usize] += 1;
        total += 1;
        match quality.family() {
            Some(QualityFamily::Major) => major += 1,
            Some(QualityFamily::Minor) => minor += 1,
            None => {}
        }
    }

    if total == 0 {
        return None;
    }

    let mut tonic = 0usize;
    for pc in 1..12 {
        if histogram[pc] > histogram[tonic] {
            tonic = pc;
        }
    }

    let mode = if major >= minor {
        Mode::Major
    } else {
        Mode::Minor
    };

    Some(KeyEstimate {
        key: Key::new(tonic as u8, mode),
        confidence: histogram[tonic] as f64 / total as f64,
        sample_count: total,
    })
}
