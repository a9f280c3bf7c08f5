//! Chord qualities and their interval templates.

use serde::{Deserialize, Serialize};

use super::pitch::{pitch_class_name, transpose};

/// Closed set of chord qualities understood by the project model.
///
/// Extended chords (9ths, 11ths, 13ths) are folded into their seventh-chord
/// parent when parsed; see [`crate::theory::parse_chord_symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant7,
    Minor7,
    Major7,
    HalfDiminished,
    Diminished7,
    MinorMajor7,
    Major6,
    Minor6,
}

/// Major/minor grouping used by key-mode detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityFamily {
    Major,
    Minor,
}

impl ChordQuality {
    /// Every quality, in declaration order.
    pub const ALL: [ChordQuality; 14] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Dominant7,
        ChordQuality::Minor7,
        ChordQuality::Major7,
        ChordQuality::HalfDiminished,
        ChordQuality::Diminished7,
        ChordQuality::MinorMajor7,
        ChordQuality::Major6,
        ChordQuality::Minor6,
    ];

    /// Interval template in semitones above the root.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::HalfDiminished => &[0, 3, 6, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::MinorMajor7 => &[0, 3, 7, 11],
            ChordQuality::Major6 => &[0, 4, 7, 9],
            ChordQuality::Minor6 => &[0, 3, 7, 9],
        }
    }

    /// Major or minor family, decided by the third. Suspended chords have none.
    pub fn family(&self) -> Option<QualityFamily> {
        match self {
            ChordQuality::Major
            | ChordQuality::Augmented
            | ChordQuality::Dominant7
            | ChordQuality::Major7
            | ChordQuality::Major6 => Some(QualityFamily::Major),
            ChordQuality::Minor
            | ChordQuality::Diminished
            | ChordQuality::Minor7
            | ChordQuality::HalfDiminished
            | ChordQuality::Diminished7
            | ChordQuality::MinorMajor7
            | ChordQuality::Minor6 => Some(QualityFamily::Minor),
            ChordQuality::Sus2 | ChordQuality::Sus4 => None,
        }
    }

    /// Suffix used by compact chord symbols (`C`, `Cm7`, `Cm7b5`).
    pub fn compact_suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::HalfDiminished => "m7b5",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::MinorMajor7 => "mMaj7",
            ChordQuality::Major6 => "6",
            ChordQuality::Minor6 => "m6",
        }
    }

    /// Harte shorthand (`maj`, `min7`, `hdim7`).
    pub fn harte_suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "min7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::HalfDiminished => "hdim7",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::MinorMajor7 => "minmaj7",
            ChordQuality::Major6 => "maj6",
            ChordQuality::Minor6 => "min6",
        }
    }

    /// Returns the serialized name of this quality.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "dominant7",
            ChordQuality::Minor7 => "minor7",
            ChordQuality::Major7 => "major7",
            ChordQuality::HalfDiminished => "half-diminished",
            ChordQuality::Diminished7 => "diminished7",
            ChordQuality::MinorMajor7 => "minor-major7",
            ChordQuality::Major6 => "major6",
            ChordQuality::Minor6 => "minor6",
        }
    }

    /// Find the quality whose template equals `intervals` (order and octave ignored).
    pub fn from_intervals(intervals: &[u8]) -> Option<ChordQuality> {
        let mut wanted: Vec<u8> = intervals.iter().map(|i| i % 12).collect();
        if !wanted.contains(&0) {
            wanted.push(0);
        }
        wanted.sort_unstable();
        wanted.dedup();
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.intervals() == wanted.as_slice())
    }
}

impl std::fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured chord: root pitch class, quality and optional bass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub root: u8,
    pub quality: ChordQuality,
    pub bass: Option<u8>,
}

impl Chord {
    /// Creates a root-position chord.
    pub fn new(root: u8, quality: ChordQuality) -> Self {
        Self {
            root: root % 12,
            quality,
            bass: None,
        }
    }

    /// Concrete pitch classes, in template order.
    pub fn notes(&self) -> Vec<u8> {
        chord_notes(self.root, self.quality)
    }

    /// Compact symbol, e.g. `F#m7`. Drops the bass note.
    pub fn symbol(&self) -> String {
        format!("{}{}", pitch_class_name(self.root), self.quality.compact_suffix())
    }

    /// Harte symbol, e.g. `F#:min7`. Drops the bass note.
    pub fn harte(&self) -> String {
        format!("{}:{}", pitch_class_name(self.root), self.quality.harte_suffix())
    }
}

/// Generate the pitch classes of a chord from its interval template.
pub fn chord_notes(root: u8, quality: ChordQuality) -> Vec<u8> {
    quality
        .intervals()
        .iter()
        .map(|&i| transpose(root, i as i32))
        .collect()
}
