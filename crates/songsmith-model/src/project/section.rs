//! Song sections and the chords placed in them.

use serde::{Deserialize, Serialize};

use crate::theory::{chord_role, Chord, ChordQuality, HarmonicFunction, Key};

/// Structural role of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
    Transition,
}

/// Label keywords checked in order; the first keyword contained in the
/// lowercased label decides the type.
const LABEL_KEYWORDS: &[(&str, SectionType)] = &[
    ("prechorus", SectionType::Transition),
    ("intro", SectionType::Intro),
    ("verse", SectionType::Verse),
    ("chorus", SectionType::Chorus),
    ("refrain", SectionType::Chorus),
    ("hook", SectionType::Chorus),
    ("bridge", SectionType::Bridge),
    ("outro", SectionType::Outro),
    ("coda", SectionType::Outro),
    ("ending", SectionType::Outro),
    ("fade", SectionType::Outro),
    ("interlude", SectionType::Transition),
    ("transition", SectionType::Transition),
    ("break", SectionType::Transition),
    ("instrumental", SectionType::Transition),
    ("solo", SectionType::Transition),
    ("silence", SectionType::Transition),
];

impl SectionType {
    /// Every section type, in declaration order.
    pub const ALL: [SectionType; 6] = [
        SectionType::Intro,
        SectionType::Verse,
        SectionType::Chorus,
        SectionType::Bridge,
        SectionType::Outro,
        SectionType::Transition,
    ];

    /// Returns the serialized name of this section type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Intro => "intro",
            SectionType::Verse => "verse",
            SectionType::Chorus => "chorus",
            SectionType::Bridge => "bridge",
            SectionType::Outro => "outro",
            SectionType::Transition => "transition",
        }
    }

    /// Display name, e.g. `"Chorus"`.
    pub fn title(&self) -> &'static str {
        match self {
            SectionType::Intro => "Intro",
            SectionType::Verse => "Verse",
            SectionType::Chorus => "Chorus",
            SectionType::Bridge => "Bridge",
            SectionType::Outro => "Outro",
            SectionType::Transition => "Transition",
        }
    }

    /// Map a free-text segment label onto a section type.
    ///
    /// Total: labels matching no keyword (including dataset letters such as
    /// `"A"` or `"B'"`) become [`SectionType::Bridge`]. A bare `"end"` is an
    /// outro.
    ///
    /// # Examples
    /// ```
    /// use songsmith_model::project::SectionType;
    ///
    /// assert_eq!(SectionType::from_label("Verse 2"), SectionType::Verse);
    /// assert_eq!(SectionType::from_label("pre-chorus"), SectionType::Transition);
    /// assert_eq!(SectionType::from_label("A'"), SectionType::Bridge);
    /// ```
    pub fn from_label(label: &str) -> SectionType {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(|c| c.to_lowercase())
            .collect();

        if normalized == "end" {
            return SectionType::Outro;
        }

        LABEL_KEYWORDS
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword))
            .map(|(_, section_type)| *section_type)
            .unwrap_or(SectionType::Bridge)
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chord placed inside a section, with analysis relative to the project key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChord {
    /// Canonical compact symbol.
    pub symbol: String,
    pub root: u8,
    pub quality: ChordQuality,
    pub roman_numeral: String,
    pub function: HarmonicFunction,
    pub notes: Vec<u8>,
    /// Offset from the section start, in beats.
    pub start_beat: f64,
    pub duration_beats: f64,
}

impl SectionChord {
    /// Build an analysed chord placed at `start_beat`.
    pub fn new(chord: Chord, key: &Key, start_beat: f64, duration_beats: f64) -> Self {
        let role = chord_role(chord.root, chord.quality, key);
        Self {
            symbol: chord.symbol(),
            root: chord.root,
            quality: chord.quality,
            roman_numeral: role.roman_numeral.to_string(),
            function: role.function,
            notes: chord.notes(),
            start_beat,
            duration_beats,
        }
    }

    /// The structured chord (root position).
    pub fn chord(&self) -> Chord {
        Chord::new(self.root, self.quality)
    }

    /// Recompute Roman numeral and function for a new key.
    pub fn reanalyze(&mut self, key: &Key) {
        let role = chord_role(self.root, self.quality, key);
        self.roman_numeral = role.roman_numeral.to_string();
        self.function = role.function;
    }

    /// End offset from the section start, in beats.
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }
}

/// A structural section of the song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Source label, kept for display.
    pub name: String,
    pub bars: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub start_bar: u32,
    #[serde(default)]
    pub chords: Vec<SectionChord>,
}

impl Section {
    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// First bar after this section.
    pub fn end_bar(&self) -> u32 {
        self.start_bar.saturating_add(self.bars)
    }

    /// Compact symbols of the section's chords, in order.
    pub fn chord_symbols(&self) -> Vec<&str> {
        self.chords.iter().map(|c| c.symbol.as_str()).collect()
    }
}

/// Estimate a bar count from a duration, assuming 4/4.
///
/// `round(seconds * bpm / 60 / 4)`, never less than one.
pub fn bars_from_duration(seconds: f64, bpm: f64) -> u32 {
    let bars = (seconds * (bpm / 60.0) / 4.0).round();
    if !bars.is_finite() || bars < 1.0 {
        return 1;
    }
    bars.min(u32::MAX as f64) as u32
}
