//! Reusable chord progressions extracted from sections.

use serde::{Deserialize, Serialize};

use crate::theory::{chord_role, parse_chord_symbol, HarmonicFunction, Key};

/// One chord of a progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionChord {
    pub symbol: String,
    pub roman_numeral: String,
    pub function: HarmonicFunction,
}

/// A named chord sequence and the sections that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub id: String,
    pub name: String,
    pub chords: Vec<ProgressionChord>,
    /// Roman numerals joined with `-`, e.g. `I-V-VI-IV`.
    pub pattern: String,
    pub usage_count: usize,
    pub section_ids: Vec<String>,
}

impl Progression {
    /// Compact symbols, in order.
    pub fn symbols(&self) -> Vec<&str> {
        self.chords.iter().map(|c| c.symbol.as_str()).collect()
    }

    /// Recompute numerals, functions and pattern for a new key.
    pub fn reanalyze(&mut self, key: &Key) {
        for chord in &mut self.chords {
            if let Some(parsed) = parse_chord_symbol(&chord.symbol) {
                let role = chord_role(parsed.chord.root, parsed.chord.quality, key);
                chord.roman_numeral = role.roman_numeral.to_string();
                chord.function = role.function;
            }
        }
        self.pattern = pattern_of(&self.chords);
    }
}

/// Join numerals with `-`.
pub fn pattern_of(chords: &[ProgressionChord]) -> String {
    chords
        .iter()
        .map(|c| c.roman_numeral.as_str())
        .collect::<Vec<_>>()
        .join("-")
}
