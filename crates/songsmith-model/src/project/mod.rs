//! Project representation handed to the editing layer.
//!
//! A project owns an ordered list of sections, each carrying its own chords,
//! plus an optional cross-cutting list of progressions. Exactly one key is
//! associated with a project; [`Project::set_key`] re-derives every Roman
//! numeral and harmonic function.

mod progression;
mod section;


use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ProjectError;
use crate::theory::Key;

pub use progression::{pattern_of, Progression, ProgressionChord};
pub use section::{bars_from_duration, Section, SectionChord, SectionType};

/// The only time signature the model supports.
pub const TIME_SIGNATURE: &str = "4/4";

/// Descriptive project metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub bpm: f64,
    /// Display form of [`Project::key`], e.g. `"A minor"`.
    pub key: String,
    pub time_signature: String,
    /// RFC 3339 timestamp.
    pub created: String,
    /// RFC 3339 timestamp.
    pub modified: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source: String,
}

/// Song structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    pub sections: Vec<Section>,
}

/// Harmony view across sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Harmony {
    pub progressions: Vec<Progression>,
}

/// A songwriting project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub metadata: ProjectMetadata,
    pub key: Key,
    pub structure: Structure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmony: Option<Harmony>,
}

impl Project {
    /// Parse a project from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn sections(&self) -> &[Section] {
        &self.structure.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.structure.sections.iter().find(|s| s.id == id)
    }

    pub fn progressions(&self) -> &[Progression] {
        self.harmony
            .as_ref()
            .map(|h| h.progressions.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of all section bar counts.
    pub fn total_bars(&self) -> u32 {
        self.structure
            .sections
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.bars))
    }

    /// Change the project key and re-derive all chord analysis.
    pub fn set_key(&mut self, key: Key) {
        self.key = key;
        self.metadata.key = key.to_string();
        for section in &mut self.structure.sections {
            for chord in &mut section.chords {
                chord.reanalyze(&key);
            }
        }
        if let Some(harmony) = &mut self.harmony {
            for progression in &mut harmony.progressions {
                progression.reanalyze(&key);
            }
        }
    }

    /// Rewrite every `start_bar` as the running sum of prior bar counts.
    pub fn recompute_start_bars(&mut self) {
        let mut bar = 0u32;
        for section in &mut self.structure.sections {
            section.start_bar = bar;
            bar = bar.saturating_add(section.bars);
        }
    }

    /// Remove a section, keeping start bars and progression usage consistent.
    pub fn remove_section(&mut self, id: &str) -> Option<Section> {
        let index = self.structure.sections.iter().position(|s| s.id == id)?;
        let removed = self.structure.sections.remove(index);
        self.recompute_start_bars();

        if let Some(harmony) = &mut self.harmony {
            for progression in &mut harmony.progressions {
                progression.section_ids.retain(|s| s != id);
                progression.usage_count = progression.section_ids.len();
            }
            harmony.progressions.retain(|p| p.usage_count > 0);
        }
        Some(removed)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ProjectError> {
        if !(self.metadata.bpm.is_finite() && self.metadata.bpm > 0.0) {
            return Err(ProjectError::InvalidBpm {
                bpm: self.metadata.bpm,
            });
        }

        let mut expected_bar = 0u32;
        let mut ids = HashSet::new();
        for (index, section) in self.structure.sections.iter().enumerate() {
            if section.bars == 0 {
                return Err(ProjectError::ZeroBars { index });
            }
            if section.start_bar != expected_bar {
                return Err(ProjectError::StartBarMismatch {
                    index,
                    expected: expected_bar,
                    actual: section.start_bar,
                });
            }
            if !(section.start_time.is_finite()
                && section.end_time.is_finite()
                && section.end_time >= section.start_time)
            {
                return Err(ProjectError::InvalidTimeRange {
                    index,
                    start: section.start_time,
                    end: section.end_time,
                });
            }
            if !ids.insert(section.id.as_str()) {
                return Err(ProjectError::DuplicateSectionId {
                    id: section.id.clone(),
                });
            }
            expected_bar = expected_bar
                .checked_add(section.bars)
                .ok_or(ProjectError::BarOverflow { index })?;
        }
        Ok(())
    }
}
