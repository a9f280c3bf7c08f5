//! Import configuration.
//!
//! Every fallback the converter may take is configured here, so the defaults
//! are visible in one place and can be overridden from a JSON file.

use serde::{Deserialize, Serialize};

use songsmith_model::theory::Key;

use crate::error::ImportError;

/// How a chord event that straddles a section boundary is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChordOffsetPolicy {
    /// Clamp the event to the section before computing beats; offsets are
    /// never negative and never run past the section end.
    #[default]
    Clip,
    /// Keep the event's own extent; an event starting before the section
    /// gets a negative start beat.
    Preserve,
}

/// Import and inference settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Tempo used when the source has none.
    pub default_bpm: f64,
    /// Key used when nothing can be inferred, e.g. `"C major"`.
    pub default_key: String,
    /// Segment confidence when the source gives none.
    pub default_segment_confidence: f64,
    /// A source tempo equal to this value is treated as absent.
    pub placeholder_tempo: Option<f64>,
    pub chord_offset_policy: ChordOffsetPolicy,
    /// Detected keys below this tonic share raise a warning.
    pub key_confidence_threshold: f64,
    pub summarize_progressions: bool,
    pub max_progressions: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_bpm: Self::DEFAULT_BPM,
            default_key: "C major".to_string(),
            default_segment_confidence: Self::DEFAULT_SEGMENT_CONFIDENCE,
            placeholder_tempo: Some(Self::DEFAULT_BPM),
            chord_offset_policy: ChordOffsetPolicy::Clip,
            key_confidence_threshold: 0.25,
            summarize_progressions: true,
            max_progressions: Self::DEFAULT_MAX_PROGRESSIONS,
        }
    }
}

impl ImportConfig {
    pub const DEFAULT_BPM: f64 = 120.0;

    pub const DEFAULT_SEGMENT_CONFIDENCE: f64 = 0.8;

    pub const DEFAULT_MAX_PROGRESSIONS: usize = 64;

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let config: ImportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The fallback key.
    pub fn default_key(&self) -> Result<Key, ImportError> {
        Key::parse(&self.default_key).ok_or_else(|| ImportError::InvalidConfig {
            message: format!("default_key '{}' is not a major or minor key", self.default_key),
        })
    }

    /// Reject settings the converter cannot work with.
    pub fn validate(&self) -> Result<(), ImportError> {
        if !(self.default_bpm.is_finite() && self.default_bpm > 0.0) {
            return Err(ImportError::InvalidConfig {
                message: format!("default_bpm must be positive, got {}", self.default_bpm),
            });
        }
        if !(0.0..=1.0).contains(&self.default_segment_confidence) {
            return Err(ImportError::InvalidConfig {
                message: format!(
                    "default_segment_confidence must be within 0..=1, got {}",
                    self.default_segment_confidence
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.key_confidence_threshold) {
            return Err(ImportError::InvalidConfig {
                message: format!(
                    "key_confidence_threshold must be within 0..=1, got {}",
                    self.key_confidence_threshold
                ),
            });
        }
        self.default_key()?;
        Ok(())
    }

    /// True when `bpm` is the configured placeholder.
    pub fn is_placeholder_tempo(&self, bpm: f64) -> bool {
        self.placeholder_tempo
            .is_some_and(|placeholder| (bpm - placeholder).abs() < f64::EPSILON)
    }
}
