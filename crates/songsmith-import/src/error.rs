//! Error and warning types for the import pipeline.
//!
//! Detection and import failures are fatal to one import and surface as
//! [`ImportError`]. Inference problems never abort an import; they degrade
//! to defaults and are reported as [`InferenceWarning`]s on the outcome.

use thiserror::Error;

use songsmith_model::theory::Key;

use crate::detect::FormatTag;

/// Errors that abort an import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unrecognized annotation format: expected a JAMS document or a segment list")]
    UnknownFormat,
    #[error("format '{format}' was recognized but importing it is not implemented")]
    UnsupportedFormat { format: FormatTag },
    #[error("malformed {format} data at {path}: {message}")]
    MalformedData {
        format: FormatTag,
        path: String,
        message: String,
    },
    #[error("invalid import configuration: {message}")]
    InvalidConfig { message: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ImportError {
    pub(crate) fn malformed(
        format: FormatTag,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ImportError::MalformedData {
            format,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::UnknownFormat => "IMPORT_001",
            ImportError::UnsupportedFormat { .. } => "IMPORT_002",
            ImportError::MalformedData { .. } => "IMPORT_003",
            ImportError::InvalidConfig { .. } => "IMPORT_004",
            ImportError::Json(_) => "IMPORT_005",
        }
    }
}

/// Failure of the progression summarizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    #[error("found {found} distinct progressions, more than the limit of {max}")]
    TooManyProgressions { found: usize, max: usize },
}

/// Non-fatal inference problems attached to an import outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceWarning {
    /// No chord events; the configured default key was used.
    NoChordsForKey { default: Key },
    /// The source's key annotation could not be parsed.
    InvalidKeyHint { hint: String },
    /// The detected tonic accounts for few of the chords.
    LowKeyConfidence { key: Key, confidence: f64 },
    /// A chord symbol was only understood by falling back to defaults.
    UnrecognizedChordSymbol { symbol: String },
    /// The source tempo matched the placeholder value and was ignored.
    PlaceholderTempo { bpm: f64 },
    /// Progression summarization failed; the project has no progressions.
    ProgressionsSkipped { reason: String },
}

impl InferenceWarning {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            InferenceWarning::NoChordsForKey { .. } => "W_KEY_001",
            InferenceWarning::InvalidKeyHint { .. } => "W_KEY_002",
            InferenceWarning::LowKeyConfidence { .. } => "W_KEY_003",
            InferenceWarning::UnrecognizedChordSymbol { .. } => "W_CHORD_001",
            InferenceWarning::PlaceholderTempo { .. } => "W_TEMPO_001",
            InferenceWarning::ProgressionsSkipped { .. } => "W_PROG_001",
        }
    }
}

impl std::fmt::Display for InferenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceWarning::NoChordsForKey { default } => {
                write!(f, "no chords to detect a key from; using {}", default)
            }
            InferenceWarning::InvalidKeyHint { hint } => {
                write!(f, "ignoring unparseable key annotation '{}'", hint)
            }
            InferenceWarning::LowKeyConfidence { key, confidence } => write!(
                f,
                "detected key {} from only {:.0}% of chords",
                key,
                confidence * 100.0
            ),
            InferenceWarning::UnrecognizedChordSymbol { symbol } => {
                write!(f, "chord symbol '{}' was only partly understood", symbol)
            }
            InferenceWarning::PlaceholderTempo { bpm } => {
                write!(f, "tempo {} looks like a placeholder and was ignored", bpm)
            }
            InferenceWarning::ProgressionsSkipped { reason } => {
                write!(f, "progressions were not summarized: {}", reason)
            }
        }
    }
}
