//! Songsmith Import Library
//!
//! Converts MIR annotation datasets into Songsmith projects and back.
//!
//! The pipeline runs in four steps:
//!
//! 1. [`detect::detect_format`] classifies a JSON document by shape.
//! 2. [`importers::import_bundle`] translates it into an
//!    [`bundle::AnnotationBundle`] of timed segments and chord events.
//! 3. [`convert::convert_bundle`] aligns chords to sections and infers
//!    tempo, key and harmonic analysis.
//! 4. [`progressions::summarize_progressions`] groups repeated chord cycles.
//!
//! [`export::export_jams`] renders a project back to JAMS.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use songsmith_import::{import_and_convert, ImportConfig};
//!
//! let doc = json!({
//!     "bpm": 100,
//!     "segments": [
//!         {"sectionType": "Verse", "start_ms": 0, "duration_ms": 9600, "chords": ["C", "G"]}
//!     ]
//! });
//! let outcome = import_and_convert(&doc, &ImportConfig::default()).unwrap();
//! assert_eq!(outcome.project.sections().len(), 1);
//! assert_eq!(outcome.project.metadata.key, "C major");
//! ```

pub mod bundle;
pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod export;
pub mod ids;
pub mod importers;
pub mod progressions;

pub use bundle::{AnnotationBundle, BundleMetadata, ChordEvent, Segment};
pub use config::{ChordOffsetPolicy, ImportConfig};
pub use convert::{convert_bundle, ImportOutcome};
pub use detect::{detect_format, DetectedFormat, FormatTag};
pub use error::{ImportError, InferenceWarning, SummarizeError};
pub use export::export_jams;
pub use importers::import_bundle;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Title used when a source names none.
pub(crate) const UNTITLED: &str = "Untitled";

/// Detect, import and convert a document, stamped with the current time.
pub fn import_and_convert(
    value: &Value,
    config: &ImportConfig,
) -> Result<ImportOutcome, ImportError> {
    import_and_convert_at(value, config, Utc::now())
}

/// [`import_and_convert`] with an explicit conversion time.
pub fn import_and_convert_at(
    value: &Value,
    config: &ImportConfig,
    now: DateTime<Utc>,
) -> Result<ImportOutcome, ImportError> {
    config.validate()?;
    let detected = detect_format(value);
    let bundle = import_bundle(&detected, config)?;
    convert::convert_validated(&bundle, detected.tag(), config, now)
}

/// Parse JSON text and run [`import_and_convert`].
pub fn import_str(json: &str, config: &ImportConfig) -> Result<ImportOutcome, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    import_and_convert(&value, config)
}
