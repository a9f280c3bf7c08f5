//! Per-format translators into the [`AnnotationBundle`].

mod jams;
mod mcgill;

#[cfg(test)]
mod tests;

use serde_json::Value;
use tracing::debug;

use crate::bundle::AnnotationBundle;
use crate::config::ImportConfig;
use crate::detect::{DetectedFormat, FormatTag};
use crate::error::{ImportError, InferenceWarning};

/// Run the importer matching a detected format.
///
/// SALAMI is recognized but has no importer and fails with
/// [`ImportError::UnsupportedFormat`]; unknown documents fail with
/// [`ImportError::UnknownFormat`].
pub fn import_bundle(
    detected: &DetectedFormat<'_>,
    config: &ImportConfig,
) -> Result<AnnotationBundle, ImportError> {
    let mut bundle = match detected {
        DetectedFormat::Jams(doc) => jams::import(doc, config)?,
        DetectedFormat::McgillBillboard(list) => mcgill::import(list, config)?,
        DetectedFormat::Salami(_) => {
            return Err(ImportError::UnsupportedFormat {
                format: FormatTag::Salami,
            })
        }
        DetectedFormat::Unknown => return Err(ImportError::UnknownFormat),
    };
    bundle.normalize();
    debug!(
        format = %detected.tag(),
        segments = bundle.segments.len(),
        chords = bundle.chord_events.len(),
        "imported annotation bundle"
    );
    Ok(bundle)
}

/// A number, or a string holding one.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// A confidence in `0..=1`, or `default`.
pub(crate) fn confidence_or(value: Option<&Value>, default: f64) -> f64 {
    value
        .and_then(number)
        .filter(|c| (0.0..=1.0).contains(c))
        .unwrap_or(default)
}

/// A non-empty trimmed string.
pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Keep an authored tempo unless it equals the configured placeholder.
pub(crate) fn authored_tempo(
    bpm: Option<f64>,
    config: &ImportConfig,
    warnings: &mut Vec<InferenceWarning>,
) -> Option<f64> {
    let bpm = bpm.filter(|b| *b > 0.0)?;
    if config.is_placeholder_tempo(bpm) {
        debug!(bpm, "treating placeholder tempo as absent");
        warnings.push(InferenceWarning::PlaceholderTempo { bpm });
        return None;
    }
    Some(bpm)
}
