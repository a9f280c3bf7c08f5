//! JAMS importer.
//!
//! Reads `file_metadata` plus the first non-empty segment and chord
//! annotations, and the first key and tempo annotations. Observations may be
//! a list of `{time, duration, value, confidence}` records or a columnar
//! object of parallel arrays.

use serde_json::{Map, Value};
use tracing::debug;

use super::{confidence_or, non_empty_str, number};
use crate::bundle::{AnnotationBundle, BundleMetadata, ChordEvent, Segment};
use crate::config::ImportConfig;
use crate::detect::{FormatTag, JamsDocument};
use crate::error::ImportError;

const FORMAT: FormatTag = FormatTag::Jams;

static NULL: Value = Value::Null;

/// Annotation families the importer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Segment,
    Chord,
    Key,
    Tempo,
    Other,
}

fn classify_namespace(namespace: &str) -> Namespace {
    let namespace = namespace.trim().to_ascii_lowercase();
    if namespace.starts_with("segment") || namespace == "multi_segment" {
        Namespace::Segment
    } else if namespace.starts_with("chord") {
        Namespace::Chord
    } else if namespace.starts_with("key") {
        Namespace::Key
    } else if namespace == "tempo" {
        Namespace::Tempo
    } else {
        Namespace::Other
    }
}

/// One `{time, duration, value, confidence}` record.
#[derive(Debug)]
struct Observation<'a> {
    time: Option<f64>,
    duration: Option<f64>,
    value: &'a Value,
    confidence: Option<&'a Value>,
}

/// Plain numbers, or JAMS 0.1 style `{"value": n}` wrappers.
fn time_value(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    number(value).or_else(|| value.get("value").and_then(number))
}

pub(super) fn import(
    doc: &JamsDocument<'_>,
    config: &ImportConfig,
) -> Result<AnnotationBundle, ImportError> {
    let meta = doc.file_metadata;
    let mut bundle = AnnotationBundle::new(BundleMetadata {
        title: non_empty_str(meta.get("title"))
            .unwrap_or(crate::UNTITLED)
            .to_string(),
        artist: non_empty_str(meta.get("artist")).map(str::to_string),
        duration: meta
            .get("duration")
            .and_then(number)
            .filter(|d| *d > 0.0),
        tempo: None,
        source: String::new(),
    });

    let mut source: Option<String> = None;
    let mut have_segments = false;
    let mut have_chords = false;

    for (index, annotation) in doc.annotations.iter().enumerate() {
        let path = format!("annotations[{}]", index);
        let annotation = annotation
            .as_object()
            .ok_or_else(|| ImportError::malformed(FORMAT, &path, "annotation must be an object"))?;
        let namespace = annotation
            .get("namespace")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ImportError::malformed(
                    FORMAT,
                    format!("{}.namespace", path),
                    "namespace must be a string",
                )
            })?;
        let observations = observations(annotation.get("data"), &path)?;

        if source.is_none() {
            source = provenance(annotation);
        }

        match classify_namespace(namespace) {
            Namespace::Segment if !have_segments => {
                let segments = segments_from(&observations, config);
                if !segments.is_empty() {
                    bundle.segments = segments;
                    have_segments = true;
                }
            }
            Namespace::Chord if !have_chords => {
                let events = chords_from(&observations);
                if !events.is_empty() {
                    bundle.chord_events = events;
                    have_chords = true;
                }
            }
            Namespace::Key if bundle.key_hint.is_none() => {
                bundle.key_hint = observations
                    .iter()
                    .find_map(|o| o.value.as_str())
                    .map(|s| s.trim().to_string());
            }
            Namespace::Tempo if bundle.tempo_hint.is_none() => {
                bundle.tempo_hint = observations
                    .iter()
                    .find_map(|o| number(o.value))
                    .filter(|bpm| *bpm > 0.0);
            }
            _ => debug!(namespace, "skipping annotation"),
        }
    }

    bundle.metadata.source = source.unwrap_or_else(|| FORMAT.as_str().to_string());
    Ok(bundle)
}

fn observations<'a>(
    data: Option<&'a Value>,
    path: &str,
) -> Result<Vec<Observation<'a>>, ImportError> {
    match data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records
            .iter()
            .filter_map(|record| {
                let Some(record) = record.as_object() else {
                    debug!(path, "skipping non-object observation");
                    return None;
                };
                Some(Observation {
                    time: time_value(record.get("time")),
                    duration: time_value(record.get("duration")),
                    value: record.get("value").unwrap_or(&NULL),
                    confidence: record.get("confidence"),
                })
            })
            .collect()),
        Some(Value::Object(columns)) => columnar_observations(columns, path),
        Some(_) => Err(ImportError::malformed(
            FORMAT,
            format!("{}.data", path),
            "data must be a list of observations or an object of columns",
        )),
    }
}

fn columnar_observations<'a>(
    columns: &'a Map<String, Value>,
    path: &str,
) -> Result<Vec<Observation<'a>>, ImportError> {
    let column = |name: &str| columns.get(name).and_then(Value::as_array);
    let times = column("time").ok_or_else(|| {
        ImportError::malformed(
            FORMAT,
            format!("{}.data.time", path),
            "columnar data needs a time array",
        )
    })?;
    let durations = column("duration");
    let values = column("value");
    let confidences = column("confidence");

    Ok(times
        .iter()
        .enumerate()
        .map(|(i, time)| Observation {
            time: time_value(Some(time)),
            duration: time_value(durations.and_then(|d| d.get(i))),
            value: values.and_then(|v| v.get(i)).unwrap_or(&NULL),
            confidence: confidences.and_then(|c| c.get(i)),
        })
        .collect())
}

fn provenance(annotation: &Map<String, Value>) -> Option<String> {
    let meta = annotation.get("annotation_metadata")?;
    non_empty_str(meta.get("corpus"))
        .or_else(|| non_empty_str(meta.get("data_source")))
        .map(str::to_string)
}

fn segment_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(o) => non_empty_str(o.get("label")).unwrap_or("").to_string(),
        _ => String::new(),
    }
}

fn segments_from(observations: &[Observation<'_>], config: &ImportConfig) -> Vec<Segment> {
    observations
        .iter()
        .filter_map(|o| {
            let (Some(time), Some(duration)) = (o.time, o.duration) else {
                debug!("skipping segment observation without time or duration");
                return None;
            };
            Some(Segment {
                time,
                duration,
                label: segment_label(o.value),
                confidence: confidence_or(o.confidence, config.default_segment_confidence),
            })
        })
        .collect()
}

fn chords_from(observations: &[Observation<'_>]) -> Vec<ChordEvent> {
    observations
        .iter()
        .filter_map(|o| {
            let (Some(time), Some(duration)) = (o.time, o.duration) else {
                debug!("skipping chord observation without time or duration");
                return None;
            };
            let symbol = o.value.as_str()?;
            Some(ChordEvent {
                time,
                duration,
                symbol: symbol.trim().to_string(),
                confidence: o
                    .confidence
                    .and_then(number)
                    .filter(|c| (0.0..=1.0).contains(c)),
            })
        })
        .collect()
}
