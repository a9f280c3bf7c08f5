//! McGill-Billboard segment-list importer.
//!
//! Each entry carries `sectionType`, `start_ms`, `duration_ms` (or `end_ms`)
//! and an untimed `chords` list, which is spread evenly over the segment.

use serde_json::Value;
use tracing::debug;

use super::{authored_tempo, non_empty_str, number};
use crate::bundle::{distribute_chords, AnnotationBundle, BundleMetadata, Segment};
use crate::config::ImportConfig;
use crate::detect::{FormatTag, SegmentList};
use crate::error::ImportError;

const FORMAT: FormatTag = FormatTag::McgillBillboard;

/// Confidence for segments tagged as uncertain.
const LOW_CONFIDENCE: f64 = 0.5;

/// Confidence for segments tagged as checked by hand.
const HIGH_CONFIDENCE: f64 = 1.0;

const LABEL_KEYS: &[&str] = &["sectionType", "section_type", "label"];

fn ms_to_seconds(ms: f64) -> f64 {
    ms / 1000.0
}

pub(super) fn import(
    list: &SegmentList<'_>,
    config: &ImportConfig,
) -> Result<AnnotationBundle, ImportError> {
    let mut warnings = Vec::new();
    let bpm = match list.field("bpm") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            number(value)
                .ok_or_else(|| ImportError::malformed(FORMAT, "bpm", "bpm must be a number"))?,
        ),
    };
    let tempo = authored_tempo(bpm, config, &mut warnings);

    let mut bundle = AnnotationBundle::new(BundleMetadata {
        title: non_empty_str(list.field("title"))
            .unwrap_or(crate::UNTITLED)
            .to_string(),
        artist: non_empty_str(list.field("artist")).map(str::to_string),
        duration: list
            .field("duration_ms")
            .and_then(number)
            .filter(|ms| *ms > 0.0)
            .map(ms_to_seconds),
        tempo,
        source: non_empty_str(list.field("source"))
            .unwrap_or(FORMAT.as_str())
            .to_string(),
    });
    bundle.key_hint = non_empty_str(list.field("key")).map(str::to_string);
    bundle.warnings = warnings;

    for (index, entry) in list.segments.iter().enumerate() {
        let path = format!("segments[{}]", index);
        let Some(entry) = entry.as_object() else {
            debug!(path = %path, "skipping non-object segment");
            continue;
        };
        let Some(start_ms) = entry.get("start_ms").and_then(number) else {
            debug!(path = %path, "skipping segment without start_ms");
            continue;
        };
        let duration_ms = entry.get("duration_ms").and_then(number).or_else(|| {
            entry
                .get("end_ms")
                .and_then(number)
                .map(|end_ms| end_ms - start_ms)
        });
        let Some(duration_ms) = duration_ms else {
            debug!(path = %path, "skipping segment without duration_ms or end_ms");
            continue;
        };

        let time = ms_to_seconds(start_ms);
        let duration = ms_to_seconds(duration_ms);
        let label = LABEL_KEYS
            .iter()
            .find_map(|key| non_empty_str(entry.get(*key)))
            .unwrap_or("")
            .to_string();
        let confidence = tag_confidence(entry.get("tags"), config.default_segment_confidence);
        let symbols = chord_list(entry.get("chords"), &path)?;

        bundle
            .chord_events
            .extend(distribute_chords(time, duration, &symbols));
        bundle.segments.push(Segment {
            time,
            duration,
            label,
            confidence,
        });
    }

    Ok(bundle)
}

/// Chord symbols of one segment. Non-string entries become empty symbols so
/// they still take a slot.
fn chord_list(value: Option<&Value>, path: &str) -> Result<Vec<String>, ImportError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .map(|item| item.as_str().unwrap_or("").to_string())
            .collect()),
        Some(_) => Err(ImportError::malformed(
            FORMAT,
            format!("{}.chords", path),
            "chords must be an array of symbols",
        )),
    }
}

/// Segment confidence from annotator tags; an uncertainty tag wins.
fn tag_confidence(tags: Option<&Value>, default: f64) -> f64 {
    let Some(tags) = tags.and_then(Value::as_array) else {
        return default;
    };
    let mut confidence = default;
    for tag in tags.iter().filter_map(Value::as_str) {
        match tag.trim().to_ascii_lowercase().as_str() {
            "uncertain" | "ambiguous" | "estimated" => return LOW_CONFIDENCE,
            "verified" | "confirmed" | "manual" => confidence = HIGH_CONFIDENCE,
            _ => {}
        }
    }
    confidence
}
