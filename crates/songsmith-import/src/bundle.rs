//! Format-agnostic annotation bundle produced by every importer.
//!
//! Bundles are transient: built by one importer and consumed by the
//! converter within a single import.

use serde::Serialize;
use tracing::debug;

use songsmith_model::theory::is_no_chord;

use crate::error::InferenceWarning;

/// Gaps and overlaps shorter than this are treated as zero.
const TIME_EPSILON: f64 = 1e-9;

/// Latest end time accepted for a segment or chord event, in seconds (24 hours).
pub const MAX_TIME_SECONDS: f64 = 86_400.0;

fn usable_timing(time: f64, duration: f64) -> bool {
    time.is_finite()
        && time >= 0.0
        && duration.is_finite()
        && duration > 0.0
        && time + duration <= MAX_TIME_SECONDS
}

/// Descriptive metadata carried from the source.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BundleMetadata {
    pub title: String,
    pub artist: Option<String>,
    /// Total duration in seconds.
    pub duration: Option<f64>,
    /// Authored global tempo in bpm.
    pub tempo: Option<f64>,
    /// Provenance tag (dataset or corpus name).
    pub source: String,
}

/// A time-bounded structural region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub time: f64,
    pub duration: f64,
    pub label: String,
    pub confidence: f64,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.time + self.duration
    }
}

/// A globally timed chord occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordEvent {
    pub time: f64,
    pub duration: f64,
    pub symbol: String,
    pub confidence: Option<f64>,
}

impl ChordEvent {
    pub fn end(&self) -> f64 {
        self.time + self.duration
    }

    /// Half-open overlap with `[start, end)`.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.end() > start && self.time < end
    }
}

/// Segments, chord events and hints extracted from one source document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnnotationBundle {
    pub metadata: BundleMetadata,
    pub segments: Vec<Segment>,
    pub chord_events: Vec<ChordEvent>,
    /// Key annotation as written by the source, e.g. `"A:minor"`.
    pub key_hint: Option<String>,
    /// Low-confidence tempo estimate in bpm.
    pub tempo_hint: Option<f64>,
    /// Problems noticed while importing, passed through to the outcome.
    #[serde(skip)]
    pub warnings: Vec<InferenceWarning>,
}

impl AnnotationBundle {
    pub fn new(metadata: BundleMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Establish the ordering guarantees the converter relies on.
    ///
    /// Segments become sorted, non-overlapping and non-empty; chord events
    /// become sorted with no-chord markers and unusable timings removed.
    pub fn normalize(&mut self) {
        self.segments = normalize_segments(std::mem::take(&mut self.segments));
        self.chord_events = normalize_chord_events(std::mem::take(&mut self.chord_events));
    }

    /// Source duration, or the end of the last segment.
    pub fn duration(&self) -> f64 {
        self.metadata
            .duration
            .or_else(|| self.segments.last().map(Segment::end))
            .unwrap_or(0.0)
    }
}

/// Sort segments by start time, clip each against the end of the previous
/// one, and drop entries with unusable timing.
pub fn normalize_segments(segments: Vec<Segment>) -> Vec<Segment> {
    let mut valid: Vec<Segment> = segments
        .into_iter()
        .filter(|s| {
            let ok = usable_timing(s.time, s.duration);
            if !ok {
                debug!(label = %s.label, time = s.time, duration = s.duration, "skipping segment with unusable timing");
            }
            ok
        })
        .collect();
    valid.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut out: Vec<Segment> = Vec::with_capacity(valid.len());
    for mut segment in valid {
        if !segment.confidence.is_finite() {
            segment.confidence = 0.0;
        }
        segment.confidence = segment.confidence.clamp(0.0, 1.0);

        if let Some(prev) = out.last() {
            let prev_end = prev.end();
            if segment.time < prev_end {
                let end = segment.end();
                segment.time = prev_end;
                segment.duration = end - prev_end;
                if segment.duration <= TIME_EPSILON {
                    debug!(label = %segment.label, "dropping segment fully covered by its predecessor");
                    continue;
                }
            }
        }
        out.push(segment);
    }
    out
}

/// Sort chord events by time and drop no-chord markers and bad timings.
pub fn normalize_chord_events(events: Vec<ChordEvent>) -> Vec<ChordEvent> {
    let mut out: Vec<ChordEvent> = events
        .into_iter()
        .filter(|e| usable_timing(e.time, e.duration) && !is_no_chord(&e.symbol))
        .map(|mut e| {
            e.confidence = e.confidence.filter(|c| c.is_finite()).map(|c| c.clamp(0.0, 1.0));
            e
        })
        .collect();
    out.sort_by(|a, b| a.time.total_cmp(&b.time));
    out
}

/// Split `[start, start + duration)` into equal slots, one per symbol.
///
/// Sources that list chords per segment without timing get this uniform
/// placement; it is not an attempt at recovering real timing. Every symbol
/// takes a slot, so no-chord markers still consume time before being
/// filtered by [`normalize_chord_events`].
pub fn distribute_chords(start: f64, duration: f64, symbols: &[String]) -> Vec<ChordEvent> {
    if symbols.is_empty() || !(duration > 0.0) {
        return Vec::new();
    }
    let slot = duration / symbols.len() as f64;
    symbols
        .iter()
        .enumerate()
        .map(|(i, symbol)| ChordEvent {
            time: start + slot * i as f64,
            duration: slot,
            symbol: symbol.trim().to_string(),
            confidence: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(time: f64, duration: f64, label: &str) -> Segment {
        Segment {
            time,
            duration,
            label: label.to_string(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_normalize_segments_sorts_and_clips() {
        let segments = vec![
            seg(10.0, 5.0, "b"),
            seg(0.0, 12.0, "a"),
            seg(12.0, 2.0, "covered"),
            seg(f64::NAN, 1.0, "nan"),
            seg(20.0, 0.0, "empty"),
            seg(-1.0, 3.0, "negative"),
        ];
        let out = normalize_segments(segments);
        let summary: Vec<(f64, f64, &str)> = out
            .iter()
            .map(|s| (s.time, s.duration, s.label.as_str()))
            .collect();
        assert_eq!(summary, vec![(0.0, 12.0, "a"), (12.0, 3.0, "b")]);
    }

    #[test]
    fn test_normalize_drops_timings_past_limit() {
        let segments = vec![
            seg(0.0, 60.0, "a"),
            seg(60.0, 1e12, "huge"),
            seg(MAX_TIME_SECONDS - 1.0, 1.0, "last"),
        ];
        let labels: Vec<String> = normalize_segments(segments)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["a", "last"]);

        let events = vec![ChordEvent {
            time: 0.0,
            duration: f64::MAX,
            symbol: "C".to_string(),
            confidence: None,
        }];
        assert!(normalize_chord_events(events).is_empty());
    }

    #[test]
    fn test_normalize_segments_clamps_confidence() {
        let mut s = seg(0.0, 1.0, "a");
        s.confidence = 3.0;
        let out = normalize_segments(vec![s]);
        assert_eq!(out[0].confidence, 1.0);
    }

    #[test]
    fn test_distribute_chords_equal_slots() {
        let symbols = vec!["C".to_string(), "N".to_string(), "G".to_string(), "F".to_string()];
        let events = distribute_chords(8.0, 8.0, &symbols);
        let times: Vec<(f64, f64)> = events.iter().map(|e| (e.time, e.duration)).collect();
        assert_eq!(times, vec![(8.0, 2.0), (10.0, 2.0), (12.0, 2.0), (14.0, 2.0)]);

        let kept = normalize_chord_events(events);
        let symbols: Vec<&str> = kept.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "G", "F"]);
        assert_eq!(kept[1].time, 12.0);
    }

    #[test]
    fn test_distribute_chords_empty_inputs() {
        assert!(distribute_chords(0.0, 4.0, &[]).is_empty());
        assert!(distribute_chords(0.0, 0.0, &["C".to_string()]).is_empty());
    }

    #[test]
    fn test_chord_event_overlap_is_half_open() {
        let event = ChordEvent {
            time: 2.0,
            duration: 2.0,
            symbol: "C".to_string(),
            confidence: None,
        };
        assert!(event.overlaps(3.0, 10.0));
        assert!(event.overlaps(0.0, 2.5));
        assert!(!event.overlaps(4.0, 8.0));
        assert!(!event.overlaps(0.0, 2.0));
    }
}
