//! Annotation bundle to project conversion.
//!
//! Segments become sections, chord events are assigned to every section they
//! overlap, and tempo and key are inferred with configured fallbacks.
//! Inference never fails the conversion; each fallback taken is recorded as
//! an [`InferenceWarning`].

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, warn};

use songsmith_model::project::{
    bars_from_duration, Harmony, Project, ProjectMetadata, Section, SectionChord, SectionType,
    Structure, TIME_SIGNATURE,
};
use songsmith_model::theory::{detect_key, parse_chord_symbol, Chord, Key};

use crate::bundle::{AnnotationBundle, ChordEvent, Segment};
use crate::config::{ChordOffsetPolicy, ImportConfig};
use crate::detect::FormatTag;
use crate::error::{ImportError, InferenceWarning};
use crate::ids::IdAllocator;
use crate::progressions::summarize_progressions;

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub format: FormatTag,
    pub project: Project,
    pub warnings: Vec<InferenceWarning>,
}

/// A chord event with its parsed chord.
#[derive(Debug, Clone, Copy)]
struct PlacedEvent<'a> {
    event: &'a ChordEvent,
    chord: Chord,
}

/// Build a project from an annotation bundle.
///
/// `now` stamps `created`/`modified` and salts the generated ids, so a fixed
/// clock gives reproducible output. The config is validated first.
pub fn convert_bundle(
    bundle: &AnnotationBundle,
    format: FormatTag,
    config: &ImportConfig,
    now: DateTime<Utc>,
) -> Result<ImportOutcome, ImportError> {
    config.validate()?;
    convert_validated(bundle, format, config, now)
}

/// [`convert_bundle`] for a config the caller has already validated.
pub(crate) fn convert_validated(
    bundle: &AnnotationBundle,
    format: FormatTag,
    config: &ImportConfig,
    now: DateTime<Utc>,
) -> Result<ImportOutcome, ImportError> {
    let default_key = config.default_key()?;
    let mut warnings = bundle.warnings.clone();

    let events = parse_events(&bundle.chord_events, &mut warnings);
    let bpm = bundle
        .metadata
        .tempo
        .or(bundle.tempo_hint)
        .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
        .unwrap_or(config.default_bpm);
    let key = resolve_key(
        bundle.key_hint.as_deref(),
        &events,
        config,
        default_key,
        &mut warnings,
    );

    let timestamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut seed = serde_json::to_vec(bundle)?;
    seed.extend_from_slice(timestamp.as_bytes());
    let mut ids = IdAllocator::new(&seed);
    let project_id = ids.next_id("prj");

    let mut sections = Vec::with_capacity(bundle.segments.len());
    let mut start_bar = 0u32;
    for segment in &bundle.segments {
        let section = build_section(
            segment,
            &events,
            bpm,
            start_bar,
            &key,
            config.chord_offset_policy,
            &mut ids,
        );
        start_bar = start_bar.checked_add(section.bars).ok_or_else(|| {
            ImportError::malformed(
                format,
                "segments",
                format!("bar count overflows at {} bpm", bpm),
            )
        })?;
        sections.push(section);
    }

    let harmony = if config.summarize_progressions {
        match summarize_progressions(&sections, &key, config.max_progressions, &mut ids) {
            Ok(progressions) => Some(Harmony { progressions }),
            Err(e) => {
                warnings.push(InferenceWarning::ProgressionsSkipped {
                    reason: e.to_string(),
                });
                None
            }
        }
    } else {
        None
    };

    let mut tags = vec![bundle.metadata.source.clone()];
    if !tags.iter().any(|t| t == format.as_str()) {
        tags.push(format.as_str().to_string());
    }
    tags.retain(|t| !t.is_empty());

    let project = Project {
        id: project_id,
        metadata: ProjectMetadata {
            title: bundle.metadata.title.clone(),
            artist: bundle.metadata.artist.clone(),
            bpm,
            key: key.to_string(),
            time_signature: TIME_SIGNATURE.to_string(),
            created: timestamp.clone(),
            modified: timestamp,
            tags,
            source: bundle.metadata.source.clone(),
        },
        key,
        structure: Structure { sections },
        harmony,
    };
    debug_assert!(project.validate().is_ok(), "converter produced an invalid project");

    info!(
        format = %format,
        title = %project.metadata.title,
        sections = project.sections().len(),
        chords = events.len(),
        key = %key,
        bpm,
        warnings = warnings.len(),
        "converted annotation bundle"
    );
    for warning in &warnings {
        warn!(code = warning.code(), "{}", warning);
    }

    Ok(ImportOutcome {
        format,
        project,
        warnings,
    })
}

/// Parse every chord event once. Symbols that needed defaults raise one
/// warning per distinct spelling.
fn parse_events<'a>(
    events: &'a [ChordEvent],
    warnings: &mut Vec<InferenceWarning>,
) -> Vec<PlacedEvent<'a>> {
    let mut reported: HashSet<&str> = HashSet::new();
    events
        .iter()
        .filter_map(|event| {
            let parsed = parse_chord_symbol(&event.symbol)?;
            if !parsed.exact && reported.insert(event.symbol.as_str()) {
                warnings.push(InferenceWarning::UnrecognizedChordSymbol {
                    symbol: event.symbol.clone(),
                });
            }
            Some(PlacedEvent {
                event,
                chord: parsed.chord,
            })
        })
        .collect()
}

/// Key from the source hint, else from chord roots, else the default.
fn resolve_key(
    hint: Option<&str>,
    events: &[PlacedEvent<'_>],
    config: &ImportConfig,
    default_key: Key,
    warnings: &mut Vec<InferenceWarning>,
) -> Key {
    if let Some(hint) = hint {
        match Key::parse(hint) {
            Some(key) => {
                debug!(hint, key = %key, "using key annotation");
                return key;
            }
            None => warnings.push(InferenceWarning::InvalidKeyHint {
                hint: hint.to_string(),
            }),
        }
    }

    match detect_key(events.iter().map(|e| (e.chord.root, e.chord.quality))) {
        Some(estimate) => {
            debug!(
                key = %estimate.key,
                confidence = estimate.confidence,
                samples = estimate.sample_count,
                "detected key from chord roots"
            );
            if estimate.confidence < config.key_confidence_threshold {
                warnings.push(InferenceWarning::LowKeyConfidence {
                    key: estimate.key,
                    confidence: estimate.confidence,
                });
            }
            estimate.key
        }
        None => {
            warnings.push(InferenceWarning::NoChordsForKey {
                default: default_key,
            });
            default_key
        }
    }
}

fn build_section(
    segment: &Segment,
    events: &[PlacedEvent<'_>],
    bpm: f64,
    start_bar: u32,
    key: &Key,
    policy: ChordOffsetPolicy,
    ids: &mut IdAllocator,
) -> Section {
    let start = segment.time;
    let end = segment.end();
    let section_type = SectionType::from_label(&segment.label);
    let name = if segment.label.is_empty() {
        section_type.title().to_string()
    } else {
        segment.label.clone()
    };

    let chords = events
        .iter()
        .filter(|e| e.event.overlaps(start, end))
        .map(|e| place_chord(e, start, end, bpm, key, policy))
        .collect();

    Section {
        id: ids.next_id("sec"),
        section_type,
        name,
        bars: bars_from_duration(segment.duration, bpm),
        start_time: start,
        end_time: end,
        start_bar,
        chords,
    }
}

/// Position an event relative to its section, in beats.
fn place_chord(
    placed: &PlacedEvent<'_>,
    section_start: f64,
    section_end: f64,
    bpm: f64,
    key: &Key,
    policy: ChordOffsetPolicy,
) -> SectionChord {
    let beats_per_second = bpm / 60.0;
    let (start, end) = match policy {
        ChordOffsetPolicy::Clip => (
            placed.event.time.max(section_start),
            placed.event.end().min(section_end),
        ),
        ChordOffsetPolicy::Preserve => (placed.event.time, placed.event.end()),
    };
    SectionChord::new(
        placed.chord,
        key,
        (start - section_start) * beats_per_second,
        (end - start) * beats_per_second,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleMetadata;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use songsmith_model::theory::Mode;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn segment(time: f64, duration: f64, label: &str) -> Segment {
        Segment {
            time,
            duration,
            label: label.to_string(),
            confidence: 0.8,
        }
    }

    fn chord(time: f64, duration: f64, symbol: &str) -> ChordEvent {
        ChordEvent {
            time,
            duration,
            symbol: symbol.to_string(),
            confidence: None,
        }
    }

    fn bundle(segments: Vec<Segment>, chord_events: Vec<ChordEvent>) -> AnnotationBundle {
        let mut bundle = AnnotationBundle::new(BundleMetadata {
            title: "Test".to_string(),
            source: "unit".to_string(),
            ..Default::default()
        });
        bundle.segments = segments;
        bundle.chord_events = chord_events;
        bundle
    }

    #[test]
    fn test_sections_have_running_start_bars() {
        let b = bundle(
            vec![segment(0.0, 8.0, "Intro"), segment(8.0, 16.0, "Verse"), segment(24.0, 0.5, "x")],
            vec![],
        );
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        let summary: Vec<(SectionType, u32, u32)> = outcome
            .project
            .sections()
            .iter()
            .map(|s| (s.section_type, s.bars, s.start_bar))
            .collect();
        assert_eq!(
            summary,
            vec![
                (SectionType::Intro, 4, 0),
                (SectionType::Verse, 8, 4),
                (SectionType::Bridge, 1, 12),
            ]
        );
        assert!(outcome.project.validate().is_ok());
        assert_eq!(outcome.project.metadata.tags, vec!["unit", "jams"]);
        assert_eq!(outcome.project.metadata.created, "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_no_chords_falls_back_to_default_key() {
        let b = bundle(vec![segment(0.0, 8.0, "Verse")], vec![]);
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        assert_eq!(outcome.project.key, Key::C_MAJOR);
        assert_eq!(outcome.project.metadata.key, "C major");
        assert!(outcome
            .warnings
            .contains(&InferenceWarning::NoChordsForKey {
                default: Key::C_MAJOR
            }));
    }

    #[test]
    fn test_key_hint_wins_and_bad_hint_warns() {
        let mut b = bundle(
            vec![segment(0.0, 8.0, "Verse")],
            vec![chord(0.0, 4.0, "C"), chord(4.0, 4.0, "C")],
        );
        b.key_hint = Some("A:minor".to_string());
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        assert_eq!(outcome.project.key, Key::new(9, Mode::Minor));
        assert_eq!(outcome.project.sections()[0].chords[0].roman_numeral, "bIII");

        b.key_hint = Some("H lydian".to_string());
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        assert_eq!(outcome.project.key, Key::C_MAJOR);
        assert_eq!(outcome.warnings[0].code(), "W_KEY_002");
    }

    #[test]
    fn test_chord_spanning_boundary_lands_in_both_sections() {
        let b = bundle(
            vec![segment(0.0, 4.0, "Verse"), segment(4.0, 4.0, "Chorus")],
            vec![chord(2.0, 4.0, "G")],
        );
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        let sections = outcome.project.sections();
        assert_eq!(sections[0].chords.len(), 1);
        assert_eq!(sections[1].chords.len(), 1);
        // 120 bpm: two beats per second.
        assert_eq!(sections[0].chords[0].start_beat, 4.0);
        assert_eq!(sections[0].chords[0].duration_beats, 4.0);
        assert_eq!(sections[1].chords[0].start_beat, 0.0);
        assert_eq!(sections[1].chords[0].duration_beats, 4.0);

        let config = ImportConfig {
            chord_offset_policy: ChordOffsetPolicy::Preserve,
            ..Default::default()
        };
        let outcome = convert_bundle(&b, FormatTag::Jams, &config, now()).unwrap();
        let chorus_chord = &outcome.project.sections()[1].chords[0];
        assert_eq!(chorus_chord.start_beat, -4.0);
        assert_eq!(chorus_chord.duration_beats, 8.0);
    }

    #[test]
    fn test_inexact_symbols_warn_once() {
        let b = bundle(
            vec![segment(0.0, 8.0, "Verse")],
            vec![chord(0.0, 2.0, "Cwhatever"), chord(2.0, 2.0, "Cwhatever"), chord(4.0, 4.0, "G")],
        );
        let outcome =
            convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap();
        let chord_warnings = outcome
            .warnings
            .iter()
            .filter(|w| matches!(w, InferenceWarning::UnrecognizedChordSymbol { .. }))
            .count();
        assert_eq!(chord_warnings, 1);
    }

    #[test]
    fn test_ids_are_stable_for_a_fixed_clock() {
        let b = bundle(vec![segment(0.0, 8.0, "Verse")], vec![chord(0.0, 8.0, "C")]);
        let config = ImportConfig::default();
        let first = convert_bundle(&b, FormatTag::Jams, &config, now()).unwrap();
        let second = convert_bundle(&b, FormatTag::Jams, &config, now()).unwrap();
        assert_eq!(first.project.id, second.project.id);

        let later = convert_bundle(&b, FormatTag::Jams, &config, now() + chrono::Duration::seconds(1))
            .unwrap();
        assert_ne!(first.project.id, later.project.id);
    }

    #[test]
    fn test_progression_overflow_becomes_warning() {
        let b = bundle(
            vec![segment(0.0, 4.0, "Verse"), segment(4.0, 4.0, "Chorus")],
            vec![chord(0.0, 4.0, "C"), chord(4.0, 4.0, "G")],
        );
        let config = ImportConfig {
            max_progressions: 1,
            ..Default::default()
        };
        let outcome = convert_bundle(&b, FormatTag::Jams, &config, now()).unwrap();
        assert!(outcome.project.harmony.is_none());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.code() == "W_PROG_001"));
    }

    #[test]
    fn test_bar_count_overflow_is_malformed_data() {
        let mut b = bundle(
            vec![segment(0.0, 80_000.0, "Verse"), segment(80_000.0, 6_000.0, "Chorus")],
            vec![],
        );
        b.metadata.tempo = Some(1e9);
        let err = convert_bundle(&b, FormatTag::Jams, &ImportConfig::default(), now()).unwrap_err();
        assert_eq!(err.code(), "IMPORT_003");
    }

    #[test]
    fn test_convert_bundle_validates_config() {
        let b = bundle(vec![segment(0.0, 8.0, "Verse")], vec![]);
        let config = ImportConfig {
            default_bpm: 0.0,
            ..Default::default()
        };
        let err = convert_bundle(&b, FormatTag::Jams, &config, now()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidConfig { .. }));
    }
}
