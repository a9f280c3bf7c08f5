//! Tests for the per-format importers.

use super::*;
use crate::detect::detect_format;
use pretty_assertions::assert_eq;
use serde_json::json;

fn import(doc: &Value) -> Result<AnnotationBundle, ImportError> {
    import_bundle(&detect_format(doc), &ImportConfig::default())
}

fn segment_summary(bundle: &AnnotationBundle) -> Vec<(f64, f64, &str)> {
    bundle
        .segments
        .iter()
        .map(|s| (s.time, s.duration, s.label.as_str()))
        .collect()
}

fn chord_summary(bundle: &AnnotationBundle) -> Vec<(f64, f64, &str)> {
    bundle
        .chord_events
        .iter()
        .map(|e| (e.time, e.duration, e.symbol.as_str()))
        .collect()
}

// ========================================================================
// JAMS
// ========================================================================

#[test]
fn test_jams_observation_list() {
    let doc = json!({
        "file_metadata": {"title": "Let It Be", "artist": "The Beatles", "duration": 243.0},
        "annotations": [
            {
                "namespace": "segment_open",
                "annotation_metadata": {"corpus": "isophonics"},
                "data": [
                    {"time": 0.0, "duration": 8.0, "value": "intro", "confidence": null},
                    {"time": 8.0, "duration": 16.0, "value": "verse", "confidence": 0.6}
                ]
            },
            {
                "namespace": "chord",
                "data": [
                    {"time": 0.0, "duration": 4.0, "value": "C:maj", "confidence": 1.0},
                    {"time": 4.0, "duration": 4.0, "value": "N", "confidence": 1.0},
                    {"time": 8.0, "duration": 4.0, "value": "G:maj"}
                ]
            },
            {"namespace": "key_mode", "data": [{"time": 0.0, "duration": 243.0, "value": "C:major"}]},
            {"namespace": "tempo", "data": [{"time": 0.0, "duration": 243.0, "value": 72.5}]}
        ]
    });
    let bundle = import(&doc).unwrap();

    assert_eq!(bundle.metadata.title, "Let It Be");
    assert_eq!(bundle.metadata.artist.as_deref(), Some("The Beatles"));
    assert_eq!(bundle.metadata.duration, Some(243.0));
    assert_eq!(bundle.metadata.source, "isophonics");
    assert_eq!(
        segment_summary(&bundle),
        vec![(0.0, 8.0, "intro"), (8.0, 16.0, "verse")]
    );
    assert_eq!(bundle.segments[0].confidence, 0.8);
    assert_eq!(bundle.segments[1].confidence, 0.6);
    assert_eq!(
        chord_summary(&bundle),
        vec![(0.0, 4.0, "C:maj"), (8.0, 4.0, "G:maj")]
    );
    assert_eq!(bundle.key_hint.as_deref(), Some("C:major"));
    assert_eq!(bundle.tempo_hint, Some(72.5));
    assert_eq!(bundle.metadata.tempo, None);
}

#[test]
fn test_jams_columnar_data() {
    let doc = json!({
        "file_metadata": {},
        "annotations": [{
            "namespace": "chord_harte",
            "annotation_metadata": {"data_source": "billboard"},
            "data": {
                "time": [2.0, 0.0],
                "duration": [2.0, 2.0],
                "value": ["G:7", "C:maj7"],
                "confidence": [0.9, 2.0]
            }
        }]
    });
    let bundle = import(&doc).unwrap();
    assert_eq!(bundle.metadata.title, "Untitled");
    assert_eq!(bundle.metadata.source, "billboard");
    assert_eq!(
        chord_summary(&bundle),
        vec![(0.0, 2.0, "C:maj7"), (2.0, 2.0, "G:7")]
    );
    assert_eq!(bundle.chord_events[0].confidence, None);
    assert_eq!(bundle.chord_events[1].confidence, Some(0.9));
}

#[test]
fn test_jams_first_non_empty_segment_annotation_wins() {
    let doc = json!({
        "file_metadata": {},
        "annotations": [
            {"namespace": "segment_salami_upper", "data": []},
            {"namespace": "segment_salami_function", "data": [
                {"time": 0.0, "duration": 5.0, "value": "chorus"}
            ]},
            {"namespace": "segment_open", "data": [
                {"time": 0.0, "duration": 5.0, "value": "ignored"}
            ]}
        ]
    });
    let bundle = import(&doc).unwrap();
    assert_eq!(segment_summary(&bundle), vec![(0.0, 5.0, "chorus")]);
    assert_eq!(bundle.metadata.source, "jams");
}

#[test]
fn test_jams_legacy_time_objects_and_multi_segment_values() {
    let doc = json!({
        "file_metadata": {},
        "annotations": [{
            "namespace": "multi_segment",
            "data": [
                {"time": {"value": 1.5}, "duration": {"value": 2.5}, "value": {"label": "bridge", "level": 0}}
            ]
        }]
    });
    let bundle = import(&doc).unwrap();
    assert_eq!(segment_summary(&bundle), vec![(1.5, 2.5, "bridge")]);
}

#[test]
fn test_jams_malformed_annotations() {
    let not_object = json!({"file_metadata": {}, "annotations": [42]});
    match import(&not_object) {
        Err(ImportError::MalformedData { format, path, .. }) => {
            assert_eq!(format, FormatTag::Jams);
            assert_eq!(path, "annotations[0]");
        }
        other => panic!("expected malformed data, got {:?}", other),
    }

    let no_namespace = json!({"file_metadata": {}, "annotations": [{"data": []}]});
    assert!(matches!(
        import(&no_namespace),
        Err(ImportError::MalformedData { ref path, .. }) if path == "annotations[0].namespace"
    ));

    let bad_data = json!({
        "file_metadata": {},
        "annotations": [{"namespace": "chord", "data": "C G"}]
    });
    assert!(matches!(
        import(&bad_data),
        Err(ImportError::MalformedData { ref path, .. }) if path == "annotations[0].data"
    ));
}

#[test]
fn test_jams_skips_unusable_observations() {
    let doc = json!({
        "file_metadata": {},
        "annotations": [{
            "namespace": "segment_open",
            "data": [
                "not an observation",
                {"time": 0.0, "value": "no duration"},
                {"time": 3.0, "duration": -1.0, "value": "negative"},
                {"time": 0.0, "duration": 2.0, "value": "kept"}
            ]
        }]
    });
    let bundle = import(&doc).unwrap();
    assert_eq!(segment_summary(&bundle), vec![(0.0, 2.0, "kept")]);
}

// ========================================================================
// McGill-Billboard
// ========================================================================

#[test]
fn test_mcgill_segments_and_chords() {
    let doc = json!({
        "title": "Some Song",
        "bpm": 96,
        "key": "G major",
        "segments": [
            {"sectionType": "Verse", "start_ms": 0, "duration_ms": 8000, "chords": ["G", "N", "C", "D"]},
            {"sectionType": "Chorus", "start_ms": 8000, "end_ms": 12000, "chords": ["Em", "C"], "tags": ["verified"]}
        ]
    });
    let bundle = import(&doc).unwrap();

    assert_eq!(bundle.metadata.title, "Some Song");
    assert_eq!(bundle.metadata.source, "mcgill-billboard");
    assert_eq!(bundle.metadata.tempo, Some(96.0));
    assert_eq!(bundle.key_hint.as_deref(), Some("G major"));
    assert_eq!(
        segment_summary(&bundle),
        vec![(0.0, 8.0, "Verse"), (8.0, 4.0, "Chorus")]
    );
    assert_eq!(bundle.segments[0].confidence, 0.8);
    assert_eq!(bundle.segments[1].confidence, 1.0);
    assert_eq!(
        chord_summary(&bundle),
        vec![
            (0.0, 2.0, "G"),
            (4.0, 2.0, "C"),
            (6.0, 2.0, "D"),
            (8.0, 2.0, "Em"),
            (10.0, 2.0, "C"),
        ]
    );
}

#[test]
fn test_mcgill_bare_array_and_tags() {
    let doc = json!([
        {"section_type": "intro", "start_ms": 0, "duration_ms": 1000, "tags": ["verified", "uncertain"]},
        {"label": "outro", "start_ms": 1000, "duration_ms": 1000},
        {"sectionType": "missing timing"},
        "junk"
    ]);
    let bundle = import(&doc).unwrap();
    assert_eq!(
        segment_summary(&bundle),
        vec![(0.0, 1.0, "intro"), (1.0, 1.0, "outro")]
    );
    assert_eq!(bundle.segments[0].confidence, 0.5);
    assert_eq!(bundle.metadata.title, "Untitled");
}

#[test]
fn test_mcgill_placeholder_tempo_is_dropped() {
    let doc = json!({"bpm": "120", "segments": [{"start_ms": 0, "duration_ms": 1000}]});
    let bundle = import(&doc).unwrap();
    assert_eq!(bundle.metadata.tempo, None);
    assert_eq!(
        bundle.warnings,
        vec![InferenceWarning::PlaceholderTempo { bpm: 120.0 }]
    );

    let config = ImportConfig {
        placeholder_tempo: None,
        ..Default::default()
    };
    let bundle = import_bundle(&detect_format(&doc), &config).unwrap();
    assert_eq!(bundle.metadata.tempo, Some(120.0));
    assert!(bundle.warnings.is_empty());
}

#[test]
fn test_mcgill_malformed_fields() {
    let bad_bpm = json!({"bpm": "fast", "segments": [{"start_ms": 0, "duration_ms": 1000}]});
    assert!(matches!(
        import(&bad_bpm),
        Err(ImportError::MalformedData { ref path, .. }) if path == "bpm"
    ));

    let bad_chords = json!({"segments": [
        {"start_ms": 0, "duration_ms": 1000, "chords": []},
        {"start_ms": 1000, "duration_ms": 1000, "chords": "C G"}
    ]});
    assert!(matches!(
        import(&bad_chords),
        Err(ImportError::MalformedData { ref path, .. }) if path == "segments[1].chords"
    ));
}

// ========================================================================
// Dispatch
// ========================================================================

#[test]
fn test_salami_and_unknown_are_rejected() {
    let salami = json!({
        "source": "SALAMI",
        "segments": [{"sectionType": "A", "start_ms": 0, "duration_ms": 1000}]
    });
    let err = import(&salami).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnsupportedFormat {
            format: FormatTag::Salami
        }
    ));
    assert_eq!(err.code(), "IMPORT_002");

    let err = import(&json!({"hello": "world"})).unwrap_err();
    assert!(matches!(err, ImportError::UnknownFormat));
    assert_eq!(err.code(), "IMPORT_001");
}

#[test]
fn test_number_accepts_numeric_strings() {
    assert_eq!(number(&json!(1.5)), Some(1.5));
    assert_eq!(number(&json!(" 96 ")), Some(96.0));
    assert_eq!(number(&json!("NaN")), None);
    assert_eq!(number(&json!(true)), None);
}
