//! Project to JAMS export.
//!
//! The export carries one `segment_open`, `chord`, `key_mode` and `tempo`
//! annotation. Chords are written in Harte notation at absolute times,
//! clamped to their section. Spelling, bass notes and extensions are not
//! preserved, so a re-import reproduces structure and key but may normalize
//! chord symbols.

use serde_json::{json, Value};

use songsmith_model::project::{Project, Section, SectionChord};
use songsmith_model::theory::{format_harte_symbol, pitch_class_name, Key};

/// JAMS schema version written to `file_metadata`.
pub const JAMS_VERSION: &str = "0.3.4";

/// Annotator tag written to every annotation.
const DATA_SOURCE: &str = "songsmith";

/// Key in JAMS `key_mode` form, e.g. `"A:minor"`.
pub fn jams_key(key: &Key) -> String {
    format!("{}:{}", pitch_class_name(key.root), key.mode.as_str())
}

/// Render a project as a JAMS document.
pub fn export_jams(project: &Project) -> Value {
    let sections = project.sections();
    let bpm = project.metadata.bpm;
    let duration = sections.last().map(|s| s.end_time).unwrap_or(0.0);

    let segment_data: Vec<Value> = sections
        .iter()
        .map(|s| observation(s.start_time, s.duration(), json!(s.name), Some(1.0)))
        .collect();

    let chord_data: Vec<Value> = sections
        .iter()
        .flat_map(|section| {
            section
                .chords
                .iter()
                .filter_map(move |chord| chord_observation(section, chord, bpm))
        })
        .collect();

    let mut file_metadata = json!({
        "title": project.metadata.title,
        "duration": duration,
        "jams_version": JAMS_VERSION,
        "identifiers": {"songsmith_project": project.id},
    });
    if let Some(artist) = &project.metadata.artist {
        file_metadata["artist"] = json!(artist);
    }

    json!({
        "file_metadata": file_metadata,
        "annotations": [
            annotation(project, "segment_open", segment_data),
            annotation(project, "chord", chord_data),
            annotation(
                project,
                "key_mode",
                vec![observation(0.0, duration, json!(jams_key(&project.key)), None)],
            ),
            annotation(
                project,
                "tempo",
                vec![observation(0.0, duration, json!(bpm), Some(1.0))],
            ),
        ],
        "sandbox": {},
    })
}

fn annotation(project: &Project, namespace: &str, data: Vec<Value>) -> Value {
    json!({
        "namespace": namespace,
        "annotation_metadata": {
            "corpus": project.metadata.source,
            "data_source": DATA_SOURCE,
        },
        "data": data,
        "sandbox": {},
    })
}

fn observation(time: f64, duration: f64, value: Value, confidence: Option<f64>) -> Value {
    json!({
        "time": time,
        "duration": duration,
        "value": value,
        "confidence": confidence,
    })
}

/// Absolute, section-clamped timing of a chord; `None` when nothing of it
/// falls inside the section.
fn chord_observation(section: &Section, chord: &SectionChord, bpm: f64) -> Option<Value> {
    let seconds_per_beat = 60.0 / bpm;
    let start = (section.start_time + chord.start_beat * seconds_per_beat).max(section.start_time);
    let end = (section.start_time + chord.end_beat() * seconds_per_beat).min(section.end_time);
    if !(end > start) {
        return None;
    }
    Some(observation(
        start,
        end - start,
        json!(format_harte_symbol(chord.root, chord.quality)),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use songsmith_model::project::{ProjectMetadata, SectionType, Structure};
    use songsmith_model::theory::{Chord, ChordQuality, Mode};

    fn project() -> Project {
        let key = Key::new(9, Mode::Minor);
        let section = Section {
            id: "sec_1".to_string(),
            section_type: SectionType::Verse,
            name: "Verse 1".to_string(),
            bars: 2,
            start_time: 10.0,
            end_time: 14.0,
            start_bar: 0,
            chords: vec![
                SectionChord::new(Chord::new(9, ChordQuality::Minor7), &key, -2.0, 4.0),
                SectionChord::new(Chord::new(7, ChordQuality::Major), &key, 4.0, 8.0),
            ],
        };
        Project {
            id: "prj_1".to_string(),
            metadata: ProjectMetadata {
                title: "Song".to_string(),
                artist: None,
                bpm: 120.0,
                key: key.to_string(),
                time_signature: "4/4".to_string(),
                created: "2024-01-01T00:00:00Z".to_string(),
                modified: "2024-01-01T00:00:00Z".to_string(),
                tags: vec![],
                source: "billboard".to_string(),
            },
            key,
            structure: Structure {
                sections: vec![section],
            },
            harmony: None,
        }
    }

    #[test]
    fn test_export_writes_four_annotations() {
        let doc = export_jams(&project());
        let namespaces: Vec<&str> = doc["annotations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["namespace"].as_str().unwrap())
            .collect();
        assert_eq!(namespaces, vec!["segment_open", "chord", "key_mode", "tempo"]);
        assert_eq!(doc["file_metadata"]["duration"], json!(14.0));
        assert!(doc["file_metadata"].get("artist").is_none());
        assert_eq!(doc["annotations"][2]["data"][0]["value"], json!("A:minor"));
        assert_eq!(
            doc["annotations"][0]["annotation_metadata"]["corpus"],
            json!("billboard")
        );
    }

    #[test]
    fn test_chords_are_clamped_to_their_section() {
        let doc = export_jams(&project());
        let chords: Vec<(f64, f64, &str)> = doc["annotations"][1]["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| {
                (
                    o["time"].as_f64().unwrap(),
                    o["duration"].as_f64().unwrap(),
                    o["value"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(chords, vec![(10.0, 1.0, "A:min7"), (12.0, 2.0, "G:maj")]);
    }
}
