//! Structural format detection.
//!
//! Detection is an ordered list of shape predicates; the first that matches
//! wins and there is no scoring. Order matters: SALAMI exports share the
//! McGill-Billboard segment-list shape and must be checked first. Detection
//! never fails; anything unrecognized is [`DetectedFormat::Unknown`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Closed set of source schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatTag {
    Jams,
    McgillBillboard,
    Salami,
    Unknown,
}

impl FormatTag {
    /// Returns the string representation used in tags and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Jams => "jams",
            FormatTag::McgillBillboard => "mcgill-billboard",
            FormatTag::Salami => "salami",
            FormatTag::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Borrowed view of a JAMS document.
#[derive(Debug, Clone, Copy)]
pub struct JamsDocument<'a> {
    pub file_metadata: &'a Map<String, Value>,
    pub annotations: &'a [Value],
}

/// Borrowed view of a segment-list document.
#[derive(Debug, Clone, Copy)]
pub struct SegmentList<'a> {
    pub segments: &'a [Value],
    /// Top-level object carrying `bpm`, `source` and friends; `None` when
    /// the document is a bare array.
    pub root: Option<&'a Map<String, Value>>,
}

impl<'a> SegmentList<'a> {
    /// Top-level field, if the document has a root object.
    pub fn field(&self, key: &str) -> Option<&'a Value> {
        self.root.and_then(|r| r.get(key))
    }

    /// Top-level string field.
    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        self.field(key).and_then(Value::as_str)
    }
}

/// Result of detection, carrying the parts the matching importer needs.
#[derive(Debug, Clone, Copy)]
pub enum DetectedFormat<'a> {
    Jams(JamsDocument<'a>),
    McgillBillboard(SegmentList<'a>),
    Salami(SegmentList<'a>),
    Unknown,
}

impl DetectedFormat<'_> {
    pub fn tag(&self) -> FormatTag {
        match self {
            DetectedFormat::Jams(_) => FormatTag::Jams,
            DetectedFormat::McgillBillboard(_) => FormatTag::McgillBillboard,
            DetectedFormat::Salami(_) => FormatTag::Salami,
            DetectedFormat::Unknown => FormatTag::Unknown,
        }
    }
}

type Detector = fn(&Value) -> Option<DetectedFormat<'_>>;

/// Predicates in priority order.
const DETECTORS: &[Detector] = &[detect_jams, detect_salami, detect_mcgill];

/// Keys that mark an object as a segment-list entry.
const SEGMENT_ENTRY_KEYS: &[&str] = &["start_ms", "sectionType"];

/// Classify a parsed JSON document.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use songsmith_import::detect::{detect_format, FormatTag};
///
/// let doc = json!({"file_metadata": {}, "annotations": []});
/// assert_eq!(detect_format(&doc).tag(), FormatTag::Jams);
/// assert_eq!(detect_format(&json!(null)).tag(), FormatTag::Unknown);
/// ```
pub fn detect_format(value: &Value) -> DetectedFormat<'_> {
    DETECTORS
        .iter()
        .find_map(|detect| detect(value))
        .unwrap_or(DetectedFormat::Unknown)
}

fn detect_jams(value: &Value) -> Option<DetectedFormat<'_>> {
    let root = value.as_object()?;
    let file_metadata = root.get("file_metadata")?.as_object()?;
    let annotations = root.get("annotations")?.as_array()?;
    Some(DetectedFormat::Jams(JamsDocument {
        file_metadata,
        annotations,
    }))
}

fn detect_salami(value: &Value) -> Option<DetectedFormat<'_>> {
    let list = segment_list(value)?;
    let root = list.root?;
    let tagged = root.contains_key("salami_id")
        || root
            .get("source")
            .and_then(Value::as_str)
            .is_some_and(|s| s.to_ascii_lowercase().contains("salami"));
    tagged.then_some(DetectedFormat::Salami(list))
}

fn detect_mcgill(value: &Value) -> Option<DetectedFormat<'_>> {
    segment_list(value).map(DetectedFormat::McgillBillboard)
}

fn segment_list(value: &Value) -> Option<SegmentList<'_>> {
    let (segments, root) = match value {
        Value::Array(items) => (items.as_slice(), None),
        Value::Object(root) => {
            let items = root
                .get("segments")
                .or_else(|| root.get("sections"))?
                .as_array()?;
            (items.as_slice(), Some(root))
        }
        _ => return None,
    };

    let looks_like_segments = segments
        .iter()
        .find_map(Value::as_object)
        .is_some_and(|entry| SEGMENT_ENTRY_KEYS.iter().any(|key| entry.contains_key(*key)));
    looks_like_segments.then_some(SegmentList { segments, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detects_jams() {
        let doc = json!({
            "file_metadata": {"title": "Song"},
            "annotations": [{"namespace": "chord", "data": []}]
        });
        assert_eq!(detect_format(&doc).tag(), FormatTag::Jams);
    }

    #[test]
    fn test_jams_requires_both_keys_with_right_types() {
        assert_eq!(
            detect_format(&json!({"file_metadata": {}})).tag(),
            FormatTag::Unknown
        );
        assert_eq!(
            detect_format(&json!({"file_metadata": [], "annotations": []})).tag(),
            FormatTag::Unknown
        );
        assert_eq!(
            detect_format(&json!({"file_metadata": {}, "annotations": {}})).tag(),
            FormatTag::Unknown
        );
    }

    #[test]
    fn test_detects_mcgill_object_and_array() {
        let doc = json!({
            "bpm": 96,
            "segments": [{"sectionType": "Verse", "start_ms": 0, "duration_ms": 1000}]
        });
        assert_eq!(detect_format(&doc).tag(), FormatTag::McgillBillboard);

        let doc = json!({"sections": [{"start_ms": 0}]});
        assert_eq!(detect_format(&doc).tag(), FormatTag::McgillBillboard);

        let doc = json!([{"sectionType": "Intro", "start_ms": 0, "duration_ms": 10}]);
        assert_eq!(detect_format(&doc).tag(), FormatTag::McgillBillboard);
    }

    #[test]
    fn test_mcgill_shape_judged_on_first_object_entry() {
        let doc = json!({"segments": [1, {"start_ms": 0}, {"label": "x"}]});
        assert_eq!(detect_format(&doc).tag(), FormatTag::McgillBillboard);

        let doc = json!({"segments": [{"label": "x"}, {"start_ms": 0}]});
        assert_eq!(detect_format(&doc).tag(), FormatTag::Unknown);
    }

    #[test]
    fn test_salami_wins_over_mcgill() {
        let doc = json!({
            "source": "SALAMI v2",
            "segments": [{"sectionType": "A", "start_ms": 0, "duration_ms": 1000}]
        });
        assert_eq!(detect_format(&doc).tag(), FormatTag::Salami);

        let doc = json!({
            "salami_id": 1234,
            "segments": [{"sectionType": "A", "start_ms": 0}]
        });
        assert_eq!(detect_format(&doc).tag(), FormatTag::Salami);
    }

    #[test]
    fn test_jams_wins_when_shapes_overlap() {
        let doc = json!({
            "file_metadata": {},
            "annotations": [],
            "segments": [{"start_ms": 0}],
            "source": "salami"
        });
        assert_eq!(detect_format(&doc).tag(), FormatTag::Jams);
    }

    #[test]
    fn test_detector_is_total() {
        let inputs = [
            json!(null),
            json!({}),
            json!([]),
            json!(42),
            json!("segments"),
            json!(true),
            json!({"segments": "nope"}),
            json!({"segments": []}),
            json!({"segments": [1, 2, 3]}),
            json!({"segments": [{"start": 0}]}),
            json!([[{"start_ms": 0}]]),
            json!({"a": {"b": {"c": {"file_metadata": {}, "annotations": []}}}}),
        ];
        for input in &inputs {
            assert_eq!(detect_format(input).tag(), FormatTag::Unknown, "{}", input);
        }
    }

    #[test]
    fn test_format_tag_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(FormatTag::McgillBillboard).unwrap(),
            json!("mcgill-billboard")
        );
        assert_eq!(FormatTag::McgillBillboard.to_string(), "mcgill-billboard");
    }
}
