//! JSON output types for machine-readable CLI output.
//!
//! Every command accepting `--json` prints exactly one of these documents to
//! stdout. Error and warning codes pass through from the libraries
//! (`IMPORT_001`, `W_KEY_001`, ...) or use the CLI codes below.

use serde::Serialize;

use songsmith_import::{FormatTag, ImportError, InferenceWarning};
use songsmith_lyrics::StanzaReport;

/// Error codes for CLI-level failures.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Input was not valid JSON
    pub const JSON_PARSE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&ImportError> for JsonError {
    fn from(err: &ImportError) -> Self {
        let path = match err {
            ImportError::MalformedData { path, .. } => Some(path.clone()),
            _ => None,
        };
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            path,
            file: None,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
}

impl From<&InferenceWarning> for JsonWarning {
    fn from(warning: &InferenceWarning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.to_string(),
        }
    }
}

/// One file's result in `detect` output.
#[derive(Debug, Clone, Serialize)]
pub struct DetectRecord {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// JSON output for the `detect` command.
#[derive(Debug, Clone, Serialize)]
pub struct DetectOutput {
    pub success: bool,
    pub files: Vec<DetectRecord>,
}

/// JSON output for the `import` command.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatTag>,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Where the project was written, when `--output` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// The project itself, when not written to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ImportOutput {
    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            format: None,
            errors: vec![error],
            warnings: Vec::new(),
            output: None,
            result: None,
        }
    }
}

/// JSON output for the `lyrics` command.
#[derive(Debug, Clone, Serialize)]
pub struct LyricsOutput {
    pub scheme: String,
    pub stanzas: Vec<StanzaReport>,
}
