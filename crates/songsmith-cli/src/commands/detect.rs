//! Detect command implementation
//!
//! Reports the annotation format of one file or of every JSON file in a
//! directory.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::debug;

use songsmith_import::{detect_format, FormatTag};

use super::json_output::{error_codes, DetectOutput, DetectRecord, JsonError};
use crate::input::{json_files, read_json};

/// Run the detect command
///
/// # Arguments
/// * `input` - Single file to classify
/// * `input_dir` - Directory scanned recursively for `*.json`
/// * `json` - Print a [`DetectOutput`] document instead of text
///
/// # Returns
/// Exit code: 0 when every file was read and parsed, 1 otherwise
pub fn run(input: Option<&str>, input_dir: Option<&str>, json: bool) -> Result<ExitCode> {
    let files: Vec<PathBuf> = match (input, input_dir) {
        (Some(file), None) => vec![PathBuf::from(file)],
        (None, Some(dir)) => {
            let files = json_files(Path::new(dir));
            if files.is_empty() {
                bail!("No .json files found in {}", dir);
            }
            files
        }
        (Some(_), Some(_)) => bail!("Pass either --input or --input-dir, not both"),
        (None, None) => bail!("Pass --input <file> or --input-dir <dir>"),
    };

    let records: Vec<DetectRecord> = files.iter().map(|path| detect_file(path)).collect();
    let success = records.iter().all(|r| r.error.is_none());

    if json {
        let output = DetectOutput {
            success,
            files: records,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for record in &records {
            match (&record.format, &record.error) {
                (Some(format), _) => {
                    let tag = match format {
                        FormatTag::Unknown => format.as_str().yellow(),
                        FormatTag::Salami => format.as_str().cyan(),
                        _ => format.as_str().green(),
                    };
                    println!("{}: {}", record.file, tag.bold());
                }
                (None, Some(error)) => {
                    eprintln!("{} {}", "error:".red().bold(), error.message);
                }
                (None, None) => {}
            }
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn detect_file(path: &Path) -> DetectRecord {
    let file = path.display().to_string();
    debug!(file = %file, "detecting format");
    match read_json(path) {
        Ok(value) => DetectRecord {
            file,
            format: Some(detect_format(&value).tag()),
            error: None,
        },
        Err(e) => {
            let code = if path.exists() {
                error_codes::JSON_PARSE
            } else {
                error_codes::FILE_READ
            };
            DetectRecord {
                error: Some(JsonError::new(code, format!("{:#}", e)).with_file(file.clone())),
                file,
                format: None,
            }
        }
    }
}
