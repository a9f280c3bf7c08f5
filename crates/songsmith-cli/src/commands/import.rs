//! Import command implementation
//!
//! Detects, imports and converts an annotation file into a project, written
//! as JSON or YAML.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use songsmith_import::{import_and_convert, ImportOutcome};
use songsmith_model::Project;

use super::json_output::{ImportOutput, JsonError, JsonWarning};
use crate::input::{load_config, read_json, write_output};

/// Serialization format for the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct ImportArgs<'a> {
    pub input: &'a str,
    pub config: Option<&'a str>,
    pub output: Option<&'a str>,
    pub format: OutputFormat,
    pub pretty: bool,
    pub json: bool,
}

/// Run the import command
///
/// # Returns
/// Exit code: 0 on success, 1 when the document cannot be imported
pub fn run(args: &ImportArgs<'_>) -> Result<ExitCode> {
    let config = load_config(args.config)?;
    debug!(input = args.input, config = ?args.config, "importing");
    let value = read_json(Path::new(args.input))?;

    let outcome = match import_and_convert(&value, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            if args.json {
                let output = ImportOutput::failure(JsonError::from(&e).with_file(args.input));
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!("{} [{}] {}", "error:".red().bold(), e.code(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    if args.json {
        print_json_report(args, &outcome)?;
    } else {
        let rendered = render_project(&outcome.project, args.format, args.pretty)?;
        write_output(args.output, &rendered)?;
        print_summary(args, &outcome);
    }
    debug!(
        input = args.input,
        format = %outcome.format,
        warnings = outcome.warnings.len(),
        "import finished"
    );
    Ok(ExitCode::SUCCESS)
}

/// Serialize a project in the requested format.
pub fn render_project(project: &Project, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json if pretty => {
            project.to_json_pretty().context("Failed to serialize project to JSON")
        }
        OutputFormat::Json => project.to_json().context("Failed to serialize project to JSON"),
        OutputFormat::Yaml => {
            serde_yaml::to_string(project).context("Failed to serialize project to YAML")
        }
    }
}

fn print_json_report(args: &ImportArgs<'_>, outcome: &ImportOutcome) -> Result<()> {
    let result = match args.output {
        Some(_) => {
            let rendered = render_project(&outcome.project, args.format, args.pretty)?;
            write_output(args.output, &rendered)?;
            None
        }
        None => Some(serde_json::to_value(&outcome.project)?),
    };
    let output = ImportOutput {
        success: true,
        format: Some(outcome.format),
        errors: Vec::new(),
        warnings: outcome.warnings.iter().map(JsonWarning::from).collect(),
        output: args.output.map(str::to_string),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(args: &ImportArgs<'_>, outcome: &ImportOutcome) {
    let project = &outcome.project;
    eprintln!(
        "{} {} ({}): {} sections, {} bars, {}, {} bpm",
        "Imported".green().bold(),
        project.metadata.title,
        outcome.format,
        project.sections().len(),
        project.total_bars(),
        project.metadata.key,
        project.metadata.bpm
    );
    if !outcome.warnings.is_empty() {
        eprintln!(
            "{} {} inference warning(s)",
            "warning:".yellow().bold(),
            outcome.warnings.len()
        );
    }
    if let Some(path) = args.output {
        eprintln!("{} {}", "Wrote".cyan(), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("toml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn import_unknown_format_exits_with_one() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("junk.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
        let args = ImportArgs {
            input: path.to_str().unwrap(),
            config: None,
            output: None,
            format: OutputFormat::Json,
            pretty: false,
            json: true,
        };
        assert_eq!(run(&args).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn import_missing_file_is_an_error() {
        let args = ImportArgs {
            input: "/nonexistent/song.json",
            config: None,
            output: None,
            format: OutputFormat::Json,
            pretty: false,
            json: false,
        };
        assert!(run(&args).is_err());
    }
}
