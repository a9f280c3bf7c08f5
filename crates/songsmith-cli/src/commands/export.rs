//! Export command implementation
//!
//! Reads a project JSON file and writes it back out as a JAMS document.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use songsmith_import::export_jams;
use songsmith_model::Project;

use crate::input::write_output;

/// Run the export command
///
/// # Arguments
/// * `project_path` - Project JSON produced by `import`
/// * `output` - Output file (default: stdout)
/// * `pretty` - Pretty-print the JAMS JSON
pub fn run(project_path: &str, output: Option<&str>, pretty: bool) -> Result<ExitCode> {
    let text = fs::read_to_string(project_path)
        .with_context(|| format!("Failed to read file: {}", project_path))?;
    let project = Project::from_json(&text)
        .with_context(|| format!("Failed to parse project: {}", project_path))?;
    project
        .validate()
        .with_context(|| format!("Invalid project: {}", project_path))?;

    let doc = export_jams(&project);
    let rendered = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    write_output(output, &rendered)?;
    info!(project = project_path, sections = project.sections().len(), "export finished");

    if let Some(path) = output {
        eprintln!(
            "{} {} sections to {}",
            "Exported".green().bold(),
            project.sections().len(),
            path
        );
    }
    Ok(ExitCode::SUCCESS)
}
