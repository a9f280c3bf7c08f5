//! File loading shared by the commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use walkdir::WalkDir;

use songsmith_import::ImportConfig;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Load an import configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&str>) -> Result<ImportConfig> {
    let Some(path) = path else {
        return Ok(ImportConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    ImportConfig::from_json(&text).with_context(|| format!("Invalid config file: {}", path))
}

/// All `*.json` files below `dir`, sorted.
pub fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Write to `output`, or print to stdout when no path is given.
pub fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
