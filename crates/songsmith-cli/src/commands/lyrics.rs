//! Lyrics command implementation
//!
//! Prints syllable counts and rhyme letters for every line of a lyrics file.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use songsmith_lyrics::{analyze_lyrics, StanzaReport};

use super::json_output::LyricsOutput;

/// Run the lyrics command
///
/// # Arguments
/// * `input` - Plain-text lyrics, stanzas separated by blank lines
/// * `json` - Print a [`LyricsOutput`] document instead of text
pub fn run(input: &str, json: bool) -> Result<ExitCode> {
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))?;
    let stanzas = analyze_lyrics(&text);

    if json {
        let output = LyricsOutput {
            scheme: scheme_of(&stanzas),
            stanzas,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (index, stanza) in stanzas.iter().enumerate() {
            if index > 0 {
                println!();
            }
            for line in &stanza.lines {
                println!(
                    "{} {:>3}  {}",
                    line.rhyme.to_string().cyan().bold(),
                    line.syllables,
                    line.text
                );
            }
        }
        println!();
        println!("{} {}", "Scheme:".bold(), scheme_of(&stanzas));
    }
    Ok(ExitCode::SUCCESS)
}

fn scheme_of(stanzas: &[StanzaReport]) -> String {
    stanzas
        .iter()
        .map(|s| s.scheme.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
