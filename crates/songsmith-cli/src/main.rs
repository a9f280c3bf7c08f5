//! Songsmith CLI - Command-line interface for annotation import and lyric analysis
//!
//! This binary detects and imports MIR annotation files (JAMS, McGill-Billboard)
//! into songwriting projects, exports projects back to JAMS, and reports
//! rhyme schemes for lyrics.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use songsmith_cli::{commands, logging};

/// Songsmith - Songwriting annotation import/export
#[derive(Parser)]
#[command(name = "songsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the annotation format of a file or directory of files
    Detect {
        /// Path to a single annotation file
        #[arg(short, long)]
        input: Option<String>,

        /// Directory to recursively scan for .json files
        #[arg(long)]
        input_dir: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Import an annotation file into a songwriting project
    Import {
        /// Path to the annotation file (JAMS or McGill-Billboard JSON)
        #[arg(short, long)]
        input: String,

        /// Import configuration JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Project serialization format
        #[arg(long, default_value = "json", value_parser = ["json", "yaml"])]
        format: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Export a project as a JAMS document
    Export {
        /// Path to the project JSON file
        #[arg(short, long)]
        project: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JAMS JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Analyze syllables and rhyme scheme of a lyrics file
    Lyrics {
        /// Path to a plain-text lyrics file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Commands::Detect {
            input,
            input_dir,
            json,
        } => commands::detect::run(input.as_deref(), input_dir.as_deref(), json),
        Commands::Import {
            input,
            config,
            output,
            format,
            pretty,
            json,
        } => {
            let format = format
                .parse::<commands::import::OutputFormat>()
                .expect("clap should have validated format");
            commands::import::run(&commands::import::ImportArgs {
                input: &input,
                config: config.as_deref(),
                output: output.as_deref(),
                format,
                pretty,
                json,
            })
        }
        Commands::Export {
            project,
            output,
            pretty,
        } => commands::export::run(&project, output.as_deref(), pretty),
        Commands::Lyrics { input, json } => commands::lyrics::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
