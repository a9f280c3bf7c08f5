//! End-to-end tests for the CLI commands, driven through their `run` entry points.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use songsmith_cli::commands::import::{ImportArgs, OutputFormat};
use songsmith_cli::commands::{detect, export, import, lyrics};
use songsmith_model::Project;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../songsmith-import/tests/fixtures")
        .join(name)
}

fn import_args<'a>(input: &'a str, output: Option<&'a str>, format: OutputFormat) -> ImportArgs<'a> {
    ImportArgs {
        input,
        config: None,
        output,
        format,
        pretty: true,
        json: false,
    }
}

#[test]
fn import_writes_project_json() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("nested/project.json");
    let input = fixture("mcgill_two_segments.json");

    let code = import::run(&import_args(
        input.to_str().unwrap(),
        out.to_str(),
        OutputFormat::Json,
    ))
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let project = Project::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
    project.validate().unwrap();
    assert_eq!(project.sections().len(), 2);
    assert_eq!(project.metadata.bpm, 96.0);
}

#[test]
fn import_writes_yaml() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("project.yaml");
    let input = fixture("jams_minor_song.json");

    let code = import::run(&import_args(
        input.to_str().unwrap(),
        out.to_str(),
        OutputFormat::Yaml,
    ))
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let text = fs::read_to_string(&out).unwrap();
    let project: Project = serde_yaml::from_str(&text).unwrap();
    assert_eq!(project.metadata.key, "A minor");
}

#[test]
fn import_salami_fails_with_exit_one() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("project.json");
    let input = fixture("salami_export.json");

    let code = import::run(&import_args(
        input.to_str().unwrap(),
        out.to_str(),
        OutputFormat::Json,
    ))
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!out.exists());
}

#[test]
fn import_with_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{"default_bpm": 90.0, "placeholder_tempo": null}"#).unwrap();
    let out = tmp.path().join("project.json");
    let input = fixture("mcgill_two_segments.json");

    let args = ImportArgs {
        input: input.to_str().unwrap(),
        config: config.to_str(),
        output: out.to_str(),
        format: OutputFormat::Json,
        pretty: false,
        json: true,
    };
    assert_eq!(import::run(&args).unwrap(), ExitCode::SUCCESS);
    assert!(out.exists());
}

#[test]
fn export_then_import_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let project_path = tmp.path().join("project.json");
    let jams_path = tmp.path().join("song.jams.json");
    let reimported_path = tmp.path().join("reimported.json");
    let input = fixture("mcgill_two_segments.json");

    import::run(&import_args(
        input.to_str().unwrap(),
        project_path.to_str(),
        OutputFormat::Json,
    ))
    .unwrap();
    let code = export::run(
        project_path.to_str().unwrap(),
        jams_path.to_str(),
        true,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    import::run(&import_args(
        jams_path.to_str().unwrap(),
        reimported_path.to_str(),
        OutputFormat::Json,
    ))
    .unwrap();

    let original = Project::from_json(&fs::read_to_string(&project_path).unwrap()).unwrap();
    let reimported = Project::from_json(&fs::read_to_string(&reimported_path).unwrap()).unwrap();
    assert_eq!(reimported.total_bars(), original.total_bars());
    assert_eq!(reimported.metadata.key, original.metadata.key);
    assert_eq!(reimported.metadata.bpm, original.metadata.bpm);
}

#[test]
fn detect_directory_of_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["mcgill_two_segments.json", "jams_minor_song.json"] {
        fs::copy(fixture(name), tmp.path().join(name)).unwrap();
    }
    let code = detect::run(None, tmp.path().to_str(), true).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn lyrics_reads_text_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("song.txt");
    fs::write(&path, "I saw the light\nIt burned so bright\n\nWe walk away\nWe cannot stay\n").unwrap();

    assert_eq!(
        lyrics::run(path.to_str().unwrap(), true).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(
        lyrics::run(path.to_str().unwrap(), false).unwrap(),
        ExitCode::SUCCESS
    );
    assert!(lyrics::run("/nonexistent/song.txt", false).is_err());
}
