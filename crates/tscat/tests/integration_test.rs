//! Integration tests for the tscat command-line front end.
//!
//! Commands run in-process against resources written to a temporary
//! directory; output is captured in a buffer.

use std::path::{Path, PathBuf};

use clap::Parser;
use tscat::{execute, AppError, Cli, Outcome};
use tscat_common::LoggingError;
use tscat_config::ConfigError;
use tscat_common::test_utils::{create_temp_dir, init_test_logging, ts_fixtures, write_resource};
use tscat_config::Config;

fn run(args: &[&str], config: &Config) -> (Result<Outcome, AppError>, String) {
    init_test_logging();
    let cli = parse(args);
    let mut out = Vec::new();
    let result = execute(&cli.command, config, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tscat").chain(args.iter().copied())).unwrap()
}

fn config_for(dir: &Path, language: &str) -> Config {
    let mut config = Config::default();
    config.translations.directory = dir.to_path_buf();
    config.translations.language = language.to_string();
    config
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_lookup_from_file() {
    let dir = create_temp_dir();
    let file = write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());

    let (result, out) = run(&["lookup", "DateTime", "Ok", "--file", path_str(&file)], &Config::default());
    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(out, "Gerai\n");
}

#[test]
fn test_lookup_through_configured_directory() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());
    let config = config_for(dir.path(), "lt");

    let (result, out) = run(&["lookup", "About", "QField Version: %1", "3.2"], &config);
    result.unwrap();
    assert_eq!(out, "QField Version: 3.2\n");

    let (result, out) = run(&["lookup", "FeatureForm", "Add feature on <i>%1</i>", "Trees"], &config);
    result.unwrap();
    assert_eq!(out, "Pridėti objektų į <i>Trees</i>\n");
}

#[test]
fn test_lookup_language_flag_overrides_config() {
    let dir = create_temp_dir();
    write_resource(dir.path(), "qfield_lt_LT.ts", ts_fixtures::numerus_sample());
    let config = config_for(dir.path(), "de");

    let (result, out) = run(
        &[
            "lookup",
            "QFieldCloudProjectsModel",
            "%n file(s) pending upload",
            "--language",
            "lt_LT",
            "--count",
            "12",
        ],
        &config,
    );
    result.unwrap();
    assert_eq!(out, "12 failų laukia įkėlimo\n");

    let (result, out) = run(
        &["lookup", "QFieldCloudProjectsModel", "Open", "-l", "lt-LT", "--comment", "adjective"],
        &config,
    );
    result.unwrap();
    assert_eq!(out, "Atviras\n");
}

#[test]
fn test_lookup_missing_argument() {
    let dir = create_temp_dir();
    let file = write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());

    let (result, out) = run(
        &["lookup", "About", "QField Version: %1 (%2)", "3.2", "-f", path_str(&file)],
        &Config::default(),
    );
    assert!(matches!(result, Err(AppError::Substitution(_))));
    assert!(out.is_empty());
}

#[test]
fn test_lookup_without_resource() {
    let dir = create_temp_dir();
    let (result, _) = run(&["lookup", "A", "B"], &config_for(dir.path(), "fr"));
    assert!(matches!(result, Err(AppError::Translator(_))));
}

#[test]
fn test_check_clean_and_broken() {
    let dir = create_temp_dir();
    let clean = write_resource(dir.path(), "clean.ts", ts_fixtures::lithuanian_sample());
    let broken = write_resource(
        dir.path(),
        "broken.ts",
        r#"<TS version="2.1" language="lt">
<context>
    <name>QgsQuickUtils</name>
    <message>
        <source>screen DPI: %1x%2</source>
        <translation>ekrano DPI: %1</translation>
    </message>
</context>
</TS>"#,
    );

    let (result, out) = run(&["check", path_str(&clean)], &Config::default());
    assert_eq!(result.unwrap(), Outcome::Success);
    assert!(out.is_empty());

    let (result, out) = run(&["check", path_str(&broken)], &Config::default());
    assert_eq!(result.unwrap(), Outcome::IssuesFound);
    assert!(out.contains("missing %2"));
}

#[test]
fn test_check_malformed_file() {
    let dir = create_temp_dir();
    let file = write_resource(dir.path(), "bad.ts", "<TS version=\"2.1\"><context><name>A</name></context></TS>");

    let (result, _) = run(&["check", path_str(&file)], &Config::default());
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[test]
fn test_stats_text_and_json() {
    let dir = create_temp_dir();
    let file = write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());

    let (result, out) = run(&["stats", path_str(&file)], &Config::default());
    result.unwrap();
    assert!(out.contains("Language:   lt"));
    assert!(out.contains("Messages:   7 (5 finished, 2 unfinished, 0 vanished, 0 obsolete)"));

    let (result, out) = run(&["stats", path_str(&file), "--json"], &Config::default());
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["contexts"], 4);
    assert_eq!(json["totals"]["finished"], 5);
}

#[test]
fn test_fmt_to_stdout_and_file() {
    let dir = create_temp_dir();
    let file = write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());
    let output: PathBuf = dir.path().join("formatted.ts");

    let (result, out) = run(&["fmt", path_str(&file)], &Config::default());
    result.unwrap();
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
    assert!(out.contains("<translation>Log&apos;as</translation>"));

    let (result, out) = run(&["fmt", path_str(&file), "-o", path_str(&output)], &Config::default());
    result.unwrap();
    assert!(out.is_empty());
    assert_eq!(
        tscat_catalog::load_file(&output).unwrap(),
        tscat_catalog::load_file(&file).unwrap()
    );
}

#[test]
fn test_run_with_missing_config_file() {
    let dir = create_temp_dir();
    let missing = dir.path().join("missing.yaml");
    let cli = parse(&["--config", path_str(&missing), "lookup", "A", "B"]);

    let mut out = Vec::new();
    let result = tscat::run(&cli, &mut out);
    assert!(matches!(result, Err(AppError::Config(ConfigError::Io { .. }))));
    assert!(out.is_empty());
}

#[test]
fn test_run_reports_logging_failure() {
    // The test subscriber is already installed, so a second install fails
    init_test_logging();
    let dir = create_temp_dir();
    let config = write_resource(dir.path(), "tscat.yaml", "logging:\n  level: info\n");
    let file = write_resource(dir.path(), "qfield_lt.ts", ts_fixtures::lithuanian_sample());
    let cli = parse(&["--config", path_str(&config), "lookup", "DateTime", "Ok", "-f", path_str(&file)]);

    let mut out = Vec::new();
    let result = tscat::run(&cli, &mut out);
    assert!(matches!(result, Err(AppError::Logging(LoggingError::Init(_)))));
    assert!(out.is_empty());
}
