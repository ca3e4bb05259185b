//! Command implementations

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use tscat_catalog::{audit, load_file, stats, Catalog, CatalogStats, ResourceLocator, Translator};
use tscat_common::init_logging;
use tscat_config::{Config, ConfigLoader};

use crate::cli::{Cli, Command, LookupArgs};
use crate::error::{AppError, AppResult};

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report
    Success,
    /// `check` found problems
    IssuesFound,
}

/// Load the configuration, install logging and run the parsed command line
///
/// # Errors
///
/// Returns [`AppError::Config`] when the configuration cannot be loaded,
/// [`AppError::Logging`] when the subscriber cannot be installed, and any
/// error from [`execute`].
pub fn run(cli: &Cli, out: &mut impl Write) -> AppResult<Outcome> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging)?;

    execute(&cli.command, &config, out)
}

/// Run `command`, writing its output to `out`
///
/// # Errors
///
/// Returns an [`AppError`] when a resource cannot be loaded, a lookup
/// fails to substitute, or output cannot be written.
pub fn execute(command: &Command, config: &Config, out: &mut impl Write) -> AppResult<Outcome> {
    match command {
        Command::Lookup(args) => lookup(args, config, out),
        Command::Check { file } => check(file, out),
        Command::Stats { file, json } => print_stats(file, *json, out),
        Command::Fmt { file, output } => reformat(file, output.as_deref(), out),
    }
}

fn stdout_error(source: std::io::Error) -> AppError {
    AppError::Write {
        path: PathBuf::from("-"),
        source,
    }
}

fn lookup(args: &LookupArgs, config: &Config, out: &mut impl Write) -> AppResult<Outcome> {
    let catalog = lookup_catalog(args, config)?;
    let values: Vec<&str> = args.args.iter().map(String::as_str).collect();
    let comment = args.comment.as_deref();

    let text = match args.count {
        Some(count) => catalog.translate_plural(&args.context, &args.source, comment, count, &values)?,
        None => catalog.translate(&args.context, &args.source, comment, &values)?,
    };

    writeln!(out, "{text}").map_err(stdout_error)?;
    Ok(Outcome::Success)
}

fn lookup_catalog(args: &LookupArgs, config: &Config) -> AppResult<Arc<Catalog>> {
    if let Some(file) = &args.file {
        return Ok(Arc::new(load_file(file)?));
    }

    let translations = &config.translations;
    let language = args.language.as_deref().unwrap_or(&translations.language);
    let translator = Translator::new(ResourceLocator::new(&translations.directory, translations.file_prefix.as_str()));
    debug!("Looking up with language {} in {:?}", language, translations.directory);
    Ok(translator.switch_locale(language)?)
}

fn check(file: &Path, out: &mut impl Write) -> AppResult<Outcome> {
    let catalog = load_file(file)?;
    let issues = audit(&catalog);

    for issue in &issues {
        writeln!(out, "{issue}").map_err(stdout_error)?;
    }

    if issues.is_empty() {
        info!("{:?}: no issues in {} messages", file, catalog.message_count());
        Ok(Outcome::Success)
    } else {
        warn!("{:?}: {} issues", file, issues.len());
        Ok(Outcome::IssuesFound)
    }
}

fn print_stats(file: &Path, json: bool, out: &mut impl Write) -> AppResult<Outcome> {
    let stats = stats(&load_file(file)?);

    if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out).map_err(stdout_error)?;
    } else {
        write_stats_text(&stats, out).map_err(stdout_error)?;
    }
    Ok(Outcome::Success)
}

fn write_stats_text(stats: &CatalogStats, out: &mut impl Write) -> std::io::Result<()> {
    let totals = &stats.totals;
    writeln!(out, "Language:   {}", stats.language.as_deref().unwrap_or("-"))?;
    writeln!(out, "Contexts:   {}", stats.contexts)?;
    writeln!(
        out,
        "Messages:   {} ({} finished, {} unfinished, {} vanished, {} obsolete)",
        totals.messages, totals.finished, totals.unfinished, totals.vanished, totals.obsolete
    )?;
    writeln!(out, "Completion: {:.1}%", totals.completion())?;

    for context in &stats.per_context {
        let counts = &context.counts;
        writeln!(
            out,
            "  {:<40} {:>4}/{:<4} {:>5.1}%",
            context.name,
            counts.finished,
            counts.finished + counts.unfinished,
            counts.completion()
        )?;
    }
    Ok(())
}

fn reformat(file: &Path, output: Option<&Path>, out: &mut impl Write) -> AppResult<Outcome> {
    let catalog = load_file(file)?;

    match output {
        Some(path) => catalog.write_file(path).map_err(|source| AppError::Write {
            path: path.to_path_buf(),
            source,
        })?,
        None => write!(out, "{}", catalog.to_ts_string()).map_err(stdout_error)?,
    }
    Ok(Outcome::Success)
}
