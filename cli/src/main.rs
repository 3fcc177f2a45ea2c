//! CLI entrypoint for wml-predict
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wml_application::{RunPredictionError, RunPredictionInput, RunPredictionUseCase};
use wml_domain::{ConfigIssueCode, FieldSpecification, InputRecord, PredictionRequest};
use wml_infrastructure::{ConfigError, ConfigLoader, FileConfig, gateways_from_config};
use wml_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, read_records, records_from_args,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting wml-predict");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref(), cli.no_config);
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }?;
    apply_overrides(&mut config, &cli);
    ConsoleFormatter::set_color(config.output.color);

    let mut fatal = false;
    for issue in config.validate() {
        // A payload preview never touches the network
        if cli.print_payload && issue.code == ConfigIssueCode::MissingDeploymentUrl {
            continue;
        }
        fatal |= issue.is_error();
        eprintln!("{}", ConsoleFormatter::format_issue(&issue));
    }
    if fatal {
        return Ok(ExitCode::FAILURE);
    }

    let (fields, _) = config.model.parse_fields();
    let fields =
        fields.ok_or_else(|| ConfigError::InvalidFields("no usable [model].fields".into()))?;
    let records = collect_records(&cli, &config, &fields)?;
    debug!("{} records for {} fields", records.len(), fields.len());

    if cli.print_payload {
        return Ok(match PredictionRequest::new(fields, records) {
            Ok(request) => {
                println!("{}", ConsoleFormatter::format_payload(&request)?);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprint!(
                    "{}",
                    ConsoleFormatter::format_error(&RunPredictionError::from(e))
                );
                ExitCode::FAILURE
            }
        });
    }

    // === Dependency Injection ===
    let api_key = config.identity.resolve_api_key()?;
    let (identity, predictor) = gateways_from_config(&config)?;
    let use_case = RunPredictionUseCase::new(Arc::new(identity), Arc::new(predictor));

    let input = RunPredictionInput::new(api_key, fields, records);
    let result = if cli.quiet {
        use_case.execute(input).await
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await
    };

    match result {
        Ok(output) => {
            let format = config.output.format.unwrap_or_default();
            println!(
                "{}",
                ConsoleFormatter::format(&output, format, config.output.chart)
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprint!("{}", ConsoleFormatter::format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize tracing; with `--log-file` lines go to that file through a
/// non-blocking writer, otherwise to stderr.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Command-line flags win over every config source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(url) = &cli.deployment_url {
        config.deployment.url = Some(url.clone());
    }
    if let Some(env) = &cli.api_key_env {
        config.identity.api_key_env = env.clone();
    }
    if let Some(secs) = cli.timeout {
        config.deployment.timeout_secs = secs;
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.no_chart {
        config.output.chart = false;
    }
}

/// Records from `--input` and `--record`, or the configured sample when
/// neither is given
fn collect_records(
    cli: &Cli,
    config: &FileConfig,
    fields: &FieldSpecification,
) -> Result<Vec<InputRecord>> {
    let mut records = Vec::new();
    if let Some(path) = &cli.input {
        records.extend(read_records(fields, path)?);
    }
    records.extend(records_from_args(fields, &cli.record));

    if records.is_empty() && cli.input.is_none() {
        match config.model.sample_record(fields) {
            Some(sample) => {
                info!("No records given, using [model].sample");
                records.push(sample);
            }
            None => bail!("No records given: use --record, --input or set [model].sample"),
        }
    }
    Ok(records)
}
