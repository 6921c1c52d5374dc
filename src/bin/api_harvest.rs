//! API Harvest command-line entry point.
//!
//! Loads a pipeline configuration, runs every API in order and writes the
//! collected records as CSV. Logs go to stderr so `--stdout` output stays
//! clean.

use api_harvest::config::{load_config, PipelineConfig};
use api_harvest::error::PipelineError;
use api_harvest::executor::ReqwestTransport;
use api_harvest::formatter::TabularSerializer;
use api_harvest::models::Record;
use api_harvest::pipeline::{Orchestrator, ResultStore};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Chain REST API calls and export mapped fields as CSV
#[derive(Parser, Debug)]
#[command(name = "api-harvest", version, about, long_about = None)]
struct Cli {
    /// Path to the pipeline configuration (YAML)
    #[arg(value_name = "CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Write CSV here instead of the configured output path
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write CSV to stdout
    #[arg(long)]
    stdout: bool,

    /// Log each request (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();

    tokio::select! {
        result = run(&cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("{}", err);
                exit_code(&err)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted; no output written");
            ExitCode::from(130)
        }
    }
}

async fn run(cli: &Cli) -> Result<(), PipelineError> {
    let config = load_config(&cli.config)?;
    log::info!(
        "Loaded {} API definitions from {}",
        config.apis.len(),
        cli.config.display()
    );

    let records = collect(&config).await?;
    let csv = TabularSerializer::new(config.delimiter).serialize(&records);

    if cli.stdout {
        write_csv(io::stdout().lock(), &csv).map_err(|e| PipelineError::Output(e.to_string()))?;
        return Ok(());
    }

    let path = cli.output.as_ref().unwrap_or(&config.output);
    fs::write(path, csv)
        .map_err(|e| PipelineError::Output(format!("{}: {}", path.display(), e)))?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

async fn collect(config: &PipelineConfig) -> Result<Vec<Record>, PipelineError> {
    let transport = ReqwestTransport::new(&config.execution).map_err(PipelineError::Client)?;
    let orchestrator = Orchestrator::new(transport);

    let mut store = ResultStore::new();
    let mut records = Vec::new();
    if let Err(err) = orchestrator
        .run_into(&config.apis, &mut store, &mut records)
        .await
    {
        log::warn!(
            "Discarding {} records collected before the failure",
            records.len()
        );
        return Err(err);
    }

    Ok(records)
}

/// Writes the CSV text exactly as serialized, without a trailing newline.
fn write_csv<W: Write>(mut out: W, csv: &str) -> io::Result<()> {
    out.write_all(csv.as_bytes())?;
    out.flush()
}

fn exit_code(err: &PipelineError) -> ExitCode {
    match err {
        PipelineError::Config(_) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
