use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::config::Config;
use common::logger::init_logging;
use grader::report::ReportResponse;
use tracing::{error, info};
use util::grading_config::GradingConfig;

mod request;

use request::{CpiRequest, SpiRequest};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grading policy JSON. Overrides GRADING_CONFIG_PATH
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grade one semester's subjects and compute the SPI
    Spi {
        /// Request file with `subjects` and `marks`
        request: PathBuf,
    },
    /// Combine per-semester SPIs into a CPI
    Cpi {
        /// Request file with `semesters`
        request: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::init(".env");
    let _log_guard = init_logging(&config.log_file, &config.log_level, config.log_to_stdout);
    info!(project = %config.project_name, command = ?args.command, "Starting calculator");

    match run(&args, config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            let failure = ReportResponse::<()>::failure(format!("{e:#}"));
            match serde_json::to_string_pretty(&failure) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<String> {
    let policy_path = args.config.clone().or_else(|| {
        config
            .grading_config_path
            .as_deref()
            .map(util::paths::resolve)
    });
    let grading = GradingConfig::load_or_default(policy_path.as_ref())
        .map_err(anyhow::Error::msg)
        .context("failed to load grading config")?;
    let places = grading.display.decimal_places;

    let json = match &args.command {
        Command::Spi { request: path } => {
            let request: SpiRequest = request::read(path)?;
            let response = request.evaluate(&grading.policy, places)?;
            if let Some(report) = &response.data {
                info!(
                    subjects = report.subjects.len(),
                    spi = report.spi,
                    "SPI calculated"
                );
            }
            serde_json::to_string_pretty(&response)?
        }
        Command::Cpi { request: path } => {
            let request: CpiRequest = request::read(path)?;
            let response = request.evaluate(places)?;
            if let Some(report) = &response.data {
                info!(
                    semesters = report.semesters.len(),
                    cpi = report.cpi,
                    "CPI calculated"
                );
            }
            serde_json::to_string_pretty(&response)?
        }
    };

    Ok(json)
}
