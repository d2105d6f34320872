use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Write;
use std::path::PathBuf;

use fittrack::config::AppConfig;
use fittrack::logging::init_logging;
use fittrack::{
    load_packages, read_package, run_packages, sample_packages, write_report, OutputFormat,
    PackageOutcome, PackageResult, RunReport, Training,
};

/// fittrack - Workout Statistics CLI
///
/// Computes distance, mean speed and calories burned for running, sports
/// walking and swimming sessions from raw sensor packages.
#[derive(Parser)]
#[command(name = "fittrack")]
#[command(author = "fittrack Contributors")]
#[command(version)]
#[command(about = "Workout statistics from sensor packages", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of logging on stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a list of packages (built-in sample data by default)
    Run {
        /// Package file (CSV, JSON, TOML)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Calculate a single workout, e.g. `calculate RUN 15000 1 75`
    Calculate {
        /// Workout code (RUN, WLK, SWM)
        code: String,

        /// Sensor values in the order the workout expects
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load_or_default(),
    }
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(report, format, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match (&cli.command, &cli.config) {
        // `config --init` may target a file that does not exist yet
        (Some(Commands::Config { init: true, .. }), Some(path)) if !path.exists() => {
            AppConfig::default()
        }
        _ => load_config(cli.config.as_ref())?,
    };

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config)?;

    match cli.command.unwrap_or(Commands::Run {
        input: None,
        format: None,
    }) {
        Commands::Run { input, format } => {
            let format = format.unwrap_or(config.output.format);
            let packages = match input.or_else(|| config.input.clone()) {
                Some(path) => load_packages(&path)
                    .with_context(|| format!("Failed to load packages from {}", path.display()))?,
                None => sample_packages(),
            };

            let report = run_packages(&packages);
            print_report(&report, format)?;

            if report.unknown() + report.invalid() > 0 {
                eprintln!(
                    "{}",
                    format!(
                        "{} of {} packages skipped",
                        report.unknown() + report.invalid(),
                        report.entries.len()
                    )
                    .yellow()
                );
            }
        }

        Commands::Calculate {
            code,
            values,
            format,
        } => {
            let format = format.unwrap_or(config.output.format);
            match read_package(&code, &values) {
                Ok(PackageOutcome::Found(workout)) => {
                    let report = RunReport {
                        entries: vec![PackageResult::Summary(workout.summary())],
                    };
                    print_report(&report, format)?;
                }
                Ok(PackageOutcome::UnknownCode(code)) => {
                    println!("{}", PackageResult::UnknownCode(code).line());
                }
                Err(err) => {
                    eprintln!("{}", err.user_message().red().bold());
                    return Err(err.into());
                }
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = match &cli.config {
                    Some(path) => {
                        config.save_to_file(path)?;
                        path.clone()
                    }
                    None => config.save_default()?,
                };
                eprintln!("{}", format!("✓ Configuration written to {}", path.display()).green());
            }

            if show || !init {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
