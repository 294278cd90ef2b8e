use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use heron_cli::commands::run::RunOutcome;
use heron_cli::{OutputFormat, commands, logging};
use heron_core::Config;
use heron_core::config::DEFAULT_REPORT_SIZE;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "heron")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for turning web-server access logs into latency reports",
    long_about = "Heron parses nginx-style access logs (plain or gzipped), aggregates \
                  response times per endpoint and renders the slowest endpoints into an HTML report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTML report for the latest access log
    Run {
        /// Path to the JSON configuration file
        #[arg(long, value_name = "FILE", env = "HERON_CONFIG", default_value = "./config.json")]
        config: PathBuf,
    },

    /// Display latency statistics for a single log file
    Stats {
        /// Path to the access log (plain or .gz)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of endpoints to show
        #[arg(long, default_value_t = DEFAULT_REPORT_SIZE)]
        report_size: usize,
    },

    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config } => run(&config, cli.verbose),
        Commands::Stats { file, report_size } => logging::init_logging(cli.verbose, None)
            .and_then(|_| commands::stats::execute(&file, report_size, cli.format)),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging setup itself may be what failed
            if tracing::dispatcher::has_been_set() {
                tracing::error!("{e:#}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, verbose: bool) -> Result<()> {
    // Config decides where logs go, so anything before it lands on stderr
    let config = match Config::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(verbose, None)?;
            return Err(e.into());
        }
    };

    if let Err(e) = logging::init_logging(verbose, config.logging.as_deref()) {
        logging::init_logging(verbose, None)?;
        return Err(e);
    }
    tracing::info!("Starting heron with config {}", config_path.display());

    match commands::run::execute(&config)? {
        RunOutcome::Generated(path) => tracing::debug!("Run finished: {}", path.display()),
        RunOutcome::AlreadyGenerated(_) | RunOutcome::NoLogFound => {
            tracing::debug!("Run finished without writing a report")
        }
    }

    Ok(())
}
