mod cli;

use clap::Parser;
use repotrust::error::ScoreError;
use repotrust::{batch, config, report, Scorer};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("repotrust={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32, ScoreError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(&cwd, cli.config.as_deref())?;
    let scorer = Scorer::from_config(&loaded);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let Some(result) = scorer.score(&cmd.url) else {
                println!("no result: {}", cmd.url);
                return Ok(exit_code::RUNTIME_FAILURE);
            };

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Ndjson => report::OutputFormat::Ndjson,
            };
            let rendered = report::render(&result, output_format)?;
            println!("{rendered}");

            if result.is_admissible() {
                Ok(exit_code::SUCCESS)
            } else {
                if !cli.quiet {
                    eprintln!(
                        "rejected: net score {:.3} is below {:.1}",
                        result.net_score,
                        repotrust::ADMISSION_THRESHOLD
                    );
                }
                Ok(exit_code::REJECTED)
            }
        }
        cli::Commands::Batch(cmd) => {
            let summary = batch::run_batch(&scorer, &cmd.input, &cmd.output)?;
            println!("scored: {}, failed: {}", summary.scored, summary.failed);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
