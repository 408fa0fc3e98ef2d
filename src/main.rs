use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use typora_upload::config::{Config, CONFIG_FILE_PATH};
use typora_upload::logging::{self, LogConfig};
use typora_upload::report::{self, OutputFormat};
use typora_upload::{Batch, HttpUploader};

#[derive(Parser)]
#[command(name = "typora-upload")]
#[command(about = "Upload images to an HTTP image host and print their URLs", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, env = "TYPORA_UPLOAD_CONFIG", default_value = CONFIG_FILE_PATH)]
    config: PathBuf,

    /// Maximum uploads in flight (0 = one per file)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Print `![](url)` instead of the bare URL
    #[arg(long)]
    markdown: bool,

    /// Log at DEBUG level
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    colored::control::set_override(std::io::stderr().is_terminal());
    logging::init(LogConfig {
        json: cli.json_logs,
        verbose: cli.verbose,
    });

    if cli.files.is_empty() {
        eprintln!("Usage: typora-upload [--config=<path>] <image-path1> <image-path2> ...");
        eprintln!("Default config file: {}", CONFIG_FILE_PATH);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", format!("{:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(&cli.config).context("Error loading config")?;
    info!(config = %cli.config.display(), files = cli.files.len(), "starting uploads");

    let uploader = HttpUploader::new(&config).context("Failed to set up HTTP client")?;
    let batch = Batch::new(uploader)
        .with_limit(cli.jobs)
        .with_progress(progress_bar(cli.verbose));

    let outcomes = batch.run(cli.files).await;

    let format = if cli.markdown {
        OutputFormat::Markdown
    } else {
        OutputFormat::Url
    };
    let all_ok = report::print_outcomes(
        &outcomes,
        format,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    Ok(all_ok)
}

// Verbose logs and a redrawing bar would fight over stderr.
fn progress_bar(verbose: bool) -> ProgressBar {
    if verbose {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{spinner} uploading {pos}/{len}") {
        bar.set_style(style);
    }
    bar
}
