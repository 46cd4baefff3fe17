// Cohort - ED Revisit Cohort Builder
// Copyright (c) 2025 Cohort Contributors
// Licensed under the MIT License

use clap::Parser;
use cohort::config::load_config;
use cohort::core::CohortCoordinator;
use cohort::logging::init_logging;
use std::process;

/// Build an ED revisit cohort table from encounter and death records
#[derive(Parser, Debug)]
#[command(name = "cohort", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "cohort.toml", env = "COHORT_CONFIG")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COHORT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Skip loading and storing the utilization cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let exit_code = match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Run the cohort build and map the outcome to an exit code
///
/// Returns 0 when every patient partition completed, 1 when the run
/// finished with failed partitions (the output covers the rest).
async fn execute(cli: Cli) -> anyhow::Result<i32> {
    let mut config = load_config(&cli.config)?;

    if cli.no_cache {
        config.cache.enabled = false;
    }

    // CLI flag wins over the configured level
    let log_level = cli
        .log_level
        .unwrap_or_else(|| config.application.log_level.clone());
    let _guard = init_logging(&log_level, &config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "Cohort - ED Revisit Cohort Builder"
    );

    let summary = CohortCoordinator::new(config).run().await.map_err(|e| {
        tracing::error!(error = %e, "Run failed");
        e
    })?;

    Ok(if summary.is_success() { 0 } else { 1 })
}
