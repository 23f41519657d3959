//! payment-probe - health and payment-flow probes for the payment service
//!
//! Loads a scenario file, runs the probe for a number of iterations and
//! reports per-check pass/fail counts.
//!
//! ## Scenarios
//!
//! - **health**: GET the configured URL; checks `is status 200` and
//!   `is body not null`.
//! - **payment**: POST `{baseUrl}/payments` with a fresh order id (240 s
//!   timeout), abort the iteration unless it answers 200, then POST
//!   `{baseUrl}/payments/status` once for the same order.
//!
//! ## Usage
//!
//! ```bash
//! # Probe service health ten times
//! payment-probe health --config health.json --iterations 10
//!
//! # Run the payment flow and keep per-iteration rows
//! payment-probe payment --config payment_scenario_prod.json --output run.csv
//!
//! # Write an example scenario file
//! payment-probe config init --kind payment
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod scenarios;
mod utils;

use cli::Args;
use config::{EnvConfig, HealthConfigFile, PaymentConfigFile, ScenarioFile};
use executor::ScenarioRunner;
use http::HttpClient;
use models::{RunSummary, ScenarioKind};
use output::{OutputFormat, ResultFormatter};
use scenarios::{HealthScenario, PaymentScenario};
use utils::{init_logger, resolve_level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let (level, unknown_level) =
        resolve_level(args.verbose, args.log_level, env.log_level.as_deref());
    init_logger(level);
    if let Some(raw) = unknown_level {
        warn!(
            "Ignoring unknown log level '{}' from PAYMENT_PROBE_LOG, using {:?}",
            raw, level
        );
    }

    match args.command {
        cli::Command::Health(run_args) => {
            run_scenario(ScenarioKind::Health, run_args, &env).await?;
        }
        cli::Command::Payment(run_args) => {
            run_scenario(ScenarioKind::Payment, run_args, &env).await?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, &env)?;
        }
    }

    Ok(())
}

async fn run_scenario(kind: ScenarioKind, args: cli::RunArgs, env: &EnvConfig) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| kind.default_config_file().to_string());
    let iterations = args.iterations.or(env.iterations).unwrap_or(1);
    let pause = args
        .pause_ms
        .or(env.pause_ms)
        .map(Duration::from_millis)
        .unwrap_or(scenarios::DEFAULT_PAUSE);
    let format_name = args
        .format
        .or_else(|| env.format.clone())
        .unwrap_or_else(|| "table".to_string());
    let format = OutputFormat::from_str(&format_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {format_name}"))?;

    info!("Loading {} configuration from {}", kind, config_path);

    let client = HttpClient::new()?;
    let runner = ScenarioRunner::new(iterations);
    let colorize = !args.no_color;

    let summary = match kind {
        ScenarioKind::Health => {
            let file = HealthConfigFile::load(&config_path, env)?;
            let scenario = HealthScenario::setup(&file)?.with_pause(pause);
            info!("Probing {}", scenario.base_url());
            runner.run(&scenario, &client).await
        }
        ScenarioKind::Payment => {
            let file = PaymentConfigFile::load(&config_path, env)?;
            let scenario = PaymentScenario::setup(&file)?.with_pause(pause);
            runner.run(&scenario, &client).await
        }
    };

    report(&summary, format, colorize, args.output.as_deref())
}

fn report(
    summary: &RunSummary,
    format: OutputFormat,
    colorize: bool,
    save_to: Option<&str>,
) -> Result<()> {
    let mut formatter = ResultFormatter::new(format);
    if !colorize {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_summary(summary));

    if let Some(path) = save_to {
        output::save_summary(summary, path)?;
        info!("Run saved to {}", path);
    }

    if !summary.is_all_passed() {
        anyhow::bail!(
            "{} failed check(s), {} aborted iteration(s)",
            summary.failed_checks(),
            summary.aborted
        );
    }

    Ok(())
}

fn manage_config(args: cli::ConfigArgs, env: &EnvConfig) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init {
            kind,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| kind.default_config_file().to_string());
            let path = Path::new(&output);
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {output}. Use --force to overwrite."
                );
            }

            match kind {
                ScenarioKind::Health => HealthConfigFile::example().save(path)?,
                ScenarioKind::Payment => PaymentConfigFile::example().save(path)?,
            }
            println!("✓ {kind} configuration created: {output}");
            println!("\nEdit the file to point at your service.");
        }

        cli::ConfigAction::Validate { kind, file } => {
            let result = match kind {
                ScenarioKind::Health => HealthConfigFile::load(&file, env).map(|_| ()),
                ScenarioKind::Payment => PaymentConfigFile::load(&file, env).map(|_| ()),
            };

            match result {
                Ok(()) => println!("✓ Configuration file is valid: {file}"),
                Err(e) => {
                    println!("✗ Configuration file is invalid: {file}");
                    println!("  Error: {e:#}");
                    return Err(e);
                }
            }
        }

        cli::ConfigAction::Show => {
            if env.has_any() {
                env.print_summary();
            } else {
                println!("No PAYMENT_PROBE_* environment variables set.");
            }
        }
    }

    Ok(())
}
