//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

use crate::models::ScenarioKind;
use crate::utils::LogLevel;

/// Health and payment-flow probes for the payment service
#[derive(Parser, Debug)]
#[command(name = "payment-probe")]
#[command(version)]
#[command(about = "Probe the payment service health and payment flow")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the health probe
    Health(RunArgs),

    /// Run the payment flow probe
    Payment(RunArgs),

    /// Manage scenario configuration files
    Config(ConfigArgs),
}

/// Arguments shared by the probe commands
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario configuration file (JSON or YAML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of iterations to run
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Pause after each iteration in milliseconds
    #[arg(long)]
    pub pause_ms: Option<u64>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Save the run to a file (.csv for per-iteration rows, JSON otherwise)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable ANSI colors in table output
    #[arg(long)]
    pub no_color: bool,
}

fn parse_kind(s: &str) -> Result<ScenarioKind, String> {
    ScenarioKind::from_str(s).ok_or_else(|| {
        let known: Vec<String> = ScenarioKind::all()
            .iter()
            .map(|k| format!("{k:?}").to_lowercase())
            .collect();
        format!("unknown scenario kind '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_str(s)
        .ok_or_else(|| format!("unknown log level '{s}' (expected trace, debug, info, warn or error)"))
}

/// Arguments for config management
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example scenario file
    Init {
        /// Scenario kind (health, payment)
        #[arg(short, long, value_parser = parse_kind)]
        kind: ScenarioKind,

        /// Output file path (defaults to the conventional file name)
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a scenario file
    Validate {
        /// Scenario kind (health, payment)
        #[arg(short, long, value_parser = parse_kind)]
        kind: ScenarioKind,

        /// File to validate
        file: String,
    },

    /// Show configuration taken from the environment
    Show,
}
