//! IDS Rules CLI
//!
//! Command-line front end for the rule parser.
//!
//! # Usage
//!
//! ```bash
//! idsrules parse emerging.rules
//! idsrules parse --format json --enabled-only local.rules
//! cat *.rules | idsrules check
//! idsrules config set default_format yaml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "idsrules")]
#[command(version)]
#[command(about = "Parse Snort/Suricata IDS rules", long_about = None)]
struct Cli {
    /// Output format [default: from config, else table]
    #[arg(long, short, env = "IDSRULES_FORMAT")]
    format: Option<output::OutputFormat>,

    /// Log filter, e.g. "debug" or "ids_rules=trace"
    #[arg(long, env = "IDSRULES_LOG")]
    log: Option<String>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse rule files and print the rules
    Parse {
        /// Rule files, "-" or none for stdin
        files: Vec<PathBuf>,
        /// Also print rules that failed to parse
        #[arg(long)]
        errors: bool,
        /// Skip rules disabled with '#'
        #[arg(long)]
        enabled_only: bool,
    },
    /// Report parse failures, exiting non-zero if there are any
    Check {
        /// Rule files, "-" or none for stdin
        files: Vec<PathBuf>,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

fn init_logging(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        eprintln!("Warning: {:#}, using defaults", e);
        config::Config::default()
    });

    let filter = cli
        .log
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.log_level().to_string());
    init_logging(&filter);

    let format = cli.format.unwrap_or_else(|| config.format());

    let result = match cli.command {
        Commands::Parse { files, errors, enabled_only } => {
            let include_disabled = !enabled_only && config.include_disabled();
            commands::parse::handle(&files, errors, include_disabled, format)
        }
        Commands::Check { files } => commands::check::handle(&files, format),
        Commands::Config { action } => {
            commands::config::handle(action, cli.profile.as_deref()).map(|_| true)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
