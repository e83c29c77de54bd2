//! # Orgtree CLI
//!
//! Command-line interface for the department tree service.
//!
//! ## Usage
//!
//! ```bash
//! orgtree serve      # Start the API server (runs migrations automatically)
//! orgtree migrate    # Run database migrations
//! orgtree validate   # Check configuration
//! orgtree --help     # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use error::Result;

use crate::{commands::Commands, config::AppConfig};

/// Orgtree - organizational department tree API
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directive (debug, info, warn, error)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "ORGTREE_LOG_FORMAT", default_value = "json")]
    log_format: String,

    /// Also write JSON logs to this file, rotated hourly
    #[arg(long, env = "ORGTREE_LOG_FILE")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Shell completions must stay free of log lines on stdout
    if let Commands::Completions(args) = &cli.command {
        return commands::completions::completions(args.shell, &mut Cli::command(), &mut std::io::stdout());
    }

    // The guard flushes the file writer when main returns
    let _guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Orgtree CLI starting...");

    let config = AppConfig::from_env()?;

    match &cli.command {
        Commands::Serve(args) => server::serve(&config, args).await?,
        Commands::Migrate(args) => commands::migrate::migrate(&config.database, args).await?,
        Commands::Validate => commands::validate::validate(&config)?,
        Commands::Completions(_) => {},
    }

    logging::info!(target: "app", "Orgtree CLI completed successfully");
    Ok(())
}
