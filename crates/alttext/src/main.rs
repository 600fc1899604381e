//! alttext CLI - generate accessible alt text for images with Azure OpenAI.
//!
//! Each image is sent to a vision-capable chat deployment; the generated
//! description comes back with token usage and an estimated cost, and the
//! whole batch is written as one JSON document keyed by filename.
//!
//! # Usage
//!
//! ```bash
//! # Describe a couple of images with shared context
//! alttext describe hero.jpg team.png --context "Company about page"
//!
//! # Describe a folder and save the results
//! alttext describe ./uploads/ --project-id spring-site --output alt_text_results.json
//!
//! # View configuration
//! alttext config show
//! ```

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

mod cli;
mod logging;

/// alttext - Generate accessible alt text for images with Azure OpenAI.
#[derive(Parser, Debug)]
#[command(name = "alttext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate alt text for images
    Describe(cli::describe::DescribeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ENDPOINT_URL / AZURE_OPENAI_API_KEY may live in a local .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let loaded = match &cli.config {
        Some(path) => alttext_core::Config::load_from(path),
        None => alttext_core::Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => return Err(e.into()),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `alttext config path`."
            );
            alttext_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("alttext v{}", alttext_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Some(Commands::Describe(args)) => cli::describe::execute(args, config).await,
        Some(Commands::Config(args)) => cli::config::execute(args, &config, cli.config).await,
        None if std::io::stdin().is_terminal() => cli::interactive::run(&config).await,
        None => {
            anyhow::bail!("No command given. Run `alttext --help` for usage.")
        }
    }
}
