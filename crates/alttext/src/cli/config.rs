//! The `alttext config` command for configuration management.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use alttext_core::llm::resolve_env_var;
use alttext_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Check that the endpoint and API key resolve (no request is sent)
    Check,
}

/// Execute the config command.
///
/// `config_path` is the `--config` override, if one was given.
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(Config::default_path);

    match args.command {
        ConfigCommand::Show => {
            let toml = config.to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            init_config(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Check => {
            let missing = missing_credentials(config);
            if !missing.is_empty() {
                anyhow::bail!(
                    "Missing credentials: {}\n\n  Hint: export them or add them to a .env file.",
                    missing.join(", ")
                );
            }
            println!(
                "Credentials found. Deployment: {} (api-version {})",
                config.azure.deployment, config.azure.api_version
            );
        }
    }

    Ok(())
}

/// Write the default config to `path`, refusing to clobber unless `force`.
fn init_config(path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = Config::default().to_toml()?;
    std::fs::write(path, toml)?;
    Ok(())
}

/// Names of the credential settings that don't resolve to a value.
pub(crate) fn missing_credentials(config: &Config) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if resolve_env_var(&config.azure.endpoint).is_none() {
        missing.push("ENDPOINT_URL");
    }
    if resolve_env_var(&config.azure.api_key).is_none() {
        missing.push("AZURE_OPENAI_API_KEY");
    }
    missing
}
