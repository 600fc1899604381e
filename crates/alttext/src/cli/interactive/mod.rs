//! Interactive CLI mode, a guided experience for bare `alttext` invocation.
//!
//! When `alttext` is invoked with no subcommand on a TTY, this module offers
//! a menu-driven interface that delegates to the same describe logic as the
//! flag-based CLI.

pub mod describe;
pub mod theme;

use alttext_core::llm::resolve_env_var;
use alttext_core::Config;
use console::Style;
use dialoguer::Select;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

const MENU_ITEMS: &[&str] = &["Describe images", "View settings", "Exit"];

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::alttext_theme();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => describe::guided_describe(config).await?,
            Some(1) => show_config(config)?,
            _ => break, // Exit, Esc or Ctrl+C
        }
    }

    Ok(())
}

/// Summary of current settings with an option to dump the full TOML.
fn show_config(config: &Config) -> anyhow::Result<()> {
    let theme = theme::alttext_theme();
    let dim = Style::new().for_stderr().dim();
    let cyan = Style::new().for_stderr().cyan();
    let label = Style::new().for_stderr().bold();

    loop {
        eprintln!();
        eprintln!("  {}", cyan.apply_to("Current configuration:"));
        eprintln!();

        let config_path = Config::default_path();
        let path_note = if config_path.exists() {
            "(exists)"
        } else {
            "(using defaults)"
        };

        eprintln!(
            "    {:<20} {} {}",
            label.apply_to("Config file:"),
            config_path.display(),
            dim.apply_to(path_note)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Endpoint:"),
            credential_status(&config.azure.endpoint, false)
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("API key:"),
            credential_status(&config.azure.api_key, true)
        );
        eprintln!(
            "    {:<20} {} (api-version {})",
            label.apply_to("Deployment:"),
            config.azure.deployment,
            config.azure.api_version
        );
        eprintln!(
            "    {:<20} ${} in / ${} out per 1K tokens",
            label.apply_to("Pricing:"),
            config.pricing.input_per_1k,
            config.pricing.output_per_1k
        );
        eprintln!(
            "    {:<20} {} ms",
            label.apply_to("Request timeout:"),
            config.limits.request_timeout_ms
        );
        eprintln!(
            "    {:<20} {}",
            label.apply_to("Log level:"),
            config.logging.level
        );
        eprintln!();

        let items = &["View full config (TOML)", "Back"];
        let selection = Select::with_theme(&theme)
            .with_prompt("Configuration")
            .items(items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => match config.to_toml() {
                Ok(toml) => {
                    eprintln!();
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                    eprintln!("{toml}");
                    eprintln!("{}", dim.apply_to("─".repeat(50)));
                }
                Err(e) => {
                    let err = Style::new().for_stderr().red();
                    eprintln!("  {} Failed to serialize config: {e}", err.apply_to("✗"));
                }
            },
            _ => break,
        }
    }

    Ok(())
}

/// Display a credential setting without leaking secrets.
fn credential_status(value: &str, secret: bool) -> String {
    match resolve_env_var(value) {
        None => "not set".to_string(),
        Some(_) if secret => "set".to_string(),
        Some(resolved) => resolved,
    }
}
