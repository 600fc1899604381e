//! Guided describe flow.
//!
//! Walks the user through: image paths → project id → context → credentials
//! → output → confirmation. Builds a `DescribeArgs` and delegates to
//! `cli::describe::execute()`.

use alttext_core::{Config, FileDiscovery, DEFAULT_OUTPUT_FILE};
use console::Style;
use dialoguer::{Confirm, Input, Password, Select};
use std::path::PathBuf;

use crate::cli::config::missing_credentials;
use crate::cli::describe::DescribeArgs;

use super::handle_interrupt;
use super::theme::alttext_theme;

/// Walk the user through describing a set of images.
pub async fn guided_describe(config: &Config) -> anyhow::Result<()> {
    let theme = alttext_theme();
    let warn = Style::new().for_stderr().yellow();

    // ── Step 1: Image paths ───────────────────────────────────────────────

    let discovery = FileDiscovery::new(config.processing.clone());
    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut image_count = 0;

    loop {
        let Some(raw_path) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path to image or folder")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        let path = PathBuf::from(shellexpand::tilde(raw_path.trim()).into_owned());
        if !path.exists() {
            eprintln!(
                "  {}",
                warn.apply_to(format!("Path not found: {}", path.display()))
            );
            continue;
        }

        let found = discovery.discover(&path).len();
        if found == 0 {
            eprintln!(
                "  {}",
                warn.apply_to("No supported images found at that path.")
            );
            continue;
        }
        image_count += found;
        inputs.push(path);

        let more = Confirm::with_theme(&theme)
            .with_prompt(format!("{image_count} image(s) selected. Add another path?"))
            .default(false)
            .interact_opt()?;
        match more {
            Some(true) => continue,
            Some(false) => break,
            None => return Ok(()),
        }
    }

    // ── Step 2: Project id and context ────────────────────────────────────

    let Some(project_id) = prompt_optional(&theme, "Project ID (optional)")? else {
        return Ok(());
    };
    let Some(context) = prompt_optional(&theme, "Context for these images (optional)")? else {
        return Ok(());
    };

    // ── Step 3: Credentials (session-only) ───────────────────────────────

    let missing = missing_credentials(config);
    let endpoint = if missing.contains(&"ENDPOINT_URL") {
        let Some(endpoint) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Azure OpenAI endpoint URL")
                .interact_text(),
        )?
        else {
            return Ok(());
        };
        Some(endpoint.trim().to_string())
    } else {
        None
    };
    let api_key = if missing.contains(&"AZURE_OPENAI_API_KEY") {
        let Some(key) = handle_interrupt(
            Password::with_theme(&theme)
                .with_prompt("Azure OpenAI API key (used for this session only)")
                .interact(),
        )?
        else {
            return Ok(());
        };
        Some(key)
    } else {
        None
    };

    // ── Step 4: Output ────────────────────────────────────────────────────

    let output_items = &["Save JSON to file", "Print JSON to stdout"];
    let Some(output_choice) = Select::with_theme(&theme)
        .with_prompt("Output")
        .items(output_items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    let output = if output_choice == 0 {
        let Some(path) = prompt_output_path(&theme)? else {
            return Ok(());
        };
        Some(path)
    } else {
        None
    };

    // ── Step 5: Confirmation ──────────────────────────────────────────────

    eprintln!();
    let bold = Style::new().for_stderr().bold();
    let dim = Style::new().for_stderr().dim();
    eprintln!(
        "  {}",
        bold.apply_to(format!("Ready to describe {image_count} image(s)"))
    );
    let output_label = match &output {
        Some(p) => p.display().to_string(),
        None => "stdout".to_string(),
    };
    eprintln!(
        "  {}",
        dim.apply_to(format!(
            "Deployment: {} | Project: {} | Output: {output_label}",
            config.azure.deployment,
            project_id.as_deref().unwrap_or("none"),
        ))
    );
    eprintln!();

    let confirm = Confirm::with_theme(&theme)
        .with_prompt("Start?")
        .default(true)
        .interact_opt()?;
    if !matches!(confirm, Some(true)) {
        return Ok(());
    }

    // ── Step 6: Build DescribeArgs and delegate ───────────────────────────

    let args = DescribeArgs {
        inputs,
        context,
        project_id,
        output,
        endpoint,
        api_key,
        ..DescribeArgs::default()
    };

    if let Err(e) = crate::cli::describe::execute(args, config.clone()).await {
        let err = Style::new().for_stderr().red();
        eprintln!();
        eprintln!("  {} {e:#}", err.apply_to("✗"));
    }

    eprintln!();
    let post_items = &["Describe more images", "Back to main menu"];
    let post_choice = Select::with_theme(&theme)
        .with_prompt("What next?")
        .items(post_items)
        .default(0)
        .interact_opt()?;

    if matches!(post_choice, Some(0)) {
        Box::pin(guided_describe(config)).await?;
    }

    Ok(())
}

/// Prompt for free text that may be left empty.
///
/// Returns `Ok(None)` on interrupt and `Ok(Some(None))` for an empty answer.
/// Anything else, whitespace included, is kept verbatim.
fn prompt_optional(
    theme: &dialoguer::theme::ColorfulTheme,
    prompt: &str,
) -> anyhow::Result<Option<Option<String>>> {
    let Some(value) = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(None);
    };
    Ok(Some(non_empty(value)))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Prompt for an output file path, defaulting to the standard results file.
fn prompt_output_path(
    theme: &dialoguer::theme::ColorfulTheme,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Output file path")
            .default(format!("./{DEFAULT_OUTPUT_FILE}"))
            .interact_text(),
    )?
    else {
        return Ok(None);
    };
    Ok(Some(PathBuf::from(shellexpand::tilde(&path).into_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_keeps_whitespace() {
        assert_eq!(non_empty("PRJ-1".to_string()), Some("PRJ-1".to_string()));
        assert_eq!(non_empty("   ".to_string()), Some("   ".to_string()));
        assert_eq!(non_empty(String::new()), None);
    }
}
