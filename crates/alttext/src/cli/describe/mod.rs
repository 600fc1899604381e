//! The `alttext describe` command for generating alt text.

mod report;
mod setup;

use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use alttext_core::{AltTextError, Config, OutputWriter};

use report::{create_progress_bar, print_report, print_summary};
use setup::setup_generator;

/// Arguments for the `describe` command.
///
/// `Default` lets interactive mode build one field by field.
#[derive(Args, Debug, Default)]
pub struct DescribeArgs {
    /// Image files or folders to describe
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Context about the images, sent with every request
    #[arg(short, long)]
    pub context: Option<String>,

    /// Project identifier attached to every result
    #[arg(short, long)]
    pub project_id: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Skip the per-image report on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Azure OpenAI endpoint (base URL or full chat completions URL)
    #[arg(long, env = "ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Azure OpenAI API key
    #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Deployment name of the vision model
    #[arg(long, env = "DEPLOYMENT_NAME")]
    pub deployment: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Execute the describe command.
pub async fn execute(args: DescribeArgs, config: Config) -> anyhow::Result<()> {
    let ctx = setup_generator(&args, config)?;

    if ctx.sources.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.inputs);
        return Ok(());
    }
    tracing::info!("Found {} image(s) to describe", ctx.sources.len());

    let progress = create_progress_bar(ctx.sources.len() as u64);
    let start_time = std::time::Instant::now();

    let outcome = ctx
        .generator
        .describe_batch_with(&ctx.sources, &ctx.options, |file_name, _| {
            progress.inc(1);
            progress.set_message(file_name.to_string());
        })
        .await;
    progress.finish_and_clear();

    let results = match outcome {
        Ok(results) => results,
        Err(err) => {
            if !err.completed.is_empty() {
                if !args.quiet {
                    print_report(&err.completed);
                }
                tracing::warn!(
                    "{} image(s) completed before the failure; no results file was written",
                    err.completed.len()
                );
            }
            return Err(AltTextError::from(err).into());
        }
    };

    if !args.quiet {
        print_report(&results);
        print_summary(&results, start_time.elapsed());
    }

    let pretty = ctx.pretty && !args.compact;
    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = OutputWriter::new(BufWriter::new(file), pretty);
            writer.write(&results)?;
            writer.flush()?;
            tracing::info!(
                "Wrote alt text for {} image(s) to {:?}",
                results.len(),
                path
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), pretty);
            writer.write(&results)?;
            writer.flush()?;
        }
    }

    Ok(())
}
