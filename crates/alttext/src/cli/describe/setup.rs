//! Generator setup: config overrides, credential check, input discovery.

use alttext_core::{AltTextGenerator, Config, DescribeOptions, FileDiscovery, ImageSource};

use super::DescribeArgs;

/// Everything needed to run one describe batch.
pub(crate) struct DescribeContext {
    pub generator: AltTextGenerator,
    pub sources: Vec<ImageSource>,
    pub options: DescribeOptions,
    pub pretty: bool,
}

/// Apply CLI overrides, build the generator, and expand the inputs.
///
/// Credentials are checked here, so a missing endpoint or key stops the
/// command before any image is read.
pub fn setup_generator(args: &DescribeArgs, mut config: Config) -> anyhow::Result<DescribeContext> {
    apply_overrides(&mut config, args);
    config.validate()?;

    let generator = AltTextGenerator::new(&config)?;

    let discovery = FileDiscovery::new(config.processing.clone());
    let inputs: Vec<_> = args
        .inputs
        .iter()
        .map(|p| std::path::PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
        .collect();
    let sources = discovery
        .discover_all(&inputs)
        .into_iter()
        .map(ImageSource::from_path)
        .collect();

    let mut options = DescribeOptions::new();
    if let Some(context) = &args.context {
        options = options.with_context(context.clone());
    }
    if let Some(project_id) = &args.project_id {
        options = options.with_project_id(project_id.clone());
    }

    Ok(DescribeContext {
        generator,
        sources,
        options,
        pretty: config.output.pretty,
    })
}

/// Overlay flag and environment values on the loaded config.
fn apply_overrides(config: &mut Config, args: &DescribeArgs) {
    if let Some(endpoint) = &args.endpoint {
        config.azure.endpoint = endpoint.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.azure.api_key = api_key.clone();
    }
    if let Some(deployment) = args.deployment.as_ref().filter(|d| !d.trim().is_empty()) {
        config.azure.deployment = deployment.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.limits.request_timeout_ms = timeout_ms;
    }
}
