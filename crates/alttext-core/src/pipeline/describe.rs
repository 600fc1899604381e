//! Single-image inference: load, encode, call the provider, account.

use std::time::{Duration, Instant};

use crate::config::{Config, GenerationConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::llm::{AltTextRequest, ImageInput, VisionProvider};
use crate::pricing::Pricing;
use crate::types::{ImageSource, InferenceResult};

use super::load::ImageLoader;

/// Produces one [`InferenceResult`] per image.
///
/// Holds the provider (and with it the HTTP client) for the lifetime of the
/// process, so every image reuses the same connection pool.
pub struct Describer {
    provider: Box<dyn VisionProvider>,
    loader: ImageLoader,
    generation: GenerationConfig,
    pricing: Pricing,
    timeout_ms: u64,
}

impl Describer {
    pub fn new(provider: Box<dyn VisionProvider>, config: &Config) -> Self {
        Self {
            provider,
            loader: ImageLoader::new(config.limits.clone()),
            generation: config.generation.clone(),
            pricing: config.pricing,
            timeout_ms: config.limits.request_timeout_ms,
        }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate alt text for one image.
    ///
    /// Duration covers loading, encoding and the API round trip. The returned
    /// result has no project id; batch orchestration attaches it.
    pub async fn describe(
        &self,
        source: &ImageSource,
        context: Option<&str>,
    ) -> PipelineResult<InferenceResult> {
        let start = Instant::now();

        let bytes = self.loader.load(source).await?;
        let image = ImageInput::from_bytes(&bytes);
        let request = AltTextRequest::describe_image(image, context, &self.generation);

        tracing::debug!(
            "Requesting alt text for {} via {} ({} bytes)",
            source.file_name(),
            self.provider.name(),
            bytes.len()
        );

        let response = match tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            self.provider.generate(&request),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(PipelineError::Timeout {
                    path: source.display_path(),
                    stage: "inference".to_string(),
                    timeout_ms: self.timeout_ms,
                });
            }
        };

        let duration_seconds = start.elapsed().as_secs_f64();
        if let Some(model) = &response.model {
            tracing::debug!("{} described by {model}", source.file_name());
        }
        let usage = response.usage;

        Ok(InferenceResult {
            alt_text: response.text,
            tokens_in: usage.prompt_tokens,
            tokens_out: usage.completion_tokens,
            tokens_total: usage.total_tokens,
            duration_seconds,
            estimated_cost: self
                .pricing
                .estimate(usage.prompt_tokens, usage.completion_tokens),
            project_id: None,
        })
    }
}
