//! Batch orchestration: one image after another into a [`ResultSet`].

use crate::config::Config;
use crate::error::{BatchError, PipelineResult, Result};
use crate::llm::{VisionProvider, VisionProviderFactory};
use crate::pipeline::Describer;
use crate::types::{ImageSource, InferenceResult, ResultSet};

/// Inputs shared by every image in a batch.
#[derive(Debug, Clone, Default)]
pub struct DescribeOptions {
    /// Free-text context appended to the prompt when non-blank
    pub context: Option<String>,
    /// Identifier attached verbatim to every result when non-empty
    pub project_id: Option<String>,
}

impl DescribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.trim().is_empty())
    }

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|p| !p.is_empty())
    }
}

/// Alt text generator - the main entry point.
///
/// Built once per process from an explicit [`Config`]; owns the provider and
/// its HTTP client for every batch it runs.
pub struct AltTextGenerator {
    describer: Describer,
}

impl AltTextGenerator {
    /// Create a generator backed by the configured Azure OpenAI deployment.
    ///
    /// Fails before any request if the endpoint or key is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let provider = VisionProviderFactory::create(config)?;
        Ok(Self::with_provider(provider, config))
    }

    /// Create a generator around an existing provider.
    pub fn with_provider(provider: Box<dyn VisionProvider>, config: &Config) -> Self {
        Self {
            describer: Describer::new(provider, config),
        }
    }

    /// Describe a single image, attaching the project id if one is set.
    pub async fn describe_one(
        &self,
        source: &ImageSource,
        options: &DescribeOptions,
    ) -> PipelineResult<InferenceResult> {
        let mut result = self.describer.describe(source, options.context()).await?;
        result.project_id = options.project_id().map(String::from);
        Ok(result)
    }

    /// Describe every source in order and collect the results by filename.
    pub async fn describe_batch(
        &self,
        sources: &[ImageSource],
        options: &DescribeOptions,
    ) -> std::result::Result<ResultSet, Box<BatchError>> {
        self.describe_batch_with(sources, options, |_, _| {}).await
    }

    /// Like [`describe_batch`](Self::describe_batch), calling `on_result`
    /// after each image completes.
    ///
    /// Images run strictly one after another. A later image whose filename
    /// matches an earlier one replaces it. The first failure stops the batch;
    /// the error carries everything completed before it.
    pub async fn describe_batch_with<F>(
        &self,
        sources: &[ImageSource],
        options: &DescribeOptions,
        mut on_result: F,
    ) -> std::result::Result<ResultSet, Box<BatchError>>
    where
        F: FnMut(&str, &InferenceResult),
    {
        let mut results = ResultSet::new();

        for source in sources {
            let file_name = source.file_name();
            match self.describe_one(source, options).await {
                Ok(result) => {
                    tracing::debug!(
                        "Described {file_name}: {} tokens, {}",
                        result.tokens_total,
                        result.cost_display()
                    );
                    on_result(&file_name, &result);
                    if results.insert(file_name.clone(), result).is_some() {
                        tracing::warn!(
                            "Duplicate filename {file_name} in batch, keeping the later result"
                        );
                    }
                }
                Err(err) => {
                    tracing::error!("Failed: {file_name} - {err}");
                    return Err(Box::new(BatchError {
                        file_name,
                        source: err,
                        completed: results,
                    }));
                }
            }
        }

        tracing::info!(
            "Described {} image(s) via {}",
            results.len(),
            self.describer.provider_name()
        );
        Ok(results)
    }
}
