//! Vision provider trait and request/response types.
//!
//! Defines the interface a hosted model backend implements, the alt text
//! request every backend receives, and the factory that builds the configured
//! backend.

use crate::config::{Config, GenerationConfig};
use crate::error::{ConfigError, PipelineError};
use crate::pipeline::validate::detect_media_type;
use crate::types::TokenUsage;
use async_trait::async_trait;
use base64::Engine;

/// System instruction fixing the assistant's role.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant that helps people find information. \
     Generate a detailed description of the image for alt text purposes. \
     Respond with only the alt text description.";

/// First text part of every user message.
pub const LEAD_IN_PROMPT: &str = "Generate Alt Text for the following Image:";

/// Base64-encoded image ready to send to a vision API.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Encode raw image bytes, sniffing the MIME type from the header.
    ///
    /// Unrecognized headers are sent as `image/jpeg`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let media_type = detect_media_type(bytes).unwrap_or_else(|| {
            tracing::debug!("Unrecognized image header, defaulting to image/jpeg");
            "image/jpeg"
        });

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// One part of a multi-part user message.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(ImageInput),
}

/// A request to generate alt text for one image.
#[derive(Debug, Clone)]
pub struct AltTextRequest {
    /// System instruction
    pub system: String,
    /// User message parts, in order
    pub user: Vec<ContentPart>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
}

impl AltTextRequest {
    /// Build an alt text request from an image and optional free-text context.
    ///
    /// The user message is the lead-in text, then the context if it has any
    /// non-whitespace content, then the image.
    pub fn describe_image(
        image: ImageInput,
        context: Option<&str>,
        generation: &GenerationConfig,
    ) -> Self {
        let mut user = vec![ContentPart::Text(LEAD_IN_PROMPT.to_string())];
        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            user.push(ContentPart::Text(context.to_string()));
        }
        user.push(ContentPart::Image(image));

        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
            top_p: generation.top_p,
        }
    }

    /// Text parts of the user message, in order.
    pub fn user_texts(&self) -> Vec<&str> {
        self.user
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::Image(_) => None,
            })
            .collect()
    }
}

/// The response from a completion call.
#[derive(Debug, Clone)]
pub struct VisionResponse {
    /// Generated alt text
    pub text: String,
    /// Model identifier reported by the API, if any (logged at debug level)
    pub model: Option<String>,
    /// Token usage from the response's usage block
    pub usage: TokenUsage,
}

/// Trait that all vision providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionProvider>` for dynamic dispatch and test fakes).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Generate alt text for the given request.
    ///
    /// Implementations apply no deadline of their own; the caller wraps the
    /// call in the configured request timeout.
    async fn generate(&self, request: &AltTextRequest) -> Result<VisionResponse, PipelineError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Empty strings and unset variables resolve to `None`.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    } else if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured provider.
pub struct VisionProviderFactory;

impl VisionProviderFactory {
    /// Create the Azure OpenAI provider from config.
    ///
    /// Fails with [`ConfigError::MissingCredentials`] when the endpoint or key
    /// is unset, before anything touches the network.
    pub fn create(config: &Config) -> Result<Box<dyn VisionProvider>, ConfigError> {
        let azure = &config.azure;
        let endpoint = resolve_env_var(&azure.endpoint).ok_or_else(|| {
            ConfigError::MissingCredentials(
                "Azure OpenAI endpoint not set. Set ENDPOINT_URL env var.".to_string(),
            )
        })?;
        let api_key = resolve_env_var(&azure.api_key).ok_or_else(|| {
            ConfigError::MissingCredentials(
                "Azure OpenAI API key not set. Set AZURE_OPENAI_API_KEY env var.".to_string(),
            )
        })?;

        Ok(Box::new(super::azure::AzureOpenAiProvider::new(
            &endpoint,
            &api_key,
            &azure.deployment,
            &azure.api_version,
        )))
    }
}
