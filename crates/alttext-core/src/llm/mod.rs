//! Hosted vision-model integration.
//!
//! Provides the provider abstraction, the provider-neutral alt text request,
//! and the Azure OpenAI chat-completions backend.

pub(crate) mod azure;
#[cfg(test)]
pub(crate) mod mock;
pub(crate) mod provider;

pub use azure::AzureOpenAiProvider;
pub use provider::{
    resolve_env_var, AltTextRequest, ContentPart, ImageInput, VisionProvider,
    VisionProviderFactory, VisionResponse, LEAD_IN_PROMPT, SYSTEM_PROMPT,
};
