//! Azure OpenAI provider using the Chat Completions API.
//!
//! Sends the image as a data URL in the user message content array and
//! authenticates with the `api-key` header.

use super::provider::{AltTextRequest, ContentPart, VisionProvider, VisionResponse};
use crate::error::PipelineError;
use crate::types::TokenUsage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Azure OpenAI provider for a single deployment.
pub struct AzureOpenAiProvider {
    api_key: String,
    url: String,
    deployment: String,
    client: reqwest::Client,
}

impl AzureOpenAiProvider {
    /// The per-request deadline is enforced by the caller, so the client has
    /// none of its own.
    pub fn new(endpoint: &str, api_key: &str, deployment: &str, api_version: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            url: completions_url(endpoint, deployment, api_version),
            deployment: deployment.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

/// Build the deployment's chat-completions URL.
///
/// An endpoint that already points at `/chat/completions` is used verbatim.
pub(crate) fn completions_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    if endpoint.contains("/chat/completions") {
        return endpoint.to_string();
    }
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment,
        api_version
    )
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ChatContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl<'a> ChatRequest<'a> {
    fn from_request(model: &'a str, request: &AltTextRequest) -> Self {
        let user = request
            .user
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => ChatContent::Text { text: text.clone() },
                ContentPart::Image(image) => ChatContent::ImageUrl {
                    image_url: ImageUrl {
                        url: image.data_url(),
                    },
                },
            })
            .collect();

        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: vec![ChatContent::Text {
                        text: request.system.clone(),
                    }],
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stream: false,
            response_format: ResponseFormat { kind: "text" },
        }
    }
}

#[async_trait]
impl VisionProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    async fn generate(&self, request: &AltTextRequest) -> Result<VisionResponse, PipelineError> {
        let body = ChatRequest::from_request(&self.deployment, request);

        let resp = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Llm {
                message: format!("Azure OpenAI request failed: {e}"),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Llm {
                message: format!("Azure OpenAI HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| PipelineError::Llm {
            message: format!("Failed to parse Azure OpenAI response: {e}"),
            status_code: None,
        })?;

        let usage = chat_resp.usage.ok_or_else(|| PipelineError::Llm {
            message: "Azure OpenAI response has no usage block".to_string(),
            status_code: None,
        })?;

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| PipelineError::Llm {
                message: "Azure OpenAI returned empty choices array, no content generated"
                    .to_string(),
                status_code: None,
            })?;

        Ok(VisionResponse {
            text: text.trim().to_string(),
            model: chat_resp.model,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::llm::provider::ImageInput;

    #[test]
    fn test_completions_url_from_resource_endpoint() {
        let url = completions_url(
            "https://my-res.openai.azure.com/",
            "gpt-4.1",
            "2025-01-01-preview",
        );
        assert_eq!(
            url,
            "https://my-res.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2025-01-01-preview"
        );
    }

    #[test]
    fn test_completions_url_full_url_verbatim() {
        let full = "https://my-res.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2025-01-01-preview";
        assert_eq!(completions_url(full, "ignored", "ignored"), full);
    }

    #[test]
    fn test_chat_request_body_shape() {
        let image = ImageInput::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]);
        let request = AltTextRequest::describe_image(
            image,
            Some("Museum exhibit"),
            &GenerationConfig::default(),
        );
        let body = serde_json::to_value(ChatRequest::from_request("gpt-4.1", &request)).unwrap();

        assert_eq!(body["model"], "gpt-4.1");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["top_p"], 1.0);
        assert_eq!(body["frequency_penalty"], 0.0);
        assert_eq!(body["presence_penalty"], 0.0);
        assert_eq!(body["stream"], false);
        assert_eq!(body["response_format"]["type"], "text");

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"][0]["type"], "text");

        let user = messages[1]["content"].as_array().unwrap();
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(user.len(), 3);
        assert_eq!(user[0]["text"], "Generate Alt Text for the following Image:");
        assert_eq!(user[1]["text"], "Museum exhibit");
        assert_eq!(user[2]["type"], "image_url");
        assert!(user[2]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_chat_response_parses_usage() {
        let json = r#"{
            "model": "gpt-4.1-2025-04-14",
            "choices": [{"message": {"role": "assistant", "content": "A red bicycle."}}],
            "usage": {"prompt_tokens": 812, "completion_tokens": 23, "total_tokens": 835}
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let usage = resp.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 812);
        assert_eq!(usage.completion_tokens, 23);
        assert_eq!(usage.total_tokens, 835);
        assert_eq!(
            resp.choices[0].message.content.as_deref(),
            Some("A red bicycle.")
        );
    }
}
