//! Scriptable provider for unit tests.

use super::provider::{AltTextRequest, VisionProvider, VisionResponse};
use crate::error::PipelineError;
use crate::types::TokenUsage;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type ResponseFn = Box<dyn Fn(u32) -> Result<VisionResponse, PipelineError> + Send + Sync>;

/// A provider whose reply is produced by a closure over the call index.
///
/// Every request is recorded so tests can inspect what would have been sent.
pub(crate) struct MockProvider {
    response_fn: ResponseFn,
    call_count: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<AltTextRequest>>>,
    delay: Option<Duration>,
}

pub(crate) fn response(text: &str, prompt_tokens: u32, completion_tokens: u32) -> VisionResponse {
    VisionResponse {
        text: text.to_string(),
        model: Some("mock-v1".to_string()),
        usage: TokenUsage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
    }
}

impl MockProvider {
    pub(crate) fn new(
        response_fn: impl Fn(u32) -> Result<VisionResponse, PipelineError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            response_fn: Box::new(response_fn),
            call_count: Arc::new(AtomicU32::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Always answer with `text` and 1000/500 tokens.
    pub(crate) fn success(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(response(&text, 1000, 500)))
    }

    /// Answer "alt text #<call index>" so tests can tell calls apart.
    pub(crate) fn numbered() -> Self {
        Self::new(|idx| Ok(response(&format!("alt text #{idx}"), 100, 10)))
    }

    pub(crate) fn failing(status_code: Option<u16>, message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_| {
            Err(PipelineError::Llm {
                message: message.clone(),
                status_code,
            })
        })
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn call_count_handle(&self) -> Arc<AtomicU32> {
        self.call_count.clone()
    }

    pub(crate) fn requests_handle(&self) -> Arc<Mutex<Vec<AltTextRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl VisionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &AltTextRequest) -> Result<VisionResponse, PipelineError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.response_fn)(idx)
    }
}
