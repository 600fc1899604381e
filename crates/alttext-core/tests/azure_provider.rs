//! Wire-level tests for the Azure OpenAI provider against a local mock server.

use alttext_core::{AltTextGenerator, Config, DescribeOptions, ImageSource, PipelineError};
use httpmock::prelude::*;
use serde_json::json;

const DEPLOYMENT_PATH: &str = "/openai/deployments/gpt-4.1/chat/completions";
const JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.azure.endpoint = server.base_url();
    config.azure.api_key = "test-key".to_string();
    config
}

fn completion(text: &str, prompt_tokens: u32, completion_tokens: u32) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4.1-2025-04-14",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": { "role": "assistant", "content": text }
        }],
        "usage": {
            "prompt_tokens": prompt_tokens,
            "completion_tokens": completion_tokens,
            "total_tokens": prompt_tokens + completion_tokens
        }
    })
}

#[tokio::test]
async fn describes_batch_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(DEPLOYMENT_PATH)
                .query_param("api-version", "2025-01-01-preview")
                .header("api-key", "test-key")
                .body_contains("Generate Alt Text for the following Image:")
                .body_contains("Respond with only the alt text description.")
                .body_contains("Storefront signage")
                .body_contains("data:image/jpeg;base64,")
                .body_contains("\"max_tokens\":800")
                .body_contains("\"stream\":false")
                .body_contains("\"response_format\":{\"type\":\"text\"}");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(completion("  A bakery storefront at dusk.  ", 1000, 500));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.jpg");
    std::fs::write(&path, JPEG).unwrap();

    let generator = AltTextGenerator::new(&config_for(&server)).unwrap();
    let sources = vec![
        ImageSource::from_path(&path),
        ImageSource::from_bytes("upload.jpg", JPEG.to_vec()),
    ];
    let options = DescribeOptions::new()
        .with_context("Storefront signage")
        .with_project_id("bakery-site");

    let results = generator.describe_batch(&sources, &options).await.unwrap();
    mock.assert_hits_async(2).await;

    assert_eq!(results.len(), 2);
    let result = results.get("storefront.jpg").unwrap();
    assert_eq!(result.alt_text, "A bakery storefront at dusk.");
    assert_eq!(result.tokens_in, 1000);
    assert_eq!(result.tokens_out, 500);
    assert_eq!(result.tokens_total, 1500);
    assert_eq!(result.cost_display(), "$0.060000");

    let exported = serde_json::to_value(&results).unwrap();
    assert_eq!(exported["upload.jpg"]["metadata"]["project_id"], "bakery-site");
    assert!(exported["upload.jpg"]["metadata"]["duration"]
        .as_str()
        .unwrap()
        .ends_with(" seconds"));
}

#[tokio::test]
async fn full_endpoint_url_is_used_verbatim() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/deployments/custom-vision/chat/completions")
                .query_param("api-version", "2024-10-21");
            then.status(200)
                .json_body(completion("A lighthouse.", 10, 5));
        })
        .await;

    let mut config = config_for(&server);
    config.azure.endpoint = server.url(
        "/openai/deployments/custom-vision/chat/completions?api-version=2024-10-21",
    );

    let generator = AltTextGenerator::new(&config).unwrap();
    let result = generator
        .describe_one(
            &ImageSource::from_bytes("lighthouse.jpg", JPEG.to_vec()),
            &DescribeOptions::new(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.alt_text, "A lighthouse.");
}

#[tokio::test]
async fn http_error_aborts_batch_with_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(DEPLOYMENT_PATH);
            then.status(401)
                .json_body(json!({"error": {"code": "401", "message": "Access denied"}}));
        })
        .await;

    let generator = AltTextGenerator::new(&config_for(&server)).unwrap();
    let err = generator
        .describe_batch(
            &[ImageSource::from_bytes("a.jpg", JPEG.to_vec())],
            &DescribeOptions::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.file_name, "a.jpg");
    assert!(err.completed.is_empty());
    match &err.source {
        PipelineError::Llm {
            status_code,
            message,
        } => {
            assert_eq!(*status_code, Some(401));
            assert!(message.contains("Access denied"));
        }
        other => panic!("expected Llm error, got {other:?}"),
    }
}

#[tokio::test]
async fn response_without_usage_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(DEPLOYMENT_PATH);
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "A dog."}}]
            }));
        })
        .await;

    let generator = AltTextGenerator::new(&config_for(&server)).unwrap();
    let err = generator
        .describe_one(
            &ImageSource::from_bytes("dog.jpg", JPEG.to_vec()),
            &DescribeOptions::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Llm { ref message, .. } if message.contains("usage")));
}

#[tokio::test]
async fn missing_file_never_reaches_the_api() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(DEPLOYMENT_PATH);
            then.status(200).json_body(completion("unused", 1, 1));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");

    let generator = AltTextGenerator::new(&config_for(&server)).unwrap();
    let err = generator
        .describe_batch(&[ImageSource::from_path(&missing)], &DescribeOptions::new())
        .await
        .unwrap_err();

    mock.assert_hits_async(0).await;
    assert!(matches!(err.source, PipelineError::FileNotFound(ref p) if *p == missing));
    assert!(err.completed.is_empty());
}

#[tokio::test]
async fn slow_response_is_reported_as_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(DEPLOYMENT_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .delay(std::time::Duration::from_millis(1_500))
                .json_body(completion("too late", 10, 5));
        })
        .await;

    let mut config = config_for(&server);
    config.limits.request_timeout_ms = 100;
    let generator = AltTextGenerator::new(&config).unwrap();

    let err = generator
        .describe_one(
            &ImageSource::from_bytes("slow.jpg", JPEG.to_vec()),
            &DescribeOptions::new(),
        )
        .await
        .unwrap_err();
    match err {
        PipelineError::Timeout {
            stage, timeout_ms, ..
        } => {
            assert_eq!(stage, "inference");
            assert_eq!(timeout_ms, 100);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}
