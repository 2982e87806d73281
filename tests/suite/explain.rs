//! Full-pipeline explanation tests: engine trace -> flatten -> Gemini client.

use binsteps_engine::add;
use binsteps_providers::{ExplainRequest, GeminiClient, gemini};
use binsteps_types::{Operation, flatten_steps};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::{bin, value_of};

fn request_from_engine() -> ExplainRequest {
    let result = add(&bin("1010"), &bin("0110"));
    ExplainRequest {
        operation: Operation::Add,
        a: "1010".to_string(),
        b: "0110".to_string(),
        steps_text: flatten_steps(&result.steps),
        result: value_of(&result),
    }
}

#[tokio::test]
async fn explanation_request_carries_flattened_trace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Columns carry leftward." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", gemini::DEFAULT_MODEL).with_base_url(server.uri());
    let text = client.explain(&request_from_engine()).await.unwrap();
    assert_eq!(text, "Columns carry leftward.");

    // The prompt embeds the trace: alignment step, per-column steps, and the
    // final result all travel to the provider.
    let requests = server.received_requests().await.unwrap();
    let prompt = prompt_of(&requests[0]);
    assert!(prompt.contains("1. Alignment"));
    assert!(prompt.contains("2.1: Adding column 0"));
    assert!(prompt.contains("Result: 10000"));
    assert!(prompt.contains("do not copy them verbatim"));
}

#[tokio::test]
async fn explanation_body_is_generate_content_shaped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "contents": [{}] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "ok" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key", gemini::DEFAULT_MODEL).with_base_url(server.uri());
    client.explain(&request_from_engine()).await.unwrap();
}

#[tokio::test]
async fn provider_failure_does_not_poison_the_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    // The arithmetic result exists before and independently of the failed
    // explanation call.
    let result = add(&bin("1010"), &bin("0110"));
    assert_eq!(value_of(&result), "10000");

    let client = GeminiClient::new("test-key", gemini::DEFAULT_MODEL).with_base_url(server.uri());
    let err = client.explain(&request_from_engine()).await.unwrap_err();
    assert!(err.to_string().contains("403"));
    assert_eq!(value_of(&result), "10000");
}

fn prompt_of(request: &Request) -> String {
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}
