//! Gemini GenerateContent client for step-trace explanations.

use anyhow::Context;
use binsteps_types::Operation;
use serde_json::{Value, json};

use crate::retry::{RetryConfig, RetryOutcome, send_with_retry};
use crate::{GEMINI_API_BASE_URL, Result, http_client, read_capped_error_body};

/// Default model for explanations.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Everything the explanation prompt is built from: the operation, the raw
/// operands, the flattened step trace, and the computed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub operation: Operation,
    pub a: String,
    pub b: String,
    pub steps_text: String,
    pub result: String,
}

/// Client for the Gemini GenerateContent API.
///
/// `Debug` is implemented manually to redact the API key, preventing
/// accidental credential disclosure in logs or error messages.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint, used by tests to point at a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Ask the model for a conceptual explanation of a finished derivation.
    ///
    /// The step trace is supplied as reference material only; the prompt asks
    /// for the *why* behind the steps rather than a restatement of them.
    pub async fn explain(&self, request: &ExplainRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = build_request_body(&build_prompt(request));

        tracing::debug!(operation = request.operation.as_str(), "Requesting explanation");

        let outcome = send_with_retry(
            || {
                http_client()
                    .post(&url)
                    .header("x-goog-api-key", &self.api_key)
                    .header("content-type", "application/json")
                    .json(&body)
            },
            &RetryConfig::default(),
        )
        .await;

        let response = match outcome {
            RetryOutcome::Success(response) => response,
            RetryOutcome::HttpError(response) => {
                let status = response.status();
                let body = read_capped_error_body(response).await;
                anyhow::bail!("Gemini request failed: {status} - {body}");
            }
            RetryOutcome::ConnectionError { attempts, source } => {
                return Err(source)
                    .with_context(|| format!("connection failed after {attempts} attempts"));
            }
        };

        let payload: Value = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;
        extract_text(&payload)
            .ok_or_else(|| anyhow::anyhow!("Gemini response contained no text candidates"))
    }
}

fn build_prompt(request: &ExplainRequest) -> String {
    format!(
        "You are an expert computer science teacher.\n\
         Explain the following binary operation clearly, concisely, and in a \
         beginner-friendly way.\n\
         Do not repeat the calculation steps provided below; instead, explain \
         the *why* behind those steps and the concept underlying them.\n\
         \n\
         Operation: {operation}\n\
         Number 1: {a}\n\
         Number 2: {b}\n\
         Result: {result}\n\
         \n\
         Derivation steps (for your reference only, do not copy them verbatim):\n\
         {steps}\n\
         \n\
         Provide a conceptual explanation of how the result was reached.",
        operation = request.operation.display_name(),
        a = request.a,
        b = request.b,
        result = request.result,
        steps = request.steps_text,
    )
}

fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Concatenate the text parts of the first candidate, if any.
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("");
    if text.is_empty() { None } else { Some(text) }
}
