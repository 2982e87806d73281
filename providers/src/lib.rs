//! Explanation provider client.
//!
//! # Architecture
//!
//! The arithmetic engine computes a result and a step trace; this crate turns
//! that trace into a conceptual prose explanation by calling the Gemini
//! GenerateContent API. The call is strictly optional and read-only from the
//! engine's perspective: it consumes the already-flattened trace and its
//! latency or failure never affects the computed result.
//!
//! - [`GeminiClient`] - holds credentials, model, and endpoint
//! - [`ExplainRequest`] - the operation, operands, flattened steps, and result
//! - [`retry`] - exponential-backoff retry policy shared by all requests
//!
//! # Error Handling
//!
//! All failures surface as `anyhow::Error`; the presentation layer decides
//! whether to show them or fall back to a fixed "explanation unavailable"
//! message.

pub mod gemini;
pub mod retry;

pub use gemini::{ExplainRequest, GeminiClient};

pub(crate) use anyhow::Result;

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const CONNECT_TIMEOUT_SECS: u64 = 30;
const REQUEST_TIMEOUT_SECS: u64 = 60;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

pub(crate) fn http_client() -> &'static reqwest::Client {
    use std::sync::OnceLock;
    use std::time::Duration;

    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Falling back to defaults.");
                reqwest::Client::new()
            })
    })
}

/// Read an error response body, capped so a hostile or broken server cannot
/// make us buffer arbitrary amounts of text.
pub(crate) async fn read_capped_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(mut body) => {
            if body.len() > MAX_ERROR_BODY_BYTES {
                body.truncate(MAX_ERROR_BODY_BYTES);
                body.push_str("... (truncated)");
            }
            body
        }
        Err(e) => format!("<failed to read error body: {e}>"),
    }
}
