//! LlmClient trait definition and shared HTTP plumbing

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// Every study module is one fresh request: nothing is cached and nothing is
/// retried here. A failed call is reported to the caller as-is; retrying is a
/// user action.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Provider name, for logs and the status line
    fn provider(&self) -> &str;

    /// Model identifier, for logs and the status line
    fn model(&self) -> &str;
}

/// Send a prepared JSON request and decode the JSON response body
///
/// Maps transport failures, 429s and non-2xx statuses onto [`LlmError`]. The body
/// is read as text first so a malformed payload surfaces as [`LlmError::Json`]
/// instead of a transport error.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder, timeout: Duration) -> Result<T, LlmError> {
    let response = request
        .send()
        .await
        .map_err(|e| LlmError::from_transport(e, timeout))?;

    let status = response.status().as_u16();
    debug!(status, "send_json: response received");

    if status == 429 {
        debug!("send_json: rate limited (429)");
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        return Err(LlmError::RateLimited {
            retry_after: Duration::from_secs(retry_after),
        });
    }

    if !response.status().is_success() {
        debug!(%status, "send_json: API error");
        let text = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError { status, message: text });
    }

    let text = response
        .text()
        .await
        .map_err(|e| LlmError::from_transport(e, timeout))?;
    Ok(serde_json::from_str(&text)?)
}
