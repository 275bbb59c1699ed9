//! ModelProvider implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, Fault, GenerateCall, ModelProvider, ProviderReply};

use super::client::GeminiClient;

#[async_trait]
impl ModelProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, call: &GenerateCall<'_>) -> Result<ProviderReply, Fault> {
        let body = Self::build_request_body(call);
        let url = self.api_url(call.model);

        debug!(
            model = %call.model,
            turns = call.contents.len(),
            structured = call.response_schema.is_some(),
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_fault)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Fault::http(
                status.as_u16(),
                Self::describe_http_error(status, &text),
            ));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                Fault::from(AiError::MalformedResponse(format!(
                    "response body is not JSON: {}",
                    e.without_url()
                )))
            } else {
                transport_fault(e)
            }
        })?;

        let reply = Self::parse_response(&json)?;
        debug!(
            finish_reason = ?reply.finish_reason,
            output_tokens = reply.usage.output_tokens,
            "Gemini API reply"
        );
        Ok(reply)
    }
}

/// Transport errors carry the word "network" so they classify as
/// `NetworkFailure`. The URL is dropped from the message.
fn transport_fault(err: reqwest::Error) -> Fault {
    let err = err.without_url();
    if err.is_timeout() {
        Fault::raw(format!("network error: request timed out ({err})"))
    } else {
        Fault::raw(format!("network error: {err}"))
    }
}
