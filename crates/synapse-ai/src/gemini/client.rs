//! Gemini API client struct, request building, and response parsing.

use serde_json::{json, Value};

use crate::prompt::Part;
use crate::{AiError, Fault, GenerateCall, ProviderReply, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::Unknown(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(call: &GenerateCall<'_>) -> Value {
        let contents: Vec<Value> = call
            .contents
            .iter()
            .map(|content| {
                json!({
                    "role": content.role.as_str(),
                    "parts": content.parts.iter().map(to_gemini_part).collect::<Vec<_>>(),
                })
            })
            .collect();

        let mut generation_config = json!({
            "thinkingConfig": { "thinkingBudget": call.thinking_budget }
        });
        if let Some(schema) = call.response_schema {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = schema.clone();
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });

        if !call.system_instruction.trim().is_empty() {
            body["systemInstruction"] = json!({
                "parts": [{ "text": call.system_instruction }]
            });
        }

        body
    }

    /// Parse a `generateContent` response.
    pub(crate) fn parse_response(json: &Value) -> Result<ProviderReply, Fault> {
        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        let first = json["candidates"].as_array().and_then(|c| c.first());
        let Some(first) = first else {
            // A blocked prompt comes back without candidates.
            if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
                return Ok(ProviderReply {
                    text: String::new(),
                    finish_reason: Some(reason.to_string()),
                    usage,
                });
            }
            return Err(AiError::MalformedResponse("no candidates in response".into()).into());
        };

        let text = first["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter(|part| !part["thought"].as_bool().unwrap_or(false))
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(ProviderReply {
            text,
            finish_reason: first["finishReason"].as_str().map(str::to_string),
            usage,
        })
    }

    /// Render a non-success HTTP response as a fault message. Google error
    /// bodies look like `{"error": {"code", "message", "status"}}`.
    pub(crate) fn describe_http_error(status: reqwest::StatusCode, body: &str) -> String {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let error = parsed.as_ref().map(|v| &v["error"]);
        let google_status = error.and_then(|e| e["status"].as_str());
        let message = error.and_then(|e| e["message"].as_str());

        match (google_status, message) {
            (Some(s), Some(m)) => format!("HTTP {status}: {s}: {m}"),
            (None, Some(m)) => format!("HTTP {status}: {m}"),
            _ if body.trim().is_empty() => format!("HTTP {status}"),
            _ => format!("HTTP {status}: {}", body.trim()),
        }
    }
}

fn to_gemini_part(part: &Part) -> Value {
    match part {
        Part::Binary { mime_type, payload } => json!({
            "inlineData": { "mimeType": mime_type, "data": payload }
        }),
        Part::Text { value } => json!({ "text": value }),
    }
}
