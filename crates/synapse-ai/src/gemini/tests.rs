//! Request mapping and response parsing tests for the Gemini client.

use serde_json::json;

use super::*;
use crate::prompt::{assemble, Attachment, ModeFlags};
use crate::{classify, AiError, Content, ErrorKind, Fault, GenerateCall};

fn call<'a>(contents: &'a [Content], schema: Option<&'a serde_json::Value>) -> GenerateCall<'a> {
    GenerateCall {
        model: "gemini-test",
        system_instruction: "Be kind.",
        contents,
        thinking_budget: 0,
        response_schema: schema,
    }
}

#[test]
fn api_url_joins_base_and_model() {
    let client =
        GeminiClient::new(GeminiConfig::new("key").with_base_url("http://localhost:9/models/"))
            .unwrap();
    assert_eq!(
        client.api_url("gemini-test"),
        "http://localhost:9/models/gemini-test:generateContent"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let config = GeminiConfig::new("super-secret");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn request_body_maps_parts_and_instruction() {
    let attachment = Attachment::new("a.png", "image/png", "data:image/png;base64,AAAA");
    let request = assemble("what is this", &[attachment], ModeFlags::default()).unwrap();
    let contents = vec![
        Content::user(vec![crate::Part::text("hi")]),
        Content::model_text("hello!"),
        Content::user(request.into_parts()),
    ];

    let body = GeminiClient::build_request_body(&call(&contents, None));

    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be kind.");
    assert_eq!(body["contents"][1]["role"], "model");
    assert_eq!(
        body["contents"][2]["parts"],
        json!([
            { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
            { "text": "what is this" },
        ])
    );
    assert_eq!(
        body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
        0
    );
    assert!(body["generationConfig"].get("responseSchema").is_none());
}

#[test]
fn structured_request_declares_schema() {
    let schema = crate::schema::response_schema();
    let contents = vec![Content::user(vec![crate::Part::text("notes")])];

    let body = GeminiClient::build_request_body(&call(&contents, Some(&schema)));

    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(body["generationConfig"]["responseSchema"], schema);
}

#[test]
fn blank_instruction_is_omitted() {
    let contents = vec![Content::user(vec![crate::Part::text("x")])];
    let mut c = call(&contents, None);
    c.system_instruction = "  ";
    let body = GeminiClient::build_request_body(&c);
    assert!(body.get("systemInstruction").is_none());
}

#[test]
fn parse_joins_text_and_skips_thoughts() {
    let response = json!({
        "candidates": [{
            "content": { "role": "model", "parts": [
                { "text": "pondering", "thought": true },
                { "text": "Hello, " },
                { "text": "friend." }
            ]},
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 }
    });

    let reply = GeminiClient::parse_response(&response).unwrap();
    assert_eq!(reply.text, "Hello, friend.");
    assert_eq!(reply.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(reply.usage.input_tokens, 12);
    assert_eq!(reply.usage.output_tokens, 4);
}

#[test]
fn parse_safety_stop_without_parts() {
    let response = json!({
        "candidates": [{ "finishReason": "SAFETY" }]
    });
    let reply = GeminiClient::parse_response(&response).unwrap();
    assert!(reply.text.is_empty());
    assert_eq!(reply.finish_reason.as_deref(), Some("SAFETY"));
}

#[test]
fn parse_blocked_prompt() {
    let response = json!({
        "promptFeedback": { "blockReason": "PROHIBITED_CONTENT" }
    });
    let reply = GeminiClient::parse_response(&response).unwrap();
    assert!(reply.text.is_empty());
    assert_eq!(reply.finish_reason.as_deref(), Some("PROHIBITED_CONTENT"));
}

#[test]
fn parse_without_candidates_is_malformed() {
    let err = GeminiClient::parse_response(&json!({})).unwrap_err();
    assert!(matches!(
        err,
        Fault::Classified(AiError::MalformedResponse(_))
    ));
}

#[test]
fn http_error_uses_google_error_body() {
    let body = r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#;
    let message = GeminiClient::describe_http_error(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
    assert_eq!(
        message,
        "HTTP 429 Too Many Requests: RESOURCE_EXHAUSTED: Resource has been exhausted (e.g. check quota)."
    );
    assert_eq!(
        classify(Fault::http(429, message)).kind(),
        ErrorKind::QuotaExceeded
    );
}

#[test]
fn invalid_key_response_classifies_as_auth() {
    let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
    let message = GeminiClient::describe_http_error(reqwest::StatusCode::BAD_REQUEST, body);
    assert_eq!(
        classify(Fault::http(400, message)).kind(),
        ErrorKind::AuthFailure
    );
}

#[test]
fn http_error_with_plain_body() {
    let message =
        GeminiClient::describe_http_error(reqwest::StatusCode::SERVICE_UNAVAILABLE, "overloaded\n");
    assert_eq!(message, "HTTP 503 Service Unavailable: overloaded");

    let message = GeminiClient::describe_http_error(reqwest::StatusCode::BAD_GATEWAY, "");
    assert_eq!(message, "HTTP 502 Bad Gateway");
}
