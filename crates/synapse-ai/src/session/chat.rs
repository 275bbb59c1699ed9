//! Async send path for SessionGateway: dispatch, retry, contract checks.

use tracing::{debug, warn};

use crate::classify::classify;
use crate::prompt::OutboundRequest;
use crate::provider::{Content, GenerateCall, ModelProvider, ProviderReply, FINISH_STOP};
use crate::schema::StructuredResult;
use crate::AiError;

use super::manager::SessionGateway;
use super::types::{ConversationSession, Reply, ResponseContract, SessionConfig};

impl SessionGateway {
    /// Send one request and wait for its reply.
    ///
    /// Starts a session first if none is active. The exchange is committed
    /// to history only when the reply satisfies the contract.
    pub async fn send(&mut self, request: OutboundRequest) -> Result<Reply, AiError> {
        if self.session.is_none() {
            debug!("send before start, starting session");
            self.start();
        }

        let Self {
            provider,
            config,
            session,
            tracker,
        } = self;
        let Some(session) = session.as_mut() else {
            return Err(AiError::Unknown("no active session".into()));
        };

        let mut contents = session.history.clone();
        contents.push(Content::user(request.into_parts()));

        let reply = {
            let call = GenerateCall {
                model: &config.model,
                system_instruction: &session.system_instruction,
                contents: &contents,
                thinking_budget: session.thinking_budget,
                response_schema: session.response_schema.as_ref(),
            };
            dispatch(&**provider, &call, config, session).await?
        };
        tracker.record(&reply.usage);

        let accepted = accept(session.contract, &reply)?;

        session.history = contents;
        session.history.push(Content::model_text(reply.text));
        debug!(
            session = %session.id().short(),
            turns = session.turn_count(),
            "exchange committed"
        );
        Ok(accepted)
    }
}

/// One provider call with the timeout and retry policy applied.
async fn dispatch(
    provider: &dyn ModelProvider,
    call: &GenerateCall<'_>,
    config: &SessionConfig,
    session: &ConversationSession,
) -> Result<ProviderReply, AiError> {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(config.request_timeout, provider.generate(call))
            .await
        {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(AiError::NetworkFailure(format!(
                "request timed out after {:?}",
                config.request_timeout
            ))),
        };

        match outcome {
            Ok(reply) => return Ok(reply),
            Err(err) if err.kind().is_transient() && attempt <= config.max_retries => {
                warn!(
                    session = %session.id().short(),
                    attempt,
                    kind = %err.kind(),
                    "transient provider failure, retrying: {}",
                    err.detail()
                );
                tokio::time::sleep(config.retry_backoff).await;
            }
            Err(err) => {
                warn!(
                    session = %session.id().short(),
                    attempt,
                    kind = %err.kind(),
                    "provider call failed: {}",
                    err.detail()
                );
                return Err(err);
            }
        }
    }
}

/// Check a transport-level success against the response contract.
fn accept(contract: ResponseContract, reply: &ProviderReply) -> Result<Reply, AiError> {
    if reply.text.trim().is_empty() {
        let detail = match reply.finish_reason.as_deref() {
            Some(reason) if reason != FINISH_STOP => reason.to_string(),
            _ => "empty reply".to_string(),
        };
        return Err(AiError::MalformedResponse(detail));
    }

    match contract {
        ResponseContract::Freeform => Ok(Reply::Text(reply.text.clone())),
        ResponseContract::Structured => {
            StructuredResult::from_reply(&reply.text).map(Reply::Structured)
        }
    }
}
