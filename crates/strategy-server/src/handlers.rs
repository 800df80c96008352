//! HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use strategy_core::{
    message::{total_chars, Message, Role},
    provider::{FinishReason, TokenUsage},
};

use crate::error::{ApiError, INVALID_BODY_MESSAGE};
use crate::state::AppState;

/// Reply used when the upstream returned an empty completion
pub const EMPTY_REPLY: &str = "No reply";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
}

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub reply: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// `length` tells the page the strategy was cut at `max_tokens`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub upstream_configured: bool,
}

impl ProxyRequest {
    /// Turn the body into the message list sent upstream, enforcing the
    /// non-empty and length invariants.
    pub fn into_messages(self, max_chars: usize) -> Result<Vec<Message>, ApiError> {
        let messages = match (self.messages, self.prompt) {
            (Some(messages), _) if !messages.is_empty() => {
                let has_user_text = messages
                    .iter()
                    .any(|m| m.role == Role::User && !m.content.trim().is_empty());
                if !has_user_text {
                    return Err(ApiError::BadRequest(INVALID_BODY_MESSAGE.into()));
                }
                messages
            }
            (_, Some(prompt)) if !prompt.trim().is_empty() => vec![Message::user(prompt)],
            _ => return Err(ApiError::BadRequest(INVALID_BODY_MESSAGE.into())),
        };

        let chars = total_chars(&messages);
        if chars > max_chars {
            return Err(ApiError::InvalidPrompt(format!(
                "prompt is {chars} characters; the limit is {max_chars}"
            )));
        }

        Ok(messages)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_configured = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name().to_string(),
        upstream_configured,
    })
}

/// Proxy a prompt to the upstream completion API
pub async fn generate_strategy(
    State(state): State<AppState>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("generate_strategy", %request_id);

    forward_prompt(&state, payload).instrument(span).await
}

async fn forward_prompt(
    state: &AppState,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(%rejection, "unreadable request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.into())
    })?;

    let messages = request
        .into_messages(state.config.max_prompt_chars)
        .inspect_err(|e| tracing::warn!(error = ?e, "rejected prompt"))?;

    tracing::info!(chars = total_chars(&messages), "forwarding prompt");

    let completion = state
        .provider
        .complete(&messages, &state.config.generation)
        .await
        .map_err(|e| {
            tracing::error!(provider = state.provider.name(), "generation failed: {}", e);
            ApiError::from(e)
        })?;

    tracing::info!(
        model = %completion.model,
        reply_chars = completion.content.chars().count(),
        finish_reason = ?completion.finish_reason,
        "strategy generated"
    );

    let reply = if completion.content.is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        completion.content
    };

    Ok(Json(StrategyResponse {
        reply,
        model: completion.model,
        usage: completion.usage,
        finish_reason: completion.finish_reason,
    }))
}

/// Answer a bare `OPTIONS` with the permissive CORS headers
pub async fn preflight() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    (StatusCode::NO_CONTENT, headers)
}

/// Any other method on the proxy route
pub async fn method_not_allowed() -> ApiError {
    tracing::warn!("rejected non-POST request to proxy");
    ApiError::MethodNotAllowed
}
