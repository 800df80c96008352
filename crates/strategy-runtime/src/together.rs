//! Together.ai Provider
//!
//! Implementation of `LlmProvider` over the Together.ai HTTP API. The API
//! key is resolved on every call, so rotating or removing it takes effect
//! without a restart.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use strategy_core::{
    error::{Result, StrategyError},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};

pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";
pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";

/// Stop sequences sent with raw completions
const COMPLETION_STOP: [&str; 2] = ["", "\n\n"];

/// Which upstream endpoint to call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiMode {
    /// `/chat/completions` with a system + user message list
    #[default]
    Chat,
    /// `/completions` with the prompt as raw text
    Completion,
}

impl ApiMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chat" => Some(Self::Chat),
            "completion" | "completions" => Some(Self::Completion),
            _ => None,
        }
    }

    const fn path(self) -> &'static str {
        match self {
            Self::Chat => "chat/completions",
            Self::Completion => "completions",
        }
    }
}

/// Where the API key comes from
#[derive(Clone)]
pub enum ApiKeySource {
    /// Read from this environment variable at request time
    Env(String),
    /// Fixed key, mainly for tests
    Static(String),
}

impl ApiKeySource {
    /// Resolve the key; blank values count as missing
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            Self::Env(var) => std::env::var(var).ok()?,
            Self::Static(key) => key.clone(),
        };
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }

    fn describe(&self) -> String {
        match self {
            Self::Env(var) => format!("{var} not set"),
            Self::Static(_) => "static API key is empty".into(),
        }
    }
}

// Never print the key itself.
impl std::fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(var) => f.debug_tuple("Env").field(var).finish(),
            Self::Static(_) => f.debug_tuple("Static").field(&"<redacted>").finish(),
        }
    }
}

/// Together.ai provider configuration
#[derive(Clone, Debug)]
pub struct TogetherConfig {
    /// API base URL, without trailing endpoint path
    pub base_url: String,

    pub mode: ApiMode,

    pub api_key: ApiKeySource,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TogetherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            mode: ApiMode::Chat,
            api_key: ApiKeySource::Env(API_KEY_ENV.into()),
            timeout_secs: 120,
        }
    }
}

impl TogetherConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("TOGETHER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mode = std::env::var("TOGETHER_API_MODE")
            .ok()
            .and_then(|m| {
                let parsed = ApiMode::parse(&m);
                if parsed.is_none() {
                    tracing::warn!(value = %m, "unknown TOGETHER_API_MODE, using chat");
                }
                parsed
            })
            .unwrap_or_default();
        let timeout_secs = std::env::var("TOGETHER_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(120);

        Self {
            base_url,
            mode,
            timeout_secs,
            ..Default::default()
        }
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.mode.path())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stop: Vec<String>,
}

/// Together.ai LLM provider
pub struct TogetherProvider {
    client: reqwest::Client,
    config: TogetherConfig,
}

impl TogetherProvider {
    /// Create from configuration
    pub fn from_config(config: TogetherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StrategyError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(TogetherConfig::from_env())
    }

    pub const fn config(&self) -> &TogetherConfig {
        &self.config
    }

    fn api_key(&self) -> Result<String> {
        self.config
            .api_key
            .resolve()
            .ok_or_else(|| StrategyError::Config(self.config.api_key.describe()))
    }

    /// Chat payload; the system instruction is prepended unless the caller sent one
    fn chat_body<'a>(messages: &[Message], options: &'a GenerationOptions) -> ChatRequest<'a> {
        let mut list = Vec::with_capacity(messages.len() + 1);
        let has_system = messages.iter().any(|m| m.role == Role::System);
        if let (false, Some(system)) = (has_system, options.system_prompt.as_ref()) {
            list.push(Message::system(system.clone()));
        }
        list.extend(messages.iter().cloned());

        ChatRequest {
            model: &options.model,
            messages: list,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop: options.stop_sequences.clone(),
        }
    }

    /// Raw-completion payload; only non-system content is forwarded
    fn completion_body<'a>(
        messages: &[Message],
        options: &'a GenerationOptions,
    ) -> CompletionRequest<'a> {
        let prompt = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let stop = if options.stop_sequences.is_empty() {
            COMPLETION_STOP.iter().map(ToString::to_string).collect()
        } else {
            options.stop_sequences.clone()
        };

        CompletionRequest {
            model: &options.model,
            prompt,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop,
        }
    }
}

/// Pull the generated text out of an upstream payload.
///
/// Looks at `choices[0].message.content` and `choices[0].text`, preferring
/// the one that matches `mode`.
pub fn parse_completion(mode: ApiMode, payload: &Value, model: &str) -> Result<Completion> {
    let choice = payload
        .pointer("/choices/0")
        .ok_or_else(|| StrategyError::MalformedResponse("missing choices[0]".into()))?;

    let chat_text = choice.pointer("/message/content").and_then(Value::as_str);
    let raw_text = choice.get("text").and_then(Value::as_str);
    let content = match mode {
        ApiMode::Chat => chat_text.or(raw_text),
        ApiMode::Completion => raw_text.or(chat_text),
    }
    .ok_or_else(|| StrategyError::MalformedResponse("choices[0] has no generated text".into()))?;

    Ok(Completion {
        content: content.trim().to_string(),
        model: payload
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(model)
            .to_string(),
        usage: payload
            .get("usage")
            .and_then(|u| serde_json::from_value::<TokenUsage>(u.clone()).ok()),
        finish_reason: choice
            .get("finish_reason")
            .and_then(Value::as_str)
            .map(FinishReason::from_upstream),
    })
}

/// Extract a human-readable reason from an upstream error body
fn upstream_reason(payload: Option<&Value>) -> Option<String> {
    let error = payload?.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}

#[async_trait]
impl LlmProvider for TogetherProvider {
    fn name(&self) -> &str {
        "Together.ai"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.api_key.resolve().is_some())
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let key = self.api_key()?;
        let endpoint = self.config.endpoint();

        let request = self.client.post(&endpoint).bearer_auth(key);
        let request = match self.config.mode {
            ApiMode::Chat => request.json(&Self::chat_body(messages, options)),
            ApiMode::Completion => request.json(&Self::completion_body(messages, options)),
        };

        tracing::debug!(%endpoint, model = %options.model, "calling upstream");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                StrategyError::ProviderUnavailable(e.to_string())
            } else {
                StrategyError::Provider(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StrategyError::Provider(e.to_string()))?;
        let payload = serde_json::from_str::<Value>(&body).ok();

        if !status.is_success() {
            let reason = upstream_reason(payload.as_ref())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".into());
            tracing::warn!(status = status.as_u16(), %reason, "upstream request failed");
            return Err(StrategyError::Upstream {
                status: status.as_u16(),
                message: format!("Upstream API request failed: {reason}"),
                details: payload.unwrap_or(Value::String(body)),
            });
        }

        let payload = payload.ok_or_else(|| {
            StrategyError::MalformedResponse("upstream body is not valid JSON".into())
        })?;

        parse_completion(self.config.mode, &payload, &options.model)
    }
}
