//! LLM Provider Strategy Pattern
//!
//! Common interface for completion backends. The proxy talks to the
//! upstream API exclusively through [`LlmProvider`], which keeps the HTTP
//! handlers testable with an in-process stub.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strategy_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = TogetherProvider::from_env();
//! let completion = provider.complete(&[Message::user(prompt)], &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

/// Default upstream model identifier
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Stop sequences
    #[serde(default)]
    pub stop_sequences: Vec<String>,

    /// System instruction, sent separately by providers that support roles
    #[serde(default)]
    pub system_prompt: Option<String>,
}

const fn default_temperature() -> f32 { 0.7 }
const fn default_max_tokens() -> u32 { 500 }
const fn default_top_p() -> f32 { 0.9 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            stop_sequences: Vec::new(),
            system_prompt: None,
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

/// Token usage statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

impl FinishReason {
    /// Map the upstream `finish_reason` string
    pub fn from_upstream(reason: &str) -> Self {
        match reason {
            "stop" | "eos" => Self::Stop,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Other,
        }
    }
}

/// Strategy trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name, used in logs
    fn name(&self) -> &str;

    /// Check whether the provider has what it needs (e.g. an API key) to serve requests
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            let last = messages
                .last()
                .ok_or_else(|| StrategyError::InvalidPrompt("no messages".into()))?;
            Ok(Completion {
                content: last.content.clone(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            })
        }
    }

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!((opts.temperature - 0.7).abs() < f32::EPSILON);
        assert!((opts.top_p - 0.9).abs() < f32::EPSILON);
        assert_eq!(opts.max_tokens, 500);
        assert_eq!(opts.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(FinishReason::from_upstream("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_upstream("eos"), FinishReason::Stop);
        assert_eq!(FinishReason::from_upstream("length"), FinishReason::Length);
        assert_eq!(FinishReason::from_upstream("tool_calls"), FinishReason::Other);
    }

    #[tokio::test]
    async fn test_provider_trait_object() {
        let provider: Box<dyn LlmProvider> = Box::new(EchoProvider);
        let completion = provider
            .complete(&[Message::user("hello")], &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(completion.content, "hello");
        assert!(provider.health_check().await.unwrap());
    }
}
