//! Error Types

use thiserror::Error;

/// Result type alias for strategy operations
pub type Result<T> = std::result::Result<T, StrategyError>;

/// Strategy generation error types
#[derive(Error, Debug)]
pub enum StrategyError {
    /// Transport-level failure talking to the LLM provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or timed out
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Upstream API answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    /// Upstream payload was not JSON or lacked the generated text
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Prompt missing, blank or too long
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    /// Configuration error (missing API key, bad env value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrategyError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(_) | Self::Json(_) => {
                "Failed to generate strategy due to an internal server error.".into()
            }
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            Self::Upstream { message, .. } => message.clone(),
            Self::MalformedResponse(msg) => format!("The AI service returned an unexpected response: {msg}"),
            Self::InvalidPrompt(_) => "Invalid prompt".into(),
            Self::Config(_) => "Server configuration error: API key missing.".into(),
        }
    }
}
