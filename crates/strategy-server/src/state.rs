//! Application State

use std::sync::Arc;

use strategy_core::LlmProvider;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream LLM provider (Together.ai, or a stub in tests)
    pub provider: Arc<dyn LlmProvider>,

    /// Immutable server settings
    pub config: Arc<ServerConfig>,
}
