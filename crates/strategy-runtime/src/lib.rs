//! # strategy-runtime
//!
//! Upstream providers for the strategy proxy.
//!
//! ## Providers
//!
//! - **Together.ai** (default): chat completions or raw text completions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strategy_runtime::TogetherProvider;
//!
//! let provider = TogetherProvider::from_env()?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

#[cfg(feature = "together")]
pub mod together;

#[cfg(feature = "together")]
pub use together::{ApiKeySource, ApiMode, TogetherConfig, TogetherProvider};

// Re-export core types for convenience
pub use strategy_core::{Completion, GenerationOptions, LlmProvider, Message, Result, StrategyError};
