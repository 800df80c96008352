//! Server Configuration
//!
//! Loaded from environment variables (and `.env`, via `dotenvy`) with
//! defaults suitable for local development. Upstream provider settings
//! live in `strategy_runtime::TogetherConfig`.

use std::path::PathBuf;
use std::str::FromStr;

use strategy_core::{provider::GenerationOptions, STRATEGIST_SYSTEM_PROMPT};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub bind_addr: String,

    /// Directory holding the built WASM frontend
    pub static_dir: PathBuf,

    /// Longest prompt accepted by the proxy, in characters
    pub max_prompt_chars: usize,

    /// Request body cap in bytes
    pub max_body_bytes: usize,

    /// Upstream generation parameters
    pub generation: GenerationOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: PathBuf::from("static"),
            max_prompt_chars: 8000,
            max_body_bytes: 64 * 1024,
            generation: GenerationOptions {
                system_prompt: Some(STRATEGIST_SYSTEM_PROMPT.into()),
                ..Default::default()
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `BIND_ADDR` (default `0.0.0.0:3000`)
    /// - `STATIC_DIR` (default `static`)
    /// - `MAX_PROMPT_CHARS` (default `8000`)
    /// - `MAX_BODY_BYTES` (default `65536`)
    /// - `TOGETHER_MODEL`, `TOGETHER_MAX_TOKENS`, `TOGETHER_TEMPERATURE`, `TOGETHER_TOP_P`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let generation = GenerationOptions {
            model: std::env::var("TOGETHER_MODEL").unwrap_or(defaults.generation.model),
            max_tokens: env_or("TOGETHER_MAX_TOKENS", defaults.generation.max_tokens),
            temperature: env_or("TOGETHER_TEMPERATURE", defaults.generation.temperature),
            top_p: env_or("TOGETHER_TOP_P", defaults.generation.top_p),
            ..defaults.generation
        };

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            max_prompt_chars: env_or("MAX_PROMPT_CHARS", defaults.max_prompt_chars),
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes),
            generation,
        }
    }
}

/// Parse an env var, falling back to `default` when unset or unparseable
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(%key, value = %raw, "ignoring unparseable value");
            default
        }),
        Err(_) => default,
    }
}
