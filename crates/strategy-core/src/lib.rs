//! # strategy-core
//!
//! Domain logic for the marketing strategy generator: form validation,
//! prompt construction, survey checks, UI view-state, and the provider
//! abstraction the proxy forwards prompts through.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  validate  ┌───────────────────┐  build_prompt  ┌────────┐
//! │ StrategyForm │───────────▶│ ValidatedStrategy │───────────────▶│ prompt │
//! └──────────────┘            └───────────────────┘                └───┬────┘
//!                                                                      │ POST
//!                                                ┌─────────────────────▼─────┐
//!                                                │ proxy ─▶ LlmProvider      │
//!                                                └───────────────────────────┘
//! ```
//!
//! Nothing in this crate performs I/O, so it compiles for both the server
//! and the WASM frontend.

pub mod error;
pub mod form;
pub mod message;
pub mod prompt;
pub mod provider;
pub mod survey;
pub mod view_state;

pub use error::{Result, StrategyError};
pub use form::{FieldId, StrategyForm, ValidatedStrategy, ValidationErrors};
pub use message::{Message, Role};
pub use prompt::{build_prompt, Placeholder};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use survey::{SurveyField, SurveyForm};
pub use view_state::{ModalController, ModalId, SubmissionState, Theme};

/// System instruction sent ahead of every chat-style request
pub const STRATEGIST_SYSTEM_PROMPT: &str =
    "You are a world-class marketing strategist. Respond clearly and concisely.";
