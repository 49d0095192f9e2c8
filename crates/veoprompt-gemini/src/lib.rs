//! Gemini function-calling client for video prompt normalization.
//!
//! This crate turns a free-form video description into a validated
//! [`VideoPrompt`](veoprompt_models::VideoPrompt) through one
//! structured-generation round-trip against the Gemini API:
//! - the function-call contract is derived mechanically from the schema model
//! - the model is forced into structured output (no free-text fallback)
//! - the returned arguments are validated before anything reaches a caller

pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod types;

#[cfg(test)]
mod client_tests;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use error::{GeminiError, GeminiResult};
