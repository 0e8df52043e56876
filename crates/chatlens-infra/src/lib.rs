//! Infrastructure implementations for Chatlens.
//!
//! - `llm`: HTTP client for OpenAI-compatible chat-completion endpoints
//! - `config`: `chatlens.toml` loading with environment overrides

pub mod config;
pub mod llm;
