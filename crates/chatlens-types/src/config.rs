//! Runtime configuration types for Chatlens.
//!
//! `ChatlensConfig` represents `chatlens.toml`. Every field has a default, so
//! an empty file (or no file) yields a working configuration. The prompt
//! template and the embedded dataset ship as assets of this crate.

use serde::{Deserialize, Serialize};

/// Instruction template used when no `[prompt] template` is configured.
pub const DEFAULT_PROMPT_TEMPLATE: &str = include_str!("../assets/prompt_template.txt");

/// Tab-separated engagement dataset used when no `[prompt] context` is configured.
pub const DEFAULT_CONTEXT: &str = include_str!("../assets/context.tsv");

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatlensConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `index.html`, `analyzer.html` and `static/`.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> String {
    "web".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

/// Outbound chat-completion endpoint settings.
///
/// The credential itself is not stored here; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_endpoint_base")]
    pub endpoint_base: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_endpoint_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model_id() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_api_key_env() -> String {
    "CHATLENS_API_KEY".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint_base: default_endpoint_base(),
            model_id: default_model_id(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Prompt template, context block, and the field the user's text fills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_context")]
    pub context: String,
    #[serde(default = "default_query_field")]
    pub query_field: String,
}

fn default_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

fn default_query_field() -> String {
    "user_query".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            context: default_context(),
            query_field: default_query_field(),
        }
    }
}

/// Keywords that trigger the analysis payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    ["analytics", "stats", "metrics"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}
