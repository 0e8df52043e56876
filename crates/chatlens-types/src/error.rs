use std::time::Duration;

use thiserror::Error;

/// Errors raised while constructing a message from untyped input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

/// Errors from strict template substitution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("template references undefined placeholder '{0}'")]
    MissingKey(String),

    #[error("unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },

    #[error("positional placeholder '{{}}' at byte {position} is not supported")]
    PositionalField { position: usize },
}

/// Errors from a chat-completion call.
///
/// Transport-class variants cover everything between us and a usable HTTP
/// response. `Unexpected` covers a response we could not make sense of.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("{0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Unexpected(String),
}

impl CompletionError {
    /// Whether the failure happened while talking to the endpoint, as opposed
    /// to while interpreting its answer.
    pub fn is_transport(&self) -> bool {
        !matches!(self, CompletionError::Unexpected(_))
    }

    /// Text shown to the end user in place of a model reply.
    pub fn display_text(&self) -> String {
        if self.is_transport() {
            format!("Error communicating with AI service: {self}")
        } else {
            format!("An unexpected error occurred: {self}")
        }
    }
}

/// Errors from loading the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
