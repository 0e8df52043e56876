//! Completion endpoint clients.

pub mod chat_completions;
