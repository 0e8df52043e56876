//! Prompt construction for the completion endpoint.
//!
//! A prompt is a template filled from a context block and any number of named
//! fields. Substitution is tolerant: a template may mention optional fields the
//! caller does not supply, and those render as the empty string.

use std::collections::HashMap;

use chatlens_types::config::PromptConfig;
use chatlens_types::message::Message;

use crate::template::render_tolerant;

/// Field name the context block is bound to.
pub const CONTEXT_FIELD: &str = "context";

/// Builds prompts from a fixed template and context block.
///
/// Layout of the default template:
/// ```text
/// You are a social media analyst. Follow these rules strictly:
/// ...
/// Analyze this data: {context}
/// User question: {user_query}
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
    context: String,
    query_field: String,
}

impl PromptBuilder {
    pub fn new(
        template: impl Into<String>,
        context: impl Into<String>,
        query_field: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            context: context.into(),
            query_field: query_field.into(),
        }
    }

    pub fn from_config(config: &PromptConfig) -> Self {
        Self::new(&config.template, &config.context, &config.query_field)
    }

    /// Merge `fields` with `context` (bound to `context`, overriding any field
    /// of that name) and substitute into `template`.
    ///
    /// Never fails. The returned message keeps the default sender.
    pub fn build(template: &str, context: &str, fields: &[(&str, &str)]) -> Message {
        let mut merged: HashMap<String, String> = fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        merged.insert(CONTEXT_FIELD.to_string(), context.to_string());

        Message::new(render_tolerant(template, &merged))
    }

    /// Build the prompt for one user question.
    pub fn prompt_for(&self, query: &str) -> Message {
        Self::build(
            &self.template,
            &self.context,
            &[(self.query_field.as_str(), query)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_types::config::{DEFAULT_CONTEXT, DEFAULT_PROMPT_TEMPLATE};
    use chatlens_types::message::MessageSender;

    #[test]
    fn test_build_fills_context_and_fields() {
        let msg = PromptBuilder::build(
            "Data: {context}\nQ: {user_query}",
            "a\tb",
            &[("user_query", "top channel?")],
        );
        assert_eq!(msg.text, "Data: a\tb\nQ: top channel?");
        assert_eq!(msg.sender, MessageSender::User);
        assert_eq!(msg.sender_name, "User");
    }

    #[test]
    fn test_build_missing_fields_render_empty() {
        let msg = PromptBuilder::build("{context}|{tone}|{user_query}", "ctx", &[]);
        assert_eq!(msg.text, "ctx||");
    }

    #[test]
    fn test_context_argument_wins_over_field() {
        let msg = PromptBuilder::build("{context}", "real", &[("context", "shadowed")]);
        assert_eq!(msg.text, "real");
    }

    #[test]
    fn test_build_with_stray_braces_does_not_fail() {
        let msg = PromptBuilder::build("json: {\"k\": 1} {context}", "c", &[]);
        assert!(msg.text.ends_with('c'));
    }

    #[test]
    fn test_prompt_for_uses_configured_query_field() {
        let builder = PromptBuilder::new("{question} / {context}", "rows", "question");
        assert_eq!(builder.prompt_for("hi").text, "hi / rows");
    }

    #[test]
    fn test_default_config_prompt() {
        let builder = PromptBuilder::from_config(&PromptConfig::default());
        let prompt = builder.prompt_for("which post did best?");
        assert!(prompt.text.starts_with("You are a social media analyst."));
        assert!(prompt.text.contains("User question: which post did best?"));
        assert!(prompt.text.contains(DEFAULT_CONTEXT.lines().next().unwrap()));
        assert!(!prompt.text.contains("{context}"));
        assert_ne!(prompt.text, DEFAULT_PROMPT_TEMPLATE);
    }
}
