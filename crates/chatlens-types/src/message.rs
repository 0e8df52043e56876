//! Chat message domain types.
//!
//! A [`Message`] is one chat turn plus optional display metadata. Messages are
//! built immediately before they are appended to the conversation store and
//! are never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Origin tag for a chat message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Ai,
    #[default]
    User,
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSender::Ai => write!(f, "ai"),
            MessageSender::User => write!(f, "user"),
        }
    }
}

impl FromStr for MessageSender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai" => Ok(MessageSender::Ai),
            "user" => Ok(MessageSender::User),
            other => Err(format!("invalid message sender: '{other}'")),
        }
    }
}

/// Optional provenance descriptor for a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Cosmetic display metadata attached to a message.
///
/// Colors are expected to be CSS color strings but are not validated.
/// Nothing in the pipeline reads these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageProperties {
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

impl MessageProperties {
    /// Bubble colors used for messages typed by the user.
    pub fn user_bubble() -> Self {
        Self {
            background_color: Some("#FFE147".to_string()),
            text_color: Some("#000000".to_string()),
            ..Default::default()
        }
    }

    /// Bubble colors used for replies from the model.
    pub fn ai_bubble() -> Self {
        Self {
            background_color: Some("#FF4D4D".to_string()),
            text_color: Some("#000000".to_string()),
            ..Default::default()
        }
    }
}

fn default_sender_name() -> String {
    Message::DEFAULT_SENDER_NAME.to_string()
}

/// One chat turn.
///
/// Serialization keeps every field, writing `null` for unset optionals, so the
/// front end always sees the full shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message body: user input or model output.
    pub text: String,
    #[serde(default)]
    pub sender: MessageSender,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    /// Reserved for per-session partitioning; not read by the pipeline.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub flow_id: Option<String>,
    /// Attachment identifiers; not read by the pipeline.
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub properties: Option<MessageProperties>,
}

impl Message {
    pub const DEFAULT_SENDER_NAME: &'static str = "User";

    /// Display label used for replies from the model.
    pub const AI_SENDER_NAME: &'static str = "AI Assistant";

    /// Create a message with default sender (`user`) and no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: MessageSender::User,
            sender_name: default_sender_name(),
            session_id: None,
            flow_id: None,
            files: None,
            properties: None,
        }
    }

    /// A message typed by the user, styled with the user bubble.
    pub fn from_user(text: impl Into<String>) -> Self {
        Self::new(text).with_properties(MessageProperties::user_bubble())
    }

    /// A reply from the model, styled with the AI bubble.
    pub fn from_ai(text: impl Into<String>) -> Self {
        Self::new(text)
            .with_sender(MessageSender::Ai, Self::AI_SENDER_NAME)
            .with_properties(MessageProperties::ai_bubble())
    }

    pub fn with_sender(mut self, sender: MessageSender, sender_name: impl Into<String>) -> Self {
        self.sender = sender;
        self.sender_name = sender_name.into();
        self
    }

    pub fn with_properties(mut self, properties: MessageProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

impl TryFrom<serde_json::Value> for Message {
    type Error = ValidationError;

    /// Validated construction from an untyped mapping.
    ///
    /// `text` must be present and non-null; every other field falls back to
    /// its default.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let Some(fields) = value.as_object() else {
            return Err(ValidationError::InvalidField {
                field: "message".to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        match fields.get("text") {
            None | Some(serde_json::Value::Null) => {
                return Err(ValidationError::MissingField("text".to_string()));
            }
            Some(serde_json::Value::String(_)) => {}
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    field: "text".to_string(),
                    reason: "expected a string".to_string(),
                });
            }
        }

        serde_json::from_value(value).map_err(|e| ValidationError::InvalidField {
            field: "message".to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_message_defaults() {
        let msg = Message::new("hello");
        assert_eq!(msg.text, "hello");
        assert_eq!(msg.sender, MessageSender::User);
        assert_eq!(msg.sender_name, "User");
        assert!(msg.session_id.is_none());
        assert!(msg.files.is_none());
        assert!(msg.properties.is_none());
    }

    #[test]
    fn test_serialize_keeps_null_fields() {
        let value = serde_json::to_value(Message::new("hi")).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "text",
            "sender",
            "sender_name",
            "session_id",
            "flow_id",
            "files",
            "properties",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["sender"], "user");
        assert!(obj["session_id"].is_null());
        assert!(obj["properties"].is_null());
    }

    #[test]
    fn test_from_ai_sets_sender_and_bubble() {
        let msg = Message::from_ai("reply");
        assert_eq!(msg.sender, MessageSender::Ai);
        assert_eq!(msg.sender_name, "AI Assistant");
        let props = msg.properties.unwrap();
        assert_eq!(props.background_color.as_deref(), Some("#FF4D4D"));
        assert_eq!(props.text_color.as_deref(), Some("#000000"));
        assert!(props.icon.is_none());
    }

    #[test]
    fn test_from_user_bubble() {
        let msg = Message::from_user("question");
        assert_eq!(msg.sender, MessageSender::User);
        assert_eq!(
            msg.properties.unwrap().background_color.as_deref(),
            Some("#FFE147")
        );
    }

    #[test]
    fn test_try_from_missing_text() {
        let err = Message::try_from(json!({"sender": "ai"})).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "text"));
    }

    #[test]
    fn test_try_from_null_text() {
        let err = Message::try_from(json!({"text": null})).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(_)));
    }

    #[test]
    fn test_try_from_fills_defaults() {
        let msg = Message::try_from(json!({"text": "hey"})).unwrap();
        assert_eq!(msg, Message::new("hey"));
    }

    #[test]
    fn test_try_from_rejects_unknown_sender() {
        let err = Message::try_from(json!({"text": "x", "sender": "robot"})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { .. }));
    }

    #[test]
    fn test_try_from_non_object() {
        assert!(Message::try_from(json!("just text")).is_err());
    }

    #[test]
    fn test_sender_from_str() {
        assert_eq!("ai".parse::<MessageSender>().unwrap(), MessageSender::Ai);
        assert_eq!("user".parse::<MessageSender>().unwrap(), MessageSender::User);
        assert!("assistant".parse::<MessageSender>().is_err());
        assert_eq!(MessageSender::Ai.to_string(), "ai");
    }

    #[test]
    fn test_properties_with_source() {
        let props = MessageProperties {
            source: Some(Source {
                id: Some("src-1".to_string()),
                display_name: Some("Groq".to_string()),
                source: None,
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["source"]["display_name"], "Groq");
        assert!(value["source"]["source"].is_null());
        assert!(value["icon"].is_null());
    }
}
