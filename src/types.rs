use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// Backend-supplied metadata shown as badges. Never interpreted beyond lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Annotations {
    pub selected_mode: Option<String>,
    pub complexity: Option<String>,
    pub question_type: Option<String>,
    pub urgency: Option<String>,
    pub quality_score: Option<String>,
    pub auto_selection: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: Option<OffsetDateTime>,
    pub annotations: Annotations,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Some(OffsetDateTime::now_utc()),
            annotations: Annotations::default(),
        }
    }

    pub fn bot(content: impl Into<String>, annotations: Annotations) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            created_at: Some(OffsetDateTime::now_utc()),
            annotations,
        }
    }

    /// The `{role, content}` pair sent back to the backend.
    pub fn to_wire(&self) -> WireMessage<'_> {
        WireMessage {
            role: self.role,
            content: &self.content,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WireMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: Vec<WireMessage<'a>>,
}

/// Decoded body of a chat endpoint reply.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub selected_mode: Option<String>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub quality_score: Option<String>,
    #[serde(default)]
    pub auto_selection: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::bot(
            self.response,
            Annotations {
                selected_mode: self.selected_mode,
                complexity: self.complexity,
                question_type: self.question_type,
                urgency: self.urgency,
                quality_score: self.quality_score,
                auto_selection: self.auto_selection,
            },
        )
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(num)) => Some(num.to_string()),
        _ => None,
    })
}
