use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An inbound chat event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub subtype: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub bot_id: Option<Value>,
    pub channel: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
    pub ts: Option<String>,
    pub message: Option<NestedMessage>,
}

/// Inner message carried by some event shapes (edits, shares)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedMessage {
    pub text: Option<String>,
}

/// `Some` whenever the key exists, `null` included
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ChatEvent {
    /// Same filter as [`ChatEvent::is_actionable`], read off the raw payload
    /// so events of other types never need to fit the message shape.
    pub fn is_actionable_value(event: &Value) -> bool {
        event.get("type").and_then(Value::as_str) == Some("message")
            && event.get("bot_id").is_none()
            && event.get("subtype").is_none()
    }

    /// Plain user message: type `message`, not from a bot, no subtype.
    pub fn is_actionable(&self) -> bool {
        self.event_type.as_deref() == Some("message")
            && self.bot_id.is_none()
            && self.subtype.is_none()
    }

    /// Top-level `text`, falling back to `message.text`.
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or_else(|| self.message.as_ref().and_then(|m| m.text.as_deref()))
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref().filter(|c| !c.is_empty())
    }
}
