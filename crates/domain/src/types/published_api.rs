//! Published-bot chat records
//!
//! Payloads of the API a publication exposes to external callers. The bot
//! is implied by the endpoint, so none of these carry a bot id.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
}

crate::impl_wire_enum_conversions!(ContentType {
    Text => "text",
    Image => "image",
});

/// One content block of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub content_type: ContentType,
    /// MIME type, set for images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Text, or base64 image data
    pub body: String,
}

impl Content {
    pub fn text(body: impl Into<String>) -> Self {
        Self { content_type: ContentType::Text, media_type: None, body: body.into() }
    }

    pub fn image(media_type: impl Into<String>, base64_body: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Image,
            media_type: Some(media_type.into()),
            body: base64_body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MessageInput {
    pub content: Vec<Content>,
    /// Model name as accepted by the backend, e.g. `claude-v3-haiku`
    pub model: String,
}

/// Body of `POST /conversation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    /// Leave empty to start a new conversation. Ids must be unique across
    /// the whole application, so server-generated ones are preferred.
    #[serde(default)]
    pub conversation_id: Option<String>,
    pub message: MessageInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MessageOutput {
    pub role: String,
    pub content: Vec<Content>,
    pub model: String,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// A finished reply, `GET /conversation/{conversationId}/{messageId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ChatOutput {
    pub conversation_id: String,
    pub message: MessageOutput,
    /// Epoch seconds
    pub create_time: f64,
}

/// The message was queued; poll for the reply with these ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MessageRequestedResponse {
    pub conversation_id: String,
    pub message_id: String,
}
