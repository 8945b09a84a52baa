//! Plugin trait, command message, and reply types.

use crate::error::PluginError;
use async_trait::async_trait;
use serde::Serialize;

/// Parsed command invocation handed to a plugin.
#[derive(Debug, Clone)]
pub struct CommandMessage {
    /// Full raw message text including the trigger.
    pub original_text: String,
    /// Query with the trigger prefix stripped and trimmed.
    pub text: String,
    /// Identifier of whoever sent the command.
    pub sender: String,
}

/// Reply produced by one plugin invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text reply.
    Text(String),
    /// Structured message with attachments.
    Message(ChatMessage),
    /// Suppressed output; nothing is sent back.
    Empty,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Rich reply shape defined by the host chat platform; merely populated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub attachments: Vec<MessageAttachment>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, attachments: Vec<MessageAttachment>) -> Self {
        Self {
            text: Some(text.into()),
            attachments,
        }
    }

    pub fn with_attachments(attachments: Vec<MessageAttachment>) -> Self {
        Self {
            text: None,
            attachments,
        }
    }
}

/// One attachment record within a structured message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageAttachment {
    /// Plain-text rendering for clients that cannot show attachments.
    pub fallback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
}

/// A short titled value within an attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

/// Trait implemented by every command plugin.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name used in logs.
    fn name(&self) -> &str;

    /// Literal command trigger (e.g. ".weather").
    fn trigger(&self) -> &str;

    /// Whether this plugin handles the raw message text.
    fn matches(&self, text: &str) -> bool {
        text.starts_with(self.trigger())
    }

    /// Run one fetch-parse-format invocation.
    async fn execute(&self, msg: &CommandMessage) -> Result<Reply, PluginError>;
}
