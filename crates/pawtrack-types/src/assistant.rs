//! Request/response shapes for the assistant collaborator.
//!
//! Two call shapes are supported: text completion (system instruction plus
//! conversation history in, one text reply out) and image-conditioned
//! generation (base image plus instruction in, optionally a new image out).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of a message in the assistant conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Model => write!(f, "model"),
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ChatRole::User),
            "model" => Ok(ChatRole::Model),
            other => Err(format!("invalid chat role: '{other}'")),
        }
    }
}

/// One turn of the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A text-completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier; configuration, not protocol.
    pub model: String,
    pub system_instruction: Option<String>,
    pub history: Vec<ChatMessage>,
}

/// A single text reply.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
}

/// Raw image bytes tagged with their encoding.
#[derive(Clone, PartialEq, Eq)]
pub struct TaggedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

// Manual Debug: image payloads are large and useless in logs.
impl fmt::Debug for TaggedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// An image-conditioned generation request.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub model: String,
    pub image: TaggedImage,
    pub instruction: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_image_debug_hides_payload() {
        let img = TaggedImage {
            mime_type: "image/jpeg".into(),
            data: vec![0u8; 100_000],
        };
        let debug = format!("{img:?}");
        assert!(debug.contains("100000"));
        assert!(debug.len() < 200);
    }

    #[test]
    fn chat_role_round_trip() {
        assert_eq!("model".parse::<ChatRole>().unwrap(), ChatRole::Model);
        assert_eq!(ChatRole::User.to_string(), "user");
    }
}
