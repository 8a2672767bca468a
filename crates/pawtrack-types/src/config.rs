//! Application configuration types.
//!
//! Loaded from `{data_dir}/config.toml` by `pawtrack-infra`; every field
//! has a default so a missing or partial file still yields a working
//! configuration.

use serde::{Deserialize, Serialize};

/// Default public blob id used when no configuration exists.
pub const DEFAULT_BLOB_ID: &str = "019c5be5-55a6-7745-8185-4161c0852055";

/// Fixed background refresh period in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Maximum width in pixels for images embedded in the document.
pub const MAX_IMAGE_WIDTH: u32 = 800;

/// Top-level configuration for Pawtrack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PawtrackConfig {
    /// Blob identifier under the jsonblob API.
    pub blob_id: String,

    /// Full endpoint override. When set, `blob_id` is ignored.
    pub endpoint: Option<String>,

    /// Background refresh period (seconds).
    pub poll_interval_secs: u64,

    /// Assistant model identifiers.
    pub assistant: AssistantModels,
}

impl Default for PawtrackConfig {
    fn default() -> Self {
        Self {
            blob_id: DEFAULT_BLOB_ID.to_string(),
            endpoint: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            assistant: AssistantModels::default(),
        }
    }
}

impl PawtrackConfig {
    /// The resolved remote-store endpoint.
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(url) => url.clone(),
            None => format!("https://jsonblob.com/api/jsonBlob/{}", self.blob_id),
        }
    }
}

/// Model identifiers for the three assistant call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantModels {
    /// Conversational chat.
    pub chat_model: String,

    /// Diary-memory rewriting.
    pub rewrite_model: String,

    /// Image-conditioned generation.
    pub image_model: String,
}

impl Default for AssistantModels {
    fn default() -> Self {
        Self {
            chat_model: "gemini-3-pro-preview".to_string(),
            rewrite_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_uses_blob_id() {
        let config = PawtrackConfig::default();
        assert!(config.endpoint().starts_with("https://jsonblob.com/api/jsonBlob/"));
        assert!(config.endpoint().ends_with(DEFAULT_BLOB_ID));
    }

    #[test]
    fn endpoint_override_wins() {
        let config = PawtrackConfig {
            endpoint: Some("http://localhost:9999/doc".into()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:9999/doc");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: PawtrackConfig = toml::from_str("blob_id = \"abc\"").unwrap();
        assert_eq!(config.blob_id, "abc");
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.assistant.chat_model, "gemini-3-pro-preview");
    }
}
