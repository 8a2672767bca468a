//! GeminiProvider -- concrete [`AssistantProvider`] for the Google
//! Generative Language API.
//!
//! Sends `generateContent` requests with the API key in a header. Two
//! call shapes: text completion (chat, memory rewriting) and
//! image-conditioned generation (album photo editing). No retry,
//! streaming, or cancellation; a failure surfaces as one error.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

mod types;

use std::time::Duration;

use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use pawtrack_core::assistant::provider::AssistantProvider;
use pawtrack_types::assistant::{
    ChatReply, ChatRequest, ChatRole, ImageEditRequest, TaggedImage,
};
use pawtrack_types::error::AssistantError;

use self::types::{
    Content, GenerateContentRequest, GenerateContentResponse, Part, SystemInstruction,
};

/// Google Gemini assistant provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

// GeminiProvider intentionally does not derive Debug: the SecretString
// field already refuses to print the key, and omitting Debug entirely
// keeps the whole struct out of logs.

impl GeminiProvider {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AssistantError> {
        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AssistantError::Provider {
                message: format!("HTTP request failed: {err}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AssistantError::AuthenticationFailed,
                429 => AssistantError::RateLimited,
                _ => AssistantError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        response
            .json()
            .await
            .map_err(|err| AssistantError::Deserialization(format!("failed to parse response: {err}")))
    }

    fn to_wire_request(request: &ChatRequest) -> GenerateContentRequest {
        let contents = request
            .history
            .iter()
            .map(|message| Content {
                role: Some(
                    match message.role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part::text(&message.text)],
            })
            .collect();

        GenerateContentRequest {
            system_instruction: request
                .system_instruction
                .as_ref()
                .map(|text| SystemInstruction {
                    parts: vec![Part::text(text)],
                }),
            contents,
        }
    }
}

impl AssistantProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
        let body = Self::to_wire_request(request);
        let response = self.generate(&request.model, &body).await?;

        let text = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(ChatReply { text })
    }

    async fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> Result<Option<TaggedImage>, AssistantError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&request.image.data);
        let body = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![
                    Part::inline(&request.image.mime_type, encoded),
                    Part::text(&request.instruction),
                ],
            }],
        };

        let response = self.generate(&request.model, &body).await?;

        // The model may answer with text only; that is the soft-failure
        // path the caller must handle, not an error.
        let inline = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| {
                content
                    .parts
                    .iter()
                    .find_map(|part| part.inline_data.as_ref())
            });

        match inline {
            Some(data) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(&data.data)
                    .map_err(|err| {
                        AssistantError::Deserialization(format!("invalid image payload: {err}"))
                    })?;
                Ok(Some(TaggedImage {
                    mime_type: data.mime_type.clone(),
                    data: bytes,
                }))
            }
            None => Ok(None),
        }
    }
}
