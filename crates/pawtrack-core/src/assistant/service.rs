//! Assistant service: the three call sites feature code uses.
//!
//! Wraps a concrete provider with the prompt templates and OTel GenAI
//! spans. Every failure surfaces as a single inline error to the caller;
//! there is no retry.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use pawtrack_types::assistant::{ChatMessage, ChatRequest, ImageEditRequest, TaggedImage};
use pawtrack_types::config::AssistantModels;
use pawtrack_types::error::AssistantError;
use pawtrack_types::fields::Profile;

use super::prompt;
use super::provider::AssistantProvider;

/// High-level assistant operations over a provider.
pub struct AssistantService<P> {
    provider: Arc<P>,
    models: AssistantModels,
}

impl<P: AssistantProvider> AssistantService<P> {
    pub fn new(provider: P, models: AssistantModels) -> Self {
        Self {
            provider: Arc::new(provider),
            models,
        }
    }

    /// Conversational chat about the cat. `history` is the full
    /// conversation so far, ending with the latest user turn.
    pub async fn chat(
        &self,
        profile: &Profile,
        history: &[ChatMessage],
    ) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.models.chat_model.clone(),
            system_instruction: Some(prompt::cat_assistant_system(profile)),
            history: history.to_vec(),
        };

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
        );

        let reply = self.provider.complete(&request).instrument(span).await?;
        Ok(reply.text)
    }

    /// Rewrite a diary memory's description. Returns the improved text.
    pub async fn improve_memory(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.models.rewrite_model.clone(),
            system_instruction: None,
            history: vec![ChatMessage::user(prompt::rewrite_memory(title, description))],
        };

        let span = info_span!(
            "gen_ai.rewrite_memory",
            gen_ai.operation.name = "rewrite_memory",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
        );

        let reply = self.provider.complete(&request).instrument(span).await?;
        Ok(reply.text)
    }

    /// Image-conditioned generation over an album photo. `Ok(None)` means
    /// the model produced no image; the caller shows a message and leaves
    /// the album untouched.
    pub async fn edit_photo(
        &self,
        image: TaggedImage,
        instruction: &str,
    ) -> Result<Option<TaggedImage>, AssistantError> {
        let request = ImageEditRequest {
            model: self.models.image_model.clone(),
            image,
            instruction: instruction.to_string(),
        };

        let span = info_span!(
            "gen_ai.edit_image",
            gen_ai.operation.name = "edit_image",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model,
        );

        self.provider.edit_image(&request).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use pawtrack_types::assistant::ChatReply;

    /// Scripted provider: returns canned replies, records requests.
    struct ScriptedProvider {
        reply: String,
        image: Option<TaggedImage>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl AssistantProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, AssistantError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(ChatReply {
                text: self.reply.clone(),
            })
        }

        async fn edit_image(
            &self,
            _request: &ImageEditRequest,
        ) -> Result<Option<TaggedImage>, AssistantError> {
            Ok(self.image.clone())
        }
    }

    fn profile() -> Profile {
        Profile {
            name: "Tiki".into(),
            nickname: "Pi".into(),
            bio: String::new(),
            birth_date: NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(),
            image: None,
        }
    }

    fn service(provider: ScriptedProvider) -> AssistantService<ScriptedProvider> {
        AssistantService::new(provider, AssistantModels::default())
    }

    #[tokio::test]
    async fn chat_sends_system_instruction_and_history() {
        let svc = service(ScriptedProvider {
            reply: "Meow, all good!".into(),
            image: None,
            seen: Mutex::new(Vec::new()),
        });

        let history = [ChatMessage::user("Is she eating enough?")];
        let reply = svc.chat(&profile(), &history).await.unwrap();
        assert_eq!(reply, "Meow, all good!");

        let seen = svc.provider.seen.lock().unwrap();
        let request = &seen[0];
        assert!(request.system_instruction.as_deref().unwrap().contains("Tiki"));
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.model, AssistantModels::default().chat_model);
    }

    #[tokio::test]
    async fn improve_memory_uses_the_rewrite_model() {
        let svc = service(ScriptedProvider {
            reply: "A sweeter retelling.".into(),
            image: None,
            seen: Mutex::new(Vec::new()),
        });

        let improved = svc.improve_memory("First day", "She hid.").await.unwrap();
        assert_eq!(improved, "A sweeter retelling.");

        let seen = svc.provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, AssistantModels::default().rewrite_model);
        assert!(seen[0].system_instruction.is_none());
    }

    #[tokio::test]
    async fn edit_photo_passes_through_the_no_image_case() {
        let svc = service(ScriptedProvider {
            reply: String::new(),
            image: None,
            seen: Mutex::new(Vec::new()),
        });

        let base = TaggedImage {
            mime_type: "image/jpeg".into(),
            data: vec![1, 2, 3],
        };
        // Soft failure: no image generated, no error raised.
        let result = svc.edit_photo(base, "add a hat").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn edit_photo_returns_the_generated_image() {
        let generated = TaggedImage {
            mime_type: "image/png".into(),
            data: vec![9, 9, 9],
        };
        let svc = service(ScriptedProvider {
            reply: String::new(),
            image: Some(generated.clone()),
            seen: Mutex::new(Vec::new()),
        });

        let base = TaggedImage {
            mime_type: "image/jpeg".into(),
            data: vec![1, 2, 3],
        };
        let result = svc.edit_photo(base, "cyberpunk style").await.unwrap();
        assert_eq!(result, Some(generated));
    }
}
