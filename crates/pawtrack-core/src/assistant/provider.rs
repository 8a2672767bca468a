//! AssistantProvider trait definition.
//!
//! Two call shapes, per the external collaborator contract: text
//! completion and image-conditioned generation. Uses RPITIT (native async
//! fn in traits, Rust 2024 edition). The concrete implementation lives in
//! `pawtrack-infra`.

use pawtrack_types::assistant::{ChatReply, ChatRequest, ImageEditRequest, TaggedImage};
use pawtrack_types::error::AssistantError;

/// Trait for the generative-AI backend.
pub trait AssistantProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// System instruction plus conversation history in, one text reply
    /// out. No retry, no streaming, no cancellation.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, AssistantError>> + Send;

    /// Base image plus instruction in; `Ok(Some(_))` with a newly
    /// generated image, or `Ok(None)` when the model produced no inline
    /// image. Callers must treat `None` as a recoverable soft failure.
    fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> impl std::future::Future<Output = Result<Option<TaggedImage>, AssistantError>> + Send;
}
