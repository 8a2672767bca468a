//! The assistant collaborator: provider trait, prompt templates, and the
//! service that feature code calls.

pub mod prompt;
pub mod provider;
pub mod service;

pub use provider::AssistantProvider;
pub use service::AssistantService;
