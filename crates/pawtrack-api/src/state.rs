//! Application state wiring the sync engine and assistant together.
//!
//! AppState pins the generic core types to their concrete infra
//! implementations: the engine runs over the jsonblob store, the
//! assistant over the Gemini provider.

use std::path::PathBuf;
use std::time::Duration;

use pawtrack_core::assistant::AssistantService;
use pawtrack_core::sync::{InitOutcome, SyncEngine};
use pawtrack_infra::config::{load_config, resolve_data_dir};
use pawtrack_infra::gemini::GeminiProvider;
use pawtrack_infra::jsonblob::JsonBlobStore;
use pawtrack_infra::secret::{gemini_api_key, GEMINI_API_KEY_VAR};
use pawtrack_types::config::PawtrackConfig;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub engine: SyncEngine<JsonBlobStore>,
    pub config: PawtrackConfig,
    pub data_dir: PathBuf,
    pub init_outcome: InitOutcome,
}

impl AppState {
    /// Initialize the application state: load config, connect the engine
    /// to the remote document, and perform the initial load/bootstrap.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let engine = SyncEngine::new(JsonBlobStore::new(config.endpoint()));
        let init_outcome = engine.init().await;

        Ok(Self {
            engine,
            config,
            data_dir,
            init_outcome,
        })
    }

    /// Build the assistant service from the environment's API key.
    ///
    /// Constructed on demand: every other command works without a key.
    pub fn assistant(&self) -> anyhow::Result<AssistantService<GeminiProvider>> {
        let api_key = gemini_api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "{GEMINI_API_KEY_VAR} not set. Export it to use the assistant features."
            )
        })?;
        Ok(AssistantService::new(
            GeminiProvider::new(api_key),
            self.config.assistant.clone(),
        ))
    }

    /// Background refresh period from configuration.
    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs)
    }
}
