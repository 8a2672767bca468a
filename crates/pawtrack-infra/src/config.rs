//! Configuration loader for Pawtrack.
//!
//! Reads `config.toml` from the data directory (`~/.pawtrack/` in
//! production) and deserializes it into [`PawtrackConfig`]. Falls back
//! to the built-in defaults when the file is missing or malformed, so
//! a fresh install works with zero setup.

use std::path::{Path, PathBuf};

use pawtrack_types::config::PawtrackConfig;

/// Resolve the data directory.
///
/// Priority:
/// 1. `PAWTRACK_DATA_DIR` environment variable
/// 2. `~/.pawtrack` under the home directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAWTRACK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".pawtrack");
    }

    // Last resort: current directory
    PathBuf::from(".pawtrack")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`PawtrackConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> PawtrackConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return PawtrackConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return PawtrackConfig::default();
        }
    };

    match toml::from_str::<PawtrackConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PawtrackConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrack_types::config::{DEFAULT_BLOB_ID, DEFAULT_POLL_INTERVAL_SECS};
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.blob_id, DEFAULT_BLOB_ID);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
blob_id = "my-own-blob"
poll_interval_secs = 30

[assistant]
chat_model = "gemini-x"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.blob_id, "my-own-blob");
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.assistant.chat_model, "gemini-x");
        assert_eq!(
            config.endpoint(),
            "https://jsonblob.com/api/jsonBlob/my-own-blob"
        );
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.blob_id, DEFAULT_BLOB_ID);
    }
}
