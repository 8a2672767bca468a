//! JsonBlobStore -- concrete [`RemoteStore`] over the jsonblob API.
//!
//! The remote is one JSON blob with whole-document semantics: `GET` the
//! endpoint for the full document, `PUT` the endpoint to replace it. No
//! authentication, no ETags, no partial update verb.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

use pawtrack_core::sync::store::RemoteStore;
use pawtrack_types::document::Document;
use pawtrack_types::error::StoreError;

/// Whole-document HTTP store.
pub struct JsonBlobStore {
    client: reqwest::Client,
    endpoint: String,
}

impl JsonBlobStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteStore for JsonBlobStore {
    async fn load(&self) -> Result<Option<Document>, StoreError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Document>(&body) {
            Ok(doc) => Ok(Some(doc)),
            Err(err) => {
                // A blob that is not a JSON object is treated as absent,
                // which routes init through the bootstrap path.
                warn!(error = %err, "remote body is not a JSON object, treating as absent");
                Ok(None)
            }
        }
    }

    async fn store(&self, doc: &Document) -> Result<(), StoreError> {
        let response = self
            .client
            .put(&self.endpoint)
            .header("accept", "application/json")
            .json(doc)
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
