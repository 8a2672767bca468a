//! RemoteStore trait definition.
//!
//! The remote store is a single externally-hosted JSON document with
//! whole-document GET/PUT semantics -- no partial updates, no ETags, no
//! authentication. Uses RPITIT (native async fn in traits, Rust 2024
//! edition). The concrete implementation lives in `pawtrack-infra`.

use pawtrack_types::document::Document;
use pawtrack_types::error::StoreError;

/// Trait for the whole-document remote store.
pub trait RemoteStore: Send + Sync {
    /// GET the whole document.
    ///
    /// - `Ok(Some(doc))` on HTTP success with a non-empty body.
    /// - `Ok(None)` on HTTP 404 or an empty body ("absent").
    /// - `Err(_)` on network error or any other HTTP status.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// PUT the whole document, replacing it remotely in full.
    fn store(
        &self,
        doc: &Document,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
