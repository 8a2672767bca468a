//! The sync engine: one authoritative in-memory copy of the remote
//! document, reconciled with the store by optimistic writes and periodic
//! read-only polling.
//!
//! Write policy (deliberate, not accidental): every local mutation is
//! applied to memory immediately and PUT to the remote store exactly once,
//! fire-and-forget. There is no retry and no write queue. A PUT that fails
//! only flags the client offline; the optimistic local copy is never
//! rolled back, so the next user mutation re-sends the full in-memory
//! state, change included. Across clients the last PUT wins -- diverged
//! concurrent edits are detected through the document revision counter and
//! logged, never merged.

pub mod field;
pub mod store;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pawtrack_types::document::Document;
#[cfg(test)]
use pawtrack_types::error::StoreError;

use self::store::RemoteStore;

/// Outcome of [`SyncEngine::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Remote document adopted as local state.
    Loaded,
    /// Remote was absent or empty; the default document was written once.
    Bootstrapped,
    /// Remote unreachable; defaults adopted locally only, offline flagged.
    OfflineDefaults,
}

/// Outcome of one [`SyncEngine::refresh`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Local state replaced wholesale with the remote document.
    Replaced,
    /// Remote returned absent/empty; local state untouched.
    Absent,
    /// Remote unreachable; offline flagged, local state untouched.
    Failed,
}

/// Point-in-time view of the engine's flags.
#[derive(Debug, Clone, Copy)]
pub struct SyncStatus {
    pub offline: bool,
    pub syncing: bool,
    pub revision: u64,
}

struct Shared {
    doc: Mutex<Document>,
    offline: AtomicBool,
    /// Number of in-flight PUTs.
    in_flight: AtomicUsize,
}

/// The sync engine. Cheap to clone; clones share the same in-memory
/// document and flags.
pub struct SyncEngine<S> {
    store: Arc<S>,
    shared: Arc<Shared>,
}

impl<S> Clone for SyncEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: RemoteStore + 'static> SyncEngine<S> {
    /// Create an engine over the given store. The local mirror starts
    /// empty; call [`init`](Self::init) before reading fields.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            shared: Arc::new(Shared {
                doc: Mutex::new(Document::new()),
                offline: AtomicBool::new(false),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    fn doc_lock(&self) -> MutexGuard<'_, Document> {
        // A poisoned lock only means a writer panicked mid-update; the
        // document itself is still a valid JSON object.
        self.shared.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initial load with bootstrap-on-missing.
    ///
    /// - Remote has a non-empty document: adopt it.
    /// - Remote 404 or empty body/object: write the hardcoded default
    ///   document (one awaited PUT) and adopt it.
    /// - Network failure: adopt the defaults locally without writing,
    ///   flag offline.
    pub async fn init(&self) -> InitOutcome {
        match self.store.load().await {
            Ok(Some(doc)) if !doc.is_empty() => {
                *self.doc_lock() = doc;
                self.shared.offline.store(false, Ordering::SeqCst);
                debug!("adopted remote document");
                InitOutcome::Loaded
            }
            Ok(_) => {
                // 404 or `{}`: the only time defaults are auto-written.
                let defaults = Document::bootstrap(chrono::Local::now().date_naive());
                *self.doc_lock() = defaults.clone();
                info!("remote document absent, bootstrapping");
                match self.store.store(&defaults).await {
                    Ok(()) => self.shared.offline.store(false, Ordering::SeqCst),
                    Err(err) => {
                        warn!(error = %err, "bootstrap write failed");
                        self.shared.offline.store(true, Ordering::SeqCst);
                    }
                }
                InitOutcome::Bootstrapped
            }
            Err(err) => {
                warn!(error = %err, "initial load failed, starting offline with defaults");
                *self.doc_lock() = Document::bootstrap(chrono::Local::now().date_naive());
                self.shared.offline.store(true, Ordering::SeqCst);
                InitOutcome::OfflineDefaults
            }
        }
    }

    /// Read-only background refresh: replace local state wholesale with
    /// whatever the remote returns. All failures are non-fatal.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.store.load().await {
            Ok(Some(remote)) if !remote.is_empty() => {
                {
                    let mut doc = self.doc_lock();
                    if remote.revision() < doc.revision() {
                        // Another writer won a race, or our own PUT was
                        // lost. Detection only; last PUT still wins.
                        warn!(
                            local = doc.revision(),
                            remote = remote.revision(),
                            "remote document is behind local state, updates may have been lost"
                        );
                    }
                    *doc = remote;
                }
                self.shared.offline.store(false, Ordering::SeqCst);
                RefreshOutcome::Replaced
            }
            Ok(_) => RefreshOutcome::Absent,
            Err(err) => {
                warn!(error = %err, "background refresh failed");
                self.shared.offline.store(true, Ordering::SeqCst);
                RefreshOutcome::Failed
            }
        }
    }

    /// Merge `value` into the document at `key`, bump the revision, and
    /// fire-and-forget a PUT of the full merged snapshot.
    ///
    /// The returned handle lets tests await the PUT; callers in the
    /// application deliberately drop it.
    pub fn update(&self, key: &str, value: serde_json::Value) -> JoinHandle<()> {
        let snapshot = {
            let mut doc = self.doc_lock();
            doc.insert(key, value);
            doc.bump_revision();
            doc.clone()
        };
        self.spawn_push(snapshot)
    }

    /// Bypass the merge: install an entirely new document locally and push
    /// it with one awaited PUT. Used by backup import.
    pub async fn replace_all(&self, mut document: Document) {
        document.bump_revision();
        {
            *self.doc_lock() = document.clone();
        }
        self.push(&document).await;
    }

    /// Snapshot of the current in-memory document.
    pub fn document(&self) -> Document {
        self.doc_lock().clone()
    }

    pub fn is_offline(&self) -> bool {
        self.shared.offline.load(Ordering::SeqCst)
    }

    /// True while at least one PUT is in flight.
    pub fn is_syncing(&self) -> bool {
        self.shared.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            offline: self.is_offline(),
            syncing: self.is_syncing(),
            revision: self.doc_lock().revision(),
        }
    }

    /// Spawn the recurring read-only poller.
    ///
    /// Ticks at a fixed period, skips entirely while the offline flag is
    /// set, and stops when `cancel` fires. In-flight reads are not
    /// cancelled once issued.
    pub fn spawn_poller(&self, period: Duration, cancel: CancellationToken) -> JoinHandle<()> {
        let engine = self.clone();
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("poller cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if engine.is_offline() {
                            continue;
                        }
                        engine.refresh().await;
                    }
                }
            }
        })
    }

    fn spawn_push(&self, snapshot: Document) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.shared);
        shared.in_flight.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            match store.store(&snapshot).await {
                Ok(()) => shared.offline.store(false, Ordering::SeqCst),
                Err(err) => {
                    // Deliberately no retry: the change survives in the
                    // optimistic local copy and rides along with the next
                    // successful mutation.
                    warn!(error = %err, "document write failed");
                    shared.offline.store(true, Ordering::SeqCst);
                }
            }
            shared.in_flight.fetch_sub(1, Ordering::SeqCst);
        })
    }

    async fn push(&self, document: &Document) {
        self.shared.in_flight.fetch_add(1, Ordering::SeqCst);
        match self.store.store(document).await {
            Ok(()) => self.shared.offline.store(false, Ordering::SeqCst),
            Err(err) => {
                warn!(error = %err, "document write failed");
                self.shared.offline.store(true, Ordering::SeqCst);
            }
        }
        self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrack_types::document::keys;

    /// In-memory store with switchable failure modes.
    struct MockStore {
        remote: Mutex<Option<Document>>,
        fail_load: AtomicBool,
        fail_store: AtomicBool,
        put_count: AtomicUsize,
    }

    impl MockStore {
        fn empty() -> Self {
            Self {
                remote: Mutex::new(None),
                fail_load: AtomicBool::new(false),
                fail_store: AtomicBool::new(false),
                put_count: AtomicUsize::new(0),
            }
        }

        fn holding(doc: Document) -> Self {
            let store = Self::empty();
            *store.remote.lock().unwrap() = Some(doc);
            store
        }

        fn puts(&self) -> usize {
            self.put_count.load(Ordering::SeqCst)
        }
    }

    impl RemoteStore for Arc<MockStore> {
        async fn load(&self) -> Result<Option<Document>, StoreError> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(StoreError::Network("connection refused".into()));
            }
            Ok(self.remote.lock().unwrap().clone())
        }

        async fn store(&self, doc: &Document) -> Result<(), StoreError> {
            if self.fail_store.load(Ordering::SeqCst) {
                return Err(StoreError::Network("connection refused".into()));
            }
            self.put_count.fetch_add(1, Ordering::SeqCst);
            *self.remote.lock().unwrap() = Some(doc.clone());
            Ok(())
        }
    }

    fn engine_over(store: &Arc<MockStore>) -> SyncEngine<Arc<MockStore>> {
        SyncEngine::new(Arc::clone(store))
    }

    #[tokio::test]
    async fn init_adopts_existing_remote_document() {
        let mut doc = Document::new();
        doc.insert(keys::STATUS, serde_json::json!("Hunting 🦗"));
        let store = Arc::new(MockStore::holding(doc));
        let engine = engine_over(&store);

        assert_eq!(engine.init().await, InitOutcome::Loaded);
        assert!(!engine.is_offline());
        assert_eq!(store.puts(), 0);
        assert_eq!(
            engine.document().get(keys::STATUS),
            Some(&serde_json::json!("Hunting 🦗"))
        );
    }

    #[tokio::test]
    async fn init_bootstraps_on_missing_with_exactly_one_put() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);

        assert_eq!(engine.init().await, InitOutcome::Bootstrapped);
        assert!(!engine.is_offline());
        assert_eq!(store.puts(), 1);

        let expected = Document::bootstrap(chrono::Local::now().date_naive());
        assert_eq!(engine.document(), expected);
        assert_eq!(store.remote.lock().unwrap().clone().unwrap(), expected);
    }

    #[tokio::test]
    async fn init_treats_empty_object_as_missing() {
        let store = Arc::new(MockStore::holding(Document::new()));
        let engine = engine_over(&store);

        assert_eq!(engine.init().await, InitOutcome::Bootstrapped);
        assert_eq!(store.puts(), 1);
        assert!(!engine.document().is_empty());
    }

    #[tokio::test]
    async fn init_network_failure_adopts_defaults_offline_without_writing() {
        let store = Arc::new(MockStore::empty());
        store.fail_load.store(true, Ordering::SeqCst);
        let engine = engine_over(&store);

        assert_eq!(engine.init().await, InitOutcome::OfflineDefaults);
        assert!(engine.is_offline());
        assert_eq!(store.puts(), 0);
        assert!(!engine.document().is_empty());
    }

    #[tokio::test]
    async fn update_is_optimistic_and_puts_full_snapshot() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        let handle = engine.update(keys::MED_NOTES, serde_json::json!("allergic to fish"));
        // Optimistic: visible before the PUT resolves.
        assert_eq!(
            engine.document().get(keys::MED_NOTES),
            Some(&serde_json::json!("allergic to fish"))
        );
        handle.await.unwrap();

        let remote = store.remote.lock().unwrap().clone().unwrap();
        assert_eq!(remote.get(keys::MED_NOTES), Some(&serde_json::json!("allergic to fish")));
        // Bootstrap PUT plus the update PUT.
        assert_eq!(store.puts(), 2);
    }

    #[tokio::test]
    async fn failed_put_keeps_local_change_and_flags_offline() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        store.fail_store.store(true, Ordering::SeqCst);
        engine
            .update(keys::STATUS, serde_json::json!("Zoomies 🌪️"))
            .await
            .unwrap();

        assert!(engine.is_offline());
        // No rollback of the optimistic copy.
        assert_eq!(
            engine.document().get(keys::STATUS),
            Some(&serde_json::json!("Zoomies 🌪️"))
        );

        // Next successful write clears the flag and carries the change.
        store.fail_store.store(false, Ordering::SeqCst);
        engine
            .update(keys::MED_NOTES, serde_json::json!("none"))
            .await
            .unwrap();
        assert!(!engine.is_offline());
        let remote = store.remote.lock().unwrap().clone().unwrap();
        assert_eq!(
            remote.get(keys::STATUS),
            Some(&serde_json::json!("Zoomies 🌪️"))
        );
    }

    #[tokio::test]
    async fn refresh_replaces_state_wholesale_and_clears_offline() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        store.fail_load.store(true, Ordering::SeqCst);
        assert_eq!(engine.refresh().await, RefreshOutcome::Failed);
        assert!(engine.is_offline());

        store.fail_load.store(false, Ordering::SeqCst);
        let mut other_client = engine.document();
        other_client.insert(keys::STATUS, serde_json::json!("Eating 🍗"));
        *store.remote.lock().unwrap() = Some(other_client);

        assert_eq!(engine.refresh().await, RefreshOutcome::Replaced);
        assert!(!engine.is_offline());
        assert_eq!(
            engine.document().get(keys::STATUS),
            Some(&serde_json::json!("Eating 🍗"))
        );
    }

    #[tokio::test]
    async fn refresh_ignores_absent_remote() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        *store.remote.lock().unwrap() = None;
        let before = engine.document();
        assert_eq!(engine.refresh().await, RefreshOutcome::Absent);
        assert_eq!(engine.document(), before);
    }

    #[tokio::test]
    async fn replace_all_installs_and_pushes_the_new_document() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        let mut imported = Document::new();
        imported.insert(keys::MED_NOTES, serde_json::json!("from backup"));
        engine.replace_all(imported).await;

        assert_eq!(
            engine.document().get(keys::MED_NOTES),
            Some(&serde_json::json!("from backup"))
        );
        let remote = store.remote.lock().unwrap().clone().unwrap();
        assert_eq!(remote.get(keys::MED_NOTES), Some(&serde_json::json!("from backup")));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_skips_ticks_while_offline_and_stops_on_cancel() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        // Force offline. A skipped tick leaves the flag set; a tick that
        // actually refreshed would clear it, since loads succeed again.
        store.fail_load.store(true, Ordering::SeqCst);
        engine.refresh().await;
        assert!(engine.is_offline());
        store.fail_load.store(false, Ordering::SeqCst);

        let cancel = CancellationToken::new();
        let handle = engine.spawn_poller(Duration::from_secs(5), cancel.clone());

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(engine.is_offline());

        // Clear the flag through a successful write; polling resumes.
        engine
            .update(keys::STATUS, serde_json::json!("Cuddles 😻"))
            .await
            .unwrap();
        assert!(!engine.is_offline());

        let mut other_client = engine.document();
        other_client.insert(keys::STATUS, serde_json::json!("Sleeping 💤"));
        *store.remote.lock().unwrap() = Some(other_client);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(
            engine.document().get(keys::STATUS),
            Some(&serde_json::json!("Sleeping 💤"))
        );

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn revision_increases_with_every_mutation() {
        let store = Arc::new(MockStore::empty());
        let engine = engine_over(&store);
        engine.init().await;

        let before = engine.status().revision;
        engine
            .update(keys::STATUS, serde_json::json!("Hunting 🦗"))
            .await
            .unwrap();
        engine
            .update(keys::STATUS, serde_json::json!("Hunting 🦗"))
            .await
            .unwrap();
        assert_eq!(engine.status().revision, before + 2);
    }
}
