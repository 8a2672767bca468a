//! Typed keyed-field access to the shared document.
//!
//! Each document field is described by a marker type implementing
//! [`DocField`]: its wire key, its Rust value type, and the hardcoded
//! default used when the field is absent (covers both "document not yet
//! loaded" and "field never set"). All reads and writes go through one
//! typed accessor on the engine, so the merge-and-push mechanics never
//! leak into feature code.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::warn;

use pawtrack_types::document::{keys, DEFAULT_FEED_MULTIPLIER, DEFAULT_STATUS};
use pawtrack_types::fields::{
    AlbumPhoto, LitterLog, MealSlate, MemoryEntry, Profile, Theme, Vaccine, WeightEntry,
};

use super::store::RemoteStore;
use super::SyncEngine;

/// A named document field with a typed value and an explicit default.
pub trait DocField {
    const KEY: &'static str;
    type Value: Serialize + DeserializeOwned + Clone + Send;

    fn default_value() -> Self::Value;
}

pub struct ProfileField;

impl DocField for ProfileField {
    const KEY: &'static str = keys::PROFILE;
    type Value = Profile;

    fn default_value() -> Profile {
        Profile {
            name: "Tiki".into(),
            nickname: "Pi".into(),
            bio: "Born 25/04/2024. Queen of the old town.".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(2024, 4, 25).expect("valid constant date"),
            image: None,
        }
    }
}

pub struct MealsField;

impl DocField for MealsField {
    const KEY: &'static str = keys::MEALS;
    type Value = MealSlate;

    fn default_value() -> MealSlate {
        MealSlate::empty_for(chrono::Local::now().date_naive())
    }
}

pub struct OwnersField;

impl DocField for OwnersField {
    const KEY: &'static str = keys::OWNERS;
    type Value = Vec<String>;

    fn default_value() -> Vec<String> {
        ["Antonio", "Maria Grazia", "Claudio", "Rossana"]
            .map(String::from)
            .to_vec()
    }
}

pub struct WeightsField;

impl DocField for WeightsField {
    const KEY: &'static str = keys::WEIGHTS;
    type Value = Vec<WeightEntry>;

    fn default_value() -> Vec<WeightEntry> {
        Vec::new()
    }
}

pub struct VaccinesField;

impl DocField for VaccinesField {
    const KEY: &'static str = keys::VACCINES;
    type Value = Vec<Vaccine>;

    fn default_value() -> Vec<Vaccine> {
        Vec::new()
    }
}

pub struct MedNotesField;

impl DocField for MedNotesField {
    const KEY: &'static str = keys::MED_NOTES;
    type Value = String;

    fn default_value() -> String {
        String::new()
    }
}

pub struct MemoriesField;

impl DocField for MemoriesField {
    const KEY: &'static str = keys::MEMORIES;
    type Value = Vec<MemoryEntry>;

    fn default_value() -> Vec<MemoryEntry> {
        Vec::new()
    }
}

pub struct AlbumField;

impl DocField for AlbumField {
    const KEY: &'static str = keys::ALBUM;
    type Value = Vec<AlbumPhoto>;

    fn default_value() -> Vec<AlbumPhoto> {
        Vec::new()
    }
}

pub struct LitterLogsField;

impl DocField for LitterLogsField {
    const KEY: &'static str = keys::LITTER_LOGS;
    type Value = Vec<LitterLog>;

    fn default_value() -> Vec<LitterLog> {
        Vec::new()
    }
}

pub struct FeedMultiplierField;

impl DocField for FeedMultiplierField {
    const KEY: &'static str = keys::FEED_MULTIPLIER;
    type Value = u32;

    fn default_value() -> u32 {
        DEFAULT_FEED_MULTIPLIER
    }
}

pub struct StatusField;

impl DocField for StatusField {
    const KEY: &'static str = keys::STATUS;
    type Value = String;

    fn default_value() -> String {
        DEFAULT_STATUS.to_string()
    }
}

pub struct ThemeField;

impl DocField for ThemeField {
    const KEY: &'static str = keys::THEME;
    type Value = Theme;

    fn default_value() -> Theme {
        Theme::Light
    }
}

impl<S: RemoteStore + 'static> SyncEngine<S> {
    /// Current in-memory value of field `F`, or its default when the
    /// field is absent or fails to deserialize (a malformed field written
    /// by another client degrades to the default instead of erroring).
    pub fn get<F: DocField>(&self) -> F::Value {
        let raw = { self.doc_lock().get(F::KEY).cloned() };
        match raw {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(field = F::KEY, error = %err, "malformed field, using default");
                F::default_value()
            }),
            None => F::default_value(),
        }
    }

    /// Replace field `F` with a literal value. Triggers one outbound PUT.
    pub fn set<F: DocField>(&self, value: &F::Value) -> JoinHandle<()> {
        self.update(F::KEY, field_to_value(value))
    }

    /// Replace field `F` through an updater evaluated against the value
    /// read under the document lock at call time -- never a stale copy.
    /// Triggers one outbound PUT.
    pub fn with<F: DocField>(&self, f: impl FnOnce(F::Value) -> F::Value) -> JoinHandle<()> {
        let snapshot = {
            let mut doc = self.doc_lock();
            let current = match doc.get(F::KEY).cloned() {
                Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                    warn!(field = F::KEY, error = %err, "malformed field, using default");
                    F::default_value()
                }),
                None => F::default_value(),
            };
            doc.insert(F::KEY, field_to_value(&f(current)));
            doc.bump_revision();
            doc.clone()
        };
        self.spawn_push(snapshot)
    }
}

/// Field value types are plain data; serializing them to a JSON value
/// cannot fail.
fn field_to_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).expect("field types serialize infallibly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use pawtrack_types::document::Document;
    use pawtrack_types::error::StoreError;

    struct NullStore {
        remote: Mutex<Option<Document>>,
        fail: AtomicBool,
    }

    impl RemoteStore for Arc<NullStore> {
        async fn load(&self) -> Result<Option<Document>, StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Network("down".into()));
            }
            Ok(self.remote.lock().unwrap().clone())
        }

        async fn store(&self, doc: &Document) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Network("down".into()));
            }
            *self.remote.lock().unwrap() = Some(doc.clone());
            Ok(())
        }
    }

    fn fresh_engine() -> SyncEngine<Arc<NullStore>> {
        SyncEngine::new(Arc::new(NullStore {
            remote: Mutex::new(None),
            fail: AtomicBool::new(false),
        }))
    }

    #[tokio::test]
    async fn get_falls_back_to_default_when_absent() {
        let engine = fresh_engine();
        // Document never loaded: every field resolves to its default.
        assert_eq!(engine.get::<MedNotesField>(), "");
        assert_eq!(engine.get::<FeedMultiplierField>(), 35);
        assert_eq!(engine.get::<ThemeField>(), Theme::Light);
        assert_eq!(engine.get::<OwnersField>().len(), 4);
    }

    #[tokio::test]
    async fn replace_all_then_get_returns_field_or_fallback() {
        let engine = fresh_engine();
        let mut doc = Document::new();
        doc.insert(keys::MED_NOTES, serde_json::json!("no dairy"));
        engine.replace_all(doc).await;

        assert_eq!(engine.get::<MedNotesField>(), "no dairy");
        // Field not present in the imported document: hardcoded default.
        assert_eq!(engine.get::<FeedMultiplierField>(), 35);
    }

    #[tokio::test]
    async fn set_twice_with_same_value_is_idempotent() {
        let engine = fresh_engine();
        engine.init().await;

        engine.set::<StatusField>(&"Hunting 🦗".to_string()).await.unwrap();
        let after_first = engine.get::<StatusField>();
        engine.set::<StatusField>(&"Hunting 🦗".to_string()).await.unwrap();
        assert_eq!(engine.get::<StatusField>(), after_first);
    }

    #[tokio::test]
    async fn with_updater_sees_the_current_value() {
        let engine = fresh_engine();
        engine.init().await;

        engine.set::<MedNotesField>(&"a".to_string()).await.unwrap();
        engine
            .with::<MedNotesField>(|notes| format!("{notes}b"))
            .await
            .unwrap();
        engine
            .with::<MedNotesField>(|notes| format!("{notes}c"))
            .await
            .unwrap();
        assert_eq!(engine.get::<MedNotesField>(), "abc");
    }

    #[tokio::test]
    async fn malformed_field_degrades_to_default() {
        let engine = fresh_engine();
        let mut doc = Document::new();
        doc.insert(keys::FEED_MULTIPLIER, serde_json::json!("not a number"));
        engine.replace_all(doc).await;

        assert_eq!(engine.get::<FeedMultiplierField>(), 35);
    }
}
