//! The shared pet document.
//!
//! The remote store holds exactly one JSON object. [`Document`] wraps the
//! raw object so the whole thing round-trips losslessly -- fields written
//! by other clients (including ones this build does not know about) are
//! preserved across a read-modify-write cycle. Typed access to individual
//! fields goes through the keyed accessor in `pawtrack-core`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::{MealSlate, MemoryEntry, Profile, Vaccine, WeightEntry};

/// Canonical document field names.
pub mod keys {
    pub const PROFILE: &str = "profile";
    pub const MEALS: &str = "meals";
    pub const OWNERS: &str = "owners";
    pub const WEIGHTS: &str = "weights";
    pub const VACCINES: &str = "vaccines";
    pub const MED_NOTES: &str = "medNotes";
    pub const MEMORIES: &str = "memories";
    pub const ALBUM: &str = "album";
    pub const LITTER_LOGS: &str = "litterLogs";
    pub const FEED_MULTIPLIER: &str = "feedMultiplier";
    pub const STATUS: &str = "status";
    pub const THEME: &str = "theme";
    pub const REVISION: &str = "revision";
}

/// Default grams of food per kg of body weight.
pub const DEFAULT_FEED_MULTIPLIER: u32 = 35;

/// Default activity label.
pub const DEFAULT_STATUS: &str = "Sleeping 💤";

/// The single remote JSON document, held as a raw object.
///
/// Invariant: always a valid JSON object. Absent fields fall back to
/// hardcoded defaults at the accessor layer, never inside the document
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// True for the freshly-created `{}` blob some stores return instead
    /// of 404. Treated identically to "not found" by the sync engine.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Monotonic mutation counter, used only to *detect* concurrent-write
    /// conflicts. Absent or malformed counts as 0.
    pub fn revision(&self) -> u64 {
        self.0
            .get(keys::REVISION)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    pub fn bump_revision(&mut self) {
        let next = self.revision() + 1;
        self.0.insert(keys::REVISION.to_string(), Value::from(next));
    }

    /// The hardcoded default document written to the remote store on
    /// bootstrap (remote 404 or empty body).
    pub fn bootstrap(today: NaiveDate) -> Self {
        let birth = NaiveDate::from_ymd_opt(2024, 4, 25).expect("valid constant date");
        let mut doc = Self::new();

        let profile = Profile {
            name: "Tiki".into(),
            nickname: "Pi".into(),
            bio: "Born 25/04/2024. Queen of the old town.".into(),
            birth_date: birth,
            image: None,
        };
        doc.insert(keys::PROFILE, to_value(&profile));
        doc.insert(keys::MEALS, to_value(&MealSlate::empty_for(today)));
        doc.insert(
            keys::OWNERS,
            to_value(&["Antonio", "Maria Grazia", "Claudio", "Rossana"]),
        );
        doc.insert(
            keys::WEIGHTS,
            to_value(&[WeightEntry {
                id: 1,
                value: 3.5,
                date: birth,
            }]),
        );
        doc.insert(
            keys::VACCINES,
            to_value(&[
                Vaccine {
                    id: 1,
                    name: "Trivalent".into(),
                    due_date: birth,
                    administered: true,
                },
                Vaccine {
                    id: 2,
                    name: "Annual booster".into(),
                    due_date: NaiveDate::from_ymd_opt(2025, 4, 25).expect("valid constant date"),
                    administered: false,
                },
            ]),
        );
        doc.insert(keys::MED_NOTES, Value::String(String::new()));
        doc.insert(
            keys::MEMORIES,
            to_value(&[MemoryEntry {
                id: 1,
                title: "Welcome home, Pi!".into(),
                description: "Her first day home. So small she fit inside a shoe.".into(),
                date: birth,
            }]),
        );
        doc.insert(keys::ALBUM, Value::Array(Vec::new()));
        doc.insert(keys::LITTER_LOGS, Value::Array(Vec::new()));
        doc.insert(keys::FEED_MULTIPLIER, Value::from(DEFAULT_FEED_MULTIPLIER));
        doc.insert(keys::STATUS, Value::String(DEFAULT_STATUS.into()));
        doc.insert(keys::THEME, Value::String("light".into()));
        doc.insert(keys::REVISION, Value::from(0u64));

        doc
    }
}

/// Serialize a field value that is known to be representable as JSON.
///
/// All field types are plain data (strings, numbers, dates); serialization
/// cannot fail for them, so a failure here is a programming error.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("field types serialize infallibly")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn bootstrap_contains_every_field() {
        let doc = Document::bootstrap(today());
        for key in [
            keys::PROFILE,
            keys::MEALS,
            keys::OWNERS,
            keys::WEIGHTS,
            keys::VACCINES,
            keys::MED_NOTES,
            keys::MEMORIES,
            keys::ALBUM,
            keys::LITTER_LOGS,
            keys::FEED_MULTIPLIER,
            keys::STATUS,
            keys::THEME,
            keys::REVISION,
        ] {
            assert!(doc.get(key).is_some(), "missing field {key}");
        }
        assert!(!doc.is_empty());
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = r#"{"profile":{"name":"Tiki","nickname":"Pi","bio":"","birthDate":"2024-04-25"},"futureField":{"a":1}}"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["futureField"]["a"], 1);
    }

    #[test]
    fn revision_defaults_to_zero_and_bumps() {
        let mut doc = Document::new();
        assert_eq!(doc.revision(), 0);
        doc.bump_revision();
        doc.bump_revision();
        assert_eq!(doc.revision(), 2);
    }

    #[test]
    fn empty_object_is_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
    }
}
