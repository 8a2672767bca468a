//! Typed shapes for the individual document fields.
//!
//! Each struct here is the deserialized form of one field of the remote
//! document (see [`crate::document`]). Wire names follow the document's
//! JSON contract (camelCase keys), so these types round-trip against
//! whatever another client last wrote.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Activity labels offered as one-tap presets. The `status` field accepts
/// any string; these are only suggestions.
pub const STATUS_PRESETS: [&str; 6] = [
    "Sleeping 💤",
    "Hunting 🦗",
    "Zoomies 🌪️",
    "Eating 🍗",
    "Cuddles 😻",
    "Offended 😾",
];

/// Generate a fresh list-entry id: milliseconds since the Unix epoch.
///
/// Monotonically increasing and unique in practice for a single client;
/// not guaranteed unique under concurrent writers, which the document
/// contract explicitly tolerates.
pub fn entry_id_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a date the way display-date fields store it (`dd/mm/yyyy`).
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Render a time the way log timestamps store it (`HH:MM`).
pub fn time_label(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// The pet's profile card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub nickname: String,
    pub bio: String,
    pub birth_date: NaiveDate,
    /// Optional base64 data URI of a downscaled raster image.
    #[serde(default)]
    pub image: Option<String>,
}

/// One meal slot of the daily slate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealSlot::Breakfast => write!(f, "breakfast"),
            MealSlot::Lunch => write!(f, "lunch"),
            MealSlot::Dinner => write!(f, "dinner"),
            MealSlot::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            other => Err(format!("invalid meal slot: '{other}'")),
        }
    }
}

/// Who fed the cat, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingRecord {
    pub fed_by: String,
    /// `HH:MM` display time.
    pub time: String,
}

/// The daily meal slate. `date` is a display label, not a key; when it no
/// longer matches today the slate is reset before use (day rollover).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlate {
    pub date: String,
    #[serde(default)]
    pub breakfast: Option<FeedingRecord>,
    #[serde(default)]
    pub lunch: Option<FeedingRecord>,
    #[serde(default)]
    pub dinner: Option<FeedingRecord>,
    #[serde(default)]
    pub snack: Option<FeedingRecord>,
}

impl MealSlate {
    /// An empty slate for the given day.
    pub fn empty_for(date: NaiveDate) -> Self {
        Self {
            date: day_label(date),
            breakfast: None,
            lunch: None,
            dinner: None,
            snack: None,
        }
    }

    pub fn slot(&self, slot: MealSlot) -> Option<&FeedingRecord> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_ref(),
            MealSlot::Lunch => self.lunch.as_ref(),
            MealSlot::Dinner => self.dinner.as_ref(),
            MealSlot::Snack => self.snack.as_ref(),
        }
    }

    pub fn set_slot(&mut self, slot: MealSlot, record: FeedingRecord) {
        let target = match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snack => &mut self.snack,
        };
        *target = Some(record);
    }

    /// True when all four slots have been served.
    pub fn all_fed(&self) -> bool {
        MealSlot::ALL.iter().all(|s| self.slot(*s).is_some())
    }
}

/// One weight measurement, newest first in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    /// Kilograms. Other clients have written this as either a JSON number
    /// or a numeric string, so deserialization is lenient.
    #[serde(deserialize_with = "lenient_kg::deserialize")]
    pub value: f64,
    pub date: NaiveDate,
}

/// Accept a kilogram value written as a number or as a numeric string.
mod lenient_kg {
    use serde::de::{Deserializer, Error, Unexpected};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().replace(',', ".").parse().map_err(|_| {
                D::Error::invalid_value(Unexpected::Str(&s), &"a numeric weight in kg")
            }),
        }
    }
}

/// One entry of the vaccination plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: i64,
    pub name: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub administered: bool,
}

/// One diary memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

/// One photo of the album. `image` is a base64 data URI of a downscaled
/// raster image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPhoto {
    pub id: i64,
    pub image: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub caption: String,
}

/// Classification of a litter-box event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LitterKind {
    Normal,
    Hard,
    Soft,
    /// Urine only, no solids.
    #[serde(rename = "none")]
    UrineOnly,
}

impl LitterKind {
    /// Whether this event counts toward the daily solids tally.
    pub fn is_solid(self) -> bool {
        !matches!(self, LitterKind::UrineOnly)
    }

    pub fn label(self) -> &'static str {
        match self {
            LitterKind::Normal => "all good",
            LitterKind::Hard => "too hard",
            LitterKind::Soft => "soft alert",
            LitterKind::UrineOnly => "urine only",
        }
    }
}

impl fmt::Display for LitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitterKind::Normal => write!(f, "normal"),
            LitterKind::Hard => write!(f, "hard"),
            LitterKind::Soft => write!(f, "soft"),
            LitterKind::UrineOnly => write!(f, "none"),
        }
    }
}

impl FromStr for LitterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(LitterKind::Normal),
            "hard" => Ok(LitterKind::Hard),
            "soft" => Ok(LitterKind::Soft),
            "none" => Ok(LitterKind::UrineOnly),
            other => Err(format!("invalid litter kind: '{other}'")),
        }
    }
}

/// One litter-box log entry, newest first in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LitterLog {
    pub id: i64,
    pub date: NaiveDate,
    /// `HH:MM` display time of the event.
    pub timestamp: String,
    pub kind: LitterKind,
}

/// UI theme preference, shared across devices through the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_entry_accepts_string_value() {
        let entry: WeightEntry =
            serde_json::from_str(r#"{"id":1,"value":"4.2","date":"2024-04-25"}"#).unwrap();
        assert_eq!(entry.value, 4.2);
    }

    #[test]
    fn weight_entry_accepts_numeric_value() {
        let entry: WeightEntry =
            serde_json::from_str(r#"{"id":1,"value":3.5,"date":"2024-04-25"}"#).unwrap();
        assert_eq!(entry.value, 3.5);
    }

    #[test]
    fn litter_kind_round_trips_none_spelling() {
        let json = serde_json::to_string(&LitterKind::UrineOnly).unwrap();
        assert_eq!(json, "\"none\"");
        let back: LitterKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LitterKind::UrineOnly);
    }

    #[test]
    fn meal_slate_rollover_and_all_fed() {
        let mut slate = MealSlate::empty_for(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert_eq!(slate.date, "30/08/2026");
        assert!(!slate.all_fed());
        for slot in MealSlot::ALL {
            slate.set_slot(
                slot,
                FeedingRecord {
                    fed_by: "Antonio".into(),
                    time: "08:00".into(),
                },
            );
        }
        assert!(slate.all_fed());
    }

    #[test]
    fn profile_wire_names_are_camel_case() {
        let profile = Profile {
            name: "Tiki".into(),
            nickname: "Pi".into(),
            bio: String::new(),
            birth_date: NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(),
            image: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("birthDate").is_some());
    }
}
