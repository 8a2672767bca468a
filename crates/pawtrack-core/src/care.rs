//! Purely local care computations: feeding targets, age, litter
//! summaries, and the daily meal rollover.

use std::fmt;

use chrono::NaiveDate;

use pawtrack_types::fields::{day_label, LitterLog, MealSlate, WeightEntry};

/// Weight assumed when no measurement has been recorded yet.
pub const FALLBACK_WEIGHT_KG: f64 = 3.5;

/// How many litter entries the recent-activity view shows.
pub const RECENT_LITTER_LIMIT: usize = 7;

/// Hour of day (local) after which a zero-solids day earns a warning.
const QUIET_DAY_HOUR: u32 = 20;

/// Daily and per-meal food targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedingPlan {
    pub daily_grams: u32,
    pub per_meal_grams: u32,
}

/// Food targets from body weight and the metabolic multiplier
/// (grams per kg). Daily and per-meal figures are each rounded
/// independently: per-meal is `round(daily / 2)`, not `daily / 2`
/// truncated.
pub fn feeding_plan(weight_kg: f64, multiplier: u32) -> FeedingPlan {
    let daily = (weight_kg * f64::from(multiplier)).round();
    let per_meal = (daily / 2.0).round();
    FeedingPlan {
        daily_grams: daily.max(0.0) as u32,
        per_meal_grams: per_meal.max(0.0) as u32,
    }
}

/// The most recent weight in kg (entries are newest first), or the
/// fallback when none has been recorded.
pub fn latest_weight_kg(weights: &[WeightEntry]) -> f64 {
    weights.first().map(|w| w.value).unwrap_or(FALLBACK_WEIGHT_KG)
}

/// Age rendered as whole months plus leftover days, using the average
/// month length (30.44 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months and {} days", self.months, self.days)
    }
}

pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Age {
    let total_days = (today - birth_date).num_days().unsigned_abs() as f64;
    Age {
        months: (total_days / 30.44).floor() as u32,
        days: (total_days % 30.44).floor() as u32,
    }
}

/// Reset the slate when its date label no longer matches today.
pub fn rollover_meals(slate: MealSlate, today: NaiveDate) -> MealSlate {
    if slate.date == day_label(today) {
        slate
    } else {
        MealSlate::empty_for(today)
    }
}

/// Count of solid litter events (kind != none) on the given day.
pub fn solids_on(logs: &[LitterLog], date: NaiveDate) -> usize {
    logs.iter()
        .filter(|log| log.date == date && log.kind.is_solid())
        .count()
}

/// Advisory raised by the daily litter tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitterAdvisory {
    /// More than three solid events today.
    ProductiveDay,
    /// No solid events yet, and the evening has arrived.
    NoMovementYet,
}

impl fmt::Display for LitterAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LitterAdvisory::ProductiveDay => {
                write!(f, "Wow, productive day! 💩")
            }
            LitterAdvisory::NoMovementYet => {
                write!(f, "No movement today? Keep an eye out. 👀")
            }
        }
    }
}

/// Advisory for a solids count at a given local hour, if any.
pub fn litter_advisory(solids_today: usize, hour: u32) -> Option<LitterAdvisory> {
    if solids_today > 3 {
        Some(LitterAdvisory::ProductiveDay)
    } else if solids_today == 0 && hour >= QUIET_DAY_HOUR {
        Some(LitterAdvisory::NoMovementYet)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrack_types::fields::{FeedingRecord, LitterKind, MealSlot};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn feeding_plan_rounds_each_figure_independently() {
        // 4.2 kg at 35 g/kg: daily 147 g, per-meal round(147/2) = 74 g.
        let plan = feeding_plan(4.2, 35);
        assert_eq!(plan.daily_grams, 147);
        assert_eq!(plan.per_meal_grams, 74);
    }

    #[test]
    fn feeding_plan_even_daily_target() {
        let plan = feeding_plan(4.0, 35);
        assert_eq!(plan.daily_grams, 140);
        assert_eq!(plan.per_meal_grams, 70);
    }

    #[test]
    fn latest_weight_uses_newest_entry_or_fallback() {
        assert_eq!(latest_weight_kg(&[]), FALLBACK_WEIGHT_KG);
        let weights = vec![
            WeightEntry {
                id: 2,
                value: 4.2,
                date: date(2026, 8, 1),
            },
            WeightEntry {
                id: 1,
                value: 3.5,
                date: date(2024, 4, 25),
            },
        ];
        assert_eq!(latest_weight_kg(&weights), 4.2);
    }

    #[test]
    fn age_in_months_and_days() {
        // 100 days: 3 months (91.32 days) and 8 leftover days.
        let age = age_on(date(2026, 1, 1), date(2026, 4, 11));
        assert_eq!(age.months, 3);
        assert_eq!(age.days, 8);
        assert_eq!(age.to_string(), "3 months and 8 days");
    }

    #[test]
    fn rollover_resets_stale_slate_only() {
        let mut slate = MealSlate::empty_for(date(2026, 8, 29));
        slate.set_slot(
            MealSlot::Breakfast,
            FeedingRecord {
                fed_by: "Claudio".into(),
                time: "08:10".into(),
            },
        );

        let same_day = rollover_meals(slate.clone(), date(2026, 8, 29));
        assert!(same_day.breakfast.is_some());

        let next_day = rollover_meals(slate, date(2026, 8, 30));
        assert!(next_day.breakfast.is_none());
        assert_eq!(next_day.date, "30/08/2026");
    }

    #[test]
    fn solids_count_excludes_urine_only_and_other_days() {
        let today = date(2026, 8, 30);
        let logs = vec![
            LitterLog {
                id: 1,
                date: today,
                timestamp: "09:00".into(),
                kind: LitterKind::Normal,
            },
            LitterLog {
                id: 2,
                date: today,
                timestamp: "12:00".into(),
                kind: LitterKind::UrineOnly,
            },
            LitterLog {
                id: 3,
                date: date(2026, 8, 29),
                timestamp: "18:00".into(),
                kind: LitterKind::Hard,
            },
        ];
        assert_eq!(solids_on(&logs, today), 1);
    }

    #[test]
    fn advisory_thresholds() {
        assert_eq!(litter_advisory(4, 10), Some(LitterAdvisory::ProductiveDay));
        assert_eq!(litter_advisory(0, 20), Some(LitterAdvisory::NoMovementYet));
        assert_eq!(litter_advisory(0, 19), None);
        assert_eq!(litter_advisory(2, 21), None);
    }
}
