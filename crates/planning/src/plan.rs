use chrono::{NaiveDate, NaiveTime};
use recipe::{MealRole, RecipeCandidate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use workout::{DayType, FuelingPlan};

/// Daily macro targets. `carbs_g` is always the energy-closure term; the
/// g/kg heuristic that seeds the calculation is advisory and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub kcal: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    /// Carbohydrate grams per hour to consume during training; 0 on rest days.
    pub intra_cho_g_per_h: u32,
}

/// Timing tags attached to slots realigned around a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlotTag {
    PreWorkout,
    PostWorkout,
}

/// One meal slot in a day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    /// 1-based position in the day's template.
    pub slot: u8,
    pub role: MealRole,
    pub name: String,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub kcal: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<SlotTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeCandidate>,
}

impl MealSlot {
    pub fn slot_macros(&self) -> recipe::MacroProfile {
        recipe::MacroProfile {
            kcal: self.kcal,
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
        }
    }

    pub fn has_tag(&self, tag: SlotTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// During-workout fueling guidance attached to a day plan, one entry per
/// workout on non-rest days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFueling {
    pub sport: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    pub duration_min: u32,
    pub fueling: FuelingPlan,
}

/// Which pipeline produced a plan. The deterministic engine always emits
/// `Engine`; the external assistant emits the same schema tagged
/// `Assistant`, so storage and UI stay agnostic to the producer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanSource {
    #[default]
    Engine,
    Assistant,
}

/// A complete plan for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub targets: MacroTargets,
    pub meals: Vec<MealSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fueling: Vec<WorkoutFueling>,
    #[serde(default)]
    pub source: PlanSource,
}

/// Serialize slot times as "HH:MM", the wire shape of the surrounding app.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_time_serializes_as_hhmm() {
        let slot = MealSlot {
            slot: 1,
            role: MealRole::Breakfast,
            name: "Breakfast".to_string(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            kcal: 500,
            protein_g: 30,
            carbs_g: 60,
            fat_g: 15,
            tags: vec![],
            recipe: None,
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["time"], "08:00");

        let back: MealSlot = serde_json::from_value(json).unwrap();
        assert_eq!(back.time, slot.time);
    }

    #[test]
    fn test_plan_source_defaults_to_engine() {
        let json = r#"{
            "date": "2026-06-01",
            "day_type": "rest",
            "targets": {"kcal": 2000, "protein_g": 130, "carbs_g": 200, "fat_g": 60, "intra_cho_g_per_h": 0},
            "meals": []
        }"#;
        let plan: DayPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.source, PlanSource::Engine);
        assert!(plan.fueling.is_empty());
    }
}
