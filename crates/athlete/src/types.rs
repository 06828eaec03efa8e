use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Upper bound on a plausible athlete weight, carried over from the intake
/// form validation.
pub const MAX_WEIGHT_KG: f64 = 250.0;

/// Dietary pattern the athlete follows.
///
/// Profiles arrive from external storage with free-form diet strings, so
/// parsing is lenient: anything unrecognized falls back to [`Diet::Omnivore`].
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Diet {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
    LowCarb,
    Keto,
}

impl Diet {
    /// Lenient parse from stored profile text ("low-carb", "Keto", ...).
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "vegetarian" => Diet::Vegetarian,
            "vegan" => Diet::Vegan,
            "low_carb" => Diet::LowCarb,
            "keto" | "ketogenic" => Diet::Keto,
            _ => Diet::Omnivore,
        }
    }

    /// Low-carb and keto diets share the halved carbohydrate tables.
    pub fn is_carb_restricted(&self) -> bool {
        matches!(self, Diet::LowCarb | Diet::Keto)
    }
}

/// Broad classification of the athlete's primary goal, derived from the
/// free-text goal field by substring match.
#[derive(Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GoalClass {
    Cut,
    Build,
    #[default]
    Maintain,
}

impl GoalClass {
    /// Classify a free-text goal. Cutting keywords win over building ones
    /// when both appear.
    pub fn from_goal(goal: &str) -> Self {
        let goal = goal.to_lowercase();
        if ["lose", "fat", "cut"].iter().any(|k| goal.contains(k)) {
            GoalClass::Cut
        } else if ["gain", "performance", "build"]
            .iter()
            .any(|k| goal.contains(k))
        {
            GoalClass::Build
        } else {
            GoalClass::Maintain
        }
    }
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SweatRate {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GiSensitivity {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaffeineUse {
    None,
    Occasional,
    #[default]
    Regular,
}

/// Read-only athlete profile, owned and persisted externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub weight_kg: f64,
    pub meals_per_day: u8,
    #[serde(default)]
    pub diet: Diet,
    /// Free text ("lose weight", "race performance", ...), classified via
    /// [`GoalClass::from_goal`].
    #[serde(default)]
    pub primary_goal: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub sweat_rate: SweatRate,
    #[serde(default)]
    pub gi_sensitivity: GiSensitivity,
    #[serde(default)]
    pub caffeine_use: CaffeineUse,
}

impl AthleteProfile {
    pub fn goal_class(&self) -> GoalClass {
        GoalClass::from_goal(&self.primary_goal)
    }

    /// A weight is usable when it is a finite, realistic positive number.
    pub fn has_valid_weight(&self) -> bool {
        self.weight_kg.is_finite() && self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diet_parse_lenient() {
        assert_eq!(Diet::parse("low-carb"), Diet::LowCarb);
        assert_eq!(Diet::parse("Low Carb"), Diet::LowCarb);
        assert_eq!(Diet::parse("KETO"), Diet::Keto);
        assert_eq!(Diet::parse("vegan"), Diet::Vegan);
        assert_eq!(Diet::parse("pescatarian"), Diet::Omnivore);
        assert_eq!(Diet::parse(""), Diet::Omnivore);
    }

    #[test]
    fn test_carb_restricted_diets() {
        assert!(Diet::LowCarb.is_carb_restricted());
        assert!(Diet::Keto.is_carb_restricted());
        assert!(!Diet::Vegan.is_carb_restricted());
    }

    #[test]
    fn test_goal_class_from_goal() {
        assert_eq!(GoalClass::from_goal("lose weight"), GoalClass::Cut);
        assert_eq!(GoalClass::from_goal("Fat loss"), GoalClass::Cut);
        assert_eq!(GoalClass::from_goal("race performance"), GoalClass::Build);
        assert_eq!(GoalClass::from_goal("build muscle"), GoalClass::Build);
        assert_eq!(GoalClass::from_goal("stay healthy"), GoalClass::Maintain);
        assert_eq!(GoalClass::from_goal(""), GoalClass::Maintain);
    }

    #[test]
    fn test_cut_keywords_win_over_build() {
        // "lose fat, gain speed" mentions both families; cutting wins.
        assert_eq!(GoalClass::from_goal("lose fat, gain speed"), GoalClass::Cut);
    }

    #[test]
    fn test_weight_validation() {
        let mut profile = sample_profile();
        assert!(profile.has_valid_weight());

        profile.weight_kg = 0.0;
        assert!(!profile.has_valid_weight());
        profile.weight_kg = -70.0;
        assert!(!profile.has_valid_weight());
        profile.weight_kg = 251.0;
        assert!(!profile.has_valid_weight());
        profile.weight_kg = f64::NAN;
        assert!(!profile.has_valid_weight());
    }

    #[test]
    fn test_profile_deserializes_with_defaults() {
        let profile: AthleteProfile =
            serde_json::from_str(r#"{"weight_kg": 72.5, "meals_per_day": 4}"#).unwrap();
        assert_eq!(profile.diet, Diet::Omnivore);
        assert_eq!(profile.sweat_rate, SweatRate::Medium);
        assert_eq!(profile.gi_sensitivity, GiSensitivity::Normal);
        assert_eq!(profile.caffeine_use, CaffeineUse::Regular);
        assert!(profile.allergies.is_empty());
    }

    fn sample_profile() -> AthleteProfile {
        AthleteProfile {
            weight_kg: 75.0,
            meals_per_day: 4,
            diet: Diet::Omnivore,
            primary_goal: "performance".to_string(),
            allergies: vec![],
            sweat_rate: SweatRate::Medium,
            gi_sensitivity: GiSensitivity::Normal,
            caffeine_use: CaffeineUse::Regular,
        }
    }
}
