use crate::record::WorkoutRecord;
use athlete::{AthleteProfile, CaffeineUse, GiSensitivity, SweatRate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Session intensity band for fueling lookups.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intensity {
    #[default]
    Moderate,
    High,
    VeryHigh,
}

impl Intensity {
    /// Derive an intensity band from a raw workout record so the planner can
    /// consult the fueling engine without a hand-entered intensity.
    pub fn from_record(record: &WorkoutRecord) -> Self {
        if record.intensity_factor.is_some_and(|f| f >= 0.95) || record.rpe.is_some_and(|r| r >= 9.0)
        {
            Intensity::VeryHigh
        } else if record.intensity_factor.is_some_and(|f| f >= 0.85)
            || record.rpe.is_some_and(|r| r >= 7.0)
            || record.tss.is_some_and(|t| t >= 150.0)
            || record.sport_suggests_intensity()
        {
            Intensity::High
        } else {
            Intensity::Moderate
        }
    }
}

/// Physiology inputs to the fueling engine, a read-only slice of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Physiology {
    pub weight_kg: f64,
    pub sweat_rate: SweatRate,
    pub gi_sensitivity: GiSensitivity,
    pub caffeine_use: CaffeineUse,
}

impl From<&AthleteProfile> for Physiology {
    fn from(profile: &AthleteProfile) -> Self {
        Physiology {
            weight_kg: profile.weight_kg,
            sweat_rate: profile.sweat_rate,
            gi_sensitivity: profile.gi_sensitivity,
            caffeine_use: profile.caffeine_use,
        }
    }
}

/// One workout's parameters as the fueling engine sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutParams {
    pub sport: String,
    pub duration_min: u32,
    pub intensity: Intensity,
    pub start_time: Option<String>,
}

impl WorkoutParams {
    pub fn from_record(record: &WorkoutRecord) -> Self {
        WorkoutParams {
            sport: record.sport.clone(),
            duration_min: record.duration_minutes().max(0) as u32,
            intensity: Intensity::from_record(record),
            start_time: record.start_time.clone(),
        }
    }
}

/// Per-workout fueling rates. All integers, all deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelingPlan {
    pub carbs_g_per_h: u32,
    pub hydration_ml_per_h: u32,
    pub sodium_mg_per_h: u32,
    /// Single pre/early-session dose; stays inside the 300-400 mg/day
    /// guidance band.
    pub caffeine_mg: u32,
    /// Suggested feeding reminder interval during the session.
    pub interval_minutes: u32,
}

const CARBS_CAP_G_PER_H: f64 = 90.0;
const HYDRATION_CAP_ML_PER_H: f64 = 1100.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum DurationBracket {
    Short,  // < 60 min
    Medium, // 60-90 min
    Long,   // > 90 min
}

impl DurationBracket {
    fn from_minutes(duration_min: u32) -> Self {
        if duration_min < 60 {
            DurationBracket::Short
        } else if duration_min <= 90 {
            DurationBracket::Medium
        } else {
            DurationBracket::Long
        }
    }
}

fn base_carbs_g_per_h(bracket: DurationBracket, intensity: Intensity) -> f64 {
    match (bracket, intensity) {
        (DurationBracket::Short, Intensity::Moderate) => 20.0,
        (DurationBracket::Short, Intensity::High) => 30.0,
        (DurationBracket::Short, Intensity::VeryHigh) => 40.0,
        (DurationBracket::Medium, Intensity::Moderate) => 45.0,
        (DurationBracket::Medium, Intensity::High) => 60.0,
        (DurationBracket::Medium, Intensity::VeryHigh) => 75.0,
        (DurationBracket::Long, Intensity::Moderate) => 60.0,
        (DurationBracket::Long, Intensity::High) => 75.0,
        (DurationBracket::Long, Intensity::VeryHigh) => 90.0,
    }
}

fn sweat_multiplier(sweat_rate: SweatRate) -> f64 {
    match sweat_rate {
        SweatRate::Low => 0.8,
        SweatRate::Medium => 1.0,
        SweatRate::High => 1.3,
    }
}

fn caffeine_dose_mg(
    caffeine_use: CaffeineUse,
    bracket: DurationBracket,
    intensity: Intensity,
) -> u32 {
    if caffeine_use == CaffeineUse::None {
        return 0;
    }
    let dose = match (bracket, intensity) {
        (DurationBracket::Short, _) => 0,
        (DurationBracket::Medium, Intensity::Moderate) => 0,
        (DurationBracket::Medium, _) => 100,
        (DurationBracket::Long, Intensity::Moderate) => 100,
        (DurationBracket::Long, _) => 200,
    };
    match caffeine_use {
        CaffeineUse::Occasional => dose.min(100),
        _ => dose,
    }
}

/// Compute pre/during fueling rates for one workout.
///
/// Deterministic lookup by duration bracket (<60 / 60-90 / >90 min) and
/// intensity band, then adjusted for the athlete: high GI sensitivity trims
/// carbs by 15%, sweat rate scales hydration and sodium. Hard caps: 90 g/h
/// carbs, 1100 ml/h fluid (very-high intensity adds 100 ml/h before the cap).
pub fn fueling_plan(physiology: &Physiology, workout: &WorkoutParams) -> FuelingPlan {
    let bracket = DurationBracket::from_minutes(workout.duration_min);

    let mut carbs = base_carbs_g_per_h(bracket, workout.intensity);
    if physiology.gi_sensitivity == GiSensitivity::High {
        carbs *= 0.85;
    }
    let carbs = carbs.min(CARBS_CAP_G_PER_H).round() as u32;

    let mut hydration = match workout.intensity {
        Intensity::Moderate => 500.0,
        Intensity::High | Intensity::VeryHigh => 600.0,
    };
    if workout.intensity == Intensity::VeryHigh {
        hydration += 100.0;
    }
    hydration *= sweat_multiplier(physiology.sweat_rate);
    let hydration = hydration.min(HYDRATION_CAP_ML_PER_H).round() as u32;

    let sodium = match workout.intensity {
        Intensity::Moderate => 300.0,
        Intensity::High => 400.0,
        Intensity::VeryHigh => 500.0,
    } * sweat_multiplier(physiology.sweat_rate);

    let interval_minutes = match (bracket, workout.intensity) {
        (DurationBracket::Short, _) => 30,
        (_, Intensity::Moderate) => 20,
        _ => 15,
    };

    FuelingPlan {
        carbs_g_per_h: carbs,
        hydration_ml_per_h: hydration,
        sodium_mg_per_h: sodium.round() as u32,
        caffeine_mg: caffeine_dose_mg(physiology.caffeine_use, bracket, workout.intensity),
        interval_minutes,
    }
}
