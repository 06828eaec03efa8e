use crate::record::WorkoutRecord;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Classification of a calendar day's training load.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayType {
    #[default]
    Rest,
    Training,
    High,
}

/// Sum of effective workout hours for the day.
pub fn total_hours(workouts: &[WorkoutRecord]) -> f64 {
    workouts.iter().map(WorkoutRecord::duration_hours).sum()
}

/// A day carries high-intensity work when any workout crosses the TSS, RPE
/// or intensity-factor thresholds, or its sport name is a recognizably hard
/// session type.
pub fn has_high_intensity(workouts: &[WorkoutRecord]) -> bool {
    workouts.iter().any(|w| {
        w.tss.is_some_and(|t| t >= 150.0)
            || w.rpe.is_some_and(|r| r >= 7.0)
            || w.intensity_factor.is_some_and(|f| f >= 0.85)
            || w.sport_suggests_intensity()
    })
}

/// Map a day's workouts to a [`DayType`]. Pure and total: an empty list is
/// a rest day, never an error.
pub fn classify_day(workouts: &[WorkoutRecord]) -> DayType {
    if workouts.is_empty() {
        return DayType::Rest;
    }
    if has_high_intensity(workouts) || total_hours(workouts) >= 2.0 {
        DayType::High
    } else {
        DayType::Training
    }
}
