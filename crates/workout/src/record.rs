use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled or logged workout, as ingested from an external source
/// (TrainingPeaks-style export or manual entry). Read-only input: every
/// field beyond the date may be missing and missing fields are data gaps,
/// never errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    /// Local start time as "HH:MM". Kept as text because exports carry all
    /// sorts of junk here; parse lazily via [`WorkoutRecord::parsed_start_time`].
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub planned_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub tss: Option<f64>,
    #[serde(default)]
    pub intensity_factor: Option<f64>,
    #[serde(default)]
    pub rpe: Option<f64>,
}

impl WorkoutRecord {
    /// Effective duration in hours: actual when logged, otherwise planned,
    /// otherwise 0 (a data gap, not an error).
    pub fn duration_hours(&self) -> f64 {
        self.actual_hours.or(self.planned_hours).unwrap_or(0.0)
    }

    /// Effective duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.duration_hours() * 60.0).round() as i64
    }

    /// Start time parsed as "HH:MM" ("%H:%M"). Anything unparseable counts
    /// as absent.
    pub fn parsed_start_time(&self) -> Option<NaiveTime> {
        self.start_time
            .as_deref()
            .and_then(|s| NaiveTime::parse_from_str(s.trim(), "%H:%M").ok())
    }

    /// Case-insensitive check of the sport name against high-intensity
    /// session keywords.
    pub fn sport_suggests_intensity(&self) -> bool {
        let sport = self.sport.to_lowercase();
        ["interval", "tempo", "race", "threshold"]
            .iter()
            .any(|k| sport.contains(k))
    }
}
