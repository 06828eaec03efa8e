use anyhow::{Context, Result};
use athlete::AthleteProfile;
use chrono::NaiveDate;
use planning::{DayPlan, PlanSink, ProfileSource, WorkoutSource};
use std::fs;
use std::path::PathBuf;
use workout::WorkoutRecord;

/// Profile read from a JSON file. The athlete id is ignored: a file holds
/// exactly one profile.
pub struct JsonProfileSource {
    pub path: PathBuf,
}

impl ProfileSource for JsonProfileSource {
    fn athlete_profile(&self, _athlete_id: &str) -> Result<AthleteProfile> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading profile {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing profile {}", self.path.display()))
    }
}

/// Workout records read from a JSON array file, filtered to the requested
/// range.
pub struct JsonWorkoutSource {
    pub path: PathBuf,
}

impl WorkoutSource for JsonWorkoutSource {
    fn workouts_in_range(
        &self,
        _athlete_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading workouts {}", self.path.display()))?;
        let records: Vec<WorkoutRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing workouts {}", self.path.display()))?;
        Ok(records
            .into_iter()
            .filter(|w| w.date >= start && w.date <= end)
            .collect())
    }
}

/// Plan sink that writes the produced range as pretty JSON, either to a
/// file or to stdout.
pub struct JsonPlanSink {
    pub out: Option<PathBuf>,
}

impl PlanSink for JsonPlanSink {
    fn replace_range(
        &mut self,
        _athlete_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
        plans: &[DayPlan],
    ) -> Result<()> {
        let rendered = serde_json::to_string_pretty(plans)?;
        match &self.out {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("writing plan {}", path.display()))?,
            None => println!("{rendered}"),
        }
        Ok(())
    }
}
