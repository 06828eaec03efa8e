use crate::builder::{build_plan, PlanRequest};
use crate::plan::DayPlan;
use athlete::AthleteProfile;
use chrono::NaiveDate;
use recipe::RecipePool;
use workout::WorkoutRecord;

/// Read-only source of athlete profiles.
pub trait ProfileSource {
    fn athlete_profile(&self, athlete_id: &str) -> anyhow::Result<AthleteProfile>;
}

/// Read-only source of workout records for an athlete and date range.
pub trait WorkoutSource {
    fn workouts_in_range(
        &self,
        athlete_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<WorkoutRecord>>;
}

/// Persistence sink for generated plans.
///
/// A replan of a range is a wholesale replace: delete every row in the
/// range, insert every produced row. Atomicity belongs to the sink; a
/// failed write means nothing changed and the engine never retries, since
/// re-invocation is deterministic and side-effect-free up to this call.
pub trait PlanSink {
    fn replace_range(
        &mut self,
        athlete_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        plans: &[DayPlan],
    ) -> anyhow::Result<()>;
}

/// Fetch inputs, run the deterministic builder, store the result.
///
/// Callers must serialize concurrent replans for the same athlete and range
/// themselves; the engine holds no locks.
#[tracing::instrument(skip(profiles, workouts, sink, pool))]
pub fn plan_and_store<P, W, S>(
    athlete_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    profiles: &P,
    workouts: &W,
    sink: &mut S,
    pool: &RecipePool,
) -> anyhow::Result<Vec<DayPlan>>
where
    P: ProfileSource,
    W: WorkoutSource,
    S: PlanSink,
{
    let request = PlanRequest {
        profile: profiles.athlete_profile(athlete_id)?,
        workouts: workouts.workouts_in_range(athlete_id, start, end)?,
        start,
        end,
    };
    let plans = build_plan(&request, pool)?;
    sink.replace_range(athlete_id, start, end, &plans)?;
    tracing::info!(athlete_id, days = plans.len(), "plan stored");
    Ok(plans)
}
