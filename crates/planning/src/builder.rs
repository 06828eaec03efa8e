use crate::error::PlanningError;
use crate::plan::{DayPlan, PlanSource, WorkoutFueling};
use crate::schedule::{build_slots, resolve_collisions};
use crate::selector::{select_recipe, UsedTitleRegistry};
use crate::targets::{daily_targets, intra_cho_rate};
use athlete::AthleteProfile;
use chrono::NaiveDate;
use recipe::RecipePool;
use std::collections::BTreeMap;
use workout::{classifier, fueling, DayType, Physiology, WorkoutParams, WorkoutRecord};

/// Inputs for one planning run over an inclusive date range.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub profile: AthleteProfile,
    pub workouts: Vec<WorkoutRecord>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parse a calendar date supplied as text at the engine boundary.
pub fn parse_date(s: &str) -> Result<NaiveDate, PlanningError> {
    s.trim()
        .parse()
        .map_err(|_| PlanningError::InvalidDate(s.to_string()))
}

fn validate(request: &PlanRequest) -> Result<(), PlanningError> {
    if request.start > request.end {
        return Err(PlanningError::InvalidDateRange {
            start: request.start,
            end: request.end,
        });
    }
    if !request.profile.has_valid_weight() {
        return Err(PlanningError::InvalidWeight(request.profile.weight_kg));
    }
    Ok(())
}

/// Build one [`DayPlan`] per calendar day across the request range.
///
/// Deterministic and idempotent: no clock reads, no randomness, no I/O.
/// Identical inputs produce byte-identical serialized output, so re-running
/// a range is a wholesale replace of whatever the caller persisted before.
/// The title registry lives exactly as long as this call.
#[tracing::instrument(skip(request, pool), fields(start = %request.start, end = %request.end))]
pub fn build_plan(request: &PlanRequest, pool: &RecipePool) -> Result<Vec<DayPlan>, PlanningError> {
    validate(request)?;

    // Group by date; input order is preserved within a day, so "the first
    // workout of the day" is well defined.
    let mut by_date: BTreeMap<NaiveDate, Vec<&WorkoutRecord>> = BTreeMap::new();
    for workout in &request.workouts {
        by_date.entry(workout.date).or_default().push(workout);
    }

    let mut registry = UsedTitleRegistry::new();
    let mut plans = Vec::new();

    for date in request.start.iter_days() {
        if date > request.end {
            break;
        }
        let day_workouts: Vec<WorkoutRecord> = by_date
            .get(&date)
            .map(|ws| ws.iter().map(|w| (*w).clone()).collect())
            .unwrap_or_default();

        plans.push(build_day(request, pool, &mut registry, date, &day_workouts));
    }

    tracing::debug!(days = plans.len(), "plan built");
    Ok(plans)
}

fn build_day(
    request: &PlanRequest,
    pool: &RecipePool,
    registry: &mut UsedTitleRegistry,
    date: NaiveDate,
    workouts: &[WorkoutRecord],
) -> DayPlan {
    let profile = &request.profile;
    let day_type = classifier::classify_day(workouts);

    let mut targets = daily_targets(
        profile.weight_kg,
        day_type,
        profile.goal_class(),
        profile.diet,
    );
    targets.intra_cho_g_per_h = intra_cho_rate(workouts, day_type);

    let mut meals = build_slots(&targets, profile.meals_per_day, workouts);
    resolve_collisions(&mut meals);

    for slot in &mut meals {
        slot.recipe = Some(select_recipe(
            slot.role,
            &slot.slot_macros(),
            profile,
            pool,
            registry,
        ));
    }

    let fueling = if day_type == DayType::Rest {
        vec![]
    } else {
        let physiology = Physiology::from(profile);
        workouts
            .iter()
            .map(|w| {
                let params = WorkoutParams::from_record(w);
                WorkoutFueling {
                    sport: params.sport.clone(),
                    start_time: params.start_time.clone(),
                    duration_min: params.duration_min,
                    fueling: fueling::fueling_plan(&physiology, &params),
                }
            })
            .collect()
    };

    tracing::trace!(%date, day_type = %day_type, meals = meals.len(), "day planned");

    DayPlan {
        date,
        day_type,
        targets,
        meals,
        fueling,
        source: PlanSource::Engine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use athlete::{CaffeineUse, Diet, GiSensitivity, SweatRate};

    fn profile() -> AthleteProfile {
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

    fn request(start: &str, end: &str, workouts: Vec<WorkoutRecord>) -> PlanRequest {
        PlanRequest {
            profile: profile(),
            workouts,
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
        }
    }

    #[test]
    fn test_reversed_range_is_an_input_error() {
        let req = request("2026-06-07", "2026-06-01", vec![]);
        let err = build_plan(&req, &RecipePool::builtin()).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_invalid_weight_is_an_input_error() {
        let mut req = request("2026-06-01", "2026-06-07", vec![]);
        req.profile.weight_kg = 0.0;
        let err = build_plan(&req, &RecipePool::builtin()).unwrap_err();
        assert!(matches!(err, PlanningError::InvalidWeight(_)));
    }

    #[test]
    fn test_one_plan_per_calendar_day() {
        let req = request("2026-06-01", "2026-06-07", vec![]);
        let plans = build_plan(&req, &RecipePool::builtin()).unwrap();
        assert_eq!(plans.len(), 7);
        for (i, plan) in plans.iter().enumerate() {
            assert_eq!(plan.date, req.start + chrono::Days::new(i as u64));
        }
    }

    #[test]
    fn test_single_day_range_works() {
        let req = request("2026-06-01", "2026-06-01", vec![]);
        let plans = build_plan(&req, &RecipePool::builtin()).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].day_type, DayType::Rest);
    }

    #[test]
    fn test_every_slot_gets_a_recipe() {
        let req = request("2026-06-01", "2026-06-07", vec![]);
        let plans = build_plan(&req, &RecipePool::builtin()).unwrap();
        for plan in &plans {
            for slot in &plan.meals {
                let recipe = slot.recipe.as_ref().expect("slot without recipe");
                assert!(!recipe.ingredients.is_empty());
                assert!(!recipe.steps.is_empty());
            }
        }
    }

    #[test]
    fn test_rest_days_have_no_fueling_entries() {
        let req = request("2026-06-01", "2026-06-02", vec![]);
        let plans = build_plan(&req, &RecipePool::builtin()).unwrap();
        assert!(plans.iter().all(|p| p.fueling.is_empty()));
        assert!(plans.iter().all(|p| p.targets.intra_cho_g_per_h == 0));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
        );
        assert!(matches!(
            parse_date("June 1st"),
            Err(PlanningError::InvalidDate(_))
        ));
    }
}
