use crate::plan::{MacroTargets, MealSlot, SlotTag};
use chrono::{Duration, NaiveTime};
use recipe::MealRole;
use workout::WorkoutRecord;

pub const MEALS_PER_DAY_MIN: u8 = 3;
pub const MEALS_PER_DAY_MAX: u8 = 6;

/// Minimum spacing between any two meals on a day.
pub const MIN_SLOT_GAP_MIN: i64 = 30;

const PRE_WORKOUT_LEAD_MIN: i64 = 90;
const POST_WORKOUT_LAG_MIN: i64 = 60;

struct SlotTemplate {
    role: MealRole,
    name: &'static str,
    time: (u32, u32),
}

const fn slot(role: MealRole, name: &'static str, h: u32, m: u32) -> SlotTemplate {
    SlotTemplate {
        role,
        name,
        time: (h, m),
    }
}

/// Fixed day templates by meal count. Roles are explicit on every slot;
/// nothing downstream ever sniffs slot names.
fn template_for(meal_count: u8) -> &'static [SlotTemplate] {
    use MealRole::*;
    const THREE: [SlotTemplate; 3] = [
        slot(Breakfast, "Breakfast", 8, 0),
        slot(Lunch, "Lunch", 13, 0),
        slot(Dinner, "Dinner", 19, 30),
    ];
    const FOUR: [SlotTemplate; 4] = [
        slot(Breakfast, "Breakfast", 8, 0),
        slot(Snack, "Snack", 11, 0),
        slot(Lunch, "Lunch", 14, 0),
        slot(Dinner, "Dinner", 20, 30),
    ];
    const FIVE: [SlotTemplate; 5] = [
        slot(Breakfast, "Breakfast", 8, 0),
        slot(Snack, "Morning Snack", 10, 30),
        slot(Lunch, "Lunch", 13, 0),
        slot(Snack, "Afternoon Snack", 16, 30),
        slot(Dinner, "Dinner", 20, 0),
    ];
    const SIX: [SlotTemplate; 6] = [
        slot(Breakfast, "Breakfast", 7, 30),
        slot(Snack, "Morning Snack", 10, 0),
        slot(Lunch, "Lunch", 12, 30),
        slot(Snack, "Afternoon Snack", 15, 30),
        slot(Dinner, "Dinner", 18, 30),
        slot(Snack, "Evening Snack", 21, 0),
    ];
    match meal_count {
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        _ => &SIX,
    }
}

/// Fraction of the day's macros each template slot receives.
///
/// Without snacks: Breakfast 30%, Lunch 35%, Dinner 35%. With snacks:
/// Breakfast 25%, Lunch 30%, Dinner 30%, and the remaining 15% split evenly
/// across the snack slots.
fn share_for(template: &[SlotTemplate], index: usize) -> f64 {
    let snack_count = template
        .iter()
        .filter(|s| s.role == MealRole::Snack)
        .count();
    let role = template[index].role;
    if snack_count == 0 {
        match role {
            MealRole::Breakfast => 0.30,
            _ => 0.35,
        }
    } else {
        match role {
            MealRole::Breakfast => 0.25,
            MealRole::Snack => 0.15 / snack_count as f64,
            _ => 0.30,
        }
    }
}

fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    // overflowing_add_signed wraps on the 24h clock, which is exactly the
    // behavior we want for late workouts.
    time.overflowing_add_signed(Duration::minutes(minutes)).0
}

/// Build the day's meal slots: template lookup, macro split, then workout
/// realignment. `meals_per_day` outside [3, 6] is silently clamped.
pub fn build_slots(
    targets: &MacroTargets,
    meals_per_day: u8,
    workouts: &[WorkoutRecord],
) -> Vec<MealSlot> {
    let meal_count = meals_per_day.clamp(MEALS_PER_DAY_MIN, MEALS_PER_DAY_MAX);
    let template = template_for(meal_count);

    let mut slots: Vec<MealSlot> = template
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let share = share_for(template, i);
            // Each macro rounds independently; the small drift against the
            // daily target is tolerated rather than redistributed.
            MealSlot {
                slot: (i + 1) as u8,
                role: t.role,
                name: t.name.to_string(),
                time: NaiveTime::from_hms_opt(t.time.0, t.time.1, 0)
                    .unwrap_or(NaiveTime::MIN),
                kcal: (f64::from(targets.kcal) * share).round() as u32,
                protein_g: (f64::from(targets.protein_g) * share).round() as u32,
                carbs_g: (f64::from(targets.carbs_g) * share).round() as u32,
                fat_g: (f64::from(targets.fat_g) * share).round() as u32,
                tags: vec![],
                recipe: None,
            }
        })
        .collect();

    align_around_workout(&mut slots, workouts);
    slots
}

/// Re-time slots around the first workout of the day that has a parseable
/// start time. No workout or no usable time means no realignment.
fn align_around_workout(slots: &mut [MealSlot], workouts: &[WorkoutRecord]) {
    let Some((start, duration_min)) = workouts
        .iter()
        .find_map(|w| w.parsed_start_time().map(|t| (t, w.duration_minutes())))
    else {
        return;
    };

    let pre_time = add_minutes(start, -PRE_WORKOUT_LEAD_MIN);
    let post_time = add_minutes(start, duration_min + POST_WORKOUT_LAG_MIN);

    if let Some(snack) = slots.iter_mut().find(|s| s.role == MealRole::Snack) {
        snack.time = pre_time;
        snack.tags.push(SlotTag::PreWorkout);
    }

    let post_slot = if slots.iter().any(|s| s.role == MealRole::Lunch) {
        slots.iter_mut().find(|s| s.role == MealRole::Lunch)
    } else {
        slots.iter_mut().find(|s| s.role == MealRole::Dinner)
    };
    if let Some(meal) = post_slot {
        meal.time = post_time;
        meal.tags.push(SlotTag::PostWorkout);
    }
}

fn minutes_of(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Enforce the slot-time invariants: all times distinct and, sorted,
/// consecutive times at least [`MIN_SLOT_GAP_MIN`] apart.
///
/// When two slots collide, the one later in template order moves forward in
/// 15-minute steps (wrapping on the 24h clock) until the day is clean.
/// Macros and tags travel with their slot untouched.
pub fn resolve_collisions(slots: &mut [MealSlot]) {
    // Six slots need three hours of a 24-hour day, so a fixpoint always
    // exists; the cap only guards against a logic bug looping forever.
    let max_steps = 24 * 60 / 15 * slots.len().max(1);

    for _ in 0..max_steps {
        let mut order: Vec<usize> = (0..slots.len()).collect();
        order.sort_by_key(|&i| (minutes_of(slots[i].time), i));

        let violation = order.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let gap = minutes_of(slots[b].time) - minutes_of(slots[a].time);
            (gap < MIN_SLOT_GAP_MIN).then_some((a, b))
        });

        match violation {
            Some((a, b)) => {
                // Template order, not time order, picks which slot yields.
                let mover = a.max(b);
                slots[mover].time = add_minutes(slots[mover].time, 15);
            }
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn targets() -> MacroTargets {
        MacroTargets {
            kcal: 2678,
            protein_g: 135,
            carbs_g: 445,
            fat_g: 40,
            intra_cho_g_per_h: 60,
        }
    }

    fn workout_at(start: &str, hours: f64) -> WorkoutRecord {
        WorkoutRecord {
            date: "2026-06-01".parse().unwrap(),
            start_time: Some(start.to_string()),
            sport: "Bike".to_string(),
            title: String::new(),
            planned_hours: Some(hours),
            actual_hours: None,
            tss: None,
            intensity_factor: None,
            rpe: None,
        }
    }

    fn hm(slot: &MealSlot) -> (u32, u32) {
        (slot.time.hour(), slot.time.minute())
    }

    #[test]
    fn test_four_meal_template_default_times_and_shares() {
        let slots = build_slots(&targets(), 4, &[]);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].name, "Breakfast");
        assert_eq!(hm(&slots[0]), (8, 0));
        assert_eq!(slots[1].role, MealRole::Snack);
        assert_eq!(hm(&slots[1]), (11, 0));
        assert_eq!(hm(&slots[2]), (14, 0));
        assert_eq!(hm(&slots[3]), (20, 30));
        // Shares 25/15/30/30 of 2678 kcal.
        assert_eq!(slots[0].kcal, 670);
        assert_eq!(slots[1].kcal, 402);
        assert_eq!(slots[2].kcal, 803);
        assert_eq!(slots[3].kcal, 803);
    }

    #[test]
    fn test_three_meal_shares() {
        let slots = build_slots(&targets(), 3, &[]);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].kcal, (2678.0_f64 * 0.30).round() as u32);
        assert_eq!(slots[1].kcal, (2678.0_f64 * 0.35).round() as u32);
        assert_eq!(slots[2].kcal, (2678.0_f64 * 0.35).round() as u32);
    }

    #[test]
    fn test_snack_share_splits_evenly() {
        let slots = build_slots(&targets(), 6, &[]);
        let snack_kcal: Vec<u32> = slots
            .iter()
            .filter(|s| s.role == MealRole::Snack)
            .map(|s| s.kcal)
            .collect();
        assert_eq!(snack_kcal.len(), 3);
        // 15% over three snacks = 5% each.
        assert!(snack_kcal.iter().all(|&k| k == (2678.0_f64 * 0.05).round() as u32));
    }

    #[test]
    fn test_meals_per_day_clamped() {
        assert_eq!(build_slots(&targets(), 1, &[]).len(), 3);
        assert_eq!(build_slots(&targets(), 9, &[]).len(), 6);
    }

    #[test]
    fn test_workout_alignment_worked_example() {
        // 10:00 workout for 2.5h on a 4-meal day: snack becomes the 08:30
        // pre-workout meal, lunch the 13:30 post-workout meal.
        let slots = build_slots(&targets(), 4, &[workout_at("10:00", 2.5)]);
        let snack = slots.iter().find(|s| s.role == MealRole::Snack).unwrap();
        assert_eq!(hm(snack), (8, 30));
        assert!(snack.has_tag(SlotTag::PreWorkout));

        let lunch = slots.iter().find(|s| s.role == MealRole::Lunch).unwrap();
        assert_eq!(hm(lunch), (13, 30));
        assert!(lunch.has_tag(SlotTag::PostWorkout));
    }

    #[test]
    fn test_alignment_skips_unparseable_start_times() {
        let mut w = workout_at("early", 1.0);
        w.start_time = Some("early".to_string());
        let slots = build_slots(&targets(), 4, &[w]);
        assert_eq!(hm(&slots[1]), (11, 0));
        assert!(slots.iter().all(|s| s.tags.is_empty()));
    }

    #[test]
    fn test_alignment_uses_first_parseable_workout() {
        let unparseable = workout_at("??", 1.0);
        let parseable = workout_at("18:00", 1.0);
        let slots = build_slots(&targets(), 4, &[unparseable, parseable]);
        let snack = slots.iter().find(|s| s.role == MealRole::Snack).unwrap();
        assert_eq!(hm(snack), (16, 30));
    }

    #[test]
    fn test_pre_workout_time_wraps_past_midnight() {
        let slots = build_slots(&targets(), 4, &[workout_at("00:30", 1.0)]);
        let snack = slots.iter().find(|s| s.role == MealRole::Snack).unwrap();
        assert_eq!(hm(snack), (23, 0));
    }

    #[test]
    fn test_post_workout_falls_back_to_dinner_without_lunch() {
        // Synthetic template check: strip lunch from a 3-meal day.
        let mut slots = build_slots(&targets(), 3, &[]);
        slots.retain(|s| s.role != MealRole::Lunch);
        align_for_test(&mut slots, &[workout_at("09:00", 1.0)]);
        let dinner = slots.iter().find(|s| s.role == MealRole::Dinner).unwrap();
        assert!(dinner.has_tag(SlotTag::PostWorkout));
        assert_eq!(hm(dinner), (11, 0));
    }

    fn align_for_test(slots: &mut [MealSlot], workouts: &[WorkoutRecord]) {
        super::align_around_workout(slots, workouts);
    }

    #[test]
    fn test_collision_resolution_spreads_equal_times() {
        let mut slots = build_slots(&targets(), 4, &[]);
        slots[1].time = slots[0].time; // snack collides with breakfast
        resolve_collisions(&mut slots);

        let mut times: Vec<i64> = slots.iter().map(|s| minutes_of(s.time)).collect();
        times.sort_unstable();
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= MIN_SLOT_GAP_MIN);
        }
        // Breakfast (earlier in the template) kept its time.
        assert_eq!(hm(&slots[0]), (8, 0));
    }

    #[test]
    fn test_collision_resolution_cascades() {
        let mut slots = build_slots(&targets(), 4, &[]);
        // Pile three slots within a 20-minute window.
        slots[0].time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        slots[1].time = NaiveTime::from_hms_opt(8, 10, 0).unwrap();
        slots[2].time = NaiveTime::from_hms_opt(8, 20, 0).unwrap();
        resolve_collisions(&mut slots);

        let mut times: Vec<i64> = slots.iter().map(|s| minutes_of(s.time)).collect();
        times.sort_unstable();
        times.dedup();
        assert_eq!(times.len(), 4);
        let mut sorted: Vec<i64> = slots.iter().map(|s| minutes_of(s.time)).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            assert!(pair[1] - pair[0] >= MIN_SLOT_GAP_MIN);
        }
    }

    #[test]
    fn test_collision_resolution_preserves_macros_and_tags() {
        let mut slots = build_slots(&targets(), 4, &[workout_at("12:30", 1.0)]);
        let before: Vec<(u32, Vec<SlotTag>)> = slots
            .iter()
            .map(|s| (s.kcal, s.tags.clone()))
            .collect();
        resolve_collisions(&mut slots);
        let after: Vec<(u32, Vec<SlotTag>)> = slots
            .iter()
            .map(|s| (s.kcal, s.tags.clone()))
            .collect();
        assert_eq!(before, after);
    }
}
