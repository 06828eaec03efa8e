use crate::plan::MacroTargets;
use athlete::{Diet, GoalClass};
use workout::{classifier, DayType, WorkoutRecord};

pub const KCAL_MIN: u32 = 1600;
pub const KCAL_MAX: u32 = 4500;
pub const FAT_MIN_G: u32 = 40;
pub const FAT_MAX_G: u32 = 140;

fn base_kcal_per_kg(day_type: DayType) -> f64 {
    match day_type {
        DayType::Rest => 27.0,
        DayType::Training => 30.0,
        DayType::High => 34.0,
    }
}

fn goal_multiplier(goal: GoalClass) -> f64 {
    match goal {
        GoalClass::Cut => 0.9,
        GoalClass::Build => 1.05,
        GoalClass::Maintain => 1.0,
    }
}

fn carb_g_per_kg(day_type: DayType, diet: Diet) -> f64 {
    // Carb-restricted diets halve the normal table.
    match (diet.is_carb_restricted(), day_type) {
        (true, DayType::Rest) => 2.0,
        (true, DayType::Training) => 3.0,
        (true, DayType::High) => 4.0,
        (false, DayType::Rest) => 3.0,
        (false, DayType::Training) => 4.5,
        (false, DayType::High) => 6.0,
    }
}

/// Compute the day's macro targets from weight, day type, goal and diet.
///
/// The calculation runs in two passes. The g/kg carb table only seeds the
/// fat estimate; the closure pass then rederives `carbs_g` from the energy
/// identity kcal = 4·protein + 4·carbs + 9·fat, and that closure value is
/// what ships. With fat pinned at a clamp bound the closure carbs can drift
/// outside the g/kg band; that is accepted behavior.
///
/// `intra_cho_g_per_h` is left at 0 here; see [`intra_cho_rate`].
pub fn daily_targets(
    weight_kg: f64,
    day_type: DayType,
    goal: GoalClass,
    diet: Diet,
) -> MacroTargets {
    let kcal = (weight_kg * base_kcal_per_kg(day_type) * goal_multiplier(goal)).round();
    let kcal = (kcal as u32).clamp(KCAL_MIN, KCAL_MAX);

    let protein_per_kg = if goal == GoalClass::Cut { 2.0 } else { 1.8 };
    let protein_g = (weight_kg * protein_per_kg).round() as u32;

    // Advisory starting point only; discarded after the fat estimate.
    let carbs_heuristic_g = (weight_kg * carb_g_per_kg(day_type, diet)).round();

    let fat_estimate =
        ((f64::from(kcal) - f64::from(protein_g) * 4.0 - carbs_heuristic_g * 4.0) / 9.0).round();
    let fat_g = (fat_estimate.max(0.0) as u32).clamp(FAT_MIN_G, FAT_MAX_G);

    // Closure pass: carbs absorb whatever energy protein and fat leave over.
    let remaining = f64::from(kcal) - f64::from(protein_g) * 4.0 - f64::from(fat_g) * 9.0;
    let carbs_g = (remaining / 4.0).round().max(0.0) as u32;

    MacroTargets {
        kcal,
        protein_g,
        carbs_g,
        fat_g,
        intra_cho_g_per_h: 0,
    }
}

/// Carbohydrate grams per hour to consume during training.
///
/// The intensity test here is narrower than the day classifier's: only TSS
/// and intensity factor count, not RPE or session-name keywords.
pub fn intra_cho_rate(workouts: &[WorkoutRecord], day_type: DayType) -> u32 {
    if day_type == DayType::Rest {
        return 0;
    }
    let hours = classifier::total_hours(workouts);
    let intense = workouts.iter().any(|w| {
        w.tss.is_some_and(|t| t >= 150.0) || w.intensity_factor.is_some_and(|f| f >= 0.85)
    });
    let high_day = day_type == DayType::High;

    if hours >= 2.0 || intense {
        if high_day { 90 } else { 60 }
    } else if hours >= 1.0 {
        if high_day { 60 } else { 30 }
    } else if high_day {
        45
    } else {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closure_error(t: &MacroTargets) -> i64 {
        i64::from(t.kcal)
            - i64::from(t.protein_g) * 4
            - i64::from(t.carbs_g) * 4
            - i64::from(t.fat_g) * 9
    }

    #[test]
    fn test_worked_example_75kg_high_performance() {
        let t = daily_targets(75.0, DayType::High, GoalClass::Build, Diet::Omnivore);
        assert_eq!(t.kcal, 2678); // round(75 * 34 * 1.05)
        assert_eq!(t.protein_g, 135); // round(75 * 1.8)
        // fat estimate lands below the floor, so fat pins at 40 and the
        // closure carbs absorb the rest.
        assert_eq!(t.fat_g, 40);
        assert_eq!(t.carbs_g, 445);
        // Carbs carry 4 kcal/g, so closure is exact to within 2 kcal.
        assert!(closure_error(&t).abs() <= 2);
    }

    #[test]
    fn test_cut_goal_uses_higher_protein_and_lower_kcal() {
        let t = daily_targets(80.0, DayType::Training, GoalClass::Cut, Diet::Omnivore);
        assert_eq!(t.protein_g, 160); // 2.0 g/kg
        assert_eq!(t.kcal, 2160); // round(80 * 30 * 0.9)
    }

    #[test]
    fn test_kcal_floor_for_light_athletes() {
        let t = daily_targets(45.0, DayType::Rest, GoalClass::Cut, Diet::Omnivore);
        assert_eq!(t.kcal, KCAL_MIN);
    }

    #[test]
    fn test_kcal_ceiling_for_heavy_high_days() {
        let t = daily_targets(140.0, DayType::High, GoalClass::Build, Diet::Omnivore);
        assert_eq!(t.kcal, KCAL_MAX);
    }

    #[test]
    fn test_closure_holds_across_the_input_grid() {
        for weight in [48.0, 60.0, 75.0, 92.5, 110.0] {
            for day_type in [DayType::Rest, DayType::Training, DayType::High] {
                for goal in [GoalClass::Cut, GoalClass::Build, GoalClass::Maintain] {
                    for diet in [Diet::Omnivore, Diet::LowCarb, Diet::Keto, Diet::Vegan] {
                        let t = daily_targets(weight, day_type, goal, diet);
                        assert!(
                            closure_error(&t).abs() <= 2,
                            "closure off for w={weight} {day_type:?} {goal:?} {diet:?}: {t:?}"
                        );
                        assert!((KCAL_MIN..=KCAL_MAX).contains(&t.kcal));
                        assert!((FAT_MIN_G..=FAT_MAX_G).contains(&t.fat_g));
                    }
                }
            }
        }
    }

    #[test]
    fn test_carb_restricted_diet_lowers_fat_seed() {
        // Same inputs, different diet: the heuristic changes the fat
        // estimate, which the closure then respects.
        let normal = daily_targets(70.0, DayType::Training, GoalClass::Maintain, Diet::Omnivore);
        let low_carb = daily_targets(70.0, DayType::Training, GoalClass::Maintain, Diet::Keto);
        assert!(low_carb.fat_g > normal.fat_g);
        assert!(low_carb.carbs_g < normal.carbs_g);
    }

    mod intra {
        use super::*;
        use workout::WorkoutRecord;

        fn workout(hours: f64) -> WorkoutRecord {
            WorkoutRecord {
                date: "2026-06-01".parse().unwrap(),
                start_time: None,
                sport: "Bike".to_string(),
                title: String::new(),
                planned_hours: Some(hours),
                actual_hours: None,
                tss: None,
                intensity_factor: None,
                rpe: None,
            }
        }

        #[test]
        fn test_rest_day_is_zero() {
            assert_eq!(intra_cho_rate(&[], DayType::Rest), 0);
        }

        #[test]
        fn test_long_day_rates() {
            let day = [workout(2.5)];
            assert_eq!(intra_cho_rate(&day, DayType::High), 90);
            assert_eq!(intra_cho_rate(&day, DayType::Training), 60);
        }

        #[test]
        fn test_intense_short_day_counts_as_long() {
            let mut w = workout(0.75);
            w.intensity_factor = Some(0.9);
            assert_eq!(intra_cho_rate(&[w], DayType::High), 90);
        }

        #[test]
        fn test_rpe_does_not_trigger_the_intra_intensity_test() {
            // The intra table only looks at TSS and IF.
            let mut w = workout(1.2);
            w.rpe = Some(8.0);
            assert_eq!(intra_cho_rate(&[w.clone()], DayType::High), 60);
            assert_eq!(intra_cho_rate(&[w], DayType::Training), 30);
        }

        #[test]
        fn test_mid_and_short_day_rates() {
            assert_eq!(intra_cho_rate(&[workout(1.5)], DayType::Training), 30);
            assert_eq!(intra_cho_rate(&[workout(1.5)], DayType::High), 60);
            assert_eq!(intra_cho_rate(&[workout(0.5)], DayType::Training), 30);
            assert_eq!(intra_cho_rate(&[workout(0.5)], DayType::High), 45);
        }
    }
}
