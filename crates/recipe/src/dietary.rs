use crate::types::{DietTag, RecipeCandidate};
use athlete::Diet;

/// Check whether a recipe's diet tags satisfy the athlete's diet.
///
/// Safety-first rule inherited from the recipe filter this grew out of:
/// when the athlete follows a restricted diet, an untagged recipe is
/// excluded rather than assumed safe.
pub fn diet_compatible(diet: Diet, tags: &[DietTag]) -> bool {
    match diet {
        Diet::Omnivore => true,
        Diet::Vegetarian => tags.contains(&DietTag::Vegetarian) || tags.contains(&DietTag::Vegan),
        Diet::Vegan => tags.contains(&DietTag::Vegan),
        Diet::LowCarb => tags.contains(&DietTag::LowCarb) || tags.contains(&DietTag::Keto),
        Diet::Keto => tags.contains(&DietTag::Keto),
    }
}

/// Check a recipe against the athlete's allergy list.
///
/// Allergies are free text, so matching is a case-insensitive substring scan
/// over ingredient lines and the recipe's declared allergens.
pub fn allergen_safe(candidate: &RecipeCandidate, allergies: &[String]) -> bool {
    if allergies.is_empty() {
        return true;
    }
    allergies.iter().all(|allergy| {
        let needle = allergy.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        // "peanuts" must match "peanut butter", so also try the singular.
        let singular = if needle.len() > 3 {
            needle.strip_suffix('s').unwrap_or(&needle)
        } else {
            needle.as_str()
        };
        let hit = |text: &str| {
            let text = text.to_lowercase();
            text.contains(&needle) || text.contains(singular)
        };
        let in_ingredients = candidate.ingredients.iter().any(|line| hit(line));
        let in_declared = candidate.allergens.iter().any(|a| hit(a));
        !(in_ingredients || in_declared)
    })
}

/// Combined diet + allergy gate used by the selector.
pub fn is_candidate_compatible(
    candidate: &RecipeCandidate,
    diet: Diet,
    allergies: &[String],
) -> bool {
    diet_compatible(diet, &candidate.diet_tags) && allergen_safe(candidate, allergies)
}
