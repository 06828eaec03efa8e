use athlete::AthleteProfile;
use recipe::pool::FallbackTemplate;
use recipe::{is_candidate_compatible, MacroProfile, MealRole, RecipeCandidate, RecipePool};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// No recipe title may be scheduled more than this many times in one
/// planning run.
pub const MAX_TITLE_USES: u32 = 2;

/// Case-insensitive title usage counts, scoped to exactly one weekly
/// planning run.
///
/// Modeled as an explicit value threaded through every selection call, never
/// a shared or module-level structure, so runs stay isolated and repeatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsedTitleRegistry {
    counts: HashMap<String, u32>,
}

impl UsedTitleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(title: &str) -> String {
        title.trim().to_lowercase()
    }

    pub fn count(&self, title: &str) -> u32 {
        self.counts.get(&Self::key(title)).copied().unwrap_or(0)
    }

    pub fn is_at_cap(&self, title: &str) -> bool {
        self.count(title) >= MAX_TITLE_USES
    }

    pub fn record(&mut self, title: &str) {
        *self.counts.entry(Self::key(title)).or_insert(0) += 1;
    }

    /// Total selections recorded across the run.
    pub fn total_uses(&self) -> u32 {
        self.counts.values().sum()
    }
}

/// Weighted absolute deviation between a recipe's macros and a slot's
/// targets. Gram deltas are weighted by their energy density (4/4/9) so all
/// four axes are commensurable in kcal terms.
fn macro_deviation(candidate: &MacroProfile, target: &MacroProfile) -> u32 {
    let d = |a: u32, b: u32| a.abs_diff(b);
    d(candidate.kcal, target.kcal)
        + 4 * d(candidate.protein_g, target.protein_g)
        + 4 * d(candidate.carbs_g, target.carbs_g)
        + 9 * d(candidate.fat_g, target.fat_g)
}

/// Pick a recipe for one slot. Never fails: when the curated pool is
/// exhausted (or everything compatible sits at the repetition cap) a
/// fallback recipe is synthesized and scaled to the slot's targets.
///
/// Side effect: the returned title's registry count is incremented.
pub fn select_recipe(
    role: MealRole,
    target: &MacroProfile,
    profile: &AthleteProfile,
    pool: &RecipePool,
    registry: &mut UsedTitleRegistry,
) -> RecipeCandidate {
    let best = pool
        .candidates_for_role(role)
        .filter(|c| is_candidate_compatible(c, profile.diet, &profile.allergies))
        .filter(|c| !registry.is_at_cap(&c.title))
        .enumerate()
        // Closest macros win; at equal closeness an unused title beats a
        // once-used one, and pool order breaks the remaining ties.
        .min_by_key(|(index, c)| {
            (
                macro_deviation(&c.macros, target),
                registry.count(&c.title),
                *index,
            )
        })
        .map(|(_, c)| c.clone());

    let selected = match best {
        Some(candidate) => candidate,
        None => synthesize_fallback(role, target, profile, pool, registry),
    };

    registry.record(&selected.title);
    selected
}

/// Build a generic recipe from the fallback pool, scaled to the slot
/// targets. Prefers a diet-compatible template and the least-used title;
/// when a template's title is already at the cap a deterministic numeral
/// suffix keeps the cap invariant intact.
fn synthesize_fallback(
    role: MealRole,
    target: &MacroProfile,
    profile: &AthleteProfile,
    pool: &RecipePool,
    registry: &UsedTitleRegistry,
) -> RecipeCandidate {
    let templates = pool.fallbacks_for_role(role);
    let template: &FallbackTemplate = templates
        .iter()
        .filter(|t| recipe::diet_compatible(profile.diet, &t.diet_tags))
        .min_by_key(|t| registry.count(&t.title))
        .or_else(|| templates.iter().min_by_key(|t| registry.count(&t.title)))
        .copied()
        .unwrap_or(&DEFAULT_FALLBACK);

    let mut title = template.title.clone();
    let mut variant = 1u32;
    while registry.is_at_cap(&title) {
        variant += 1;
        title = format!("{} {}", template.title, roman(variant));
    }

    RecipeCandidate {
        title,
        servings: 1,
        ingredients: template.ingredients.clone(),
        steps: template.steps.clone(),
        macros: *target,
        roles: vec![role],
        diet_tags: template.diet_tags.clone(),
        allergens: vec![],
    }
}

/// Last-ditch template for a pool configured with no fallbacks at all.
static DEFAULT_FALLBACK: std::sync::LazyLock<FallbackTemplate> =
    std::sync::LazyLock::new(|| FallbackTemplate {
        title: "Simple Balanced Plate".to_string(),
        role: MealRole::Lunch,
        ingredients: vec![
            "carbohydrate of choice".to_string(),
            "protein of choice".to_string(),
            "vegetables".to_string(),
        ],
        steps: vec!["Cook and plate to the slot's portions".to_string()],
        diet_tags: vec![],
    });

fn roman(n: u32) -> String {
    const NUMERALS: [(u32, &str); 7] = [
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut n = n;
    let mut out = String::new();
    for (value, glyph) in NUMERALS {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}
