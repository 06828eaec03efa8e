use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Role a meal slot plays in the day. Explicit tags, never inferred from
/// slot or recipe names.
///
/// `Intra` exists for schema compatibility with externally generated plans;
/// the deterministic scheduler never emits it.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MealRole {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Intra,
}

/// Diet suitability tags carried by a recipe.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DietTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    LowCarb,
    Keto,
}

/// Per-serving macro profile of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroProfile {
    pub kcal: u32,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

/// A concrete recipe the selector can place into a meal slot.
///
/// Ingredients and steps are always non-empty; the pool constructors and the
/// fallback synthesis both guarantee it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    pub title: String,
    pub servings: u8,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub macros: MacroProfile,
    /// Slots this recipe can fill.
    pub roles: Vec<MealRole>,
    pub diet_tags: Vec<DietTag>,
    /// Known allergens beyond what the ingredient lines reveal.
    pub allergens: Vec<String>,
}

impl RecipeCandidate {
    pub fn fills_role(&self, role: MealRole) -> bool {
        self.roles.contains(&role)
    }
}
