pub mod dietary;
pub mod pool;
pub mod types;

pub use dietary::{allergen_safe, diet_compatible, is_candidate_compatible};
pub use pool::RecipePool;
pub use types::{DietTag, MacroProfile, MealRole, RecipeCandidate};
