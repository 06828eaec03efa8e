use crate::types::{DietTag, MacroProfile, MealRole, RecipeCandidate};
use serde::{Deserialize, Serialize};

/// A generic recipe skeleton used when the curated pool cannot satisfy a
/// slot. Macros are filled in at selection time from the slot's targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackTemplate {
    pub title: String,
    pub role: MealRole,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub diet_tags: Vec<DietTag>,
}

/// Curated recipe candidates plus per-role fallback templates.
///
/// The built-in pool covers every meal role across the supported diets so
/// selection can always find something, and the fallback templates make it
/// total even when it can't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePool {
    pub curated: Vec<RecipeCandidate>,
    pub fallback: Vec<FallbackTemplate>,
}

impl RecipePool {
    /// Curated candidates able to fill `role`, in stable pool order.
    pub fn candidates_for_role(&self, role: MealRole) -> impl Iterator<Item = &RecipeCandidate> {
        self.curated.iter().filter(move |c| c.fills_role(role))
    }

    /// Fallback templates for `role`. Never empty for the roles the
    /// scheduler emits; callers fall through to any template as a last
    /// resort.
    pub fn fallbacks_for_role(&self, role: MealRole) -> Vec<&FallbackTemplate> {
        let matching: Vec<&FallbackTemplate> =
            self.fallback.iter().filter(|t| t.role == role).collect();
        if matching.is_empty() {
            self.fallback.iter().collect()
        } else {
            matching
        }
    }

    /// The built-in pool shipped with the engine.
    pub fn builtin() -> Self {
        fn c(
            title: &str,
            roles: &[MealRole],
            macros: (u32, u32, u32, u32),
            diet_tags: &[DietTag],
            allergens: &[&str],
            ingredients: &[&str],
            steps: &[&str],
        ) -> RecipeCandidate {
            let (kcal, protein_g, carbs_g, fat_g) = macros;
            RecipeCandidate {
                title: title.to_string(),
                servings: 1,
                ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
                steps: steps.iter().map(|s| s.to_string()).collect(),
                macros: MacroProfile {
                    kcal,
                    protein_g,
                    carbs_g,
                    fat_g,
                },
                roles: roles.to_vec(),
                diet_tags: diet_tags.to_vec(),
                allergens: allergens.iter().map(|s| s.to_string()).collect(),
            }
        }

        use DietTag::*;
        use MealRole::*;

        let curated = vec![
            // Breakfast
            c(
                "Overnight Oats with Berries",
                &[Breakfast, Snack],
                (420, 18, 62, 12),
                &[Vegetarian],
                &["dairy"],
                &["80 g rolled oats", "200 ml milk", "1 tbsp chia seeds", "100 g mixed berries", "1 tsp honey"],
                &["Stir oats, chia and milk in a jar", "Refrigerate overnight", "Top with berries and honey"],
            ),
            c(
                "Scrambled Eggs on Toast",
                &[Breakfast],
                (450, 28, 35, 20),
                &[Vegetarian],
                &["eggs", "gluten"],
                &["3 eggs", "2 slices wholegrain bread", "1 tsp butter", "pinch of salt"],
                &["Whisk the eggs with salt", "Scramble gently in butter", "Serve on toasted bread"],
            ),
            c(
                "Tofu Scramble Wrap",
                &[Breakfast],
                (430, 24, 48, 14),
                &[Vegan],
                &["soy", "gluten"],
                &["200 g firm tofu", "1 large tortilla", "1/2 tsp turmeric", "handful of spinach", "1 tbsp olive oil"],
                &["Crumble tofu and fry with turmeric", "Wilt in the spinach", "Roll up in the tortilla"],
            ),
            c(
                "Greek Yogurt Power Bowl",
                &[Breakfast, Snack],
                (380, 30, 40, 10),
                &[Vegetarian, GlutenFree],
                &["dairy"],
                &["250 g Greek yogurt", "1 banana", "1 tbsp honey", "20 g granola"],
                &["Spoon yogurt into a bowl", "Slice banana on top", "Finish with honey and granola"],
            ),
            c(
                "Banana Peanut Porridge",
                &[Breakfast],
                (520, 20, 70, 16),
                &[Vegan],
                &["peanuts", "gluten"],
                &["90 g oats", "250 ml oat milk", "1 banana", "1 tbsp peanut butter"],
                &["Simmer oats in oat milk", "Mash in half the banana", "Top with peanut butter and banana slices"],
            ),
            // Lunch
            c(
                "Chicken Rice Bowl",
                &[Lunch, Dinner],
                (650, 45, 75, 15),
                &[GlutenFree, DairyFree],
                &[],
                &["180 g chicken breast", "200 g cooked jasmine rice", "1 cup broccoli", "1 tbsp soy-free teriyaki sauce"],
                &["Grill the chicken and slice", "Steam the broccoli", "Assemble over rice and sauce"],
            ),
            c(
                "Lentil Quinoa Salad",
                &[Lunch, Dinner],
                (550, 26, 70, 16),
                &[Vegan, GlutenFree],
                &[],
                &["150 g cooked lentils", "120 g cooked quinoa", "1 roasted pepper", "2 tbsp olive oil dressing"],
                &["Toss lentils and quinoa", "Fold in the chopped pepper", "Dress and season"],
            ),
            c(
                "Tuna Pasta Salad",
                &[Lunch],
                (600, 38, 68, 16),
                &[DairyFree],
                &["fish", "gluten"],
                &["1 tin tuna", "150 g cooked pasta", "1 tbsp olive oil", "cherry tomatoes", "handful of rocket"],
                &["Drain and flake the tuna", "Toss with pasta and oil", "Fold in tomatoes and rocket"],
            ),
            c(
                "Turkey Avocado Sandwich",
                &[Lunch],
                (580, 35, 52, 24),
                &[DairyFree],
                &["gluten"],
                &["2 slices sourdough", "120 g sliced turkey", "1/2 avocado", "lettuce and mustard"],
                &["Toast the sourdough", "Mash avocado over one slice", "Layer turkey and lettuce, close and halve"],
            ),
            c(
                "Halloumi Grain Bowl",
                &[Lunch],
                (620, 28, 66, 26),
                &[Vegetarian],
                &["dairy", "gluten"],
                &["100 g halloumi", "150 g cooked bulgur", "cucumber and tomato", "1 tbsp olive oil", "lemon"],
                &["Sear halloumi slices", "Toss bulgur with chopped vegetables", "Top with halloumi, oil and lemon"],
            ),
            // Dinner
            c(
                "Salmon with Sweet Potato",
                &[Dinner],
                (700, 42, 60, 28),
                &[GlutenFree, DairyFree],
                &["fish"],
                &["180 g salmon fillet", "300 g sweet potato", "1 tbsp olive oil", "green beans"],
                &["Roast sweet potato wedges", "Pan-fry the salmon skin-side down", "Serve with steamed beans"],
            ),
            c(
                "Beef Stir-Fry with Noodles",
                &[Dinner],
                (720, 45, 78, 20),
                &[DairyFree],
                &["gluten", "soy"],
                &["180 g beef strips", "150 g egg noodles", "stir-fry vegetables", "2 tbsp soy sauce", "1 tsp sesame oil"],
                &["Sear the beef hot and fast", "Add vegetables and sauce", "Toss through cooked noodles"],
            ),
            c(
                "Chickpea Coconut Curry",
                &[Dinner],
                (640, 22, 80, 24),
                &[Vegan, GlutenFree],
                &[],
                &["1 tin chickpeas", "200 ml coconut milk", "2 tbsp curry paste", "150 g cooked basmati rice"],
                &["Fry the curry paste", "Simmer chickpeas in coconut milk", "Serve over rice"],
            ),
            c(
                "Zucchini Noodle Bolognese",
                &[Dinner],
                (480, 38, 24, 26),
                &[LowCarb, GlutenFree, DairyFree],
                &[],
                &["200 g lean beef mince", "2 spiralized zucchini", "200 g passata", "1 tbsp olive oil"],
                &["Brown the mince", "Simmer with passata", "Serve over briefly sautéed zucchini noodles"],
            ),
            c(
                "Baked Cod with Greens",
                &[Dinner],
                (430, 40, 18, 20),
                &[LowCarb, GlutenFree, DairyFree],
                &["fish"],
                &["200 g cod fillet", "1 tbsp olive oil", "lemon", "200 g kale and spinach"],
                &["Bake cod with oil and lemon", "Sauté the greens", "Plate together"],
            ),
            c(
                "Keto Chicken Tray Bake",
                &[Dinner],
                (560, 40, 12, 38),
                &[Keto, LowCarb, GlutenFree, DairyFree],
                &[],
                &["2 chicken thighs", "1/2 head cauliflower", "2 tbsp olive oil", "smoked paprika"],
                &["Toss everything with oil and paprika", "Roast on one tray until golden", "Rest before serving"],
            ),
            // Snacks
            c(
                "Trail Mix",
                &[Snack],
                (250, 8, 22, 16),
                &[Vegan, GlutenFree, DairyFree],
                &["nuts"],
                &["30 g almonds", "20 g raisins", "10 g pumpkin seeds"],
                &["Mix and portion into a bag"],
            ),
            c(
                "Rice Cakes with Honey",
                &[Snack],
                (180, 3, 40, 1),
                &[Vegetarian, GlutenFree, DairyFree],
                &[],
                &["3 rice cakes", "1 tbsp honey", "pinch of sea salt"],
                &["Drizzle rice cakes with honey", "Finish with salt"],
            ),
            c(
                "Protein Shake",
                &[Snack],
                (220, 30, 18, 4),
                &[Vegetarian, GlutenFree],
                &["dairy"],
                &["1 scoop whey protein", "300 ml milk", "ice"],
                &["Blend until smooth"],
            ),
            c(
                "Apple with Almond Butter",
                &[Snack],
                (210, 5, 26, 11),
                &[Vegan, GlutenFree, DairyFree],
                &["nuts"],
                &["1 apple", "1 tbsp almond butter"],
                &["Slice the apple", "Dip in almond butter"],
            ),
            c(
                "Hummus and Crackers",
                &[Snack],
                (240, 8, 28, 11),
                &[Vegan, DairyFree],
                &["gluten", "sesame"],
                &["60 g hummus", "6 wholegrain crackers"],
                &["Spread hummus on crackers"],
            ),
        ];

        fn t(
            title: &str,
            role: MealRole,
            diet_tags: &[DietTag],
            ingredients: &[&str],
            steps: &[&str],
        ) -> FallbackTemplate {
            FallbackTemplate {
                title: title.to_string(),
                role,
                ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
                steps: steps.iter().map(|s| s.to_string()).collect(),
                diet_tags: diet_tags.to_vec(),
            }
        }

        let fallback = vec![
            t(
                "Builder Oat Bowl",
                Breakfast,
                &[Vegan, DairyFree],
                &["oats", "plant milk or water", "banana", "maple syrup"],
                &["Simmer oats until creamy", "Top with banana and syrup", "Scale portions to the day's targets"],
            ),
            t(
                "Simple Rice and Protein Plate",
                Lunch,
                &[GlutenFree, DairyFree],
                &["steamed rice", "protein of choice", "mixed vegetables", "olive oil"],
                &["Cook rice", "Pan-cook the protein", "Plate with vegetables and a drizzle of oil"],
            ),
            t(
                "One-Pan Protein and Veg",
                Dinner,
                &[GlutenFree, DairyFree],
                &["protein of choice", "seasonal vegetables", "potatoes", "olive oil and herbs"],
                &["Chop everything roughly", "Roast on one tray", "Season and serve"],
            ),
            t(
                "Fruit and Nut Plate",
                Snack,
                &[Vegan, GlutenFree, DairyFree],
                &["seasonal fruit", "a handful of mixed nuts"],
                &["Arrange and eat"],
            ),
            // Intra slots only appear in assistant-produced plans; the
            // scheduler never requests this role.
            t(
                "Homemade Sports Mix",
                Intra,
                &[Vegan, GlutenFree, DairyFree],
                &["water", "maltodextrin or table sugar", "pinch of salt", "squeeze of citrus"],
                &["Dissolve carbs and salt in water", "Chill before the session"],
            ),
        ];

        RecipePool { curated, fallback }
    }
}

impl Default for RecipePool {
    fn default() -> Self {
        Self::builtin()
    }
}
