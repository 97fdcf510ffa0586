//! Nutrition estimation over a recipe snapshot.
//!
//! A deliberately simple linear model: each ingredient is looked up in a
//! static per-100g table, scaled by its estimated gram weight, and summed.
//! Ingredients the table does not know are reported back by name instead
//! of silently contributing zero.

use serde::Serialize;

use crate::conversions::Unit;
use crate::recipe::{Ingredient, RecipeSnapshot};

// ---------------------------------------------------------------------------
// Facts
// ---------------------------------------------------------------------------

/// Macro-nutrient totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl NutritionFacts {
    const fn per_100g(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }
}

/// The result of estimating a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionEstimate {
    pub per_recipe: NutritionFacts,
    pub per_serving: NutritionFacts,
    /// Ingredient names the static table had no entry for.
    pub unmatched: Vec<String>,
}

// ---------------------------------------------------------------------------
// Static table (per 100 g)
// ---------------------------------------------------------------------------

const TABLE: &[(&str, NutritionFacts)] = &[
    ("flour", NutritionFacts::per_100g(364.0, 10.3, 76.3, 1.0)),
    ("sugar", NutritionFacts::per_100g(387.0, 0.0, 100.0, 0.0)),
    ("butter", NutritionFacts::per_100g(717.0, 0.9, 0.1, 81.1)),
    ("egg", NutritionFacts::per_100g(143.0, 12.6, 0.7, 9.5)),
    ("milk", NutritionFacts::per_100g(61.0, 3.2, 4.8, 3.3)),
    ("olive oil", NutritionFacts::per_100g(884.0, 0.0, 0.0, 100.0)),
    ("rice", NutritionFacts::per_100g(365.0, 7.1, 80.0, 0.7)),
    ("chicken", NutritionFacts::per_100g(239.0, 27.3, 0.0, 13.6)),
    ("onion", NutritionFacts::per_100g(40.0, 1.1, 9.3, 0.1)),
    ("garlic", NutritionFacts::per_100g(149.0, 6.4, 33.1, 0.5)),
    ("tomato", NutritionFacts::per_100g(18.0, 0.9, 3.9, 0.2)),
    ("potato", NutritionFacts::per_100g(77.0, 2.0, 17.5, 0.1)),
    ("carrot", NutritionFacts::per_100g(41.0, 0.9, 9.6, 0.2)),
    ("cheese", NutritionFacts::per_100g(402.0, 25.0, 1.3, 33.1)),
    ("cream", NutritionFacts::per_100g(340.0, 2.1, 2.8, 36.1)),
    ("yogurt", NutritionFacts::per_100g(59.0, 10.2, 3.6, 0.7)),
    ("oats", NutritionFacts::per_100g(389.0, 16.9, 66.3, 6.9)),
    ("honey", NutritionFacts::per_100g(304.0, 0.3, 82.4, 0.0)),
    ("salt", NutritionFacts::per_100g(0.0, 0.0, 0.0, 0.0)),
    ("pepper", NutritionFacts::per_100g(251.0, 10.4, 63.9, 3.3)),
];

fn lookup(name: &str) -> Option<&'static NutritionFacts> {
    let normalized = name.trim().to_lowercase();
    TABLE
        .iter()
        .find(|(key, _)| normalized == *key || normalized.contains(key))
        .map(|(_, facts)| facts)
}

// ---------------------------------------------------------------------------
// Weight estimation
// ---------------------------------------------------------------------------

/// Assumed gram weight of one "piece" (an egg, a small onion).
const GRAMS_PER_PIECE: f64 = 55.0;

/// Assumed gram weight of a pinch.
const GRAMS_PER_PINCH: f64 = 0.3;

/// Parse a user-entered amount string: plain decimals plus simple
/// fractions ("1/2", "2 1/2").
fn parse_amount(amount: &str) -> Option<f64> {
    let trimmed = amount.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    let (whole, fraction) = match trimmed.split_once(' ') {
        Some((w, f)) => (w.parse::<f64>().ok()?, f),
        None => (0.0, trimmed),
    };
    let (numerator, denominator) = fraction.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(whole + numerator / denominator)
}

/// Estimate an ingredient's weight in grams. Volume units use the
/// water-density approximation (1 ml ~= 1 g), which is as precise as a
/// per-100g table deserves.
fn estimated_grams(ingredient: &Ingredient) -> Option<f64> {
    let amount = parse_amount(&ingredient.amount)?;
    let grams = match Unit::from_str(&ingredient.unit).ok()? {
        Unit::Grams => amount,
        Unit::Kilograms => amount * 1000.0,
        Unit::Milliliters => amount,
        Unit::Liters => amount * 1000.0,
        Unit::Teaspoons => amount * 4.93,
        Unit::Tablespoons => amount * 14.79,
        Unit::Cups => amount * 236.59,
        Unit::Pieces => amount * GRAMS_PER_PIECE,
        Unit::Pinch => amount * GRAMS_PER_PINCH,
    };
    Some(grams)
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimate nutrition totals for a snapshot.
///
/// Ingredients with an unknown name, an unparseable amount, or an unknown
/// unit end up in `unmatched` rather than skewing the totals.
pub fn estimate(snapshot: &RecipeSnapshot) -> NutritionEstimate {
    let mut per_recipe = NutritionFacts::default();
    let mut unmatched = Vec::new();

    for ingredient in &snapshot.ingredients {
        match (lookup(&ingredient.name), estimated_grams(ingredient)) {
            (Some(facts), Some(grams)) => per_recipe.add(&facts.scaled(grams / 100.0)),
            _ => unmatched.push(ingredient.name.clone()),
        }
    }

    let servings = f64::from(snapshot.servings.max(1));
    NutritionEstimate {
        per_serving: per_recipe.scaled(1.0 / servings),
        per_recipe,
        unmatched,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: &str, unit: &str) -> Ingredient {
        Ingredient {
            id: None,
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
            optional: false,
        }
    }

    fn snapshot(servings: i32, ingredients: Vec<Ingredient>) -> RecipeSnapshot {
        RecipeSnapshot {
            name: "Test".into(),
            description: None,
            category: "main".into(),
            subcategory: None,
            difficulty: 1,
            servings,
            total_time_mins: 10,
            ingredients,
            instructions: vec![],
        }
    }

    // -- parse_amount --------------------------------------------------------

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!(parse_amount("1.5"), Some(1.5));
        assert_eq!(parse_amount(" 200 "), Some(200.0));
    }

    #[test]
    fn parses_simple_fractions() {
        assert_eq!(parse_amount("1/2"), Some(0.5));
        assert_eq!(parse_amount("2 1/2"), Some(2.5));
    }

    #[test]
    fn rejects_garbage_amounts() {
        assert_eq!(parse_amount("a splash"), None);
        assert_eq!(parse_amount("1/0"), None);
    }

    // -- estimate ------------------------------------------------------------

    #[test]
    fn scales_linearly_with_weight() {
        let est = estimate(&snapshot(1, vec![ingredient("sugar", "200", "g")]));
        assert!((est.per_recipe.calories - 2.0 * 387.0).abs() < 1e-9);
        assert!(est.unmatched.is_empty());
    }

    #[test]
    fn divides_by_servings() {
        let est = estimate(&snapshot(4, vec![ingredient("sugar", "100", "g")]));
        assert!((est.per_serving.calories - 387.0 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn kilograms_convert_before_scaling() {
        let est = estimate(&snapshot(1, vec![ingredient("flour", "1", "kg")]));
        assert!((est.per_recipe.calories - 10.0 * 364.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_ingredient_is_reported_not_skewed() {
        let est = estimate(&snapshot(
            1,
            vec![
                ingredient("sugar", "100", "g"),
                ingredient("dragonfruit", "100", "g"),
            ],
        ));
        assert_eq!(est.unmatched, vec!["dragonfruit".to_string()]);
        assert!((est.per_recipe.calories - 387.0).abs() < 1e-9);
    }

    #[test]
    fn unparseable_amount_is_reported() {
        let est = estimate(&snapshot(1, vec![ingredient("sugar", "to taste", "g")]));
        assert_eq!(est.unmatched, vec!["sugar".to_string()]);
    }

    #[test]
    fn qualified_names_match_by_substring() {
        let est = estimate(&snapshot(1, vec![ingredient("all-purpose flour", "100", "g")]));
        assert!(est.unmatched.is_empty());
        assert!((est.per_recipe.calories - 364.0).abs() < 1e-9);
    }

    #[test]
    fn pieces_use_the_assumed_weight() {
        let est = estimate(&snapshot(1, vec![ingredient("egg", "2", "pcs")]));
        let expected = 143.0 * (2.0 * GRAMS_PER_PIECE) / 100.0;
        assert!((est.per_recipe.calories - expected).abs() < 1e-9);
    }
}
