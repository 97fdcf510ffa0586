//! Recipe snapshot types, categories, and validation.
//!
//! The snapshot structs here are the value types the diff engine compares.
//! They are extracted from database rows by the db crate; this module stays
//! free of any persistence concern.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed length for a recipe name.
pub const MAX_RECIPE_NAME_LENGTH: usize = 150;

/// Maximum allowed length for a recipe description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum allowed length for a version change summary.
pub const MAX_CHANGE_SUMMARY_LENGTH: usize = 500;

/// Difficulty scale bounds (inclusive).
pub const MIN_DIFFICULTY: i16 = 1;
pub const MAX_DIFFICULTY: i16 = 3;

/// Success rating bounds (inclusive).
pub const MIN_SUCCESS_RATING: i16 = 1;
pub const MAX_SUCCESS_RATING: i16 = 5;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Top-level recipe category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Appetizer,
    Main,
    Side,
    Dessert,
    Baking,
    Beverage,
    Breakfast,
    Snack,
}

/// All valid category strings.
const VALID_CATEGORY_STRINGS: &[&str] = &[
    "appetizer", "main", "side", "dessert", "baking", "beverage", "breakfast", "snack",
];

impl Category {
    /// Return the category as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appetizer => "appetizer",
            Self::Main => "main",
            Self::Side => "side",
            Self::Dessert => "dessert",
            Self::Baking => "baking",
            Self::Beverage => "beverage",
            Self::Breakfast => "breakfast",
            Self::Snack => "snack",
        }
    }

    /// Parse a category from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "appetizer" => Ok(Self::Appetizer),
            "main" => Ok(Self::Main),
            "side" => Ok(Self::Side),
            "dessert" => Ok(Self::Dessert),
            "baking" => Ok(Self::Baking),
            "beverage" => Ok(Self::Beverage),
            "breakfast" => Ok(Self::Breakfast),
            "snack" => Ok(Self::Snack),
            _ => Err(CoreError::Validation(format!(
                "Invalid category '{s}'. Must be one of: {}",
                VALID_CATEGORY_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot value types
// ---------------------------------------------------------------------------

/// A single structured ingredient entry.
///
/// `id` is a stable client-assigned identifier used by the diff engine to
/// pair up edited ingredients across versions. Legacy data may lack it, in
/// which case the diff falls back to full-value matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// Numeric amount kept as text ("1.5", "1/2") to match user input.
    pub amount: String,
    pub unit: String,
    #[serde(default)]
    pub optional: bool,
}

/// A single ordered preparation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub id: Option<String>,
    pub step_number: i32,
    pub text: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// The full recipe content captured by one version.
///
/// The scalar fields here are exactly the set the general-field diff
/// inspects; see [`crate::versioning::compare_snapshots`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: i16,
    pub servings: i32,
    pub total_time_mins: i32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a recipe name: non-empty, trimmed, and within
/// [`MAX_RECIPE_NAME_LENGTH`].
pub fn validate_recipe_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Recipe name must not be empty".to_string(),
        ));
    }
    if trimmed.len() != name.len() {
        return Err(CoreError::Validation(
            "Recipe name must not have leading or trailing whitespace".to_string(),
        ));
    }
    if name.len() > MAX_RECIPE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Recipe name must not exceed {MAX_RECIPE_NAME_LENGTH} characters, got {}",
            name.len()
        )));
    }
    Ok(())
}

/// Validate the 1-3 difficulty scale.
pub fn validate_difficulty(difficulty: i16) -> Result<(), CoreError> {
    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        return Err(CoreError::Validation(format!(
            "Difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {difficulty}"
        )));
    }
    Ok(())
}

/// Validate the servings count.
pub fn validate_servings(servings: i32) -> Result<(), CoreError> {
    if servings < 1 {
        return Err(CoreError::Validation(format!(
            "Servings must be at least 1, got {servings}"
        )));
    }
    Ok(())
}

/// Validate the 1-5 success rating a version creator can record.
pub fn validate_success_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_SUCCESS_RATING..=MAX_SUCCESS_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Success rating must be between {MIN_SUCCESS_RATING} and {MAX_SUCCESS_RATING}, \
             got {rating}"
        )));
    }
    Ok(())
}

/// Validate a version change summary: non-empty and within
/// [`MAX_CHANGE_SUMMARY_LENGTH`].
pub fn validate_change_summary(summary: &str) -> Result<(), CoreError> {
    if summary.trim().is_empty() {
        return Err(CoreError::Validation(
            "Change summary must not be empty".to_string(),
        ));
    }
    if summary.len() > MAX_CHANGE_SUMMARY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Change summary must not exceed {MAX_CHANGE_SUMMARY_LENGTH} characters, got {}",
            summary.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use assert_matches::assert_matches;

    // -- validate_recipe_name ------------------------------------------------

    #[test]
    fn valid_short_name() {
        assert!(validate_recipe_name("Shakshuka").is_ok());
    }

    #[test]
    fn valid_name_at_max_length() {
        let name = "a".repeat(MAX_RECIPE_NAME_LENGTH);
        assert!(validate_recipe_name(&name).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert_matches!(validate_recipe_name(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_whitespace_only_name() {
        assert!(validate_recipe_name("   ").is_err());
    }

    #[test]
    fn rejects_leading_whitespace() {
        assert!(validate_recipe_name(" crêpes").is_err());
    }

    #[test]
    fn rejects_name_exceeding_max() {
        let name = "a".repeat(MAX_RECIPE_NAME_LENGTH + 1);
        assert_matches!(validate_recipe_name(&name), Err(CoreError::Validation(_)));
    }

    // -- validate_difficulty -------------------------------------------------

    #[test]
    fn accepts_full_difficulty_range() {
        for d in MIN_DIFFICULTY..=MAX_DIFFICULTY {
            assert!(validate_difficulty(d).is_ok());
        }
    }

    #[test]
    fn rejects_zero_difficulty() {
        assert_matches!(validate_difficulty(0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_difficulty_above_max() {
        assert!(validate_difficulty(MAX_DIFFICULTY + 1).is_err());
    }

    // -- validate_servings ---------------------------------------------------

    #[test]
    fn accepts_single_serving() {
        assert!(validate_servings(1).is_ok());
    }

    #[test]
    fn rejects_zero_servings() {
        assert!(validate_servings(0).is_err());
    }

    #[test]
    fn rejects_negative_servings() {
        assert!(validate_servings(-4).is_err());
    }

    // -- validate_success_rating ---------------------------------------------

    #[test]
    fn accepts_full_rating_range() {
        for r in MIN_SUCCESS_RATING..=MAX_SUCCESS_RATING {
            assert!(validate_success_rating(r).is_ok());
        }
    }

    #[test]
    fn rejects_zero_rating() {
        assert!(validate_success_rating(0).is_err());
    }

    #[test]
    fn rejects_rating_above_max() {
        assert_matches!(
            validate_success_rating(MAX_SUCCESS_RATING + 1),
            Err(CoreError::Validation(_))
        );
    }

    // -- validate_change_summary ---------------------------------------------

    #[test]
    fn accepts_simple_summary() {
        assert!(validate_change_summary("fix salt amount").is_ok());
    }

    #[test]
    fn rejects_empty_summary() {
        assert!(validate_change_summary("  ").is_err());
    }

    #[test]
    fn rejects_summary_exceeding_max() {
        let summary = "x".repeat(MAX_CHANGE_SUMMARY_LENGTH + 1);
        assert!(validate_change_summary(&summary).is_err());
    }

    // -- Category ------------------------------------------------------------

    #[test]
    fn category_roundtrips_through_strings() {
        for s in VALID_CATEGORY_STRINGS {
            let parsed = Category::from_str(s).unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Category::from_str("molecular").unwrap_err();
        assert!(err.to_string().contains("molecular"));
    }

    // -- Snapshot serde ------------------------------------------------------

    #[test]
    fn ingredient_without_id_deserializes() {
        let json = r#"{"name": "flour", "amount": "500", "unit": "g"}"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert!(ing.id.is_none());
        assert!(!ing.optional);
    }

    #[test]
    fn instruction_roundtrip_preserves_step_order_fields() {
        let inst = Instruction {
            id: Some("s1".into()),
            step_number: 3,
            text: "Fold, do not stir".into(),
            image_path: None,
        };
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
