//! Cooking diary entry types and validation.
//!
//! A diary entry is a free-text annotation a user attaches to one recipe
//! version to record how a cook actually went.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for diary entry content.
pub const MAX_DIARY_CONTENT_LENGTH: usize = 5000;

/// Maximum number of images attached to one entry.
pub const MAX_DIARY_IMAGES: usize = 10;

// ---------------------------------------------------------------------------
// Entry type
// ---------------------------------------------------------------------------

/// When in the cooking process an entry was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaryEntryType {
    PreCooking,
    DuringCooking,
    PostCooking,
    NextTime,
}

/// All valid entry type strings.
const VALID_ENTRY_TYPE_STRINGS: &[&str] =
    &["pre_cooking", "during_cooking", "post_cooking", "next_time"];

impl DiaryEntryType {
    /// Return the entry type as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreCooking => "pre_cooking",
            Self::DuringCooking => "during_cooking",
            Self::PostCooking => "post_cooking",
            Self::NextTime => "next_time",
        }
    }

    /// Parse an entry type from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "pre_cooking" => Ok(Self::PreCooking),
            "during_cooking" => Ok(Self::DuringCooking),
            "post_cooking" => Ok(Self::PostCooking),
            "next_time" => Ok(Self::NextTime),
            _ => Err(CoreError::Validation(format!(
                "Invalid diary entry type '{s}'. Must be one of: {}",
                VALID_ENTRY_TYPE_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate diary entry content: non-empty and within
/// [`MAX_DIARY_CONTENT_LENGTH`].
pub fn validate_diary_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Diary entry content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_DIARY_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Diary entry content must not exceed {MAX_DIARY_CONTENT_LENGTH} characters, got {}",
            content.len()
        )));
    }
    Ok(())
}

/// Validate the attached image list length.
pub fn validate_diary_images(image_paths: &[String]) -> Result<(), CoreError> {
    if image_paths.len() > MAX_DIARY_IMAGES {
        return Err(CoreError::Validation(format!(
            "A diary entry may carry at most {MAX_DIARY_IMAGES} images, got {}",
            image_paths.len()
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

    // -- DiaryEntryType ------------------------------------------------------

    #[test]
    fn entry_types_roundtrip_through_strings() {
        for s in VALID_ENTRY_TYPE_STRINGS {
            let parsed = DiaryEntryType::from_str(s).unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
    }

    #[test]
    fn rejects_unknown_entry_type() {
        let err = DiaryEntryType::from_str("mid_snack").unwrap_err();
        assert!(err.to_string().contains("mid_snack"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&DiaryEntryType::NextTime).unwrap();
        assert_eq!(json, "\"next_time\"");
    }

    // -- validate_diary_content ----------------------------------------------

    #[test]
    fn accepts_simple_content() {
        assert!(validate_diary_content("Needed five more minutes in the oven").is_ok());
    }

    #[test]
    fn rejects_empty_content() {
        assert!(validate_diary_content("").is_err());
        assert!(validate_diary_content("   ").is_err());
    }

    #[test]
    fn rejects_content_exceeding_max() {
        let content = "x".repeat(MAX_DIARY_CONTENT_LENGTH + 1);
        assert!(validate_diary_content(&content).is_err());
    }

    // -- validate_diary_images -----------------------------------------------

    #[test]
    fn accepts_image_list_at_max() {
        let paths: Vec<String> = (0..MAX_DIARY_IMAGES).map(|i| format!("/img/{i}.jpg")).collect();
        assert!(validate_diary_images(&paths).is_ok());
    }

    #[test]
    fn rejects_image_list_above_max() {
        let paths: Vec<String> = (0..=MAX_DIARY_IMAGES).map(|i| format!("/img/{i}.jpg")).collect();
        assert!(validate_diary_images(&paths).is_err());
    }
}
