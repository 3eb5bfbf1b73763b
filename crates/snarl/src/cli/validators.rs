//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum project key length
pub const MAX_PROJECT_KEY_LENGTH: usize = 10;

/// Validate a tracker project key.
///
/// Expected format: 1-10 characters, alphanumeric, starting with a letter.
/// Keys are normalized to uppercase (trackers treat them case-insensitively).
pub fn validate_project_key(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Project key cannot be empty".to_string());
    }

    if trimmed.len() > MAX_PROJECT_KEY_LENGTH {
        return Err(format!(
            "Project key must be at most {MAX_PROJECT_KEY_LENGTH} characters"
        ));
    }

    if !trimmed.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(format!(
            "Project key must start with a letter: '{trimmed}'"
        ));
    }

    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "Project key must be alphanumeric: '{trimmed}'"
        ));
    }

    Ok(trimmed.to_ascii_uppercase())
}
