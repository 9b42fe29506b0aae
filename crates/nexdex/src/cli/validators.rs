//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use nexdex_core::domain::{MAX_IMPORTANCE, MIN_IMPORTANCE};

/// Parse a `NAME=SCORE` business process override.
///
/// The name is trimmed and must be non-empty; the score must be an integer
/// from 1 to 10.
pub fn parse_process_importance(s: &str) -> Result<(String, i64), String> {
    let Some((name, score)) = s.split_once('=') else {
        return Err(format!("Expected NAME=SCORE, got '{s}'"));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("Business process name cannot be empty".to_string());
    }

    let score: i64 = score
        .trim()
        .parse()
        .map_err(|_| format!("Importance for '{name}' must be an integer, got '{}'", score.trim()))?;
    if !(i64::from(MIN_IMPORTANCE)..=i64::from(MAX_IMPORTANCE)).contains(&score) {
        return Err(format!(
            "Importance for '{name}' must be between {MIN_IMPORTANCE} and {MAX_IMPORTANCE}, got {score}"
        ));
    }

    Ok((name.to_string(), score))
}

/// Validate a service name argument.
pub fn validate_service_name(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Service name cannot be empty".to_string());
    }
    Ok(s.to_string())
}

/// Validate a scenario name.
///
/// Scenario names become file names, so path separators and leading dots
/// are rejected.
pub fn validate_scenario_name(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Scenario name cannot be empty".to_string());
    }
    if s.starts_with('.') {
        return Err("Scenario name cannot start with '.'".to_string());
    }
    if s.chars().any(|c| matches!(c, '/' | '\\') || c.is_control()) {
        return Err(format!(
            "Scenario name '{s}' cannot contain path separators or control characters"
        ));
    }
    Ok(s.to_string())
}
