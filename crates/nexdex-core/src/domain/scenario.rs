//! Saved failure scenarios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, persisted failure configuration.
///
/// The engine only reads scenarios; where they are stored is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Services to fail when the scenario runs.
    pub failed_services: Vec<String>,

    /// When the scenario was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Free-form tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the failure happens during peak hours.
    #[serde(default)]
    pub peak_hours: bool,
}

impl Scenario {
    /// Create a scenario stamped with the current time.
    pub fn new<I, S>(name: impl Into<String>, failed_services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: String::new(),
            failed_services: failed_services.into_iter().map(Into::into).collect(),
            created_at: Utc::now(),
            tags: Vec::new(),
            peak_hours: false,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the scenario as occurring during peak hours.
    #[must_use]
    pub fn with_peak_hours(mut self, peak_hours: bool) -> Self {
        self.peak_hours = peak_hours;
        self
    }

    /// Case-insensitive tag match.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_fills_optional_fields() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"name": "db-outage", "failed_services": ["db"]}"#).unwrap();

        assert_eq!(scenario.name, "db-outage");
        assert_eq!(scenario.description, "");
        assert_eq!(scenario.failed_services, vec!["db"]);
        assert!(scenario.tags.is_empty());
        assert!(!scenario.peak_hours);
    }

    #[test]
    fn deserialize_requires_failed_services() {
        let result = serde_json::from_str::<Scenario>(r#"{"name": "empty"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn has_tag_ignores_case() {
        let scenario = Scenario::new("s", ["db"]).with_tags(["Critical", "q3"]);

        assert!(scenario.has_tag("critical"));
        assert!(scenario.has_tag("Q3"));
        assert!(!scenario.has_tag("network"));
    }

    #[test]
    fn roundtrip_preserves_created_at() {
        let scenario = Scenario::new("s", ["db"])
            .with_description("primary database down")
            .with_peak_hours(true);

        let json = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();

        assert_eq!(back, scenario);
    }
}
