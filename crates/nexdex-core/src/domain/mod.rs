//! Domain types for failure simulation.
//!
//! These are plain records. A [`Service`] is a node in the dependency graph;
//! [`ImpactResult`] and [`SimulationResult`] are produced by the simulation
//! engine and never mutated afterwards; a [`Scenario`] is a named, saved
//! failure configuration.

mod impact;
mod scenario;

pub use impact::{ImpactResult, SimulationResult};
pub use scenario::Scenario;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Lowest importance a service or business process can carry.
pub const MIN_IMPORTANCE: u8 = 1;

/// Highest importance a service or business process can carry.
pub const MAX_IMPORTANCE: u8 = 10;

/// Importance assigned when a definition omits it.
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Mean time to repair (minutes) assigned when a definition omits it.
pub const DEFAULT_MTTR: u32 = 30;

/// Clamp a raw importance value into `MIN_IMPORTANCE..=MAX_IMPORTANCE`.
#[must_use]
pub fn clamp_importance(value: i64) -> u8 {
    let clamped = value.clamp(i64::from(MIN_IMPORTANCE), i64::from(MAX_IMPORTANCE));
    // In range 1..=10 after the clamp.
    u8::try_from(clamped).unwrap_or(MAX_IMPORTANCE)
}

fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

fn default_mttr() -> u32 {
    DEFAULT_MTTR
}

/// A service (node) in the dependency graph.
///
/// Identity is the `name` alone: two `Service` values with the same name
/// compare equal and hash identically regardless of their other fields.
///
/// Deserializing doubles as the load-time schema: `name` is required, every
/// other field falls back to its documented default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique service name.
    pub name: String,

    /// Names of the services this one requires, in declaration order.
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Business process label (empty when unassigned).
    #[serde(default)]
    pub business_process: String,

    /// Importance on a 1-10 scale. Out-of-range values are clamped when scored.
    #[serde(default = "default_importance")]
    pub importance: i64,

    /// Mean time to repair in minutes.
    #[serde(default = "default_mttr")]
    pub mttr: u32,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Service {
    /// Create a service with the given name and default attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            business_process: String::new(),
            importance: DEFAULT_IMPORTANCE,
            mttr: DEFAULT_MTTR,
            description: None,
        }
    }

    /// Set the services this one depends on.
    #[must_use]
    pub fn with_depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the business process label.
    #[must_use]
    pub fn with_business_process(mut self, process: impl Into<String>) -> Self {
        self.business_process = process.into();
        self
    }

    /// Set the importance.
    #[must_use]
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = importance;
        self
    }

    /// Set the mean time to repair, in minutes.
    #[must_use]
    pub fn with_mttr(mut self, mttr: u32) -> Self {
        self.mttr = mttr;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The business process label, if one is assigned.
    #[must_use]
    pub fn process(&self) -> Option<&str> {
        if self.business_process.is_empty() {
            None
        } else {
            Some(&self.business_process)
        }
    }

    /// Structural validation applied at the load boundary.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the name is empty or whitespace, or if a
    /// dependency name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config(
                "service definition has an empty 'name'".to_string(),
            ));
        }
        if self.depends_on.iter().any(|dep| dep.trim().is_empty()) {
            return Err(Error::Config(format!(
                "service '{}' declares an empty dependency name",
                self.name
            )));
        }
        Ok(())
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Service {}

impl Hash for Service {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Service {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Service {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_the_name() {
        let a = Service::new("db").with_mttr(10);
        let b = Service::new("db").with_importance(9);

        assert_eq!(a, b);

        let set: HashSet<Service> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn deserialize_applies_defaults() {
        let service: Service = serde_json::from_str(r#"{"name": "db"}"#).unwrap();

        assert_eq!(service.name, "db");
        assert!(service.depends_on.is_empty());
        assert_eq!(service.business_process, "");
        assert_eq!(service.importance, DEFAULT_IMPORTANCE);
        assert_eq!(service.mttr, DEFAULT_MTTR);
        assert!(service.description.is_none());
    }

    #[test]
    fn deserialize_requires_name() {
        let result = serde_json::from_str::<Service>(r#"{"depends_on": ["db"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_blank_names() {
        assert!(Service::new("  ").validate().is_err());
        assert!(Service::new("api").with_depends_on([""]).validate().is_err());
        assert!(Service::new("api").with_depends_on(["db"]).validate().is_ok());
    }

    #[test]
    fn clamp_importance_bounds() {
        assert_eq!(clamp_importance(-3), 1);
        assert_eq!(clamp_importance(0), 1);
        assert_eq!(clamp_importance(7), 7);
        assert_eq!(clamp_importance(42), 10);
    }

    #[test]
    fn process_is_none_when_empty() {
        assert_eq!(Service::new("a").process(), None);
        assert_eq!(
            Service::new("a").with_business_process("Checkout").process(),
            Some("Checkout")
        );
    }
}
