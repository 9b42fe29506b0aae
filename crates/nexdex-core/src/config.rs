//! Serialized graph definition.
//!
//! A graph is defined by two top-level fields:
//!
//! ```yaml
//! business_processes:
//!   Checkout: 9
//! services:
//!   - name: db
//!     mttr: 60
//!   - name: api
//!     depends_on: [db]
//!     business_process: Checkout
//! ```
//!
//! JSON and YAML are both accepted; the format is chosen from the file
//! extension. Structural problems (a service without `name`, wrong field
//! types) surface as [`Error::Config`].

use crate::domain::Service;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serialization format of a graph definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file extension: `.yaml`/`.yml` are YAML, everything else JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// The declarative graph definition consumed by
/// [`DependencyGraph::load`](crate::graph::DependencyGraph::load).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Business process name to importance override.
    #[serde(default)]
    pub business_processes: BTreeMap<String, i64>,

    /// Service definitions, in declaration order.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl GraphConfig {
    /// Parse a definition from text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not a valid definition.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(text)?,
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(config)
    }

    /// Read and parse a definition file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config`
    /// if its contents are malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, ConfigFormat::from_path(path)).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Render the definition as text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        let text = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(text)
    }

    /// Write the definition to a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` on file system failures.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render(ConfigFormat::from_path(path))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("services")), ConfigFormat::Json);
    }

    #[test]
    fn parse_yaml_definition() {
        let config = GraphConfig::parse(
            "business_processes:\n  Checkout: 9\nservices:\n  - name: db\n  - name: api\n    depends_on: [db]\n",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert_eq!(config.business_processes.get("Checkout"), Some(&9));
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[1].depends_on, vec!["db"]);
    }

    #[test]
    fn missing_name_is_config_error() {
        let err = GraphConfig::parse(
            r#"{"services": [{"depends_on": ["db"]}]}"#,
            ConfigFormat::Json,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(ref msg) if msg.contains("name")));
    }

    #[test]
    fn empty_document_is_empty_graph() {
        let config = GraphConfig::parse("{}", ConfigFormat::Json).unwrap();
        assert!(config.services.is_empty());
        assert!(config.business_processes.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/graph.yaml");

        let config = GraphConfig {
            business_processes: BTreeMap::from([("Billing".to_string(), 7)]),
            services: vec![Service::new("db"), Service::new("api").with_depends_on(["db"])],
        };
        config.save(&path).unwrap();

        let loaded = GraphConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = GraphConfig::load(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
