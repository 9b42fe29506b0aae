//! File-backed scenario storage.
//!
//! Each scenario lives in its own `<dir>/<name>.json` file. The directory is
//! created on first save.

use nexdex_core::{Error, Result, Scenario};
use std::fs;
use std::path::{Path, PathBuf};

const SCENARIO_EXTENSION: &str = "json";

/// Saved scenarios in one directory.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    dir: PathBuf,
}

impl ScenarioStore {
    /// A store rooted at `dir`. Nothing is touched until the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory scenarios are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a scenario with this name is stored.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SCENARIO_EXTENSION}"))
    }

    /// Save a scenario, replacing any previous one with the same name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory or file cannot be written.
    pub fn save(&self, scenario: &Scenario) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&scenario.name);
        fs::write(&path, serde_json::to_string_pretty(scenario)?)?;
        tracing::debug!(path = %path.display(), "Saved scenario");
        Ok(path)
    }

    /// Load a scenario by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no such scenario exists or its file is
    /// malformed.
    pub fn load(&self, name: &str) -> Result<Scenario> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(Error::Config(format!(
                "scenario '{name}' not found in {}",
                self.dir.display()
            )));
        }
        Self::load_file(&path)
    }

    /// Load a scenario from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config`
    /// if it is not a valid scenario.
    pub fn load_file(path: &Path) -> Result<Scenario> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Every scenario file in `dir`, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory cannot be read.
    pub fn scenario_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(SCENARIO_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// All saved scenarios, optionally filtered by tag (case-insensitive).
    ///
    /// Sorted by name. A missing directory means no scenarios. Files that do
    /// not parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory exists but cannot be read.
    pub fn list(&self, tag: Option<&str>) -> Result<Vec<Scenario>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut scenarios = Vec::new();
        for path in Self::scenario_files(&self.dir)? {
            match Self::load_file(&path) {
                Ok(scenario) => scenarios.push(scenario),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable scenario");
                }
            }
        }

        if let Some(tag) = tag {
            scenarios.retain(|scenario| scenario.has_tag(tag));
        }
        scenarios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scenarios)
    }
}
