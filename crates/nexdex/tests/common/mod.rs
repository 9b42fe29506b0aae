//! Common test utilities shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the nexdex binary built for this test run
pub fn get_nexdex_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nexdex"))
}

/// Run the nexdex binary in the specified directory with colors disabled
pub fn run_nexdex_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(get_nexdex_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute nexdex binary")
}

/// A small e-commerce dependency map.
///
/// ```text
/// database -> auth -> payments -> storefront
///          -> catalog ----------> storefront
/// cache    -> catalog
/// ```
pub const ECOMMERCE_JSON: &str = r#"{
  "business_processes": { "Checkout": 10, "Search": 4 },
  "services": [
    { "name": "database", "mttr": 60, "importance": 9 },
    { "name": "cache", "mttr": 10 },
    { "name": "auth", "depends_on": ["database"], "business_process": "Checkout" },
    { "name": "catalog", "depends_on": ["database", "cache"], "business_process": "Search" },
    { "name": "payments", "depends_on": ["auth", "database"], "business_process": "Checkout", "mttr": 45 },
    { "name": "storefront", "depends_on": ["catalog", "payments"],
      "description": "Customer-facing web tier" }
  ]
}"#;

/// Write `contents` to `services.json` in `dir`.
pub fn write_services(dir: &Path, contents: &str) {
    fs::write(dir.join("services.json"), contents).expect("Failed to write services.json");
}
