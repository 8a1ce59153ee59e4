//! Global configuration model for a micromod invocation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a preparation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MicromodConfig {
    /// Directory scanned for micro-module packages.
    pub modules_dir: PathBuf,
    /// Manifest file holding the configurations and host options.
    pub manifest_file: PathBuf,
    /// Whether the preparation report is printed.
    pub verbose: bool,
    /// Order assigned to modules that do not declare one.
    pub default_order: i32,
}

impl Default for MicromodConfig {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from(crate::constants::DEFAULT_MODULES_DIR),
            manifest_file: PathBuf::from(crate::constants::DEFAULT_MANIFEST_FILE),
            verbose: false,
            default_order: crate::constants::DEFAULT_MODULE_ORDER,
        }
    }
}

impl MicromodConfig {
    /// Returns a copy with `verbose` set.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns a copy with `default_order` set.
    #[must_use]
    pub fn with_default_order(mut self, default_order: i32) -> Self {
        self.default_order = default_order;
        self
    }
}
