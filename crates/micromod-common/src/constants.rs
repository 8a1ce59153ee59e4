//! Workspace-wide constants and default paths.

/// Order assigned to modules that do not declare one.
pub const DEFAULT_MODULE_ORDER: i32 = 0;

/// Default directory scanned for micro-module packages.
pub const DEFAULT_MODULES_DIR: &str = "modules";

/// Default manifest file holding `{ configurations, options }`.
///
/// Distinct from every entry of [`MODULE_CONFIG_FILES`] so a module's own
/// configuration is never read as a manifest.
pub const DEFAULT_MANIFEST_FILE: &str = "micromod.manifest.json";

/// Per-module configuration file names, probed in this order during discovery.
pub const MODULE_CONFIG_FILES: &[&str] = &["micromod.json", "micromod.yaml", "micromod.yml"];

/// Header printed above the preparation report.
pub const PREPARE_HEADER: &str = "Micro-modules prepared";

/// Path separator used when joining module roots and fragments.
pub const PATH_SEPARATOR: char = '/';
