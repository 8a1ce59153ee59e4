//! Per-module configuration records.
//!
//! A [`ModuleConfiguration`] is what each micro-module package declares about
//! itself: its relations to other modules, the aliases it contributes, the
//! plugins it injects, and the stylesheets it ships.

use std::collections::BTreeMap;
use std::path::Path;

use micromod_common::constants::PATH_SEPARATOR;
use micromod_common::types::ModuleIdentifier;
use serde::{Deserialize, Serialize};

/// Configuration declared by one micro-module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfiguration {
    /// Unique module name.
    pub name: String,
    /// Sort key for alias precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Names of modules this module depends on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<String>>,
    /// Alias key to path fragment, applied before `aliases`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub replacements: BTreeMap<String, String>,
    /// Alias key to path fragment.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
    /// Plugins injected into the host build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginDescriptor>>,
    /// Stylesheets appended to the host CSS list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<Vec<String>>,
}

impl ModuleConfiguration {
    /// Creates a configuration with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the declared order, or `default_order` when none is declared.
    #[must_use]
    pub fn effective_order(&self, default_order: i32) -> i32 {
        self.order.unwrap_or(default_order)
    }

    /// Returns the alphabetic-only identifier used to namespace plugin files.
    #[must_use]
    pub fn identifier(&self) -> ModuleIdentifier {
        ModuleIdentifier::from_name(&self.name)
    }

    /// Iterates `replacements` then `aliases`.
    pub fn alias_entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.replacements.iter().chain(self.aliases.iter())
    }
}

/// A plugin shipped by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDescriptor {
    /// Plugin source path, relative to the module root.
    pub src: String,
    /// Whether the plugin runs server-side.
    #[serde(default)]
    pub ssr: bool,
}

impl PluginDescriptor {
    /// Creates a plugin descriptor.
    #[must_use]
    pub fn new(src: impl Into<String>, ssr: bool) -> Self {
        Self {
            src: src.into(),
            ssr,
        }
    }
}

/// Joins a module root with a relative fragment.
///
/// An absolute fragment replaces the root. Exactly one trailing path
/// separator is stripped from the result.
#[must_use]
pub fn resolve_path(root: &Path, fragment: &str) -> String {
    let joined = root.join(fragment);
    let joined = joined.to_string_lossy();
    match joined.strip_suffix(PATH_SEPARATOR) {
        Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
        _ => joined.into_owned(),
    }
}

/// Returns a stable-sorted copy of `configurations`, lowest order first.
///
/// Modules without an order sort as `default_order`. Applying aliases in this
/// sequence lets the highest order module write last. Modules sharing an
/// order keep their declaration order.
#[must_use]
pub fn application_order(
    configurations: &[ModuleConfiguration],
    default_order: i32,
) -> Vec<&ModuleConfiguration> {
    let mut sorted: Vec<&ModuleConfiguration> = configurations.iter().collect();
    sorted.sort_by_key(|c| c.effective_order(default_order));
    sorted
}
