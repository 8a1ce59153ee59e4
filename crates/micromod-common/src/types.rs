//! Domain primitive types used across the micromod workspace.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MicromodError, Result};

/// An active module as located by the host: its name and filesystem root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Module name, matching `ModuleConfiguration::name`.
    pub name: String,
    /// Absolute path of the module root.
    pub path: PathBuf,
}

impl ResolvedModule {
    /// Creates a resolved module entry.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the module root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.path
    }
}

/// Looks up an active module by name.
///
/// # Errors
///
/// Returns [`MicromodError::ModuleNotFound`] if no module carries `name`.
pub fn find_module<'a>(modules: &'a [ResolvedModule], name: &str) -> Result<&'a ResolvedModule> {
    modules
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| MicromodError::ModuleNotFound { name: name.into() })
}

/// Alphabetic-only identifier derived from a module name.
///
/// Used to namespace the files a module registers with the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleIdentifier(String);

impl ModuleIdentifier {
    /// Strips every non-alphabetic character from `name`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(name.chars().filter(char::is_ascii_alphabetic).collect())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a registered plugin executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginMode {
    /// Runs during server-side rendering.
    Server,
    /// Runs in the browser.
    Client,
}

impl PluginMode {
    /// Maps a descriptor's `ssr` flag to a mode.
    #[must_use]
    pub const fn from_ssr(ssr: bool) -> Self {
        if ssr { Self::Server } else { Self::Client }
    }
}

impl fmt::Display for PluginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Client => write!(f, "client"),
        }
    }
}
