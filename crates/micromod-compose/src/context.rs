//! The host build configuration and the capability used to mutate it.
//!
//! The preparer never reaches for ambient host state. Everything it changes
//! goes through a [`BuildContext`] passed in by the caller.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use micromod_common::error::{MicromodError, Result};
use micromod_common::types::PluginMode;
use serde::{Deserialize, Serialize};

/// Build configuration consumed by the external bundler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Module resolution settings.
    pub resolve: ResolveConfig,
    /// Stylesheets included in every page, in order.
    pub css: Vec<String>,
    /// Plugins registered with the host, in registration order.
    pub plugins: Vec<PluginRegistration>,
}

/// Module resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Alias key to absolute path.
    pub alias: BTreeMap<String, String>,
}

/// A plugin handed to the host build system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRegistration {
    /// Absolute plugin source path.
    pub src: String,
    /// File name the host emits the plugin under.
    pub file_name: String,
    /// Execution side.
    pub mode: PluginMode,
}

/// Capability for mutating the host build.
///
/// Implementations must tolerate calls from several concurrently running
/// preparation steps. Each step writes a disjoint part of the build.
pub trait BuildContext: Sync {
    /// Applies a transform to the build configuration.
    fn extend_config<F>(&self, extend: F)
    where
        F: FnOnce(&mut BuildConfig);

    /// Registers a plugin with the host.
    ///
    /// # Errors
    ///
    /// Returns [`MicromodError::Registration`] if the host rejects it.
    fn register_plugin(&self, plugin: PluginRegistration)
    -> impl Future<Output = Result<()>> + Send;

    /// Appends a stylesheet to the global CSS list.
    fn append_css(&self, path: String);
}

/// In-process build context backed by a [`BuildConfig`].
///
/// Rejects a second plugin registered under an already used file name.
#[derive(Debug, Default)]
pub struct MemoryBuildContext {
    config: Mutex<BuildConfig>,
}

impl MemoryBuildContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context seeded with an existing configuration.
    #[must_use]
    pub const fn with_config(config: BuildConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn snapshot(&self) -> BuildConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the context and returns the configuration.
    #[must_use]
    pub fn into_config(self) -> BuildConfig {
        self.config
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl BuildContext for MemoryBuildContext {
    fn extend_config<F>(&self, extend: F)
    where
        F: FnOnce(&mut BuildConfig),
    {
        let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        extend(&mut config);
    }

    async fn register_plugin(&self, plugin: PluginRegistration) -> Result<()> {
        tokio::task::yield_now().await;
        let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        if config
            .plugins
            .iter()
            .any(|p| p.file_name == plugin.file_name)
        {
            return Err(MicromodError::Registration {
                file_name: plugin.file_name,
                message: "file name already registered".into(),
            });
        }
        tracing::debug!(file_name = %plugin.file_name, mode = %plugin.mode, "plugin registered");
        config.plugins.push(plugin);
        Ok(())
    }

    fn append_css(&self, path: String) {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .css
            .push(path);
    }
}
