//! Discovery of micro-module packages on disk.
//!
//! Each subdirectory of the modules directory holding a `micromod.json`,
//! `micromod.yaml` or `micromod.yml` file is one module. Its configuration is
//! parsed from that file and its root is the subdirectory itself.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use micromod_common::constants::MODULE_CONFIG_FILES;
use micromod_common::error::{MicromodError, Result};
use micromod_common::types::ResolvedModule;

use crate::manifest::ManifestFormat;
use crate::module::ModuleConfiguration;
use crate::prepare::{HostOptions, PrepareInput};

/// A module found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    /// Parsed module configuration.
    pub configuration: ModuleConfiguration,
    /// Module name and root.
    pub resolved: ResolvedModule,
    /// File the configuration was read from.
    pub config_file: PathBuf,
}

/// Scans `dir` for module packages, sorted by directory name.
///
/// Subdirectories without a configuration file are skipped.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read, a configuration fails to
/// parse, or two modules share a name.
pub fn discover_modules(dir: &Path) -> Result<Vec<DiscoveredModule>> {
    tracing::info!(dir = %dir.display(), "discovering modules");
    let io_err = |source| MicromodError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut roots: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            roots.push(path);
        }
    }
    roots.sort();

    let mut seen = HashSet::new();
    let mut modules = Vec::new();
    for root in roots {
        let Some(config_file) = find_config_file(&root) else {
            tracing::debug!(root = %root.display(), "no module configuration, skipping");
            continue;
        };
        let module = load_module(&root, config_file)?;
        if !seen.insert(module.configuration.name.clone()) {
            return Err(MicromodError::Config {
                message: format!(
                    "duplicate module name: \"{}\" ({})",
                    module.configuration.name,
                    root.display()
                ),
            });
        }
        tracing::debug!(
            module = %module.configuration.name,
            config_file = %module.config_file.display(),
            "module discovered"
        );
        modules.push(module);
    }

    Ok(modules)
}

/// Discovers modules under `dir` and assembles a [`PrepareInput`].
///
/// # Errors
///
/// Returns an error if discovery fails.
pub fn discover_input(dir: &Path, verbose: bool) -> Result<PrepareInput> {
    let modules = discover_modules(dir)?;
    let (configurations, all_modules) = modules
        .into_iter()
        .map(|m| (m.configuration, m.resolved))
        .unzip();
    Ok(PrepareInput {
        configurations,
        options: HostOptions {
            all_modules,
            verbose,
            default_order: None,
        },
    })
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    MODULE_CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

fn load_module(root: &Path, config_file: PathBuf) -> Result<DiscoveredModule> {
    if root.to_str().is_none() {
        return Err(MicromodError::Config {
            message: format!("module root is not valid UTF-8: {}", root.display()),
        });
    }
    let content = std::fs::read_to_string(&config_file).map_err(|e| MicromodError::Io {
        path: config_file.clone(),
        source: e,
    })?;
    let configuration: ModuleConfiguration =
        ManifestFormat::from_path(&config_file)?.parse(&content)?;
    if configuration.name.is_empty() {
        return Err(MicromodError::Config {
            message: format!("module at {} has no name", root.display()),
        });
    }
    Ok(DiscoveredModule {
        resolved: ResolvedModule::new(configuration.name.clone(), root),
        configuration,
        config_file,
    })
}
