//! Unified error types for the micromod workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MicromodError {
    /// A module declares a relation to a module that does not exist.
    #[error("module \"{module}\" declares relation \"{relation}\" but no such module exists")]
    Relation {
        /// Module declaring the relation.
        module: String,
        /// Name of the missing related module.
        relation: String,
    },

    /// A configuration references a module absent from the resolved module list.
    #[error("module not found: {name}")]
    ModuleNotFound {
        /// Name that failed to resolve.
        name: String,
    },

    /// The host build system rejected a plugin registration.
    #[error("failed to register plugin {file_name}: {message}")]
    Registration {
        /// File name the plugin was registered under.
        file_name: String,
        /// Reason reported by the host.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MicromodError>;
