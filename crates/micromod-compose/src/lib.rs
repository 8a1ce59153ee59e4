//! # micromod-compose
//!
//! Composes independently developed micro-modules into one host build.
//!
//! Handles:
//! - **Module**: Per-module configuration records and path resolution.
//! - **Context**: The build configuration the preparer mutates, behind an
//!   explicitly injected [`BuildContext`](context::BuildContext).
//! - **Prepare**: Relation validation, alias resolution, plugin registration,
//!   and CSS aggregation, run concurrently by
//!   [`prepare_modules`](prepare::prepare_modules).
//! - **Manifest**: Loading `{ configurations, options }` from JSON or YAML.
//! - **Discovery**: Scanning a directory for module packages.

pub mod context;
pub mod discovery;
pub mod manifest;
pub mod module;
pub mod prepare;
