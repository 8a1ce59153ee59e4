//! Validation of declared inter-module relations.
//!
//! Runs over the full configuration list before anything is written so a
//! broken relation aborts the build with nothing applied.

use std::collections::HashSet;

use micromod_common::error::{MicromodError, Result};

use crate::module::ModuleConfiguration;

/// Checks that every declared relation names a module in `configurations`.
///
/// A module may name itself.
///
/// # Errors
///
/// Returns [`MicromodError::Relation`] for the first relation that names no
/// known module.
pub fn validate_relations(configurations: &[ModuleConfiguration]) -> Result<String> {
    tracing::info!(modules = configurations.len(), "validating module relations");
    let names: HashSet<&str> = configurations.iter().map(|c| c.name.as_str()).collect();

    let mut checked = 0usize;
    for config in configurations {
        let Some(relations) = &config.relations else {
            continue;
        };
        for relation in relations {
            if !names.contains(relation.as_str()) {
                return Err(MicromodError::Relation {
                    module: config.name.clone(),
                    relation: relation.clone(),
                });
            }
            checked += 1;
        }
    }

    Ok(format!(
        "Relations valid: {checked} relation(s) across {} module(s)",
        configurations.len()
    ))
}
