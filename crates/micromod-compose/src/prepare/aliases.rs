//! Alias resolution across modules.
//!
//! Modules are applied from the lowest to the highest effective order, so on
//! a key collision the highest order module wins. Equal orders keep their
//! declaration order and the later module wins.

use micromod_common::error::Result;
use micromod_common::types::{ResolvedModule, find_module};

use crate::context::BuildContext;
use crate::module::{ModuleConfiguration, application_order, resolve_path};

/// Resolves every module's `replacements` and `aliases` into absolute paths
/// and writes them into the build alias map.
///
/// Modules without an `order` sort as `default_order`.
///
/// The full set is computed before the build is touched and committed in a
/// single [`BuildContext::extend_config`] call.
///
/// # Errors
///
/// Returns [`MicromodError::ModuleNotFound`](micromod_common::error::MicromodError::ModuleNotFound)
/// if a module contributing aliases is not in `all_modules`.
pub fn resolve_aliases<C: BuildContext>(
    configurations: &[ModuleConfiguration],
    all_modules: &[ResolvedModule],
    default_order: i32,
    ctx: &C,
) -> Result<String> {
    let mut writes: Vec<(String, String)> = Vec::new();

    for config in application_order(configurations, default_order) {
        let mut entries = config.alias_entries().peekable();
        if entries.peek().is_none() {
            continue;
        }
        let module = find_module(all_modules, &config.name)?;
        for (key, fragment) in entries {
            let path = resolve_path(module.root(), fragment);
            tracing::debug!(module = %config.name, alias = %key, path = %path, "alias resolved");
            writes.push((key.clone(), path));
        }
    }

    let written = writes.len();
    let mut distinct = 0usize;
    ctx.extend_config(|config| {
        for (key, path) in writes {
            if let Some(previous) = config.resolve.alias.insert(key.clone(), path) {
                tracing::debug!(alias = %key, overridden = %previous, "alias overridden");
            } else {
                distinct += 1;
            }
        }
    });

    tracing::info!(written, distinct, "aliases resolved");
    Ok(format!("Aliases resolved: {written} write(s), {distinct} new key(s)"))
}
