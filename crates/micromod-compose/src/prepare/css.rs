//! CSS aggregation.
//!
//! Stylesheets are appended in configuration list order. They take no part
//! in the order-based override scheme used for aliases.

use micromod_common::error::Result;
use micromod_common::types::{ResolvedModule, find_module};

use crate::context::BuildContext;
use crate::module::{ModuleConfiguration, resolve_path};

/// Appends each module's stylesheets to the build CSS list.
///
/// # Errors
///
/// Returns an error if a module declaring `css` is not in `all_modules`.
/// Nothing is appended in that case.
pub fn aggregate_css<C: BuildContext>(
    configurations: &[ModuleConfiguration],
    all_modules: &[ResolvedModule],
    ctx: &C,
) -> Result<String> {
    let mut paths = Vec::new();
    let mut modules = 0usize;
    for config in configurations {
        let Some(css) = &config.css else {
            continue;
        };
        if config.name.is_empty() {
            continue;
        }
        modules += 1;
        let module = find_module(all_modules, &config.name)?;
        paths.extend(css.iter().map(|entry| resolve_path(module.root(), entry)));
    }

    let count = paths.len();
    for path in paths {
        ctx.append_css(path);
    }

    tracing::info!(stylesheets = count, modules, "css aggregated");
    Ok(format!(
        "CSS aggregated: {count} stylesheet(s) from {modules} module(s)"
    ))
}
