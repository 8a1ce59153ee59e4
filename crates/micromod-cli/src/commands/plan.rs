//! `micromod plan` — Show modules in alias application order.

use std::fmt::Write as _;

use micromod_common::config::MicromodConfig;
use micromod_compose::module::{ModuleConfiguration, application_order};

use super::SourceArgs;
use crate::output::border;

/// Executes the `plan` command.
///
/// Lists modules in the sequence their aliases are applied. The last module
/// to write a key wins it.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded.
pub fn execute(source: &SourceArgs, config: &MicromodConfig) -> anyhow::Result<()> {
    let input = super::load_input(source, config)?;
    println!(
        "{}",
        render_plan(&input.configurations, input.options.effective_default_order())
    );
    Ok(())
}

/// Renders the application plan for `configurations`.
///
/// Modules without an order are listed at `default_order`.
#[must_use]
pub fn render_plan(configurations: &[ModuleConfiguration], default_order: i32) -> String {
    let mut out = format!("Module plan\n{}", border());
    let ordered = application_order(configurations, default_order);
    for (position, config) in ordered.iter().enumerate() {
        let _ = write!(
            out,
            "\n  {}. {} (order {}, id {})",
            position + 1,
            config.name,
            config.effective_order(default_order),
            config.identifier()
        );
        if let Some(relations) = config.relations.as_ref().filter(|r| !r.is_empty()) {
            let _ = write!(out, "\n      relations: {}", relations.join(", "));
        }
        let aliases: Vec<&str> = config.alias_entries().map(|(k, _)| k.as_str()).collect();
        if !aliases.is_empty() {
            let _ = write!(out, "\n      aliases: {}", aliases.join(", "));
        }
    }
    let _ = write!(out, "\n\n  {} module(s).", ordered.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_lists_lowest_order_first() {
        let configs = vec![
            ModuleConfiguration {
                order: Some(5),
                relations: Some(vec!["core-ui".into()]),
                ..ModuleConfiguration::new("shop-2")
            },
            ModuleConfiguration::new("core-ui"),
        ];
        let out = render_plan(&configs, 0);
        let core = out.find("1. core-ui (order 0, id coreui)").expect("core-ui first");
        let shop = out.find("2. shop-2 (order 5, id shop)").expect("shop second");
        assert!(core < shop);
        assert!(out.contains("relations: core-ui"), "got: {out}");
        assert!(out.ends_with("2 module(s)."), "got: {out}");
    }

    #[test]
    fn plan_uses_default_order_for_unordered_modules() {
        let configs = vec![
            ModuleConfiguration::new("plain"),
            ModuleConfiguration {
                order: Some(1),
                ..ModuleConfiguration::new("ranked")
            },
        ];
        let out = render_plan(&configs, 5);
        assert!(out.contains("1. ranked (order 1, id ranked)"), "got: {out}");
        assert!(out.contains("2. plain (order 5, id plain)"), "got: {out}");
    }
}
