//! The module preparation pipeline.
//!
//! [`prepare_modules`] runs four independent steps against the same inputs:
//! - **Relations**: every declared relation names a known module.
//! - **Aliases**: module aliases are written into `resolve.alias`.
//! - **Plugins**: module plugins are registered with the host.
//! - **CSS**: module stylesheets are appended to the global CSS list.
//!
//! The steps write disjoint parts of the build and are awaited jointly. The
//! first failure aborts preparation. Writes already applied stay in place.

pub mod aliases;
pub mod css;
pub mod plugins;
pub mod relations;

use micromod_common::constants::{DEFAULT_MODULE_ORDER, PREPARE_HEADER};
use micromod_common::error::Result;
use micromod_common::types::ResolvedModule;
use serde::{Deserialize, Serialize};

use crate::context::BuildContext;
use crate::module::ModuleConfiguration;

/// Host-provided options for a preparation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HostOptions {
    /// Every active module with its filesystem root.
    pub all_modules: Vec<ResolvedModule>,
    /// Whether the preparation report is emitted.
    pub verbose: bool,
    /// Order assigned to modules that do not declare one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_order: Option<i32>,
}

impl HostOptions {
    /// Returns `default_order`, or [`DEFAULT_MODULE_ORDER`] when unset.
    #[must_use]
    pub fn effective_default_order(&self) -> i32 {
        self.default_order.unwrap_or(DEFAULT_MODULE_ORDER)
    }
}

/// Everything a preparation run consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepareInput {
    /// Per-module configurations, in discovery order.
    pub configurations: Vec<ModuleConfiguration>,
    /// Host options.
    pub options: HostOptions,
}

/// Receives the confirmation messages of a verbose run.
pub trait Reporter {
    /// Emits a header followed by one line per log.
    fn report(&self, header: &str, logs: &[String]);
}

/// Reporter that emits through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, header: &str, logs: &[String]) {
        tracing::info!("{header}");
        for line in logs {
            tracing::info!("  {line}");
        }
    }
}

/// Confirmation messages from the four preparation steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparationReport {
    /// Relation validation result.
    pub relations: String,
    /// Alias resolution result.
    pub aliases: String,
    /// Plugin registration result.
    pub plugins: String,
    /// CSS aggregation result.
    pub css: String,
}

impl PreparationReport {
    /// Returns the messages in step order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        vec![
            self.relations.clone(),
            self.aliases.clone(),
            self.plugins.clone(),
            self.css.clone(),
        ]
    }
}

/// Validates relations and merges every module into the host build.
///
/// Relation validation is polled first, so a broken relation fails before
/// any step has written to `ctx`. When `input.options.verbose` is set,
/// `reporter` is called once with all four messages.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub async fn prepare_modules<C, R>(
    input: &PrepareInput,
    ctx: &C,
    reporter: &R,
) -> Result<PreparationReport>
where
    C: BuildContext,
    R: Reporter + ?Sized,
{
    let configurations = input.configurations.as_slice();
    let all_modules = input.options.all_modules.as_slice();
    let default_order = input.options.effective_default_order();
    tracing::info!(
        modules = configurations.len(),
        active = all_modules.len(),
        "preparing micro-modules"
    );

    let (relations, aliases, plugins, css) = tokio::try_join!(
        async { relations::validate_relations(configurations) },
        async { aliases::resolve_aliases(configurations, all_modules, default_order, ctx) },
        plugins::register_plugins(configurations, all_modules, ctx),
        async { css::aggregate_css(configurations, all_modules, ctx) },
    )?;

    let report = PreparationReport {
        relations,
        aliases,
        plugins,
        css,
    };
    if input.options.verbose {
        reporter.report(PREPARE_HEADER, &report.messages());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use micromod_common::error::MicromodError;

    use super::*;
    use crate::context::MemoryBuildContext;
    use crate::module::PluginDescriptor;

    #[derive(Default)]
    struct RecordingReporter {
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl Reporter for RecordingReporter {
        fn report(&self, header: &str, logs: &[String]) {
            self.calls
                .borrow_mut()
                .push((header.to_owned(), logs.to_vec()));
        }
    }

    fn sample_input(verbose: bool) -> PrepareInput {
        let mut shop = ModuleConfiguration {
            order: Some(2),
            relations: Some(vec!["ui".into()]),
            plugins: Some(vec![PluginDescriptor::new("plugins/cart.js", false)]),
            css: Some(vec!["shop.css".into()]),
            ..ModuleConfiguration::new("shop")
        };
        let _ = shop.aliases.insert("@ui".into(), "overrides/ui".into());
        let mut ui = ModuleConfiguration::new("ui");
        let _ = ui.aliases.insert("@ui".into(), "components".into());

        PrepareInput {
            configurations: vec![shop, ui],
            options: HostOptions {
                all_modules: vec![
                    ResolvedModule::new("shop", "/mods/shop"),
                    ResolvedModule::new("ui", "/mods/ui"),
                ],
                verbose,
                default_order: None,
            },
        }
    }

    #[tokio::test]
    async fn quiet_run_does_not_report() {
        let ctx = MemoryBuildContext::new();
        let reporter = RecordingReporter::default();
        let report = prepare_modules(&sample_input(false), &ctx, &reporter)
            .await
            .expect("prepare");
        assert!(reporter.calls.borrow().is_empty());
        assert_eq!(report.messages().len(), 4);
    }

    #[tokio::test]
    async fn verbose_run_reports_once_with_all_messages() {
        let ctx = MemoryBuildContext::new();
        let reporter = RecordingReporter::default();
        let report = prepare_modules(&sample_input(true), &ctx, &reporter)
            .await
            .expect("prepare");
        let calls = reporter.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PREPARE_HEADER);
        assert_eq!(calls[0].1, report.messages());
    }

    #[tokio::test]
    async fn merges_all_module_contributions() {
        let ctx = MemoryBuildContext::new();
        let _ = prepare_modules(&sample_input(false), &ctx, &TracingReporter)
            .await
            .expect("prepare");
        let config = ctx.into_config();
        assert_eq!(
            config.resolve.alias.get("@ui").map(String::as_str),
            Some("/mods/shop/overrides/ui")
        );
        assert_eq!(config.css, vec!["/mods/shop/shop.css"]);
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.plugins[0].file_name, "shop/plugins/cart.js");
    }

    #[tokio::test]
    async fn broken_relation_aborts_before_writes() {
        let mut input = sample_input(true);
        input.configurations[0].relations = Some(vec!["checkout".into()]);
        let ctx = MemoryBuildContext::new();
        let reporter = RecordingReporter::default();
        let err = prepare_modules(&input, &ctx, &reporter).await.unwrap_err();
        assert!(matches!(err, MicromodError::Relation { .. }));
        assert!(reporter.calls.borrow().is_empty());
        assert_eq!(ctx.snapshot(), crate::context::BuildConfig::default());
    }

    #[tokio::test]
    async fn missing_module_root_fails() {
        let mut input = sample_input(false);
        input.options.all_modules.retain(|m| m.name != "ui");
        let ctx = MemoryBuildContext::new();
        let err = prepare_modules(&input, &ctx, &TracingReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, MicromodError::ModuleNotFound { ref name } if name == "ui"));
    }

    #[test]
    fn input_deserializes_camel_case_options() {
        let input: PrepareInput = serde_json::from_str(
            r#"{
                "configurations": [{ "name": "a" }],
                "options": { "allModules": [{ "name": "a", "path": "/mods/a" }], "verbose": true }
            }"#,
        )
        .expect("deserialize");
        assert_eq!(input.configurations.len(), 1);
        assert_eq!(input.options.all_modules[0].name, "a");
        assert!(input.options.verbose);
    }

    #[tokio::test]
    async fn host_default_order_reaches_alias_precedence() {
        let mut input = sample_input(false);
        input.configurations[0].order = None;
        input.options.default_order = Some(1);
        input.configurations[1].order = Some(0);
        let ctx = MemoryBuildContext::new();
        let _ = prepare_modules(&input, &ctx, &TracingReporter)
            .await
            .expect("prepare");
        assert_eq!(
            ctx.snapshot().resolve.alias.get("@ui").map(String::as_str),
            Some("/mods/shop/overrides/ui")
        );
    }

    #[test]
    fn input_rejects_unknown_fields() {
        let typo: std::result::Result<PrepareInput, _> =
            serde_json::from_str(r#"{ "configuration": [{ "name": "a" }] }"#);
        assert!(typo.is_err());
        let option_typo: std::result::Result<PrepareInput, _> =
            serde_json::from_str(r#"{ "options": { "all_modules": [] } }"#);
        assert!(option_typo.is_err());
    }
}
