//! Plugin registration.
//!
//! Every plugin a module ships is registered with the host under a file
//! name namespaced by the module's alphabetic-only identifier.

use futures::future::try_join_all;
use micromod_common::constants::PATH_SEPARATOR;
use micromod_common::error::Result;
use micromod_common::types::{ModuleIdentifier, PluginMode, ResolvedModule, find_module};

use crate::context::{BuildContext, PluginRegistration};
use crate::module::{ModuleConfiguration, PluginDescriptor, resolve_path};

/// Returns the file name a plugin is registered under: `<identifier>/<src>`.
#[must_use]
pub fn plugin_file_name(identifier: &ModuleIdentifier, src: &str) -> String {
    let relative = src.trim_start_matches("./").trim_start_matches(PATH_SEPARATOR);
    format!("{identifier}{PATH_SEPARATOR}{relative}")
}

/// Builds the registrations for one module, in declaration order.
///
/// # Errors
///
/// Returns an error if the module is not in `all_modules`.
pub fn module_registrations(
    config: &ModuleConfiguration,
    plugins: &[PluginDescriptor],
    all_modules: &[ResolvedModule],
) -> Result<Vec<PluginRegistration>> {
    let module = find_module(all_modules, &config.name)?;
    let identifier = config.identifier();
    Ok(plugins
        .iter()
        .map(|plugin| PluginRegistration {
            src: resolve_path(module.root(), &plugin.src),
            file_name: plugin_file_name(&identifier, &plugin.src),
            mode: PluginMode::from_ssr(plugin.ssr),
        })
        .collect())
}

/// Registers the plugins of every module that declares any.
///
/// Registrations across all modules are issued concurrently. The first
/// failure aborts the step.
///
/// # Errors
///
/// Returns an error if a module is not in `all_modules` or the host rejects
/// a registration.
pub async fn register_plugins<C: BuildContext>(
    configurations: &[ModuleConfiguration],
    all_modules: &[ResolvedModule],
    ctx: &C,
) -> Result<String> {
    let mut registrations = Vec::new();
    let mut modules = 0usize;
    for config in configurations {
        let Some(plugins) = &config.plugins else {
            continue;
        };
        modules += 1;
        registrations.extend(module_registrations(config, plugins, all_modules)?);
    }

    let count = registrations.len();
    tracing::info!(plugins = count, modules, "registering plugins");
    let _ = try_join_all(
        registrations
            .into_iter()
            .map(|registration| ctx.register_plugin(registration)),
    )
    .await?;

    Ok(format!(
        "Plugins registered: {count} plugin(s) from {modules} module(s)"
    ))
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use micromod_common::error::MicromodError;

    use super::*;
    use crate::context::{BuildConfig, MemoryBuildContext};

    fn with_plugins(name: &str, plugins: Vec<PluginDescriptor>) -> ModuleConfiguration {
        ModuleConfiguration {
            plugins: Some(plugins),
            ..ModuleConfiguration::new(name)
        }
    }

    struct RejectingContext;

    impl BuildContext for RejectingContext {
        fn extend_config<F>(&self, extend: F)
        where
            F: FnOnce(&mut BuildConfig),
        {
            extend(&mut BuildConfig::default());
        }

        fn register_plugin(
            &self,
            plugin: PluginRegistration,
        ) -> impl Future<Output = Result<()>> + Send {
            std::future::ready(Err(MicromodError::Registration {
                file_name: plugin.file_name,
                message: "host closed".into(),
            }))
        }

        fn append_css(&self, _path: String) {}
    }

    #[test]
    fn file_name_is_namespaced() {
        let id = ModuleIdentifier::from_name("@acme/shop-2");
        assert_eq!(plugin_file_name(&id, "plugins/a.js"), "acmeshop/plugins/a.js");
        assert_eq!(plugin_file_name(&id, "./plugins/a.js"), "acmeshop/plugins/a.js");
    }

    #[tokio::test]
    async fn ssr_flag_selects_mode() {
        let configs = vec![with_plugins(
            "my-mod",
            vec![
                PluginDescriptor::new("p1", true),
                PluginDescriptor::new("p2", false),
            ],
        )];
        let modules = vec![ResolvedModule::new("my-mod", "/mods/my-mod")];
        let ctx = MemoryBuildContext::new();
        let msg = register_plugins(&configs, &modules, &ctx)
            .await
            .expect("register");
        assert_eq!(msg, "Plugins registered: 2 plugin(s) from 1 module(s)");

        let plugins = ctx.snapshot().plugins;
        assert_eq!(plugins.len(), 2);
        let p1 = plugins.iter().find(|p| p.file_name == "mymod/p1").expect("p1");
        let p2 = plugins.iter().find(|p| p.file_name == "mymod/p2").expect("p2");
        assert_eq!(p1.mode, PluginMode::Server);
        assert_eq!(p1.src, "/mods/my-mod/p1");
        assert_eq!(p2.mode, PluginMode::Client);
    }

    #[tokio::test]
    async fn modules_without_plugins_are_skipped() {
        let configs = vec![ModuleConfiguration::new("bare")];
        let ctx = MemoryBuildContext::new();
        let msg = register_plugins(&configs, &[], &ctx).await.expect("ok");
        assert_eq!(msg, "Plugins registered: 0 plugin(s) from 0 module(s)");
        assert!(ctx.snapshot().plugins.is_empty());
    }

    #[test]
    fn registrations_keep_declaration_order() {
        let config = with_plugins("a", Vec::new());
        let plugins = vec![
            PluginDescriptor::new("z.js", false),
            PluginDescriptor::new("a.js", false),
        ];
        let modules = vec![ResolvedModule::new("a", "/mods/a")];
        let regs = module_registrations(&config, &plugins, &modules).expect("regs");
        let names: Vec<&str> = regs.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a/z.js", "a/a.js"]);
    }

    #[tokio::test]
    async fn unknown_module_is_typed_error() {
        let configs = vec![with_plugins("ghost", vec![PluginDescriptor::new("p", false)])];
        let ctx = MemoryBuildContext::new();
        let err = register_plugins(&configs, &[], &ctx).await.unwrap_err();
        assert!(matches!(err, MicromodError::ModuleNotFound { .. }));
    }

    #[tokio::test]
    async fn registration_failure_propagates() {
        let configs = vec![with_plugins("a", vec![PluginDescriptor::new("p", false)])];
        let modules = vec![ResolvedModule::new("a", "/mods/a")];
        let err = register_plugins(&configs, &modules, &RejectingContext)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("host closed"), "got: {err}");
    }

    #[tokio::test]
    async fn colliding_file_names_fail() {
        let configs = vec![
            with_plugins("shop-1", vec![PluginDescriptor::new("p.js", false)]),
            with_plugins("shop-2", vec![PluginDescriptor::new("p.js", true)]),
        ];
        let modules = vec![
            ResolvedModule::new("shop-1", "/mods/shop-1"),
            ResolvedModule::new("shop-2", "/mods/shop-2"),
        ];
        let ctx = MemoryBuildContext::new();
        let err = register_plugins(&configs, &modules, &ctx).await.unwrap_err();
        assert!(matches!(err, MicromodError::Registration { ref file_name, .. } if file_name == "shop/p.js"));
    }
}
