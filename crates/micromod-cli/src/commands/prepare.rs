//! `micromod prepare` — Merge every module into the host build.

use clap::{Args, ValueEnum};
use micromod_common::config::MicromodConfig;
use micromod_compose::context::MemoryBuildContext;
use micromod_compose::prepare::prepare_modules;

use super::SourceArgs;
use crate::output::{ConsoleReporter, render_build_config};

/// Output encoding for the resulting build configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Output format for the build configuration.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Executes the `prepare` command.
///
/// Runs the preparer on a single-threaded runtime against an empty build
/// and prints the configuration it produced.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or preparation fails.
pub fn execute(
    source: &SourceArgs,
    config: &MicromodConfig,
    args: &PrepareArgs,
) -> anyhow::Result<()> {
    let input = super::load_input(source, config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let ctx = MemoryBuildContext::new();
    let _ = runtime.block_on(prepare_modules(&input, &ctx, &ConsoleReporter))?;
    let build = ctx.into_config();
    tracing::info!(
        aliases = build.resolve.alias.len(),
        css = build.css.len(),
        plugins = build.plugins.len(),
        "build configuration prepared"
    );

    match args.format {
        OutputFormat::Text => println!("{}", render_build_config(&build)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&build)?),
    }
    Ok(())
}
