//! CLI command definitions and dispatch.

pub mod check;
pub mod plan;
pub mod prepare;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use micromod_common::config::MicromodConfig;
use micromod_compose::prepare::PrepareInput;

/// micromod — Compose micro-modules into a host build.
#[derive(Parser, Debug)]
#[command(name = "micromod", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Where module configurations are read from.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the preparation report.
    #[arg(short, long, global = true, env = "MICROMOD_VERBOSE")]
    pub verbose: bool,

    /// Order for modules that declare none, unless the manifest sets one.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub default_order: Option<i32>,
}

/// Input selection shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Manifest file holding `{ configurations, options }` (.json, .yaml, .yml).
    #[arg(long, global = true, conflicts_with = "modules_dir")]
    pub manifest: Option<PathBuf>,

    /// Directory of module packages to discover instead of a manifest.
    #[arg(long, global = true)]
    pub modules_dir: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge every module into the host build and print the result.
    Prepare(prepare::PrepareArgs),
    /// Validate module relations only.
    Check,
    /// Show modules in alias application order.
    Plan,
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = MicromodConfig::default().with_verbose(cli.verbose);
    if let Some(order) = cli.default_order {
        config = config.with_default_order(order);
    }
    match cli.command {
        Command::Prepare(args) => prepare::execute(&cli.source, &config, &args),
        Command::Check => check::execute(&cli.source, &config),
        Command::Plan => plan::execute(&cli.source, &config),
    }
}

/// Loads the preparation input selected by `source`.
///
/// `--modules-dir` discovers packages on disk and `--manifest` reads a
/// manifest. Without either, the default manifest is read if it exists and
/// the default modules directory is discovered otherwise. The `verbose` flag
/// of the loaded options is raised when `config.verbose` is set, and
/// `config.default_order` fills in a default order the input leaves unset.
///
/// # Errors
///
/// Returns an error if discovery or manifest loading fails.
pub fn load_input(source: &SourceArgs, config: &MicromodConfig) -> anyhow::Result<PrepareInput> {
    let mut input = match (&source.manifest, &source.modules_dir) {
        (_, Some(dir)) => discover(dir, config)?,
        (Some(manifest), None) => load_manifest(manifest)?,
        (None, None) if config.manifest_file.is_file() => load_manifest(&config.manifest_file)?,
        (None, None) => discover(&config.modules_dir, config)?,
    };
    input.options.verbose |= config.verbose;
    let _ = input.options.default_order.get_or_insert(config.default_order);
    tracing::debug!(
        modules = input.configurations.len(),
        verbose = input.options.verbose,
        "input loaded"
    );
    Ok(input)
}

fn discover(dir: &Path, config: &MicromodConfig) -> anyhow::Result<PrepareInput> {
    micromod_compose::discovery::discover_input(dir, config.verbose)
        .with_context(|| format!("failed to discover modules in {}", dir.display()))
}

fn load_manifest(manifest: &Path) -> anyhow::Result<PrepareInput> {
    micromod_compose::manifest::load_input(manifest)
        .with_context(|| format!("failed to load manifest {}", manifest.display()))
}
