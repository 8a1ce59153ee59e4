//! `micromod check` — Validate module relations.

use micromod_common::config::MicromodConfig;

use super::SourceArgs;

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or a relation is broken.
pub fn execute(source: &SourceArgs, config: &MicromodConfig) -> anyhow::Result<()> {
    let input = super::load_input(source, config)?;
    let message =
        micromod_compose::prepare::relations::validate_relations(&input.configurations)?;
    println!("{message}");
    Ok(())
}
