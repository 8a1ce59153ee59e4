//! Formatted output helpers for CLI commands.

use std::fmt::Write as _;

use micromod_compose::context::BuildConfig;
use micromod_compose::prepare::Reporter;

/// Width of the border drawn under headers.
const BORDER_WIDTH: usize = 35;

/// Returns a heavy horizontal border line.
#[must_use]
pub fn border() -> String {
    "\u{2550}".repeat(BORDER_WIDTH)
}

/// Prints a bordered header followed by each log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, header: &str, logs: &[String]) {
        println!("{}", render_report(header, logs));
    }
}

/// Renders a bordered report block.
#[must_use]
pub fn render_report(header: &str, logs: &[String]) -> String {
    let mut out = format!("{}\n  {header}\n{}", border(), border());
    for line in logs {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

/// Renders a build configuration as human-readable text.
#[must_use]
pub fn render_build_config(config: &BuildConfig) -> String {
    let mut out = String::from("Aliases:");
    if config.resolve.alias.is_empty() {
        out.push_str("\n  (none)");
    }
    for (key, path) in &config.resolve.alias {
        let _ = write!(out, "\n  {key} -> {path}");
    }

    out.push_str("\nCSS:");
    if config.css.is_empty() {
        out.push_str("\n  (none)");
    }
    for path in &config.css {
        let _ = write!(out, "\n  {path}");
    }

    out.push_str("\nPlugins:");
    if config.plugins.is_empty() {
        out.push_str("\n  (none)");
    }
    for plugin in &config.plugins {
        let _ = write!(
            out,
            "\n  [{}] {} <- {}",
            plugin.mode, plugin.file_name, plugin.src
        );
    }
    out
}
