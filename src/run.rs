//! Application execution logic.
//!
//! Compiles the validated configuration once and either writes
//! `puppet.conf` and `auth.conf` or prints them for a dry run.

use std::io::{self, Write};

use thiserror::Error;

use puppetconf::compile::{Compilation, compile};
use puppetconf::config::{OutputFormat, ValidatedConfig};
use puppetconf::output::{
    AUTH_CONF, OutputError, PUPPET_CONF, render_auth_conf, render_json, render_puppet_conf,
    write_artifacts,
};
use puppetconf::resolve::ResolveError;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Parameters could not be resolved.
    #[error("Failed to compile configuration: {0}")]
    Resolve(#[from] ResolveError),

    /// Artifacts could not be rendered or written.
    #[error("Failed to write configuration: {0}")]
    Output(#[from] OutputError),

    /// Dry-run output could not be printed.
    #[error("Failed to print configuration: {0}")]
    Print(#[source] io::Error),
}

/// Executes a single generation run.
///
/// This function:
/// 1. Compiles settings and ACL rules from the validated config
/// 2. In dry-run mode, prints them to `out` in the configured format
/// 3. Otherwise writes both files into the output directory
///
/// # Errors
///
/// Returns an error if compilation fails or the output cannot be written.
pub fn execute(config: &ValidatedConfig, out: &mut impl Write) -> Result<(), RunError> {
    let compilation = compile(&config.params, &config.facts, &config.platform)?;

    if config.dry_run {
        tracing::info!("Dry run, nothing will be written");
        return print_compilation(&compilation, config.format, out);
    }

    write_artifacts(&config.output_dir, &compilation)?;
    Ok(())
}

/// Prints the compilation in the requested format.
fn print_compilation(
    compilation: &Compilation,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let text = match format {
        OutputFormat::Text => format!(
            "==> {PUPPET_CONF} <==\n{}\n==> {AUTH_CONF} <==\n{}",
            render_puppet_conf(&compilation.settings),
            render_auth_conf(&compilation.acl),
        ),
        OutputFormat::Json => format!("{}\n", render_json(compilation)?),
    };

    out.write_all(text.as_bytes()).map_err(RunError::Print)
}
