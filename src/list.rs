//! Homebrew availability check and manifest generation

use crate::error::{RebrewError, Result};
use crate::runner::CommandRunner;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Make sure the package manager can be invoked at all
pub fn check_brew(runner: &dyn CommandRunner) -> Result<()> {
    println!("Checking Homebrew installation...");

    let args = ["--version"];
    runner
        .run(&args)
        .and_then(|output| output.into_success(&runner.command_line(&args)))
        .map_err(|e| match e {
            RebrewError::ExternalCommand { command, message } => RebrewError::ExternalCommand {
                command,
                message: format!("brew is not installed: {}", message),
            },
            other => other,
        })?;

    println!("Homebrew installation... {}\n", "OK".green());
    Ok(())
}

/// Write the output of `brew list -1` to the manifest, byte for byte.
///
/// Any previous manifest is overwritten. Returns the number of bytes written.
pub fn generate_list(runner: &dyn CommandRunner, manifest: &Path) -> Result<usize> {
    println!("Generating list of installed brew packages...");

    let args = ["list", "-1"];
    let output = runner
        .run(&args)?
        .into_success(&runner.command_line(&args))?;

    std::fs::write(manifest, &output.stdout)
        .map_err(|e| RebrewError::persistence(manifest, e))?;

    info!(path = %manifest.display(), bytes = output.stdout.len(), "manifest written");
    println!(
        "List of installed brew packages saved in {}... {}\n",
        manifest.display().to_string().cyan(),
        "OK".green()
    );

    Ok(output.stdout.len())
}
