//! Brewfile generation and bulk install
//!
//! The Brewfile is a declarative list of `brew "<name>"` directives consumed
//! by `brew bundle install`. It is rebuilt from the manifest on every run.

use crate::error::{RebrewError, Result};
use crate::manifest::{ManifestReader, PackageName};
use crate::runner::CommandRunner;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

/// Default Brewfile name, relative to the working directory
pub const DEFAULT_BREWFILE: &str = "Brewfile";

/// Render one install directive, including the trailing newline
///
/// The name's bytes are copied as-is, so a name that is not valid UTF-8
/// survives into the Brewfile unchanged.
pub fn directive(package: &PackageName) -> Vec<u8> {
    let name = package.as_bytes();
    let mut line = Vec::with_capacity(name.len() + 8);
    line.extend_from_slice(b"brew \"");
    line.extend_from_slice(name);
    line.extend_from_slice(b"\"\n");
    line
}

/// Rebuild the Brewfile from the manifest, in manifest order.
///
/// Returns the number of directives written.
pub async fn write_brewfile(manifest: &Path, brewfile: &Path) -> Result<usize> {
    println!("Creating Brewfile...");

    let mut reader = ManifestReader::open(manifest).await?;
    let file = File::create(brewfile)
        .await
        .map_err(|e| RebrewError::persistence(brewfile, e))?;
    let mut writer = BufWriter::new(file);

    let mut count = 0;
    let written = async {
        while let Some(package) = reader.next_package().await? {
            writer
                .write_all(&directive(&package))
                .await
                .map_err(|e| RebrewError::persistence(brewfile, e))?;
            count += 1;
        }
        Ok::<_, RebrewError>(())
    }
    .await;

    // directives written before a failure still reach the file
    writer
        .flush()
        .await
        .map_err(|e| RebrewError::persistence(brewfile, e))?;
    written?;

    debug!(path = %brewfile.display(), directives = count, "brewfile written");
    println!(
        "Brewfile created in {}... {}\n",
        brewfile.display().to_string().cyan(),
        "OK".green()
    );

    Ok(count)
}

/// Install every package listed in the manifest via `brew bundle install`.
///
/// Output of the install command is captured and relayed once it finishes.
pub async fn install_all(
    runner: Arc<dyn CommandRunner>,
    manifest: &Path,
    brewfile: &Path,
) -> Result<usize> {
    println!("Installing all packages...");

    let count = write_brewfile(manifest, brewfile).await?;

    let spinner = install_spinner(count);
    let path = brewfile.to_string_lossy().into_owned();
    let output = tokio::task::spawn_blocking(move || {
        let args = ["bundle", "install", "--file", path.as_str()];
        runner
            .run(&args)
            .and_then(|output| output.into_success(&runner.command_line(&args)))
    })
    .await
    .map_err(|e| RebrewError::Worker(e.to_string()));
    spinner.finish_and_clear();

    let output = output??;

    if !output.stdout.is_empty() {
        print!("{}", String::from_utf8_lossy(&output.stdout));
    }
    if !output.stderr.is_empty() {
        print!("{}", String::from_utf8_lossy(&output.stderr));
    }

    info!(packages = count, "bundle install finished");
    println!("All packages installed... {}\n", "OK".green());

    Ok(count)
}

fn install_spinner(count: usize) -> ProgressBar {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    if !is_tty {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Running brew bundle for {} packages...", count));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
