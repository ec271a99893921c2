//! The interactive backup/restore flow
//!
//! Check for Homebrew, refresh the manifest, ask what to do, then either
//! install everything or describe everything.

use crate::brewfile;
use crate::config::Config;
use crate::describe::{self, DescribeSummary};
use crate::error::Result;
use crate::list;
use crate::prompt::{self, Action};
use crate::runner::CommandRunner;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of packages passed to `brew bundle install`
    Installed(usize),
    Described(DescribeSummary),
}

/// Run the whole flow. The prompt is written to `output` and the choice read
/// from `input`; everything else prints to stdout.
pub async fn run(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Outcome> {
    list::check_brew(runner.as_ref())?;
    list::generate_list(runner.as_ref(), &config.manifest)?;

    match prompt::read_choice(input, output)? {
        Action::InstallAll => {
            let count = brewfile::install_all(runner, &config.manifest, &config.brewfile).await?;
            Ok(Outcome::Installed(count))
        }
        Action::DescribeAll => {
            println!("Getting descriptions for each package...");
            let summary = describe::describe_all(
                runner,
                &config.manifest,
                config.workers.get(),
                |description| describe::print_description(&description),
            )
            .await?;
            println!(
                "Descriptions for {} packages... {}\n",
                summary.described.to_string().bold(),
                "OK".green()
            );
            Ok(Outcome::Described(summary))
        }
    }
}
