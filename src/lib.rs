//! Library interface for rebrew
//!
//! Backs up the list of installed Homebrew packages to a manifest and
//! restores from it, either by reinstalling everything through a generated
//! Brewfile or by printing a short description of each package.

pub mod app;
pub mod brewfile;
pub mod colors;
pub mod config;
pub mod describe;
pub mod error;
pub mod list;
pub mod manifest;
pub mod prompt;
pub mod runner;

// Re-export commonly used items
pub use config::Config;
pub use describe::{Description, DescribeSummary, describe_all, describe_one};
pub use error::{RebrewError, Result};
pub use runner::{BrewRunner, CommandOutput, CommandRunner};
