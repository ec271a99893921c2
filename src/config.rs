//! Runtime configuration
//!
//! Every path and the executable name are carried here instead of being
//! read from fixed locations, so runs can be isolated in their own directory.

use crate::brewfile::DEFAULT_BREWFILE;
use crate::describe::DEFAULT_WORKERS;
use crate::manifest::DEFAULT_MANIFEST;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Package manager executable
    pub brew: String,
    /// Manifest written by the list step
    pub manifest: PathBuf,
    /// Install directive file regenerated by the install step
    pub brewfile: PathBuf,
    /// Size of the describe worker pool
    pub workers: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brew: "brew".to_string(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            brewfile: PathBuf::from(DEFAULT_BREWFILE),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    /// Default configuration with both files placed under `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            manifest: dir.join(DEFAULT_MANIFEST),
            brewfile: dir.join(DEFAULT_BREWFILE),
            ..Self::default()
        }
    }
}
