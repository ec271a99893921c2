//! The package manifest (`brew_list.txt`)
//!
//! Newline-delimited package names as printed by `brew list -1`. Consumers
//! read it lazily, one line at a time, in file order. Lines are kept as raw
//! bytes; the manifest is written verbatim from `brew` output and need not be
//! valid UTF-8.

use crate::error::{RebrewError, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Split};

/// Default manifest file name, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "brew_list.txt";

/// One package name from the manifest
///
/// Never empty, and never contains `"`, `\r` or `\n`, so it can always be
/// wrapped in a `brew "<name>"` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(Vec<u8>);

impl PackageName {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();

        let reason = if bytes.iter().all(u8::is_ascii_whitespace) {
            Some("name is empty")
        } else if bytes.contains(&b'"') {
            Some("name contains a double quote")
        } else if bytes.iter().any(|b| matches!(b, b'\n' | b'\r')) {
            Some("name contains a line break")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(RebrewError::InvalidPackageName {
                name: String::from_utf8_lossy(&bytes).into_owned(),
                reason,
            }),
            None => Ok(Self(bytes)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as text; invalid UTF-8 is replaced with U+FFFD
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl TryFrom<&str> for PackageName {
    type Error = RebrewError;

    fn try_from(name: &str) -> Result<Self> {
        Self::new(name.as_bytes())
    }
}

/// Sequential reader over the package names in a manifest
pub struct ManifestReader {
    path: PathBuf,
    lines: Split<BufReader<File>>,
}

impl ManifestReader {
    pub async fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .await
            .map_err(|e| RebrewError::persistence(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).split(b'\n'),
        })
    }

    /// Next package name, or `None` at end of file.
    ///
    /// Blank lines are skipped and a trailing `\r` is dropped. A line that is
    /// not a valid name yields `InvalidPackageName`; the reader has already
    /// moved past it, so scanning can continue.
    pub async fn next_package(&mut self) -> Result<Option<PackageName>> {
        loop {
            let line = self
                .lines
                .next_segment()
                .await
                .map_err(|e| RebrewError::persistence(&self.path, e))?;

            let Some(mut line) = line else {
                return Ok(None);
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return PackageName::new(line).map(Some);
        }
    }
}
