use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebrewError {
    #[error("error running '{command}': {message}")]
    ExternalCommand { command: String, message: String },

    #[error("error accessing {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected output from 'brew info {package}': {output}")]
    UnexpectedOutput { package: String, output: String },

    #[error("invalid package name {name:?}: {reason}")]
    InvalidPackageName { name: String, reason: &'static str },

    #[error("invalid choice: {0}")]
    InvalidChoice(i64),

    #[error("error reading choice: {0}")]
    Input(String),

    #[error("worker task failed: {0}")]
    Worker(String),
}

impl RebrewError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RebrewError>;
