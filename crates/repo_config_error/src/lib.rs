// crates/repo_config_error/src/lib.rs

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a failure, used by callers that only need to know
/// which family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Io,
    Input,
}

/// Errors produced while loading, reconciling, editing or persisting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {what} '{}': {source}", path.display())]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {source}")]
    Input {
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    pub fn parse(what: &'static str, path: &Path, source: serde_json::Error) -> Self {
        ConfigError::Parse {
            what,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ConfigError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn input(source: io::Error) -> Self {
        ConfigError::Input { source }
    }

    /// The input stream closed while a line was expected.
    pub fn end_of_input() -> Self {
        ConfigError::Input {
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "unexpected end of input"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NotFound { .. } => ErrorKind::NotFound,
            ConfigError::Parse { .. } => ErrorKind::Parse,
            ConfigError::Io { .. } => ErrorKind::Io,
            ConfigError::Input { .. } => ErrorKind::Input,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
