use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Errors that abort a compiler operation
#[derive(Error, Debug)]
pub enum CompilerError {
    /// Key is not of the form `g.<domain>.<node>`
    #[error("Invalid key (need g.<domain>.<node>): {0}")]
    InvalidKey(String),

    /// Grammar token is not of the form `[DOMAIN::NODE]`
    #[error("Invalid grammar (need [DOMAIN::NODE]): {0}")]
    InvalidGrammar(String),

    /// Translation table file is valid JSON but not a flat object
    #[error("{}: must be an object map", path.display())]
    TableFormat { path: PathBuf },

    /// File content could not be parsed as JSON
    #[error("Malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error on a named path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Base language requested for patching has no table
    #[error("base lang '{0}' not found in i18n dir")]
    UnknownBaseLang(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompilerError {
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }

    pub fn invalid_grammar(token: impl Into<String>) -> Self {
        Self::InvalidGrammar(token.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
