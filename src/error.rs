// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("Query error for {lang}: {message}")]
    Query { lang: &'static str, message: String },

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

impl MapError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        MapError::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MapError::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to MapError::Io with unknown path.
impl From<std::io::Error> for MapError {
    fn from(source: std::io::Error) -> Self {
        MapError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
