use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },
}
