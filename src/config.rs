use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResultsError;
use crate::store::LAST_ANALYSIS_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory backing the session slots
    pub store_dir: PathBuf,
    /// Slot holding the last analysis
    pub key: String,
    /// Address for `serve`
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("./data/session"),
            key: LAST_ANALYSIS_KEY.to_string(),
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Read a TOML config; fields it leaves out keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ResultsError> {
        let Some(path) = path else { return Ok(Self::default()) };
        let contents = fs::read_to_string(path)
            .map_err(|source| ResultsError::ConfigRead { path: path.to_path_buf(), source })?;
        toml::from_str(&contents).map_err(|source| ResultsError::ConfigParse { path: path.to_path_buf(), source })
    }
}
