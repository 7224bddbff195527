use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::Result;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Connection settings for a Katana server.
///
/// Loaded from a JSON file such as `{"base_url": "http://katana:5000"}`.
/// Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
