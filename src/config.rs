use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::codec::DecodePolicy;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file
pub const CONFIG_PATH_VAR: &str = "AUTOSKETCH_CONFIG";
/// Environment variable overriding [`AppConfig::endpoint`]
pub const ENDPOINT_VAR: &str = "AUTOSKETCH_ENDPOINT";

/// Settings for the auto-correct round trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to defaults
pub struct AppConfig {
    /// Base URL of the service; `/upload_csv` is appended
    pub endpoint: String,
    /// Width given to strokes loaded from a table
    pub stroke_width: f32,
    pub decode_policy: DecodePolicy,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_owned(),
            stroke_width: 1.0,
            decode_policy: DecodePolicy::default(),
            max_response_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Defaults, then the file named by `AUTOSKETCH_CONFIG`, then `AUTOSKETCH_ENDPOINT`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload_csv", self.endpoint.trim_end_matches('/'))
    }
}
