//! Runtime configuration — tuning values and catalog loading.

use serde::{Deserialize, Serialize};
use stationcargo_logic::catalog::{validate_catalog, SupplyCatalog};

/// Tuning values for the trade economy, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoSettings {
    /// Credits in the station account at round start.
    pub starting_credits: i64,
    /// Countdown length for each shuttle leg, in seconds.
    pub shuttle_fly_duration: f32,
}

impl Default for CargoSettings {
    fn default() -> Self {
        Self {
            starting_credits: 1000,
            shuttle_fly_duration: 10.0,
        }
    }
}

impl CargoSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }
}

/// Parse and validate a supply catalog from its JSON configuration.
pub fn load_catalog(json: &str) -> Result<SupplyCatalog, ConfigError> {
    let catalog: SupplyCatalog = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    let problems = validate_catalog(&catalog);
    if problems.is_empty() {
        Ok(catalog)
    } else {
        Err(ConfigError::Invalid(problems))
    }
}

/// Errors from loading configuration files.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(problems) => {
                write!(f, "invalid config: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {}
