use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::models::NoteParameters;
use crate::simulation::MonteCarloConfig;

/// A run description as read from a TOML document.
///
/// ```toml
/// [note]
/// maturity_years = 5
/// coupon_annual = 0.147
///
/// [monte_carlo]
/// nr_paths = 200000
/// seed = 42
/// ```
///
/// Missing keys fall back to their defaults; `[monte_carlo]` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    pub note: NoteParameters,
    pub monte_carlo: Option<MonteCarloConfig>,
}

impl NoteConfig {
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: NoteConfig =
            toml::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.note.validate()?;
        if let Some(mc) = &self.monte_carlo {
            mc.validate()?;
        }
        Ok(())
    }
}
