//! # Simulation Configuration
//!
//! Calibration constants for the strength model and the score distribution.
//! Every constant is a configuration input; nothing here is derived from data.
//!
//! ## 사용법
//! ```rust
//! use of_league::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! assert!(config.validate().is_ok());
//! ```

mod score_model_config;
mod strength_config;

pub use score_model_config::{
    JointWeighting, ScoreModelConfig, MAX_ABS_THETA, MAX_SUPPORTED_GOALS,
};
pub use strength_config::{DefenseWeights, StrengthConfig};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub score: ScoreModelConfig,
    #[serde(default)]
    pub strength: StrengthConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.score.validate()?;
        self.strength.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: SimulationConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: SimulationConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ========== Tests ==========
