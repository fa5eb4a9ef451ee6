//! Strength Model Configuration

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};

/// 수비력 가중치 (골키퍼 / 수비수)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseWeights {
    /// 골키퍼 가중치 (기본: 0.4)
    pub goalkeeper: f64,
    /// 수비수 가중치 (기본: 0.6)
    pub defenders: f64,
}

impl Default for DefenseWeights {
    fn default() -> Self {
        Self {
            goalkeeper: 0.4,
            defenders: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthConfig {
    #[serde(alias = "defenseWeights")]
    pub defense_weights: DefenseWeights,
    /// Leading squad entries treated as the starting lineup (기본: 11)
    #[serde(default = "default_lineup_size", alias = "lineupSize")]
    pub lineup_size: usize,
}

fn default_lineup_size() -> usize {
    11
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            defense_weights: DefenseWeights::default(),
            lineup_size: default_lineup_size(),
        }
    }
}

impl StrengthConfig {
    pub fn validate(&self) -> Result<()> {
        let w = &self.defense_weights;
        if !w.goalkeeper.is_finite() || !w.defenders.is_finite() {
            return Err(LeagueError::InvalidConfig(
                "defense weights must be finite".to_string(),
            ));
        }
        if w.goalkeeper < 0.0 || w.defenders < 0.0 {
            return Err(LeagueError::InvalidConfig(format!(
                "defense weights must be non-negative, got goalkeeper={} defenders={}",
                w.goalkeeper, w.defenders
            )));
        }
        if w.goalkeeper + w.defenders <= 0.0 {
            return Err(LeagueError::InvalidConfig(
                "defense weights must not both be zero".to_string(),
            ));
        }
        if self.lineup_size == 0 {
            return Err(LeagueError::InvalidConfig(
                "lineup_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
