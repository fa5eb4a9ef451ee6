//! Score Model Configuration

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};

/// Largest goal bound a config may declare.
pub const MAX_SUPPORTED_GOALS: u8 = 20;

/// Largest copula |theta|. Past it `e^{-theta} - 1` rounds to -1 (positive
/// theta) or the factor product heads for overflow (negative theta).
pub const MAX_ABS_THETA: f64 = 30.0;

/// How copula values become scoreline weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JointWeighting {
    /// The joint CDF value at each scoreline is its weight.
    #[default]
    Cumulative,
    /// Joint CDF differenced over each scoreline cell, a true probability mass.
    Mass,
}

/// 스코어 분포 보정 상수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreModelConfig {
    /// 기본 로그 득점률 오프셋 (기본: -0.47)
    #[serde(alias = "U")]
    pub u: f64,
    /// 홈 어드밴티지 (기본: 0.10)
    #[serde(alias = "homeEffect")]
    pub home_effect: f64,
    /// Weibull shape (기본: 1.5)
    pub shape: f64,
    /// Frank copula theta, negative for anti-correlated sides (기본: -0.4)
    pub theta: f64,
    /// 지원하는 최대 골 수 (기본: 9)
    #[serde(alias = "maxGoals")]
    pub max_goals: u8,
    #[serde(default)]
    pub weighting: JointWeighting,
}

impl Default for ScoreModelConfig {
    fn default() -> Self {
        Self {
            u: -0.47,
            home_effect: 0.10,
            shape: 1.5,
            theta: -0.4,
            max_goals: 9,
            weighting: JointWeighting::Cumulative,
        }
    }
}

impl ScoreModelConfig {
    /// Same constants, weighted by per-scoreline probability mass.
    pub fn mass_weighted() -> Self {
        Self {
            weighting: JointWeighting::Mass,
            ..Self::default()
        }
    }

    /// Scorelines per side, `0..=max_goals`.
    pub fn goal_range(&self) -> usize {
        usize::from(self.max_goals) + 1
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("u", self.u),
            ("home_effect", self.home_effect),
            ("shape", self.shape),
            ("theta", self.theta),
        ] {
            if !value.is_finite() {
                return Err(LeagueError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.shape <= 0.0 {
            return Err(LeagueError::InvalidConfig(format!(
                "shape must be positive, got {}",
                self.shape
            )));
        }
        if self.theta.abs() > MAX_ABS_THETA {
            return Err(LeagueError::InvalidConfig(format!(
                "theta must be within -{max}..={max}, got {}",
                self.theta,
                max = MAX_ABS_THETA
            )));
        }
        if self.max_goals == 0 || self.max_goals > MAX_SUPPORTED_GOALS {
            return Err(LeagueError::InvalidConfig(format!(
                "max_goals must be within 1..={}, got {}",
                MAX_SUPPORTED_GOALS, self.max_goals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = ScoreModelConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.goal_range(), 10);
        assert_eq!(cfg.weighting, JointWeighting::Cumulative);
        assert_eq!(ScoreModelConfig::mass_weighted().weighting, JointWeighting::Mass);
    }

    #[test]
    fn test_rejects_bad_constants() {
        let mut cfg = ScoreModelConfig::default();
        cfg.shape = 0.0;
        assert!(matches!(cfg.validate(), Err(LeagueError::InvalidConfig(_))));

        let mut cfg = ScoreModelConfig::default();
        cfg.theta = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = ScoreModelConfig::default();
        cfg.max_goals = MAX_SUPPORTED_GOALS + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_extreme_theta_rejected() {
        for theta in [-800.0, -30.5, 800.0] {
            let cfg = ScoreModelConfig {
                theta,
                ..ScoreModelConfig::default()
            };
            assert!(matches!(cfg.validate(), Err(LeagueError::InvalidConfig(_))));
        }
        let cfg = ScoreModelConfig {
            theta: -MAX_ABS_THETA,
            ..ScoreModelConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_external_option_names() {
        let json = r#"{"U": -0.3, "homeEffect": 0.2, "shape": 1.2, "theta": -1.0, "maxGoals": 7}"#;
        let cfg: ScoreModelConfig = serde_json::from_str(json).unwrap();
        assert!((cfg.u + 0.3).abs() < 1e-12);
        assert!((cfg.home_effect - 0.2).abs() < 1e-12);
        assert_eq!(cfg.max_goals, 7);
        assert_eq!(cfg.weighting, JointWeighting::Cumulative);
    }
}
