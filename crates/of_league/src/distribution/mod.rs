//! # Score Distribution
//!
//! Turns two clubs' strengths into a weighted scoreline matrix and samples a
//! final score from it.
//!
//! ## Pipeline
//! ```text
//!  Strength(home), Strength(away)
//!     │  attack vs opposing defense as competing shares
//!     ▼
//!  MatchRates      rate = exp(-exp(U [+ HOME_EFFECT] + attack - defense))
//!     │
//!     ▼
//!  weibull_cdf     one CDF per side over 0..=max_goals
//!     │
//!     ▼
//!  frank_copula    joint value for every (home, away) pair
//!     │
//!     ▼
//!  ScoreMatrix ──► sample(rng) ──► Score
//! ```
//!
//! A lower rate spreads a side's CDF over more goals, so stronger attacks get
//! lower rates.

pub mod copula;
pub mod marginal;
pub mod matrix;

pub use copula::frank_copula;
pub use marginal::weibull_cdf;
pub use matrix::{OutcomeShares, ScoreMatrix};

use log::trace;
use rand::Rng;
use serde::Serialize;

use crate::config::{JointWeighting, ScoreModelConfig};
use crate::error::{LeagueError, Result};
use crate::models::Score;
use crate::strength::Strength;

/// Weibull rates for the two sides of one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchRates {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreDistribution {
    config: ScoreModelConfig,
}

impl ScoreDistribution {
    pub fn new(config: ScoreModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoreModelConfig {
        &self.config
    }

    /// Log-linear rates from normalized strengths.
    ///
    /// Each attack competes with the opposing defense: `share = attack /
    /// (attack + defense)` (0.5 when both are zero). The attack enters as
    /// `+share`, the defense as the non-positive effect `-(1 - share)`, so
    /// the absolute rating scale never reaches the exponent.
    pub fn match_rates(&self, home: Strength, away: Strength) -> Result<MatchRates> {
        check_strength("home", home)?;
        check_strength("away", away)?;

        let home_share = attack_share(home.attack, away.defense);
        let away_share = attack_share(away.attack, home.defense);

        let home_log = self.config.u + self.config.home_effect + home_share - (1.0 - home_share);
        let away_log = self.config.u + away_share - (1.0 - away_share);

        let rates = MatchRates {
            home: (-home_log.exp()).exp(),
            away: (-away_log.exp()).exp(),
        };
        check_rate("home", rates.home)?;
        check_rate("away", rates.away)?;

        trace!(
            "rates home={:.4} away={:.4} (shares {:.3}/{:.3})",
            rates.home,
            rates.away,
            home_share,
            away_share
        );
        Ok(rates)
    }

    pub fn marginal_cdf(&self, rate: f64) -> Result<Vec<f64>> {
        check_rate("side", rate)?;
        Ok(weibull_cdf(rate, self.config.shape, self.config.max_goals))
    }

    pub fn joint_matrix(&self, home: Strength, away: Strength) -> Result<ScoreMatrix> {
        let rates = self.match_rates(home, away)?;
        let home_cdf = self.marginal_cdf(rates.home)?;
        let away_cdf = self.marginal_cdf(rates.away)?;
        let theta = self.config.theta;
        let side = self.config.goal_range();

        let mut weights = Vec::with_capacity(side * side);
        for h in 0..side {
            for a in 0..side {
                let weight = match self.config.weighting {
                    JointWeighting::Cumulative => frank_copula(home_cdf[h], away_cdf[a], theta),
                    JointWeighting::Mass => {
                        let p = home_cdf[h];
                        let q = away_cdf[a];
                        let p_prev = if h == 0 { 0.0 } else { home_cdf[h - 1] };
                        let q_prev = if a == 0 { 0.0 } else { away_cdf[a - 1] };
                        let mass = frank_copula(p, q, theta)
                            - frank_copula(p_prev, q, theta)
                            - frank_copula(p, q_prev, theta)
                            + frank_copula(p_prev, q_prev, theta);
                        // rounding can leave tiny negatives
                        mass.max(0.0)
                    }
                };
                weights.push(weight);
            }
        }

        ScoreMatrix::from_weights(side, weights)
    }

    /// Sample one scoreline. Both goal counts are within `0..=max_goals`.
    pub fn sample_score<R: Rng + ?Sized>(
        &self,
        home: Strength,
        away: Strength,
        rng: &mut R,
    ) -> Result<Score> {
        let matrix = self.joint_matrix(home, away)?;
        Ok(matrix.sample(rng))
    }
}

fn attack_share(attack: f64, defense: f64) -> f64 {
    let total = attack + defense;
    if total > 0.0 {
        attack / total
    } else {
        0.5
    }
}

fn check_strength(side: &str, strength: Strength) -> Result<()> {
    for (name, value) in [("attack", strength.attack), ("defense", strength.defense)] {
        if !value.is_finite() || value < 0.0 {
            return Err(LeagueError::InvalidStrength(format!(
                "{} {} is {}",
                side, name, value
            )));
        }
    }
    Ok(())
}

fn check_rate(side: &str, rate: f64) -> Result<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(LeagueError::InvalidStrength(format!(
            "{} rate is {}",
            side, rate
        )))
    }
}
