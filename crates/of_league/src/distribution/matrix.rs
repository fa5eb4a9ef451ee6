use rand::Rng;
use serde::Serialize;

use crate::error::{LeagueError, Result};
use crate::models::{MatchOutcome, Score};

/// Home/draw/away shares of the matrix weight, summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeShares {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

/// Unnormalized scoreline weights over `[0, max_goals] x [0, max_goals]`.
///
/// Flattened row-major with home goals as the major index, so `(0,0), (0,1),
/// ..., (0,G), (1,0), ...`. Sampling and `mode` resolve ties by this order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    side: usize,
    weights: Vec<f64>,
    total: f64,
}

impl ScoreMatrix {
    pub(crate) fn from_weights(side: usize, weights: Vec<f64>) -> Result<Self> {
        if side == 0 || weights.len() != side * side {
            return Err(LeagueError::InvalidInput(format!(
                "score matrix needs {} weights, got {}",
                side * side,
                weights.len()
            )));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(LeagueError::InvalidStrength(format!(
                "scoreline weight {} is not a finite non-negative number",
                bad
            )));
        }
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(LeagueError::InvalidStrength(format!(
                "scoreline weights sum to {}",
                total
            )));
        }
        Ok(Self {
            side,
            weights,
            total,
        })
    }

    pub fn max_goals(&self) -> u8 {
        (self.side - 1) as u8
    }

    pub fn weight(&self, home_goals: u8, away_goals: u8) -> Option<f64> {
        let (h, a) = (usize::from(home_goals), usize::from(away_goals));
        if h >= self.side || a >= self.side {
            return None;
        }
        Some(self.weights[h * self.side + a])
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// `(scoreline, weight)` in flattened order.
    pub fn iter(&self) -> impl Iterator<Item = (Score, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| (self.score_at(i), *w))
    }

    /// Heaviest scoreline; the first one in flattened order on ties.
    pub fn mode(&self) -> Score {
        let mut best = 0;
        for (i, w) in self.weights.iter().enumerate() {
            if *w > self.weights[best] {
                best = i;
            }
        }
        self.score_at(best)
    }

    pub fn outcome_shares(&self) -> OutcomeShares {
        let mut home = 0.0;
        let mut draw = 0.0;
        let mut away = 0.0;
        for (score, w) in self.iter() {
            match score.outcome() {
                MatchOutcome::HomeWin => home += w,
                MatchOutcome::Draw => draw += w,
                MatchOutcome::AwayWin => away += w,
            }
        }
        OutcomeShares {
            home: home / self.total,
            draw: draw / self.total,
            away: away / self.total,
        }
    }

    /// Weighted draw by cumulative-sum inversion.
    ///
    /// Draws `x` uniformly from `[0, total)` and returns the first scoreline
    /// with positive weight whose cumulative weight is `>= x`. Weights are
    /// used as-is, never normalized.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Score {
        let cumulative: Vec<f64> = self
            .weights
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        let draw = rng.gen_range(0.0..self.total);
        let last = self.weights.len() - 1;
        let start = cumulative.partition_point(|c| *c < draw).min(last);
        // zero-weight cells share the cumulative value of the cell before them
        let index = self.weights[start..]
            .iter()
            .position(|w| *w > 0.0)
            .map(|offset| start + offset)
            .or_else(|| self.weights.iter().rposition(|w| *w > 0.0))
            .unwrap_or(last);
        self.score_at(index)
    }

    fn score_at(&self, index: usize) -> Score {
        Score::new((index / self.side) as u8, (index % self.side) as u8)
    }
}
