use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// Final scoreline. Goals never exceed the configured `max_goals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home_goals: u8,
    pub away_goals: u8,
}

impl Score {
    pub fn new(home_goals: u8, away_goals: u8) -> Self {
        Self {
            home_goals,
            away_goals,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        if self.home_goals > self.away_goals {
            MatchOutcome::HomeWin
        } else if self.home_goals < self.away_goals {
            MatchOutcome::AwayWin
        } else {
            MatchOutcome::Draw
        }
    }

    pub fn total_goals(&self) -> u32 {
        u32::from(self.home_goals) + u32::from(self.away_goals)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.home_goals, self.away_goals)
    }
}
