//! # of_league - League Calendar & Match Score Simulation
//!
//! Builds a season's fixture calendar for a set of clubs and produces a final
//! score for every fixture from the clubs' player-derived strength ratings.
//!
//! ## Features
//! - Single and double round-robin calendars (circle method), any club count
//! - Attack/defense ratings from per-player skill records
//! - Weibull marginals coupled by a Frank copula, sampled per fixture
//! - 100% deterministic (same club order + same seed = same season)
//! - Fixtures simulated in parallel, one RNG stream per fixture
//!
//! ## Usage
//! ```rust
//! use of_league::{ClubId, RoundRobinScheduler};
//!
//! let clubs: Vec<ClubId> = (1..=4).map(ClubId).collect();
//! let schedule = RoundRobinScheduler::single_round_robin(&clubs).unwrap();
//! assert_eq!(schedule.round_count(), 3);
//! assert_eq!(schedule.fixture_count(), 6);
//! ```

// Loop style - index loops read closer to the matrix math
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod distribution;
pub mod error;
pub mod models;
pub mod schedule;
pub mod season;
pub mod strength;

pub use config::{
    DefenseWeights, JointWeighting, ScoreModelConfig, SimulationConfig, StrengthConfig,
};
pub use distribution::{MatchRates, OutcomeShares, ScoreDistribution, ScoreMatrix};
pub use error::{LeagueError, Result};
pub use models::{
    ClubId, Fixture, MatchOutcome, PlayerSkillRecord, Position, RequiredRole, Role, Round,
    Schedule, ScheduleFormat, Score, SkillCategory, Squad, SquadPlayer,
};
pub use schedule::RoundRobinScheduler;
pub use season::{
    fixture_rng, shuffled_clubs, FixtureResult, SeasonResults, SeasonSimulator, SquadSource,
};
pub use strength::{Strength, StrengthModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
