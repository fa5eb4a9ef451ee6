//! Season orchestration
//!
//! Plays every fixture of a [`Schedule`] through the strength model and the
//! score distribution. Each fixture draws from its own ChaCha stream derived
//! from the season seed and the fixture's position in the schedule, so the
//! results do not depend on thread count or evaluation order.

use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::config::SimulationConfig;
use crate::distribution::ScoreDistribution;
use crate::error::{LeagueError, Result};
use crate::models::{ClubId, Fixture, Schedule, Score, Squad};
use crate::strength::StrengthModel;

/// Fixture counts above this are simulated on the rayon pool.
const PARALLEL_THRESHOLD: usize = 64;

/// Squad lookup provided by the entity graph.
pub trait SquadSource {
    fn squad(&self, club: ClubId) -> Option<&Squad>;
}

impl<S: BuildHasher> SquadSource for HashMap<ClubId, Squad, S> {
    fn squad(&self, club: ClubId) -> Option<&Squad> {
        self.get(&club)
    }
}

impl SquadSource for BTreeMap<ClubId, Squad> {
    fn squad(&self, club: ClubId) -> Option<&Squad> {
        self.get(&club)
    }
}

/// Child RNG for one fixture: season seed picks the key, fixture index the stream.
pub fn fixture_rng(season_seed: u64, fixture_index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(season_seed);
    rng.set_stream(fixture_index);
    rng
}

/// Seeded shuffle for callers that want a random calendar order.
pub fn shuffled_clubs(clubs: &[ClubId], seed: u64) -> Vec<ClubId> {
    let mut order = clubs.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixtureResult {
    pub round: usize,
    /// Position of the fixture in schedule order, also its RNG stream.
    pub index: usize,
    pub fixture: Fixture,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonResults {
    pub seed: u64,
    pub results: Vec<FixtureResult>,
}

impl SeasonResults {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results_for(&self, club: ClubId) -> impl Iterator<Item = &FixtureResult> + '_ {
        self.results.iter().filter(move |r| r.fixture.involves(club))
    }

    pub fn goals_scored(&self, club: ClubId) -> u32 {
        self.results_for(club)
            .map(|r| {
                if r.fixture.home() == club {
                    u32::from(r.score.home_goals)
                } else {
                    u32::from(r.score.away_goals)
                }
            })
            .sum()
    }

    pub fn goals_conceded(&self, club: ClubId) -> u32 {
        self.results_for(club)
            .map(|r| {
                if r.fixture.home() == club {
                    u32::from(r.score.away_goals)
                } else {
                    u32::from(r.score.home_goals)
                }
            })
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct SeasonSimulator {
    strength: StrengthModel,
    distribution: ScoreDistribution,
    seed: u64,
}

impl SeasonSimulator {
    pub fn new(config: &SimulationConfig, seed: u64) -> Result<Self> {
        Ok(Self {
            strength: StrengthModel::new(config.strength.clone())?,
            distribution: ScoreDistribution::new(config.score.clone())?,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Strengths are recomputed from the current squads on every call.
    pub fn simulate_fixture<S: SquadSource + ?Sized>(
        &self,
        fixture: Fixture,
        index: usize,
        squads: &S,
    ) -> Result<Score> {
        let home_squad = squads
            .squad(fixture.home())
            .ok_or(LeagueError::UnknownClub(fixture.home()))?;
        let away_squad = squads
            .squad(fixture.away())
            .ok_or(LeagueError::UnknownClub(fixture.away()))?;

        let home = self.strength.strength(home_squad)?;
        let away = self.strength.strength(away_squad)?;

        let mut rng = fixture_rng(self.seed, index as u64);
        self.distribution.sample_score(home, away, &mut rng)
    }

    /// Plays the whole schedule. Fails on the first fixture that fails, with
    /// no partial results.
    pub fn simulate<S: SquadSource + Sync + ?Sized>(
        &self,
        schedule: &Schedule,
        squads: &S,
    ) -> Result<SeasonResults> {
        let jobs: Vec<(usize, Fixture)> = schedule
            .rounds()
            .iter()
            .flat_map(|round| round.fixtures().iter().map(move |f| (round.index(), *f)))
            .collect();

        let play = |index: usize, round: usize, fixture: Fixture| -> Result<FixtureResult> {
            let score = self.simulate_fixture(fixture, index, squads)?;
            Ok(FixtureResult {
                round,
                index,
                fixture,
                score,
            })
        };

        let results = if jobs.len() > PARALLEL_THRESHOLD {
            jobs.par_iter()
                .enumerate()
                .map(|(index, (round, fixture))| play(index, *round, *fixture))
                .collect::<Result<Vec<_>>>()?
        } else {
            jobs.iter()
                .enumerate()
                .map(|(index, (round, fixture))| play(index, *round, *fixture))
                .collect::<Result<Vec<_>>>()?
        };

        let goals: u32 = results.iter().map(|r| r.score.total_goals()).sum();
        debug!(
            "season seed={} simulated {} fixtures, {} goals",
            self.seed,
            results.len(),
            goals
        );

        Ok(SeasonResults {
            seed: self.seed,
            results,
        })
    }
}
