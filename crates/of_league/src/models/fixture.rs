//! Fixture calendar types.
//!
//! A [`Schedule`] is built once per season by the round-robin scheduler and is
//! read-only afterwards; fields are private and only accessors are exposed.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::club::ClubId;
use crate::error::{LeagueError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fixture {
    home: ClubId,
    away: ClubId,
}

impl Fixture {
    pub fn new(home: ClubId, away: ClubId) -> Result<Self> {
        if home == away {
            return Err(LeagueError::InvalidInput(format!(
                "{} cannot play itself",
                home
            )));
        }
        Ok(Self { home, away })
    }

    pub fn home(&self) -> ClubId {
        self.home
    }

    pub fn away(&self) -> ClubId {
        self.away
    }

    /// Same pairing with home and away swapped.
    pub fn reversed(&self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }

    pub fn involves(&self, club: ClubId) -> bool {
        self.home == club || self.away == club
    }

    /// Unordered key, smaller id first.
    pub fn pair(&self) -> (ClubId, ClubId) {
        if self.home < self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    index: usize,
    fixtures: Vec<Fixture>,
    bye: Option<ClubId>,
}

impl Round {
    pub(crate) fn new(index: usize, fixtures: Vec<Fixture>, bye: Option<ClubId>) -> Self {
        Self {
            index,
            fixtures,
            bye,
        }
    }

    /// 0-based position of the round in the season.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Club sitting this round out (odd club counts only).
    pub fn bye(&self) -> Option<ClubId> {
        self.bye
    }

    pub fn contains(&self, club: ClubId) -> bool {
        self.fixtures.iter().any(|f| f.involves(club))
    }

    /// Copy of this round with every fixture reversed, re-indexed.
    pub(crate) fn mirrored(&self, index: usize) -> Self {
        Self {
            index,
            fixtures: self.fixtures.iter().map(Fixture::reversed).collect(),
            bye: self.bye,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduleFormat {
    Single,
    Double,
}

impl ScheduleFormat {
    /// How many times each unordered pair meets.
    pub fn meetings(&self) -> usize {
        match self {
            ScheduleFormat::Single => 1,
            ScheduleFormat::Double => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    format: ScheduleFormat,
    rounds: Vec<Round>,
}

impl Schedule {
    pub(crate) fn new(format: ScheduleFormat, rounds: Vec<Round>) -> Self {
        Self { format, rounds }
    }

    pub fn format(&self) -> ScheduleFormat {
        self.format
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// All fixtures in round order.
    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> + '_ {
        self.rounds.iter().flat_map(|r| r.fixtures.iter())
    }

    pub fn fixture_count(&self) -> usize {
        self.rounds.iter().map(|r| r.fixtures.len()).sum()
    }

    /// `(round index, fixture)` for every fixture the club plays.
    pub fn fixtures_for(&self, club: ClubId) -> Vec<(usize, Fixture)> {
        self.rounds
            .iter()
            .flat_map(|r| {
                r.fixtures
                    .iter()
                    .filter(move |f| f.involves(club))
                    .map(move |f| (r.index, *f))
            })
            .collect()
    }

    /// Indices of the rounds in which the club is idle.
    pub fn byes_for(&self, club: ClubId) -> Vec<usize> {
        self.rounds
            .iter()
            .filter(|r| r.bye == Some(club))
            .map(|r| r.index)
            .collect()
    }

    pub fn home_count(&self, club: ClubId) -> usize {
        self.fixtures().filter(|f| f.home == club).count()
    }

    /// Rounds of the first half of the season. For a single round-robin this is
    /// the whole schedule.
    pub fn first_leg(&self) -> &[Round] {
        match self.format {
            ScheduleFormat::Single => &self.rounds,
            ScheduleFormat::Double => &self.rounds[..self.rounds.len() / 2],
        }
    }

    /// Mirrored rounds; empty for a single round-robin.
    pub fn second_leg(&self) -> &[Round] {
        match self.format {
            ScheduleFormat::Single => &[],
            ScheduleFormat::Double => &self.rounds[self.rounds.len() / 2..],
        }
    }

    /// Re-checks the calendar invariants against the club list it was built from.
    ///
    /// - round count is N-1 (even N) or N (odd N) per leg
    /// - no club appears twice in a round, odd N leaves exactly one club idle
    ///   and the round's bye names it, even N has no bye
    /// - every unordered pair meets exactly once in the first leg
    /// - second-leg round `i` is first-leg round `i` with every fixture reversed
    pub fn verify(&self, clubs: &[ClubId]) -> Result<()> {
        let n = clubs.len();
        let roster: BTreeSet<ClubId> = clubs.iter().copied().collect();
        if roster.len() != n || n < 2 {
            return Err(LeagueError::InvalidInput(
                "club list must hold at least 2 distinct clubs".to_string(),
            ));
        }

        let legs = self.format.meetings();
        let per_leg = if n % 2 == 0 { n - 1 } else { n };
        if self.rounds.len() != per_leg * legs {
            return Err(LeagueError::InvalidInput(format!(
                "expected {} rounds, found {}",
                per_leg * legs,
                self.rounds.len()
            )));
        }

        for round in &self.rounds {
            verify_round(round, &roster)?;
        }

        let mut pairs: BTreeMap<(ClubId, ClubId), usize> = BTreeMap::new();
        for round in self.first_leg() {
            for fixture in &round.fixtures {
                *pairs.entry(fixture.pair()).or_insert(0) += 1;
            }
        }
        for (i, a) in clubs.iter().enumerate() {
            for b in &clubs[i + 1..] {
                let key = if a < b { (*a, *b) } else { (*b, *a) };
                let met = pairs.get(&key).copied().unwrap_or(0);
                if met != 1 {
                    return Err(LeagueError::InvalidInput(format!(
                        "{} and {} meet {} times in the first leg",
                        a, b, met
                    )));
                }
            }
        }

        for (first, second) in self.first_leg().iter().zip(self.second_leg()) {
            let mirrored = first.fixtures.len() == second.fixtures.len()
                && first
                    .fixtures
                    .iter()
                    .zip(&second.fixtures)
                    .all(|(f, s)| f.reversed() == *s);
            if !mirrored || first.bye != second.bye {
                return Err(LeagueError::InvalidInput(format!(
                    "round {} does not mirror round {}",
                    second.index, first.index
                )));
            }
        }

        let expected_fixtures = n * (n - 1) / 2 * legs;
        if self.fixture_count() != expected_fixtures {
            return Err(LeagueError::InvalidInput(format!(
                "expected {} fixtures, found {}",
                expected_fixtures,
                self.fixture_count()
            )));
        }

        Ok(())
    }
}

fn verify_round(round: &Round, roster: &BTreeSet<ClubId>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for fixture in &round.fixtures {
        for club in [fixture.home, fixture.away] {
            if !roster.contains(&club) {
                return Err(LeagueError::InvalidInput(format!(
                    "round {} lists unknown {}",
                    round.index, club
                )));
            }
            if !seen.insert(club) {
                return Err(LeagueError::InvalidInput(format!(
                    "{} plays twice in round {}",
                    club, round.index
                )));
            }
        }
    }

    let idle: Vec<ClubId> = roster.difference(&seen).copied().collect();
    if idle.len() != roster.len() % 2 {
        return Err(LeagueError::InvalidInput(format!(
            "round {} leaves {} clubs idle",
            round.index,
            idle.len()
        )));
    }
    if round.bye != idle.first().copied() {
        return Err(LeagueError::InvalidInput(format!(
            "round {} records bye {:?}, idle club is {:?}",
            round.index,
            round.bye,
            idle.first()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_rejects_self_match() {
        assert!(matches!(
            Fixture::new(ClubId(1), ClubId(1)),
            Err(LeagueError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fixture_reversed_and_pair() {
        let f = Fixture::new(ClubId(5), ClubId(2)).unwrap();
        let r = f.reversed();
        assert_eq!(r.home(), ClubId(2));
        assert_eq!(r.away(), ClubId(5));
        assert_eq!(f.pair(), r.pair());
        assert!(f.involves(ClubId(2)));
        assert!(!f.involves(ClubId(3)));
    }

    #[test]
    fn test_verify_catches_repeated_club() {
        let a = ClubId(1);
        let b = ClubId(2);
        let c = ClubId(3);
        let d = ClubId(4);
        let f = |h, w| Fixture::new(h, w).unwrap();
        // Round 0 lists club 1 twice.
        let schedule = Schedule::new(
            ScheduleFormat::Single,
            vec![
                Round::new(0, vec![f(a, b), f(a, c)], None),
                Round::new(1, vec![f(a, d), f(b, c)], None),
                Round::new(2, vec![f(b, d), f(c, d)], None),
            ],
        );
        let err = schedule.verify(&[a, b, c, d]).unwrap_err();
        assert!(err.to_string().contains("plays twice"));
    }

    fn leg(rounds: &[(Vec<(u32, u32)>, Option<u32>)], offset: usize) -> Vec<Round> {
        rounds
            .iter()
            .enumerate()
            .map(|(i, (fixtures, bye))| {
                let fixtures = fixtures
                    .iter()
                    .map(|(h, a)| Fixture::new(ClubId(*h), ClubId(*a)).unwrap())
                    .collect();
                Round::new(offset + i, fixtures, bye.map(ClubId))
            })
            .collect()
    }

    fn three_clubs() -> Vec<ClubId> {
        vec![ClubId(1), ClubId(2), ClubId(3)]
    }

    #[test]
    fn test_verify_accepts_valid_three_club_double() {
        let first = leg(
            &[
                (vec![(1, 2)], Some(3)),
                (vec![(3, 1)], Some(2)),
                (vec![(2, 3)], Some(1)),
            ],
            0,
        );
        let second: Vec<Round> = first
            .iter()
            .enumerate()
            .map(|(i, r)| r.mirrored(3 + i))
            .collect();
        let schedule = Schedule::new(ScheduleFormat::Double, [first, second].concat());
        assert!(schedule.verify(&three_clubs()).is_ok());
    }

    #[test]
    fn test_verify_catches_pair_repeated_within_first_leg() {
        // 1 meets 2 twice and 2 never meets 3 before the second leg.
        let first = leg(
            &[
                (vec![(1, 2)], Some(3)),
                (vec![(2, 1)], Some(3)),
                (vec![(1, 3)], Some(2)),
            ],
            0,
        );
        let second: Vec<Round> = first
            .iter()
            .enumerate()
            .map(|(i, r)| r.mirrored(3 + i))
            .collect();
        let schedule = Schedule::new(ScheduleFormat::Double, [first, second].concat());
        let err = schedule.verify(&three_clubs()).unwrap_err();
        assert!(err.to_string().contains("first leg"), "{}", err);
    }

    #[test]
    fn test_verify_catches_missing_bye() {
        let schedule = Schedule::new(
            ScheduleFormat::Single,
            leg(
                &[
                    (vec![(1, 2)], None),
                    (vec![(3, 1)], None),
                    (vec![(2, 3)], None),
                ],
                0,
            ),
        );
        let err = schedule.verify(&three_clubs()).unwrap_err();
        assert!(err.to_string().contains("records bye"), "{}", err);
    }

    #[test]
    fn test_verify_catches_wrong_bye_club() {
        let schedule = Schedule::new(
            ScheduleFormat::Single,
            leg(
                &[
                    (vec![(1, 2)], Some(3)),
                    (vec![(3, 1)], Some(3)),
                    (vec![(2, 3)], Some(1)),
                ],
                0,
            ),
        );
        let err = schedule.verify(&three_clubs()).unwrap_err();
        assert!(err.to_string().contains("round 1 records bye"), "{}", err);
    }

    #[test]
    fn test_verify_catches_bye_with_even_clubs() {
        let schedule = Schedule::new(
            ScheduleFormat::Single,
            leg(&[(vec![(1, 2)], Some(1))], 0),
        );
        assert!(schedule.verify(&[ClubId(1), ClubId(2)]).is_err());
    }

    #[test]
    fn test_verify_catches_second_leg_out_of_order() {
        let clubs: Vec<ClubId> = (1..=4).map(ClubId).collect();
        let first = crate::schedule::RoundRobinScheduler::single_round_robin(&clubs)
            .unwrap()
            .rounds()
            .to_vec();
        // Every ordered pair still appears once, but second-leg rounds are shuffled.
        let second: Vec<Round> = first
            .iter()
            .rev()
            .enumerate()
            .map(|(i, r)| r.mirrored(first.len() + i))
            .collect();
        let schedule = Schedule::new(ScheduleFormat::Double, [first, second].concat());
        let err = schedule.verify(&clubs).unwrap_err();
        assert!(err.to_string().contains("does not mirror"), "{}", err);
    }
}
