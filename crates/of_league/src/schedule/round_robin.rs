//! Round-robin calendar (circle method)
//!
//! 클럽 목록 순서가 같으면 항상 같은 일정이 나온다. 무작위 순서가 필요하면
//! 호출 전에 섞는다 (`season::shuffled_clubs`).
//!
//! ## Layout
//! ```text
//!   slot 0 (anchor, fixed)      ring[0] ring[1] ... ring[m-1]   (m = N' - 1)
//!
//!   round r: ring entry i sits at circle[(i + r) % m]
//!            teams = [anchor, circle[0], ..., circle[m-1]]
//!            pair teams[k] with teams[N' - 1 - k] for k in 0..N'/2
//! ```
//! An odd club count appends one empty slot; whoever is paired with it sits
//! the round out. The empty slot lives on the ring, so it meets every club
//! exactly once and the bye moves to a different club each round.
//!
//! ## Home/away rule
//! - anchor pair: the anchor hosts on even rounds, travels on odd rounds
//! - every other pair: `teams[k]` (the upper half of the circle) hosts
//!
//! Each club's home and away counts differ by at most one over a single
//! round-robin.

use log::debug;
use std::collections::HashSet;

use crate::error::{LeagueError, Result};
use crate::models::{ClubId, Fixture, Round, Schedule, ScheduleFormat};

pub struct RoundRobinScheduler;

impl RoundRobinScheduler {
    pub fn schedule(clubs: &[ClubId], format: ScheduleFormat) -> Result<Schedule> {
        match format {
            ScheduleFormat::Single => Self::single_round_robin(clubs),
            ScheduleFormat::Double => Self::double_round_robin(clubs),
        }
    }

    /// Every pair meets once: N-1 rounds for even N, N rounds for odd N.
    pub fn single_round_robin(clubs: &[ClubId]) -> Result<Schedule> {
        validate_clubs(clubs)?;
        let rounds = circle_rounds(clubs)?;
        let schedule = Schedule::new(ScheduleFormat::Single, rounds);
        debug!(
            "single round-robin: {} clubs, {} rounds, {} fixtures",
            clubs.len(),
            schedule.round_count(),
            schedule.fixture_count()
        );
        Ok(schedule)
    }

    /// First leg followed by the mirrored second leg (not interleaved).
    pub fn double_round_robin(clubs: &[ClubId]) -> Result<Schedule> {
        validate_clubs(clubs)?;
        let mut rounds = circle_rounds(clubs)?;
        let offset = rounds.len();
        let second_leg: Vec<Round> = rounds
            .iter()
            .enumerate()
            .map(|(i, round)| round.mirrored(offset + i))
            .collect();
        rounds.extend(second_leg);

        let schedule = Schedule::new(ScheduleFormat::Double, rounds);
        debug!(
            "double round-robin: {} clubs, {} rounds, {} fixtures",
            clubs.len(),
            schedule.round_count(),
            schedule.fixture_count()
        );
        Ok(schedule)
    }
}

fn validate_clubs(clubs: &[ClubId]) -> Result<()> {
    if clubs.len() < 2 {
        return Err(LeagueError::InvalidInput(format!(
            "round-robin needs at least 2 clubs, got {}",
            clubs.len()
        )));
    }
    let mut seen = HashSet::with_capacity(clubs.len());
    for club in clubs {
        if !seen.insert(*club) {
            return Err(LeagueError::InvalidInput(format!("duplicate club {}", club)));
        }
    }
    Ok(())
}

fn circle_rounds(clubs: &[ClubId]) -> Result<Vec<Round>> {
    // None is the bye slot.
    let mut slots: Vec<Option<ClubId>> = clubs.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let anchor = slots[0];
    let ring = &slots[1..];
    let m = ring.len();

    let mut circle: Vec<Option<ClubId>> = vec![None; m];
    let mut rounds = Vec::with_capacity(m);

    for r in 0..m {
        for (i, club) in ring.iter().enumerate() {
            circle[(i + r) % m] = *club;
        }

        let mut fixtures = Vec::with_capacity(n / 2);
        let mut bye = None;
        for k in 0..n / 2 {
            let upper = if k == 0 { anchor } else { circle[k - 1] };
            let lower = circle[m - 1 - k];
            match (upper, lower) {
                (Some(a), Some(b)) => {
                    let (home, away) = if k == 0 && r % 2 == 1 { (b, a) } else { (a, b) };
                    fixtures.push(Fixture::new(home, away)?);
                }
                (Some(idle), None) | (None, Some(idle)) => bye = Some(idle),
                (None, None) => {}
            }
        }

        rounds.push(Round::new(r, fixtures, bye));
    }

    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn clubs(n: u32) -> Vec<ClubId> {
        (1..=n).map(ClubId).collect()
    }

    fn pairs(schedule: &Schedule) -> BTreeSet<(ClubId, ClubId)> {
        schedule.fixtures().map(Fixture::pair).collect()
    }

    #[test]
    fn test_four_clubs() {
        let ids = clubs(4);
        let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
        assert_eq!(schedule.round_count(), 3);
        assert_eq!(schedule.fixture_count(), 6);
        assert_eq!(pairs(&schedule).len(), 6);
        for round in schedule.rounds() {
            assert_eq!(round.fixtures().len(), 2);
            assert_eq!(round.bye(), None);
        }
        assert!(schedule.verify(&ids).is_ok());
    }

    #[test]
    fn test_five_clubs_one_bye_each() {
        let ids = clubs(5);
        let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
        assert_eq!(schedule.round_count(), 5);
        assert_eq!(schedule.fixture_count(), 10);
        for round in schedule.rounds() {
            assert_eq!(round.fixtures().len(), 2);
            let bye = round.bye().expect("odd count always has a bye");
            assert!(!round.contains(bye));
        }
        for club in &ids {
            assert_eq!(schedule.byes_for(*club).len(), 1, "{} idle count", club);
        }
        assert!(schedule.verify(&ids).is_ok());
    }

    #[test]
    fn test_two_clubs() {
        let ids = clubs(2);
        let single = RoundRobinScheduler::single_round_robin(&ids).unwrap();
        assert_eq!(single.round_count(), 1);
        assert_eq!(single.fixture_count(), 1);

        let double = RoundRobinScheduler::double_round_robin(&ids).unwrap();
        assert_eq!(double.round_count(), 2);
        let first = double.rounds()[0].fixtures()[0];
        let second = double.rounds()[1].fixtures()[0];
        assert_eq!(first.reversed(), second);
    }

    #[test]
    fn test_rejects_bad_club_lists() {
        assert!(matches!(
            RoundRobinScheduler::single_round_robin(&[]),
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            RoundRobinScheduler::single_round_robin(&[ClubId(1)]),
            Err(LeagueError::InvalidInput(_))
        ));
        assert!(matches!(
            RoundRobinScheduler::double_round_robin(&[ClubId(1), ClubId(2), ClubId(1)]),
            Err(LeagueError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_anchor_alternates_home_and_away() {
        let ids = clubs(6);
        let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
        for round in schedule.rounds() {
            let anchor_fixture = round
                .fixtures()
                .iter()
                .find(|f| f.involves(ids[0]))
                .unwrap();
            let anchor_home = anchor_fixture.home() == ids[0];
            assert_eq!(anchor_home, round.index() % 2 == 0);
        }
    }

    #[test]
    fn test_home_counts_balanced() {
        for n in 2..=16 {
            let ids = clubs(n);
            let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
            let games = (n - 1) as i64;
            for club in &ids {
                let home = schedule.home_count(*club) as i64;
                assert!(
                    (2 * home - games).abs() <= 1,
                    "n={} {} hosts {} of {}",
                    n,
                    club,
                    home,
                    games
                );
            }
        }
    }

    #[test]
    fn test_double_second_leg_mirrors_first() {
        let ids = clubs(7);
        let schedule = RoundRobinScheduler::double_round_robin(&ids).unwrap();
        assert_eq!(schedule.round_count(), 14);
        assert_eq!(schedule.fixture_count(), 42);
        let first = schedule.first_leg();
        let second = schedule.second_leg();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second) {
            assert_eq!(b.index(), a.index() + first.len());
            assert_eq!(a.bye(), b.bye());
            let mirrored: Vec<Fixture> = a.fixtures().iter().map(Fixture::reversed).collect();
            assert_eq!(mirrored, b.fixtures());
        }
        assert!(schedule.verify(&ids).is_ok());
    }

    #[test]
    fn test_same_order_same_schedule() {
        let ids = vec![ClubId(40), ClubId(3), ClubId(17), ClubId(8), ClubId(21)];
        let a = RoundRobinScheduler::double_round_robin(&ids).unwrap();
        let b = RoundRobinScheduler::double_round_robin(&ids).unwrap();
        assert_eq!(a, b);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: single round-robin satisfies every calendar invariant
            #[test]
            fn prop_single_round_robin_valid(n in 2u32..40) {
                let ids = clubs(n);
                let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
                let n = n as usize;
                prop_assert_eq!(schedule.fixture_count(), n * (n - 1) / 2);
                prop_assert_eq!(pairs(&schedule).len(), n * (n - 1) / 2);
                prop_assert!(schedule.verify(&ids).is_ok());
            }

            /// Property: double round-robin plays each ordered pair exactly once
            #[test]
            fn prop_double_round_robin_valid(n in 2u32..30) {
                let ids = clubs(n);
                let schedule = RoundRobinScheduler::double_round_robin(&ids).unwrap();
                let ordered: BTreeSet<(ClubId, ClubId)> =
                    schedule.fixtures().map(|f| (f.home(), f.away())).collect();
                let n = n as usize;
                prop_assert_eq!(schedule.fixture_count(), n * (n - 1));
                prop_assert_eq!(ordered.len(), n * (n - 1));
                prop_assert!(schedule.verify(&ids).is_ok());
            }

            /// Property: odd club counts idle every club the same number of times
            #[test]
            fn prop_byes_evenly_spread(half in 1u32..20) {
                let ids = clubs(2 * half + 1);
                let schedule = RoundRobinScheduler::single_round_robin(&ids).unwrap();
                for round in schedule.rounds() {
                    prop_assert!(round.bye().is_some());
                }
                for club in &ids {
                    prop_assert_eq!(schedule.byes_for(*club).len(), 1);
                }
            }

            /// Property: a double round-robin idles every club once per leg
            #[test]
            fn prop_double_byes_once_per_leg(half in 1u32..15) {
                let ids = clubs(2 * half + 1);
                let schedule = RoundRobinScheduler::double_round_robin(&ids).unwrap();
                let first_leg = schedule.first_leg().len();
                for round in schedule.rounds() {
                    prop_assert!(round.bye().is_some());
                }
                for club in &ids {
                    let byes = schedule.byes_for(*club);
                    prop_assert_eq!(byes.len(), 2);
                    prop_assert!(byes[0] < first_leg && byes[1] >= first_leg);
                }
            }
        }
    }
}
