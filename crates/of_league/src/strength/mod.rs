//! Squad strength ratings
//!
//! Attack and defense scalars on the 0-100 rating scale, recomputed for every
//! match since squads may change between fixtures.
//!
//! - attack: mean over the starting attacking unit (midfielders, forwards) of
//!   each player's mean attacking-skill rating
//! - defense: weighted mean of the goalkeeper's goalkeeping rating and the
//!   defenders' mean defending rating

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::StrengthConfig;
use crate::error::{LeagueError, Result};
use crate::models::{RequiredRole, SkillCategory, Squad, SquadPlayer};

/// Per-club, per-match attack/defense pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub attack: f64,
    pub defense: f64,
}

impl Strength {
    /// Middle of the rating scale on both axes.
    pub const MIDPOINT: Strength = Strength {
        attack: 50.0,
        defense: 50.0,
    };

    pub fn new(attack: f64, defense: f64) -> Self {
        Self { attack, defense }
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::MIDPOINT
    }
}

#[derive(Debug, Clone, Default)]
pub struct StrengthModel {
    config: StrengthConfig,
}

impl StrengthModel {
    pub fn new(config: StrengthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrengthConfig {
        &self.config
    }

    pub fn strength(&self, squad: &Squad) -> Result<Strength> {
        Ok(Strength {
            attack: self.attack_strength(squad)?,
            defense: self.defense_strength(squad)?,
        })
    }

    pub fn attack_strength(&self, squad: &Squad) -> Result<f64> {
        let lineup = self.lineup(squad);
        mean_rating(
            lineup
                .iter()
                .filter(|p| RequiredRole::AttackingUnit.admits(p.role())),
            SkillCategory::Attacking,
        )
        .ok_or(LeagueError::MissingRequiredRole {
            role: RequiredRole::AttackingUnit,
            club: squad.club,
        })
    }

    pub fn defense_strength(&self, squad: &Squad) -> Result<f64> {
        let lineup = self.lineup(squad);

        let goalkeeper = lineup
            .iter()
            .filter(|p| RequiredRole::Goalkeeper.admits(p.role()))
            .find_map(|p| p.skills.category_mean(SkillCategory::Goalkeeping))
            .ok_or(LeagueError::MissingRequiredRole {
                role: RequiredRole::Goalkeeper,
                club: squad.club,
            })?;

        let defenders = mean_rating(
            lineup
                .iter()
                .filter(|p| RequiredRole::Defenders.admits(p.role())),
            SkillCategory::Defending,
        )
        .ok_or(LeagueError::MissingRequiredRole {
            role: RequiredRole::Defenders,
            club: squad.club,
        })?;

        let w = &self.config.defense_weights;
        Ok((w.goalkeeper * goalkeeper + w.defenders * defenders) / (w.goalkeeper + w.defenders))
    }

    fn lineup<'a>(&self, squad: &'a Squad) -> &'a [SquadPlayer] {
        if squad.len() < self.config.lineup_size {
            warn!(
                "{} has {} players, short of a {}-player lineup",
                squad.club,
                squad.len(),
                self.config.lineup_size
            );
        }
        squad.lineup(self.config.lineup_size)
    }
}

/// Mean of per-player category means; players without any skill in the
/// category do not count. `None` when nobody qualifies.
fn mean_rating<'a>(
    players: impl Iterator<Item = &'a SquadPlayer>,
    category: SkillCategory,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for rating in players.filter_map(|p| p.skills.category_mean(category)) {
        sum += rating;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
