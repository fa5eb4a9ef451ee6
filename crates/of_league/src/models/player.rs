//! Squad and player skill data consumed by the strength model.
//!
//! Squads are owned by the entity-graph side of the game; this crate only
//! reads them. Ratings use the 0-100 scale throughout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::club::ClubId;

/// Highest rating a skill can carry.
pub const MAX_RATING: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
    // Generic positions
    DF,
    MF,
    FW,
}

impl Position {
    pub fn role(&self) -> Role {
        match self {
            Position::GK => Role::Goalkeeper,
            Position::LB
            | Position::CB
            | Position::RB
            | Position::LWB
            | Position::RWB
            | Position::DF => Role::Defender,
            Position::CDM
            | Position::CM
            | Position::CAM
            | Position::LM
            | Position::RM
            | Position::MF => Role::Midfielder,
            Position::LW | Position::RW | Position::CF | Position::ST | Position::FW => {
                Role::Forward
            }
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }
}

/// 포지션 그룹 (전력 계산용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    /// Midfielders and forwards make up the attacking unit.
    pub fn is_attacking(&self) -> bool {
        matches!(self, Role::Midfielder | Role::Forward)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Role::Goalkeeper => "goalkeeper",
            Role::Defender => "defender",
            Role::Midfielder => "midfielder",
            Role::Forward => "forward",
        };
        f.write_str(name)
    }
}

/// Lineup group the strength model cannot rate a squad without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredRole {
    Goalkeeper,
    Defenders,
    /// Midfielders and forwards together; either one is enough.
    AttackingUnit,
}

impl RequiredRole {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            RequiredRole::Goalkeeper => role == Role::Goalkeeper,
            RequiredRole::Defenders => role == Role::Defender,
            RequiredRole::AttackingUnit => role.is_attacking(),
        }
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RequiredRole::Goalkeeper => "goalkeeper",
            RequiredRole::Defenders => "defender",
            RequiredRole::AttackingUnit => "midfielder or forward",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Attacking,
    Defending,
    Goalkeeping,
}

impl SkillCategory {
    /// Skill names that belong to this category.
    pub fn skills(&self) -> &'static [&'static str] {
        match self {
            SkillCategory::Attacking => &[
                "finishing",
                "dribbling",
                "first_touch",
                "long_shots",
                "off_the_ball",
                "technique",
            ],
            SkillCategory::Defending => &[
                "tackling",
                "marking",
                "positioning",
                "anticipation",
                "heading",
            ],
            SkillCategory::Goalkeeping => &[
                "gk_handling",
                "gk_reflexes",
                "gk_aerial_reach",
                "gk_one_on_ones",
                "gk_command_of_area",
            ],
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills().contains(&skill)
    }
}

/// Skill name -> rating. Ordered so iteration (and therefore any float
/// accumulation over it) is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerSkillRecord {
    ratings: BTreeMap<String, u8>,
}

impl PlayerSkillRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Ratings above [`MAX_RATING`] are clamped.
    pub fn with(mut self, skill: &str, rating: u8) -> Self {
        self.set(skill, rating);
        self
    }

    pub fn set(&mut self, skill: &str, rating: u8) {
        self.ratings.insert(skill.to_string(), rating.min(MAX_RATING));
    }

    pub fn get(&self, skill: &str) -> Option<u8> {
        self.ratings.get(skill).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Mean rating over the category's skills present in this record.
    /// `None` when the record carries none of them.
    pub fn category_mean(&self, category: SkillCategory) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for skill in category.skills() {
            if let Some(rating) = self.ratings.get(*skill) {
                sum += f64::from((*rating).min(MAX_RATING));
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for PlayerSkillRecord {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        let ratings = iter
            .into_iter()
            .map(|(skill, rating)| (skill.into(), rating.min(MAX_RATING)))
            .collect();
        Self { ratings }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadPlayer {
    pub id: u32,
    pub position: Position,
    pub skills: PlayerSkillRecord,
}

impl SquadPlayer {
    pub fn new(id: u32, position: Position, skills: PlayerSkillRecord) -> Self {
        Self {
            id,
            position,
            skills,
        }
    }

    pub fn role(&self) -> Role {
        self.position.role()
    }
}

/// Ordered squad. The first entries are the starting lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub club: ClubId,
    pub players: Vec<SquadPlayer>,
}

impl Squad {
    pub fn new(club: ClubId, players: Vec<SquadPlayer>) -> Self {
        Self { club, players }
    }

    /// First `size` players, or the whole squad when it is shorter.
    pub fn lineup(&self, size: usize) -> &[SquadPlayer] {
        &self.players[..size.min(self.players.len())]
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
