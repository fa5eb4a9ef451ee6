pub mod club;
pub mod fixture;
pub mod player;
pub mod score;

pub use club::ClubId;
pub use fixture::{Fixture, Round, Schedule, ScheduleFormat};
pub use player::{
    PlayerSkillRecord, Position, RequiredRole, Role, SkillCategory, Squad, SquadPlayer,
};
pub use score::{MatchOutcome, Score};
