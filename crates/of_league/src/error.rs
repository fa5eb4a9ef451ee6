use thiserror::Error;

use crate::models::{ClubId, RequiredRole};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeagueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Squad of {club} has no qualifying {role}")]
    MissingRequiredRole { role: RequiredRole, club: ClubId },

    #[error("Invalid strength: {0}")]
    InvalidStrength(String),

    #[error("No squad registered for {0}")]
    UnknownClub(ClubId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl LeagueError {
    /// Every failure is a contract violation by the caller; nothing here is
    /// transient, so no variant is worth retrying.
    pub fn is_caller_defect(&self) -> bool {
        match self {
            LeagueError::InvalidInput(_)
            | LeagueError::MissingRequiredRole { .. }
            | LeagueError::InvalidStrength(_)
            | LeagueError::UnknownClub(_)
            | LeagueError::InvalidConfig(_)
            | LeagueError::ConfigParse(_) => true,
        }
    }

    /// Config errors come from calibration input, the rest from the data passed
    /// into a scheduling or scoring call.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LeagueError::InvalidConfig(_) | LeagueError::ConfigParse(_)
        )
    }
}

impl From<serde_json::Error> for LeagueError {
    fn from(err: serde_json::Error) -> Self {
        LeagueError::ConfigParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for LeagueError {
    fn from(err: serde_yaml::Error) -> Self {
        LeagueError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
