use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque club handle assigned by the entity generator. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubId(pub u32);

impl ClubId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for ClubId {
    fn from(id: u32) -> Self {
        ClubId(id)
    }
}

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "club#{}", self.0)
    }
}
