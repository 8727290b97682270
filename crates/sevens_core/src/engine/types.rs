//! Shared identifiers

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the pitch. Home attacks toward increasing x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::Home, Team::Away];

    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn is_home(self) -> bool {
        self == Team::Home
    }

    /// +1 for home, -1 for away: the sign of forward progress along x
    pub fn attack_sign(self) -> f32 {
        match self {
            Team::Home => 1.0,
            Team::Away => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable player identifier: the index into the match roster
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for team in Team::BOTH {
            assert_eq!(team.opponent().opponent(), team);
            assert_ne!(team.opponent(), team);
        }
    }

    #[test]
    fn test_team_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Team::Away).unwrap(), "\"away\"");
        assert_eq!(Team::Home.to_string(), "home");
    }
}
