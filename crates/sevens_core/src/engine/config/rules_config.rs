//! Match flow and manual control configuration

use crate::engine::physics_constants::{control, rules};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchRulesConfig {
    /// Match length (default: 180 s)
    pub duration_seconds: f32,
    /// Minimum time between two arbitration pickups (default: 400 ms)
    pub possession_cooldown_ms: f32,
    /// Freeze after a goal (default: 2 s)
    pub goal_pause_seconds: f32,
}

impl Default for MatchRulesConfig {
    fn default() -> Self {
        Self {
            duration_seconds: rules::MATCH_DURATION_SECONDS,
            possession_cooldown_ms: rules::POSSESSION_COOLDOWN_MS,
            goal_pause_seconds: rules::GOAL_PAUSE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ControlConfig {
    pub move_speed: f32,
    pub pass_speed: f32,
    pub shoot_speed: f32,
    pub kick_range: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_speed: control::MOVE_SPEED,
            pass_speed: control::PASS_SPEED,
            shoot_speed: control::SHOOT_SPEED,
            kick_range: control::KICK_RANGE,
        }
    }
}
