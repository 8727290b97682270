//! Ball physics configuration

use crate::engine::physics_constants::ball;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BallConfig {
    /// Per-tick velocity multiplier (default: 0.98)
    pub friction: f32,
    /// Component speed zeroed after friction (default: 8.0 u/s)
    pub stop_threshold: f32,
    /// Kick power → velocity (default: 2.4)
    pub power_scale: f32,
    /// Kick power floor before scaling (default: 30.0)
    pub min_kick_power: f32,
    /// Homing blend per tick (default: 0.18)
    pub homing_strength: f32,
    /// Speed a slow homing pass is steered up to (default: 60.0 u/s)
    pub homing_min_speed: f32,
    /// Possession grace period (default: 0.2 s)
    pub lock_duration: f32,
    /// Resting speed (default: 0.5 u/s)
    pub stuck_speed: f32,
    /// Resting time before forced possession (default: 2.0 s)
    pub stuck_timeout: f32,
    /// Radius inside which a resting ball is pulled to a player (default: 24.0 u)
    pub stuck_nudge_radius: f32,
    pub stuck_nudge_base: f32,
    pub stuck_nudge_bonus: f32,
    pub drop_nudge_min: f32,
    pub drop_nudge_max: f32,
    pub pass_base_power: f32,
    pub pass_accuracy_power: f32,
    pub pass_jitter_scale: f32,
    pub pass_jitter_spread: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            friction: ball::FRICTION,
            stop_threshold: ball::STOP_THRESHOLD,
            power_scale: ball::POWER_SCALE,
            min_kick_power: ball::MIN_KICK_POWER,
            homing_strength: ball::HOMING_STRENGTH,
            homing_min_speed: ball::HOMING_MIN_SPEED,
            lock_duration: ball::LOCK_DURATION,
            stuck_speed: ball::STUCK_SPEED,
            stuck_timeout: ball::STUCK_TIMEOUT,
            stuck_nudge_radius: ball::STUCK_NUDGE_RADIUS,
            stuck_nudge_base: ball::STUCK_NUDGE_BASE,
            stuck_nudge_bonus: ball::STUCK_NUDGE_BONUS,
            drop_nudge_min: ball::DROP_NUDGE_MIN,
            drop_nudge_max: ball::DROP_NUDGE_MAX,
            pass_base_power: ball::PASS_BASE_POWER,
            pass_accuracy_power: ball::PASS_ACCURACY_POWER,
            pass_jitter_scale: ball::PASS_JITTER_SCALE,
            pass_jitter_spread: ball::PASS_JITTER_SPREAD,
        }
    }
}
