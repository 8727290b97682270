//! Agent decision configuration

use crate::engine::physics_constants::decision;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DecisionConfig {
    /// Shoot when closer than this to the opposing goal centre (default: 160.0 u)
    pub shooting_range: f32,
    /// Opponents inside this radius apply pressure (default: 70.0 u)
    pub passing_pressure_radius: f32,
    /// Chance per eligible tick that a pressured carrier passes (default: 0.55)
    pub pressured_pass_probability: f32,
    /// Base cooldown after a shot or pass (default: 220 ms)
    pub decision_interval_ms: f32,
    /// Random cooldown jitter upper bound (default: 180 ms)
    pub decision_jitter_ms: f32,

    // === Shooting ===
    pub shot_power_bonus: f32,
    pub save_bonus: f32,
    pub shot_aim_jitter: f32,
    pub deflection_power_factor: f32,
    pub deflection_offset_min: f32,
    pub deflection_offset_max: f32,

    // === Passing ===
    pub pass_roll_bonus: f32,
    pub pass_threshold_base: f32,
    pub pass_distance_divisor: f32,
    pub errant_pass_offset: f32,
    pub errant_pass_power: f32,

    // === Movement ===
    pub dribble_speed_factor: f32,
    pub goalkeeper_speed_factor: f32,
    pub position_speed_factor: f32,
    pub goalkeeper_band_margin: f32,
    pub arrival_epsilon: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            shooting_range: decision::SHOOTING_RANGE,
            passing_pressure_radius: decision::PASSING_PRESSURE_RADIUS,
            pressured_pass_probability: decision::PRESSURED_PASS_PROBABILITY,
            decision_interval_ms: decision::DECISION_INTERVAL_MS,
            decision_jitter_ms: decision::DECISION_JITTER_MS,

            shot_power_bonus: decision::SHOT_POWER_BONUS,
            save_bonus: decision::SAVE_BONUS,
            shot_aim_jitter: decision::SHOT_AIM_JITTER,
            deflection_power_factor: decision::DEFLECTION_POWER_FACTOR,
            deflection_offset_min: decision::DEFLECTION_OFFSET_MIN,
            deflection_offset_max: decision::DEFLECTION_OFFSET_MAX,

            pass_roll_bonus: decision::PASS_ROLL_BONUS,
            pass_threshold_base: decision::PASS_THRESHOLD_BASE,
            pass_distance_divisor: decision::PASS_DISTANCE_DIVISOR,
            errant_pass_offset: decision::ERRANT_PASS_OFFSET,
            errant_pass_power: decision::ERRANT_PASS_POWER,

            dribble_speed_factor: decision::DRIBBLE_SPEED_FACTOR,
            goalkeeper_speed_factor: decision::GOALKEEPER_SPEED_FACTOR,
            position_speed_factor: decision::POSITION_SPEED_FACTOR,
            goalkeeper_band_margin: decision::GOALKEEPER_BAND_MARGIN,
            arrival_epsilon: decision::ARRIVAL_EPSILON,
        }
    }
}

impl DecisionConfig {
    /// Success threshold for a pass over `distance`
    pub fn pass_threshold(&self, distance: f32) -> f32 {
        self.pass_threshold_base + distance / self.pass_distance_divisor
    }
}
