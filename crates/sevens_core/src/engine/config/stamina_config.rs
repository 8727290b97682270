//! Stamina configuration

use crate::engine::physics_constants::stamina;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StaminaConfig {
    /// Upper bound (default: 100.0)
    pub max: f32,
    /// Drain while chasing or carrying (default: 2.3 / s)
    pub drain_per_second: f32,
    /// Recovery while holding position (default: 3.5 / s)
    pub recovery_per_second: f32,
    /// Goalkeeper drain multiplier (default: 0.4)
    pub goalkeeper_drain_factor: f32,
    /// Fraction of nominal speed kept at zero stamina (default: 0.55)
    pub speed_floor: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: stamina::MAX,
            drain_per_second: stamina::DRAIN_PER_SECOND,
            recovery_per_second: stamina::RECOVERY_PER_SECOND,
            goalkeeper_drain_factor: stamina::GOALKEEPER_DRAIN_FACTOR,
            speed_floor: stamina::SPEED_FLOOR,
        }
    }
}

impl StaminaConfig {
    /// Speed multiplier for the given stamina: floor at empty, 1.0 at full
    pub fn speed_multiplier(&self, stamina: f32) -> f32 {
        let ratio = if self.max > 0.0 { (stamina / self.max).clamp(0.0, 1.0) } else { 0.0 };
        self.speed_floor + (1.0 - self.speed_floor) * ratio
    }
}
