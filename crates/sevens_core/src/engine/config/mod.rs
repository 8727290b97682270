//! # Engine Configuration
//!
//! All tuning values in one place. Every section is `#[serde(default)]`,
//! so a YAML or JSON document only needs the values it overrides.
//!
//! ```rust
//! use sevens_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.decision.shooting_range > config.decision.shooting_range);
//! ```

mod ball_config;
mod decision_config;
mod field_config;
mod rules_config;
mod stamina_config;

pub use ball_config::BallConfig;
pub use decision_config::DecisionConfig;
pub use field_config::{BodyConfig, FieldConfig};
pub use rules_config::{ControlConfig, MatchRulesConfig};
pub use stamina_config::StaminaConfig;

use crate::error::{MatchError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct EngineConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub body: BodyConfig,
    #[serde(default)]
    pub ball: BallConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub stamina: StaminaConfig,
    #[serde(default)]
    pub rules: MatchRulesConfig,
    #[serde(default)]
    pub control: ControlConfig,
}

impl EngineConfig {
    /// Default tuning
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More shooting, more passing under pressure
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.decision.shooting_range = 220.0;
        cfg.decision.pressured_pass_probability = 0.75;
        cfg.decision.save_bonus = 10.0;
        cfg.stamina.drain_per_second = 1.5;
        cfg
    }

    /// One-minute match for demos and tests
    pub fn quick() -> Self {
        let mut cfg = Self::default();
        cfg.rules.duration_seconds = 60.0;
        cfg
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "quick" => Some(Self::quick()),
            _ => None,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(MatchError::InvalidConfig(format!(
                "unsupported config extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        let mut positive = |name: &str, value: f32| {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{} must be positive, got {}", name, value));
            }
        };

        positive("field.width", self.field.width);
        positive("field.height", self.field.height);
        positive("field.goal_width", self.field.goal_width);
        positive("body.player_radius", self.body.player_radius);
        positive("body.goalkeeper_radius", self.body.goalkeeper_radius);
        positive("body.ball_radius", self.body.ball_radius);
        positive("ball.power_scale", self.ball.power_scale);
        positive("ball.lock_duration", self.ball.lock_duration);
        positive("stamina.max", self.stamina.max);
        positive("rules.duration_seconds", self.rules.duration_seconds);

        let largest = self.body.player_radius.max(self.body.goalkeeper_radius);
        if self.field.width <= largest * 2.0 || self.field.height <= largest * 2.0 {
            problems.push("field is smaller than a player".to_string());
        }
        if self.field.goal_width >= self.field.height {
            problems.push("field.goal_width must be narrower than the pitch".to_string());
        }
        if !(0.0..=1.0).contains(&self.ball.friction) {
            problems.push(format!("ball.friction must be in [0, 1], got {}", self.ball.friction));
        }
        if !(0.0..=1.0).contains(&self.ball.homing_strength) {
            problems.push(format!(
                "ball.homing_strength must be in [0, 1], got {}",
                self.ball.homing_strength
            ));
        }
        if !(0.0..=1.0).contains(&self.decision.pressured_pass_probability) {
            problems.push(format!(
                "decision.pressured_pass_probability must be in [0, 1], got {}",
                self.decision.pressured_pass_probability
            ));
        }
        if !(0.0..=1.0).contains(&self.stamina.speed_floor) {
            problems.push(format!(
                "stamina.speed_floor must be in [0, 1], got {}",
                self.stamina.speed_floor
            ));
        }
        if self.decision.pass_distance_divisor <= 0.0 {
            problems.push("decision.pass_distance_divisor must be positive".to_string());
        }
        if self.ball.drop_nudge_min > self.ball.drop_nudge_max {
            problems.push("ball.drop_nudge_min exceeds ball.drop_nudge_max".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let message = problems.join("; ");
            tracing::warn!("rejected engine config: {}", message);
            Err(MatchError::InvalidConfig(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::arcade().validate().is_ok());
        assert!(EngineConfig::quick().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_values() {
        let cfg = EngineConfig::from_yaml_str("rules:\n  duration_seconds: 90\n").unwrap();
        assert_eq!(cfg.rules.duration_seconds, 90.0);
        assert_eq!(cfg.rules.possession_cooldown_ms, 400.0);
        assert_eq!(cfg.ball, BallConfig::default());
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let cfg = EngineConfig::arcade();
        write!(file, "{}", serde_json::to_string(&cfg).unwrap()).unwrap();

        let loaded = EngineConfig::load(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_collects_problems() {
        let mut cfg = EngineConfig::default();
        cfg.field.width = -1.0;
        cfg.ball.friction = 1.5;
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("field.width"));
        assert!(err.contains("ball.friction"));
    }

    #[test]
    fn test_presets_by_name() {
        assert!(EngineConfig::preset("arcade").is_some());
        assert_eq!(EngineConfig::preset("quick").unwrap().rules.duration_seconds, 60.0);
        assert!(EngineConfig::preset("nonsense").is_none());
    }
}
