//! Physics and tuning constants for the seven-a-side simulation
//!
//! Units are pitch units (u), seconds (s) and milliseconds (ms). These are
//! the defaults behind `EngineConfig`; the engine itself reads the config.

/// Pitch geometry
pub mod field {
    /// Pitch length along the attacking axis (u)
    pub const WIDTH: f32 = 1200.0;
    /// Pitch height (u)
    pub const HEIGHT: f32 = 720.0;
    /// Goal mouth opening, centred on `HEIGHT / 2` (u)
    pub const GOAL_WIDTH: f32 = 80.0;
    /// How far past each end line still counts as inside the goal (u)
    pub const GOAL_DEPTH: f32 = 20.0;
}

/// Body sizes used for containment and pickup
pub mod body {
    pub const PLAYER_RADIUS: f32 = 24.0;
    pub const GOALKEEPER_RADIUS: f32 = 28.0;
    pub const BALL_RADIUS: f32 = 8.0;
    /// Extra slack added to player + ball radius when picking up the ball
    pub const REACH_MARGIN: f32 = 2.0;
}

/// Ball physics
pub mod ball {
    /// Per-tick velocity multiplier
    pub const FRICTION: f32 = 0.98;
    /// Velocity components below this (u/s) are zeroed after friction
    pub const STOP_THRESHOLD: f32 = 8.0;
    /// Kick power → velocity scale
    pub const POWER_SCALE: f32 = 2.4;
    /// Weakest kick power before scaling
    pub const MIN_KICK_POWER: f32 = 30.0;
    /// Fraction of the homing correction applied per tick
    pub const HOMING_STRENGTH: f32 = 0.18;
    /// Speed a homing pass is steered toward when it has slowed below it (u/s)
    pub const HOMING_MIN_SPEED: f32 = 60.0;
    /// Grace period after a possession change (s)
    pub const LOCK_DURATION: f32 = 0.2;
    /// Below this speed the ball counts as resting (u/s)
    pub const STUCK_SPEED: f32 = 0.5;
    /// Resting time before possession is forced on the nearest player (s)
    pub const STUCK_TIMEOUT: f32 = 2.0;
    /// Players within this distance pull a resting ball toward them (u)
    pub const STUCK_NUDGE_RADIUS: f32 = 24.0;
    /// Nudge speed toward a nearby player: base + proximity bonus (u/s)
    pub const STUCK_NUDGE_BASE: f32 = 20.0;
    pub const STUCK_NUDGE_BONUS: f32 = 40.0;
    /// Speed range of the nudge given to a dropped ball (u/s)
    pub const DROP_NUDGE_MIN: f32 = 3.0;
    pub const DROP_NUDGE_MAX: f32 = 5.0;
    /// Pass power = base + accuracy * bonus
    pub const PASS_BASE_POWER: f32 = 55.0;
    pub const PASS_ACCURACY_POWER: f32 = 35.0;
    /// Aim jitter per axis is `(u - 0.5) * JITTER_SCALE * (1 - accuracy) * JITTER_SPREAD`
    pub const PASS_JITTER_SCALE: f32 = 10.0;
    pub const PASS_JITTER_SPREAD: f32 = 4.0;
}

/// Agent decision making
pub mod decision {
    /// Distance to the opposing goal centre inside which a carrier shoots (u)
    pub const SHOOTING_RANGE: f32 = 160.0;
    /// Opponents inside this radius put the carrier under pressure (u)
    pub const PASSING_PRESSURE_RADIUS: f32 = 70.0;
    pub const PRESSURED_PASS_PROBABILITY: f32 = 0.55;
    /// Base decision cooldown after a shot or pass (ms)
    pub const DECISION_INTERVAL_MS: f32 = 220.0;
    /// Upper bound of the random cooldown jitter (ms)
    pub const DECISION_JITTER_MS: f32 = 180.0;

    pub const SHOT_POWER_BONUS: f32 = 25.0;
    pub const SAVE_BONUS: f32 = 15.0;
    pub const SHOT_AIM_JITTER: f32 = 20.0;
    /// Saved shots leave at this fraction of their power
    pub const DEFLECTION_POWER_FACTOR: f32 = 0.5;
    pub const DEFLECTION_OFFSET_MIN: f32 = 60.0;
    pub const DEFLECTION_OFFSET_MAX: f32 = 120.0;

    pub const PASS_ROLL_BONUS: f32 = 20.0;
    /// Pass success threshold = base + distance / divisor
    pub const PASS_THRESHOLD_BASE: f32 = 50.0;
    pub const PASS_DISTANCE_DIVISOR: f32 = 10.0;
    pub const ERRANT_PASS_OFFSET: f32 = 60.0;
    pub const ERRANT_PASS_POWER: f32 = 45.0;

    /// Speed multipliers per decision state
    pub const DRIBBLE_SPEED_FACTOR: f32 = 0.95;
    pub const GOALKEEPER_SPEED_FACTOR: f32 = 0.95;
    pub const POSITION_SPEED_FACTOR: f32 = 0.85;
    /// Goalkeeper tracking band beyond the goal mouth half-width (u)
    pub const GOALKEEPER_BAND_MARGIN: f32 = 30.0;
    /// Targets closer than this produce no movement (u)
    pub const ARRIVAL_EPSILON: f32 = 1.0;
}

/// Stamina model
pub mod stamina {
    pub const MAX: f32 = 100.0;
    pub const DRAIN_PER_SECOND: f32 = 2.3;
    pub const RECOVERY_PER_SECOND: f32 = 3.5;
    /// Goalkeepers drain at this fraction of the normal rate
    pub const GOALKEEPER_DRAIN_FACTOR: f32 = 0.4;
    /// Effective speed = nominal * (FLOOR + (1 - FLOOR) * stamina / MAX)
    pub const SPEED_FLOOR: f32 = 0.55;
}

/// Team power aggregation
pub mod team_power {
    pub const ATTACK_WEIGHT: f32 = 0.4;
    pub const DEFENSE_WEIGHT: f32 = 0.3;
    pub const STAMINA_WEIGHT: f32 = 0.2;
    pub const VARIANCE: f32 = 10.0;
    /// Power at which the modifier is neutral
    pub const NEUTRAL: f32 = 70.0;
    pub const SPEED_SENSITIVITY: f32 = 0.1;
    pub const SKILL_SENSITIVITY: f32 = 0.15;
    pub const EFFECTIVE_MIN: f32 = 20.0;
    pub const EFFECTIVE_MAX: f32 = 120.0;
    /// Value both sides start with before the first tick
    pub const INITIAL: f32 = 70.0;
}

/// Match flow
pub mod rules {
    pub const MATCH_DURATION_SECONDS: f32 = 180.0;
    pub const POSSESSION_COOLDOWN_MS: f32 = 400.0;
    pub const GOAL_PAUSE_SECONDS: f32 = 2.0;
}

/// Manually controlled player
pub mod control {
    pub const MOVE_SPEED: f32 = 200.0;
    pub const PASS_SPEED: f32 = 250.0;
    pub const SHOOT_SPEED: f32 = 500.0;
    /// Ball must be this close for a manual kick (u)
    pub const KICK_RANGE: f32 = 60.0;
}
