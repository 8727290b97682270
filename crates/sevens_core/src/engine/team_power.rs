//! Per-tick team strength and the modifier it applies to individual stats

use crate::engine::physics_constants::team_power as tp;
use crate::engine::player::PlayerStats;
use crate::engine::rng::RandomSource;
use crate::engine::types::Team;
use serde::{Deserialize, Serialize};

/// Weighted roster averages plus uniform noise in `[-VARIANCE, VARIANCE)`.
/// Recomputed every tick, so the same roster never produces a stable value.
pub fn calculate_team_power<'a>(
    roster: impl IntoIterator<Item = &'a PlayerStats>,
    rng: &mut dyn RandomSource,
) -> f32 {
    let mut count = 0usize;
    let (mut attack, mut defense, mut stamina) = (0.0, 0.0, 0.0);
    for stats in roster {
        attack += stats.attack;
        defense += stats.defense;
        stamina += stats.stamina;
        count += 1;
    }
    let avg = |sum: f32| if count == 0 { 0.0 } else { sum / count as f32 };

    avg(attack) * tp::ATTACK_WEIGHT
        + avg(defense) * tp::DEFENSE_WEIGHT
        + avg(stamina) * tp::STAMINA_WEIGHT
        + rng.range(-tp::VARIANCE, tp::VARIANCE)
}

/// Latest power of each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamPower {
    pub home: f32,
    pub away: f32,
}

impl Default for TeamPower {
    fn default() -> Self {
        Self { home: tp::INITIAL, away: tp::INITIAL }
    }
}

impl TeamPower {
    pub fn get(&self, team: Team) -> f32 {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }

    pub fn set(&mut self, team: Team, power: f32) {
        match team {
            Team::Home => self.home = power,
            Team::Away => self.away = power,
        }
    }
}

/// Stats after the team power modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub speed: f32,
    pub attack: f32,
    pub defense: f32,
}

impl EffectiveStats {
    pub fn from_team_power(stats: &PlayerStats, team_power: f32) -> Self {
        let modifier = (team_power - tp::NEUTRAL) / 100.0;
        let scale = |value: f32, sensitivity: f32| {
            (value * (1.0 + modifier * sensitivity)).clamp(tp::EFFECTIVE_MIN, tp::EFFECTIVE_MAX)
        };
        Self {
            speed: scale(stats.speed, tp::SPEED_SENSITIVITY),
            attack: scale(stats.attack, tp::SKILL_SENSITIVITY),
            defense: scale(stats.defense, tp::SKILL_SENSITIVITY),
        }
    }
}
