//! Starting 1-2-2-2 formation and roster generation

use crate::engine::config::EngineConfig;
use crate::engine::geometry::Vec2;
use crate::engine::player::{Player, PlayerStats, Role};
use crate::engine::rng::RandomSource;
use crate::engine::types::{PlayerId, Team};

pub const TEAM_SIZE: usize = 7;

/// Home-side slots as fractions of the pitch; the away side mirrors `x`.
///
/// Forwards hold station in the attacking third, short of the opposing
/// defenders. Pressured carriers pass to the most advanced teammate, so the
/// forwards' anchors bound how far a passing move can reach.
pub const TEMPLATE: [(Role, f32, f32); TEAM_SIZE] = [
    (Role::GK, 0.06, 0.5),
    (Role::DF, 0.18, 0.25),
    (Role::DF, 0.18, 0.75),
    (Role::MF, 0.38, 0.3),
    (Role::MF, 0.38, 0.7),
    (Role::FW, 0.72, 0.4),
    (Role::FW, 0.72, 0.6),
];

/// Inclusive integer range a stat is rolled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRange {
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn roll(self, rng: &mut dyn RandomSource) -> f32 {
        rng.range_int(self.min, self.max) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub speed: StatRange,
    pub attack: StatRange,
    pub defense: StatRange,
}

pub const OUTFIELD_PROFILE: RoleProfile = RoleProfile {
    speed: StatRange::new(70, 90),
    attack: StatRange::new(60, 85),
    defense: StatRange::new(60, 85),
};

pub const GOALKEEPER_PROFILE: RoleProfile = RoleProfile {
    speed: StatRange::new(40, 60),
    attack: StatRange::new(30, 50),
    defense: StatRange::new(80, 95),
};

impl RoleProfile {
    pub fn for_role(role: Role) -> Self {
        if role.is_goalkeeper() {
            GOALKEEPER_PROFILE
        } else {
            OUTFIELD_PROFILE
        }
    }

    /// Fresh stats; every player starts with full stamina
    pub fn roll(&self, max_stamina: f32, rng: &mut dyn RandomSource) -> PlayerStats {
        PlayerStats {
            speed: self.speed.roll(rng),
            attack: self.attack.roll(rng),
            defense: self.defense.roll(rng),
            stamina: max_stamina,
        }
    }
}

/// Anchor of `slot` for `team` on the configured pitch
pub fn anchor_for(team: Team, slot: usize, config: &EngineConfig) -> Option<Vec2> {
    let (_, fx, fy) = TEMPLATE.get(slot)?;
    let field = &config.field;
    let x = match team {
        Team::Home => fx * field.width,
        Team::Away => field.width - fx * field.width,
    };
    Some(Vec2::new(x, fy * field.height))
}

/// Both rosters, home first; each player's id is its index in the result
pub fn build_roster(config: &EngineConfig, rng: &mut dyn RandomSource) -> Vec<Player> {
    let mut players = Vec::with_capacity(TEAM_SIZE * 2);
    for team in Team::BOTH {
        for (slot, (role, _, _)) in TEMPLATE.iter().enumerate() {
            let Some(anchor) = anchor_for(team, slot, config) else {
                continue;
            };
            let id = PlayerId(players.len() as u8);
            let stats = RoleProfile::for_role(*role).roll(config.stamina.max, rng);
            players.push(Player::new(id, team, *role, anchor, stats, &config.body));
        }
    }
    players
}
