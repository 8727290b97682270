//! Ball state machine
//!
//! ```text
//!            set_owner                 lock expires
//!   Free ───────────────▶ Possessed ─────────────────▶ Free
//!    ▲  ◀── shoot/kick ──┘    ▲
//!    │                        │ receiver in reach
//!    └──── pass ───▶ InPass ──┘
//! ```
//!
//! The ball is the single authority on who holds it: every possession change
//! goes through `set_owner`, which rewrites `has_ball` on the whole roster.

use crate::engine::config::EngineConfig;
use crate::engine::events::PossessionCause;
use crate::engine::geometry::{clamp_to_field, direction, distance, from_angle, Vec2};
use crate::engine::player::{find_player, find_player_mut, Player};
use crate::engine::rng::RandomSource;
use crate::engine::types::{PlayerId, Team};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BallState {
    Free,
    InPass,
    Possessed,
}

/// Where the last kick was aimed, and at whom if it was a pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallTarget {
    pub point: Vec2,
    pub receiver: Option<PlayerId>,
}

/// A kick requested by a player, executed by the coordinator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallCommand {
    Shoot { target: Vec2, power: f32 },
    Pass { receiver: PlayerId, accuracy: f32 },
}

/// Possession change decided by the ball itself during `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PossessionGain {
    pub player: PlayerId,
    pub team: Team,
    pub cause: PossessionCause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    /// u/s
    pub velocity: Vec2,
    pub radius: f32,
    pub state: BallState,
    owner: Option<PlayerId>,
    target: Option<BallTarget>,
    /// Seconds left before the owner's hold lapses
    lock_timer: f32,
    /// Seconds spent below the resting speed
    stuck_timer: f32,
}

impl Ball {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            position: config.field.center(),
            velocity: Vec2::zeros(),
            radius: config.body.ball_radius,
            state: BallState::Free,
            owner: None,
            target: None,
            lock_timer: 0.0,
            stuck_timer: 0.0,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn target(&self) -> Option<BallTarget> {
        self.target
    }

    pub fn lock_timer(&self) -> f32 {
        self.lock_timer
    }

    pub fn stuck_timer(&self) -> f32 {
        self.stuck_timer
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Receiver of the pass currently in flight
    pub fn pass_receiver(&self) -> Option<PlayerId> {
        match self.state {
            BallState::InPass => self.target.and_then(|t| t.receiver),
            _ => None,
        }
    }

    /// Advance one tick. Returns the possession change the ball decided on
    /// its own (pass received, or a resting ball handed to the nearest player).
    pub fn update(
        &mut self,
        dt_ms: f32,
        players: &mut [Player],
        config: &EngineConfig,
        rng: &mut dyn RandomSource,
    ) -> Option<PossessionGain> {
        let dt = dt_ms / 1000.0;
        self.lock_timer = (self.lock_timer - dt).max(0.0);

        if let Some(owner_id) = self.owner {
            match find_player(players, owner_id) {
                Some(owner) if self.lock_timer > 0.0 => {
                    self.position = owner.position;
                    return None;
                }
                Some(_) => self.drop_possession(players, config, rng),
                None => self.release(players),
            }
        }

        let ball = &config.ball;
        self.position += self.velocity * dt;
        self.velocity *= ball.friction;
        if self.velocity.x.abs() < ball.stop_threshold {
            self.velocity.x = 0.0;
        }
        if self.velocity.y.abs() < ball.stop_threshold {
            self.velocity.y = 0.0;
        }
        self.position = clamp_to_field(self.position, self.radius, &config.field);

        if let Some(gain) = self.resolve_resting(dt, players, config) {
            return Some(gain);
        }
        // Homing sees this tick's position and shapes next tick's velocity
        self.steer_pass(players, config)
    }

    /// Lock lapsed: the carrier loses the ball, which drifts off slightly
    fn drop_possession(
        &mut self,
        players: &mut [Player],
        config: &EngineConfig,
        rng: &mut dyn RandomSource,
    ) {
        if self.speed() < config.ball.stuck_speed {
            let speed = rng.range(config.ball.drop_nudge_min, config.ball.drop_nudge_max);
            self.velocity += from_angle(rng.angle()) * speed;
        }
        self.release(players);
    }

    /// Homing toward the pass receiver; completes the pass once in reach
    fn steer_pass(&mut self, players: &mut [Player], config: &EngineConfig) -> Option<PossessionGain> {
        let receiver = self.pass_receiver()?;
        let Some(player) = find_player(players, receiver) else {
            self.target = None;
            self.state = BallState::Free;
            return None;
        };

        let (dir, gap) = direction(self.position, player.position);
        if gap < player.reach(&config.body) {
            let team = player.team;
            self.set_owner(players, receiver, config);
            return Some(PossessionGain { player: receiver, team, cause: PossessionCause::PassReceived });
        }

        let speed = self.speed().max(config.ball.homing_min_speed);
        let desired = dir * speed;
        self.velocity += (desired - self.velocity) * config.ball.homing_strength;
        None
    }

    fn resolve_resting(
        &mut self,
        dt: f32,
        players: &mut [Player],
        config: &EngineConfig,
    ) -> Option<PossessionGain> {
        let ball = &config.ball;
        if self.speed() >= ball.stuck_speed {
            self.stuck_timer = 0.0;
            return None;
        }
        if self.state == BallState::Free {
            self.target = None;
        }
        self.stuck_timer += dt;

        let (nearest_id, nearest_team, nearest_position, gap) = players
            .iter()
            .map(|p| (p.id, p.team, p.position, distance(p.position, self.position)))
            .min_by(|a, b| a.3.total_cmp(&b.3))?;

        if gap < ball.stuck_nudge_radius {
            let (dir, _) = direction(self.position, nearest_position);
            let closeness = 1.0 - gap / ball.stuck_nudge_radius;
            self.velocity = dir * (ball.stuck_nudge_base + ball.stuck_nudge_bonus * closeness);
            self.stuck_timer = 0.0;
            return None;
        }

        if self.stuck_timer > ball.stuck_timeout {
            debug!(player = %nearest_id, waited = self.stuck_timer, "resting ball handed to nearest player");
            self.set_owner(players, nearest_id, config);
            return Some(PossessionGain {
                player: nearest_id,
                team: nearest_team,
                cause: PossessionCause::StuckResolved,
            });
        }
        None
    }

    /// Hand the ball to `id`; every other player loses it. Returns false
    /// (and changes nothing) when `id` is not on the roster.
    pub fn set_owner(&mut self, players: &mut [Player], id: PlayerId, config: &EngineConfig) -> bool {
        let Some(position) = find_player(players, id).map(|p| p.position) else {
            return false;
        };
        for player in players.iter_mut() {
            player.has_ball = player.id == id;
            if player.id == id {
                player.decision_cooldown_ms = 0.0;
                player.pending_receive = None;
            }
        }
        self.owner = Some(id);
        self.state = BallState::Possessed;
        self.position = position;
        self.velocity = Vec2::zeros();
        self.target = None;
        self.stuck_timer = 0.0;
        self.lock_timer = config.ball.lock_duration;
        true
    }

    /// Detach from the current owner, if any
    pub fn release(&mut self, players: &mut [Player]) {
        if let Some(id) = self.owner.take() {
            if let Some(player) = find_player_mut(players, id) {
                player.has_ball = false;
            }
        }
        self.state = BallState::Free;
        self.lock_timer = 0.0;
    }

    /// Kick toward `point`; power below the minimum is raised to it
    pub fn shoot(&mut self, players: &mut [Player], point: Vec2, power: f32, config: &EngineConfig) {
        self.release(players);
        let (dir, _) = direction(self.position, point);
        self.velocity = dir * power.max(config.ball.min_kick_power) * config.ball.power_scale;
        self.state = BallState::Free;
        self.target = Some(BallTarget { point, receiver: None });
        self.stuck_timer = 0.0;
    }

    /// Homing pass; lower accuracy adds aim jitter and takes pace off.
    /// A receiver that does not resolve leaves the ball untouched.
    pub fn pass(
        &mut self,
        players: &mut [Player],
        receiver: PlayerId,
        accuracy: f32,
        config: &EngineConfig,
        rng: &mut dyn RandomSource,
    ) {
        let Some(receiver_position) = find_player(players, receiver).map(|p| p.position) else {
            return;
        };
        let ball = &config.ball;
        let accuracy = accuracy.clamp(0.0, 1.0);
        let spread = ball.pass_jitter_scale * (1.0 - accuracy) * ball.pass_jitter_spread;
        let jitter = Vec2::new(rng.signed_unit() * spread, rng.signed_unit() * spread);
        let point = receiver_position + jitter;
        let power = ball.pass_base_power + ball.pass_accuracy_power * accuracy;

        self.shoot(players, point, power, config);
        self.target = Some(BallTarget { point, receiver: Some(receiver) });
        self.state = BallState::InPass;
        if let Some(player) = find_player_mut(players, receiver) {
            player.pending_receive = Some(point);
        }
    }

    /// Raw velocity kick used by manual control
    pub fn kick(&mut self, players: &mut [Player], velocity: Vec2) {
        self.release(players);
        self.velocity = velocity;
        self.state = BallState::Free;
        self.target = None;
        self.stuck_timer = 0.0;
    }

    pub fn execute(
        &mut self,
        command: BallCommand,
        players: &mut [Player],
        config: &EngineConfig,
        rng: &mut dyn RandomSource,
    ) {
        match command {
            BallCommand::Shoot { target, power } => self.shoot(players, target, power, config),
            BallCommand::Pass { receiver, accuracy } => {
                self.pass(players, receiver, accuracy, config, rng)
            }
        }
    }

    /// Kickoff placement; the caller clears the players' `has_ball`
    pub fn reset_to_center(&mut self, config: &EngineConfig) {
        *self = Self::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::BodyConfig;
    use crate::engine::player::{PlayerStats, Role};
    use crate::engine::rng::FixedSequence;

    const TICK_MS: f32 = 1000.0 / 60.0;

    fn player(id: u8, team: Team, x: f32, y: f32) -> Player {
        let stats = PlayerStats { speed: 80.0, attack: 70.0, defense: 70.0, stamina: 100.0 };
        Player::new(PlayerId(id), team, Role::MF, Vec2::new(x, y), stats, &BodyConfig::default())
    }

    fn setup() -> (EngineConfig, Ball, FixedSequence) {
        let config = EngineConfig::default();
        let ball = Ball::new(&config);
        (config, ball, FixedSequence::constant(0.5))
    }

    #[test]
    fn test_set_owner_is_exclusive() {
        let (config, mut ball, _) = setup();
        let mut players = vec![player(0, Team::Home, 100.0, 100.0), player(1, Team::Away, 200.0, 200.0)];
        players[0].has_ball = true;

        assert!(ball.set_owner(&mut players, PlayerId(1), &config));
        assert!(!players[0].has_ball);
        assert!(players[1].has_ball);
        assert_eq!(ball.owner(), Some(PlayerId(1)));
        assert_eq!(ball.state, BallState::Possessed);
        assert_eq!(ball.position, Vec2::new(200.0, 200.0));
        assert_eq!(ball.lock_timer(), 0.2);
    }

    #[test]
    fn test_set_owner_unknown_id_changes_nothing() {
        let (config, mut ball, _) = setup();
        let mut players = vec![player(0, Team::Home, 100.0, 100.0)];
        assert!(!ball.set_owner(&mut players, PlayerId(42), &config));
        assert_eq!(ball.owner(), None);
        assert_eq!(ball.state, BallState::Free);
    }

    #[test]
    fn test_lock_follows_carrier_then_releases() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 300.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);

        players[0].position = Vec2::new(310.0, 300.0);
        ball.update(100.0, &mut players, &config, &mut rng);
        assert_eq!(ball.position, Vec2::new(310.0, 300.0));
        assert_eq!(ball.owner(), Some(PlayerId(0)));

        ball.update(150.0, &mut players, &config, &mut rng);
        assert_eq!(ball.owner(), None);
        assert_eq!(ball.state, BallState::Free);
        assert!(!players[0].has_ball);
    }

    #[test]
    fn test_shot_velocity_and_minimum_power() {
        let (config, mut ball, _) = setup();
        let mut players: Vec<Player> = Vec::new();
        ball.shoot(&mut players, ball.position + Vec2::new(100.0, 0.0), 50.0, &config);
        assert!((ball.velocity.x - 120.0).abs() < 1e-4);
        assert_eq!(ball.velocity.y, 0.0);

        ball.shoot(&mut players, ball.position + Vec2::new(0.0, 100.0), 5.0, &config);
        assert!((ball.velocity.y - 72.0).abs() < 1e-4);
        assert_eq!(ball.target().map(|t| t.receiver), Some(None));
    }

    #[test]
    fn test_friction_and_stop_threshold() {
        let (config, mut ball, mut rng) = setup();
        let mut players: Vec<Player> = Vec::new();
        ball.velocity = Vec2::new(100.0, 8.1);
        ball.update(TICK_MS, &mut players, &config, &mut rng);
        assert!((ball.velocity.x - 98.0).abs() < 1e-4);
        // 8.1 * 0.98 falls under the threshold
        assert_eq!(ball.velocity.y, 0.0);
    }

    #[test]
    fn test_ball_stays_inside_field() {
        let (config, mut ball, mut rng) = setup();
        let mut players: Vec<Player> = Vec::new();
        ball.position = Vec2::new(1190.0, 100.0);
        ball.velocity = Vec2::new(5000.0, 0.0);
        ball.update(TICK_MS, &mut players, &config, &mut rng);
        assert_eq!(ball.position.x, 1192.0);
    }

    #[test]
    fn test_accurate_pass_reaches_receiver() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 360.0), player(1, Team::Home, 500.0, 360.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);

        ball.pass(&mut players, PlayerId(1), 1.0, &config, &mut rng);
        assert_eq!(ball.state, BallState::InPass);
        assert_eq!(ball.pass_receiver(), Some(PlayerId(1)));
        assert_eq!(players[1].pending_receive, Some(Vec2::new(500.0, 360.0)));
        assert!(!players[0].has_ball);

        let mut received = None;
        for _ in 0..300 {
            if let Some(gain) = ball.update(TICK_MS, &mut players, &config, &mut rng) {
                received = Some(gain);
                break;
            }
        }
        let gain = received.expect("pass never arrived");
        assert_eq!(gain.player, PlayerId(1));
        assert_eq!(gain.cause, PossessionCause::PassReceived);
        assert_eq!(ball.owner(), Some(PlayerId(1)));
        assert_eq!(ball.state, BallState::Possessed);
        assert!(players[1].has_ball);
        assert_eq!(players[1].pending_receive, None);
    }

    #[test]
    fn test_pass_completes_on_tick_it_rolls_into_reach() {
        let (config, mut ball, mut rng) = setup();
        // Reach is 34; the pass covers 3.6u in its first tick
        let mut players = vec![player(0, Team::Home, 300.0, 360.0), player(1, Team::Home, 336.0, 360.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);
        ball.pass(&mut players, PlayerId(1), 1.0, &config, &mut rng);

        let gain = ball.update(TICK_MS, &mut players, &config, &mut rng);
        assert_eq!(gain.map(|g| g.player), Some(PlayerId(1)));
        assert_eq!(ball.owner(), Some(PlayerId(1)));
        assert_eq!(ball.position, Vec2::new(336.0, 360.0));
    }

    #[test]
    fn test_homing_bends_flight_after_integration() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 360.0), player(1, Team::Home, 300.0, 600.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);
        ball.pass(&mut players, PlayerId(1), 1.0, &config, &mut rng);
        players[1].position = Vec2::new(600.0, 360.0);

        ball.update(TICK_MS, &mut players, &config, &mut rng);
        // Moved along the original aim; only the velocity was steered
        assert_eq!(ball.position.x, 300.0);
        assert!(ball.position.y > 360.0);
        assert!(ball.velocity.x > 0.0);
    }

    #[test]
    fn test_pass_to_missing_receiver_is_noop() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 360.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);
        ball.pass(&mut players, PlayerId(9), 1.0, &config, &mut rng);
        assert_eq!(ball.owner(), Some(PlayerId(0)));
        assert_eq!(ball.state, BallState::Possessed);
    }

    #[test]
    fn test_receiver_vanishing_mid_pass_frees_ball() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 360.0), player(1, Team::Home, 900.0, 360.0)];
        ball.position = Vec2::new(300.0, 360.0);
        ball.pass(&mut players, PlayerId(1), 1.0, &config, &mut rng);
        players.pop();

        assert!(ball.update(TICK_MS, &mut players, &config, &mut rng).is_none());
        assert_eq!(ball.state, BallState::Free);
        assert_eq!(ball.pass_receiver(), None);
    }

    #[test]
    fn test_resting_ball_creeps_toward_close_player() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 612.0, 360.0)];
        ball.update(TICK_MS, &mut players, &config, &mut rng);
        // 12u away: 20 + 40 * 0.5
        assert!((ball.velocity.x - 40.0).abs() < 1e-3);
        assert_eq!(ball.stuck_timer(), 0.0);
    }

    #[test]
    fn test_stuck_ball_forces_possession() {
        let (config, mut ball, mut rng) = setup();
        let mut players = vec![player(0, Team::Home, 100.0, 100.0), player(7, Team::Away, 800.0, 400.0)];
        let mut gain = None;
        for _ in 0..130 {
            gain = gain.or(ball.update(TICK_MS, &mut players, &config, &mut rng));
        }
        let gain = gain.expect("resting ball was never resolved");
        assert_eq!(gain.player, PlayerId(7));
        assert_eq!(gain.team, Team::Away);
        assert_eq!(gain.cause, PossessionCause::StuckResolved);
        assert!(players[1].has_ball);
    }

    #[test]
    fn test_kick_releases_owner() {
        let (config, mut ball, _) = setup();
        let mut players = vec![player(0, Team::Home, 300.0, 360.0)];
        ball.set_owner(&mut players, PlayerId(0), &config);
        ball.kick(&mut players, Vec2::new(500.0, 0.0));
        assert_eq!(ball.owner(), None);
        assert!(!players[0].has_ball);
        assert_eq!(ball.velocity, Vec2::new(500.0, 0.0));
    }

    #[test]
    fn test_reset_to_center() {
        let (config, mut ball, _) = setup();
        ball.position = Vec2::new(10.0, 360.0);
        ball.velocity = Vec2::new(-300.0, 0.0);
        ball.reset_to_center(&config);
        assert_eq!(ball.position, Vec2::new(600.0, 360.0));
        assert_eq!(ball.velocity, Vec2::zeros());
        assert_eq!(ball.owner(), None);
    }
}
