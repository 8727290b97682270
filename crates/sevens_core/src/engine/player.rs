//! Player agent: decision state machine and movement
//!
//! ## State selection (re-evaluated every tick)
//! ```text
//! has_ball                  → HasBall     shoot / pass / dribble
//! goalkeeper                → Goalkeeper  track ball y on own line
//! own team's pass in flight → ChaseBall   receiver runs to the aim point
//!                           → Position    everyone else, passer included
//! closest to the ball       → ChaseBall   run at the ball
//! otherwise                 → Position    return to formation anchor
//! ```
//!
//! Only the decision cooldown and the pending receive point persist
//! between ticks. A player never
//! touches the ball directly: shots and passes come back to the
//! coordinator as a `BallCommand`, which it executes before the next
//! player moves.

use crate::engine::ball::{Ball, BallCommand};
use crate::engine::config::{BodyConfig, EngineConfig};
use crate::engine::context::MatchContext;
use crate::engine::events::EventKind;
use crate::engine::formation::TEAM_SIZE;
use crate::engine::geometry::{clamp_to_field, direction, distance, progress_toward_goal, Vec2};
use crate::engine::team_power::EffectiveStats;
use crate::engine::types::{PlayerId, Team};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    HasBall,
    ChaseBall,
    Position,
    Goalkeeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    GK,
    DF,
    MF,
    FW,
}

impl Role {
    pub fn is_goalkeeper(self) -> bool {
        self == Role::GK
    }
}

/// Base attributes; `stamina` is the live value in `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerStats {
    pub speed: f32,
    pub attack: f32,
    pub defense: f32,
    pub stamina: f32,
}

/// Read-only copy of the fields other agents may look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub team: Team,
    pub position: Vec2,
    pub is_goalkeeper: bool,
    pub defense: f32,
    pub has_ball: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub team: Team,
    pub role: Role,
    pub radius: f32,
    /// Formation anchor: fallback target and kickoff spot
    pub anchor: Vec2,
    pub position: Vec2,
    pub stats: PlayerStats,
    pub has_ball: bool,
    pub state: PlayerState,
    /// Time until a new shot or pass may be started (ms)
    pub decision_cooldown_ms: f32,
    /// Aim point of a homing pass on its way to this player
    pub pending_receive: Option<Vec2>,
    /// Driven by `ControlIntent`s instead of the AI
    pub controlled: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        team: Team,
        role: Role,
        anchor: Vec2,
        stats: PlayerStats,
        body: &BodyConfig,
    ) -> Self {
        let is_goalkeeper = role.is_goalkeeper();
        Self {
            id,
            team,
            role,
            radius: body.radius_for(is_goalkeeper),
            anchor,
            position: anchor,
            stats,
            has_ball: false,
            state: if is_goalkeeper { PlayerState::Goalkeeper } else { PlayerState::Position },
            decision_cooldown_ms: 0.0,
            pending_receive: None,
            controlled: false,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.role.is_goalkeeper()
    }

    /// Pickup distance between this player's centre and the ball's
    pub fn reach(&self, body: &BodyConfig) -> f32 {
        body.reach(self.radius)
    }

    /// `home-0` .. `away-6`
    pub fn label(&self) -> String {
        format!("{}-{}", self.team, self.id.index() % TEAM_SIZE)
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            team: self.team,
            position: self.position,
            is_goalkeeper: self.is_goalkeeper(),
            defense: self.stats.defense,
            has_ball: self.has_ball,
        }
    }

    /// Kickoff reset after a goal
    pub fn reset_to_anchor(&mut self) {
        self.position = self.anchor;
        self.has_ball = false;
        self.pending_receive = None;
    }

    /// Advance this agent by one tick.
    ///
    /// `teammates` may include this player; it is skipped wherever it
    /// matters. Returns the ball command to execute, if the agent shot or
    /// passed this tick.
    pub fn update(
        &mut self,
        ctx: &mut MatchContext,
        dt_ms: f32,
        ball: &Ball,
        teammates: &[PlayerView],
        opponents: &[PlayerView],
        team_power: f32,
    ) -> Option<BallCommand> {
        let dt = dt_ms / 1000.0;
        self.decision_cooldown_ms = (self.decision_cooldown_ms - dt_ms).max(0.0);
        if self.pending_receive.is_some() && ball.pass_receiver() != Some(self.id) {
            self.pending_receive = None;
        }

        let effective = EffectiveStats::from_team_power(&self.stats, team_power);
        self.state = self.select_state(ball, teammates);
        let config = ctx.config;

        match self.state {
            PlayerState::HasBall => {
                self.drain_stamina(config, dt, 1.0);
                let command = self.act_with_ball(ctx, &effective, teammates, opponents);
                if command.is_none() {
                    let goal = config.field.attacking_goal_center(self.team);
                    self.move_toward(
                        config,
                        goal,
                        effective.speed * config.decision.dribble_speed_factor,
                        dt,
                    );
                }
                command
            }
            PlayerState::ChaseBall => {
                let target = self.pending_receive.unwrap_or(ball.position);
                self.move_toward(config, target, effective.speed, dt);
                self.drain_stamina(config, dt, 1.0);
                None
            }
            PlayerState::Goalkeeper => {
                let target = self.goalkeeper_target(config, ball.position);
                self.move_toward(
                    config,
                    target,
                    effective.speed * config.decision.goalkeeper_speed_factor,
                    dt,
                );
                self.drain_stamina(config, dt, config.stamina.goalkeeper_drain_factor);
                None
            }
            PlayerState::Position => {
                let anchor = self.anchor;
                self.move_toward(
                    config,
                    anchor,
                    effective.speed * config.decision.position_speed_factor,
                    dt,
                );
                self.recover_stamina(config, dt);
                None
            }
        }
    }

    fn select_state(&self, ball: &Ball, teammates: &[PlayerView]) -> PlayerState {
        if self.has_ball {
            PlayerState::HasBall
        } else if self.is_goalkeeper() {
            PlayerState::Goalkeeper
        } else if let Some(receiver) = self.teammate_pass_receiver(ball, teammates) {
            if receiver == self.id {
                PlayerState::ChaseBall
            } else {
                PlayerState::Position
            }
        } else if self.is_closest_to(ball.position, teammates) {
            PlayerState::ChaseBall
        } else {
            PlayerState::Position
        }
    }

    /// Receiver of a pass in flight between this player's teammates
    fn teammate_pass_receiver(&self, ball: &Ball, teammates: &[PlayerView]) -> Option<PlayerId> {
        ball.pass_receiver().filter(|&r| r == self.id || teammates.iter().any(|t| t.id == r))
    }

    /// Closest outfield player of this team to `target`; ties go to roster
    /// order. The keeper never leaves its line, so it does not count.
    fn is_closest_to(&self, target: Vec2, teammates: &[PlayerView]) -> bool {
        let own = distance(self.position, target);
        teammates
            .iter()
            .filter(|t| t.id != self.id && !t.is_goalkeeper)
            .all(|t| {
                let theirs = distance(t.position, target);
                own < theirs || (own == theirs && self.id < t.id)
            })
    }

    fn goalkeeper_target(&self, config: &EngineConfig, ball: Vec2) -> Vec2 {
        let (low, high) = config.field.goal_band();
        let margin = config.decision.goalkeeper_band_margin;
        Vec2::new(self.anchor.x, ball.y.clamp(low - margin, high + margin))
    }

    fn act_with_ball(
        &mut self,
        ctx: &mut MatchContext,
        effective: &EffectiveStats,
        teammates: &[PlayerView],
        opponents: &[PlayerView],
    ) -> Option<BallCommand> {
        if self.decision_cooldown_ms > 0.0 {
            return None;
        }
        let config = ctx.config;
        let decision = &config.decision;

        let goal = config.field.attacking_goal_center(self.team);
        if distance(self.position, goal) < decision.shooting_range {
            return Some(self.shoot(ctx, effective, opponents));
        }

        let pressure_radius = decision.passing_pressure_radius;
        let pressured =
            opponents.iter().any(|o| distance(o.position, self.position) < pressure_radius);
        if pressured && ctx.rng.chance(decision.pressured_pass_probability) {
            if let Some(receiver) = self.most_advanced_teammate(teammates) {
                return Some(self.pass_to(ctx, effective, receiver));
            }
        }
        None
    }

    fn most_advanced_teammate(&self, teammates: &[PlayerView]) -> Option<PlayerView> {
        teammates
            .iter()
            .filter(|t| t.id != self.id)
            .copied()
            .fold(None, |best: Option<PlayerView>, candidate| match best {
                Some(b)
                    if progress_toward_goal(self.team, b.position)
                        >= progress_toward_goal(self.team, candidate.position) =>
                {
                    Some(b)
                }
                _ => Some(candidate),
            })
    }

    fn shoot(
        &mut self,
        ctx: &mut MatchContext,
        effective: &EffectiveStats,
        opponents: &[PlayerView],
    ) -> BallCommand {
        let config = ctx.config;
        let decision = &config.decision;
        ctx.state.record_shot(self.team);

        let power = effective.attack + ctx.rng.range(0.0, decision.shot_power_bonus);
        let save = opponents
            .iter()
            .find(|o| o.is_goalkeeper)
            .map(|keeper| keeper.defense + ctx.rng.range(0.0, decision.save_bonus))
            .unwrap_or(0.0);
        let beat_keeper = power > save;

        let goal = config.field.attacking_goal_center(self.team);
        let (target, power) = if beat_keeper {
            let jitter = decision.shot_aim_jitter;
            (Vec2::new(goal.x, goal.y + ctx.rng.range(-jitter, jitter)), power)
        } else {
            let side = if ctx.rng.chance(0.5) { 1.0 } else { -1.0 };
            let offset =
                ctx.rng.range(decision.deflection_offset_min, decision.deflection_offset_max);
            (Vec2::new(goal.x, goal.y + side * offset), power * decision.deflection_power_factor)
        };

        trace!(player = %self.label(), power, save, beat_keeper, "shot");
        ctx.emit(EventKind::Shot { team: self.team, player: self.id, beat_keeper });
        self.restart_cooldown(ctx);
        BallCommand::Shoot { target, power }
    }

    fn pass_to(
        &mut self,
        ctx: &mut MatchContext,
        effective: &EffectiveStats,
        receiver: PlayerView,
    ) -> BallCommand {
        let config = ctx.config;
        let decision = &config.decision;
        let pass_distance = distance(self.position, receiver.position);
        let roll = effective.attack + ctx.rng.range(0.0, decision.pass_roll_bonus);
        let completed = roll >= decision.pass_threshold(pass_distance);

        ctx.state.record_pass(self.team, completed);
        ctx.emit(EventKind::Pass { team: self.team, from: self.id, to: receiver.id, completed });
        trace!(player = %self.label(), to = %receiver.id, roll, pass_distance, completed, "pass");

        let command = if completed {
            BallCommand::Pass { receiver: receiver.id, accuracy: 1.0 }
        } else {
            let spread = decision.errant_pass_offset;
            let offset = Vec2::new(ctx.rng.range(-spread, spread), ctx.rng.range(-spread, spread));
            BallCommand::Shoot {
                target: receiver.position + offset,
                power: decision.errant_pass_power,
            }
        };
        self.restart_cooldown(ctx);
        command
    }

    fn restart_cooldown(&mut self, ctx: &mut MatchContext) {
        let decision = &ctx.config.decision;
        let jitter = ctx.rng.range(0.0, decision.decision_jitter_ms);
        self.decision_cooldown_ms = decision.decision_interval_ms + jitter;
    }

    /// Step toward `target` at `speed` scaled by fatigue; never overshoots
    fn move_toward(&mut self, config: &EngineConfig, target: Vec2, speed: f32, dt: f32) {
        let (dir, length) = direction(self.position, target);
        if length < config.decision.arrival_epsilon {
            return;
        }
        let speed = speed * config.stamina.speed_multiplier(self.stats.stamina);
        let step = (speed * dt).min(length);
        self.position = clamp_to_field(self.position + dir * step, self.radius, &config.field);
    }

    /// Direct displacement for a manually controlled player
    pub fn displace(&mut self, config: &EngineConfig, offset: Vec2) {
        self.position = clamp_to_field(self.position + offset, self.radius, &config.field);
    }

    fn drain_stamina(&mut self, config: &EngineConfig, dt: f32, factor: f32) {
        let drained = self.stats.stamina - config.stamina.drain_per_second * factor * dt;
        self.stats.stamina = drained.clamp(0.0, config.stamina.max);
    }

    fn recover_stamina(&mut self, config: &EngineConfig, dt: f32) {
        let recovered = self.stats.stamina + config.stamina.recovery_per_second * dt;
        self.stats.stamina = recovered.clamp(0.0, config.stamina.max);
    }
}

/// Look a player up by identifier; `None` once the identifier stops resolving
pub fn find_player(players: &[Player], id: PlayerId) -> Option<&Player> {
    match players.get(id.index()) {
        Some(p) if p.id == id => Some(p),
        _ => players.iter().find(|p| p.id == id),
    }
}

pub fn find_player_mut(players: &mut [Player], id: PlayerId) -> Option<&mut Player> {
    let index = match players.get(id.index()) {
        Some(p) if p.id == id => Some(id.index()),
        _ => players.iter().position(|p| p.id == id),
    }?;
    players.get_mut(index)
}
