//! Match coordinator
//!
//! Owns the roster, the ball, the clock and the random source, and drives
//! them in a fixed order every tick:
//!
//! 1. pause countdown (goal celebration), match clock
//! 2. team power for both sides
//! 3. every AI player in roster order, executing its ball command at once
//! 4. the ball itself
//! 5. possession arbitration, possession time
//! 6. goal detection

use crate::engine::ball::{Ball, PossessionGain};
use crate::engine::config::EngineConfig;
use crate::engine::context::MatchContext;
use crate::engine::control::ManualControl;
use crate::engine::events::{EventKind, EventLog, MatchEvent, PossessionCause};
use crate::engine::formation::build_roster;
use crate::engine::geometry::circles_overlap;
use crate::engine::match_state::{format_clock, FinalStats, MatchState};
use crate::engine::player::{find_player, Player, PlayerView};
use crate::engine::rng::{RandomSource, SeededRandom};
use crate::engine::snapshot::{BallSnapshot, MatchSnapshot, PlayerSnapshot, RenderAdapter};
use crate::engine::team_power::{calculate_team_power, TeamPower};
use crate::engine::types::{PlayerId, Team};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Outcome of a single `tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    Running,
    /// Frozen after a goal; only the countdowns advanced
    Paused,
    GoalScored(Team),
    /// The clock reached zero on this tick
    FullTime,
    /// The match had already ended; nothing changed
    Finished,
}

pub struct MatchEngine {
    pub(crate) config: EngineConfig,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) players: Vec<Player>,
    pub(crate) ball: Ball,
    pub(crate) state: MatchState,
    pub(crate) events: EventLog,
    team_power: TeamPower,
    duration: f32,
    /// Time since the ball last changed hands (ms)
    pub(crate) since_possession_swap_ms: f32,
    /// Most recent player to gain the ball; a carrier re-taking its own
    /// dropped ball is not a swap
    last_possessor: Option<PlayerId>,
    /// Player whose kick is still within its own reach
    pub(crate) last_kicker: Option<PlayerId>,
    /// Seconds of goal pause left
    pause_remaining: f32,
    pub(crate) control: Option<ManualControl>,
}

impl MatchEngine {
    /// Fresh match: roster rolled from `rng`, ball at the centre spot
    pub fn new(config: EngineConfig, rng: impl RandomSource + 'static) -> Self {
        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let players = build_roster(&config, rng.as_mut());
        let ball = Ball::new(&config);
        let duration = config.rules.duration_seconds.max(0.0);
        let cooldown = config.rules.possession_cooldown_ms;
        let mut events = EventLog::new();
        events.push(0.0, EventKind::KickOff);

        Self {
            state: MatchState::new(duration),
            config,
            rng,
            players,
            ball,
            events,
            team_power: TeamPower::default(),
            duration,
            since_possession_swap_ms: cooldown,
            last_possessor: None,
            last_kicker: None,
            pause_remaining: 0.0,
            control: None,
        }
    }

    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, SeededRandom::new(seed))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn events(&self) -> &[MatchEvent] {
        self.events.as_slice()
    }

    pub fn team_power(&self) -> TeamPower {
        self.team_power
    }

    pub fn is_over(&self) -> bool {
        self.state.is_match_over
    }

    pub fn is_paused(&self) -> bool {
        self.pause_remaining > 0.0
    }

    /// Match seconds played; the goal pause does not count
    pub fn elapsed(&self) -> f32 {
        self.duration - self.state.time_remaining
    }

    pub fn final_stats(&self) -> FinalStats {
        self.state.final_stats()
    }

    pub fn into_events(self) -> Vec<MatchEvent> {
        self.events.into_vec()
    }

    /// Advance the match by `delta_ms`
    pub fn tick(&mut self, delta_ms: f32) -> TickStatus {
        if self.state.is_match_over {
            return TickStatus::Finished;
        }
        let delta_ms = delta_ms.max(0.0);
        let dt = delta_ms / 1000.0;
        self.since_possession_swap_ms += delta_ms;

        if self.pause_remaining > 0.0 {
            self.pause_remaining -= dt;
            if self.pause_remaining <= 0.0 {
                self.pause_remaining = 0.0;
                self.events.push(self.elapsed(), EventKind::KickOff);
            }
            return TickStatus::Paused;
        }

        if self.state.advance_clock(dt) {
            let (home, away) = (self.state.home.score, self.state.away.score);
            self.events.push(self.elapsed(), EventKind::FullTime { home, away });
            info!(home, away, "full time");
            return TickStatus::FullTime;
        }

        self.refresh_team_power();
        self.update_players(delta_ms);
        self.move_controlled_player(dt);

        let gain = self.ball.update(delta_ms, &mut self.players, &self.config, self.rng.as_mut());
        if let Some(gain) = gain {
            self.on_possession(gain);
        }

        self.arbitrate_possession();
        if let Some(owner) = self.ball.owner() {
            if let Some(team) = self.players.get(owner.index()).map(|p| p.team) {
                self.state.add_possession(team, dt);
            }
        }

        match self.detect_goal() {
            Some(scorer) => TickStatus::GoalScored(scorer),
            None => TickStatus::Running,
        }
    }

    /// `tick`, then hand the resulting frame to `adapter`
    pub fn tick_and_sync(&mut self, delta_ms: f32, adapter: &mut dyn RenderAdapter) -> TickStatus {
        let status = self.tick(delta_ms);
        adapter.sync(&self.snapshot());
        status
    }

    fn refresh_team_power(&mut self) {
        for team in Team::BOTH {
            let roster = self.players.iter().filter(|p| p.team == team).map(|p| &p.stats);
            let power = calculate_team_power(roster, self.rng.as_mut());
            self.team_power.set(team, power);
        }
    }

    fn update_players(&mut self, dt_ms: f32) {
        let elapsed = self.elapsed();
        let mut views: Vec<PlayerView> = self.players.iter().map(Player::view).collect();

        for index in 0..self.players.len() {
            if self.players[index].controlled {
                continue;
            }
            let team = self.players[index].team;
            let (teammates, opponents): (Vec<PlayerView>, Vec<PlayerView>) =
                views.iter().partition(|v| v.team == team);
            let power = self.team_power.get(team);

            let mut ctx = MatchContext {
                config: &self.config,
                rng: self.rng.as_mut(),
                state: &mut self.state,
                events: &mut self.events,
                elapsed,
            };
            let command = self.players[index].update(
                &mut ctx,
                dt_ms,
                &self.ball,
                &teammates,
                &opponents,
                power,
            );

            match command {
                Some(command) => {
                    self.ball.execute(command, &mut self.players, &self.config, self.rng.as_mut());
                    self.last_kicker = Some(self.players[index].id);
                    for (view, player) in views.iter_mut().zip(&self.players) {
                        *view = player.view();
                    }
                }
                None => views[index] = self.players[index].view(),
            }
        }
    }

    fn on_possession(&mut self, gain: PossessionGain) {
        self.last_kicker = None;
        if self.last_possessor == Some(gain.player) {
            trace!(player = %gain.player, cause = ?gain.cause, "carrier kept the ball");
            return;
        }
        self.last_possessor = Some(gain.player);
        self.since_possession_swap_ms = 0.0;
        debug!(player = %gain.player, team = %gain.team, cause = ?gain.cause, "possession won");
        self.events.push(
            self.elapsed(),
            EventKind::PossessionWon { team: gain.team, player: gain.player, cause: gain.cause },
        );
    }

    /// Loose ball and cooldown elapsed: the first player in roster order
    /// within reach takes it. The last kicker sits out until the ball has
    /// left its reach.
    fn arbitrate_possession(&mut self) {
        let margin = self.config.body.reach_margin;
        let (ball_position, ball_radius) = (self.ball.position, self.ball.radius);
        let in_reach =
            |p: &Player| circles_overlap(p.position, p.radius + margin, ball_position, ball_radius);

        if let Some(kicker) = self.last_kicker {
            if !find_player(&self.players, kicker).is_some_and(in_reach) {
                self.last_kicker = None;
            }
        }
        if self.ball.owner().is_some()
            || self.since_possession_swap_ms < self.config.rules.possession_cooldown_ms
        {
            return;
        }

        let kicker = self.last_kicker;
        let winner = self
            .players
            .iter()
            .find(|&p| Some(p.id) != kicker && in_reach(p))
            .map(|p| (p.id, p.team));

        if let Some((player, team)) = winner {
            if self.ball.set_owner(&mut self.players, player, &self.config) {
                self.on_possession(PossessionGain { player, team, cause: PossessionCause::Pickup });
            }
        }
    }

    fn detect_goal(&mut self) -> Option<Team> {
        let defending = self.config.field.goal_entered(self.ball.position)?;
        let scorer = defending.opponent();
        self.state.record_goal(scorer);

        let (home, away) = (self.state.home.score, self.state.away.score);
        debug!(team = %scorer, home, away, "goal");
        self.events.push(self.elapsed(), EventKind::Goal { team: scorer, home, away });

        self.reset_for_kickoff();
        self.pause_remaining = self.config.rules.goal_pause_seconds;
        Some(scorer)
    }

    fn reset_for_kickoff(&mut self) {
        for player in &mut self.players {
            player.reset_to_anchor();
        }
        self.ball.reset_to_center(&self.config);
        self.last_possessor = None;
        self.last_kicker = None;
    }

    /// Read-only frame for the presentation layer
    pub fn snapshot(&self) -> MatchSnapshot {
        let ball = &self.ball;
        MatchSnapshot {
            clock: format_clock(self.state.time_remaining),
            elapsed: self.elapsed(),
            paused: self.is_paused(),
            ball: BallSnapshot {
                x: ball.position.x,
                y: ball.position.y,
                vx: ball.velocity.x,
                vy: ball.velocity.y,
                state: ball.state,
                owner: ball.owner(),
            },
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    label: p.label(),
                    team: p.team,
                    is_goalkeeper: p.is_goalkeeper(),
                    x: p.position.x,
                    y: p.position.y,
                    has_ball: p.has_ball,
                    state: p.state,
                    stamina: p.stats.stamina,
                    pending_receive: p.pending_receive.map(|v| [v.x, v.y]),
                    controlled: p.controlled,
                })
                .collect(),
            state: self.state.clone(),
        }
    }
}
