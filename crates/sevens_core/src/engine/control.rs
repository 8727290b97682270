//! Manual control of a single player
//!
//! Intents come from whatever input layer sits on top (keyboard, gamepad,
//! network). They bypass the AI and the shot/pass rolls entirely: movement
//! is a direct displacement and kicks are raw ball velocities.

use crate::engine::events::EventKind;
use crate::engine::geometry::{direction, distance, Vec2};
use crate::engine::match_engine::MatchEngine;
use crate::engine::types::{PlayerId, Team};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ControlIntent {
    /// Held direction; `(0, 0)` stops the player
    Move { dx: f32, dy: f32 },
    SwitchPlayer,
    Pass,
    Shoot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualControl {
    pub team: Team,
    pub player: PlayerId,
    /// Unit vector of the held direction, or zero
    pub heading: Vec2,
    /// Last non-zero heading; kicks go this way
    pub facing: Vec2,
}

impl MatchEngine {
    /// Put `team`'s first outfield player under manual control
    pub fn take_control(&mut self, team: Team) -> Option<PlayerId> {
        self.release_control();
        let player = self.players.iter().find(|p| p.team == team && !p.is_goalkeeper())?.id;
        self.assign_control(team, player);
        Some(player)
    }

    /// Hand the controlled player back to the AI
    pub fn release_control(&mut self) {
        if let Some(control) = self.control.take() {
            if let Some(p) = self.players.get_mut(control.player.index()) {
                p.controlled = false;
            }
        }
    }

    pub fn controlled_player(&self) -> Option<PlayerId> {
        self.control.map(|c| c.player)
    }

    fn assign_control(&mut self, team: Team, player: PlayerId) {
        let goal = self.config.field.attacking_goal_center(team);
        let Some(p) = self.players.get_mut(player.index()) else {
            return;
        };
        p.controlled = true;
        let (facing, _) = direction(p.position, goal);
        self.control = Some(ManualControl { team, player, heading: Vec2::zeros(), facing });
        debug!(player = %player, "manual control");
    }

    /// Apply one intent; a no-op when nobody is under control
    pub fn apply_intent(&mut self, intent: ControlIntent) {
        let Some(control) = self.control else {
            return;
        };
        match intent {
            ControlIntent::Move { dx, dy } => {
                let (heading, length) = direction(Vec2::zeros(), Vec2::new(dx, dy));
                if let Some(c) = self.control.as_mut() {
                    c.heading = heading;
                    if length > 0.0 {
                        c.facing = heading;
                    }
                }
            }
            ControlIntent::SwitchPlayer => self.switch_player(control),
            ControlIntent::Pass => self.manual_kick(control, self.config.control.pass_speed, false),
            ControlIntent::Shoot => self.manual_kick(control, self.config.control.shoot_speed, true),
        }
    }

    /// Next outfield teammate in roster order, wrapping around
    fn switch_player(&mut self, control: ManualControl) {
        let team = control.team;
        let candidates: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.team == team && !p.is_goalkeeper())
            .map(|p| p.id)
            .collect();
        let next = candidates
            .iter()
            .position(|&id| id == control.player)
            .map(|i| candidates[(i + 1) % candidates.len()]);
        if let Some(next) = next {
            self.release_control();
            self.assign_control(team, next);
        }
    }

    fn manual_kick(&mut self, control: ManualControl, speed: f32, is_shot: bool) {
        let Some(player) = self.players.get(control.player.index()) else {
            return;
        };
        if distance(player.position, self.ball.position) >= self.config.control.kick_range {
            return;
        }
        let team = player.team;
        self.ball.kick(&mut self.players, control.facing * speed);
        self.last_kicker = Some(control.player);

        let at = self.elapsed();
        if is_shot {
            self.state.record_shot(team);
            self.events.push(at, EventKind::Shot { team, player: control.player, beat_keeper: false });
        } else {
            self.state.record_pass(team, false);
        }
    }

    /// Step the controlled player along its held heading
    pub(crate) fn move_controlled_player(&mut self, dt: f32) {
        let Some(control) = self.control else {
            return;
        };
        let offset = control.heading * self.config.control.move_speed * dt;
        if let Some(p) = self.players.get_mut(control.player.index()) {
            p.displace(&self.config, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::match_engine::TickStatus;

    const TICK_MS: f32 = 1000.0 / 60.0;

    fn engine() -> MatchEngine {
        MatchEngine::seeded(EngineConfig::default(), 5)
    }

    #[test]
    fn test_take_control_picks_first_outfielder() {
        let mut engine = engine();
        assert_eq!(engine.take_control(Team::Away), Some(PlayerId(8)));
        assert!(engine.players()[8].controlled);
        assert_eq!(engine.players().iter().filter(|p| p.controlled).count(), 1);

        engine.release_control();
        assert!(engine.players().iter().all(|p| !p.controlled));
        assert_eq!(engine.controlled_player(), None);
    }

    #[test]
    fn test_controlled_player_moves_at_fixed_speed() {
        let mut engine = engine();
        let id = engine.take_control(Team::Home).unwrap();
        let start = engine.players()[id.index()].position;

        engine.apply_intent(ControlIntent::Move { dx: 0.0, dy: 3.0 });
        assert_eq!(engine.tick(100.0), TickStatus::Running);
        let moved = engine.players()[id.index()].position - start;
        assert!(moved.x.abs() < 1e-4);
        assert!((moved.y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_switch_player_cycles_outfielders() {
        let mut engine = engine();
        engine.take_control(Team::Home);
        let mut seen = Vec::new();
        for _ in 0..6 {
            engine.apply_intent(ControlIntent::SwitchPlayer);
            seen.push(engine.controlled_player().unwrap().0);
        }
        assert_eq!(seen, vec![2, 3, 4, 5, 6, 1]);
        assert_eq!(engine.players().iter().filter(|p| p.controlled).count(), 1);
    }

    #[test]
    fn test_shoot_requires_ball_in_range() {
        let mut engine = engine();
        let id = engine.take_control(Team::Home).unwrap();

        engine.apply_intent(ControlIntent::Shoot);
        assert_eq!(engine.state().home.shots, 0);

        engine.players[id.index()].position = engine.ball().position - Vec2::new(30.0, 0.0);
        engine.apply_intent(ControlIntent::Shoot);
        assert_eq!(engine.state().home.shots, 1);
        assert!((engine.ball().velocity.norm() - 500.0).abs() < 1e-2);
        assert!(engine.ball().velocity.x > 0.0);
        assert_eq!(engine.last_kicker, Some(id));
        // A kick is not a change of possession
        assert_eq!(engine.since_possession_swap_ms, engine.config().rules.possession_cooldown_ms);
    }

    #[test]
    fn test_kicker_sits_out_until_ball_leaves_reach() {
        let mut engine = engine();
        let id = engine.take_control(Team::Home).unwrap();
        engine.players[id.index()].position = engine.ball().position - Vec2::new(10.0, 0.0);
        engine.apply_intent(ControlIntent::Pass);

        // Still within reach after the first tick, but not allowed to re-take it
        engine.tick(TICK_MS);
        assert_eq!(engine.ball().owner(), None);
        assert_eq!(engine.last_kicker, Some(id));

        for _ in 0..20 {
            engine.tick(TICK_MS);
        }
        assert_eq!(engine.last_kicker, None);
        assert_eq!(engine.ball().owner(), None);

        // Once clear of the ball the kicker may collect it like anyone else
        engine.players[id.index()].position = engine.ball().position;
        engine.tick(TICK_MS);
        assert_eq!(engine.ball().owner(), Some(id));
    }

    #[test]
    fn test_manual_pass_follows_facing() {
        let mut engine = engine();
        let id = engine.take_control(Team::Away).unwrap();
        engine.players[id.index()].position = engine.ball().position + Vec2::new(0.0, -20.0);
        engine.apply_intent(ControlIntent::Move { dx: 0.0, dy: 1.0 });
        engine.apply_intent(ControlIntent::Pass);

        assert_eq!(engine.ball().velocity, Vec2::new(0.0, 250.0));
        assert_eq!(engine.state().away.passes, 1);
        assert_eq!(engine.state().away.passes_completed, 0);
    }

    #[test]
    fn test_intents_ignored_without_control() {
        let mut engine = engine();
        engine.apply_intent(ControlIntent::Shoot);
        engine.apply_intent(ControlIntent::SwitchPlayer);
        assert_eq!(engine.controlled_player(), None);
        assert_eq!(engine.state().home.shots + engine.state().away.shots, 0);
    }
}
