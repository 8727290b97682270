//! Pitch and body geometry

use crate::engine::geometry::Vec2;
use crate::engine::physics_constants::{body, field};
use crate::engine::types::Team;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pitch dimensions and goal geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: field::WIDTH,
            height: field::HEIGHT,
            goal_width: field::GOAL_WIDTH,
            goal_depth: field::GOAL_DEPTH,
        }
    }
}

impl FieldConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Open interval of y inside the goal mouth
    pub fn goal_band(&self) -> (f32, f32) {
        let half = self.goal_width / 2.0;
        let cy = self.height / 2.0;
        (cy - half, cy + half)
    }

    pub fn in_goal_band(&self, y: f32) -> bool {
        let (low, high) = self.goal_band();
        y > low && y < high
    }

    /// x of the end line a team defends
    pub fn own_goal_x(&self, team: Team) -> f32 {
        match team {
            Team::Home => 0.0,
            Team::Away => self.width,
        }
    }

    /// Centre of the goal a team attacks
    pub fn attacking_goal_center(&self, team: Team) -> Vec2 {
        Vec2::new(self.own_goal_x(team.opponent()), self.height / 2.0)
    }

    /// Which goal (if any) the position is in, named by the defending team
    pub fn goal_entered(&self, pos: Vec2) -> Option<Team> {
        if !self.in_goal_band(pos.y) {
            return None;
        }
        if pos.x <= self.goal_depth {
            Some(Team::Home)
        } else if pos.x >= self.width - self.goal_depth {
            Some(Team::Away)
        } else {
            None
        }
    }
}

/// Collision radii
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BodyConfig {
    pub player_radius: f32,
    pub goalkeeper_radius: f32,
    pub ball_radius: f32,
    pub reach_margin: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            player_radius: body::PLAYER_RADIUS,
            goalkeeper_radius: body::GOALKEEPER_RADIUS,
            ball_radius: body::BALL_RADIUS,
            reach_margin: body::REACH_MARGIN,
        }
    }
}

impl BodyConfig {
    pub fn radius_for(&self, is_goalkeeper: bool) -> f32 {
        if is_goalkeeper {
            self.goalkeeper_radius
        } else {
            self.player_radius
        }
    }

    /// Pickup distance for a body of the given radius
    pub fn reach(&self, player_radius: f32) -> f32 {
        player_radius + self.ball_radius + self.reach_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_band_is_centered() {
        let field = FieldConfig::default();
        assert_eq!(field.goal_band(), (320.0, 400.0));
        assert!(field.in_goal_band(360.0));
        assert!(!field.in_goal_band(320.0));
    }

    #[test]
    fn test_goal_entered_names_defending_team() {
        let field = FieldConfig::default();
        assert_eq!(field.goal_entered(Vec2::new(10.0, 360.0)), Some(Team::Home));
        assert_eq!(field.goal_entered(Vec2::new(1195.0, 350.0)), Some(Team::Away));
        assert_eq!(field.goal_entered(Vec2::new(10.0, 200.0)), None);
        assert_eq!(field.goal_entered(Vec2::new(600.0, 360.0)), None);
    }

    #[test]
    fn test_reach_adds_ball_and_margin() {
        let body = BodyConfig::default();
        assert_eq!(body.reach(body.player_radius), 34.0);
        assert_eq!(body.reach(body.radius_for(true)), 38.0);
    }
}
