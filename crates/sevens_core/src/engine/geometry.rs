//! Vector math helpers shared by the ball, the players and the coordinator

use crate::engine::config::FieldConfig;
use crate::engine::types::Team;

pub type Vec2 = nalgebra::Vector2<f32>;

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).norm()
}

/// Unit vector from `from` toward `to`, plus the distance between them.
/// A zero-length offset is divided by 1 instead of 0 so it stays finite.
pub fn direction(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let length = delta.norm();
    let divisor = if length > 0.0 { length } else { 1.0 };
    (delta / divisor, length)
}

/// Unit vector at `angle` radians
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Keep a body of `radius` fully inside the pitch
pub fn clamp_to_field(pos: Vec2, radius: f32, field: &FieldConfig) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, (field.width - radius).max(radius)),
        pos.y.clamp(radius, (field.height - radius).max(radius)),
    )
}

pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    distance(a, b) < a_radius + b_radius
}

/// How far along its attacking axis a position is for `team`
pub fn progress_toward_goal(team: Team, pos: Vec2) -> f32 {
    pos.x * team.attack_sign()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_zero_length_is_finite() {
        let p = Vec2::new(5.0, 5.0);
        let (dir, len) = direction(p, p);
        assert_eq!(len, 0.0);
        assert!(dir.x.is_finite() && dir.y.is_finite());
        assert_eq!(dir, Vec2::zeros());
    }

    #[test]
    fn test_direction_is_unit() {
        let (dir, len) = direction(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((len - 5.0).abs() < 1e-6);
        assert!((dir.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_to_field() {
        let field = FieldConfig::default();
        let clamped = clamp_to_field(Vec2::new(-50.0, 900.0), 24.0, &field);
        assert_eq!(clamped, Vec2::new(24.0, field.height - 24.0));
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_progress_respects_attacking_direction() {
        let p = Vec2::new(800.0, 100.0);
        assert!(progress_toward_goal(Team::Home, p) > progress_toward_goal(Team::Home, Vec2::new(200.0, 100.0)));
        assert!(progress_toward_goal(Team::Away, p) < progress_toward_goal(Team::Away, Vec2::new(200.0, 100.0)));
    }
}
