//! Match event log

use crate::engine::types::{PlayerId, Team};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a player came to hold the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PossessionCause {
    /// Won by the coordinator's pickup check
    Pickup,
    /// A homing pass reached its receiver
    PassReceived,
    /// A resting ball was handed to the nearest player
    StuckResolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    KickOff,
    Shot { team: Team, player: PlayerId, beat_keeper: bool },
    Pass { team: Team, from: PlayerId, to: PlayerId, completed: bool },
    PossessionWon { team: Team, player: PlayerId, cause: PossessionCause },
    Goal { team: Team, home: u32, away: u32 },
    FullTime { home: u32, away: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchEvent {
    /// Match seconds elapsed
    pub at: f32,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: f32, kind: EventKind) {
        self.events.push(MatchEvent { at, kind });
    }

    pub fn as_slice(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn goals(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| matches!(e.kind, EventKind::Goal { .. }))
    }

    /// Number of events matching `pred`
    pub fn count_for(&self, pred: impl Fn(&EventKind) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.kind)).count()
    }

    pub fn into_vec(self) -> Vec<MatchEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_filter() {
        let mut log = EventLog::new();
        log.push(0.0, EventKind::KickOff);
        log.push(12.5, EventKind::Goal { team: Team::Home, home: 1, away: 0 });
        log.push(13.0, EventKind::KickOff);

        assert_eq!(log.len(), 3);
        assert_eq!(log.goals().count(), 1);
        assert_eq!(log.count_for(|k| matches!(k, EventKind::KickOff)), 2);
    }

    #[test]
    fn test_event_serializes_flat() {
        let event = MatchEvent {
            at: 3.0,
            kind: EventKind::Shot { team: Team::Away, player: PlayerId(9), beat_keeper: false },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "shot");
        assert_eq!(json["team"], "away");
        assert_eq!(json["player"], 9);
    }
}
