//! Per-tick handle the coordinator lends to each agent

use crate::engine::config::EngineConfig;
use crate::engine::events::{EventKind, EventLog};
use crate::engine::match_state::MatchState;
use crate::engine::rng::RandomSource;

/// Everything a player may touch besides itself and the ball: tuning,
/// randomness, and the shared statistics counters.
pub struct MatchContext<'a> {
    pub config: &'a EngineConfig,
    pub rng: &'a mut dyn RandomSource,
    pub state: &'a mut MatchState,
    pub events: &'a mut EventLog,
    /// Match seconds elapsed, used to stamp events
    pub elapsed: f32,
}

impl MatchContext<'_> {
    pub fn emit(&mut self, kind: EventKind) {
        self.events.push(self.elapsed, kind);
    }
}
