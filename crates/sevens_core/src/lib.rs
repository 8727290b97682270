//! # sevens_core - Seven-a-Side Football Match Simulation
//!
//! Fourteen autonomous agents and one ball on a 1200 x 720 pitch, advanced
//! in fixed ticks by a single coordinator.
//!
//! ## Features
//! - Seeded simulation (same seed and step = same match)
//! - Ball state machine with possession locks, homing passes and stuck-ball recovery
//! - Per-tick team power feeding individual player stats
//! - Render-agnostic snapshots and replay recording
//! - JSON API for headless runs
//!
//! ```rust
//! use sevens_core::{EngineConfig, MatchEngine, TickStatus};
//!
//! let mut engine = MatchEngine::seeded(EngineConfig::quick(), 42);
//! while engine.tick(1000.0 / 60.0) != TickStatus::FullTime {}
//! println!("{}", engine.final_stats().report());
//! ```

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Agent and ball updates take the whole tick context
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod api;
pub mod engine;
pub mod error;

pub use api::{request_schema_json, simulate_match, simulate_match_json, MatchReport, MatchRequest};
pub use engine::{
    Ball, ControlIntent, EngineConfig, FinalStats, MatchEngine, MatchEvent, MatchSnapshot,
    MatchState, Player, PlayerId, RenderAdapter, ReplayRecorder, Team, TickStatus,
};
pub use error::{MatchError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
