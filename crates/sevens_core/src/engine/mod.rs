pub mod ball;
pub mod config;
pub mod context;
pub mod control;
pub mod events;
pub mod formation;
pub mod geometry;
pub mod match_engine;
pub mod match_state;
pub mod physics_constants;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod team_power;
pub mod types;


pub use ball::{Ball, BallCommand, BallState, BallTarget, PossessionGain};
pub use config::EngineConfig;
pub use control::{ControlIntent, ManualControl};
pub use events::{EventKind, EventLog, MatchEvent, PossessionCause};
pub use geometry::Vec2;
pub use match_engine::{MatchEngine, TickStatus};
pub use match_state::{FinalStats, MatchState, TeamStats, TeamSummary};
pub use player::{Player, PlayerState, PlayerStats, PlayerView, Role};
pub use rng::{FixedSequence, RandomSource, SeededRandom};
pub use snapshot::{MatchSnapshot, RenderAdapter, ReplayDoc, ReplayRecorder};
pub use types::{PlayerId, Team};
