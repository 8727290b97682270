//! Presentation boundary
//!
//! A renderer never sees the live engine. Each frame the coordinator builds a
//! `MatchSnapshot` and hands it to a `RenderAdapter`; `ReplayRecorder` is the
//! headless adapter that keeps a thinned-out copy for later playback.

use crate::engine::ball::BallState;
use crate::engine::match_state::MatchState;
use crate::engine::player::PlayerState;
use crate::engine::types::{PlayerId, Team};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub state: BallState,
    pub owner: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub label: String,
    pub team: Team,
    pub is_goalkeeper: bool,
    pub x: f32,
    pub y: f32,
    pub has_ball: bool,
    pub state: PlayerState,
    pub stamina: f32,
    /// Aim point of a pass on its way to this player
    pub pending_receive: Option<[f32; 2]>,
    pub controlled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSnapshot {
    /// Remaining time as `m:ss`
    pub clock: String,
    /// Match seconds elapsed
    pub elapsed: f32,
    pub paused: bool,
    pub ball: BallSnapshot,
    pub players: Vec<PlayerSnapshot>,
    pub state: MatchState,
}

impl MatchSnapshot {
    pub fn carrier(&self) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.has_ball)
    }
}

/// Receives one snapshot per rendered frame
pub trait RenderAdapter {
    fn sync(&mut self, snapshot: &MatchSnapshot);
}

impl<F> RenderAdapter for F
where
    F: FnMut(&MatchSnapshot),
{
    fn sync(&mut self, snapshot: &MatchSnapshot) {
        self(snapshot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchSpec {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReplayFrame {
    /// Index of the synced frame this copy was taken from
    pub frame: u64,
    pub snapshot: MatchSnapshot,
}

/// Serialized replay: the pitch plus every kept frame in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReplayDoc {
    pub pitch: PitchSpec,
    pub every: u32,
    pub frames: Vec<ReplayFrame>,
}

/// Keeps every `every`-th synced frame (the first one always)
#[derive(Debug, Clone)]
pub struct ReplayRecorder {
    every: u32,
    seen: u64,
    doc: ReplayDoc,
}

impl ReplayRecorder {
    pub fn new(pitch: PitchSpec, every: u32) -> Self {
        let every = every.max(1);
        Self { every, seen: 0, doc: ReplayDoc { pitch, every, frames: Vec::new() } }
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.doc.frames
    }

    pub fn len(&self) -> usize {
        self.doc.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.frames.is_empty()
    }

    pub fn into_doc(self) -> ReplayDoc {
        self.doc
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.doc)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl RenderAdapter for ReplayRecorder {
    fn sync(&mut self, snapshot: &MatchSnapshot) {
        if self.seen % u64::from(self.every) == 0 {
            self.doc.frames.push(ReplayFrame { frame: self.seen, snapshot: snapshot.clone() });
        }
        self.seen += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_snapshot(elapsed: f32) -> MatchSnapshot {
        MatchSnapshot {
            clock: "3:00".to_string(),
            elapsed,
            paused: false,
            ball: BallSnapshot {
                x: 600.0,
                y: 360.0,
                vx: 0.0,
                vy: 0.0,
                state: BallState::Free,
                owner: None,
            },
            players: Vec::new(),
            state: MatchState::new(180.0),
        }
    }

    #[test]
    fn test_recorder_keeps_every_nth_frame() {
        let mut recorder = ReplayRecorder::new(PitchSpec { width: 1200.0, height: 720.0 }, 3);
        for i in 0..10 {
            recorder.sync(&blank_snapshot(i as f32));
        }
        let kept: Vec<u64> = recorder.frames().iter().map(|f| f.frame).collect();
        assert_eq!(kept, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_zero_interval_keeps_everything() {
        let mut recorder = ReplayRecorder::new(PitchSpec { width: 1200.0, height: 720.0 }, 0);
        recorder.sync(&blank_snapshot(0.0));
        recorder.sync(&blank_snapshot(0.1));
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_replay_writes_json() {
        let mut recorder = ReplayRecorder::new(PitchSpec { width: 1200.0, height: 720.0 }, 1);
        recorder.sync(&blank_snapshot(0.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.json");
        recorder.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let doc: ReplayDoc = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.frames.len(), 1);
        assert_eq!(doc.frames[0].snapshot.ball.state, BallState::Free);
    }

    #[test]
    fn test_closure_adapter() {
        let mut seen = Vec::new();
        {
            let mut adapter = |s: &MatchSnapshot| seen.push(s.elapsed);
            adapter.sync(&blank_snapshot(1.5));
        }
        assert_eq!(seen, vec![1.5]);
    }
}
