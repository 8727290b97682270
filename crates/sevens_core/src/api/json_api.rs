//! JSON surface for headless matches
//!
//! ```json
//! { "schema_version": 1, "seed": 42, "fps": 60, "include_events": true }
//! ```

use crate::engine::config::EngineConfig;
use crate::engine::events::MatchEvent;
use crate::engine::match_engine::MatchEngine;
use crate::engine::match_state::FinalStats;
use crate::engine::snapshot::{PitchSpec, RenderAdapter, ReplayDoc, ReplayRecorder};
use crate::error::{MatchError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SCHEMA_VERSION: u8 = 1;

const MAX_FPS: u32 = 1000;

fn default_fps() -> u32 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Fixed simulation rate; each tick advances `1000 / fps` ms
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Overrides the configured match length
    #[serde(default)]
    pub duration_seconds: Option<f32>,
    /// `realistic`, `arcade` or `quick`; ignored when `config` is given
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub include_events: bool,
    /// Keep every Nth frame as a replay
    #[serde(default)]
    pub record_every: Option<u32>,
}

impl MatchRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            fps: default_fps(),
            duration_seconds: None,
            preset: None,
            config: None,
            include_events: false,
            record_every: None,
        }
    }

    /// Configuration this request runs with, validated
    pub fn resolve_config(&self) -> Result<EngineConfig> {
        let mut config = match (&self.config, &self.preset) {
            (Some(config), _) => config.clone(),
            (None, Some(name)) => EngineConfig::preset(name)
                .ok_or_else(|| MatchError::InvalidRequest(format!("unknown preset '{}'", name)))?,
            (None, None) => EngineConfig::default(),
        };
        if let Some(seconds) = self.duration_seconds {
            config.rules.duration_seconds = seconds;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(MatchError::UnsupportedSchema {
                found: self.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(MatchError::InvalidRequest(format!(
                "fps must be between 1 and {}, got {}",
                MAX_FPS, self.fps
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchReport {
    pub schema_version: u8,
    pub seed: u64,
    pub ticks: u64,
    pub score_line: String,
    pub final_stats: FinalStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<MatchEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay: Option<ReplayDoc>,
}

/// Run a whole match at a fixed step
pub fn simulate_match(request: &MatchRequest) -> Result<MatchReport> {
    request.validate()?;
    let config = request.resolve_config()?;
    let step_ms = 1000.0 / request.fps as f32;
    let pitch = PitchSpec { width: config.field.width, height: config.field.height };

    let mut engine = MatchEngine::seeded(config, request.seed);
    let mut recorder = request.record_every.map(|every| ReplayRecorder::new(pitch, every));
    let mut ticks = 0u64;
    while !engine.is_over() {
        match recorder.as_mut() {
            Some(recorder) => engine.tick_and_sync(step_ms, recorder as &mut dyn RenderAdapter),
            None => engine.tick(step_ms),
        };
        ticks += 1;
    }
    debug!(seed = request.seed, ticks, score = %engine.state().score_line(), "match simulated");

    let final_stats = engine.final_stats();
    let score_line = engine.state().score_line();
    let events = if request.include_events { engine.into_events() } else { Vec::new() };
    Ok(MatchReport {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        ticks,
        score_line,
        final_stats,
        events,
        replay: recorder.map(ReplayRecorder::into_doc),
    })
}

/// `simulate_match` over JSON text
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let report = simulate_match(&request)?;
    Ok(serde_json::to_string(&report)?)
}

/// JSON Schema of `MatchRequest`
pub fn request_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(MatchRequest);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_request(seed: u64) -> MatchRequest {
        MatchRequest { duration_seconds: Some(5.0), ..MatchRequest::new(seed) }
    }

    #[test]
    fn test_simulate_short_match() {
        let report = simulate_match(&quick_request(42)).unwrap();
        assert!(report.final_stats.is_match_over);
        // 5 s at 60 Hz, plus any goal pause
        assert!(report.ticks >= 300);
        assert!(report.events.is_empty());
        assert!(report.replay.is_none());
    }

    #[test]
    fn test_unsupported_schema_rejected() {
        let request = MatchRequest { schema_version: 2, ..quick_request(1) };
        match simulate_match(&request) {
            Err(MatchError::UnsupportedSchema { found: 2, expected: 1 }) => {}
            other => panic!("expected schema error, got {:?}", other.map(|r| r.score_line)),
        }
    }

    #[test]
    fn test_zero_fps_rejected() {
        let request = MatchRequest { fps: 0, ..quick_request(1) };
        assert!(matches!(simulate_match(&request), Err(MatchError::InvalidRequest(_))));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let request = MatchRequest { preset: Some("turbo".into()), ..quick_request(1) };
        assert!(matches!(simulate_match(&request), Err(MatchError::InvalidRequest(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let request = MatchRequest { duration_seconds: Some(-5.0), ..quick_request(1) };
        assert!(matches!(simulate_match(&request), Err(MatchError::InvalidConfig(_))));
    }

    #[test]
    fn test_json_round_trip_with_events_and_replay() {
        let json = r#"{"schema_version":1,"seed":7,"fps":30,"duration_seconds":4.0,
                       "include_events":true,"record_every":10}"#;
        let out = simulate_match_json(json).unwrap();
        let report: MatchReport = serde_json::from_str(&out).unwrap();
        assert_eq!(report.seed, 7);
        assert!(report.ticks >= 120);
        assert!(!report.events.is_empty());
        let replay = report.replay.unwrap();
        assert_eq!(replay.frames.len() as u64, (report.ticks + 9) / 10);
        assert_eq!(replay.every, 10);
    }

    #[test]
    fn test_same_request_same_report() {
        let a = simulate_match(&quick_request(99)).unwrap();
        let b = simulate_match(&quick_request(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let err = simulate_match_json("{ not json").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_request_schema_accepts_minimal_request() {
        let schema: serde_json::Value = serde_json::from_str(&request_schema_json().unwrap()).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();

        let minimal = serde_json::json!({ "schema_version": 1, "seed": 3 });
        assert!(compiled.is_valid(&minimal));
        let missing_seed = serde_json::json!({ "schema_version": 1 });
        assert!(!compiled.is_valid(&missing_seed));
    }
}
