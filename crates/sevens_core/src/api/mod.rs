pub mod json_api;

pub use json_api::{
    request_schema_json, simulate_match, simulate_match_json, MatchReport, MatchRequest,
    SCHEMA_VERSION,
};
