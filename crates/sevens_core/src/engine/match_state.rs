//! Scoreboard, clock and aggregate statistics
//!
//! Owned by the coordinator; players only reach it through `MatchContext`.

use crate::engine::types::Team;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamStats {
    pub score: u32,
    /// Seconds this team has held the ball
    pub possession_time: f32,
    pub shots: u32,
    pub passes: u32,
    pub passes_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchState {
    pub time_remaining: f32,
    pub home: TeamStats,
    pub away: TeamStats,
    pub is_match_over: bool,
    pub last_goal_team: Option<Team>,
}

impl MatchState {
    pub fn new(duration_seconds: f32) -> Self {
        Self {
            time_remaining: duration_seconds.max(0.0),
            home: TeamStats::default(),
            away: TeamStats::default(),
            is_match_over: false,
            last_goal_team: None,
        }
    }

    pub fn team(&self, team: Team) -> &TeamStats {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut TeamStats {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }

    /// Advance the clock; returns true when this call ended the match
    pub fn advance_clock(&mut self, seconds: f32) -> bool {
        if self.is_match_over {
            return false;
        }
        self.time_remaining = (self.time_remaining - seconds).max(0.0);
        if self.time_remaining <= 0.0 {
            self.is_match_over = true;
            return true;
        }
        false
    }

    pub fn record_goal(&mut self, team: Team) {
        self.team_mut(team).score += 1;
        self.last_goal_team = Some(team);
    }

    pub fn record_shot(&mut self, team: Team) {
        self.team_mut(team).shots += 1;
    }

    pub fn record_pass(&mut self, team: Team, completed: bool) {
        let stats = self.team_mut(team);
        stats.passes += 1;
        if completed {
            stats.passes_completed += 1;
        }
    }

    pub fn add_possession(&mut self, team: Team, seconds: f32) {
        self.team_mut(team).possession_time += seconds;
    }

    /// Rounded share of possession; 50/50 before anyone has held the ball
    pub fn possession_percent(&self, team: Team) -> u32 {
        let total = self.home.possession_time + self.away.possession_time;
        if total <= 0.0 {
            return 50;
        }
        (self.team(team).possession_time / total * 100.0).round() as u32
    }

    pub fn score_line(&self) -> String {
        format!("HOME {} - {} AWAY", self.home.score, self.away.score)
    }

    pub fn final_stats(&self) -> FinalStats {
        FinalStats {
            home: TeamSummary::from_state(self, Team::Home),
            away: TeamSummary::from_state(self, Team::Away),
            is_match_over: self.is_match_over,
        }
    }
}

/// End-of-match summary for one side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSummary {
    pub score: u32,
    pub shots: u32,
    pub passes: u32,
    pub passes_completed: u32,
    pub pass_accuracy_percent: f32,
    pub possession_percent: u32,
}

impl TeamSummary {
    fn from_state(state: &MatchState, team: Team) -> Self {
        let stats = state.team(team);
        let pass_accuracy_percent = if stats.passes > 0 {
            stats.passes_completed as f32 / stats.passes as f32 * 100.0
        } else {
            0.0
        };
        Self {
            score: stats.score,
            shots: stats.shots,
            passes: stats.passes,
            passes_completed: stats.passes_completed,
            pass_accuracy_percent,
            possession_percent: state.possession_percent(team),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinalStats {
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub is_match_over: bool,
}

impl FinalStats {
    pub fn winner(&self) -> Option<Team> {
        match self.home.score.cmp(&self.away.score) {
            std::cmp::Ordering::Greater => Some(Team::Home),
            std::cmp::Ordering::Less => Some(Team::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Multi-line report in the scoreboard layout
    pub fn report(&self) -> String {
        [
            "FINAL SCORE".to_string(),
            format!("HOME {} - {} AWAY", self.home.score, self.away.score),
            String::new(),
            format!("Shots: {} - {}", self.home.shots, self.away.shots),
            format!(
                "Possession: {}% - {}%",
                self.home.possession_percent, self.away.possession_percent
            ),
            format!(
                "Passes Completed: {}/{} - {}/{}",
                self.home.passes_completed,
                self.home.passes,
                self.away.passes_completed,
                self.away.passes
            ),
        ]
        .join("\n")
    }
}

/// `m:ss`, rounding partial seconds up so the clock reads 0:00 only at the end
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0).ceil() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
