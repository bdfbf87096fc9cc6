//! HTTP API レスポンスの DTO

use pomolive_shared::time::timestamp_to_rfc3339;
use serde::Serialize;

use crate::domain::{
    Phase, Session, TimerState,
    stats::{DailyStat, EfficiencyStats, StatsReport},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDto {
    pub started_at: String,
    pub planned_secs: u64,
    pub elapsed_ticks: u64,
    pub activity: String,
    pub flow_mode: bool,
    pub is_break: bool,
    pub completed: bool,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            started_at: timestamp_to_rfc3339(session.started_at),
            planned_secs: session.planned_duration.as_secs(),
            elapsed_ticks: session.elapsed_ticks,
            activity: session.activity.name.clone(),
            flow_mode: session.flow_mode,
            is_break: session.is_break,
            completed: session.completed(),
        }
    }
}

/// Debug dump of the whole timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerStateDto {
    pub phase: &'static str,
    pub running: bool,
    pub current: Option<SessionDto>,
    pub preferred_minutes: u64,
    pub flow_mode: bool,
    pub auto_break: bool,
    pub current_activity_id: i64,
    pub tracked: Vec<SessionDto>,
    pub daily_goal: u32,
}

impl From<&TimerState> for TimerStateDto {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: match state.phase() {
                Phase::Idle => "idle",
                Phase::Running => "running",
                Phase::Paused => "paused",
            },
            running: state.is_running(),
            current: state.current().map(SessionDto::from),
            preferred_minutes: state.preferred_duration().as_secs() / 60,
            flow_mode: state.flow_mode(),
            auto_break: state.auto_break(),
            current_activity_id: state.current_activity().id,
            tracked: state.tracked().iter().map(SessionDto::from).collect(),
            daily_goal: state.daily_goal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsDto {
    pub daily_goal: u32,
    pub efficiency: Vec<EfficiencyStats>,
    pub daily: Vec<DailyStat>,
}

impl From<StatsReport> for StatsDto {
    fn from(report: StatsReport) -> Self {
        Self {
            daily_goal: report.daily_goal,
            efficiency: report.efficiency,
            daily: report.daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientsDto {
    pub clients: usize,
}
