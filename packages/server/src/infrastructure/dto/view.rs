//! Per-region views rendered into event payloads.

use std::time::Duration;

use pomolive_shared::{
    format::{format_duration, format_duration_secs, format_units},
    time::timestamp_to_rfc3339,
};
use serde::Serialize;

use crate::domain::{Activity, Phase, Session, TimerState, timer::WORK_UNIT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub running: bool,
    pub has_session: bool,
    pub is_break: bool,
    pub completed: bool,
    /// Label of the start/pause/resume button.
    pub primary_action: &'static str,
    /// Breaks cannot be paused.
    pub primary_enabled: bool,
    pub can_save: bool,
    pub can_start_break: bool,
}

impl From<&TimerState> for ControlsView {
    fn from(state: &TimerState) -> Self {
        let current = state.current();
        let is_break = current.is_some_and(|s| s.is_break);
        let completed = current.is_some_and(Session::completed);
        let is_work = current.is_some() && !is_break;

        Self {
            running: state.is_running(),
            has_session: current.is_some(),
            is_break,
            completed,
            primary_action: match state.phase() {
                Phase::Idle => "Start",
                Phase::Running => "Pause",
                Phase::Paused => "Resume",
            },
            primary_enabled: !is_break,
            can_save: is_work,
            can_start_break: is_work && (completed || current.is_some_and(|s| s.flow_mode)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    /// Remaining time, or elapsed time in flow mode.
    pub display: String,
    pub elapsed: String,
    pub running: bool,
    pub is_break: bool,
    pub flow_mode: bool,
    pub activity: String,
}

impl From<&TimerState> for TimerView {
    fn from(state: &TimerState) -> Self {
        let current = state.current();

        Self {
            display: format_duration_secs(state.display_secs()),
            elapsed: format_duration(current.map(Session::elapsed).unwrap_or_default()),
            running: state.is_running(),
            is_break: current.is_some_and(|s| s.is_break),
            flow_mode: state.flow_mode(),
            activity: current
                .map(|s| &s.activity)
                .unwrap_or(state.current_activity())
                .name
                .clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedSessionView {
    pub activity: String,
    pub started_at: String,
    pub elapsed: String,
    pub planned: String,
    pub flow_mode: bool,
}

impl From<&Session> for TrackedSessionView {
    fn from(session: &Session) -> Self {
        Self {
            activity: session.activity.name.clone(),
            started_at: timestamp_to_rfc3339(session.started_at),
            elapsed: format_duration(session.elapsed()),
            planned: if session.flow_mode {
                format_duration(Duration::ZERO)
            } else {
                format_duration(session.planned_duration)
            },
            flow_mode: session.flow_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedView {
    pub sessions: Vec<TrackedSessionView>,
    pub total_time: String,
    /// Completed 25-minute units, one decimal place.
    pub total_units: String,
}

impl From<&TimerState> for TrackedView {
    fn from(state: &TimerState) -> Self {
        let total = state.total_tracked_ticks();

        Self {
            sessions: state.tracked().iter().map(TrackedSessionView::from).collect(),
            total_time: format_duration(Duration::from_secs(total)),
            total_units: format_units(total, WORK_UNIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitiesView {
    pub current: Activity,
    pub activities: Vec<ActivityView>,
}

impl From<&TimerState> for ActivitiesView {
    fn from(state: &TimerState) -> Self {
        let current = state.current_activity().clone();

        Self {
            activities: state
                .activities()
                .iter()
                .map(|a| ActivityView {
                    id: a.id,
                    name: a.name.clone(),
                    selected: a.id == current.id,
                })
                .collect(),
            current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeView {
    pub flow_mode: bool,
    pub auto_break: bool,
    pub preferred_minutes: u64,
    /// `00:00` while flow mode is on.
    pub preferred_display: String,
}

impl From<&TimerState> for ModeView {
    fn from(state: &TimerState) -> Self {
        let preferred = state.preferred_duration();

        Self {
            flow_mode: state.flow_mode(),
            auto_break: state.auto_break(),
            preferred_minutes: preferred.as_secs() / 60,
            preferred_display: if state.flow_mode() {
                format_duration(Duration::ZERO)
            } else {
                format_duration(preferred)
            },
        }
    }
}
