//! Session エンティティ（作業セッションまたは休憩）

use std::time::Duration;

use serde::Serialize;

use super::Activity;

/// Milliseconds since the Unix epoch (UTC).
pub type Timestamp = i64;

/// One timed interval: a work session or a break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub started_at: Timestamp,
    /// Ignored while `flow_mode` is set.
    pub planned_duration: Duration,
    /// Simulated seconds elapsed while running.
    pub elapsed_ticks: u64,
    pub activity: Activity,
    /// Stopwatch behavior: counts up with no fixed end.
    pub flow_mode: bool,
    pub is_break: bool,
}

impl Session {
    /// A new work session.
    pub fn work(
        started_at: Timestamp,
        planned_duration: Duration,
        activity: Activity,
        flow_mode: bool,
    ) -> Self {
        Self {
            started_at,
            planned_duration,
            elapsed_ticks: 0,
            activity,
            flow_mode,
            is_break: false,
        }
    }

    /// A new break session. Breaks always run for a fixed duration.
    pub fn rest(started_at: Timestamp, planned_duration: Duration) -> Self {
        Self {
            started_at,
            planned_duration,
            elapsed_ticks: 0,
            activity: Activity::break_sentinel(),
            flow_mode: false,
            is_break: true,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(self.elapsed_ticks)
    }

    /// Whether the planned duration has been reached. Never true in flow mode.
    pub fn completed(&self) -> bool {
        !self.flow_mode && self.elapsed() >= self.planned_duration
    }

    /// Planned minus elapsed, in seconds. Negative once a session overruns.
    pub fn remaining_secs(&self) -> i64 {
        secs(self.planned_duration) - secs(self.elapsed())
    }
}

fn secs(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
