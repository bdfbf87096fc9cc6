//! Global timer state and its transitions.
//!
//! Every operation mutates the state in place and returns the [`Notice`]s
//! describing which regions must be re-rendered, in publish order. An empty
//! list means nothing externally visible changed.

use std::time::Duration;

use super::{
    Activity, ActivityRegistry, Notice, Region, Session, Timestamp, Topic, TransitionError,
};

pub const SHORT_BREAK: Duration = Duration::from_secs(5 * 60);
pub const LONG_BREAK: Duration = Duration::from_secs(15 * 60);
/// Length of one work unit when counting completed sessions.
pub const WORK_UNIT: Duration = Duration::from_secs(25 * 60);
/// Every n-th completed work unit earns a long break.
pub const LONG_BREAK_EVERY: u64 = 4;
/// Flow sessions earn one second of break per this many seconds worked.
pub const FLOW_BREAK_RATIO: u64 = 5;

/// Initial settings of the timer.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    pub preferred_duration: Duration,
    pub flow_mode: bool,
    pub auto_break: bool,
    pub daily_goal: u32,
    pub activities: ActivityRegistry,
}

impl TimerConfig {
    /// Work length in whole minutes. Zero keeps the current length.
    pub fn with_preferred_minutes(mut self, minutes: u32) -> Self {
        if minutes > 0 {
            self.preferred_duration = minutes_to_duration(minutes);
        }
        self
    }
}

fn minutes_to_duration(minutes: u32) -> Duration {
    Duration::from_secs(u64::from(minutes) * 60)
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            preferred_duration: WORK_UNIT,
            flow_mode: false,
            auto_break: true,
            daily_goal: 8,
            activities: ActivityRegistry::default(),
        }
    }
}

/// Coarse state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

/// The single process-wide timer.
///
/// Invariant: `running` implies `current.is_some()`.
#[derive(Debug, Clone)]
pub struct TimerState {
    current: Option<Session>,
    running: bool,
    preferred_duration: Duration,
    flow_mode: bool,
    auto_break: bool,
    current_activity: Activity,
    tracked: Vec<Session>,
    daily_goal: u32,
    activities: ActivityRegistry,
}

impl TimerState {
    pub fn new(config: TimerConfig) -> Self {
        let current_activity = config
            .activities
            .first()
            .cloned()
            .unwrap_or_else(|| Activity::new(1, "General"));

        Self {
            current: None,
            running: false,
            preferred_duration: config.preferred_duration,
            flow_mode: config.flow_mode,
            auto_break: config.auto_break,
            current_activity,
            tracked: Vec::new(),
            daily_goal: config.daily_goal,
            activities: config.activities,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn preferred_duration(&self) -> Duration {
        self.preferred_duration
    }

    pub fn flow_mode(&self) -> bool {
        self.flow_mode
    }

    pub fn auto_break(&self) -> bool {
        self.auto_break
    }

    pub fn current_activity(&self) -> &Activity {
        &self.current_activity
    }

    /// Completed sessions, oldest first.
    pub fn tracked(&self) -> &[Session] {
        &self.tracked
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    pub fn activities(&self) -> &ActivityRegistry {
        &self.activities
    }

    pub fn phase(&self) -> Phase {
        match (&self.current, self.running) {
            (None, _) => Phase::Idle,
            (Some(_), true) => Phase::Running,
            (Some(_), false) => Phase::Paused,
        }
    }

    /// Sum of elapsed ticks over the whole history.
    pub fn total_tracked_ticks(&self) -> u64 {
        self.tracked.iter().map(|s| s.elapsed_ticks).sum()
    }

    /// Seconds shown on the timer: elapsed time in flow mode, remaining time otherwise.
    pub fn display_secs(&self) -> i64 {
        match &self.current {
            Some(session) if session.flow_mode && !session.is_break => {
                i64::try_from(session.elapsed_ticks).unwrap_or(i64::MAX)
            }
            Some(session) => session.remaining_secs(),
            None if self.flow_mode => 0,
            None => i64::try_from(self.preferred_duration.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Start a work session when idle, otherwise pause or resume it.
    ///
    /// Breaks run to completion: the call is ignored while one is current.
    pub fn start_pause_resume(&mut self, now: Timestamp) -> Vec<Notice> {
        let topic = match self.current.as_ref().map(|s| s.is_break) {
            Some(true) => return Vec::new(),
            None => {
                self.current = Some(Session::work(
                    now,
                    self.preferred_duration,
                    self.current_activity.clone(),
                    self.flow_mode,
                ));
                self.running = true;
                Topic::SessionStarted
            }
            Some(false) if self.running => {
                self.running = false;
                Topic::SessionPaused
            }
            Some(false) => {
                self.running = true;
                Topic::SessionResumed
            }
        };

        vec![Notice::new(topic, Region::Controls)]
    }

    /// Archive the current work session into the history.
    pub fn save(&mut self) -> Result<Vec<Notice>, TransitionError> {
        self.ensure_work_session()?;
        self.archive_current();

        Ok(vec![
            Notice::sync(Region::Tracked),
            Notice::new(Topic::SessionSaved, Region::Controls),
            Notice::sync(Region::Timer),
        ])
    }

    /// Drop the current session without archiving it. Valid in any phase.
    pub fn reset(&mut self) -> Vec<Notice> {
        self.clear();

        vec![
            Notice::new(Topic::SessionReset, Region::Controls),
            Notice::sync(Region::Timer),
        ]
    }

    /// Archive the current work session and start a break.
    pub fn start_break(&mut self, now: Timestamp) -> Result<Vec<Notice>, TransitionError> {
        self.ensure_work_session()?;
        Ok(self.begin_break(now))
    }

    pub fn toggle_flow_mode(&mut self) -> Vec<Notice> {
        self.flow_mode = !self.flow_mode;
        let flow_mode = self.flow_mode;
        if let Some(session) = self.current_work_session_mut() {
            session.flow_mode = flow_mode;
        }

        vec![
            Notice::sync(Region::Timer),
            Notice::sync(Region::Mode),
            Notice::sync(Region::Controls),
        ]
    }

    pub fn toggle_auto_break(&mut self) -> Vec<Notice> {
        self.auto_break = !self.auto_break;
        vec![Notice::sync(Region::Mode)]
    }

    /// Change the default work length, and the current work session's length with it.
    ///
    /// Zero minutes is not a valid duration and is ignored.
    pub fn set_preferred_duration(&mut self, minutes: u32) -> Vec<Notice> {
        if minutes == 0 {
            return Vec::new();
        }

        self.preferred_duration = minutes_to_duration(minutes);
        let preferred = self.preferred_duration;
        if let Some(session) = self.current_work_session_mut() {
            session.planned_duration = preferred;
        }

        vec![Notice::sync(Region::Timer), Notice::sync(Region::Mode)]
    }

    /// Select the activity for the next session and the current work session.
    ///
    /// Unknown ids leave the selection unchanged.
    pub fn set_activity(&mut self, id: i64) -> Vec<Notice> {
        if let Some(activity) = self.activities.get(id).cloned() {
            if let Some(session) = self.current_work_session_mut() {
                session.activity = activity.clone();
            }
            self.current_activity = activity;
        }

        vec![Notice::sync(Region::Activities)]
    }

    /// Advance the running session by `seconds` and apply the completion rules.
    ///
    /// Does nothing while paused or idle. Otherwise the timer region is always
    /// re-rendered last.
    pub fn tick(&mut self, seconds: u64, now: Timestamp) -> Vec<Notice> {
        if !self.running {
            return Vec::new();
        }
        let Some(session) = self.current.as_mut() else {
            self.running = false;
            return Vec::new();
        };

        session.elapsed_ticks = session.elapsed_ticks.saturating_add(seconds);
        let is_break = session.is_break;
        let completed = session.completed();

        let mut notices = Vec::new();
        match (is_break, completed) {
            (false, true) if self.auto_break => notices.extend(self.begin_break(now)),
            // left in place so a break can be started by hand
            (false, true) => notices.push(Notice::sync(Region::Controls)),
            (true, true) => {
                self.clear();
                notices.push(Notice::new(Topic::SessionReset, Region::Controls));
            }
            _ => {}
        }
        notices.push(Notice::sync(Region::Timer));

        notices
    }

    /// Break length earned by `completed`, which has already been archived.
    ///
    /// Counts work units over the whole history, not just today.
    pub fn break_duration_after(&self, completed: &Session) -> Duration {
        if completed.flow_mode {
            return Duration::from_secs(completed.elapsed_ticks / FLOW_BREAK_RATIO);
        }

        let units = self.total_tracked_ticks() / WORK_UNIT.as_secs();
        if units > 0 && units % LONG_BREAK_EVERY == 0 {
            LONG_BREAK
        } else {
            SHORT_BREAK
        }
    }

    fn begin_break(&mut self, now: Timestamp) -> Vec<Notice> {
        let Some(completed) = self.archive_current() else {
            return Vec::new();
        };

        let duration = self.break_duration_after(&completed);
        self.current = Some(Session::rest(now, duration));
        self.running = true;

        vec![Notice::sync(Region::Tracked), Notice::sync(Region::Controls)]
    }

    fn ensure_work_session(&self) -> Result<(), TransitionError> {
        match &self.current {
            None => Err(TransitionError::NoActiveSession),
            Some(session) if session.is_break => Err(TransitionError::BreakInProgress),
            Some(_) => Ok(()),
        }
    }

    fn current_work_session_mut(&mut self) -> Option<&mut Session> {
        self.current.as_mut().filter(|session| !session.is_break)
    }

    fn archive_current(&mut self) -> Option<Session> {
        self.running = false;
        let session = self.current.take()?;
        self.tracked.push(session.clone());
        Some(session)
    }

    fn clear(&mut self) {
        self.current = None;
        self.running = false;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
