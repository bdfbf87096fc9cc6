//! Events delivered to subscribers.

use std::{fmt, sync::Arc};

/// Part of the UI that is re-rendered as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Controls,
    Timer,
    Tracked,
    Activities,
    Mode,
}

impl Region {
    /// Every region, in snapshot order.
    pub const ALL: [Region; 5] = [
        Region::Controls,
        Region::Timer,
        Region::Tracked,
        Region::Activities,
        Region::Mode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Controls => "controls",
            Region::Timer => "timer",
            Region::Tracked => "tracked",
            Region::Activities => "activities",
            Region::Mode => "mode",
        }
    }

    /// Topic used to push a plain re-render of this region.
    pub fn sync_topic(&self) -> Topic {
        match self {
            Region::Controls => Topic::SyncControls,
            Region::Timer => Topic::SyncTimer,
            Region::Tracked => Topic::SyncTracked,
            Region::Activities => Topic::SyncActivities,
            Region::Mode => Topic::SyncMode,
        }
    }
}

/// Event name as seen by subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    SyncControls,
    SyncTimer,
    SyncTracked,
    SyncActivities,
    SyncMode,
    SessionStarted,
    SessionPaused,
    SessionResumed,
    SessionReset,
    SessionSaved,
    Ping,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::SyncControls => "sync-controls",
            Topic::SyncTimer => "sync-timer",
            Topic::SyncTracked => "sync-tracked",
            Topic::SyncActivities => "sync-activities",
            Topic::SyncMode => "sync-mode",
            Topic::SessionStarted => "session-started",
            Topic::SessionPaused => "session-paused",
            Topic::SessionResumed => "session-resumed",
            Topic::SessionReset => "session-reset",
            Topic::SessionSaved => "session-saved",
            Topic::Ping => "ping",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region re-render requested by a state transition, published under `topic`.
///
/// Lifecycle topics (`session-started`, ...) carry the controls region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub topic: Topic,
    pub region: Region,
}

impl Notice {
    pub fn new(topic: Topic, region: Region) -> Self {
        Self { topic, region }
    }

    /// Plain re-render of `region` under its sync topic.
    pub fn sync(region: Region) -> Self {
        Self::new(region.sync_topic(), region)
    }

    /// One plain re-render per region: what a new subscriber needs to catch up.
    pub fn snapshot() -> Vec<Notice> {
        Region::ALL.into_iter().map(Notice::sync).collect()
    }
}

/// Unit delivered to subscribers. The payload is opaque to the hub.
///
/// Cloning is cheap: the payload is shared between all subscriber queues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub topic: Topic,
    pub payload: Arc<str>,
}

impl Event {
    pub fn new(topic: Topic, payload: impl Into<Arc<str>>) -> Self {
        Self {
            topic,
            payload: payload.into(),
        }
    }

    /// Stateless event that keeps idle streams open through proxies.
    pub fn keepalive() -> Self {
        Self::new(Topic::Ping, "keepalive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_region_has_distinct_sync_topic() {
        // テスト項目: 各リージョンが異なる sync トピックを持つ
        // given (前提条件):
        let regions = Region::ALL;

        // when (操作):
        let unique: std::collections::HashSet<Topic> =
            regions.iter().map(Region::sync_topic).collect();

        // then (期待する結果):
        assert_eq!(unique.len(), Region::ALL.len());
        assert_eq!(Notice::sync(Region::Timer).topic, Topic::SyncTimer);
    }

    #[test]
    fn test_keepalive_event() {
        // テスト項目: keepalive イベントは ping トピックで状態を持たない
        let event = Event::keepalive();
        assert_eq!(event.topic.as_str(), "ping");
        assert_eq!(&*event.payload, "keepalive");
    }
}
