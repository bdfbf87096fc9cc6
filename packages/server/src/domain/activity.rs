//! Activity エンティティと固定のアクティビティ一覧

use std::collections::BTreeMap;

use serde::Serialize;

/// ID reserved for the break sentinel activity.
pub const BREAK_ACTIVITY_ID: i64 = 0;

/// Something a work session is spent on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
}

impl Activity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The activity attached to every break session.
    pub fn break_sentinel() -> Self {
        Self::new(BREAK_ACTIVITY_ID, "Break")
    }

    pub fn is_break(&self) -> bool {
        self.id == BREAK_ACTIVITY_ID
    }
}

/// Fixed set of activities a session can be assigned to, keyed by id.
///
/// The break sentinel is never part of the registry, so it cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRegistry {
    activities: BTreeMap<i64, Activity>,
}

impl ActivityRegistry {
    /// Build a registry, skipping any entry that uses the break sentinel id.
    pub fn new(activities: impl IntoIterator<Item = Activity>) -> Self {
        let activities = activities
            .into_iter()
            .filter(|activity| !activity.is_break())
            .map(|activity| (activity.id, activity))
            .collect();
        Self { activities }
    }

    pub fn get(&self, id: i64) -> Option<&Activity> {
        self.activities.get(&id)
    }

    /// First activity by id, used as the initial selection.
    pub fn first(&self) -> Option<&Activity> {
        self.activities.values().next()
    }

    /// Activities sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self::new([
            Activity::new(1, "General"),
            Activity::new(2, "Boot.dev"),
            Activity::new(3, "Personal projects"),
            Activity::new(4, "Japanese"),
        ])
    }
}
