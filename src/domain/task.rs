use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task, allocated by the board and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = crate::error::TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept an optional leading '#' as printed by the list views
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::error::TaskboardError::InvalidTaskId(s.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task on the board
///
/// `priority` is expected to be in `MIN_PRIORITY..=MAX_PRIORITY`. The task
/// itself does not enforce this: callers validate before constructing or
/// editing (see [`Task::is_valid_priority`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: u8,
}

impl Task {
    pub const MIN_PRIORITY: u8 = 1;
    pub const MAX_PRIORITY: u8 = 3;

    pub fn new(id: TaskId, title: String, description: String, priority: u8) -> Self {
        Self {
            id,
            title,
            description,
            priority,
        }
    }

    pub fn is_valid_priority(priority: u8) -> bool {
        (Self::MIN_PRIORITY..=Self::MAX_PRIORITY).contains(&priority)
    }

    /// Replaces all mutable fields. The id never changes.
    pub fn edit(&mut self, title: String, description: String, priority: u8) {
        self.title = title;
        self.description = description;
        self.priority = priority;
    }
}
