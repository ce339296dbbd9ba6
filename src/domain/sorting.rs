use crate::domain::task::Task;
use crate::error::TaskboardError;
use std::cmp::Ordering;
use std::str::FromStr;

/// Ordering strategies for listing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Title,
    Priority,
}

impl SortKey {
    /// Every accepted alias, lowercase
    pub const ALIASES: &'static [(&'static str, SortKey)] = &[
        ("i", SortKey::Id),
        ("id", SortKey::Id),
        ("t", SortKey::Title),
        ("title", SortKey::Title),
        ("p", SortKey::Priority),
        ("prio", SortKey::Priority),
        ("priority", SortKey::Priority),
    ];

    /// Resolves a flag value such as `"p"` or `"title"`. Unknown aliases yield
    /// `None`; callers report the bad input rather than picking a default.
    pub fn from_flag(alias: &str) -> Option<SortKey> {
        let normalized = alias.trim().to_lowercase();
        Self::ALIASES
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, key)| *key)
    }

    /// Returns the ordering for this key, or its exact reverse.
    ///
    /// Reversal applies to the whole comparison including the id tie-break,
    /// so descending `Title` lists equal titles by descending id.
    pub fn comparator(self, descending: bool) -> impl Fn(&Task, &Task) -> Ordering {
        move |a: &Task, b: &Task| {
            let cmp = self.compare(a, b);
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Title => compare_titles(&a.title, &b.title).then_with(|| a.id.cmp(&b.id)),
            SortKey::Priority => a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)),
        }
    }
}

impl FromStr for SortKey {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::from_flag(s).ok_or_else(|| TaskboardError::InvalidSortKey(s.to_string()))
    }
}

/// Sorts a slice of tasks in place
///
/// # Examples
/// ```
/// use taskboard::domain::sorting::{sort_tasks, SortKey};
/// use taskboard::domain::task::{Task, TaskId};
///
/// let mut tasks = vec![
///     Task::new(TaskId::new(2), "b".to_string(), String::new(), 1),
///     Task::new(TaskId::new(1), "a".to_string(), String::new(), 3),
/// ];
///
/// sort_tasks(&mut tasks, SortKey::Id, false);
/// assert_eq!(tasks[0].id, TaskId::new(1));
/// ```
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, descending: bool) {
    tasks.sort_by(key.comparator(descending));
}

/// Case-insensitive comparison, character by character on lowercase forms
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
