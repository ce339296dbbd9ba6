//! Human-readable rendering of tasks and columns.
//!
//! Sorted views work on a copy; the board's stored order never changes.

use crate::domain::{sort_tasks, Board, Column, SortKey, Task};

/// Optional ordering for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub key: SortKey,
    pub descending: bool,
}

/// One-line form, e.g. `[DOING] #3 Write report (P2)`
pub fn format_task_line(task: &Task, column: Column) -> String {
    format!("[{}] #{} {} (P{})", column, task.id, task.title, task.priority)
}

pub fn format_task_detailed(task: &Task, column: Column) -> String {
    let description = if task.description.is_empty() {
        "-"
    } else {
        task.description.as_str()
    };

    format!(
        "Task #{}\n  Title:       {}\n  Description: {}\n  Priority:    {}\n  Column:      {}",
        task.id, task.title, description, task.priority, column
    )
}

/// Tasks of one column in display order
pub fn ordered_tasks(board: &Board, column: Column, sort: Option<SortBy>) -> Vec<Task> {
    let mut tasks = board.get(column).to_vec();
    if let Some(by) = sort {
        sort_tasks(&mut tasks, by.key, by.descending);
    }
    tasks
}

pub fn render_column(board: &Board, column: Column, sort: Option<SortBy>) -> String {
    let tasks = ordered_tasks(board, column, sort);
    if tasks.is_empty() {
        return format!("{column} is empty");
    }

    tasks
        .iter()
        .map(|task| format_task_line(task, column))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every column under its own header, sorted within each column
pub fn render_all(board: &Board, sort: Option<SortBy>) -> String {
    let mut lines = Vec::new();
    for column in Column::ALL {
        lines.push(format!("== {} ({}) ==", column, board.get(column).len()));
        lines.extend(
            ordered_tasks(board, column, sort)
                .iter()
                .map(|task| format_task_line(task, column)),
        );
    }
    lines.join("\n")
}
