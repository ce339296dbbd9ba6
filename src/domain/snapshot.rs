use crate::domain::board::Column;
use crate::domain::task::Task;
use serde::{Deserialize, Serialize};

/// Persistable copy of a board's columns and name
///
/// This is the on-disk JSON document:
/// `{"todo": [..], "doing": [..], "done": [..], "boardName": ".."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub todo: Vec<Task>,
    #[serde(default)]
    pub doing: Vec<Task>,
    #[serde(default)]
    pub done: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_name: Option<String>,
}

impl Snapshot {
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::Doing => &self.doing,
            Column::Done => &self.done,
        }
    }

    pub fn task_count(&self) -> usize {
        self.todo.len() + self.doing.len() + self.done.len()
    }
}
