use crate::config::BoardConfig;
use crate::domain::snapshot::Snapshot;
use crate::domain::task::{Task, TaskId};
use crate::error::{Result, TaskboardError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One of the three fixed columns of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Todo,
    Doing,
    Done,
}

impl Column {
    /// Scan order used by every lookup
    pub const ALL: [Column; 3] = [Column::Todo, Column::Doing, Column::Done];

    fn index(self) -> usize {
        match self {
            Column::Todo => 0,
            Column::Doing => 1,
            Column::Done => 2,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::Doing => write!(f, "DOING"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

impl FromStr for Column {
    type Err = TaskboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Column::Todo),
            "doing" => Ok(Column::Doing),
            "done" => Ok(Column::Done),
            _ => Err(TaskboardError::InvalidColumn(s.to_string())),
        }
    }
}

/// Checks a board name and returns its trimmed form.
///
/// Names end up as file names, so path separators and `..` are refused.
pub fn validate_board_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.contains("..")
    {
        return Err(TaskboardError::InvalidBoardName(name.to_string()));
    }
    Ok(trimmed)
}

/// Kanban board state
#[derive(Debug, Clone)]
pub struct Board {
    columns: [Vec<Task>; 3],
    next_id: u64,
    name: String,
    config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let name = validate_board_name(&config.default_name)
            .unwrap_or(BoardConfig::DEFAULT_NAME)
            .to_string();
        Self {
            columns: [Vec::new(), Vec::new(), Vec::new()],
            next_id: 0,
            name,
            config,
        }
    }

    pub fn set_save_dir(&mut self, save_dir: impl Into<PathBuf>) {
        self.config.save_dir = save_dir.into();
    }

    /// Live, insertion-ordered tasks of a column
    pub fn get(&self, column: Column) -> &[Task] {
        &self.columns[column.index()]
    }

    pub fn get_mut(&mut self, column: Column) -> &mut Vec<Task> {
        &mut self.columns[column.index()]
    }

    /// Appends a task to the end of a column
    pub fn add(&mut self, task: Task, column: Column) {
        self.get_mut(column).push(task);
    }

    /// Allocates an id, builds the task and appends it to `column`
    pub fn create_task(
        &mut self,
        title: String,
        description: String,
        priority: u8,
        column: Column,
    ) -> TaskId {
        let id = self.next_task_id();
        self.add(Task::new(id, title, description, priority), column);
        id
    }

    /// Finds a task, scanning TODO, DOING, DONE in that order
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        Column::ALL
            .iter()
            .flat_map(|col| self.get(*col))
            .find(|task| task.id == id)
    }

    pub fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .flat_map(|tasks| tasks.iter_mut())
            .find(|task| task.id == id)
    }

    /// Column currently holding the task
    pub fn column_of(&self, id: TaskId) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|col| self.get(*col).iter().any(|task| task.id == id))
    }

    /// Removes the task and hands it back; `None` when no column holds it
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let column = self.column_of(id)?;
        let tasks = self.get_mut(column);
        let pos = tasks.iter().position(|task| task.id == id)?;
        Some(tasks.remove(pos))
    }

    /// Moves a task to the end of `to`, returning the column it left.
    ///
    /// Moving into the column the task is already in relocates it to the
    /// end of that column; it is never duplicated.
    pub fn move_task(&mut self, id: TaskId, to: Column) -> Result<Column> {
        let from = self
            .column_of(id)
            .ok_or(TaskboardError::TaskNotFound(id))?;
        let task = self.remove(id).ok_or(TaskboardError::TaskNotFound(id))?;
        self.add(task, to);
        Ok(from)
    }

    /// Overwrites title, description and priority in place.
    ///
    /// Priority is not range-checked here.
    pub fn edit(&mut self, id: TaskId, title: String, description: String, priority: u8) -> Result<()> {
        let task = self.find_mut(id).ok_or(TaskboardError::TaskNotFound(id))?;
        task.edit(title, description, priority);
        Ok(())
    }

    /// Returns the current counter value, then advances it
    pub fn next_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next allocation will hand out
    pub fn peek_next_id(&self) -> TaskId {
        TaskId::new(self.next_id)
    }

    pub fn max_task_id(&self) -> Option<TaskId> {
        self.tasks().map(|task| task.id).max()
    }

    /// Highest id held by any column, 0 when the board is empty
    pub fn max_id(&self) -> u64 {
        self.max_task_id().map_or(0, TaskId::value)
    }

    /// Reseeds the allocator from the ids currently held.
    ///
    /// An empty board starts again at 0, like a fresh one.
    pub fn reseed_next_id(&mut self) {
        self.next_id = self.max_task_id().map_or(0, |id| id.value() + 1);
    }

    /// All tasks in scan order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|tasks| tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the board. Rejected names leave the current name unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        let trimmed = validate_board_name(name)?;
        self.name = trimmed.to_string();
        Ok(())
    }

    /// File name for the board. Names that could leave the save directory
    /// fall back to the default name.
    pub fn save_file_name(&self) -> String {
        match validate_board_name(&self.name) {
            Ok(name) => format!("{name}.json"),
            Err(_) => {
                log::warn!(
                    "board name '{}' is not usable as a file name, saving as '{}'",
                    self.name,
                    BoardConfig::DEFAULT_NAME
                );
                format!("{}.json", BoardConfig::DEFAULT_NAME)
            }
        }
    }

    /// `<save_dir>/<name>.json`
    pub fn save_file_path(&self) -> PathBuf {
        self.config.save_dir.join(self.save_file_name())
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            todo: self.get(Column::Todo).to_vec(),
            doing: self.get(Column::Doing).to_vec(),
            done: self.get(Column::Done).to_vec(),
            board_name: Some(self.name.clone()),
        }
    }

    /// Replaces every column with the snapshot's contents.
    ///
    /// The snapshot's name is adopted only when it is not blank. Loaded
    /// names are not held to the interactive rename rules.
    pub fn restore_from(&mut self, snapshot: Snapshot) {
        let Snapshot {
            todo,
            doing,
            done,
            board_name,
        } = snapshot;
        self.columns = [todo, doing, done];

        if let Some(name) = board_name.filter(|name| !name.trim().is_empty()) {
            self.name = name;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
