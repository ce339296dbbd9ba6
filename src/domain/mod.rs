pub mod board;
pub mod snapshot;
pub mod sorting;
pub mod task;

pub use board::{validate_board_name, Board, Column};
pub use snapshot::Snapshot;
pub use sorting::{sort_tasks, SortKey};
pub use task::{Task, TaskId};
