//! # Taskboard
//!
//! A personal task board: tasks live in three ordered columns (To Do,
//! Doing, Done) and survive restarts as one JSON file per board.
//!
//! The [`domain`] module holds the board model, [`storage`] the
//! persistence seam, and [`cli`], [`views`] and [`repl`] the interactive
//! command loop built on top of them.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod repl;
pub mod storage;
pub mod views;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{
    board::{Board, Column},
    snapshot::Snapshot,
    sorting::SortKey,
    task::{Task, TaskId},
};
pub use error::{Result, TaskboardError};
pub use storage::Storage;
