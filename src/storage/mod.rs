use crate::{
    domain::{Board, Column, Snapshot},
    error::{Result, TaskboardError},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod file_storage;

pub use file_storage::FileStorage;

/// Storage trait for persisting board snapshots
#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes the snapshot to `path`, creating parent directories as needed
    async fn save_snapshot(&self, snapshot: &Snapshot, path: &Path) -> Result<()>;

    /// Reads a snapshot back from `path`
    async fn load_snapshot(&self, path: &Path) -> Result<Snapshot>;

    /// Checks whether a saved board exists at `path`
    async fn exists(&self, path: &Path) -> bool;
}

/// Saves the board to `<save_dir>/<name>.json` and returns that path.
///
/// A failed save leaves the in-memory board as it was.
pub async fn save_board<S: Storage + ?Sized>(board: &Board, storage: &S) -> Result<PathBuf> {
    let path = board.save_file_path();
    let snapshot = board.to_snapshot();

    match storage.save_snapshot(&snapshot, &path).await {
        Ok(()) => {
            log::info!(
                "saved board '{}' ({} tasks) to {}",
                board.name(),
                snapshot.task_count(),
                path.display()
            );
            Ok(path)
        }
        Err(err) => {
            log::warn!("failed to save board to {}: {}", path.display(), err);
            Err(err)
        }
    }
}

/// Loads the board from its save path and reseeds the id allocator.
///
/// On any failure the board is left exactly as it was.
pub async fn load_board<S: Storage + ?Sized>(board: &mut Board, storage: &S) -> Result<PathBuf> {
    let path = board.save_file_path();
    log::debug!("loading board from {}", path.display());

    if !storage.exists(&path).await {
        log::debug!("no saved board at {}", path.display());
        return Err(TaskboardError::BoardNotFound(path));
    }

    let snapshot = match storage.load_snapshot(&path).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("failed to load board from {}: {}", path.display(), err);
            return Err(err);
        }
    };

    log::debug!(
        "read {} todo, {} doing, {} done from {}",
        snapshot.column(Column::Todo).len(),
        snapshot.column(Column::Doing).len(),
        snapshot.column(Column::Done).len(),
        path.display()
    );

    board.restore_from(snapshot);
    board.reseed_next_id();
    log::info!(
        "loaded board '{}' ({} tasks) from {}, next id {}",
        board.name(),
        board.task_count(),
        path.display(),
        board.peek_next_id()
    );
    Ok(path)
}
