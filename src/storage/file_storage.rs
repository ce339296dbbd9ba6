use crate::{
    domain::Snapshot,
    error::{Result, TaskboardError},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// JSON file storage: one pretty-printed document per board
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStorage;

impl FileStorage {
    const TMP_SUFFIX: &'static str = ".tmp";

    pub fn new() -> Self {
        Self
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(Self::TMP_SUFFIX);
        PathBuf::from(tmp)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn save_snapshot(&self, snapshot: &Snapshot, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_directory_exists(parent).await?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        // Write beside the target, then swap it in
        let tmp = Self::tmp_path(path);
        fs::write(&tmp, json).await?;
        if let Err(err) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        log::debug!("wrote {}", path.display());
        Ok(())
    }

    async fn load_snapshot(&self, path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            return Err(TaskboardError::BoardNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;

        Ok(snapshot)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskId};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        Snapshot {
            todo: vec![Task::new(TaskId::new(0), "A".to_string(), "a".to_string(), 1)],
            doing: vec![Task::new(TaskId::new(1), "B".to_string(), "b".to_string(), 2)],
            done: Vec::new(),
            board_name: Some("board".to_string()),
        }
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();
        let path = temp_dir.path().join("nested").join("dir").join("board.json");

        storage.save_snapshot(&sample(), &path).await.unwrap();

        assert!(storage.exists(&path).await);
        assert!(!storage.exists(&FileStorage::tmp_path(&path)).await);
    }

    #[tokio::test]
    async fn test_snapshot_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();
        let path = temp_dir.path().join("board.json");

        storage.save_snapshot(&sample(), &path).await.unwrap();
        let loaded = storage.load_snapshot(&path).await.unwrap();

        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();
        let path = temp_dir.path().join("board.json");

        storage.save_snapshot(&sample(), &path).await.unwrap();
        storage.save_snapshot(&Snapshot::default(), &path).await.unwrap();

        let loaded = storage.load_snapshot(&path).await.unwrap();
        assert_eq!(loaded.task_count(), 0);
    }

    #[tokio::test]
    async fn test_file_uses_board_name_key() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();
        let path = temp_dir.path().join("board.json");

        storage.save_snapshot(&sample(), &path).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert!(raw.contains("\"boardName\": \"board\""));
        assert!(raw.contains("\"todo\""));
        assert!(raw.contains("\"doing\""));
        assert!(raw.contains("\"done\""));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();

        let result = storage.load_snapshot(&temp_dir.path().join("nope.json")).await;
        assert!(matches!(result, Err(TaskboardError::BoardNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new();
        let path = temp_dir.path().join("board.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let result = storage.load_snapshot(&path).await;
        assert!(matches!(result, Err(TaskboardError::SerializationError(_))));
    }
}
