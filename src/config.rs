use crate::domain::board::validate_board_name;
use crate::error::{Result, TaskboardError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where boards are saved and what a fresh board is called
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub save_dir: PathBuf,
    pub default_name: String,
}

impl BoardConfig {
    pub const DEFAULT_SAVE_DIR: &'static str = "boards";
    pub const DEFAULT_NAME: &'static str = "board";

    pub const DIR_ENV: &'static str = "TASKBOARD_DIR";
    pub const NAME_ENV: &'static str = "TASKBOARD_NAME";

    /// Defaults overridden by `TASKBOARD_DIR` / `TASKBOARD_NAME` when set
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(
            std::env::var_os(Self::DIR_ENV).map(PathBuf::from),
            std::env::var(Self::NAME_ENV).ok(),
        )
    }

    /// Applies optional overrides on top of `self`, then validates
    pub fn with_overrides(mut self, save_dir: Option<PathBuf>, name: Option<String>) -> Result<Self> {
        if let Some(dir) = save_dir {
            self.save_dir = dir;
        }
        if let Some(name) = name {
            self.default_name = name;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.save_dir.as_os_str().is_empty() {
            return Err(TaskboardError::ConfigError(
                "save directory must not be empty".to_string(),
            ));
        }
        validate_board_name(&self.default_name).map_err(|_| {
            TaskboardError::ConfigError(format!("invalid board name '{}'", self.default_name))
        })?;
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(Self::DEFAULT_SAVE_DIR),
            default_name: Self::DEFAULT_NAME.to_string(),
        }
    }
}
