use crate::config::BoardConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

pub mod args;
pub mod help;

/// Personal three-column task board
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding board files (env: TASKBOARD_DIR)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Board to open (env: TASKBOARD_NAME)
    #[arg(long, value_name = "NAME")]
    pub board: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then environment, then flags
    pub fn config(&self) -> Result<BoardConfig> {
        BoardConfig::from_env()?.with_overrides(self.dir.clone(), self.board.clone())
    }

    pub fn init_logging(&self) {
        let default_filter = if self.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["taskboard", "--dir", "/tmp/tb", "--board", "home"]);
        let config = cli.config().unwrap();

        assert_eq!(config.save_dir, PathBuf::from("/tmp/tb"));
        assert_eq!(config.default_name, "home");
    }

    #[test]
    fn test_bad_board_flag_is_rejected() {
        let cli = Cli::parse_from(["taskboard", "--board", "a/b"]);
        assert!(cli.config().is_err());
    }
}
