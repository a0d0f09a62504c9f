//! Platform paths for Multisearch files.
//!
//! ```text
//! ~/.config/multisearch/       # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # Rolling log files
//!     └── multisearch.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use multisearch_core::error::{Result, SearchError};

const APP_DIR: &str = "multisearch";
const CONFIG_FILE: &str = "config.toml";
const LOGS_DIR: &str = "logs";

pub struct SearchPaths;

impl SearchPaths {
    /// Returns the configuration directory (e.g. `~/.config/multisearch/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SearchError::config("Cannot find configuration directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(LOGS_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_app_dir() {
        // Headless CI machines may lack a config dir; only check when resolvable.
        if let Ok(dir) = SearchPaths::config_dir() {
            assert!(dir.ends_with("multisearch"));
            assert_eq!(SearchPaths::config_file().unwrap(), dir.join("config.toml"));
            assert_eq!(SearchPaths::log_dir().unwrap(), dir.join("logs"));
        }
    }
}
