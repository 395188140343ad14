use crate::domain::{config::TtyDbgConfig, error::{TtyDbgError, TtyDbgResult}};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for the per-user configuration file
    pub fn new() -> TtyDbgResult<Self> {
        Ok(Self {
            config_path: Self::get_global_config_path()?,
        })
    }

    /// Create a manager for an explicit configuration file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_config(&self) -> TtyDbgResult<TtyDbgConfig> {
        if !self.config_path.exists() {
            debug!("No config file at {}, using defaults", self.config_path.display());
            return Ok(TtyDbgConfig::default());
        }

        self.load_config_from_path(&self.config_path)
    }

    /// Global configuration path
    fn get_global_config_path() -> TtyDbgResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| TtyDbgError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("ttydbg").join("config.toml"))
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> TtyDbgResult<TtyDbgConfig> {
        let content = fs::read_to_string(path).map_err(|e| TtyDbgError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| TtyDbgError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &TtyDbgConfig) -> TtyDbgResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| TtyDbgError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TtyDbgError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        fs::write(path, content).map_err(|e| TtyDbgError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Write a default configuration file, refusing to overwrite one
    pub fn init_config(&self, path: &Path) -> TtyDbgResult<()> {
        if path.exists() {
            return Err(TtyDbgError::Config {
                message: format!("Configuration already exists at {}", path.display()),
            });
        }

        self.save_config_to_path(path, &TtyDbgConfig::default())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
