//! Run configuration.
//!
//! Resolution order, later steps winning:
//!
//! 1. Built-in defaults: search `..` relative to the tool directory for
//!    `docker_utils.sh`.
//! 2. `<tool_dir>/scriptsync.yaml`, if present:
//!
//!    ```yaml
//!    search_path: ../services
//!    target_name: deploy.sh
//!    ```
//!
//! 3. Environment: `SCRIPTSYNC_BASE_PATH`, `SCRIPTSYNC_TARGET_NAME`.
//!
//! `load_at(tool_dir)` takes the tool directory explicitly; `load()` derives
//! it from the running executable.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{io_err, ScanError};

pub const DEFAULT_SEARCH_PATH: &str = "..";
pub const DEFAULT_TARGET_NAME: &str = "docker_utils.sh";
pub const CONFIG_FILE_NAME: &str = "scriptsync.yaml";

pub const ENV_BASE_PATH: &str = "SCRIPTSYNC_BASE_PATH";
pub const ENV_TARGET_NAME: &str = "SCRIPTSYNC_TARGET_NAME";

/// Where to look and what to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Directory whose immediate subdirectories hold the copies.
    pub base_path: PathBuf,
    /// File name searched for inside each subdirectory.
    pub target_name: String,
}

/// On-disk shape of `scriptsync.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    search_path: Option<PathBuf>,
    target_name: Option<String>,
}

/// Values that replace whatever the defaults and config file produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_path: Option<PathBuf>,
    pub target_name: Option<String>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self {
            base_path: std::env::var_os(ENV_BASE_PATH)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            target_name: std::env::var(ENV_TARGET_NAME).ok().filter(|v| !v.is_empty()),
        }
    }
}

impl SyncConfig {
    pub fn new(base_path: impl Into<PathBuf>, target_name: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            target_name: target_name.into(),
        }
    }

    /// Defaults relative to `tool_dir`, then `<tool_dir>/scriptsync.yaml`.
    pub fn load_at(tool_dir: &Path) -> Result<Self, ScanError> {
        let path = tool_dir.join(CONFIG_FILE_NAME);
        let file = if path.is_file() {
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            if contents.trim().is_empty() {
                ConfigFile::default()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|source| ScanError::ConfigParse { path, source })?
            }
        } else {
            ConfigFile::default()
        };

        let search_path = file
            .search_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEARCH_PATH));
        let config = Self {
            base_path: tool_dir.join(search_path),
            target_name: file
                .target_name
                .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_owned()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Full configuration for the running executable, including environment
    /// overrides. The result is already [`resolve`](Self::resolve)d.
    pub fn load() -> Result<Self, ScanError> {
        let tool_dir = tool_dir()?;
        Self::load_at(&tool_dir)?
            .with_overrides(ConfigOverrides::from_env())?
            .resolve()
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ScanError> {
        if let Some(base_path) = overrides.base_path {
            self.base_path = base_path;
        }
        if let Some(target_name) = overrides.target_name {
            self.target_name = target_name;
        }
        self.validate()?;
        Ok(self)
    }

    /// Make `base_path` absolute with `..` collapsed and symlinks resolved.
    pub fn resolve(mut self) -> Result<Self, ScanError> {
        self.base_path = self
            .base_path
            .canonicalize()
            .map_err(|e| io_err(&self.base_path, e))?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ScanError> {
        let mut components = Path::new(&self.target_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(ScanError::InvalidConfig(format!(
                "target name '{}' must be a plain file name",
                self.target_name
            ))),
        }
    }
}

/// Directory containing the running executable, symlinks resolved.
fn tool_dir() -> Result<PathBuf, ScanError> {
    let exe = std::env::current_exe().map_err(|e| io_err("<current executable>", e))?;
    let exe = exe.canonicalize().map_err(|e| io_err(&exe, e))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ScanError::InvalidConfig(format!("{} has no parent", exe.display())))
}
