//! Configuration Loader
//!
//! Loads and merges configuration from multiple sources with proper precedence.

use crate::bridge::BridgeConfig;
use crate::crash_reporter::CrashReporterConfig;
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "cef-bridge.toml";

/// Overrides the library name or path
pub const ENV_LIBRARY: &str = "CEF_BRIDGE_LIBRARY";

/// Overrides the log filter
pub const ENV_LOG: &str = "CEF_BRIDGE_LOG";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. User config (<config_dir>/cef-bridge/config.toml)
/// 2. Project config (cef-bridge.toml, nearest ancestor directory)
/// 3. Environment variables (CEF_BRIDGE_*)
pub struct ConfigLoader {
    /// Cached user config path
    user_config_path: Option<PathBuf>,
}

/// Merged configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bridge: BridgeConfig,

    /// Directory holding the cef-bridge.toml that was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            user_config_path: None,
        }
    }

    /// Use `path` as the user config instead of the platform location
    pub fn with_user_config(path: PathBuf) -> Self {
        Self {
            user_config_path: Some(path),
        }
    }

    /// Load configuration starting from `start_dir`
    ///
    /// Walks up the directory tree looking for cef-bridge.toml. A missing
    /// project file is not an error.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = Self::find_project_config(start_dir)?;
        self.assemble(project, project_root)
    }

    /// Load configuration from a specific project file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = BridgeConfig::load_from_file(config_path)?;
        let project_root = config_path.parent().map(Path::to_path_buf);
        self.assemble(project, project_root)
    }

    fn assemble(
        &mut self,
        project: BridgeConfig,
        project_root: Option<PathBuf>,
    ) -> ConfigResult<Config> {
        let mut bridge = self.load_user_config()?;
        bridge.merge(&project);
        Self::apply_env_overrides(&mut bridge);
        bridge.validate()?;

        Ok(Config {
            bridge,
            project_root,
        })
    }

    fn find_project_config(start_dir: &Path) -> ConfigResult<(Option<PathBuf>, BridgeConfig)> {
        for dir in start_dir.ancestors() {
            let config_path = dir.join(PROJECT_CONFIG_FILE);
            if config_path.is_file() {
                let config = BridgeConfig::load_from_file(&config_path)?;
                return Ok((Some(dir.to_path_buf()), config));
            }
        }
        Ok((None, BridgeConfig::default()))
    }

    /// Load the user configuration; absent file or config dir yields defaults
    fn load_user_config(&mut self) -> ConfigResult<BridgeConfig> {
        if self.user_config_path.is_none() {
            match Self::user_config_file() {
                Ok(path) => self.user_config_path = Some(path),
                Err(ConfigError::ConfigDirNotFound) => return Ok(BridgeConfig::default()),
                Err(e) => return Err(e),
            }
        }

        match &self.user_config_path {
            Some(path) if path.exists() => BridgeConfig::load_from_file(path),
            _ => Ok(BridgeConfig::default()),
        }
    }

    /// Apply CEF_BRIDGE_* environment variables
    fn apply_env_overrides(config: &mut BridgeConfig) {
        if let Ok(library) = env::var(ENV_LIBRARY) {
            config.library.get_or_insert_with(Default::default).name = Some(library);
        }

        if let Ok(filter) = env::var(ENV_LOG) {
            config.logging.get_or_insert_with(Default::default).filter = Some(filter);
        }
    }

    /// The user configuration directory (<config_dir>/cef-bridge)
    pub fn user_config_dir() -> ConfigResult<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(base.join("cef-bridge"))
    }

    /// The user configuration file
    pub fn user_config_file() -> ConfigResult<PathBuf> {
        Ok(Self::user_config_dir()?.join("config.toml"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn library_name(&self) -> &str {
        self.bridge.library_name()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        self.bridge.search_paths()
    }

    pub fn log_filter(&self) -> &str {
        self.bridge.log_filter()
    }

    pub fn crash_reporter(&self) -> Option<&CrashReporterConfig> {
        self.bridge.crash_reporter.as_ref()
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Whether a cef-bridge.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}
