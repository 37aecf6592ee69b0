//! Bridge Configuration (cef-bridge.toml)
//!
//! Describes where the native library lives, how the bridge logs, and how the
//! native crash reporter is set up.

use crate::crash_reporter::CrashReporterConfig;
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Library name used when nothing is configured
pub const DEFAULT_LIBRARY_NAME: &str = "cef";

/// Log filter used when nothing is configured
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Bridge configuration from cef-bridge.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Native library location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryConfig>,

    /// Logging settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Crash reporter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crash_reporter: Option<CrashReporterConfig>,
}

/// Native library location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Short name ("cef") or absolute path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Extra directories searched before the platform defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. "cef_bridge=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl BridgeConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(name) = self.library.as_ref().and_then(|l| l.name.as_deref()) {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "library.name".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if let Some(filter) = self.logging.as_ref().and_then(|l| l.filter.as_deref()) {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "logging.filter".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if let Some(crash) = &self.crash_reporter {
            crash.validate()?;
        }

        Ok(())
    }

    /// Merge another config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &BridgeConfig) {
        if let Some(theirs) = &other.library {
            match self.library.as_mut() {
                Some(mine) => {
                    if theirs.name.is_some() {
                        mine.name = theirs.name.clone();
                    }
                    // Search paths accumulate, the overriding file's first
                    let mut paths = theirs.search_paths.clone();
                    paths.append(&mut mine.search_paths);
                    mine.search_paths = paths;
                }
                None => self.library = Some(theirs.clone()),
            }
        }
        if let Some(logging) = &other.logging {
            if logging.filter.is_some() {
                self.logging = Some(logging.clone());
            }
        }
        if other.crash_reporter.is_some() {
            self.crash_reporter = other.crash_reporter.clone();
        }
    }

    /// Library name or path to load
    pub fn library_name(&self) -> &str {
        self.library
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .unwrap_or(DEFAULT_LIBRARY_NAME)
    }

    /// Extra library search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        self.library
            .as_ref()
            .map(|l| l.search_paths.as_slice())
            .unwrap_or(&[])
    }

    /// Log filter directive
    pub fn log_filter(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.filter.as_deref())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config: BridgeConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.library_name(), "cef");
        assert_eq!(config.log_filter(), "info");
        assert!(config.search_paths().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[library]
name = "/opt/cef/Release/libcef.so"
search_paths = ["/opt/cef/Release"]

[logging]
filter = "cef_bridge=debug"

[crash_reporter]
product_name = "Viewer"
server_url = "https://crash.example.com/submit"

[crash_reporter.crash_keys]
session = "medium"
"#;

        let config: BridgeConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.library_name(), "/opt/cef/Release/libcef.so");
        assert_eq!(config.search_paths(), &[PathBuf::from("/opt/cef/Release")]);
        assert_eq!(config.log_filter(), "cef_bridge=debug");
        assert!(config.crash_reporter.is_some());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<BridgeConfig, _> = toml::from_str("[library]\nflavour = \"debug\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_library_name_invalid() {
        let config = BridgeConfig {
            library: Some(LibraryConfig {
                name: Some("  ".to_string()),
                search_paths: Vec::new(),
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "library.name"
        ));
    }

    #[test]
    fn test_merge_overrides_and_accumulates_paths() {
        let mut base = BridgeConfig {
            library: Some(LibraryConfig {
                name: Some("cef".to_string()),
                search_paths: vec![PathBuf::from("/usr/lib/cef")],
            }),
            logging: Some(LoggingConfig {
                filter: Some("warn".to_string()),
            }),
            crash_reporter: None,
        };
        let project = BridgeConfig {
            library: Some(LibraryConfig {
                name: None,
                search_paths: vec![PathBuf::from("./third_party/cef")],
            }),
            logging: Some(LoggingConfig { filter: None }),
            crash_reporter: None,
        };

        base.merge(&project);
        assert_eq!(base.library_name(), "cef");
        assert_eq!(
            base.search_paths(),
            &[PathBuf::from("./third_party/cef"), PathBuf::from("/usr/lib/cef")]
        );
        assert_eq!(base.log_filter(), "warn");
    }
}
