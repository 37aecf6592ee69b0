//! Crash reporter settings
//!
//! The native library reads an INI-style `crash_reporter.cfg` next to the
//! executable (macOS: the bundle's Resources directory). These settings are
//! kept in cef-bridge.toml and rendered into that file.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// File name the native library looks for
pub const CRASH_REPORTER_FILE_NAME: &str = "crash_reporter.cfg";

/// Crash reporter settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CrashReporterConfig {
    /// Value of the "prod" crash key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Value of the "ver" crash key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,

    /// Windows only: folder name component for local crash storage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Windows only: external crashpad handler executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_handler: Option<String>,

    /// Upload endpoint; reports stay on disk when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uploads_per_day: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_database_size_in_mb: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_database_age_in_days: Option<u32>,

    /// Application crash keys and their size class
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub crash_keys: BTreeMap<String, CrashKeySize>,
}

/// Size class of a crash key value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrashKeySize {
    Small,
    Medium,
    Large,
}

impl CrashKeySize {
    /// Values longer than this are truncated by the native library
    pub fn max_bytes(self) -> usize {
        match self {
            CrashKeySize::Small => 63,
            CrashKeySize::Medium => 252,
            CrashKeySize::Large => 1008,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CrashKeySize::Small => "small",
            CrashKeySize::Medium => "medium",
            CrashKeySize::Large => "large",
        }
    }
}

impl CrashReporterConfig {
    /// Validate the crash reporter settings
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(url) = &self.server_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::InvalidValue {
                    field: "crash_reporter.server_url".to_string(),
                    reason: format!("must be an http(s) URL, got '{}'", url),
                });
            }
        }

        let text_fields = [
            ("crash_reporter.product_name", &self.product_name),
            ("crash_reporter.product_version", &self.product_version),
            ("crash_reporter.app_name", &self.app_name),
            ("crash_reporter.external_handler", &self.external_handler),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                if value.contains(['\n', '\r']) {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        reason: "must be a single line".to_string(),
                    });
                }
            }
        }

        for key in self.crash_keys.keys() {
            let well_formed = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !well_formed {
                return Err(ConfigError::InvalidValue {
                    field: format!("crash_reporter.crash_keys.{}", key),
                    reason: "key names may only contain ASCII letters, digits, '_' and '-'"
                        .to_string(),
                });
            }
        }

        Ok(())
    }

    /// Render the native `crash_reporter.cfg` contents
    pub fn to_ini(&self) -> String {
        let mut out = String::from("# Generated by cef-bridge. Do not edit.\n[Config]\n");

        let mut entry = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                let _ = writeln!(out, "{}={}", key, value);
            }
        };
        entry("ProductName", self.product_name.clone());
        entry("ProductVersion", self.product_version.clone());
        entry("AppName", self.app_name.clone());
        entry("ExternalHandler", self.external_handler.clone());
        entry("ServerURL", self.server_url.clone());
        entry(
            "RateLimitEnabled",
            self.rate_limit_enabled.map(|b| b.to_string()),
        );
        entry(
            "MaxUploadsPerDay",
            self.max_uploads_per_day.map(|n| n.to_string()),
        );
        entry(
            "MaxDatabaseSizeInMb",
            self.max_database_size_in_mb.map(|n| n.to_string()),
        );
        entry(
            "MaxDatabaseAgeInDays",
            self.max_database_age_in_days.map(|n| n.to_string()),
        );

        if !self.crash_keys.is_empty() {
            out.push_str("\n[CrashKeys]\n");
            for (key, size) in &self.crash_keys {
                let _ = writeln!(out, "{}={}", key, size.as_str());
            }
        }

        out
    }

    /// Write `crash_reporter.cfg` into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path) -> ConfigResult<PathBuf> {
        self.validate()?;
        let path = dir.join(CRASH_REPORTER_FILE_NAME);
        std::fs::write(&path, self.to_ini())?;
        Ok(path)
    }

    /// Size class of a configured crash key
    pub fn key_size(&self, key: &str) -> Option<CrashKeySize> {
        self.crash_keys.get(key).copied()
    }
}
