//! Configuration loading and precedence tests

use cef_config::loader::{ENV_LOG, PROJECT_CONFIG_FILE};
use cef_config::{ConfigError, ConfigLoader};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join(PROJECT_CONFIG_FILE);
    fs::write(&config_path, content).unwrap();
    config_path
}

fn loader_without_user_config(temp: &TempDir) -> ConfigLoader {
    ConfigLoader::with_user_config(temp.path().join("absent.toml"))
}

#[test]
#[serial]
fn test_empty_project_file_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = loader_without_user_config(&temp_dir)
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(config.is_project());
    assert_eq!(config.library_name(), "cef");
    assert_eq!(config.log_filter(), "info");
    assert!(config.crash_reporter().is_none());
}

#[test]
#[serial]
fn test_nearest_project_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[library]\nname = \"outer\"\n");
    let inner = temp_dir.path().join("inner");
    let deeper = inner.join("src");
    fs::create_dir_all(&deeper).unwrap();
    create_config_file(&inner, "[library]\nname = \"inner\"\n");

    let config = loader_without_user_config(&temp_dir)
        .load_from_directory(&deeper)
        .unwrap();

    assert_eq!(config.library_name(), "inner");
    assert_eq!(config.project_root(), Some(inner.as_path()));
}

#[test]
#[serial]
fn test_search_paths_accumulate_across_files() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.toml");
    fs::write(&user, "[library]\nsearch_paths = [\"/usr/lib/cef\"]\n").unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir(&project).unwrap();
    create_config_file(&project, "[library]\nsearch_paths = [\"vendor/cef\"]\n");

    let config = ConfigLoader::with_user_config(user)
        .load_from_directory(&project)
        .unwrap();

    assert_eq!(
        config.search_paths(),
        &[PathBuf::from("vendor/cef"), PathBuf::from("/usr/lib/cef")]
    );
}

#[test]
#[serial]
fn test_env_beats_project_file() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[logging]\nfilter = \"warn\"\n");

    env::set_var(ENV_LOG, "cef_bridge=debug");
    let result = loader_without_user_config(&temp_dir).load_from_directory(temp_dir.path());
    env::remove_var(ENV_LOG);

    assert_eq!(result.unwrap().log_filter(), "cef_bridge=debug");
}

#[test]
#[serial]
fn test_malformed_project_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[library\nname = \"cef\"\n");

    let result = loader_without_user_config(&temp_dir).load_from_directory(temp_dir.path());

    match result {
        Err(ConfigError::TomlParseError { file, .. }) => assert_eq!(file, path),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_invalid_crash_reporter_in_user_config() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.toml");
    fs::write(&user, "[crash_reporter]\nserver_url = \"ftp://x\"\n").unwrap();

    let result = ConfigLoader::with_user_config(user).load_from_directory(temp_dir.path());

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_missing_specific_file() {
    let temp_dir = TempDir::new().unwrap();
    let result =
        loader_without_user_config(&temp_dir).load_from_file(&temp_dir.path().join("nope.toml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}
