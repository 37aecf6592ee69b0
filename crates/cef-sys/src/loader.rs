//! Dynamic loading of the native library
//!
//! Resolves a library name to a file using platform naming conventions and a
//! list of search paths, loads it with `libloading` and caches it by path.

use libloading::Library;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Library loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    #[error("Failed to load library: {0}")]
    LoadFailed(String),
}

/// Dynamic library loader with caching and platform-specific path resolution
///
/// # Safety
///
/// Loading a dynamic library runs its initialisers inside this process. Only
/// load trusted builds of the browser engine.
pub struct LibraryLoader {
    loaded: HashMap<PathBuf, Arc<Library>>,
    search_paths: Vec<PathBuf>,
}

impl LibraryLoader {
    /// Create a loader with the platform's default search paths
    pub fn new() -> Self {
        Self {
            loaded: HashMap::new(),
            search_paths: Self::default_search_paths(),
        }
    }

    /// Platform default search paths, current directory first
    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(target_os = "linux")]
        {
            paths.push(PathBuf::from("/usr/lib"));
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/lib"));
            if cfg!(target_pointer_width = "64") {
                paths.push(PathBuf::from("/usr/lib64"));
            }
        }

        #[cfg(target_os = "macos")]
        {
            paths.push(PathBuf::from("/usr/local/lib"));
            paths.push(PathBuf::from("/opt/homebrew/lib"));
        }

        #[cfg(target_os = "windows")]
        {
            if let Ok(system_root) = std::env::var("SystemRoot") {
                paths.push(PathBuf::from(format!("{}\\System32", system_root)));
            }
        }

        // Distributions ship the engine next to the executable
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            paths.insert(0, exe_dir);
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.insert(0, cwd);
        }

        paths
    }

    /// Candidate file names for `name` on this platform, in priority order
    fn candidate_file_names(name: &str) -> Vec<String> {
        if cfg!(target_os = "windows") {
            vec![format!("{}.dll", name), format!("lib{}.dll", name)]
        } else if cfg!(target_os = "macos") {
            vec![
                format!("lib{}.dylib", name),
                format!("lib{}.so", name),
                format!("{}.dylib", name),
            ]
        } else {
            vec![format!("lib{}.so", name), format!("{}.so", name)]
        }
    }

    /// Resolve a library name or path to an existing file
    fn resolve_library_path(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }

        let candidates = Self::candidate_file_names(name);
        self.search_paths.iter().find_map(|dir| {
            candidates
                .iter()
                .map(|file| dir.join(file))
                .find(|full| full.exists())
        })
    }

    /// Load a library by short name ("cef") or absolute path
    ///
    /// Returns the cached instance when the same file was loaded before.
    pub fn load(&mut self, name: &str) -> Result<Arc<Library>, LoadError> {
        let path = self
            .resolve_library_path(name)
            .ok_or_else(|| LoadError::LibraryNotFound(name.to_string()))?;

        if let Some(library) = self.loaded.get(&path) {
            return Ok(Arc::clone(library));
        }

        let library =
            unsafe { Library::new(&path).map_err(|e| LoadError::LoadFailed(e.to_string()))? };
        let library = Arc::new(library);
        self.loaded.insert(path, Arc::clone(&library));
        Ok(library)
    }

    /// Add a search path ahead of all others
    pub fn add_search_path(&mut self, path: PathBuf) {
        self.search_paths.insert(0, path);
    }

    /// Configured search paths, highest priority first
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Number of distinct libraries loaded so far
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_default_search_paths_start_with_cwd() {
        let paths = LibraryLoader::default_search_paths();
        assert!(!paths.is_empty());
        if let Ok(cwd) = std::env::current_dir() {
            assert_eq!(paths[0], cwd);
        }
    }

    #[test]
    fn test_library_not_found() {
        let mut loader = LibraryLoader::new();
        let result = loader.load("nonexistent_cef_build_xyz");
        assert!(matches!(result, Err(LoadError::LibraryNotFound(_))));
        assert_eq!(loader.loaded_count(), 0);
    }

    #[test]
    fn test_absolute_path_must_exist() {
        let loader = LibraryLoader::new();
        let missing = std::env::temp_dir().join("no_such_dir_cef").join("libcef.so");
        assert_eq!(loader.resolve_library_path(missing.to_str().unwrap()), None);
    }

    #[test]
    fn test_add_search_path_takes_priority() {
        let mut loader = LibraryLoader::new();
        let custom = PathBuf::from("/opt/cef/Release");
        loader.add_search_path(custom.clone());
        assert_eq!(loader.search_paths()[0], custom);
    }

    #[rstest]
    #[cfg_attr(target_os = "linux", case("cef", "libcef.so"))]
    #[cfg_attr(target_os = "macos", case("cef", "libcef.dylib"))]
    #[cfg_attr(target_os = "windows", case("libcef", "libcef.dll"))]
    fn test_preferred_file_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(LibraryLoader::candidate_file_names(name)[0], expected);
    }

    #[test]
    fn test_resolves_file_in_search_path() {
        let dir = std::env::temp_dir().join(format!("cef_loader_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join(&LibraryLoader::candidate_file_names("fakecef")[0]);
        std::fs::write(&file, b"not a real library").unwrap();

        let mut loader = LibraryLoader::new();
        loader.add_search_path(dir.clone());
        assert_eq!(loader.resolve_library_path("fakecef"), Some(file.clone()));

        // Present on disk but not loadable
        assert!(matches!(loader.load("fakecef"), Err(LoadError::LoadFailed(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
