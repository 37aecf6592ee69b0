//! Exported free functions of the native library
//!
//! The library exports its string, collection and factory helpers as plain C
//! symbols. They are resolved once into a [`CefFunctions`] table and carried
//! around in a [`CefApi`], which also keeps the backing library mapped.

use crate::loader::{LibraryLoader, LoadError};
use crate::objects::cef_request_t;
use crate::types::*;
use libloading::Library;
use std::os::raw::c_int;
use std::sync::Arc;

/// Resolved exported functions
#[derive(Clone, Copy)]
pub struct CefFunctions {
    /// Sets `output` from `src`; with `copy` = 1 the library allocates and
    /// installs its own destructor. Clears any previous value first.
    pub string_utf16_set: unsafe extern "C" fn(
        src: *const char16,
        src_len: usize,
        output: *mut cef_string_t,
        copy: c_int,
    ) -> c_int,
    /// Runs the destructor (if any) and resets the string to empty
    pub string_utf16_clear: unsafe extern "C" fn(str_: *mut cef_string_t),
    pub string_userfree_utf16_free: unsafe extern "C" fn(str_: cef_string_userfree_t),

    pub string_list_alloc: unsafe extern "C" fn() -> cef_string_list_t,
    pub string_list_size: unsafe extern "C" fn(list: cef_string_list_t) -> usize,
    /// Copies the value at `index` into `value`, which the caller must clear
    pub string_list_value: unsafe extern "C" fn(
        list: cef_string_list_t,
        index: usize,
        value: *mut cef_string_t,
    ) -> c_int,
    pub string_list_append: unsafe extern "C" fn(list: cef_string_list_t, value: *const cef_string_t),
    pub string_list_free: unsafe extern "C" fn(list: cef_string_list_t),

    pub string_multimap_alloc: unsafe extern "C" fn() -> cef_string_multimap_t,
    pub string_multimap_size: unsafe extern "C" fn(map: cef_string_multimap_t) -> usize,
    /// Copies the key at `index` into `key`, which the caller must clear
    pub string_multimap_key: unsafe extern "C" fn(
        map: cef_string_multimap_t,
        index: usize,
        key: *mut cef_string_t,
    ) -> c_int,
    /// Copies the value at `index` into `value`, which the caller must clear
    pub string_multimap_value: unsafe extern "C" fn(
        map: cef_string_multimap_t,
        index: usize,
        value: *mut cef_string_t,
    ) -> c_int,
    pub string_multimap_append: unsafe extern "C" fn(
        map: cef_string_multimap_t,
        key: *const cef_string_t,
        value: *const cef_string_t,
    ) -> c_int,
    pub string_multimap_free: unsafe extern "C" fn(map: cef_string_multimap_t),

    /// Returns a new reference
    pub request_create: unsafe extern "C" fn() -> *mut cef_request_t,

    pub crash_reporting_enabled: unsafe extern "C" fn() -> c_int,
    /// A null `value` clears the key
    pub set_crash_key_value:
        unsafe extern "C" fn(key: *const cef_string_t, value: *const cef_string_t),
}

/// Exported symbol names, in `CefFunctions` field order
pub const EXPORTED_SYMBOLS: &[&str] = &[
    "cef_string_utf16_set",
    "cef_string_utf16_clear",
    "cef_string_userfree_utf16_free",
    "cef_string_list_alloc",
    "cef_string_list_size",
    "cef_string_list_value",
    "cef_string_list_append",
    "cef_string_list_free",
    "cef_string_multimap_alloc",
    "cef_string_multimap_size",
    "cef_string_multimap_key",
    "cef_string_multimap_value",
    "cef_string_multimap_append",
    "cef_string_multimap_free",
    "cef_request_create",
    "cef_crash_reporting_enabled",
    "cef_set_crash_key_value",
];

/// Function table plus the library that backs it
pub struct CefApi {
    functions: CefFunctions,
    library: Option<Arc<Library>>,
}

impl CefApi {
    /// Wrap an already resolved function table
    ///
    /// Used when the functions are statically linked or provided in-process.
    pub fn from_functions(functions: CefFunctions) -> Self {
        Self {
            functions,
            library: None,
        }
    }

    /// Load the library `name` through `loader` and resolve every export
    pub fn load(loader: &mut LibraryLoader, name: &str) -> Result<Self, LoadError> {
        let library = loader.load(name)?;
        let functions = unsafe { resolve(&library, name)? };
        Ok(Self {
            functions,
            library: Some(library),
        })
    }

    /// Whether this table is backed by a dynamically loaded library
    pub fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}

impl std::ops::Deref for CefApi {
    type Target = CefFunctions;

    fn deref(&self) -> &Self::Target {
        &self.functions
    }
}

impl std::fmt::Debug for CefApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CefApi")
            .field("dynamic", &self.is_dynamic())
            .finish_non_exhaustive()
    }
}

/// Resolve every exported symbol from `library`
///
/// # Safety
///
/// `library` must be the CEF library whose exports match the signatures in
/// [`CefFunctions`].
unsafe fn resolve(library: &Library, name: &str) -> Result<CefFunctions, LoadError> {
    macro_rules! symbol {
        ($sym:literal) => {{
            let symbol = library
                .get(concat!($sym, "\0").as_bytes())
                .map_err(|_| LoadError::SymbolNotFound {
                    library: name.to_string(),
                    symbol: $sym.to_string(),
                })?;
            *symbol
        }};
    }

    Ok(CefFunctions {
        string_utf16_set: symbol!("cef_string_utf16_set"),
        string_utf16_clear: symbol!("cef_string_utf16_clear"),
        string_userfree_utf16_free: symbol!("cef_string_userfree_utf16_free"),
        string_list_alloc: symbol!("cef_string_list_alloc"),
        string_list_size: symbol!("cef_string_list_size"),
        string_list_value: symbol!("cef_string_list_value"),
        string_list_append: symbol!("cef_string_list_append"),
        string_list_free: symbol!("cef_string_list_free"),
        string_multimap_alloc: symbol!("cef_string_multimap_alloc"),
        string_multimap_size: symbol!("cef_string_multimap_size"),
        string_multimap_key: symbol!("cef_string_multimap_key"),
        string_multimap_value: symbol!("cef_string_multimap_value"),
        string_multimap_append: symbol!("cef_string_multimap_append"),
        string_multimap_free: symbol!("cef_string_multimap_free"),
        request_create: symbol!("cef_request_create"),
        crash_reporting_enabled: symbol!("cef_crash_reporting_enabled"),
        set_crash_key_value: symbol!("cef_set_crash_key_value"),
    })
}
