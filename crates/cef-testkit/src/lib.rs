//! In-process stand-in for the CEF library
//!
//! Implements the foreign side of the C ABI in Rust so the bridge can be
//! exercised without loading the real engine:
//! - `strings` / `collections`: the exported string, list and multimap
//!   functions, with per-thread live-allocation counters
//! - `fake`: reference-counted objects with observable refcounts and call logs
//! - one module per object family with its state struct and slot functions
//! - `api()`: a [`CefApi`] wired to all of the above
//!
//! # Leak checks
//!
//! ```ignore
//! let check = LeakCheck::new();
//! // ... drive the bridge ...
//! check.assert_clean();
//! ```

pub mod alloc;
pub mod callbacks;
pub mod collections;
pub mod context_menu;
pub mod dom;
pub mod fake;
pub mod navigation;
pub mod print;
pub mod request;
pub mod strings;

use cef_sys::{CefApi, CefFunctions};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::os::raw::c_int;
use std::sync::Arc;

pub use alloc::{live, Allocations, LeakCheck};
pub use callbacks::*;
pub use collections::{list_contents, list_from, multimap_contents, multimap_from};
pub use context_menu::*;
pub use dom::*;
pub use fake::FakeHandle;
pub use navigation::*;
pub use print::*;
pub use request::*;
pub use strings::{read_string, userfree, userfree_opt, userfree_units, TestString};

#[derive(Default)]
struct CrashState {
    enabled: bool,
    keys: BTreeMap<String, String>,
}

thread_local! {
    static CRASH: RefCell<CrashState> = RefCell::new(CrashState::default());
}

/// Function table backed by this crate
pub fn functions() -> CefFunctions {
    CefFunctions {
        string_utf16_set: strings::string_utf16_set,
        string_utf16_clear: strings::string_utf16_clear,
        string_userfree_utf16_free: strings::string_userfree_utf16_free,
        string_list_alloc: collections::string_list_alloc,
        string_list_size: collections::string_list_size,
        string_list_value: collections::string_list_value,
        string_list_append: collections::string_list_append,
        string_list_free: collections::string_list_free,
        string_multimap_alloc: collections::string_multimap_alloc,
        string_multimap_size: collections::string_multimap_size,
        string_multimap_key: collections::string_multimap_key,
        string_multimap_value: collections::string_multimap_value,
        string_multimap_append: collections::string_multimap_append,
        string_multimap_free: collections::string_multimap_free,
        request_create,
        crash_reporting_enabled,
        set_crash_key_value,
    }
}

/// Shared [`CefApi`] backed by this crate
pub fn api() -> Arc<CefApi> {
    Arc::new(CefApi::from_functions(functions()))
}

unsafe extern "C" fn request_create() -> *mut cef_sys::cef_request_t {
    FakeRequest::new(RequestState::default()).into_raw()
}

unsafe extern "C" fn crash_reporting_enabled() -> c_int {
    CRASH.with(|c| c_int::from(c.borrow().enabled))
}

unsafe extern "C" fn set_crash_key_value(
    key: *const cef_sys::cef_string_t,
    value: *const cef_sys::cef_string_t,
) {
    let Some(key) = read_string(key) else {
        return;
    };
    let value = read_string(value);
    CRASH.with(|c| {
        let mut state = c.borrow_mut();
        match value {
            Some(value) => state.keys.insert(key, value),
            None => state.keys.remove(&key),
        };
    });
}

/// Toggle what `cef_crash_reporting_enabled` reports on this thread
pub fn set_crash_reporting_enabled(enabled: bool) {
    CRASH.with(|c| c.borrow_mut().enabled = enabled);
}

/// Crash key values set on this thread
pub fn crash_keys() -> BTreeMap<String, String> {
    CRASH.with(|c| c.borrow().keys.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_crash_keys_set_and_clear() {
        let key = TestString::new("session");
        let value = TestString::new("abc");
        unsafe {
            set_crash_key_value(key.as_ptr(), value.as_ptr());
            assert_eq!(crash_keys().get("session").map(String::as_str), Some("abc"));
            set_crash_key_value(key.as_ptr(), std::ptr::null());
        }
        assert!(crash_keys().is_empty());
    }

    #[test]
    fn test_request_create_returns_owned_reference() {
        let check = LeakCheck::new();
        let api = api();
        unsafe {
            let raw = (api.request_create)();
            assert!(!raw.is_null());
            assert_eq!(((*raw).base.release)(raw.cast()), 1);
        }
        check.assert_clean();
    }
}
