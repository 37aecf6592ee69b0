//! String and URL marshalling
//!
//! Three ownership shapes cross the boundary:
//! - borrowed `*const cef_string_t` arguments, decoded in place
//! - `cef_string_userfree_t` results, decoded then freed on every path
//! - out-parameters, overwritten with a library-allocated copy
//!
//! A null string is absent (`None`); a non-null empty string is `Some("")`.
//! URLs go through the same path and are then parsed, so an empty URL is a
//! parse failure rather than an absent one.

use crate::error::BridgeResult;
use cef_sys::{cef_string_t, cef_string_userfree_t, char16, CefApi};
use url::Url;

/// UTF-16 encode `value`
pub fn encode(value: &str) -> Vec<char16> {
    value.encode_utf16().collect()
}

/// A Rust-owned string lent to the library for the duration of a call
///
/// The library only reads borrowed `*const cef_string_t` arguments, so the
/// view carries no destructor and the buffer is freed by Rust.
pub struct CefStringBuf {
    units: Vec<char16>,
    raw: cef_string_t,
}

impl CefStringBuf {
    pub fn new(value: &str) -> Self {
        let mut units = encode(value);
        let raw = cef_string_t {
            str_: units.as_mut_ptr(),
            length: units.len(),
            dtor: None,
        };
        Self { units, raw }
    }

    /// Pointer valid for as long as `self` is neither moved nor dropped
    pub fn as_ptr(&self) -> *const cef_string_t {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl std::fmt::Debug for CefStringBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CefStringBuf")
            .field(&String::from_utf16_lossy(&self.units))
            .finish()
    }
}

/// Pointer for an optional argument; null for `None`
pub fn opt_ptr(value: Option<&CefStringBuf>) -> *const cef_string_t {
    value.map_or(std::ptr::null(), CefStringBuf::as_ptr)
}

/// Code units of a non-null string
///
/// # Safety
///
/// `s` must point to a valid string.
unsafe fn units<'a>(s: *const cef_string_t) -> &'a [char16] {
    let s = &*s;
    if s.str_.is_null() || s.length == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(s.str_, s.length)
    }
}

/// Decode a borrowed string
///
/// # Safety
///
/// `s` must be null or point to a valid string.
pub unsafe fn decode(s: *const cef_string_t) -> BridgeResult<Option<String>> {
    if s.is_null() {
        return Ok(None);
    }
    Ok(Some(String::from_utf16(units(s))?))
}

/// Decode and parse a borrowed URL string
///
/// # Safety
///
/// `s` must be null or point to a valid string.
pub unsafe fn decode_url(s: *const cef_string_t) -> BridgeResult<Option<Url>> {
    parse_url(decode(s)?)
}

/// Parse an optional URL; `None` stays `None`
pub fn parse_url(value: Option<String>) -> BridgeResult<Option<Url>> {
    Ok(value.map(|v| Url::parse(&v)).transpose()?)
}

/// Frees a userfree string when dropped
struct Userfree<'a> {
    api: &'a CefApi,
    ptr: cef_string_userfree_t,
}

impl Drop for Userfree<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.string_userfree_utf16_free)(self.ptr) }
    }
}

/// Decode a userfree result and free it, whether or not decoding succeeds
///
/// # Safety
///
/// `ptr` must be null or a userfree string not freed elsewhere.
pub unsafe fn take_string(api: &CefApi, ptr: cef_string_userfree_t) -> BridgeResult<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    let guard = Userfree { api, ptr };
    decode(guard.ptr)
}

/// Decode a userfree URL result and free it
///
/// # Safety
///
/// Same as [`take_string`].
pub unsafe fn take_url(api: &CefApi, ptr: cef_string_userfree_t) -> BridgeResult<Option<Url>> {
    parse_url(take_string(api, ptr)?)
}

/// Overwrite an out-parameter with a library-owned copy of `value`
///
/// Any previous contents are released by the library first.
///
/// # Safety
///
/// `out` must point to a valid, writable string.
pub unsafe fn write_string(api: &CefApi, out: *mut cef_string_t, value: &str) -> bool {
    let units = encode(value);
    (api.string_utf16_set)(units.as_ptr(), units.len(), out, 1) != 0
}

/// A string value the library fills in, cleared on drop
pub(crate) struct ScopedString<'a> {
    api: &'a CefApi,
    raw: cef_string_t,
}

impl<'a> ScopedString<'a> {
    pub(crate) fn new(api: &'a CefApi) -> Self {
        Self {
            api,
            raw: cef_string_t::empty(),
        }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut cef_string_t {
        &mut self.raw
    }

    pub(crate) fn decode(&self) -> BridgeResult<String> {
        Ok(String::from_utf16(unsafe { units(&self.raw) })?)
    }
}

impl Drop for ScopedString<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.string_utf16_clear)(&mut self.raw) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use cef_testkit::{userfree, userfree_units, LeakCheck, TestString};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buf_is_borrowed_view() {
        let buf = CefStringBuf::new("héllo");
        let raw = unsafe { &*buf.as_ptr() };
        assert_eq!(raw.length, 5);
        assert!(raw.dtor.is_none());
        assert_eq!(unsafe { decode(buf.as_ptr()) }.unwrap().as_deref(), Some("héllo"));
    }

    #[test]
    fn test_null_and_empty_are_distinct() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        unsafe {
            assert_eq!(take_string(&api, std::ptr::null_mut()).unwrap(), None);
            assert_eq!(take_string(&api, userfree("")).unwrap(), Some(String::new()));
        }
        check.assert_clean();
    }

    #[test]
    fn test_userfree_freed_on_decode_error() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        let result = unsafe { take_string(&api, userfree_units(&[0x61, 0xD800])) };
        assert!(matches!(result, Err(BridgeError::InvalidUtf16(_))));
        check.assert_clean();
    }

    #[test]
    fn test_url_tri_state() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        unsafe {
            assert_eq!(take_url(&api, std::ptr::null_mut()).unwrap(), None);
            assert!(matches!(
                take_url(&api, userfree("")),
                Err(BridgeError::MalformedUrl(_))
            ));
            assert_eq!(
                take_url(&api, userfree("https://example.com/a")).unwrap(),
                Some(Url::parse("https://example.com/a").unwrap())
            );
        }
        check.assert_clean();
    }

    #[test]
    fn test_write_string_replaces_out_param() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        let mut out = TestString::new("https://old.example/");
        assert!(unsafe { write_string(&api, out.as_mut_ptr(), "https://example.com/x") });
        assert_eq!(out.value(), "https://example.com/x");
        drop(out);
        check.assert_clean();
    }

    #[test]
    fn test_scoped_string_clears() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        {
            let mut scoped = ScopedString::new(&api);
            unsafe { write_string(&api, scoped.as_mut_ptr(), "value") };
            assert_eq!(scoped.decode().unwrap(), "value");
        }
        check.assert_clean();
    }

    #[test]
    fn test_opt_ptr() {
        let buf = CefStringBuf::new("x");
        assert!(opt_ptr(None).is_null());
        assert_eq!(opt_ptr(Some(&buf)), buf.as_ptr());
    }
}
