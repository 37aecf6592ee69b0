//! Exported string functions
//!
//! Buffers created here are remembered in a registry keyed by address, so a
//! destructor call on an unknown or already freed buffer is counted instead
//! of corrupting memory.

use crate::alloc::track;
use cef_sys::{cef_string_t, cef_string_userfree_t, char16};
use std::collections::BTreeMap;
use std::os::raw::c_int;
use std::sync::{Mutex, MutexGuard, PoisonError};

static BUFFERS: Mutex<BTreeMap<usize, Box<[char16]>>> = Mutex::new(BTreeMap::new());

fn buffers() -> MutexGuard<'static, BTreeMap<usize, Box<[char16]>>> {
    BUFFERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Copy `units` into a new NUL-terminated buffer owned by the registry
pub(crate) fn alloc_buffer(units: &[char16]) -> *mut char16 {
    let mut buffer: Vec<char16> = Vec::with_capacity(units.len() + 1);
    buffer.extend_from_slice(units);
    buffer.push(0);
    let mut buffer = buffer.into_boxed_slice();
    let ptr = buffer.as_mut_ptr();
    buffers().insert(ptr as usize, buffer);
    track(|a| a.strings += 1);
    ptr
}

unsafe extern "C" fn free_buffer(ptr: *mut char16) {
    match buffers().remove(&(ptr as usize)) {
        Some(_) => track(|a| a.strings -= 1),
        None => track(|a| a.invalid_frees += 1),
    }
}

/// Borrow the code units of a string
///
/// # Safety
///
/// `s` must point to a valid string.
pub(crate) unsafe fn units<'a>(s: *const cef_string_t) -> &'a [char16] {
    let s = &*s;
    if s.str_.is_null() || s.length == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(s.str_, s.length)
    }
}

/// An owned string value that uses this crate's destructor
pub(crate) fn owned(units: &[char16]) -> cef_string_t {
    if units.is_empty() {
        return cef_string_t::empty();
    }
    cef_string_t {
        str_: alloc_buffer(units),
        length: units.len(),
        dtor: Some(free_buffer),
    }
}

pub unsafe extern "C" fn string_utf16_set(
    src: *const char16,
    src_len: usize,
    output: *mut cef_string_t,
    copy: c_int,
) -> c_int {
    if output.is_null() {
        return 0;
    }
    string_utf16_clear(output);

    if copy != 0 {
        if !src.is_null() && src_len > 0 {
            *output = owned(std::slice::from_raw_parts(src, src_len));
        }
    } else {
        *output = cef_string_t {
            str_: src as *mut char16,
            length: src_len,
            dtor: None,
        };
    }
    1
}

pub unsafe extern "C" fn string_utf16_clear(s: *mut cef_string_t) {
    if s.is_null() {
        return;
    }
    if let Some(dtor) = (*s).dtor {
        if !(*s).str_.is_null() {
            dtor((*s).str_);
        }
    }
    *s = cef_string_t::empty();
}

pub unsafe extern "C" fn string_userfree_utf16_free(s: cef_string_userfree_t) {
    if s.is_null() {
        return;
    }
    string_utf16_clear(s);
    drop(Box::from_raw(s));
    track(|a| a.userfree -= 1);
}

/// A library-style result string holding `units`
pub fn userfree_units(units: &[char16]) -> cef_string_userfree_t {
    track(|a| a.userfree += 1);
    Box::into_raw(Box::new(owned(units)))
}

/// A library-style result string holding `value`
pub fn userfree(value: &str) -> cef_string_userfree_t {
    let units: Vec<char16> = value.encode_utf16().collect();
    userfree_units(&units)
}

/// Null for `None`, otherwise a result string
pub fn userfree_opt(value: Option<&str>) -> cef_string_userfree_t {
    value.map_or(std::ptr::null_mut(), userfree)
}

/// Read a string lossily; null reads as `None`
///
/// # Safety
///
/// `s` must be null or point to a valid string.
pub unsafe fn read_string(s: *const cef_string_t) -> Option<String> {
    if s.is_null() {
        None
    } else {
        Some(String::from_utf16_lossy(units(s)))
    }
}

/// A string owned by this crate, cleared on drop
///
/// Stands in for strings the library passes to callbacks and for
/// out-parameters the bridge writes into.
#[derive(Debug)]
pub struct TestString {
    raw: Box<cef_string_t>,
}

impl TestString {
    pub fn new(value: &str) -> Self {
        let units: Vec<char16> = value.encode_utf16().collect();
        Self::from_units(&units)
    }

    /// Arbitrary code units, including unpaired surrogates
    pub fn from_units(units: &[char16]) -> Self {
        Self {
            raw: Box::new(owned(units)),
        }
    }

    pub fn as_ptr(&self) -> *const cef_string_t {
        &*self.raw
    }

    pub fn as_mut_ptr(&mut self) -> *mut cef_string_t {
        &mut *self.raw
    }

    /// Current contents, decoded lossily
    pub fn value(&self) -> String {
        unsafe { String::from_utf16_lossy(units(self.as_ptr())) }
    }
}

impl Drop for TestString {
    fn drop(&mut self) {
        unsafe { string_utf16_clear(self.as_mut_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::LeakCheck;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_copy_then_clear() {
        let check = LeakCheck::new();
        let units: Vec<u16> = "hello".encode_utf16().collect();
        let mut s = cef_string_t::empty();
        unsafe {
            assert_eq!(string_utf16_set(units.as_ptr(), units.len(), &mut s, 1), 1);
            assert_eq!(s.length, 5);
            assert!(s.dtor.is_some());
            assert_eq!(check.delta().strings, 1);
            string_utf16_clear(&mut s);
        }
        assert!(s.str_.is_null());
        check.assert_clean();
    }

    #[test]
    fn test_set_without_copy_borrows() {
        let units: Vec<u16> = "abc".encode_utf16().collect();
        let mut s = cef_string_t::empty();
        unsafe {
            string_utf16_set(units.as_ptr(), units.len(), &mut s, 0);
        }
        assert_eq!(s.str_ as *const u16, units.as_ptr());
        assert!(s.dtor.is_none());
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let check = LeakCheck::new();
        let mut s = TestString::new("first");
        let units: Vec<u16> = "second".encode_utf16().collect();
        unsafe {
            string_utf16_set(units.as_ptr(), units.len(), s.as_mut_ptr(), 1);
        }
        assert_eq!(s.value(), "second");
        drop(s);
        check.assert_clean();
    }

    #[test]
    fn test_userfree_round_trip() {
        let check = LeakCheck::new();
        let s = userfree("value");
        unsafe {
            assert_eq!(read_string(s).as_deref(), Some("value"));
            string_userfree_utf16_free(s);
        }
        check.assert_clean();
    }

    #[test]
    fn test_double_free_is_counted() {
        let check = LeakCheck::new();
        let s = owned(&[0x61]);
        let dtor = s.dtor.unwrap();
        unsafe {
            dtor(s.str_);
            dtor(s.str_);
        }
        assert_eq!(check.delta().invalid_frees, 1);
    }

    #[test]
    fn test_null_reads_as_none() {
        assert_eq!(unsafe { read_string(std::ptr::null()) }, None);
        assert_eq!(userfree_opt(None), std::ptr::null_mut());
    }
}
