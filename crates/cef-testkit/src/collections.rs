//! Exported string list and multimap functions

use crate::alloc::track;
use crate::strings::{string_utf16_set, units};
use cef_sys::{
    _cef_string_list_t, _cef_string_multimap_t, cef_string_list_t, cef_string_multimap_t,
    cef_string_t, char16,
};
use std::os::raw::c_int;

type ListImpl = Vec<Vec<char16>>;
type MultimapImpl = Vec<(Vec<char16>, Vec<char16>)>;

unsafe fn list<'a>(raw: cef_string_list_t) -> &'a mut ListImpl {
    &mut *raw.cast::<ListImpl>()
}

unsafe fn map<'a>(raw: cef_string_multimap_t) -> &'a mut MultimapImpl {
    &mut *raw.cast::<MultimapImpl>()
}

unsafe fn copy_out(value: &[char16], out: *mut cef_string_t) -> c_int {
    string_utf16_set(value.as_ptr(), value.len(), out, 1)
}

fn encode(value: &str) -> Vec<char16> {
    value.encode_utf16().collect()
}

pub unsafe extern "C" fn string_list_alloc() -> cef_string_list_t {
    track(|a| a.lists += 1);
    Box::into_raw(Box::new(ListImpl::new())).cast::<_cef_string_list_t>()
}

pub unsafe extern "C" fn string_list_size(raw: cef_string_list_t) -> usize {
    if raw.is_null() {
        return 0;
    }
    list(raw).len()
}

pub unsafe extern "C" fn string_list_value(
    raw: cef_string_list_t,
    index: usize,
    value: *mut cef_string_t,
) -> c_int {
    if raw.is_null() || value.is_null() {
        return 0;
    }
    match list(raw).get(index) {
        Some(entry) => copy_out(entry, value),
        None => 0,
    }
}

pub unsafe extern "C" fn string_list_append(raw: cef_string_list_t, value: *const cef_string_t) {
    if raw.is_null() || value.is_null() {
        return;
    }
    list(raw).push(units(value).to_vec());
}

pub unsafe extern "C" fn string_list_free(raw: cef_string_list_t) {
    if raw.is_null() {
        track(|a| a.invalid_frees += 1);
        return;
    }
    drop(Box::from_raw(raw.cast::<ListImpl>()));
    track(|a| a.lists -= 1);
}

pub unsafe extern "C" fn string_multimap_alloc() -> cef_string_multimap_t {
    track(|a| a.maps += 1);
    Box::into_raw(Box::new(MultimapImpl::new())).cast::<_cef_string_multimap_t>()
}

pub unsafe extern "C" fn string_multimap_size(raw: cef_string_multimap_t) -> usize {
    if raw.is_null() {
        return 0;
    }
    map(raw).len()
}

pub unsafe extern "C" fn string_multimap_key(
    raw: cef_string_multimap_t,
    index: usize,
    key: *mut cef_string_t,
) -> c_int {
    if raw.is_null() || key.is_null() {
        return 0;
    }
    match map(raw).get(index) {
        Some((k, _)) => copy_out(k, key),
        None => 0,
    }
}

pub unsafe extern "C" fn string_multimap_value(
    raw: cef_string_multimap_t,
    index: usize,
    value: *mut cef_string_t,
) -> c_int {
    if raw.is_null() || value.is_null() {
        return 0;
    }
    match map(raw).get(index) {
        Some((_, v)) => copy_out(v, value),
        None => 0,
    }
}

pub unsafe extern "C" fn string_multimap_append(
    raw: cef_string_multimap_t,
    key: *const cef_string_t,
    value: *const cef_string_t,
) -> c_int {
    if raw.is_null() || key.is_null() || value.is_null() {
        return 0;
    }
    map(raw).push((units(key).to_vec(), units(value).to_vec()));
    1
}

pub unsafe extern "C" fn string_multimap_free(raw: cef_string_multimap_t) {
    if raw.is_null() {
        track(|a| a.invalid_frees += 1);
        return;
    }
    drop(Box::from_raw(raw.cast::<MultimapImpl>()));
    track(|a| a.maps -= 1);
}

/// Allocate a list holding `values`; free it with `string_list_free`
pub fn list_from(values: &[&str]) -> cef_string_list_t {
    unsafe {
        let raw = string_list_alloc();
        fill_list(raw, values.iter().copied());
        raw
    }
}

/// Append `values` to a caller-allocated list
///
/// # Safety
///
/// `raw` must be a live list from this crate.
pub(crate) unsafe fn fill_list<'a>(raw: cef_string_list_t, values: impl Iterator<Item = &'a str>) {
    list(raw).extend(values.map(encode));
}

/// Contents of a list, decoded lossily
///
/// # Safety
///
/// `raw` must be a live list from this crate.
pub unsafe fn list_contents(raw: cef_string_list_t) -> Vec<String> {
    list(raw)
        .iter()
        .map(|v| String::from_utf16_lossy(v))
        .collect()
}

/// Allocate a multimap holding `pairs`; free it with `string_multimap_free`
pub fn multimap_from(pairs: &[(&str, &str)]) -> cef_string_multimap_t {
    unsafe {
        let raw = string_multimap_alloc();
        fill_multimap(raw, pairs.iter().map(|(k, v)| (*k, *v)));
        raw
    }
}

/// Append `pairs` to a caller-allocated multimap
///
/// # Safety
///
/// `raw` must be a live multimap from this crate.
pub(crate) unsafe fn fill_multimap<'a>(
    raw: cef_string_multimap_t,
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
) {
    map(raw).extend(pairs.map(|(k, v)| (encode(k), encode(v))));
}

/// Pairs of a multimap in insertion order, decoded lossily
///
/// # Safety
///
/// `raw` must be a live multimap from this crate.
pub unsafe fn multimap_contents(raw: cef_string_multimap_t) -> Vec<(String, String)> {
    map(raw)
        .iter()
        .map(|(k, v)| (String::from_utf16_lossy(k), String::from_utf16_lossy(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::LeakCheck;
    use crate::strings::{string_utf16_clear, TestString};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_value_copies_out() {
        let check = LeakCheck::new();
        let raw = list_from(&["a", "bc"]);
        unsafe {
            assert_eq!(string_list_size(raw), 2);
            let mut out = cef_string_t::empty();
            assert_eq!(string_list_value(raw, 1, &mut out), 1);
            assert_eq!(out.length, 2);
            string_utf16_clear(&mut out);
            assert_eq!(string_list_value(raw, 2, &mut out), 0);
            string_list_free(raw);
        }
        check.assert_clean();
    }

    #[test]
    fn test_multimap_keeps_duplicates_in_order() {
        let check = LeakCheck::new();
        let raw = multimap_from(&[("A", "1"), ("B", "x"), ("A", "2")]);
        let extra_key = TestString::new("C");
        let extra_value = TestString::new("");
        unsafe {
            assert_eq!(
                string_multimap_append(raw, extra_key.as_ptr(), extra_value.as_ptr()),
                1
            );
            assert_eq!(
                multimap_contents(raw),
                vec![
                    ("A".to_string(), "1".to_string()),
                    ("B".to_string(), "x".to_string()),
                    ("A".to_string(), "2".to_string()),
                    ("C".to_string(), String::new()),
                ]
            );
            string_multimap_free(raw);
        }
        drop(extra_key);
        drop(extra_value);
        check.assert_clean();
    }
}
