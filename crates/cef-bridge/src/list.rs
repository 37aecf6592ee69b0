//! String list marshalling

use crate::error::{BridgeError, BridgeResult};
use crate::string::{CefStringBuf, ScopedString};
use cef_sys::{cef_string_list_t, CefApi};

/// A library-allocated string list, freed on drop
pub struct StringList<'a> {
    api: &'a CefApi,
    raw: cef_string_list_t,
}

impl<'a> StringList<'a> {
    /// Allocate an empty list
    pub fn new(api: &'a CefApi) -> BridgeResult<Self> {
        let raw = unsafe { (api.string_list_alloc)() };
        if raw.is_null() {
            return Err(BridgeError::CallFailed("cef_string_list_alloc"));
        }
        Ok(Self { api, raw })
    }

    /// Allocate a list holding `values`
    pub fn from_strings<S: AsRef<str>>(api: &'a CefApi, values: &[S]) -> BridgeResult<Self> {
        let list = Self::new(api)?;
        for value in values {
            list.push(value.as_ref());
        }
        Ok(list)
    }

    pub fn push(&self, value: &str) {
        let value = CefStringBuf::new(value);
        unsafe { (self.api.string_list_append)(self.raw, value.as_ptr()) }
    }

    pub fn len(&self) -> usize {
        unsafe { (self.api.string_list_size)(self.raw) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn as_raw(&self) -> cef_string_list_t {
        self.raw
    }

    /// Decode every entry
    pub fn to_vec(&self) -> BridgeResult<Vec<String>> {
        unsafe { read_list(self.api, self.raw) }
    }
}

impl Drop for StringList<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.string_list_free)(self.raw) }
    }
}

/// Decode a list the caller does not own
///
/// Each value copy is cleared whether or not it decodes.
///
/// # Safety
///
/// `raw` must be a live list.
pub unsafe fn read_list(api: &CefApi, raw: cef_string_list_t) -> BridgeResult<Vec<String>> {
    let size = (api.string_list_size)(raw);
    let mut values = Vec::with_capacity(size);
    for index in 0..size {
        let mut value = ScopedString::new(api);
        if (api.string_list_value)(raw, index, value.as_mut_ptr()) == 0 {
            return Err(BridgeError::CallFailed("cef_string_list_value"));
        }
        values.push(value.decode()?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{list_from, LeakCheck};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_order() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        {
            let list = StringList::from_strings(&api, &["b", "a", "b", ""]).unwrap();
            assert_eq!(list.len(), 4);
            assert_eq!(list.to_vec().unwrap(), vec!["b", "a", "b", ""]);
        }
        check.assert_clean();
    }

    #[test]
    fn test_empty_list() {
        let api = cef_testkit::api();
        let list = StringList::new(&api).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.to_vec().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_read_foreign_list() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        let raw = list_from(&["x", "y"]);
        unsafe {
            assert_eq!(read_list(&api, raw).unwrap(), vec!["x", "y"]);
            (api.string_list_free)(raw);
        }
        check.assert_clean();
    }
}
