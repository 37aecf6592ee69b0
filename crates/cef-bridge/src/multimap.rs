//! Multimap marshalling for HTTP headers
//!
//! The library stores headers as a flat list of key/value pairs where keys
//! may repeat. [`HeaderMap`] groups them by key, keeping keys in the order
//! they first appear and values in the order they were added. Keys compare
//! exactly; no case folding happens on either side.

use crate::error::{BridgeError, BridgeResult};
use crate::string::{CefStringBuf, ScopedString};
use cef_sys::{cef_string_multimap_t, CefApi};

/// Ordered header multimap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `key`, after any existing values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace every value under `key`, keeping its position
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((key, values)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// First value under `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keys with their value lists, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Flattened key/value pairs in storage order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(k, values)| {
            values.iter().map(move |v| (k.as_str(), v.as_str()))
        })
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.append(k, v);
        }
        map
    }
}

/// A library-allocated multimap, freed on drop
pub struct StringMultimap<'a> {
    api: &'a CefApi,
    raw: cef_string_multimap_t,
}

impl<'a> StringMultimap<'a> {
    pub fn new(api: &'a CefApi) -> BridgeResult<Self> {
        let raw = unsafe { (api.string_multimap_alloc)() };
        if raw.is_null() {
            return Err(BridgeError::CallFailed("cef_string_multimap_alloc"));
        }
        Ok(Self { api, raw })
    }

    /// Allocate a multimap holding every pair of `headers`
    pub fn from_headers(api: &'a CefApi, headers: &HeaderMap) -> BridgeResult<Self> {
        let map = Self::new(api)?;
        for (key, value) in headers.pairs() {
            map.append(key, value)?;
        }
        Ok(map)
    }

    pub fn append(&self, key: &str, value: &str) -> BridgeResult<()> {
        let key = CefStringBuf::new(key);
        let value = CefStringBuf::new(value);
        let ok = unsafe { (self.api.string_multimap_append)(self.raw, key.as_ptr(), value.as_ptr()) };
        if ok == 0 {
            return Err(BridgeError::CallFailed("cef_string_multimap_append"));
        }
        Ok(())
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        unsafe { (self.api.string_multimap_size)(self.raw) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn as_raw(&self) -> cef_string_multimap_t {
        self.raw
    }

    pub fn to_headers(&self) -> BridgeResult<HeaderMap> {
        unsafe { read_multimap(self.api, self.raw) }
    }
}

impl Drop for StringMultimap<'_> {
    fn drop(&mut self) {
        unsafe { (self.api.string_multimap_free)(self.raw) }
    }
}

/// Decode a multimap the caller does not own
///
/// # Safety
///
/// `raw` must be a live multimap.
pub unsafe fn read_multimap(api: &CefApi, raw: cef_string_multimap_t) -> BridgeResult<HeaderMap> {
    let size = (api.string_multimap_size)(raw);
    let mut headers = HeaderMap::new();
    for index in 0..size {
        let mut key = ScopedString::new(api);
        let mut value = ScopedString::new(api);
        if (api.string_multimap_key)(raw, index, key.as_mut_ptr()) == 0 {
            return Err(BridgeError::CallFailed("cef_string_multimap_key"));
        }
        if (api.string_multimap_value)(raw, index, value.as_mut_ptr()) == 0 {
            return Err(BridgeError::CallFailed("cef_string_multimap_value"));
        }
        headers.append(key.decode()?, value.decode()?);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{multimap_contents, multimap_from, LeakCheck};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_groups_by_first_appearance() {
        let headers: HeaderMap = [("A", "1"), ("B", "x"), ("A", "2")].into_iter().collect();
        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(headers.get("A").unwrap(), &["1", "2"]);
        assert_eq!(headers.first("B"), Some("x"));
        assert_eq!(headers.get("a"), None);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut headers: HeaderMap = [("A", "1"), ("B", "2")].into_iter().collect();
        headers.insert("A", vec!["3".to_string()]);
        assert_eq!(
            headers.pairs().collect::<Vec<_>>(),
            vec![("A", "3"), ("B", "2")]
        );
        assert_eq!(headers.remove("A"), Some(vec!["3".to_string()]));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_encode_flattens_pairs() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        {
            let headers: HeaderMap = [("A", "1"), ("B", "x"), ("A", "2")].into_iter().collect();
            let map = StringMultimap::from_headers(&api, &headers).unwrap();
            assert_eq!(map.len(), 3);
            let pairs = unsafe { multimap_contents(map.as_raw()) };
            assert_eq!(
                pairs,
                vec![
                    ("A".to_string(), "1".to_string()),
                    ("A".to_string(), "2".to_string()),
                    ("B".to_string(), "x".to_string()),
                ]
            );
        }
        check.assert_clean();
    }

    #[test]
    fn test_decode_interleaved_keys() {
        let api = cef_testkit::api();
        let check = LeakCheck::new();
        let raw = multimap_from(&[("Set-Cookie", "a=1"), ("Host", "h"), ("Set-Cookie", "b=2")]);
        let headers = unsafe { read_multimap(&api, raw) }.unwrap();
        unsafe { (api.string_multimap_free)(raw) };

        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["Set-Cookie", "Host"]);
        assert_eq!(headers.get("Set-Cookie").unwrap(), &["a=1", "b=2"]);
        check.assert_clean();
    }

    #[test]
    fn test_empty_round_trip() {
        let api = cef_testkit::api();
        let map = StringMultimap::from_headers(&api, &HeaderMap::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.to_headers().unwrap(), HeaderMap::new());
    }
}
