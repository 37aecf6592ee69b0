use crate::error::{BridgeError, BridgeResult};
use crate::multimap::{HeaderMap, StringMultimap};
use crate::proxy::proxy_type;
use crate::string::{opt_ptr, CefStringBuf};
use crate::types::{ResourceType, TransitionType, UrlRequestFlags};
use cef_sys::{cef_post_data_t, cef_request_t, CefApi};
use std::sync::Arc;
use url::Url;

proxy_type!(
    /// An HTTP request the library is about to send or has sent
    Request,
    cef_request_t
);

proxy_type!(
    /// Upload body attached to a request
    PostData,
    cef_post_data_t
);

impl Request {
    /// Allocate an empty, writable request
    pub fn create(api: &Arc<CefApi>) -> BridgeResult<Self> {
        let raw = unsafe { (api.request_create)() };
        unsafe { Self::from_owned(api, raw) }
            .ok_or(BridgeError::CallFailed("cef_request_create"))
    }

    pub fn is_read_only(&self) -> bool {
        self.0.flag(self.0.table().is_read_only)
    }

    pub fn url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_url)
    }

    pub fn set_url(&self, url: &Url) {
        let url = CefStringBuf::new(url.as_str());
        unsafe { (self.0.table().set_url)(self.0.as_raw(), url.as_ptr()) }
    }

    pub fn method(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_method)
    }

    pub fn set_method(&self, method: &str) {
        let method = CefStringBuf::new(method);
        unsafe { (self.0.table().set_method)(self.0.as_raw(), method.as_ptr()) }
    }

    pub fn post_data(&self) -> Option<PostData> {
        self.0.object(self.0.table().get_post_data).map(PostData)
    }

    /// Attach `post_data`, or detach the body with `None`
    pub fn set_post_data(&self, post_data: Option<&PostData>) {
        let raw = post_data.map_or(std::ptr::null_mut(), |p| p.0.as_raw());
        unsafe { (self.0.table().set_post_data)(self.0.as_raw(), raw) }
    }

    pub fn headers(&self) -> BridgeResult<HeaderMap> {
        let map = StringMultimap::new(self.0.api())?;
        unsafe { (self.0.table().get_header_map)(self.0.as_raw(), map.as_raw()) };
        map.to_headers()
    }

    pub fn set_headers(&self, headers: &HeaderMap) -> BridgeResult<()> {
        let map = StringMultimap::from_headers(self.0.api(), headers)?;
        unsafe { (self.0.table().set_header_map)(self.0.as_raw(), map.as_raw()) };
        Ok(())
    }

    /// Replace url, method, body and headers in a single library call
    pub fn set(
        &self,
        url: &Url,
        method: &str,
        post_data: Option<&PostData>,
        headers: &HeaderMap,
    ) -> BridgeResult<()> {
        let url = CefStringBuf::new(url.as_str());
        let method = CefStringBuf::new(method);
        let post_data = post_data.map_or(std::ptr::null_mut(), |p| p.0.as_raw());
        let map = StringMultimap::from_headers(self.0.api(), headers)?;
        unsafe {
            (self.0.table().set)(
                self.0.as_raw(),
                url.as_ptr(),
                method.as_ptr(),
                post_data,
                map.as_raw(),
            )
        };
        Ok(())
    }

    pub fn flags(&self) -> UrlRequestFlags {
        UrlRequestFlags::from_bits_retain(self.0.value(self.0.table().get_flags))
    }

    pub fn set_flags(&self, flags: UrlRequestFlags) {
        unsafe { (self.0.table().set_flags)(self.0.as_raw(), flags.bits()) }
    }

    pub fn first_party_for_cookies(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_first_party_for_cookies)
    }

    /// `None` clears the value
    pub fn set_first_party_for_cookies(&self, url: Option<&Url>) {
        let url = url.map(|u| CefStringBuf::new(u.as_str()));
        unsafe {
            (self.0.table().set_first_party_for_cookies)(self.0.as_raw(), opt_ptr(url.as_ref()))
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        ResourceType::from_raw(self.0.value(self.0.table().get_resource_type))
    }

    pub fn transition_type(&self) -> TransitionType {
        TransitionType::from_raw(self.0.value(self.0.table().get_transition_type))
    }

    /// Globally unique identifier, `None` until the library assigns one
    pub fn identifier(&self) -> Option<u64> {
        match self.0.value(self.0.table().get_identifier) {
            0 => None,
            id => Some(id),
        }
    }
}

impl PostData {
    pub fn is_read_only(&self) -> bool {
        self.0.flag(self.0.table().is_read_only)
    }

    pub fn element_count(&self) -> usize {
        self.0.value(self.0.table().get_element_count)
    }

    pub fn remove_elements(&self) {
        unsafe { (self.0.table().remove_elements)(self.0.as_raw()) }
    }
}
