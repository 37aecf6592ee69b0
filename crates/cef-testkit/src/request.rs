//! Requests, post data, responses and the objects passed alongside them

use crate::collections::{fill_multimap, multimap_contents};
use crate::fake::{base, string_slot, value_slot, Fake, FakeHandle};
use crate::strings::read_string;
use cef_sys::*;
use std::os::raw::c_int;

pub type FakeRequest = FakeHandle<cef_request_t, RequestState>;
pub type FakePostData = FakeHandle<cef_post_data_t, PostDataState>;
pub type FakeResponse = FakeHandle<cef_response_t, ResponseState>;

#[derive(Debug, Default)]
pub struct RequestState {
    pub read_only: bool,
    pub url: Option<String>,
    pub method: Option<String>,
    pub post_data: Option<FakePostData>,
    pub headers: Vec<(String, String)>,
    pub flags: c_int,
    pub first_party_for_cookies: Option<String>,
    pub resource_type: cef_resource_type_t,
    pub transition_type: cef_transition_type_t,
    pub identifier: u64,
}

impl RequestState {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            method: Some("GET".to_string()),
            ..Default::default()
        }
    }
}

type Req = Fake<cef_request_t, RequestState>;

value_slot!(request_is_read_only, cef_request_t, RequestState, read_only, c_int);
string_slot!(request_get_url, cef_request_t, RequestState, url);
string_slot!(request_get_method, cef_request_t, RequestState, method);
value_slot!(request_get_flags, cef_request_t, RequestState, flags, c_int);
string_slot!(request_get_first_party, cef_request_t, RequestState, first_party_for_cookies);
value_slot!(request_get_resource_type, cef_request_t, RequestState, resource_type, cef_resource_type_t);
value_slot!(request_get_transition_type, cef_request_t, RequestState, transition_type, cef_transition_type_t);
value_slot!(request_get_identifier, cef_request_t, RequestState, identifier, u64);

unsafe extern "C" fn request_set_url(self_: *mut cef_request_t, url: *const cef_string_t) {
    let fake = Req::from_raw(self_);
    fake.record("set_url");
    fake.state().url = read_string(url);
}

unsafe extern "C" fn request_set_method(self_: *mut cef_request_t, method: *const cef_string_t) {
    let fake = Req::from_raw(self_);
    fake.record("set_method");
    fake.state().method = read_string(method);
}

unsafe extern "C" fn request_get_post_data(self_: *mut cef_request_t) -> *mut cef_post_data_t {
    let fake = Req::from_raw(self_);
    fake.record("post_data");
    let state = fake.state();
    state
        .post_data
        .as_ref()
        .map_or(std::ptr::null_mut(), |p| p.new_ref())
}

unsafe extern "C" fn request_set_post_data(
    self_: *mut cef_request_t,
    post_data: *mut cef_post_data_t,
) {
    let fake = Req::from_raw(self_);
    fake.record("set_post_data");
    fake.state().post_data = FakePostData::retain(post_data);
}

unsafe extern "C" fn request_get_header_map(
    self_: *mut cef_request_t,
    header_map: cef_string_multimap_t,
) {
    let fake = Req::from_raw(self_);
    fake.record("headers");
    let state = fake.state();
    fill_multimap(
        header_map,
        state.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    );
}

unsafe extern "C" fn request_set_header_map(
    self_: *mut cef_request_t,
    header_map: cef_string_multimap_t,
) {
    let fake = Req::from_raw(self_);
    fake.record("set_headers");
    fake.state().headers = multimap_contents(header_map);
}

unsafe extern "C" fn request_set(
    self_: *mut cef_request_t,
    url: *const cef_string_t,
    method: *const cef_string_t,
    post_data: *mut cef_post_data_t,
    header_map: cef_string_multimap_t,
) {
    let fake = Req::from_raw(self_);
    fake.record("set");
    let mut state = fake.state();
    state.url = read_string(url);
    state.method = read_string(method);
    state.post_data = FakePostData::retain(post_data);
    state.headers = multimap_contents(header_map);
}

unsafe extern "C" fn request_set_flags(self_: *mut cef_request_t, flags: c_int) {
    let fake = Req::from_raw(self_);
    fake.record("set_flags");
    fake.state().flags = flags;
}

unsafe extern "C" fn request_set_first_party(self_: *mut cef_request_t, url: *const cef_string_t) {
    let fake = Req::from_raw(self_);
    fake.record("set_first_party_for_cookies");
    fake.state().first_party_for_cookies = read_string(url);
}

impl FakeRequest {
    pub fn new(state: RequestState) -> Self {
        FakeHandle::from_parts(
            cef_request_t {
                base: base::<cef_request_t, RequestState>(),
                is_read_only: request_is_read_only,
                get_url: request_get_url,
                set_url: request_set_url,
                get_method: request_get_method,
                set_method: request_set_method,
                get_post_data: request_get_post_data,
                set_post_data: request_set_post_data,
                get_header_map: request_get_header_map,
                set_header_map: request_set_header_map,
                set: request_set,
                get_flags: request_get_flags,
                set_flags: request_set_flags,
                get_first_party_for_cookies: request_get_first_party,
                set_first_party_for_cookies: request_set_first_party,
                get_resource_type: request_get_resource_type,
                get_transition_type: request_get_transition_type,
                get_identifier: request_get_identifier,
            },
            state,
        )
    }
}

#[derive(Debug, Default)]
pub struct PostDataState {
    pub read_only: bool,
    pub element_count: usize,
}

value_slot!(post_data_is_read_only, cef_post_data_t, PostDataState, read_only, c_int);
value_slot!(post_data_element_count, cef_post_data_t, PostDataState, element_count, usize);

unsafe extern "C" fn post_data_remove_elements(self_: *mut cef_post_data_t) {
    let fake = Fake::<cef_post_data_t, PostDataState>::from_raw(self_);
    fake.record("remove_elements");
    fake.state().element_count = 0;
}

impl FakePostData {
    pub fn new(state: PostDataState) -> Self {
        FakeHandle::from_parts(
            cef_post_data_t {
                base: base::<cef_post_data_t, PostDataState>(),
                is_read_only: post_data_is_read_only,
                get_element_count: post_data_element_count,
                remove_elements: post_data_remove_elements,
            },
            state,
        )
    }
}

#[derive(Debug, Default)]
pub struct ResponseState {
    pub status: c_int,
    pub status_text: Option<String>,
    pub mime_type: Option<String>,
    pub headers: Vec<(String, String)>,
}

value_slot!(response_status, cef_response_t, ResponseState, status, c_int);
string_slot!(response_status_text, cef_response_t, ResponseState, status_text);
string_slot!(response_mime_type, cef_response_t, ResponseState, mime_type);

unsafe extern "C" fn response_header_map(
    self_: *mut cef_response_t,
    header_map: cef_string_multimap_t,
) {
    let fake = Fake::<cef_response_t, ResponseState>::from_raw(self_);
    fake.record("headers");
    let state = fake.state();
    fill_multimap(
        header_map,
        state.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    );
}

impl FakeResponse {
    pub fn new(state: ResponseState) -> Self {
        FakeHandle::from_parts(
            cef_response_t {
                base: base::<cef_response_t, ResponseState>(),
                get_status: response_status,
                get_status_text: response_status_text,
                get_mime_type: response_mime_type,
                get_header_map: response_header_map,
            },
            state,
        )
    }
}

pub type FakeSslInfo = FakeHandle<cef_sslinfo_t, SslInfoState>;
pub type FakeWebPluginInfo = FakeHandle<cef_web_plugin_info_t, WebPluginInfoState>;

#[derive(Debug, Default)]
pub struct SslInfoState {
    pub cert_status: c_int,
}

value_slot!(ssl_cert_status, cef_sslinfo_t, SslInfoState, cert_status, c_int);

impl FakeSslInfo {
    pub fn new(state: SslInfoState) -> Self {
        FakeHandle::from_parts(
            cef_sslinfo_t {
                base: base::<cef_sslinfo_t, SslInfoState>(),
                get_cert_status: ssl_cert_status,
            },
            state,
        )
    }
}

#[derive(Debug, Default)]
pub struct WebPluginInfoState {
    pub name: Option<String>,
    pub path: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

string_slot!(plugin_name, cef_web_plugin_info_t, WebPluginInfoState, name);
string_slot!(plugin_path, cef_web_plugin_info_t, WebPluginInfoState, path);
string_slot!(plugin_version, cef_web_plugin_info_t, WebPluginInfoState, version);
string_slot!(plugin_description, cef_web_plugin_info_t, WebPluginInfoState, description);

impl FakeWebPluginInfo {
    pub fn new(state: WebPluginInfoState) -> Self {
        FakeHandle::from_parts(
            cef_web_plugin_info_t {
                base: base::<cef_web_plugin_info_t, WebPluginInfoState>(),
                get_name: plugin_name,
                get_path: plugin_path,
                get_version: plugin_version,
                get_description: plugin_description,
            },
            state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::LeakCheck;
    use crate::strings::{string_userfree_utf16_free, TestString};

    #[test]
    fn test_request_slots_read_and_write_state() {
        let check = LeakCheck::new();
        let request = FakeRequest::new(RequestState::with_url("https://a.test/"));
        let raw = request.ptr();
        let new_url = TestString::new("https://b.test/");
        unsafe {
            ((*raw).set_url)(raw, new_url.as_ptr());
            let url = ((*raw).get_url)(raw);
            assert_eq!(read_string(url).as_deref(), Some("https://b.test/"));
            string_userfree_utf16_free(url);
        }
        assert_eq!(request.calls(), vec!["set_url", "url"]);
        drop(new_url);
        drop(request);
        check.assert_clean();
    }

    #[test]
    fn test_post_data_reference_held_by_request() {
        let post = FakePostData::new(PostDataState::default());
        let request = FakeRequest::new(RequestState::default());
        unsafe { ((*request.ptr()).set_post_data)(request.ptr(), post.ptr()) };
        assert_eq!(post.refs(), 2);
        drop(request);
        assert_eq!(post.refs(), 1);
    }
}
