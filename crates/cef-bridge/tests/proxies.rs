//! Proxy ownership and the accessor surface over fake library objects

use cef_bridge::{Browser, HeaderMap, PostData, Request, ResourceType, UrlRequestFlags};
use cef_sys::{RT_SCRIPT, UR_FLAG_SKIP_CACHE};
use cef_testkit::{
    FakeBrowser, FakePostData, FakeRequest, LeakCheck, PostDataState, RequestState,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use url::Url;

#[test]
fn test_wraps_are_independent() {
    let api = cef_testkit::api();
    let fake = FakeBrowser::with_id(5);

    let first = unsafe { Browser::wrap(&api, fake.ptr()) }.unwrap();
    let second = unsafe { Browser::wrap(&api, fake.ptr()) }.unwrap();
    assert_eq!(fake.refs(), 3);
    assert!(first.is_same(&second));

    drop(first);
    assert_eq!(fake.refs(), 2);
    assert_eq!(second.identifier(), 5);

    drop(second);
    assert_eq!(fake.refs(), 1);
}

#[test]
fn test_wrap_null_is_absent() {
    let api = cef_testkit::api();
    assert!(unsafe { Browser::wrap(&api, std::ptr::null_mut()) }.is_none());
    assert!(unsafe { Request::from_owned(&api, std::ptr::null_mut()) }.is_none());
}

#[test]
fn test_proxy_moves_across_threads() {
    let api = cef_testkit::api();
    let fake = FakeBrowser::with_id(11);
    let browser = unsafe { Browser::wrap(&api, fake.ptr()) }.unwrap();

    let id = std::thread::spawn(move || browser.identifier()).join().unwrap();
    assert_eq!(id, 11);
    assert_eq!(fake.refs(), 1);
}

#[test]
fn test_created_request_is_released() {
    let check = LeakCheck::new();
    {
        let api = cef_testkit::api();
        let request = Request::create(&api).unwrap();
        assert!(request.has_one_ref());
        let url = Url::parse("https://example.com/api").unwrap();
        request.set_url(&url);
        request.set_method("POST");
        request.set_flags(UrlRequestFlags::from_bits_retain(UR_FLAG_SKIP_CACHE));
        assert_eq!(request.url().unwrap(), Some(url));
        assert_eq!(request.method().unwrap().as_deref(), Some("POST"));
        assert!(request.flags().contains(UrlRequestFlags::SKIP_CACHE));
        assert_eq!(request.identifier(), None);
    }
    check.assert_clean();
}

#[test]
fn test_request_bulk_set() {
    let api = cef_testkit::api();
    let fake = FakeRequest::new(RequestState::default());
    let body = FakePostData::new(PostDataState::default());
    let request = unsafe { Request::wrap(&api, fake.ptr()) }.unwrap();
    let post_data = unsafe { PostData::wrap(&api, body.ptr()) }.unwrap();

    let headers: HeaderMap = [("Content-Type", "application/json")].into_iter().collect();
    let url = Url::parse("https://example.com/submit").unwrap();
    request.set(&url, "POST", Some(&post_data), &headers).unwrap();

    let state = fake.state();
    assert_eq!(state.url.as_deref(), Some("https://example.com/submit"));
    assert_eq!(state.method.as_deref(), Some("POST"));
    assert!(state.post_data.is_some());
    assert_eq!(
        state.headers,
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );
}

#[test]
fn test_request_headers_snapshot() {
    let api = cef_testkit::api();
    let fake = FakeRequest::new(RequestState {
        headers: vec![
            ("Accept".to_string(), "text/html".to_string()),
            ("Cookie".to_string(), "a=1".to_string()),
            ("Accept".to_string(), "*/*".to_string()),
        ],
        resource_type: RT_SCRIPT,
        ..RequestState::with_url("https://example.com/")
    });
    let request = unsafe { Request::wrap(&api, fake.ptr()) }.unwrap();

    assert_eq!(request.resource_type(), ResourceType::Script);
    insta::assert_debug_snapshot!(request.headers().unwrap(), @r###"
    HeaderMap {
        entries: [
            (
                "Accept",
                [
                    "text/html",
                    "*/*",
                ],
            ),
            (
                "Cookie",
                [
                    "a=1",
                ],
            ),
        ],
    }
    "###);
}

#[test]
fn test_api_shared_by_proxies() {
    let api = cef_testkit::api();
    let fake = FakeBrowser::with_id(1);
    let browser = unsafe { Browser::wrap(&api, fake.ptr()) }.unwrap();
    let clone = browser.clone();
    assert_eq!(Arc::strong_count(&api), 3);
    assert_eq!(fake.refs(), 3);
    drop((browser, clone));
    assert_eq!(Arc::strong_count(&api), 1);
}
