use crate::error::BridgeResult;
use crate::proxy::proxy_type;
use cef_sys::{cef_browser_t, cef_frame_t};
use url::Url;

proxy_type!(
    /// A browser window or tab
    Browser,
    cef_browser_t
);

proxy_type!(
    /// A frame inside a browser
    Frame,
    cef_frame_t
);

impl Browser {
    /// Identifier, unique within the process
    pub fn identifier(&self) -> i32 {
        self.0.value(self.0.table().get_identifier)
    }

    pub fn is_loading(&self) -> bool {
        self.0.flag(self.0.table().is_loading)
    }
}

impl Frame {
    /// Identifier; negative before the frame is attached
    pub fn identifier(&self) -> i64 {
        self.0.value(self.0.table().get_identifier)
    }

    pub fn is_main(&self) -> bool {
        self.0.flag(self.0.table().is_main)
    }

    /// Name; empty for the main frame and for unnamed children
    pub fn name(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_name)
    }

    pub fn url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{FakeBrowser, FakeFrame, FrameState};

    #[test]
    fn test_browser_accessors() {
        let fake = FakeBrowser::with_id(7);
        fake.state().is_loading = true;
        let browser = unsafe { Browser::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert_eq!(browser.identifier(), 7);
        assert!(browser.is_loading());
        assert_eq!(fake.calls(), vec!["identifier", "is_loading"]);
    }

    #[test]
    fn test_frame_accessors() {
        let fake = FakeFrame::main("https://example.com/");
        let frame = unsafe { Frame::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert!(frame.is_main());
        assert_eq!(frame.identifier(), 1);
        assert_eq!(frame.name().unwrap().as_deref(), Some(""));
        assert_eq!(frame.url().unwrap().unwrap().as_str(), "https://example.com/");
    }

    #[test]
    fn test_frame_without_url() {
        let fake = FakeFrame::new(FrameState::default());
        let frame = unsafe { Frame::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert_eq!(frame.url().unwrap(), None);
        assert_eq!(frame.name().unwrap(), None);
    }

    #[test]
    fn test_is_same() {
        let api = cef_testkit::api();
        let one = FakeBrowser::with_id(1);
        let two = FakeBrowser::with_id(2);
        let a = unsafe { Browser::wrap(&api, one.ptr()) }.unwrap();
        let b = unsafe { Browser::wrap(&api, one.ptr()) }.unwrap();
        let c = unsafe { Browser::wrap(&api, two.ptr()) }.unwrap();
        assert!(a.is_same(&b));
        assert!(!a.is_same(&c));
    }
}
