use crate::error::BridgeResult;
use crate::proxy::proxy_type;
use crate::time::from_cef_time;
use crate::types::TransitionType;
use cef_sys::cef_navigation_entry_t;
use chrono::{DateTime, Utc};
use url::Url;

proxy_type!(
    /// One entry of a browser's session history
    NavigationEntry,
    cef_navigation_entry_t
);

impl NavigationEntry {
    /// Whether the entry still refers to a history item
    pub fn is_valid(&self) -> bool {
        self.0.flag(self.0.table().is_valid)
    }

    /// Actual URL of the page; data URLs may be truncated by the library
    pub fn url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_url)
    }

    pub fn display_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_display_url)
    }

    /// URL before any redirects
    pub fn original_url(&self) -> BridgeResult<Option<Url>> {
        self.0.url(self.0.table().get_original_url)
    }

    pub fn title(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_title)
    }

    pub fn transition_type(&self) -> TransitionType {
        TransitionType::from_raw(self.0.value(self.0.table().get_transition_type))
    }

    pub fn has_post_data(&self) -> bool {
        self.0.flag(self.0.table().has_post_data)
    }

    pub fn frame_name(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_frame_name)
    }

    /// When the navigation finished; `None` while it is in progress
    pub fn completion_time(&self) -> BridgeResult<Option<DateTime<Utc>>> {
        from_cef_time(&self.0.value(self.0.table().get_completion_time))
    }

    /// 0 when no response has been received
    pub fn http_status_code(&self) -> i32 {
        self.0.value(self.0.table().get_http_status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransitionQualifiers, TransitionSource};
    use cef_sys::{cef_time_t, TT_CLIENT_REDIRECT_FLAG, TT_LINK};
    use cef_testkit::{FakeNavigationEntry, LeakCheck, NavigationEntryState};
    use pretty_assertions::assert_eq;

    fn entry(state: NavigationEntryState) -> (FakeNavigationEntry, NavigationEntry) {
        let fake = FakeNavigationEntry::new(state);
        let entry = unsafe { NavigationEntry::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        (fake, entry)
    }

    #[test]
    fn test_title_reads_title_slot() {
        let (fake, entry) = entry(NavigationEntryState {
            title: Some("Example".to_string()),
            url: Some("https://example.com/".to_string()),
            ..Default::default()
        });
        assert_eq!(entry.title().unwrap().as_deref(), Some("Example"));
        assert_eq!(fake.calls(), vec!["title"]);
    }

    #[test]
    fn test_urls_and_status() {
        let check = LeakCheck::new();
        {
            let (_fake, entry) = entry(NavigationEntryState {
                is_valid: true,
                url: Some("https://example.com/final".to_string()),
                display_url: Some("https://example.com/final".to_string()),
                original_url: Some("http://example.com/".to_string()),
                transition_type: TT_LINK | TT_CLIENT_REDIRECT_FLAG,
                http_status_code: 200,
                ..Default::default()
            });
            assert!(entry.is_valid());
            assert_eq!(entry.original_url().unwrap().unwrap().as_str(), "http://example.com/");
            assert_eq!(entry.display_url().unwrap(), entry.url().unwrap());
            let transition = entry.transition_type();
            assert_eq!(transition.source, TransitionSource::Link);
            assert_eq!(transition.qualifiers, TransitionQualifiers::CLIENT_REDIRECT);
            assert_eq!(entry.http_status_code(), 200);
            assert!(!entry.has_post_data());
            assert_eq!(entry.frame_name().unwrap(), None);
        }
        check.assert_clean();
    }

    #[test]
    fn test_completion_time() {
        let (fake, entry) = entry(NavigationEntryState::default());
        assert_eq!(entry.completion_time().unwrap(), None);

        fake.state().completion_time = cef_time_t {
            year: 2023,
            month: 11,
            day_of_week: 3,
            day_of_month: 1,
            hour: 8,
            minute: 0,
            second: 0,
            millisecond: 0,
        };
        let time = entry.completion_time().unwrap().unwrap();
        assert_eq!(time.to_rfc3339(), "2023-11-01T08:00:00+00:00");
    }
}
