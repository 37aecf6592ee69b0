//! Browsers, frames and navigation entries

use crate::fake::{base, string_slot, value_slot, Fake, FakeHandle};
use cef_sys::*;
use std::os::raw::c_int;

pub type FakeBrowser = FakeHandle<cef_browser_t, BrowserState>;
pub type FakeFrame = FakeHandle<cef_frame_t, FrameState>;
pub type FakeNavigationEntry = FakeHandle<cef_navigation_entry_t, NavigationEntryState>;

#[derive(Debug, Default)]
pub struct BrowserState {
    pub identifier: c_int,
    pub is_loading: bool,
}

value_slot!(browser_identifier, cef_browser_t, BrowserState, identifier, c_int);
value_slot!(browser_is_loading, cef_browser_t, BrowserState, is_loading, c_int);

impl FakeBrowser {
    pub fn new(state: BrowserState) -> Self {
        FakeHandle::from_parts(
            cef_browser_t {
                base: base::<cef_browser_t, BrowserState>(),
                get_identifier: browser_identifier,
                is_loading: browser_is_loading,
            },
            state,
        )
    }

    /// A browser with the given identifier
    pub fn with_id(identifier: c_int) -> Self {
        Self::new(BrowserState {
            identifier,
            is_loading: false,
        })
    }
}

#[derive(Debug, Default)]
pub struct FrameState {
    pub identifier: i64,
    pub is_main: bool,
    pub name: Option<String>,
    pub url: Option<String>,
}

value_slot!(frame_identifier, cef_frame_t, FrameState, identifier, i64);
value_slot!(frame_is_main, cef_frame_t, FrameState, is_main, c_int);
string_slot!(frame_name, cef_frame_t, FrameState, name);
string_slot!(frame_url, cef_frame_t, FrameState, url);

impl FakeFrame {
    pub fn new(state: FrameState) -> Self {
        FakeHandle::from_parts(
            cef_frame_t {
                base: base::<cef_frame_t, FrameState>(),
                get_identifier: frame_identifier,
                is_main: frame_is_main,
                get_name: frame_name,
                get_url: frame_url,
            },
            state,
        )
    }

    /// A main frame showing `url`
    pub fn main(url: &str) -> Self {
        Self::new(FrameState {
            identifier: 1,
            is_main: true,
            name: Some(String::new()),
            url: Some(url.to_string()),
        })
    }
}

#[derive(Debug, Default)]
pub struct NavigationEntryState {
    pub is_valid: bool,
    pub url: Option<String>,
    pub display_url: Option<String>,
    pub original_url: Option<String>,
    pub title: Option<String>,
    pub transition_type: cef_transition_type_t,
    pub has_post_data: bool,
    pub frame_name: Option<String>,
    pub completion_time: cef_time_t,
    pub http_status_code: c_int,
}

type Entry = cef_navigation_entry_t;
type EntryState = NavigationEntryState;

value_slot!(entry_is_valid, Entry, EntryState, is_valid, c_int);
string_slot!(entry_url, Entry, EntryState, url);
string_slot!(entry_display_url, Entry, EntryState, display_url);
string_slot!(entry_original_url, Entry, EntryState, original_url);
string_slot!(entry_title, Entry, EntryState, title);
value_slot!(entry_transition_type, Entry, EntryState, transition_type, cef_transition_type_t);
value_slot!(entry_has_post_data, Entry, EntryState, has_post_data, c_int);
string_slot!(entry_frame_name, Entry, EntryState, frame_name);
value_slot!(entry_http_status_code, Entry, EntryState, http_status_code, c_int);

unsafe extern "C" fn entry_completion_time(self_: *mut Entry) -> cef_time_t {
    let fake = Fake::<Entry, EntryState>::from_raw(self_);
    fake.record("completion_time");
    fake.state().completion_time
}

impl FakeNavigationEntry {
    pub fn new(state: NavigationEntryState) -> Self {
        FakeHandle::from_parts(
            cef_navigation_entry_t {
                base: base::<Entry, EntryState>(),
                is_valid: entry_is_valid,
                get_url: entry_url,
                get_display_url: entry_display_url,
                get_original_url: entry_original_url,
                get_title: entry_title,
                get_transition_type: entry_transition_type,
                has_post_data: entry_has_post_data,
                get_frame_name: entry_frame_name,
                get_completion_time: entry_completion_time,
                get_http_status_code: entry_http_status_code,
            },
            state,
        )
    }
}
