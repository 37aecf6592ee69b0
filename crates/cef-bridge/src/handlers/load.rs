use super::table::{HandlerState, RefCountedTable};
use super::{decoded, guard, optional, required, resolve};
use crate::marshaller::{table_key, Marshaller};
use crate::proxies::{Browser, Frame};
use crate::string::{decode, decode_url};
use crate::types::ErrorCode;
use cef_sys::{
    cef_browser_t, cef_errorcode_t, cef_frame_t, cef_load_handler_t, cef_string_t, CefApi,
};
use std::os::raw::c_int;
use std::sync::Arc;
use url::Url;

/// Page load progress notifications
///
/// Called on the library's UI thread, or the render thread for
/// off-screen rendering.
pub trait LoadHandler: Send + Sync {
    /// Loading started or stopped, or navigation state changed
    fn on_loading_state_change(
        &self,
        _browser: &Browser,
        _is_loading: bool,
        _can_go_back: bool,
        _can_go_forward: bool,
    ) {
    }

    /// A frame began loading; it may still be redirected or fail
    fn on_load_start(&self, _browser: &Browser, _frame: &Frame) {}

    /// A frame finished loading, possibly with an error status
    fn on_load_end(&self, _browser: &Browser, _frame: &Frame, _http_status_code: i32) {}

    /// Navigation failed or was cancelled
    fn on_load_error(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _error_code: ErrorCode,
        _error_text: &str,
        _failed_url: &Url,
    ) {
    }
}

type Table = RefCountedTable<cef_load_handler_t, HandlerState<dyn LoadHandler>>;

/// Allocate a table for `host` and register it
pub(crate) fn new_load_handler(
    registry: &Arc<Marshaller<dyn LoadHandler>>,
    api: &Arc<CefApi>,
    host: Arc<dyn LoadHandler>,
) -> *mut cef_load_handler_t {
    let raw = cef_load_handler_t {
        base: Table::base(),
        on_loading_state_change,
        on_load_start,
        on_load_end,
        on_load_error,
    };
    let table = Table::allocate(raw, HandlerState::new(registry, api));
    registry.register(table_key(table), host);
    table
}

unsafe fn host<'a>(
    table: *mut cef_load_handler_t,
    slot: &'static str,
) -> Option<(Arc<dyn LoadHandler>, &'a Arc<CefApi>)> {
    resolve::<_, dyn LoadHandler>(table, slot)
}

unsafe extern "C" fn on_loading_state_change(
    self_: *mut cef_load_handler_t,
    browser: *mut cef_browser_t,
    is_loading: c_int,
    can_go_back: c_int,
    can_go_forward: c_int,
) {
    const SLOT: &str = "on_loading_state_change";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(browser) = required(SLOT, "browser", Browser::wrap(api, browser)) else {
        return;
    };
    guard(SLOT, (), || {
        host.on_loading_state_change(
            &browser,
            is_loading != 0,
            can_go_back != 0,
            can_go_forward != 0,
        )
    });
}

unsafe extern "C" fn on_load_start(
    self_: *mut cef_load_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
) {
    const SLOT: &str = "on_load_start";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let (Some(browser), Some(frame)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "frame", Frame::wrap(api, frame)),
    ) else {
        return;
    };
    guard(SLOT, (), || host.on_load_start(&browser, &frame));
}

unsafe extern "C" fn on_load_end(
    self_: *mut cef_load_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    http_status_code: c_int,
) {
    const SLOT: &str = "on_load_end";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let (Some(browser), Some(frame)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "frame", Frame::wrap(api, frame)),
    ) else {
        return;
    };
    guard(SLOT, (), || host.on_load_end(&browser, &frame, http_status_code));
}

unsafe extern "C" fn on_load_error(
    self_: *mut cef_load_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    error_code: cef_errorcode_t,
    error_text: *const cef_string_t,
    failed_url: *const cef_string_t,
) {
    const SLOT: &str = "on_load_error";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let (Some(browser), Some(frame)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "frame", Frame::wrap(api, frame)),
    ) else {
        return;
    };
    // The library may omit the text but never the URL
    let Some(error_text) = optional(SLOT, "error_text", decode(error_text)) else {
        return;
    };
    let Some(failed_url) = decoded(SLOT, "failed_url", decode_url(failed_url)) else {
        return;
    };
    guard(SLOT, (), || {
        host.on_load_error(
            &browser,
            &frame,
            ErrorCode::from_raw(error_code),
            error_text.as_deref().unwrap_or_default(),
            &failed_url,
        )
    });
}
