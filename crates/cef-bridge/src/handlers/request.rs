use super::table::{HandlerState, RefCountedTable};
use super::{decoded, guard, optional, required, resolve};
use crate::marshaller::{table_key, Marshaller};
use crate::proxies::{
    AuthCallback, Browser, Frame, Request, RequestCallback, ResourceHandler, Response, SslInfo,
    WebPluginInfo,
};
use crate::string::{decode, decode_url, parse_url, write_string};
use crate::types::{ErrorCode, ReturnValue, TerminationStatus, WindowOpenDisposition};
use cef_sys::*;
use std::os::raw::c_int;
use std::sync::Arc;
use tracing::error;
use url::Url;

/// An authentication challenge from a server or proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    pub is_proxy: bool,
    pub host: String,
    pub port: u16,
    pub realm: Option<String>,
    pub scheme: Option<String>,
}

/// Browser request hooks
///
/// Boolean results follow the library: `true` cancels or takes over,
/// `false` (the default) lets the library proceed normally.
pub trait RequestHandler: Send + Sync {
    /// Before a navigation; return `true` to cancel it
    fn on_before_browse(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _request: &Request,
        _is_redirect: bool,
    ) -> bool {
        false
    }

    /// A navigation targets a new tab or window; return `true` to cancel it
    fn on_open_url_from_tab(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _target_url: &Url,
        _disposition: WindowOpenDisposition,
        _user_gesture: bool,
    ) -> bool {
        false
    }

    /// Before a resource load; the request may be modified here
    fn on_before_resource_load(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _request: &Request,
        _callback: RequestCallback,
    ) -> ReturnValue {
        ReturnValue::Continue
    }

    /// A custom source for the resource, or `None` for the network
    fn resource_handler(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _request: &Request,
    ) -> Option<ResourceHandler> {
        None
    }

    /// A resource is being redirected; `new_url` may be changed
    fn on_resource_redirect(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _request: &Request,
        _new_url: &mut Url,
    ) {
    }

    /// Response headers arrived; return `true` to restart the request
    /// after modifying it
    fn on_resource_response(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _request: &Request,
        _response: &Response,
    ) -> bool {
        false
    }

    /// Credentials are needed; return `true` and complete `callback` to
    /// supply them
    fn on_auth_credentials_required(
        &self,
        _browser: &Browser,
        _frame: &Frame,
        _challenge: &AuthChallenge,
        _callback: AuthCallback,
    ) -> bool {
        false
    }

    /// A page asks for more storage; return `true` and complete `callback`
    /// to answer
    fn on_quota_request(
        &self,
        _browser: &Browser,
        _origin_url: &Url,
        _new_size: i64,
        _callback: RequestCallback,
    ) -> bool {
        false
    }

    /// No internal handler exists for the URL's scheme; set
    /// `allow_os_execution` to hand it to the operating system
    fn on_protocol_execution(
        &self,
        _browser: &Browser,
        _url: &Url,
        _allow_os_execution: &mut bool,
    ) {
    }

    /// Return `true` and complete `callback` to decide asynchronously;
    /// `false` cancels the request
    fn on_certificate_error(
        &self,
        _browser: &Browser,
        _cert_error: ErrorCode,
        _request_url: &Url,
        _ssl_info: &SslInfo,
        _callback: RequestCallback,
    ) -> bool {
        false
    }

    /// Before a plugin instance loads; return `true` to block it
    fn on_before_plugin_load(
        &self,
        _browser: &Browser,
        _url: Option<&Url>,
        _policy_url: Option<&Url>,
        _info: &WebPluginInfo,
    ) -> bool {
        false
    }

    fn on_plugin_crashed(&self, _browser: &Browser, _plugin_path: &str) {}

    fn on_render_view_ready(&self, _browser: &Browser) {}

    fn on_render_process_terminated(&self, _browser: &Browser, _status: TerminationStatus) {}
}

type Table = RefCountedTable<cef_request_handler_t, HandlerState<dyn RequestHandler>>;

/// Allocate a table for `host` and register it
pub(crate) fn new_request_handler(
    registry: &Arc<Marshaller<dyn RequestHandler>>,
    api: &Arc<CefApi>,
    host: Arc<dyn RequestHandler>,
) -> *mut cef_request_handler_t {
    let raw = cef_request_handler_t {
        base: Table::base(),
        on_before_browse,
        on_open_urlfrom_tab,
        on_before_resource_load,
        get_resource_handler,
        on_resource_redirect,
        on_resource_response,
        get_auth_credentials,
        on_quota_request,
        on_protocol_execution,
        on_certificate_error,
        on_before_plugin_load,
        on_plugin_crashed,
        on_render_view_ready,
        on_render_process_terminated,
    };
    let table = Table::allocate(raw, HandlerState::new(registry, api));
    registry.register(table_key(table), host);
    table
}

unsafe fn host<'a>(
    table: *mut cef_request_handler_t,
    slot: &'static str,
) -> Option<(Arc<dyn RequestHandler>, &'a Arc<CefApi>)> {
    resolve::<_, dyn RequestHandler>(table, slot)
}

/// Browser, frame and request, all required
unsafe fn browse_args(
    api: &Arc<CefApi>,
    slot: &'static str,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
) -> Option<(Browser, Frame, Request)> {
    let browser = required(slot, "browser", Browser::wrap(api, browser))?;
    let frame = required(slot, "frame", Frame::wrap(api, frame))?;
    let request = required(slot, "request", Request::wrap(api, request))?;
    Some((browser, frame, request))
}

unsafe extern "C" fn on_before_browse(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
    is_redirect: c_int,
) -> c_int {
    const SLOT: &str = "on_before_browse";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let Some((browser, frame, request)) = browse_args(api, SLOT, browser, frame, request) else {
        return 0;
    };
    let cancel = guard(SLOT, false, || {
        host.on_before_browse(&browser, &frame, &request, is_redirect != 0)
    });
    c_int::from(cancel)
}

unsafe extern "C" fn on_open_urlfrom_tab(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    target_url: *const cef_string_t,
    target_disposition: cef_window_open_disposition_t,
    user_gesture: c_int,
) -> c_int {
    const SLOT: &str = "on_open_url_from_tab";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let (Some(browser), Some(frame)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "frame", Frame::wrap(api, frame)),
    ) else {
        return 0;
    };
    let Some(target_url) = decoded(SLOT, "target_url", decode_url(target_url)) else {
        return 0;
    };
    let cancel = guard(SLOT, false, || {
        host.on_open_url_from_tab(
            &browser,
            &frame,
            &target_url,
            WindowOpenDisposition::from_raw(target_disposition),
            user_gesture != 0,
        )
    });
    c_int::from(cancel)
}

unsafe extern "C" fn on_before_resource_load(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
    callback: *mut cef_request_callback_t,
) -> cef_return_value_t {
    const SLOT: &str = "on_before_resource_load";
    let Some((host, api)) = host(self_, SLOT) else {
        return RV_CONTINUE;
    };
    let Some((browser, frame, request)) = browse_args(api, SLOT, browser, frame, request) else {
        return RV_CONTINUE;
    };
    let Some(callback) = required(SLOT, "callback", RequestCallback::wrap(api, callback)) else {
        return RV_CONTINUE;
    };
    guard(SLOT, ReturnValue::Continue, || {
        host.on_before_resource_load(&browser, &frame, &request, callback)
    })
    .to_raw()
}

unsafe extern "C" fn get_resource_handler(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
) -> *mut cef_resource_handler_t {
    const SLOT: &str = "get_resource_handler";
    let Some((host, api)) = host(self_, SLOT) else {
        return std::ptr::null_mut();
    };
    let Some((browser, frame, request)) = browse_args(api, SLOT, browser, frame, request) else {
        return std::ptr::null_mut();
    };
    guard(SLOT, None, || host.resource_handler(&browser, &frame, &request))
        .map_or(std::ptr::null_mut(), ResourceHandler::into_raw)
}

unsafe extern "C" fn on_resource_redirect(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
    new_url: *mut cef_string_t,
) {
    const SLOT: &str = "on_resource_redirect";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some((browser, frame, request)) = browse_args(api, SLOT, browser, frame, request) else {
        return;
    };
    let Some(original) = decoded(SLOT, "new_url", decode(new_url)) else {
        return;
    };
    let Some(mut redirect) = decoded(SLOT, "new_url", parse_url(Some(original.clone()))) else {
        return;
    };
    guard(SLOT, (), || {
        host.on_resource_redirect(&browser, &frame, &request, &mut redirect)
    });
    // Compared against the library's own spelling, not the parsed form
    if redirect.as_str() != original && !write_string(api, new_url, redirect.as_str()) {
        error!(slot = SLOT, "failed to write back the redirect URL");
    }
}

unsafe extern "C" fn on_resource_response(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    request: *mut cef_request_t,
    response: *mut cef_response_t,
) -> c_int {
    const SLOT: &str = "on_resource_response";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let Some((browser, frame, request)) = browse_args(api, SLOT, browser, frame, request) else {
        return 0;
    };
    let Some(response) = required(SLOT, "response", Response::wrap(api, response)) else {
        return 0;
    };
    let restart = guard(SLOT, false, || {
        host.on_resource_response(&browser, &frame, &request, &response)
    });
    c_int::from(restart)
}

#[allow(clippy::too_many_arguments)]
unsafe extern "C" fn get_auth_credentials(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
    is_proxy: c_int,
    host_name: *const cef_string_t,
    port: c_int,
    realm: *const cef_string_t,
    scheme: *const cef_string_t,
    callback: *mut cef_auth_callback_t,
) -> c_int {
    const SLOT: &str = "on_auth_credentials_required";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let (Some(browser), Some(frame)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "frame", Frame::wrap(api, frame)),
    ) else {
        return 0;
    };
    let Some(callback) = required(SLOT, "callback", AuthCallback::wrap(api, callback)) else {
        return 0;
    };
    let Some(host_name) = decoded(SLOT, "host", decode(host_name)) else {
        return 0;
    };
    let (Some(realm), Some(scheme)) = (
        optional(SLOT, "realm", decode(realm)),
        optional(SLOT, "scheme", decode(scheme)),
    ) else {
        return 0;
    };
    let Ok(port) = u16::try_from(port) else {
        error!(slot = SLOT, port, "port out of range");
        return 0;
    };
    let challenge = AuthChallenge {
        is_proxy: is_proxy != 0,
        host: host_name,
        port,
        realm,
        scheme,
    };
    let handled = guard(SLOT, false, || {
        host.on_auth_credentials_required(&browser, &frame, &challenge, callback)
    });
    c_int::from(handled)
}

unsafe extern "C" fn on_quota_request(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    origin_url: *const cef_string_t,
    new_size: i64,
    callback: *mut cef_request_callback_t,
) -> c_int {
    const SLOT: &str = "on_quota_request";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let (Some(browser), Some(callback)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "callback", RequestCallback::wrap(api, callback)),
    ) else {
        return 0;
    };
    let Some(origin_url) = decoded(SLOT, "origin_url", decode_url(origin_url)) else {
        return 0;
    };
    let handled = guard(SLOT, false, || {
        host.on_quota_request(&browser, &origin_url, new_size, callback)
    });
    c_int::from(handled)
}

unsafe extern "C" fn on_protocol_execution(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    url: *const cef_string_t,
    allow_os_execution: *mut c_int,
) {
    const SLOT: &str = "on_protocol_execution";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(browser) = required(SLOT, "browser", Browser::wrap(api, browser)) else {
        return;
    };
    let Some(url) = decoded(SLOT, "url", decode_url(url)) else {
        return;
    };
    let mut allow = !allow_os_execution.is_null() && *allow_os_execution != 0;
    guard(SLOT, (), || host.on_protocol_execution(&browser, &url, &mut allow));
    if !allow_os_execution.is_null() {
        *allow_os_execution = c_int::from(allow);
    }
}

unsafe extern "C" fn on_certificate_error(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    cert_error: cef_errorcode_t,
    request_url: *const cef_string_t,
    ssl_info: *mut cef_sslinfo_t,
    callback: *mut cef_request_callback_t,
) -> c_int {
    const SLOT: &str = "on_certificate_error";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let (Some(browser), Some(ssl_info), Some(callback)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "ssl_info", SslInfo::wrap(api, ssl_info)),
        required(SLOT, "callback", RequestCallback::wrap(api, callback)),
    ) else {
        return 0;
    };
    let Some(request_url) = decoded(SLOT, "request_url", decode_url(request_url)) else {
        return 0;
    };
    let handled = guard(SLOT, false, || {
        host.on_certificate_error(
            &browser,
            ErrorCode::from_raw(cert_error),
            &request_url,
            &ssl_info,
            callback,
        )
    });
    c_int::from(handled)
}

unsafe extern "C" fn on_before_plugin_load(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    url: *const cef_string_t,
    policy_url: *const cef_string_t,
    info: *mut cef_web_plugin_info_t,
) -> c_int {
    const SLOT: &str = "on_before_plugin_load";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let (Some(browser), Some(info)) = (
        required(SLOT, "browser", Browser::wrap(api, browser)),
        required(SLOT, "info", WebPluginInfo::wrap(api, info)),
    ) else {
        return 0;
    };
    let (Some(url), Some(policy_url)) = (
        optional(SLOT, "url", decode_url(url)),
        optional(SLOT, "policy_url", decode_url(policy_url)),
    ) else {
        return 0;
    };
    let block = guard(SLOT, false, || {
        host.on_before_plugin_load(&browser, url.as_ref(), policy_url.as_ref(), &info)
    });
    c_int::from(block)
}

unsafe extern "C" fn on_plugin_crashed(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    plugin_path: *const cef_string_t,
) {
    const SLOT: &str = "on_plugin_crashed";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(browser) = required(SLOT, "browser", Browser::wrap(api, browser)) else {
        return;
    };
    let Some(plugin_path) = decoded(SLOT, "plugin_path", decode(plugin_path)) else {
        return;
    };
    guard(SLOT, (), || host.on_plugin_crashed(&browser, &plugin_path));
}

unsafe extern "C" fn on_render_view_ready(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
) {
    const SLOT: &str = "on_render_view_ready";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(browser) = required(SLOT, "browser", Browser::wrap(api, browser)) else {
        return;
    };
    guard(SLOT, (), || host.on_render_view_ready(&browser));
}

unsafe extern "C" fn on_render_process_terminated(
    self_: *mut cef_request_handler_t,
    browser: *mut cef_browser_t,
    status: cef_termination_status_t,
) {
    const SLOT: &str = "on_render_process_terminated";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(browser) = required(SLOT, "browser", Browser::wrap(api, browser)) else {
        return;
    };
    guard(SLOT, (), || {
        host.on_render_process_terminated(&browser, TerminationStatus::from_raw(status))
    });
}
