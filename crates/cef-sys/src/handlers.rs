//! Function tables the embedder implements
//!
//! The library calls these slots on its own threads. Object arguments are
//! borrowed for the duration of the call; the callee takes its own reference
//! if it keeps one.

use crate::impl_cef_base;
use crate::objects::*;
use crate::types::*;
use std::os::raw::c_int;

#[repr(C)]
pub struct cef_load_handler_t {
    pub base: cef_base_ref_counted_t,
    pub on_loading_state_change: unsafe extern "C" fn(
        self_: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        is_loading: c_int,
        can_go_back: c_int,
        can_go_forward: c_int,
    ),
    pub on_load_start: unsafe extern "C" fn(
        self_: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
    ),
    pub on_load_end: unsafe extern "C" fn(
        self_: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        http_status_code: c_int,
    ),
    pub on_load_error: unsafe extern "C" fn(
        self_: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        error_code: cef_errorcode_t,
        error_text: *const cef_string_t,
        failed_url: *const cef_string_t,
    ),
}

#[repr(C)]
pub struct cef_request_handler_t {
    pub base: cef_base_ref_counted_t,
    /// Return 1 to cancel the navigation
    pub on_before_browse: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        request: *mut cef_request_t,
        is_redirect: c_int,
    ) -> c_int,
    /// Return 1 to cancel the navigation
    pub on_open_urlfrom_tab: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        target_url: *const cef_string_t,
        target_disposition: cef_window_open_disposition_t,
        user_gesture: c_int,
    ) -> c_int,
    pub on_before_resource_load: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        request: *mut cef_request_t,
        callback: *mut cef_request_callback_t,
    ) -> cef_return_value_t,
    /// Returns a new reference or null for default handling
    pub get_resource_handler: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        request: *mut cef_request_t,
    ) -> *mut cef_resource_handler_t,
    /// `new_url` may be overwritten in place
    pub on_resource_redirect: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        request: *mut cef_request_t,
        new_url: *mut cef_string_t,
    ),
    /// Return 1 to restart the request
    pub on_resource_response: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        request: *mut cef_request_t,
        response: *mut cef_response_t,
    ) -> c_int,
    /// Return 1 to continue asynchronously through `callback`
    pub get_auth_credentials: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        is_proxy: c_int,
        host: *const cef_string_t,
        port: c_int,
        realm: *const cef_string_t,
        scheme: *const cef_string_t,
        callback: *mut cef_auth_callback_t,
    ) -> c_int,
    pub on_quota_request: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        origin_url: *const cef_string_t,
        new_size: i64,
        callback: *mut cef_request_callback_t,
    ) -> c_int,
    /// `allow_os_execution` may be overwritten in place
    pub on_protocol_execution: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        url: *const cef_string_t,
        allow_os_execution: *mut c_int,
    ),
    pub on_certificate_error: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        cert_error: cef_errorcode_t,
        request_url: *const cef_string_t,
        ssl_info: *mut cef_sslinfo_t,
        callback: *mut cef_request_callback_t,
    ) -> c_int,
    /// `url` and `policy_url` may be null
    pub on_before_plugin_load: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        url: *const cef_string_t,
        policy_url: *const cef_string_t,
        info: *mut cef_web_plugin_info_t,
    ) -> c_int,
    pub on_plugin_crashed: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        plugin_path: *const cef_string_t,
    ),
    pub on_render_view_ready:
        unsafe extern "C" fn(self_: *mut cef_request_handler_t, browser: *mut cef_browser_t),
    pub on_render_process_terminated: unsafe extern "C" fn(
        self_: *mut cef_request_handler_t,
        browser: *mut cef_browser_t,
        status: cef_termination_status_t,
    ),
}

#[repr(C)]
pub struct cef_print_handler_t {
    pub base: cef_base_ref_counted_t,
    pub on_print_settings: unsafe extern "C" fn(
        self_: *mut cef_print_handler_t,
        settings: *mut cef_print_settings_t,
        get_defaults: c_int,
    ),
    /// Return 1 when the dialog will be shown and `callback` executed later
    pub on_print_dialog: unsafe extern "C" fn(
        self_: *mut cef_print_handler_t,
        has_selection: c_int,
        callback: *mut cef_print_dialog_callback_t,
    ) -> c_int,
    /// Return 1 when the job will be handled and `callback` executed later
    pub on_print_job: unsafe extern "C" fn(
        self_: *mut cef_print_handler_t,
        document_name: *const cef_string_t,
        pdf_file_path: *const cef_string_t,
        callback: *mut cef_print_job_callback_t,
    ) -> c_int,
    pub on_print_reset: unsafe extern "C" fn(self_: *mut cef_print_handler_t),
}

#[repr(C)]
pub struct cef_client_t {
    pub base: cef_base_ref_counted_t,
    /// Returns a new reference or null
    pub get_load_handler: unsafe extern "C" fn(self_: *mut cef_client_t) -> *mut cef_load_handler_t,
    /// Returns a new reference or null
    pub get_request_handler:
        unsafe extern "C" fn(self_: *mut cef_client_t) -> *mut cef_request_handler_t,
}

impl_cef_base!(
    cef_load_handler_t,
    cef_request_handler_t,
    cef_print_handler_t,
    cef_client_t,
);
