//! Continuation callbacks and resource handlers
//!
//! These keep no state; tests inspect [`FakeHandle::calls`] to see how the
//! callback was completed.

use crate::fake::{base, Fake, FakeHandle};
use crate::strings::read_string;
use cef_sys::*;
use std::os::raw::c_int;

pub type FakeRequestCallback = FakeHandle<cef_request_callback_t, ()>;
pub type FakeAuthCallback = FakeHandle<cef_auth_callback_t, ()>;
pub type FakePrintDialogCallback = FakeHandle<cef_print_dialog_callback_t, ()>;
pub type FakePrintJobCallback = FakeHandle<cef_print_job_callback_t, ()>;
pub type FakeResourceHandler = FakeHandle<cef_resource_handler_t, ()>;

unsafe extern "C" fn request_cont(self_: *mut cef_request_callback_t, allow: c_int) {
    Fake::<cef_request_callback_t, ()>::from_raw(self_).record(format!("cont({})", allow != 0));
}

unsafe extern "C" fn request_cancel(self_: *mut cef_request_callback_t) {
    Fake::<cef_request_callback_t, ()>::from_raw(self_).record("cancel");
}

impl FakeRequestCallback {
    pub fn new() -> Self {
        FakeHandle::from_parts(
            cef_request_callback_t {
                base: base::<cef_request_callback_t, ()>(),
                cont: request_cont,
                cancel: request_cancel,
            },
            (),
        )
    }
}

unsafe extern "C" fn auth_cont(
    self_: *mut cef_auth_callback_t,
    username: *const cef_string_t,
    password: *const cef_string_t,
) {
    let username = read_string(username).unwrap_or_default();
    let password = read_string(password).unwrap_or_default();
    Fake::<cef_auth_callback_t, ()>::from_raw(self_)
        .record(format!("cont({}, {})", username, password));
}

unsafe extern "C" fn auth_cancel(self_: *mut cef_auth_callback_t) {
    Fake::<cef_auth_callback_t, ()>::from_raw(self_).record("cancel");
}

impl FakeAuthCallback {
    pub fn new() -> Self {
        FakeHandle::from_parts(
            cef_auth_callback_t {
                base: base::<cef_auth_callback_t, ()>(),
                cont: auth_cont,
                cancel: auth_cancel,
            },
            (),
        )
    }
}

unsafe extern "C" fn dialog_cont(
    self_: *mut cef_print_dialog_callback_t,
    settings: *mut cef_print_settings_t,
) {
    let call = if settings.is_null() {
        "cont(null)"
    } else {
        "cont(settings)"
    };
    Fake::<cef_print_dialog_callback_t, ()>::from_raw(self_).record(call);
}

unsafe extern "C" fn dialog_cancel(self_: *mut cef_print_dialog_callback_t) {
    Fake::<cef_print_dialog_callback_t, ()>::from_raw(self_).record("cancel");
}

impl FakePrintDialogCallback {
    pub fn new() -> Self {
        FakeHandle::from_parts(
            cef_print_dialog_callback_t {
                base: base::<cef_print_dialog_callback_t, ()>(),
                cont: dialog_cont,
                cancel: dialog_cancel,
            },
            (),
        )
    }
}

unsafe extern "C" fn job_cont(self_: *mut cef_print_job_callback_t) {
    Fake::<cef_print_job_callback_t, ()>::from_raw(self_).record("cont");
}

impl FakePrintJobCallback {
    pub fn new() -> Self {
        FakeHandle::from_parts(
            cef_print_job_callback_t {
                base: base::<cef_print_job_callback_t, ()>(),
                cont: job_cont,
            },
            (),
        )
    }
}

unsafe extern "C" fn resource_cancel(self_: *mut cef_resource_handler_t) {
    Fake::<cef_resource_handler_t, ()>::from_raw(self_).record("cancel");
}

impl FakeResourceHandler {
    pub fn new() -> Self {
        FakeHandle::from_parts(
            cef_resource_handler_t {
                base: base::<cef_resource_handler_t, ()>(),
                cancel: resource_cancel,
            },
            (),
        )
    }
}
