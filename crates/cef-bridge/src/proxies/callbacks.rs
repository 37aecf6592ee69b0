//! Continuations handed to handlers that may answer later
//!
//! A handler that returns "handled asynchronously" keeps the callback (it is
//! `Send`) and completes it from any thread.

use crate::proxies::print::PrintSettings;
use crate::proxy::proxy_type;
use crate::string::CefStringBuf;
use cef_sys::{
    cef_auth_callback_t, cef_print_dialog_callback_t, cef_print_job_callback_t,
    cef_request_callback_t, cef_resource_handler_t,
};

proxy_type!(RequestCallback, cef_request_callback_t);
proxy_type!(AuthCallback, cef_auth_callback_t);
proxy_type!(PrintDialogCallback, cef_print_dialog_callback_t);
proxy_type!(PrintJobCallback, cef_print_job_callback_t);
proxy_type!(
    /// A custom resource source returned from `RequestHandler::resource_handler`
    ResourceHandler,
    cef_resource_handler_t
);

impl RequestCallback {
    /// Continue the request; `allow = false` denies it
    pub fn cont(&self, allow: bool) {
        unsafe { (self.0.table().cont)(self.0.as_raw(), i32::from(allow)) }
    }

    pub fn cancel(&self) {
        unsafe { (self.0.table().cancel)(self.0.as_raw()) }
    }
}

impl AuthCallback {
    pub fn cont(&self, username: &str, password: &str) {
        let username = CefStringBuf::new(username);
        let password = CefStringBuf::new(password);
        unsafe { (self.0.table().cont)(self.0.as_raw(), username.as_ptr(), password.as_ptr()) }
    }

    pub fn cancel(&self) {
        unsafe { (self.0.table().cancel)(self.0.as_raw()) }
    }
}

impl PrintDialogCallback {
    /// Continue printing; `None` keeps the current settings
    pub fn cont(&self, settings: Option<&PrintSettings>) {
        let settings = settings.map_or(std::ptr::null_mut(), |s| s.0.as_raw());
        unsafe { (self.0.table().cont)(self.0.as_raw(), settings) }
    }

    pub fn cancel(&self) {
        unsafe { (self.0.table().cancel)(self.0.as_raw()) }
    }
}

impl PrintJobCallback {
    /// Signal that the job has been handled
    pub fn cont(&self) {
        unsafe { (self.0.table().cont)(self.0.as_raw()) }
    }
}

impl ResourceHandler {
    pub fn cancel(&self) {
        unsafe { (self.0.table().cancel)(self.0.as_raw()) }
    }

    /// Give this handle's reference to the library
    pub(crate) fn into_raw(self) -> *mut cef_resource_handler_t {
        self.0.into_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{
        FakeAuthCallback, FakePrintDialogCallback, FakePrintJobCallback, FakePrintSettings,
        FakeRequestCallback, FakeResourceHandler, PrintSettingsState,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_callback() {
        let fake = FakeRequestCallback::new();
        let callback = unsafe { RequestCallback::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        callback.cont(true);
        callback.cancel();
        assert_eq!(fake.calls(), vec!["cont(true)", "cancel"]);
    }

    #[test]
    fn test_auth_callback_passes_credentials() {
        let fake = FakeAuthCallback::new();
        let callback = unsafe { AuthCallback::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        callback.cont("alice", "s3cret");
        assert_eq!(fake.calls(), vec!["cont(alice, s3cret)"]);
    }

    #[test]
    fn test_print_callbacks() {
        let api = cef_testkit::api();
        let dialog = FakePrintDialogCallback::new();
        let job = FakePrintJobCallback::new();
        let settings = FakePrintSettings::new(PrintSettingsState::default());

        let callback = unsafe { PrintDialogCallback::wrap(&api, dialog.ptr()) }.unwrap();
        let settings = unsafe { PrintSettings::wrap(&api, settings.ptr()) }.unwrap();
        callback.cont(Some(&settings));
        callback.cont(None);
        callback.cancel();
        assert_eq!(dialog.calls(), vec!["cont(settings)", "cont(null)", "cancel"]);

        let callback = unsafe { PrintJobCallback::wrap(&api, job.ptr()) }.unwrap();
        callback.cont();
        assert_eq!(job.calls(), vec!["cont"]);
    }

    #[test]
    fn test_resource_handler_into_raw_keeps_reference() {
        let fake = FakeResourceHandler::new();
        let handler = unsafe { ResourceHandler::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        let raw = handler.into_raw();
        assert_eq!(raw, fake.ptr());
        assert_eq!(fake.refs(), 2);
        unsafe { ((*raw).base.release)(raw.cast()) };
        assert_eq!(fake.refs(), 1);
    }
}
