use super::table::{HandlerState, RefCountedTable};
use super::{decoded, guard, required, resolve};
use crate::marshaller::{table_key, Marshaller};
use crate::proxies::{PrintDialogCallback, PrintJobCallback, PrintSettings};
use crate::string::decode;
use cef_sys::{
    cef_print_dialog_callback_t, cef_print_handler_t, cef_print_job_callback_t,
    cef_print_settings_t, cef_string_t, CefApi,
};
use std::os::raw::c_int;
use std::path::Path;
use std::sync::Arc;

/// Platform print dialogs and jobs (Linux only in the library)
pub trait PrintHandler: Send + Sync {
    /// Fill `settings` with the defaults, or with the dialog's current
    /// values when `get_defaults` is false
    fn on_print_settings(&self, _settings: &PrintSettings, _get_defaults: bool) {}

    /// Show the print dialog; return `true` and complete `callback` later
    fn on_print_dialog(&self, _has_selection: bool, _callback: PrintDialogCallback) -> bool {
        false
    }

    /// Send the rendered PDF to the printer; return `true` and complete
    /// `callback` later
    fn on_print_job(
        &self,
        _document_name: &str,
        _pdf_file_path: &Path,
        _callback: PrintJobCallback,
    ) -> bool {
        false
    }

    /// Clear any printing state kept for the current job
    fn on_print_reset(&self) {}
}

type Table = RefCountedTable<cef_print_handler_t, HandlerState<dyn PrintHandler>>;

/// Allocate a table for `host` and register it
pub(crate) fn new_print_handler(
    registry: &Arc<Marshaller<dyn PrintHandler>>,
    api: &Arc<CefApi>,
    host: Arc<dyn PrintHandler>,
) -> *mut cef_print_handler_t {
    let raw = cef_print_handler_t {
        base: Table::base(),
        on_print_settings,
        on_print_dialog,
        on_print_job,
        on_print_reset,
    };
    let table = Table::allocate(raw, HandlerState::new(registry, api));
    registry.register(table_key(table), host);
    table
}

unsafe fn host<'a>(
    table: *mut cef_print_handler_t,
    slot: &'static str,
) -> Option<(Arc<dyn PrintHandler>, &'a Arc<CefApi>)> {
    resolve::<_, dyn PrintHandler>(table, slot)
}

unsafe extern "C" fn on_print_settings(
    self_: *mut cef_print_handler_t,
    settings: *mut cef_print_settings_t,
    get_defaults: c_int,
) {
    const SLOT: &str = "on_print_settings";
    let Some((host, api)) = host(self_, SLOT) else {
        return;
    };
    let Some(settings) = required(SLOT, "settings", PrintSettings::wrap(api, settings)) else {
        return;
    };
    guard(SLOT, (), || host.on_print_settings(&settings, get_defaults != 0));
}

unsafe extern "C" fn on_print_dialog(
    self_: *mut cef_print_handler_t,
    has_selection: c_int,
    callback: *mut cef_print_dialog_callback_t,
) -> c_int {
    const SLOT: &str = "on_print_dialog";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let Some(callback) = required(SLOT, "callback", PrintDialogCallback::wrap(api, callback))
    else {
        return 0;
    };
    let shown = guard(SLOT, false, || host.on_print_dialog(has_selection != 0, callback));
    c_int::from(shown)
}

unsafe extern "C" fn on_print_job(
    self_: *mut cef_print_handler_t,
    document_name: *const cef_string_t,
    pdf_file_path: *const cef_string_t,
    callback: *mut cef_print_job_callback_t,
) -> c_int {
    const SLOT: &str = "on_print_job";
    let Some((host, api)) = host(self_, SLOT) else {
        return 0;
    };
    let Some(callback) = required(SLOT, "callback", PrintJobCallback::wrap(api, callback)) else {
        return 0;
    };
    let (Some(document_name), Some(pdf_file_path)) = (
        decoded(SLOT, "document_name", decode(document_name)),
        decoded(SLOT, "pdf_file_path", decode(pdf_file_path)),
    ) else {
        return 0;
    };
    let handled = guard(SLOT, false, || {
        host.on_print_job(&document_name, Path::new(&pdf_file_path), callback)
    });
    c_int::from(handled)
}

unsafe extern "C" fn on_print_reset(self_: *mut cef_print_handler_t) {
    const SLOT: &str = "on_print_reset";
    let Some((host, _api)) = host(self_, SLOT) else {
        return;
    };
    guard(SLOT, (), || host.on_print_reset());
}
