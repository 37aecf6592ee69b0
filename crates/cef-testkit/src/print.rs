//! Print settings

use crate::fake::{base, string_slot, value_slot, Fake, FakeHandle};
use crate::strings::read_string;
use cef_sys::*;
use std::os::raw::c_int;

pub type FakePrintSettings = FakeHandle<cef_print_settings_t, PrintSettingsState>;

#[derive(Debug)]
pub struct PrintSettingsState {
    pub is_valid: bool,
    pub read_only: bool,
    pub landscape: bool,
    pub device_name: Option<String>,
    pub copies: c_int,
}

impl Default for PrintSettingsState {
    fn default() -> Self {
        Self {
            is_valid: true,
            read_only: false,
            landscape: false,
            device_name: None,
            copies: 1,
        }
    }
}

type Settings = cef_print_settings_t;
type State = PrintSettingsState;

value_slot!(settings_is_valid, Settings, State, is_valid, c_int);
value_slot!(settings_is_read_only, Settings, State, read_only, c_int);
value_slot!(settings_is_landscape, Settings, State, landscape, c_int);
string_slot!(settings_device_name, Settings, State, device_name);
value_slot!(settings_copies, Settings, State, copies, c_int);

unsafe extern "C" fn settings_set_orientation(self_: *mut Settings, landscape: c_int) {
    let fake = Fake::<Settings, State>::from_raw(self_);
    fake.record("set_orientation");
    fake.state().landscape = landscape != 0;
}

unsafe extern "C" fn settings_set_device_name(self_: *mut Settings, name: *const cef_string_t) {
    let fake = Fake::<Settings, State>::from_raw(self_);
    fake.record("set_device_name");
    fake.state().device_name = read_string(name);
}

unsafe extern "C" fn settings_set_copies(self_: *mut Settings, copies: c_int) {
    let fake = Fake::<Settings, State>::from_raw(self_);
    fake.record("set_copies");
    fake.state().copies = copies;
}

impl FakePrintSettings {
    pub fn new(state: PrintSettingsState) -> Self {
        FakeHandle::from_parts(
            cef_print_settings_t {
                base: base::<Settings, State>(),
                is_valid: settings_is_valid,
                is_read_only: settings_is_read_only,
                set_orientation: settings_set_orientation,
                is_landscape: settings_is_landscape,
                set_device_name: settings_set_device_name,
                get_device_name: settings_device_name,
                set_copies: settings_set_copies,
                get_copies: settings_copies,
            },
            state,
        )
    }
}
