use crate::error::BridgeResult;
use crate::proxy::proxy_type;
use crate::string::CefStringBuf;
use cef_sys::cef_print_settings_t;

proxy_type!(
    /// Settings of a print job
    PrintSettings,
    cef_print_settings_t
);

impl PrintSettings {
    pub fn is_valid(&self) -> bool {
        self.0.flag(self.0.table().is_valid)
    }

    /// Read-only settings ignore every setter
    pub fn is_read_only(&self) -> bool {
        self.0.flag(self.0.table().is_read_only)
    }

    pub fn is_landscape(&self) -> bool {
        self.0.flag(self.0.table().is_landscape)
    }

    pub fn set_orientation(&self, landscape: bool) {
        unsafe { (self.0.table().set_orientation)(self.0.as_raw(), i32::from(landscape)) }
    }

    pub fn device_name(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_device_name)
    }

    pub fn set_device_name(&self, name: &str) {
        let name = CefStringBuf::new(name);
        unsafe { (self.0.table().set_device_name)(self.0.as_raw(), name.as_ptr()) }
    }

    pub fn copies(&self) -> i32 {
        self.0.value(self.0.table().get_copies)
    }

    pub fn set_copies(&self, copies: i32) {
        unsafe { (self.0.table().set_copies)(self.0.as_raw(), copies) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{FakePrintSettings, PrintSettingsState};

    #[test]
    fn test_settings_round_trip_through_library() {
        let fake = FakePrintSettings::new(PrintSettingsState::default());
        let settings = unsafe { PrintSettings::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
        assert!(settings.is_valid());
        assert!(!settings.is_read_only());
        assert_eq!(settings.copies(), 1);
        assert_eq!(settings.device_name().unwrap(), None);

        settings.set_orientation(true);
        settings.set_device_name("Office Printer");
        settings.set_copies(3);

        assert!(settings.is_landscape());
        assert_eq!(settings.device_name().unwrap().as_deref(), Some("Office Printer"));
        assert_eq!(settings.copies(), 3);
    }
}
