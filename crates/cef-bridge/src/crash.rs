//! Crash reporting pass-throughs
//!
//! Keys must be declared in `crash_reporter.cfg` before the library starts;
//! values for undeclared keys are dropped by the library.

use crate::string::{opt_ptr, CefStringBuf};
use cef_config::CrashReporterConfig;
use cef_sys::CefApi;
use tracing::{debug, warn};

/// Whether the library was started with crash reporting
pub fn crash_reporting_enabled(api: &CefApi) -> bool {
    unsafe { (api.crash_reporting_enabled)() != 0 }
}

/// Set a crash key, or clear it when `value` is `None`
///
/// With a `config`, keys it does not declare are logged, and values longer
/// than the key's size class are logged before the library truncates them.
pub fn set_crash_key_value(
    api: &CefApi,
    config: Option<&CrashReporterConfig>,
    key: &str,
    value: Option<&str>,
) {
    if let Some(config) = config {
        match config.key_size(key) {
            None => warn!(key, "crash key is not declared in the crash reporter config"),
            Some(size) => {
                let len = value.map_or(0, str::len);
                if len > size.max_bytes() {
                    warn!(
                        key,
                        len,
                        size = size.as_str(),
                        max = size.max_bytes(),
                        "crash key value will be truncated"
                    );
                }
            }
        }
    }

    let key_buf = CefStringBuf::new(key);
    let value_buf = value.map(CefStringBuf::new);
    unsafe { (api.set_crash_key_value)(key_buf.as_ptr(), opt_ptr(value_buf.as_ref())) };
    debug!(key, cleared = value.is_none(), "set crash key");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_config::CrashKeySize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enabled_passes_through() {
        let api = cef_testkit::api();
        cef_testkit::set_crash_reporting_enabled(false);
        assert!(!crash_reporting_enabled(&api));
        cef_testkit::set_crash_reporting_enabled(true);
        assert!(crash_reporting_enabled(&api));
        cef_testkit::set_crash_reporting_enabled(false);
    }

    #[test]
    fn test_set_and_clear() {
        let api = cef_testkit::api();
        let mut config = CrashReporterConfig::default();
        config
            .crash_keys
            .insert("session".to_string(), CrashKeySize::Small);

        set_crash_key_value(&api, Some(&config), "session", Some("s-42"));
        assert_eq!(
            cef_testkit::crash_keys().get("session").map(String::as_str),
            Some("s-42")
        );

        set_crash_key_value(&api, Some(&config), "session", None);
        assert!(!cef_testkit::crash_keys().contains_key("session"));
    }

    #[test]
    fn test_oversized_value_still_reaches_library() {
        let api = cef_testkit::api();
        let long = "x".repeat(100);
        let mut config = CrashReporterConfig::default();
        config.crash_keys.insert("big".to_string(), CrashKeySize::Small);

        set_crash_key_value(&api, Some(&config), "big", Some(&long));
        assert_eq!(cef_testkit::crash_keys().get("big"), Some(&long));
    }
}
