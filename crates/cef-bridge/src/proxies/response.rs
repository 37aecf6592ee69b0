use crate::error::BridgeResult;
use crate::multimap::{HeaderMap, StringMultimap};
use crate::proxy::proxy_type;
use cef_sys::{cef_response_t, cef_sslinfo_t, cef_web_plugin_info_t};

proxy_type!(
    /// Response headers and status of a resource load
    Response,
    cef_response_t
);

proxy_type!(
    /// Certificate details attached to a certificate error
    SslInfo,
    cef_sslinfo_t
);

proxy_type!(WebPluginInfo, cef_web_plugin_info_t);

impl Response {
    pub fn status(&self) -> i32 {
        self.0.value(self.0.table().get_status)
    }

    pub fn status_text(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_status_text)
    }

    pub fn mime_type(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_mime_type)
    }

    pub fn headers(&self) -> BridgeResult<HeaderMap> {
        let map = StringMultimap::new(self.0.api())?;
        unsafe { (self.0.table().get_header_map)(self.0.as_raw(), map.as_raw()) };
        map.to_headers()
    }
}

impl SslInfo {
    /// Raw certificate status bits
    pub fn cert_status(&self) -> i32 {
        self.0.value(self.0.table().get_cert_status)
    }
}

impl WebPluginInfo {
    pub fn name(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_name)
    }

    /// Filesystem path of the plugin
    pub fn path(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_path)
    }

    pub fn version(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_version)
    }

    pub fn description(&self) -> BridgeResult<Option<String>> {
        self.0.string(self.0.table().get_description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cef_testkit::{
        FakeResponse, FakeSslInfo, FakeWebPluginInfo, LeakCheck, ResponseState, SslInfoState,
        WebPluginInfoState,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_response_headers_keep_repeats() {
        let check = LeakCheck::new();
        {
            let fake = FakeResponse::new(ResponseState {
                status: 302,
                status_text: Some("Found".to_string()),
                mime_type: Some("text/html".to_string()),
                headers: vec![
                    ("Set-Cookie".to_string(), "a=1".to_string()),
                    ("Location".to_string(), "/next".to_string()),
                    ("Set-Cookie".to_string(), "b=2".to_string()),
                ],
            });
            let response = unsafe { Response::wrap(&cef_testkit::api(), fake.ptr()) }.unwrap();
            assert_eq!(response.status(), 302);
            assert_eq!(response.status_text().unwrap().as_deref(), Some("Found"));
            assert_eq!(response.mime_type().unwrap().as_deref(), Some("text/html"));
            let headers = response.headers().unwrap();
            assert_eq!(headers.get("Set-Cookie").unwrap(), &["a=1", "b=2"]);
            assert_eq!(headers.first("Location"), Some("/next"));
        }
        check.assert_clean();
    }

    #[test]
    fn test_ssl_and_plugin_info() {
        let api = cef_testkit::api();
        let ssl = FakeSslInfo::new(SslInfoState { cert_status: 0x4 });
        let info = unsafe { SslInfo::wrap(&api, ssl.ptr()) }.unwrap();
        assert_eq!(info.cert_status(), 0x4);

        let plugin = FakeWebPluginInfo::new(WebPluginInfoState {
            name: Some("Viewer".to_string()),
            path: Some("/usr/lib/viewer.so".to_string()),
            version: Some("1.0".to_string()),
            description: None,
        });
        let plugin = unsafe { WebPluginInfo::wrap(&api, plugin.ptr()) }.unwrap();
        assert_eq!(plugin.name().unwrap().as_deref(), Some("Viewer"));
        assert_eq!(plugin.path().unwrap().as_deref(), Some("/usr/lib/viewer.so"));
        assert_eq!(plugin.version().unwrap().as_deref(), Some("1.0"));
        assert_eq!(plugin.description().unwrap(), None);
    }
}
