//! Bridge context: the library's functions and one handler registry per
//! capability set

use crate::client::{ClientBuilder, PrintHandlerRegistration};
use crate::crash;
use crate::error::BridgeResult;
use crate::handlers::{LoadHandler, PrintHandler, RequestHandler};
use crate::marshaller::Marshaller;
use cef_config::{Config, CrashReporterConfig};
use cef_sys::{CefApi, LibraryLoader};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for embedders
///
/// Owns the exported function table and the registries that trampolines
/// resolve their hosts through. Every table the context hands out keeps the
/// registry and function table it was built with alive on its own.
pub struct BridgeContext {
    api: Arc<CefApi>,
    load: Arc<Marshaller<dyn LoadHandler>>,
    request: Arc<Marshaller<dyn RequestHandler>>,
    print: Arc<Marshaller<dyn PrintHandler>>,
    crash_reporter: Option<CrashReporterConfig>,
}

impl BridgeContext {
    pub fn new(api: Arc<CefApi>) -> Self {
        Self {
            api,
            load: Arc::new(Marshaller::new("load")),
            request: Arc::new(Marshaller::new("request")),
            print: Arc::new(Marshaller::new("print")),
            crash_reporter: None,
        }
    }

    /// Load the library named by `config` and build a context around it
    pub fn from_config(config: &Config) -> BridgeResult<Self> {
        let mut loader = LibraryLoader::new();
        for path in config.search_paths().iter().rev() {
            loader.add_search_path(path.clone());
        }
        let api = CefApi::load(&mut loader, config.library_name())?;
        info!(library = config.library_name(), "loaded library");

        let mut context = Self::new(Arc::new(api));
        context.crash_reporter = config.crash_reporter().cloned();
        Ok(context)
    }

    /// Use `config` to size-check crash key values
    pub fn with_crash_reporter(mut self, config: CrashReporterConfig) -> Self {
        self.crash_reporter = Some(config);
        self
    }

    pub fn api(&self) -> &Arc<CefApi> {
        &self.api
    }

    pub fn load_handlers(&self) -> &Arc<Marshaller<dyn LoadHandler>> {
        &self.load
    }

    pub fn request_handlers(&self) -> &Arc<Marshaller<dyn RequestHandler>> {
        &self.request
    }

    pub fn print_handlers(&self) -> &Arc<Marshaller<dyn PrintHandler>> {
        &self.print
    }

    pub fn crash_reporter(&self) -> Option<&CrashReporterConfig> {
        self.crash_reporter.as_ref()
    }

    /// Start building a client for one browser
    pub fn client(&self) -> ClientBuilder<'_> {
        ClientBuilder::new(self)
    }

    /// Register the process-wide print handler
    pub fn register_print_handler(&self, host: Arc<dyn PrintHandler>) -> PrintHandlerRegistration {
        PrintHandlerRegistration::new(self, host)
    }

    /// Whether the library was started with crash reporting
    pub fn crash_reporting_enabled(&self) -> bool {
        crash::crash_reporting_enabled(&self.api)
    }

    /// Set or clear (`None`) a crash key
    pub fn set_crash_key_value(&self, key: &str, value: Option<&str>) {
        crash::set_crash_key_value(&self.api, self.crash_reporter.as_ref(), key, value);
    }

    /// Unregister every handler; returns how many were removed
    ///
    /// Tables still referenced by the library answer with neutral defaults
    /// from here on.
    pub fn shutdown(&self) -> usize {
        let removed = self.load.unregister_all()
            + self.request.unregister_all()
            + self.print.unregister_all();
        debug!(removed, "bridge context shut down");
        removed
    }
}

impl std::fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeContext")
            .field("dynamic", &self.api.is_dynamic())
            .field("load", &self.load.len())
            .field("request", &self.request.len())
            .field("print", &self.print.len())
            .finish()
    }
}
