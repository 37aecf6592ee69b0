//! Client configurations handed to the library
//!
//! A [`Client`] owns the handler tables attached to one browser. The library
//! reaches them through the `cef_client_t` getters, each of which hands out
//! a new reference. Tearing the client down unregisters every handler first,
//! so callbacks still in flight get neutral defaults, then releases the
//! tables.

use crate::context::BridgeContext;
use crate::handlers::table::{release_ref, retain, RefCountedTable, TableState};
use crate::handlers::{
    new_load_handler, new_print_handler, new_request_handler, LoadHandler, PrintHandler,
    RequestHandler,
};
use crate::marshaller::{table_key, Marshaller, TableKey};
use cef_sys::{cef_client_t, cef_load_handler_t, cef_print_handler_t, cef_request_handler_t};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Handler tables the client holds a reference to
struct Attached {
    load: *mut cef_load_handler_t,
    request: *mut cef_request_handler_t,
}

// The pointers are counted tables whose slots are thread-safe
unsafe impl Send for Attached {}

struct ClientState {
    attached: Mutex<Attached>,
}

impl ClientState {
    fn attached(&self) -> MutexGuard<'_, Attached> {
        self.attached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop the client's references to its handler tables
    fn detach(&self) {
        let detached = std::mem::replace(
            &mut *self.attached(),
            Attached {
                load: std::ptr::null_mut(),
                request: std::ptr::null_mut(),
            },
        );
        unsafe {
            if !detached.load.is_null() {
                release_ref(detached.load);
            }
            if !detached.request.is_null() {
                release_ref(detached.request);
            }
        }
    }
}

impl TableState for ClientState {
    fn released(&self, _key: TableKey) {
        self.detach();
    }
}

type ClientTable = RefCountedTable<cef_client_t, ClientState>;

unsafe extern "C" fn get_load_handler(self_: *mut cef_client_t) -> *mut cef_load_handler_t {
    let attached = ClientTable::state(self_).attached();
    if !attached.load.is_null() {
        retain(attached.load);
    }
    attached.load
}

unsafe extern "C" fn get_request_handler(self_: *mut cef_client_t) -> *mut cef_request_handler_t {
    let attached = ClientTable::state(self_).attached();
    if !attached.request.is_null() {
        retain(attached.request);
    }
    attached.request
}

struct Registration<H: ?Sized> {
    registry: Arc<Marshaller<H>>,
    key: TableKey,
}

impl<H: ?Sized> Registration<H> {
    fn unregister(&self) {
        self.registry.unregister(self.key);
    }
}

/// Builder returned by [`BridgeContext::client`]
pub struct ClientBuilder<'a> {
    context: &'a BridgeContext,
    load: Option<Arc<dyn LoadHandler>>,
    request: Option<Arc<dyn RequestHandler>>,
}

impl<'a> ClientBuilder<'a> {
    pub(crate) fn new(context: &'a BridgeContext) -> Self {
        Self {
            context,
            load: None,
            request: None,
        }
    }

    pub fn load_handler(mut self, handler: Arc<dyn LoadHandler>) -> Self {
        self.load = Some(handler);
        self
    }

    pub fn request_handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.request = Some(handler);
        self
    }

    /// Allocate the handler tables, register the handlers and wrap them in
    /// a client table
    pub fn build(self) -> Client {
        let api = self.context.api();
        let mut client = Client {
            raw: std::ptr::null_mut(),
            load: None,
            request: None,
        };
        let mut attached = Attached {
            load: std::ptr::null_mut(),
            request: std::ptr::null_mut(),
        };

        if let Some(host) = self.load {
            let registry = self.context.load_handlers();
            attached.load = new_load_handler(registry, api, host);
            client.load = Some(Registration {
                registry: Arc::clone(registry),
                key: table_key(attached.load),
            });
        }
        if let Some(host) = self.request {
            let registry = self.context.request_handlers();
            attached.request = new_request_handler(registry, api, host);
            client.request = Some(Registration {
                registry: Arc::clone(registry),
                key: table_key(attached.request),
            });
        }

        let raw = cef_client_t {
            base: ClientTable::base(),
            get_load_handler,
            get_request_handler,
        };
        client.raw = ClientTable::allocate(
            raw,
            ClientState {
                attached: Mutex::new(attached),
            },
        );
        debug!(
            client = client.raw as usize,
            load = client.load.is_some(),
            request = client.request.is_some(),
            "built client"
        );
        client
    }
}

/// Handler tables for one browser, exposed as a `cef_client_t`
pub struct Client {
    raw: *mut cef_client_t,
    load: Option<Registration<dyn LoadHandler>>,
    request: Option<Registration<dyn RequestHandler>>,
}

// The table is counted with atomics and its state is locked
unsafe impl Send for Client {}
unsafe impl Sync for Client {}

impl Client {
    /// The client table, borrowed; null once torn down
    ///
    /// The library adds its own reference when it keeps the pointer.
    pub fn as_raw(&self) -> *mut cef_client_t {
        self.raw
    }

    /// The client table carrying a new reference for the receiver; null
    /// once torn down
    pub fn new_ref(&self) -> *mut cef_client_t {
        if !self.raw.is_null() {
            unsafe { retain(self.raw) };
        }
        self.raw
    }

    pub fn has_load_handler(&self) -> bool {
        self.load.is_some()
    }

    pub fn has_request_handler(&self) -> bool {
        self.request.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.raw.is_null()
    }

    /// Unregister every handler, then release the tables
    ///
    /// Safe to call more than once; also runs on drop. Tables the library
    /// still references stay allocated but answer with neutral defaults.
    pub fn teardown(&mut self) {
        if self.raw.is_null() {
            return;
        }
        if let Some(load) = self.load.take() {
            load.unregister();
        }
        if let Some(request) = self.request.take() {
            request.unregister();
        }
        let raw = std::mem::replace(&mut self.raw, std::ptr::null_mut());
        unsafe {
            ClientTable::state(raw).detach();
            release_ref(raw);
        }
        debug!(client = raw as usize, "tore down client");
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("raw", &self.raw)
            .field("load", &self.load.is_some())
            .field("request", &self.request.is_some())
            .finish()
    }
}

/// A registered print handler table, released on drop
pub struct PrintHandlerRegistration {
    raw: *mut cef_print_handler_t,
    registration: Registration<dyn PrintHandler>,
}

unsafe impl Send for PrintHandlerRegistration {}
unsafe impl Sync for PrintHandlerRegistration {}

impl PrintHandlerRegistration {
    pub(crate) fn new(context: &BridgeContext, host: Arc<dyn PrintHandler>) -> Self {
        let registry = context.print_handlers();
        let raw = new_print_handler(registry, context.api(), host);
        Self {
            raw,
            registration: Registration {
                registry: Arc::clone(registry),
                key: table_key(raw),
            },
        }
    }

    /// The print handler table, borrowed
    pub fn as_raw(&self) -> *mut cef_print_handler_t {
        self.raw
    }

    /// The table carrying a new reference for the receiver
    pub fn new_ref(&self) -> *mut cef_print_handler_t {
        unsafe { retain(self.raw) };
        self.raw
    }
}

impl Drop for PrintHandlerRegistration {
    fn drop(&mut self) {
        self.registration.unregister();
        unsafe { release_ref(self.raw) };
    }
}

impl std::fmt::Debug for PrintHandlerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrintHandlerRegistration").field(&self.raw).finish()
    }
}
