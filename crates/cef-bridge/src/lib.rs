//! CEF Bridge - Safe Rust over the CEF C API
//!
//! This library lets Rust code drive and be driven by the native library:
//! - Typed proxies over library objects (requests, frames, DOM nodes, ...)
//! - String, URL, list and multimap marshalling with exact ownership
//! - Handler traits whose callback tables the library invokes
//! - A context owning the exported function table and handler registries
//!
//! # Example
//!
//! ```no_run
//! use cef_bridge::{BridgeContext, LoadHandler, Browser, Frame};
//! use cef_config::ConfigLoader;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Progress;
//!
//! impl LoadHandler for Progress {
//!     fn on_load_end(&self, _browser: &Browser, frame: &Frame, status: i32) {
//!         println!("{:?} finished with {status}", frame.url());
//!     }
//! }
//!
//! let config = ConfigLoader::new().load_from_directory(Path::new(".")).unwrap();
//! cef_bridge::logging::init(config.log_filter());
//! let context = BridgeContext::from_config(&config).unwrap();
//! let client = context.client().load_handler(Arc::new(Progress)).build();
//! // hand `client.new_ref()` to the library when creating a browser
//! # drop(client);
//! ```

pub mod client;
pub mod context;
pub mod crash;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod list;
pub mod logging;
pub mod marshaller;
pub mod multimap;
pub mod proxies;
pub mod proxy;
pub mod string;
pub mod time;
pub mod types;

pub use client::{Client, ClientBuilder, PrintHandlerRegistration};
pub use context::BridgeContext;
pub use error::{BridgeError, BridgeResult};
pub use geometry::{DraggableRegion, Rect};
pub use handlers::{AuthChallenge, LoadHandler, PrintHandler, RequestHandler};
pub use marshaller::Marshaller;
pub use multimap::HeaderMap;
pub use proxies::*;
pub use proxy::Proxy;
pub use types::{
    ContextMenuEditStateFlags, ContextMenuMediaStateFlags, ContextMenuMediaType,
    ContextMenuTypeFlags, DomDocumentType, DomNodeType, ErrorCode, ResourceType, ReturnValue,
    TerminationStatus, TransitionQualifiers, TransitionSource, TransitionType, UrlRequestFlags,
    WindowOpenDisposition,
};

/// Bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
