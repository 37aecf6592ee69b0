//! Typed proxies over the library's object families

mod browser;
mod callbacks;
mod context_menu;
mod dom;
mod navigation;
mod print;
mod request;
mod response;

pub use browser::{Browser, Frame};
pub use callbacks::{
    AuthCallback, PrintDialogCallback, PrintJobCallback, RequestCallback, ResourceHandler,
};
pub use context_menu::ContextMenuParams;
pub use dom::{DomDocument, DomNode};
pub use navigation::NavigationEntry;
pub use print::PrintSettings;
pub use request::{PostData, Request};
pub use response::{Response, SslInfo, WebPluginInfo};
