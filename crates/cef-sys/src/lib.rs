//! Raw C ABI for the CEF browser engine
//!
//! Mirrors the fixed-layout structures the native library exposes:
//! - `types`: strings, string collections, the ref-counted base, plain structs
//!   and the integer codes behind every C enum
//! - `objects`: function tables of library-owned, reference-counted objects
//! - `handlers`: function tables the embedder fills in and the library calls
//! - `api`: the exported free functions, resolved at runtime
//! - `loader`: platform-aware dynamic loading of the library
//!
//! # Safety
//!
//! Nothing in this crate is safe to use directly. Every slot in a function
//! table is populated by whichever side allocated the table; callers must only
//! invoke slots on live objects and must honour the ownership rules documented
//! on each slot.

#![allow(non_camel_case_types)]

pub mod api;
pub mod handlers;
pub mod loader;
pub mod objects;
pub mod types;

pub use api::{CefApi, CefFunctions};
pub use handlers::*;
pub use loader::{LibraryLoader, LoadError};
pub use objects::*;
pub use types::*;
