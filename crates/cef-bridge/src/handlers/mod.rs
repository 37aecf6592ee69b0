//! Handler capability sets and the trampolines the library calls
//!
//! Each capability set is a trait whose methods all have neutral defaults.
//! The bridge allocates one callback table per attached handler, registers
//! the handler under the table's address, and fills the table with
//! trampolines. A trampoline:
//! 1. resolves its table in the registry, answering with the slot's neutral
//!    default when nothing is registered
//! 2. wraps and decodes its arguments, logging and answering with the
//!    default when one is malformed
//! 3. calls the host outside any lock, catching panics
//! 4. writes results and out-parameters back in the library's encoding

mod load;
mod print;
mod request;
pub(crate) mod table;

pub use load::LoadHandler;
pub use print::PrintHandler;
pub use request::{AuthChallenge, RequestHandler};

pub(crate) use load::new_load_handler;
pub(crate) use print::new_print_handler;
pub(crate) use request::new_request_handler;

use crate::error::BridgeResult;
use crate::marshaller::table_key;
use cef_sys::{CefApi, CefBase};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use table::{HandlerState, RefCountedTable};
use tracing::{error, trace, warn};

/// Host registered for `table`, with the library functions its state holds
///
/// # Safety
///
/// `table` must be null or a live table allocated with `HandlerState<H>`.
pub(crate) unsafe fn resolve<'a, T, H>(
    table: *mut T,
    slot: &'static str,
) -> Option<(Arc<H>, &'a Arc<CefApi>)>
where
    T: CefBase,
    H: ?Sized + Send + Sync + 'static,
{
    if table.is_null() {
        warn!(slot, "callback with a null table");
        return None;
    }
    let state = RefCountedTable::<T, HandlerState<H>>::state(table);
    match state.registry.lookup(table_key(table)) {
        Some(host) => {
            trace!(registry = state.registry.name(), slot, "dispatching callback");
            Some((host, &state.api))
        }
        None => {
            warn!(
                registry = state.registry.name(),
                slot, "callback for an unregistered table"
            );
            None
        }
    }
}

/// A required object argument; logs when the library passed null
pub(crate) fn required<P>(slot: &'static str, name: &'static str, value: Option<P>) -> Option<P> {
    if value.is_none() {
        error!(slot, argument = name, "null argument");
    }
    value
}

/// A required string or URL argument; logs when it is null or malformed
pub(crate) fn decoded<T>(
    slot: &'static str,
    name: &'static str,
    value: BridgeResult<Option<T>>,
) -> Option<T> {
    match value {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            error!(slot, argument = name, "null argument");
            None
        }
        Err(err) => {
            error!(slot, argument = name, error = %err, "malformed argument");
            None
        }
    }
}

/// An argument that may legitimately be null; the outer `None` means it
/// was malformed
pub(crate) fn optional<T>(
    slot: &'static str,
    name: &'static str,
    value: BridgeResult<Option<T>>,
) -> Option<Option<T>> {
    match value {
        Ok(value) => Some(value),
        Err(err) => {
            error!(slot, argument = name, error = %err, "malformed argument");
            None
        }
    }
}

/// Run host code, answering `default` if it panics
pub(crate) fn guard<R>(slot: &'static str, default: R, call: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(_) => {
            error!(slot, "handler panicked");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    #[test]
    fn test_guard_catches_panics() {
        assert_eq!(guard("slot", 0, || 7), 7);
        assert_eq!(guard("slot", 0, || panic!("boom")), 0);
    }

    #[test]
    fn test_decoded_rejects_null_and_errors() {
        assert_eq!(decoded("slot", "arg", Ok(Some(1))), Some(1));
        assert_eq!(decoded::<i32>("slot", "arg", Ok(None)), None);
        let err = BridgeError::CallFailed("x");
        assert_eq!(decoded::<i32>("slot", "arg", Err(err)), None);
    }

    #[test]
    fn test_optional_keeps_null() {
        assert_eq!(optional::<i32>("slot", "arg", Ok(None)), Some(None));
        let err = BridgeError::CallFailed("x");
        assert_eq!(optional::<i32>("slot", "arg", Err(err)), None);
    }
}
