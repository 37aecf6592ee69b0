//! Reference-counted proxies over library objects
//!
//! A [`Proxy`] owns exactly one reference to a library object:
//! - [`Proxy::wrap`] takes a new reference to a borrowed pointer
//! - [`Proxy::from_owned`] adopts the reference a getter handed back
//! - `Clone` takes another reference, `Drop` releases one
//!
//! The counting itself happens in the library's `add_ref`/`release` slots,
//! which are thread-safe, so proxies are `Send` and `Sync`.

use crate::error::BridgeResult;
use crate::string::{take_string, take_url};
use cef_sys::{cef_string_userfree_t, CefApi, CefBase};
use std::mem::ManuallyDrop;
use std::os::raw::c_int;
use std::ptr::NonNull;
use std::sync::Arc;
use url::Url;

pub struct Proxy<T: CefBase> {
    raw: NonNull<T>,
    api: Arc<CefApi>,
}

impl<T: CefBase> Proxy<T> {
    /// Take a new reference to `ptr`; `None` for null
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object of type `T`.
    pub unsafe fn wrap(api: &Arc<CefApi>, ptr: *mut T) -> Option<Self> {
        let raw = NonNull::new(ptr)?;
        let base = T::base_ptr(ptr);
        ((*base).add_ref)(base);
        Some(Self {
            raw,
            api: Arc::clone(api),
        })
    }

    /// Adopt a reference the caller already owns; `None` for null
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object of type `T` carrying a
    /// reference that nothing else will release.
    pub unsafe fn from_owned(api: &Arc<CefApi>, ptr: *mut T) -> Option<Self> {
        Some(Self {
            raw: NonNull::new(ptr)?,
            api: Arc::clone(api),
        })
    }

    pub(crate) fn as_raw(&self) -> *mut T {
        self.raw.as_ptr()
    }

    /// The object's function table
    pub(crate) fn table(&self) -> &T {
        unsafe { self.raw.as_ref() }
    }

    pub(crate) fn api(&self) -> &Arc<CefApi> {
        &self.api
    }

    /// Hand this proxy's reference to the library
    pub(crate) fn into_raw(self) -> *mut T {
        let this = ManuallyDrop::new(self);
        drop(unsafe { std::ptr::read(&this.api) });
        this.raw.as_ptr()
    }

    /// Whether this proxy holds the only reference
    pub fn has_one_ref(&self) -> bool {
        let base = T::base_ptr(self.as_raw());
        unsafe { ((*base).has_one_ref)(base) != 0 }
    }

    /// Whether both proxies wrap the same object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }

    pub(crate) fn string(
        &self,
        slot: unsafe extern "C" fn(*mut T) -> cef_string_userfree_t,
    ) -> BridgeResult<Option<String>> {
        unsafe { take_string(&self.api, slot(self.as_raw())) }
    }

    pub(crate) fn url(
        &self,
        slot: unsafe extern "C" fn(*mut T) -> cef_string_userfree_t,
    ) -> BridgeResult<Option<Url>> {
        unsafe { take_url(&self.api, slot(self.as_raw())) }
    }

    pub(crate) fn flag(&self, slot: unsafe extern "C" fn(*mut T) -> c_int) -> bool {
        unsafe { slot(self.as_raw()) != 0 }
    }

    pub(crate) fn value<R>(&self, slot: unsafe extern "C" fn(*mut T) -> R) -> R {
        unsafe { slot(self.as_raw()) }
    }

    /// Call a getter that returns a new reference
    pub(crate) fn object<U: CefBase>(
        &self,
        slot: unsafe extern "C" fn(*mut T) -> *mut U,
    ) -> Option<Proxy<U>> {
        unsafe { Proxy::from_owned(&self.api, slot(self.as_raw())) }
    }
}

impl<T: CefBase> Clone for Proxy<T> {
    fn clone(&self) -> Self {
        let base = T::base_ptr(self.as_raw());
        unsafe { ((*base).add_ref)(base) };
        Self {
            raw: self.raw,
            api: Arc::clone(&self.api),
        }
    }
}

impl<T: CefBase> Drop for Proxy<T> {
    fn drop(&mut self) {
        let base = T::base_ptr(self.as_raw());
        unsafe { ((*base).release)(base) };
    }
}

impl<T: CefBase> std::fmt::Debug for Proxy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Proxy").field(&self.raw).finish()
    }
}

unsafe impl<T: CefBase> Send for Proxy<T> {}
unsafe impl<T: CefBase> Sync for Proxy<T> {}

/// Declares a newtype proxy for one library object type
macro_rules! proxy_type {
    ($(#[$meta:meta])* $name:ident, $raw:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(pub(crate) $crate::proxy::Proxy<$raw>);

        impl $name {
            /// Take a new reference to a borrowed pointer; `None` for null
            ///
            /// # Safety
            ///
            /// `ptr` must be null or point to a live object of this type.
            pub unsafe fn wrap(
                api: &std::sync::Arc<cef_sys::CefApi>,
                ptr: *mut $raw,
            ) -> Option<Self> {
                $crate::proxy::Proxy::wrap(api, ptr).map(Self)
            }

            /// Adopt a pointer that already carries a reference; `None` for null
            ///
            /// # Safety
            ///
            /// `ptr` must be null or point to a live object of this type whose
            /// reference nothing else will release.
            pub unsafe fn from_owned(
                api: &std::sync::Arc<cef_sys::CefApi>,
                ptr: *mut $raw,
            ) -> Option<Self> {
                $crate::proxy::Proxy::from_owned(api, ptr).map(Self)
            }

            /// Whether both values wrap the same library object
            pub fn is_same(&self, other: &Self) -> bool {
                self.0.ptr_eq(&other.0)
            }

            /// Whether this is the only reference to the library object
            pub fn has_one_ref(&self) -> bool {
                self.0.has_one_ref()
            }
        }

        impl From<$crate::proxy::Proxy<$raw>> for $name {
            fn from(proxy: $crate::proxy::Proxy<$raw>) -> Self {
                Self(proxy)
            }
        }
    };
}

pub(crate) use proxy_type;
