//! Reference-counted fake objects
//!
//! A fake is a `#[repr(C)]` allocation that starts with the function table,
//! so the table pointer handed to the bridge is also the fake's address. The
//! test holds one reference through a [`FakeHandle`]; the allocation is freed
//! when the last reference is released, whoever holds it.

use crate::alloc::track;
use cef_sys::{cef_base_ref_counted_t, CefBase};
use std::os::raw::c_int;
use std::ptr::NonNull;
use std::sync::atomic::{fence, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[repr(C)]
pub struct Fake<T, S> {
    raw: T,
    refs: AtomicUsize,
    state: Mutex<S>,
    calls: Mutex<Vec<String>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: CefBase, S: Send + 'static> Fake<T, S> {
    /// The fake behind a table pointer
    ///
    /// # Safety
    ///
    /// `ptr` must be a live fake of exactly this type.
    pub unsafe fn from_raw<'a>(ptr: *mut T) -> &'a Self {
        &*ptr.cast::<Self>()
    }

    pub fn state(&self) -> MutexGuard<'_, S> {
        lock(&self.state)
    }

    pub fn record(&self, call: impl Into<String>) {
        lock(&self.calls).push(call.into());
    }
}

/// Base header whose slots manage a `Fake<T, S>`
pub fn base<T: CefBase, S: Send + 'static>() -> cef_base_ref_counted_t {
    cef_base_ref_counted_t {
        size: std::mem::size_of::<T>(),
        add_ref: add_ref::<T, S>,
        release: release::<T, S>,
        has_one_ref: has_one_ref::<T, S>,
    }
}

unsafe extern "C" fn add_ref<T: CefBase, S: Send + 'static>(base: *mut cef_base_ref_counted_t) {
    let fake = &*base.cast::<Fake<T, S>>();
    fake.refs.fetch_add(1, Ordering::Relaxed);
}

unsafe extern "C" fn release<T: CefBase, S: Send + 'static>(
    base: *mut cef_base_ref_counted_t,
) -> c_int {
    let fake = base.cast::<Fake<T, S>>();
    if (*fake).refs.fetch_sub(1, Ordering::Release) != 1 {
        return 0;
    }
    fence(Ordering::Acquire);
    drop(Box::from_raw(fake));
    track(|a| a.objects -= 1);
    1
}

unsafe extern "C" fn has_one_ref<T: CefBase, S: Send + 'static>(
    base: *mut cef_base_ref_counted_t,
) -> c_int {
    let fake = &*base.cast::<Fake<T, S>>();
    c_int::from(fake.refs.load(Ordering::Acquire) == 1)
}

/// The test's own reference to a fake
pub struct FakeHandle<T: CefBase, S: Send + 'static> {
    ptr: NonNull<Fake<T, S>>,
}

impl<T: CefBase, S: Send + 'static> FakeHandle<T, S> {
    /// Allocate a fake with a reference count of one
    ///
    /// `raw.base` must come from [`base::<T, S>()`](base).
    pub fn from_parts(raw: T, state: S) -> Self {
        let fake = Box::new(Fake {
            raw,
            refs: AtomicUsize::new(1),
            state: Mutex::new(state),
            calls: Mutex::new(Vec::new()),
        });
        track(|a| a.objects += 1);
        Self {
            ptr: NonNull::from(Box::leak(fake)),
        }
    }

    /// Take an additional reference to a fake of this type
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live fake of exactly this type.
    pub unsafe fn retain(ptr: *mut T) -> Option<Self> {
        let ptr = NonNull::new(ptr.cast::<Fake<T, S>>())?;
        ptr.as_ref().refs.fetch_add(1, Ordering::Relaxed);
        Some(Self { ptr })
    }

    fn fake(&self) -> &Fake<T, S> {
        unsafe { self.ptr.as_ref() }
    }

    /// Table pointer, borrowed
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr().cast()
    }

    /// Table pointer carrying a new reference for the receiver
    pub fn new_ref(&self) -> *mut T {
        self.fake().refs.fetch_add(1, Ordering::Relaxed);
        self.ptr()
    }

    /// Give up this handle's reference to whoever receives the pointer
    pub fn into_raw(self) -> *mut T {
        let ptr = self.ptr();
        std::mem::forget(self);
        ptr
    }

    /// Current reference count, this handle included
    pub fn refs(&self) -> usize {
        self.fake().refs.load(Ordering::Acquire)
    }

    pub fn state(&self) -> MutexGuard<'_, S> {
        self.fake().state()
    }

    /// Slot calls recorded so far
    pub fn calls(&self) -> Vec<String> {
        lock(&self.fake().calls).clone()
    }
}

impl<T: CefBase, S: Send + 'static> Drop for FakeHandle<T, S> {
    fn drop(&mut self) {
        unsafe {
            let base = T::base_ptr(self.ptr());
            ((*base).release)(base);
        }
    }
}

impl<T: CefBase, S: Send + 'static> std::fmt::Debug for FakeHandle<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeHandle")
            .field("ptr", &self.ptr)
            .field("refs", &self.refs())
            .finish()
    }
}

unsafe impl<T: CefBase, S: Send + 'static> Send for FakeHandle<T, S> {}
unsafe impl<T: CefBase, S: Send + 'static> Sync for FakeHandle<T, S> {}

/// Defines a slot returning a string field of the fake's state
macro_rules! string_slot {
    ($name:ident, $raw:ty, $state:ty, $field:ident) => {
        unsafe extern "C" fn $name(self_: *mut $raw) -> cef_sys::cef_string_userfree_t {
            let fake = $crate::fake::Fake::<$raw, $state>::from_raw(self_);
            fake.record(stringify!($field));
            $crate::strings::userfree_opt(fake.state().$field.as_deref())
        }
    };
}

/// Defines a slot returning a copyable field of the fake's state
macro_rules! value_slot {
    ($name:ident, $raw:ty, $state:ty, $field:ident, $ret:ty) => {
        unsafe extern "C" fn $name(self_: *mut $raw) -> $ret {
            let fake = $crate::fake::Fake::<$raw, $state>::from_raw(self_);
            fake.record(stringify!($field));
            <$ret>::from(fake.state().$field)
        }
    };
}

/// Defines a slot returning a new reference to a child fake, or null
macro_rules! object_slot {
    ($name:ident, $raw:ty, $state:ty, $field:ident, $ret:ty) => {
        unsafe extern "C" fn $name(self_: *mut $raw) -> *mut $ret {
            let fake = $crate::fake::Fake::<$raw, $state>::from_raw(self_);
            fake.record(stringify!($field));
            let state = fake.state();
            state
                .$field
                .as_ref()
                .map_or(std::ptr::null_mut(), |child| child.new_ref())
        }
    };
}

pub(crate) use {object_slot, string_slot, value_slot};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::LeakCheck;
    use cef_sys::cef_sslinfo_t;

    unsafe extern "C" fn cert_status(_self: *mut cef_sslinfo_t) -> c_int {
        0
    }

    fn make() -> FakeHandle<cef_sslinfo_t, u32> {
        FakeHandle::from_parts(
            cef_sslinfo_t {
                base: base::<cef_sslinfo_t, u32>(),
                get_cert_status: cert_status,
            },
            7,
        )
    }

    #[test]
    fn test_refcount_follows_slots() {
        let check = LeakCheck::new();
        let handle = make();
        assert_eq!(handle.refs(), 1);

        let extra = handle.new_ref();
        assert_eq!(handle.refs(), 2);
        unsafe {
            let base = cef_sslinfo_t::base_ptr(extra);
            assert_eq!(((*base).has_one_ref)(base), 0);
            assert_eq!(((*base).release)(base), 0);
            assert_eq!(((*base).has_one_ref)(base), 1);
        }
        assert_eq!(*handle.state(), 7);
        drop(handle);
        check.assert_clean();
    }

    #[test]
    fn test_into_raw_transfers_reference() {
        let check = LeakCheck::new();
        let raw = make().into_raw();
        unsafe {
            let base = cef_sslinfo_t::base_ptr(raw);
            assert_eq!(((*base).release)(base), 1);
        }
        check.assert_clean();
    }

    #[test]
    fn test_retain_adds_reference() {
        let handle = make();
        let second = unsafe { FakeHandle::<cef_sslinfo_t, u32>::retain(handle.ptr()) }.unwrap();
        assert_eq!(handle.refs(), 2);
        drop(second);
        assert_eq!(handle.refs(), 1);
    }
}
