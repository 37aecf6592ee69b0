//! Reference-counted callback tables allocated by the bridge
//!
//! The library counts references to every table it is given, including the
//! ones the embedder implements. A table is a `#[repr(C)]` allocation that
//! starts with the function table; the count and per-table state follow it,
//! so the pointer the library sees is also the allocation's address.

use crate::marshaller::{Marshaller, TableKey};
use cef_sys::{cef_base_ref_counted_t, CefApi, CefBase};
use std::os::raw::c_int;
use std::sync::atomic::{fence, AtomicUsize, Ordering};
use std::sync::Arc;

/// State carried alongside a table
pub(crate) trait TableState: Send + Sync + 'static {
    /// Runs once, when the last reference is released and before the
    /// allocation is freed
    fn released(&self, key: TableKey);
}

#[repr(C)]
pub(crate) struct RefCountedTable<T, S> {
    raw: T,
    refs: AtomicUsize,
    state: S,
}

impl<T: CefBase, S: TableState> RefCountedTable<T, S> {
    /// Base header whose slots manage this allocation
    pub(crate) fn base() -> cef_base_ref_counted_t {
        cef_base_ref_counted_t {
            size: std::mem::size_of::<T>(),
            add_ref: add_ref::<T, S>,
            release: release::<T, S>,
            has_one_ref: has_one_ref::<T, S>,
        }
    }

    /// Allocate a table holding one reference, owned by the caller
    ///
    /// `raw.base` must come from [`Self::base`].
    pub(crate) fn allocate(raw: T, state: S) -> *mut T {
        let table = Box::new(Self {
            raw,
            refs: AtomicUsize::new(1),
            state,
        });
        Box::into_raw(table).cast()
    }

    /// State of a live table
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`Self::allocate`] with these exact type
    /// parameters and still hold a reference.
    pub(crate) unsafe fn state<'a>(ptr: *mut T) -> &'a S {
        &(*ptr.cast::<Self>()).state
    }
}

unsafe extern "C" fn add_ref<T: CefBase, S: TableState>(base: *mut cef_base_ref_counted_t) {
    let table = &*base.cast::<RefCountedTable<T, S>>();
    table.refs.fetch_add(1, Ordering::Relaxed);
}

unsafe extern "C" fn release<T: CefBase, S: TableState>(
    base: *mut cef_base_ref_counted_t,
) -> c_int {
    let table = base.cast::<RefCountedTable<T, S>>();
    if (*table).refs.fetch_sub(1, Ordering::Release) != 1 {
        return 0;
    }
    fence(Ordering::Acquire);
    let table = Box::from_raw(table);
    table.state.released(base as TableKey);
    drop(table);
    1
}

unsafe extern "C" fn has_one_ref<T: CefBase, S: TableState>(
    base: *mut cef_base_ref_counted_t,
) -> c_int {
    let table = &*base.cast::<RefCountedTable<T, S>>();
    c_int::from(table.refs.load(Ordering::Acquire) == 1)
}

/// Take a reference to any counted table
///
/// # Safety
///
/// `ptr` must be live.
pub(crate) unsafe fn retain<T: CefBase>(ptr: *mut T) {
    let base = T::base_ptr(ptr);
    ((*base).add_ref)(base);
}

/// Drop a reference to any counted table
///
/// # Safety
///
/// `ptr` must be live and the caller must own the reference it releases.
pub(crate) unsafe fn release_ref<T: CefBase>(ptr: *mut T) {
    let base = T::base_ptr(ptr);
    ((*base).release)(base);
}

/// State of a handler table: where to find its host, and the library
/// functions to convert arguments with
pub(crate) struct HandlerState<H: ?Sized> {
    pub(crate) registry: Arc<Marshaller<H>>,
    pub(crate) api: Arc<CefApi>,
}

impl<H: ?Sized> HandlerState<H> {
    pub(crate) fn new(registry: &Arc<Marshaller<H>>, api: &Arc<CefApi>) -> Self {
        Self {
            registry: Arc::clone(registry),
            api: Arc::clone(api),
        }
    }
}

impl<H: ?Sized + Send + Sync + 'static> TableState for HandlerState<H> {
    fn released(&self, key: TableKey) {
        self.registry.unregister(key);
    }
}
