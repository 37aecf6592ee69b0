//! Registry from callback-table addresses to the Rust objects behind them
//!
//! Trampolines receive only the table pointer the library was given. They
//! resolve it here, clone the `Arc` out and release the lock before running
//! any host code, so a handler may re-enter the bridge freely.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Address of a callback table handed to the library
pub type TableKey = usize;

/// Key for a table pointer
pub fn table_key<T>(table: *const T) -> TableKey {
    table as usize
}

pub struct Marshaller<H: ?Sized> {
    name: &'static str,
    entries: Mutex<HashMap<TableKey, Arc<H>>>,
}

impl<H: ?Sized> Marshaller<H> {
    /// An empty registry; `name` labels log output
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    // A panicking handler never runs under this lock, so a poisoned map is
    // still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<TableKey, Arc<H>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach `host` to `key`, returning the object it replaces
    pub fn register(&self, key: TableKey, host: Arc<H>) -> Option<Arc<H>> {
        let previous = self.entries().insert(key, host);
        debug!(
            registry = self.name,
            table = key,
            replaced = previous.is_some(),
            "registered handler"
        );
        previous
    }

    /// The object attached to `key`, if any
    pub fn lookup(&self, key: TableKey) -> Option<Arc<H>> {
        self.entries().get(&key).cloned()
    }

    pub fn unregister(&self, key: TableKey) -> Option<Arc<H>> {
        let removed = self.entries().remove(&key);
        if removed.is_some() {
            debug!(
                registry = self.name,
                table = key,
                "unregistered handler"
            );
        }
        removed
    }

    /// Drop every entry, returning how many there were
    pub fn unregister_all(&self) -> usize {
        let drained: Vec<Arc<H>> = self.entries().drain().map(|(_, host)| host).collect();
        if !drained.is_empty() {
            debug!(registry = self.name, count = drained.len(), "unregistered all handlers");
        }
        // Host destructors run here, outside the lock
        drained.len()
    }

    pub fn contains(&self, key: TableKey) -> bool {
        self.entries().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H: ?Sized> fmt::Debug for Marshaller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marshaller")
            .field("name", &self.name)
            .field("entries", &self.len())
            .finish()
    }
}
