//! Live-allocation counters
//!
//! Counters are per thread, so parallel tests do not observe each other.

use std::cell::Cell;

/// Outstanding allocations made through this crate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Allocations {
    /// String buffers with a destructor
    pub strings: isize,
    /// `cef_string_userfree_t` wrappers
    pub userfree: isize,
    pub lists: isize,
    pub maps: isize,
    /// Fake reference-counted objects
    pub objects: isize,
    /// Destructor or free calls on memory this crate does not own
    pub invalid_frees: isize,
}

impl Allocations {
    fn minus(self, other: Allocations) -> Allocations {
        Allocations {
            strings: self.strings - other.strings,
            userfree: self.userfree - other.userfree,
            lists: self.lists - other.lists,
            maps: self.maps - other.maps,
            objects: self.objects - other.objects,
            invalid_frees: self.invalid_frees - other.invalid_frees,
        }
    }
}

thread_local! {
    static LIVE: Cell<Allocations> = Cell::new(Allocations::default());
}

pub(crate) fn track(update: impl FnOnce(&mut Allocations)) {
    LIVE.with(|cell| {
        let mut current = cell.get();
        update(&mut current);
        cell.set(current);
    });
}

/// Current counters for this thread
pub fn live() -> Allocations {
    LIVE.with(Cell::get)
}

/// Records the counters at creation and compares against them later
#[derive(Debug)]
pub struct LeakCheck {
    start: Allocations,
}

impl LeakCheck {
    pub fn new() -> Self {
        Self { start: live() }
    }

    /// Change since this check was created
    pub fn delta(&self) -> Allocations {
        live().minus(self.start)
    }

    /// Panics unless everything allocated since creation was freed exactly once
    #[track_caller]
    pub fn assert_clean(&self) {
        assert_eq!(
            self.delta(),
            Allocations::default(),
            "foreign allocations leaked or double-freed"
        );
    }
}

impl Default for LeakCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_tracks_changes() {
        let check = LeakCheck::new();
        track(|a| a.lists += 1);
        assert_eq!(check.delta().lists, 1);
        track(|a| a.lists -= 1);
        check.assert_clean();
    }

    #[test]
    #[should_panic(expected = "leaked")]
    fn test_assert_clean_reports_leak() {
        let check = LeakCheck::new();
        track(|a| a.strings += 1);
        check.assert_clean();
    }
}
