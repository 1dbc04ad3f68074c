//! Symmetric two-party key matching.
//!
//! A [`PairingHub`] matches arriving guests two at a time. Each guest
//! declares its own compatibility key and the key it wants to meet; a guest
//! with keys `(a, b)` matches exactly one guest with keys `(b, a)`, in
//! either arrival order. The hub holds a `keys x keys` grid of FIFO
//! wait-queues indexed by (declared key, wanted key), so a new arrival's
//! lookup and a later counterpart's lookup land on complementary cells
//! without any scanning.
//!
//! # Rendezvous Handoff
//!
//! Each waiting call owns a private match slot: a result holder plus a
//! single-use wake signal, reachable by at most one matcher through the
//! queue entry. The matcher writes its own name into the slot under the
//! grid lock and signals; the waiter re-checks the slot in a loop on wake.
//! A queue entry is consumed by exactly one match, so both parties of a
//! match return exactly once.
//!
//! A guest whose wanted key never arrives blocks indefinitely; that is
//! contract behavior, not a fault.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex as StdMutex, MutexGuard};

/// Private rendezvous handle owned by one waiting `meet` call.
///
/// The slot is written at most once, by the single matcher that dequeued
/// the owning guest's record.
#[derive(Debug, Default)]
struct MatchSlot {
    counterpart: StdMutex<Option<String>>,
    matched: Condvar,
}

/// Record for one guest blocked in its compatibility cell.
#[derive(Debug)]
struct Guest {
    name: String,
    slot: Arc<MatchSlot>,
}

/// Grid of compatibility cells, one FIFO queue per (declared, wanted) pair.
#[derive(Debug)]
struct Grid {
    cells: Vec<VecDeque<Guest>>,
}

/// Rendezvous hub that pairs guests with complementary compatibility keys.
///
/// Created once with the size of the closed key space and shared (for
/// example via `Arc`) between guest threads. Matching is exactly pairwise
/// and FIFO within each compatibility cell; global order across different
/// key pairs is unspecified.
#[derive(Debug)]
pub struct PairingHub {
    key_count: usize,
    grid: StdMutex<Grid>,
}

impl PairingHub {
    /// Creates a hub over a key space of `key_count` keys, `0..key_count`.
    ///
    /// # Panics
    /// Panics if `key_count == 0`.
    #[must_use]
    pub fn new(key_count: usize) -> Self {
        assert!(key_count > 0, "pairing hub requires at least 1 key");
        Self {
            key_count,
            grid: StdMutex::new(Grid {
                cells: (0..key_count * key_count).map(|_| VecDeque::new()).collect(),
            }),
        }
    }

    /// Returns the size of the key space.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    fn lock_grid(&self) -> MutexGuard<'_, Grid> {
        match self.grid.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn cell_index(&self, declared: usize, wanted: usize) -> usize {
        declared * self.key_count + wanted
    }

    /// Blocks until a guest with the complementary keys arrives, then
    /// returns that guest's name.
    ///
    /// A caller with keys `(my_key, wanted_key)` first checks the cell of
    /// guests that declared `wanted_key` and want `my_key`. If one is
    /// waiting, the oldest is dequeued and both calls resolve immediately:
    /// the caller returns the dequeued guest's name, and that guest's call
    /// returns `my_name`. Otherwise the caller enqueues itself under
    /// `(my_key, wanted_key)` and blocks until matched. Self-keyed guests
    /// (`my_key == wanted_key`) pair with each other through the same
    /// mechanism.
    ///
    /// # Panics
    /// Panics if either key is outside the hub's key space.
    pub fn meet(&self, my_name: String, my_key: usize, wanted_key: usize) -> String {
        assert!(my_key < self.key_count, "declared key out of range");
        assert!(wanted_key < self.key_count, "wanted key out of range");

        let mut grid = self.lock_grid();
        let complement = self.cell_index(wanted_key, my_key);
        if let Some(waiter) = grid.cells[complement].pop_front() {
            tracing::trace!(my_key, wanted_key, "pairing::meet immediate match");
            // Hand our name to the dequeued waiter and wake it. The entry
            // left its queue exactly once, so this matcher is the only
            // writer of its slot.
            let mut slot = match waiter.slot.counterpart.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *slot = Some(my_name);
            waiter.slot.matched.notify_all();
            drop(slot);
            return waiter.name;
        }

        tracing::trace!(my_key, wanted_key, "pairing::meet waiting");
        let slot = Arc::new(MatchSlot::default());
        let own = self.cell_index(my_key, wanted_key);
        grid.cells[own].push_back(Guest {
            name: my_name,
            slot: Arc::clone(&slot),
        });
        drop(grid);

        let mut matched = match slot.counterpart.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        loop {
            if let Some(name) = matched.take() {
                tracing::trace!(my_key, wanted_key, "pairing::meet matched");
                return name;
            }
            matched = match slot.matched.wait(matched) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
    }

    /// Total guests currently queued across all compatibility cells.
    ///
    /// Snapshot only; the value may change the moment the lock is released.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.lock_grid().cells.iter().map(VecDeque::len).sum()
    }
}
