//! Vehicle/passenger boarding rendezvous.
//!
//! A [`Station`] synchronizes one arriving vehicle per loading episode with
//! any number of arriving passengers. The vehicle announces its free
//! capacity, waiting passengers claim seats in parallel, and the vehicle
//! departs only once it is full or no claimable demand remains, and every
//! claimed passenger has finished boarding.
//!
//! # Protocol
//!
//! - [`Station::arrive_vehicle`]: announce capacity, wake waiting
//!   passengers, block until the episode completes, then close the doors.
//! - [`Station::request_seat`]: block until a vehicle has a free seat, then
//!   claim it. Returning means the seat is held; the passenger is still
//!   boarding until it reports completion.
//! - [`Station::boarding_complete`]: report that boarding finished. When the
//!   last boarding passenger reports, the departure barrier clears.
//!
//! Callers serialize vehicle arrivals themselves: exactly one loading
//! episode is meaningful at a time per station. Passenger calls may arrive
//! at any time from any number of threads.

use std::sync::{Condvar, Mutex as StdMutex, MutexGuard};

#[derive(Debug, Default)]
struct StationState {
    /// Seats currently offered by the vehicle being loaded; 0 when no
    /// vehicle is present or the vehicle is full.
    seats_available: usize,
    /// Passengers blocked waiting for a seat.
    num_waiting: usize,
    /// Passengers holding a claimed seat that have not yet reported
    /// boarding completion.
    boarding: usize,
}

impl StationState {
    /// Departure condition: no claimable demand remains (vehicle full or
    /// nobody waiting) and every claimed seat has been boarded.
    fn episode_complete(&self) -> bool {
        (self.seats_available == 0 || self.num_waiting == 0) && self.boarding == 0
    }
}

/// Rendezvous point for one vehicle per episode and its passengers.
///
/// Created once and shared (for example via `Arc`) between the vehicle
/// thread and passenger threads. All counters live behind a single lock;
/// blocking calls park on a condition variable and re-check their condition
/// in a loop, so spurious wakeups are harmless.
#[derive(Debug, Default)]
pub struct Station {
    state: StdMutex<StationState>,
    /// Signaled when a vehicle opens its doors with free seats.
    vehicle_ready: Condvar,
    /// Signaled when the boarding barrier may have cleared.
    departure: Condvar,
}

impl Station {
    /// Creates an empty station: no vehicle present, nobody waiting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_state(&self) -> MutexGuard<'_, StationState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Announces a vehicle with `capacity` free seats and loads it.
    ///
    /// Wakes all passengers blocked in [`Station::request_seat`] when
    /// `capacity > 0`, then blocks until the loading episode completes: the
    /// vehicle is full or no passengers remain waiting, and every passenger
    /// who claimed a seat this episode has called
    /// [`Station::boarding_complete`]. On return the doors are closed:
    /// remaining capacity is discarded and later passengers see no seats.
    ///
    /// A vehicle with free seats and nobody waiting returns immediately, as
    /// does a full vehicle (`capacity == 0`) regardless of waiting
    /// passengers.
    pub fn arrive_vehicle(&self, capacity: usize) {
        let mut state = self.lock_state();
        tracing::trace!(
            capacity,
            waiting = state.num_waiting,
            "station::arrive_vehicle doors open"
        );
        state.seats_available = capacity;
        if capacity > 0 {
            self.vehicle_ready.notify_all();
        }

        while !state.episode_complete() {
            state = match self.departure.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }

        // Discard leftover capacity so later passengers never observe a
        // vehicle that has already departed.
        state.seats_available = 0;
        tracing::trace!("station::arrive_vehicle departing");
    }

    /// Blocks until a vehicle is present with a free seat, then claims it.
    ///
    /// Returning means one seat has been allocated to the caller; the
    /// caller is counted as boarding until it calls
    /// [`Station::boarding_complete`]. Seat allocation order among
    /// simultaneously waiting passengers is unspecified.
    pub fn request_seat(&self) {
        let mut state = self.lock_state();
        state.num_waiting += 1;
        tracing::trace!(waiting = state.num_waiting, "station::request_seat waiting");

        while state.seats_available == 0 {
            state = match self.vehicle_ready.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }

        state.seats_available -= 1;
        state.num_waiting -= 1;
        state.boarding += 1;
        tracing::trace!(
            seats_left = state.seats_available,
            boarding = state.boarding,
            "station::request_seat claimed"
        );
    }

    /// Reports that the caller has finished boarding its claimed seat.
    ///
    /// When the last boarding passenger reports, the vehicle's departure
    /// barrier clears.
    ///
    /// # Panics
    /// Panics if called with no outstanding seat claim.
    pub fn boarding_complete(&self) {
        let mut state = self.lock_state();
        assert!(
            state.boarding > 0,
            "boarding_complete called with no outstanding claim"
        );
        state.boarding -= 1;
        tracing::trace!(boarding = state.boarding, "station::boarding_complete");
        if state.boarding == 0 {
            self.departure.notify_all();
        }
    }

    /// Seats currently offered by the vehicle being loaded.
    ///
    /// Snapshot only; the value may change the moment the lock is released.
    #[must_use]
    pub fn seats_available(&self) -> usize {
        self.lock_state().seats_available
    }

    /// Passengers currently blocked waiting for a seat. Snapshot only.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.lock_state().num_waiting
    }

    /// Passengers holding a claimed seat that have not yet reported
    /// completion. Snapshot only.
    #[must_use]
    pub fn boarding_count(&self) -> usize {
        self.lock_state().boarding
    }
}
