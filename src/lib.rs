//! Concourse: in-process rendezvous coordinators.
//!
//! This crate provides two independent blocking synchronization primitives,
//! each a self-contained concurrent monitor:
//!
//! - [`Station`]: coordinates one vehicle per loading episode with
//!   zero-or-more passengers, enforcing a capacity limit and a two-sided
//!   completion barrier before the vehicle departs.
//! - [`PairingHub`]: matches arriving parties two at a time based on a
//!   symmetric compatibility key, using a fixed grid of FIFO wait-queues
//!   indexed by (declared key, wanted key).
//!
//! The two coordinators share no state. Both are pure in-process primitives:
//! no I/O, no persistence, no network surface. Callers invoke the blocking
//! operations from independent threads; every wait releases the coordinator's
//! lock while parked and re-verifies its condition in a loop on wake
//! (standard monitor semantics, so spurious or coalesced wakeups are
//! harmless).
//!
//! # Blocking Discipline
//!
//! All blocking operations are uninterruptible: once issued, a call runs to
//! completion. There is no cancellation or timeout surface. A caller whose
//! rendezvous condition never arrives blocks indefinitely; that is contract
//! behavior, not a fault. Adaptations that need cancellable waits must add
//! them at the call boundary.
//!
//! # Module Structure
//!
//! - [`station`]: vehicle/passenger boarding rendezvous
//! - [`pairing`]: symmetric two-party key matching
//! - [`test_utils`]: logging initialization and assertion macros shared by
//!   the crate's unit and integration tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]

pub mod pairing;
pub mod station;
pub mod test_utils;

pub use pairing::PairingHub;
pub use station::Station;
