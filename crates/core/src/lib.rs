//! # Slotbook Core
//!
//! Domain types and pure algorithms for the doctor availability engine:
//! time slots and their deterministic identity, bulk range scheduling,
//! the calendar projection and the shared error taxonomy.
//!
//! Nothing in this crate performs I/O. The store and backing layers live in
//! `slotbook-store` and `slotbook-db`.

pub mod calendar;
pub mod errors;
pub mod models;
pub mod scheduler;
pub mod seed;
