//! # Slotbook Store
//!
//! The authoritative slot collection and the editor workflow built on it.
//!
//! ## Architecture
//!
//! - **Store**: a single task owns the collection and drains a bounded
//!   command queue, so every mutation (including bulk range replacement) runs
//!   to completion before the next one starts. Handles are cheap to clone.
//! - **Status**: a coarse `isLoading`/`error` pair for the whole collection,
//!   published on a watch channel.
//! - **Editor**: stateless single-slot intents with a confirmation gate in
//!   front of deletion.

pub mod editor;
pub mod status;
pub mod store;

pub use editor::{EditOutcome, PendingDeletion, SlotEditor, Surface};
pub use status::StoreStatus;
pub use store::{SlotStore, StoreConfig};
