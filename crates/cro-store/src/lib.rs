//! # cro-store
//!
//! Durable, bounded, ordered persistence of report records, scoped to one
//! client/device.
//!
//! The whole history lives in a single named slot (a JSON array, newest
//! first). Slots are pluggable through [`ReportSlot`]: [`FileSlot`] for real
//! use, [`MemorySlot`] for tests and non-durable operation.
//!
//! Persistence failures never reach callers of [`ReportStore`]. Reads of an
//! unreadable or corrupt slot yield an empty history; failed writes are logged
//! and reported as [`Durability::NonDurable`].

pub mod error;
pub mod slot;
mod store;

pub use error::StorageError;
pub use slot::{FileSlot, MemorySlot, ReportSlot};
pub use store::{Durability, ReportStore};
