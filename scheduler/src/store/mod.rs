//! Canonical state stores
//!
//! `SlotStore` owns the slot inventory and provider roster; `BookingLedger`
//! owns booking records. No other component mutates slot status directly.

pub mod bookings;
pub mod slot_store;

pub use bookings::{BookingLedger, MarkOutcome};
pub use slot_store::{ReserveOutcome, SlotStatusCounts, SlotStore};
