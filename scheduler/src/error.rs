//! Scheduler-specific error types
//!
//! Every failure a caller can receive is a distinct variant so callers and
//! metrics can tell "nothing existed" (`NoAvailableSlot`) apart from "lost
//! every race" (`ConflictLimitReached`).

use shared::{BookingId, BookingStatus, SharedError, SlotId, SlotStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("No available slot matched the applied filters: {filters}")]
    NoAvailableSlot { filters: String },

    #[error("Reservation retries exhausted after {attempts} attempts")]
    ConflictLimitReached { attempts: u32 },

    #[error("Slot not found: {slot_id}")]
    SlotNotFound { slot_id: SlotId },

    #[error("Booking not found: {booking_id}")]
    BookingNotFound { booking_id: BookingId },

    #[error("Booking {booking_id} is {status:?}, expected Confirmed")]
    BookingNotActive {
        booking_id: BookingId,
        status: BookingStatus,
    },

    #[error("Illegal slot transition for {slot_id}: {from:?} -> {to:?}")]
    IllegalSlotTransition {
        slot_id: SlotId,
        from: SlotStatus,
        to: SlotStatus,
    },

    #[error("Scorer unavailable: {message}")]
    ScorerUnavailable { message: String },

    #[error("Model artifact error: {message}")]
    ModelArtifactError { message: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
