//! Rescheduling engine
//!
//! Published policy — commit-then-reschedule: the existing booking is
//! superseded and its slot released *before* the new scheduling attempt
//! runs. If that attempt fails, the original booking is NOT resurrected;
//! the caller receives the failure and holds no active booking. This
//! ordering trades caller-side risk for protocol simplicity and is part of
//! the API contract, not an implementation accident.

use std::sync::Arc;

use shared::{BookingId, BookingStatus};
use tracing::{info, warn};

use crate::error::{SchedulerError, SchedulerResult};
use crate::orchestrator::SchedulingOrchestrator;
use crate::store::{BookingLedger, MarkOutcome, SlotStore};
use crate::types::{Booking, Preferences};

pub struct ReschedulingEngine {
    orchestrator: Arc<SchedulingOrchestrator>,
    store: Arc<SlotStore>,
    ledger: Arc<BookingLedger>,
}

impl ReschedulingEngine {
    pub fn new(orchestrator: Arc<SchedulingOrchestrator>) -> Self {
        Self {
            store: Arc::clone(orchestrator.store()),
            ledger: Arc::clone(orchestrator.ledger()),
            orchestrator,
        }
    }

    /// Atomically release the existing booking and re-run scheduling with
    /// the original request merged with `new_preferences`.
    ///
    /// See the module-level policy note: a failed re-scheduling attempt
    /// leaves the caller without an active booking.
    pub async fn reschedule(
        &self,
        booking_id: BookingId,
        new_preferences: Preferences,
    ) -> SchedulerResult<Booking> {
        let booking = self
            .ledger
            .get(&booking_id)
            .ok_or(SchedulerError::BookingNotFound { booking_id })?;

        let superseded =
            match self.ledger.mark_inactive(&booking_id, BookingStatus::Superseded)? {
                MarkOutcome::Updated(booking) => booking,
                MarkOutcome::AlreadyInactive(status) => {
                    return Err(SchedulerError::BookingNotActive { booking_id, status });
                }
            };
        self.store.release(&superseded.slot_id)?;
        info!(
            booking = %booking_id,
            slot = %superseded.slot_id,
            "🔁 Booking superseded, re-running scheduling"
        );

        match self
            .orchestrator
            .schedule_appointment(booking.request.clone(), Some(new_preferences))
            .await
        {
            Ok(new_booking) => {
                info!(old = %booking_id, new = %new_booking.id, "✅ Rescheduled");
                Ok(new_booking)
            }
            Err(e) => {
                warn!(
                    booking = %booking_id,
                    error = %e,
                    "reschedule failed; original booking stays superseded per policy"
                );
                Err(e)
            }
        }
    }
}
