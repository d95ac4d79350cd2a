//! Conflict-safe reservation protocol
//!
//! Commits the highest-ranked candidate via the store's compare-and-set.
//! Losing a race is not an error: the caller transparently falls through to
//! the next-ranked candidate, up to a bounded number of attempts. Once the
//! bound or the list is exhausted the caller gets a terminal failure rather
//! than blocking.

use std::sync::Arc;

use chrono::Utc;
use shared::{BookingId, BookingStatus};
use tracing::{debug, info, warn};

use crate::error::{SchedulerError, SchedulerResult};
use crate::store::{BookingLedger, ReserveOutcome, SlotStore};
use crate::types::{AppointmentRequest, Booking, Candidate};

/// Default bound on reservation attempts under contention
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub struct ReservationProtocol {
    store: Arc<SlotStore>,
    ledger: Arc<BookingLedger>,
    max_attempts: u32,
}

impl ReservationProtocol {
    pub fn new(store: Arc<SlotStore>, ledger: Arc<BookingLedger>) -> Self {
        Self {
            store,
            ledger,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Walk the ranked list and commit the first candidate whose slot can be
    /// won. `filters` is the ranking filter summary, echoed when the list is
    /// exhausted without contention budget being the limiting factor.
    ///
    /// Reserve-then-confirm either fully completes or the slot is released;
    /// no failure leaves a slot stuck in Reserved.
    pub async fn commit(
        &self,
        request: &AppointmentRequest,
        ranked: &[Candidate],
        filters: &str,
    ) -> SchedulerResult<Booking> {
        let mut attempts = 0u32;

        for candidate in ranked {
            if attempts >= self.max_attempts {
                debug!(attempts, "reservation attempt budget exhausted");
                return Err(SchedulerError::ConflictLimitReached { attempts });
            }
            attempts += 1;

            let slot_id = candidate.slot.id;
            match self.store.reserve_if_version(&slot_id, candidate.slot.version)? {
                ReserveOutcome::Success => {
                    if let Err(e) = self.store.confirm(&slot_id) {
                        // Roll back the reservation so the slot is not stranded
                        if let Err(release_err) = self.store.release(&slot_id) {
                            warn!(
                                slot = %slot_id,
                                error = %release_err,
                                "rollback release failed; slot may stay reserved"
                            );
                        }
                        return Err(e);
                    }

                    let booking = Booking {
                        id: BookingId::new(),
                        request: request.clone(),
                        slot_id,
                        provider_id: candidate.slot.provider_id,
                        score: candidate.score,
                        status: BookingStatus::Confirmed,
                        booked_at: Utc::now(),
                    };
                    self.ledger.insert(booking.clone());
                    info!(
                        booking = %booking.id,
                        slot = %slot_id,
                        attempt = attempts,
                        "📅 Booking confirmed"
                    );
                    return Ok(booking);
                }
                outcome @ (ReserveOutcome::StaleVersion | ReserveOutcome::NotFree) => {
                    debug!(
                        slot = %slot_id,
                        ?outcome,
                        attempt = attempts,
                        "lost reservation race, advancing to next candidate"
                    );
                }
            }
        }

        if attempts >= self.max_attempts && !ranked.is_empty() {
            Err(SchedulerError::ConflictLimitReached { attempts })
        } else {
            Err(SchedulerError::NoAvailableSlot {
                filters: filters.to_string(),
            })
        }
    }
}
