//! Top-level scheduling orchestrator
//!
//! Drives one request through the pipeline state machine:
//!
//! ```text
//! Received -> Validated -> Ranked -> Reserved -> Confirmed
//! ```
//!
//! with terminal failures `Rejected(InvalidRequest)`,
//! `Exhausted(NoAvailableSlot)`, and `Exhausted(ConflictLimitReached)`.
//! Any number of callers may invoke `schedule_appointment` concurrently;
//! the only serialization point is the slot store's compare-and-set.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use shared::{BookingId, BookingStatus};
use tracing::{debug, info};

use crate::core::{CandidateRanker, Ranking, ReservationProtocol};
use crate::error::{SchedulerError, SchedulerResult};
use crate::store::{BookingLedger, MarkOutcome, SlotStore};
use crate::traits::Scorer;
use crate::types::{AppointmentRequest, Booking, Candidate, EffectiveConstraints, Preferences};

/// Ranked-list cap when scheduling; enough fallback depth for the
/// reservation protocol's attempt budget plus headroom.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Pipeline position of a request, logged at every transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PipelineState {
    Received,
    Validated,
    Ranked,
    Reserved,
    Confirmed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Received => "received",
            PipelineState::Validated => "validated",
            PipelineState::Ranked => "ranked",
            PipelineState::Reserved => "reserved",
            PipelineState::Confirmed => "confirmed",
        };
        write!(f, "{name}")
    }
}

fn transition(from: PipelineState, to: PipelineState) -> PipelineState {
    debug!(%from, %to, "pipeline transition");
    to
}

/// Result of an explicit cancellation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The booking was already Cancelled or Superseded; no-op
    AlreadyCancelled,
}

pub struct SchedulingOrchestrator {
    store: Arc<SlotStore>,
    ledger: Arc<BookingLedger>,
    ranker: CandidateRanker,
    reservation: ReservationProtocol,
}

impl SchedulingOrchestrator {
    pub fn new(store: Arc<SlotStore>, scorer: Arc<dyn Scorer>) -> Self {
        let ledger = Arc::new(BookingLedger::new());
        Self::with_ledger(store, scorer, ledger)
    }

    pub fn with_ledger(
        store: Arc<SlotStore>,
        scorer: Arc<dyn Scorer>,
        ledger: Arc<BookingLedger>,
    ) -> Self {
        Self {
            ranker: CandidateRanker::new(Arc::clone(&store), scorer),
            reservation: ReservationProtocol::new(Arc::clone(&store), Arc::clone(&ledger)),
            store,
            ledger,
        }
    }

    pub fn store(&self) -> &Arc<SlotStore> {
        &self.store
    }

    pub fn ledger(&self) -> &Arc<BookingLedger> {
        &self.ledger
    }

    /// Validate, rank, and commit one request to exactly one slot.
    ///
    /// On success the returned booking carries the score triple at commit
    /// time so callers can explain why the slot was chosen.
    pub async fn schedule_appointment(
        &self,
        request: AppointmentRequest,
        preferences: Option<Preferences>,
    ) -> SchedulerResult<Booking> {
        let mut state = PipelineState::Received;

        let constraints = preferences
            .as_ref()
            .map(|p| p.merge(&request))
            .unwrap_or_else(|| Preferences::default().merge(&request));

        validate(&request, &constraints)?;
        state = transition(state, PipelineState::Validated);

        let Ranking { candidates, filters } = self
            .ranker
            .rank(&request, &constraints, DEFAULT_RANK_LIMIT, Utc::now())
            .await?;
        state = transition(state, PipelineState::Ranked);

        if candidates.is_empty() {
            debug!(%filters, "no candidates matched");
            return Err(SchedulerError::NoAvailableSlot { filters });
        }

        let booking = self
            .reservation
            .commit(&request, &candidates, &filters)
            .await?;
        state = transition(state, PipelineState::Reserved);
        state = transition(state, PipelineState::Confirmed);

        info!(
            booking = %booking.id,
            provider = %booking.provider_id,
            success_likelihood = booking.score.success_likelihood,
            match_quality = booking.score.match_quality,
            "✅ Appointment scheduled ({state})"
        );
        Ok(booking)
    }

    /// Ranked preview: runs the pipeline only through Ranked and never
    /// mutates slot store state. An empty result is an empty list, not an
    /// error.
    pub async fn get_schedule_recommendations(
        &self,
        request: AppointmentRequest,
        count: usize,
    ) -> SchedulerResult<Vec<Candidate>> {
        let constraints = Preferences::default().merge(&request);
        validate(&request, &constraints)?;
        let ranking = self
            .ranker
            .rank(&request, &constraints, count, Utc::now())
            .await?;
        Ok(ranking.candidates)
    }

    /// Cancel a booking and return its slot to Free. Idempotent: cancelling
    /// an already-inactive booking is a no-op, not an error.
    pub async fn cancel_appointment(&self, booking_id: BookingId) -> SchedulerResult<CancelOutcome> {
        match self.ledger.mark_inactive(&booking_id, BookingStatus::Cancelled)? {
            MarkOutcome::Updated(booking) => {
                self.store.release(&booking.slot_id)?;
                info!(booking = %booking_id, slot = %booking.slot_id, "🗑️ Booking cancelled");
                Ok(CancelOutcome::Cancelled)
            }
            MarkOutcome::AlreadyInactive(status) => {
                debug!(booking = %booking_id, ?status, "cancel is a no-op");
                Ok(CancelOutcome::AlreadyCancelled)
            }
        }
    }
}

/// Structural validation; failures terminate the pipeline in Rejected
fn validate(request: &AppointmentRequest, constraints: &EffectiveConstraints) -> SchedulerResult<()> {
    if request.requester_name.trim().is_empty() {
        return Err(SchedulerError::InvalidRequest {
            reason: "requester name is required".to_string(),
        });
    }
    if request.subject_name.trim().is_empty() {
        return Err(SchedulerError::InvalidRequest {
            reason: "subject name is required".to_string(),
        });
    }
    if request.subject_species.trim().is_empty() {
        return Err(SchedulerError::InvalidRequest {
            reason: "subject species is required".to_string(),
        });
    }
    if let Some(window) = &constraints.preferred_window {
        if !window.is_valid() {
            return Err(SchedulerError::InvalidRequest {
                reason: format!(
                    "preferred window {}..{} is not a valid hour range",
                    window.start_hour, window.end_hour
                ),
            });
        }
    }
    if let Some(dates) = &constraints.preferred_dates {
        if dates.is_empty() {
            return Err(SchedulerError::InvalidRequest {
                reason: "preferred dates list is empty".to_string(),
            });
        }
    }
    Ok(())
}
