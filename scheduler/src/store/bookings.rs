//! Booking ledger
//!
//! Append-mostly record of every committed booking. Status changes are
//! single idempotent transitions; a booking that already left Confirmed
//! stays where it is.

use dashmap::DashMap;
use shared::{BookingId, BookingStatus};

use crate::error::{SchedulerError, SchedulerResult};
use crate::types::Booking;

/// Result of marking a booking Cancelled or Superseded
#[derive(Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    /// Booking left Confirmed; the returned copy carries the new status
    Updated(Booking),
    /// Booking was already Cancelled or Superseded; nothing changed
    AlreadyInactive(BookingStatus),
}

pub struct BookingLedger {
    bookings: DashMap<BookingId, Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }

    pub fn insert(&self, booking: Booking) {
        self.bookings.insert(booking.id, booking);
    }

    pub fn get(&self, booking_id: &BookingId) -> Option<Booking> {
        self.bookings.get(booking_id).map(|entry| entry.clone())
    }

    /// Atomically move a Confirmed booking to `status` (Cancelled or
    /// Superseded). Idempotent: re-marking an inactive booking reports
    /// `AlreadyInactive` instead of failing.
    pub fn mark_inactive(
        &self,
        booking_id: &BookingId,
        status: BookingStatus,
    ) -> SchedulerResult<MarkOutcome> {
        let mut entry = self
            .bookings
            .get_mut(booking_id)
            .ok_or(SchedulerError::BookingNotFound {
                booking_id: *booking_id,
            })?;

        if entry.status != BookingStatus::Confirmed {
            return Ok(MarkOutcome::AlreadyInactive(entry.status));
        }
        entry.status = status;
        Ok(MarkOutcome::Updated(entry.clone()))
    }

    /// Eventually-consistent snapshot of all bookings; safe to call while
    /// bookings are being created concurrently.
    pub fn snapshot(&self) -> Vec<Booking> {
        self.bookings.iter().map(|entry| entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppointmentRequest;
    use chrono::Utc;
    use shared::{AppointmentCategory, ProviderId, ScoreTriple, SlotId, Urgency};

    fn sample_booking() -> Booking {
        Booking {
            id: BookingId::new(),
            request: AppointmentRequest::new(
                "Jane Doe",
                "Buddy",
                "Dog",
                AppointmentCategory::Checkup,
                Urgency::Medium,
            ),
            slot_id: SlotId::new(),
            provider_id: ProviderId::new(),
            score: ScoreTriple::new(0.8, 30.0, 0.9),
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        }
    }

    #[test]
    fn test_mark_inactive_is_idempotent() {
        let ledger = BookingLedger::new();
        let booking = sample_booking();
        let id = booking.id;
        ledger.insert(booking);

        let first = ledger.mark_inactive(&id, BookingStatus::Cancelled).unwrap();
        assert!(matches!(first, MarkOutcome::Updated(_)));

        let second = ledger.mark_inactive(&id, BookingStatus::Cancelled).unwrap();
        assert_eq!(
            second,
            MarkOutcome::AlreadyInactive(BookingStatus::Cancelled)
        );
    }

    #[test]
    fn test_updated_outcome_carries_the_new_status() {
        let ledger = BookingLedger::new();
        let booking = sample_booking();
        let id = booking.id;
        ledger.insert(booking.clone());

        let mut expected = booking;
        expected.status = BookingStatus::Superseded;
        assert_eq!(
            ledger.mark_inactive(&id, BookingStatus::Superseded).unwrap(),
            MarkOutcome::Updated(expected)
        );
    }

    #[test]
    fn test_unknown_booking_is_not_found() {
        let ledger = BookingLedger::new();
        assert!(matches!(
            ledger.mark_inactive(&BookingId::new(), BookingStatus::Cancelled),
            Err(SchedulerError::BookingNotFound { .. })
        ));
    }
}
