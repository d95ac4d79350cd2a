//! Read-only analytics over booking history
//!
//! Aggregates eventually-consistent snapshots; it never writes to the slot
//! store and never blocks booking creation. Observed-outcome feedback is
//! optional and supplied by external callers.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use shared::{BookingId, BookingStatus};

use crate::error::{SchedulerError, SchedulerResult};
use crate::store::{BookingLedger, SlotStatusCounts, SlotStore};

/// Externally observed outcome for a confirmed booking
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ObservedOutcome {
    pub actual_duration_minutes: f64,
}

/// Point-in-time aggregate metrics
#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub total_bookings: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub superseded: usize,
    /// Confirmed / all bookings ever attempted
    pub success_rate: f64,
    pub provider_load: HashMap<String, u32>,
    pub provider_booking_counts: HashMap<String, usize>,
    pub category_distribution: HashMap<String, usize>,
    pub urgency_distribution: HashMap<String, usize>,
    pub average_estimated_duration_minutes: f64,
    /// Mean |estimated - observed| over bookings with reported outcomes
    pub mean_duration_error_minutes: Option<f64>,
    pub slot_counts: SlotStatusCounts,
}

pub struct AnalyticsAggregator {
    store: Arc<SlotStore>,
    ledger: Arc<BookingLedger>,
    outcomes: DashMap<BookingId, ObservedOutcome>,
}

impl AnalyticsAggregator {
    pub fn new(store: Arc<SlotStore>, ledger: Arc<BookingLedger>) -> Self {
        Self {
            store,
            ledger,
            outcomes: DashMap::new(),
        }
    }

    /// Ingest an observed outcome for a Confirmed booking
    pub fn record_outcome(
        &self,
        booking_id: BookingId,
        actual_duration_minutes: f64,
    ) -> SchedulerResult<()> {
        let booking = self
            .ledger
            .get(&booking_id)
            .ok_or(SchedulerError::BookingNotFound { booking_id })?;
        if booking.status != BookingStatus::Confirmed {
            return Err(SchedulerError::BookingNotActive {
                booking_id,
                status: booking.status,
            });
        }
        self.outcomes.insert(
            booking_id,
            ObservedOutcome {
                actual_duration_minutes,
            },
        );
        Ok(())
    }

    pub fn snapshot(&self) -> AnalyticsSnapshot {
        let bookings = self.ledger.snapshot();
        let total = bookings.len();

        let mut confirmed = 0;
        let mut cancelled = 0;
        let mut superseded = 0;
        let mut provider_booking_counts: HashMap<String, usize> = HashMap::new();
        let mut category_distribution: HashMap<String, usize> = HashMap::new();
        let mut urgency_distribution: HashMap<String, usize> = HashMap::new();
        let mut estimated_sum = 0.0;
        let mut error_sum = 0.0;
        let mut error_count = 0usize;

        for booking in &bookings {
            match booking.status {
                BookingStatus::Confirmed => confirmed += 1,
                BookingStatus::Cancelled => cancelled += 1,
                BookingStatus::Superseded => superseded += 1,
            }
            *provider_booking_counts
                .entry(booking.provider_id.to_string())
                .or_default() += 1;
            *category_distribution
                .entry(booking.request.category.to_string())
                .or_default() += 1;
            *urgency_distribution
                .entry(booking.request.urgency.to_string())
                .or_default() += 1;
            estimated_sum += booking.score.estimated_duration_minutes;

            if let Some(outcome) = self.outcomes.get(&booking.id) {
                error_sum +=
                    (booking.score.estimated_duration_minutes - outcome.actual_duration_minutes).abs();
                error_count += 1;
            }
        }

        let provider_load = self
            .store
            .providers_snapshot()
            .into_iter()
            .map(|p| (p.id.to_string(), p.current_load))
            .collect();

        AnalyticsSnapshot {
            generated_at: Utc::now(),
            total_bookings: total,
            confirmed,
            cancelled,
            superseded,
            success_rate: if total > 0 {
                confirmed as f64 / total as f64
            } else {
                0.0
            },
            provider_load,
            provider_booking_counts,
            category_distribution,
            urgency_distribution,
            average_estimated_duration_minutes: if total > 0 {
                estimated_sum / total as f64
            } else {
                0.0
            },
            mean_duration_error_minutes: if error_count > 0 {
                Some(error_sum / error_count as f64)
            } else {
                None
            },
            slot_counts: self.store.status_counts(),
        }
    }
}
