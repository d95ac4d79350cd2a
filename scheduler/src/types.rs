//! Domain records for the scheduling core
//!
//! These are the persisted shapes: the provider roster, the slot inventory,
//! incoming requests, and committed bookings. The `version` field on `Slot`
//! and the status enums are load-bearing for correctness and must survive
//! serialization verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    AppointmentCategory, BookingId, BookingStatus, ProviderId, ScoreTriple, SlotId, SlotStatus,
    Specialty, TimeWindow, Urgency,
};

/// A service provider owning bookable slots
///
/// Immutable except `current_load`, which the slot store adjusts on
/// reserve/release.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub specialty: Specialty,
    pub experience_years: u32,
    pub working_hours: TimeWindow,
    pub current_load: u32,
}

impl Provider {
    pub fn new(name: impl Into<String>, specialty: Specialty, experience_years: u32) -> Self {
        Self {
            id: ProviderId::new(),
            name: name.into(),
            specialty,
            experience_years,
            working_hours: TimeWindow::new(9, 17),
            current_load: 0,
        }
    }
}

/// A single bookable time interval owned by one provider
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub provider_id: ProviderId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: SlotStatus,
    /// Monotonically increasing; every status transition bumps it. This is
    /// the compare-and-set token for optimistic concurrency.
    pub version: u64,
}

impl Slot {
    pub fn new(provider_id: ProviderId, start: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            id: SlotId::new(),
            provider_id,
            start,
            end: start + chrono::Duration::minutes(duration_minutes),
            status: SlotStatus::Free,
            version: 0,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An incoming appointment request
///
/// Immutable once submitted; the orchestrator consumes it, never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub requester_name: String,
    /// The subject of the appointment (e.g. the pet)
    pub subject_name: String,
    pub subject_species: String,
    pub category: AppointmentCategory,
    pub urgency: Urgency,
    pub preferred_provider: Option<ProviderId>,
    pub preferred_window: Option<TimeWindow>,
    pub notes: Option<String>,
}

impl AppointmentRequest {
    pub fn new(
        requester_name: impl Into<String>,
        subject_name: impl Into<String>,
        subject_species: impl Into<String>,
        category: AppointmentCategory,
        urgency: Urgency,
    ) -> Self {
        Self {
            requester_name: requester_name.into(),
            subject_name: subject_name.into(),
            subject_species: subject_species.into(),
            category,
            urgency,
            preferred_provider: None,
            preferred_window: None,
            notes: None,
        }
    }

    pub fn with_preferred_provider(mut self, provider_id: ProviderId) -> Self {
        self.preferred_provider = Some(provider_id);
        self
    }

    pub fn with_preferred_window(mut self, window: TimeWindow) -> Self {
        self.preferred_window = Some(window);
        self
    }
}

/// Caller preferences applied on top of a request, used by scheduling and
/// rescheduling. A field set here overrides the corresponding request field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub preferred_provider: Option<ProviderId>,
    pub preferred_window: Option<TimeWindow>,
    pub preferred_dates: Option<Vec<NaiveDate>>,
}

impl Preferences {
    /// Effective constraints for a request with these preferences layered on
    pub fn merge(&self, request: &AppointmentRequest) -> EffectiveConstraints {
        EffectiveConstraints {
            preferred_provider: self.preferred_provider.or(request.preferred_provider),
            preferred_window: self.preferred_window.or(request.preferred_window),
            preferred_dates: self.preferred_dates.clone(),
        }
    }
}

/// Fully resolved preference constraints for one scheduling run
#[derive(Clone, Debug, Default)]
pub struct EffectiveConstraints {
    pub preferred_provider: Option<ProviderId>,
    pub preferred_window: Option<TimeWindow>,
    pub preferred_dates: Option<Vec<NaiveDate>>,
}

/// A scored (request, slot) pairing produced during ranking
///
/// Ephemeral: candidates exist only between ranking and reservation and are
/// never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub slot: Slot,
    /// Provider load at ranking time, used in the tie-break chain
    pub provider_load: u32,
    pub score: ScoreTriple,
    /// 1.0 when the slot matched a caller preference, 0.0 otherwise
    pub preference_bonus: f64,
    /// Composite rank score; higher ranks first
    pub rank_score: f64,
}

/// A committed appointment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub request: AppointmentRequest,
    pub slot_id: SlotId,
    pub provider_id: ProviderId,
    /// Score triple at commit time, kept so callers can explain "why this
    /// slot" after the fact
    pub score: ScoreTriple,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}
