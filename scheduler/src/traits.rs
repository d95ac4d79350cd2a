//! Trait definitions with mockall annotations for testing
//!
//! The scorer is the single pluggable seam in the system: the ranking
//! pipeline depends on this interface, never on a concrete model. Mocks are
//! generated for dependency injection in tests.

use chrono::{DateTime, Datelike, Timelike, Utc};
use shared::{AppointmentCategory, ScoreTriple, Specialty, Urgency};

use crate::error::SchedulerResult;
use crate::types::{AppointmentRequest, Provider, Slot};

/// Request-side features fed to a scorer
#[derive(Clone, Debug, PartialEq)]
pub struct RequestFeatures {
    pub category: AppointmentCategory,
    pub urgency: Urgency,
    pub subject_species: String,
}

impl RequestFeatures {
    pub fn from_request(request: &AppointmentRequest) -> Self {
        Self {
            category: request.category,
            urgency: request.urgency,
            subject_species: request.subject_species.clone(),
        }
    }
}

/// Slot-side features fed to a scorer
#[derive(Clone, Debug, PartialEq)]
pub struct SlotFeatures {
    pub provider_specialty: Specialty,
    pub provider_experience_years: u32,
    pub provider_load: u32,
    pub day_of_week: u32,
    pub hour_of_day: u32,
    pub month: u32,
    pub is_weekend: bool,
}

impl SlotFeatures {
    pub fn from_slot(slot: &Slot, provider: &Provider) -> Self {
        Self::from_parts(&slot.start, provider)
    }

    pub fn from_parts(start: &DateTime<Utc>, provider: &Provider) -> Self {
        let weekday = start.weekday().num_days_from_monday();
        Self {
            provider_specialty: provider.specialty,
            provider_experience_years: provider.experience_years,
            provider_load: provider.current_load,
            day_of_week: weekday,
            hour_of_day: start.hour(),
            month: start.month(),
            is_weekend: weekday >= 5,
        }
    }
}

/// Predictive scorer abstraction for candidate ranking
///
/// Implementations must be safe to call once per candidate, concurrently,
/// with no shared mutable state. A scorer that cannot produce a prediction
/// returns an error; the ranker recovers locally with a rule-based fallback
/// and never surfaces the failure to the caller.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Scorer: Send + Sync {
    /// Predict success likelihood, duration, and match quality for one
    /// (request, slot) pairing
    async fn predict(
        &self,
        request: &RequestFeatures,
        slot: &SlotFeatures,
    ) -> SchedulerResult<ScoreTriple>;
}
