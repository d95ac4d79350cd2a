//! Appointment scheduling core
//!
//! Assigns incoming appointment requests to provider-owned time slots using
//! a pluggable predictive scorer for ranking and an optimistic, per-slot
//! compare-and-set reservation protocol for conflict-safe commits. The
//! transport layer, natural-language front-end, and model training are all
//! external collaborators behind narrow interfaces.

pub mod bootstrap;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod rescheduling;
pub mod scoring;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use crate::core::{
    AnalyticsAggregator, AnalyticsSnapshot, CandidateRanker, RankWeights, Ranking,
    ReservationProtocol,
};
pub use error::{SchedulerError, SchedulerResult};
pub use orchestrator::{CancelOutcome, SchedulingOrchestrator, DEFAULT_RANK_LIMIT};
pub use rescheduling::ReschedulingEngine;
pub use scoring::{LinearModelScorer, ModelWeights, RuleBasedScorer};
pub use store::{BookingLedger, ReserveOutcome, SlotStatusCounts, SlotStore};
pub use traits::{MockScorer, RequestFeatures, Scorer, SlotFeatures};
pub use types::{
    AppointmentRequest, Booking, Candidate, EffectiveConstraints, Preferences, Provider, Slot,
};
