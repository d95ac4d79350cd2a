//! Core scheduling pipeline components
//!
//! `CandidateRanker` turns a request into an ordered candidate list,
//! `ReservationProtocol` commits exactly one candidate under contention, and
//! `AnalyticsAggregator` reads booking history outside the critical path.

pub mod analytics;
pub mod ranker;
pub mod reservation;

pub use analytics::{AnalyticsAggregator, AnalyticsSnapshot};
pub use ranker::{CandidateRanker, RankWeights, Ranking};
pub use reservation::ReservationProtocol;
