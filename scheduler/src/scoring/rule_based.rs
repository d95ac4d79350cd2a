//! Rule-based scorer
//!
//! Deterministic and dependency-free: success likelihood is a fixed
//! constant, duration comes from the category's nominal length, and match
//! quality comes straight from the specialty table. This is both a usable
//! scorer in its own right and the fail-closed fallback when a model-backed
//! scorer cannot produce a prediction.

use async_trait::async_trait;
use shared::ScoreTriple;

use crate::error::SchedulerResult;
use crate::scoring::specialty_match;
use crate::traits::{RequestFeatures, Scorer, SlotFeatures};

/// Fixed success likelihood used when no model is available
pub const FALLBACK_SUCCESS_LIKELIHOOD: f64 = 0.5;

#[derive(Clone, Debug, Default)]
pub struct RuleBasedScorer;

impl RuleBasedScorer {
    pub fn new() -> Self {
        Self
    }

    /// Infallible prediction, usable synchronously by the ranker's fallback
    /// path without going through the trait.
    pub fn score(&self, request: &RequestFeatures, slot: &SlotFeatures) -> ScoreTriple {
        ScoreTriple::new(
            FALLBACK_SUCCESS_LIKELIHOOD,
            request.category.base_duration_minutes(),
            specialty_match(slot.provider_specialty, request.category),
        )
    }
}

#[async_trait]
impl Scorer for RuleBasedScorer {
    async fn predict(
        &self,
        request: &RequestFeatures,
        slot: &SlotFeatures,
    ) -> SchedulerResult<ScoreTriple> {
        Ok(self.score(request, slot))
    }
}
