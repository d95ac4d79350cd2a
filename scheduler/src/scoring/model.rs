//! Learned-model-backed scorer
//!
//! Loads a JSON weight artifact once at construction and holds it read-only
//! for the process lifetime; there is no mutable model registry and no
//! runtime reloading. The artifact is produced by an external training
//! pipeline, which is out of scope here.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::ScoreTriple;
use tracing::info;

use crate::error::{SchedulerError, SchedulerResult};
use crate::scoring::specialty_match;
use crate::traits::{RequestFeatures, Scorer, SlotFeatures};

/// Serialized model parameters.
///
/// Success likelihood is a logistic over normalized features; duration is a
/// linear adjustment around the category's nominal length.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelWeights {
    pub success_bias: f64,
    pub success_experience: f64,
    pub success_specialty_match: f64,
    pub success_urgency: f64,
    pub success_weekend_penalty: f64,
    pub success_afternoon_penalty: f64,
    pub duration_category_scale: f64,
    pub duration_experience: f64,
    pub duration_urgency: f64,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            success_bias: 0.4,
            success_experience: 1.2,
            success_specialty_match: 1.5,
            success_urgency: 0.6,
            success_weekend_penalty: 0.5,
            success_afternoon_penalty: 0.3,
            duration_category_scale: 1.0,
            duration_experience: -6.0,
            duration_urgency: 10.0,
        }
    }
}

pub struct LinearModelScorer {
    weights: ModelWeights,
}

impl LinearModelScorer {
    pub fn new(weights: ModelWeights) -> Self {
        Self { weights }
    }

    /// Construct from an external artifact path. Called once at process
    /// start; a missing or malformed artifact fails construction, not
    /// scheduling.
    pub fn from_artifact(path: &Path) -> SchedulerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| SchedulerError::ModelArtifactError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let weights: ModelWeights =
            serde_json::from_str(&raw).map_err(|e| SchedulerError::ModelArtifactError {
                message: format!("malformed weights in {}: {e}", path.display()),
            })?;
        info!(artifact = %path.display(), "📦 Loaded scoring model artifact");
        Ok(Self::new(weights))
    }

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
}

#[async_trait]
impl Scorer for LinearModelScorer {
    async fn predict(
        &self,
        request: &RequestFeatures,
        slot: &SlotFeatures,
    ) -> SchedulerResult<ScoreTriple> {
        let w = &self.weights;
        let match_quality = specialty_match(slot.provider_specialty, request.category);
        let experience_norm = (slot.provider_experience_years as f64 / 20.0).min(1.0);
        // Hours far from noon lower the success logit slightly
        let afternoon_drift = ((slot.hour_of_day as f64) - 12.0).abs() / 12.0;

        let logit = w.success_bias
            + w.success_experience * experience_norm
            + w.success_specialty_match * match_quality
            + w.success_urgency * request.urgency.score()
            - w.success_weekend_penalty * (slot.is_weekend as u8 as f64)
            - w.success_afternoon_penalty * afternoon_drift;

        let duration = request.category.base_duration_minutes() * w.duration_category_scale
            + w.duration_experience * experience_norm
            + w.duration_urgency * request.urgency.score();

        Ok(ScoreTriple::new(Self::sigmoid(logit), duration, match_quality))
    }
}
