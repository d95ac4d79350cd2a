//! Candidate enumeration and ranking
//!
//! Enumerates Free slots matching the request's constraints, scores each one
//! exactly once through the pluggable scorer, and produces a deterministic
//! ordering. No randomness anywhere: identical inputs and scorer outputs
//! yield the identical candidate sequence, which the tests rely on.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;
use shared::Urgency;
use tracing::{debug, warn};

use crate::error::SchedulerResult;
use crate::scoring::{specialty_compatible, RuleBasedScorer};
use crate::store::SlotStore;
use crate::traits::{RequestFeatures, Scorer, SlotFeatures};
use crate::types::{AppointmentRequest, Candidate, EffectiveConstraints, Provider, Slot};

/// Fixed weights of the composite rank score
#[derive(Clone, Copy, Debug)]
pub struct RankWeights {
    pub success: f64,
    pub duration: f64,
    pub match_quality: f64,
    pub preference: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            success: 0.4,
            duration: 0.2,
            match_quality: 0.3,
            preference: 0.1,
        }
    }
}

/// Ranked candidates plus a human-readable summary of the filters that were
/// applied, surfaced with `NoAvailableSlot` to aid diagnosis.
#[derive(Clone, Debug)]
pub struct Ranking {
    pub candidates: Vec<Candidate>,
    pub filters: String,
}

pub struct CandidateRanker {
    store: Arc<SlotStore>,
    scorer: Arc<dyn Scorer>,
    fallback: RuleBasedScorer,
    weights: RankWeights,
}

impl CandidateRanker {
    pub fn new(store: Arc<SlotStore>, scorer: Arc<dyn Scorer>) -> Self {
        Self {
            store,
            scorer,
            fallback: RuleBasedScorer::new(),
            weights: RankWeights::default(),
        }
    }

    /// How far ahead of `now` candidates may start. Emergencies look at the
    /// next day only; low urgency searches the whole inventory horizon.
    pub fn lookahead(urgency: Urgency) -> Duration {
        match urgency {
            Urgency::Emergency => Duration::hours(24),
            Urgency::High => Duration::hours(72),
            Urgency::Medium => Duration::days(14),
            Urgency::Low => Duration::days(30),
        }
    }

    /// Rank candidate slots for `request` under `constraints`, capped at
    /// `limit`. Side-effect free: neither the store nor the scorer state is
    /// mutated.
    pub async fn rank(
        &self,
        request: &AppointmentRequest,
        constraints: &EffectiveConstraints,
        limit: usize,
        now: DateTime<Utc>,
    ) -> SchedulerResult<Ranking> {
        let horizon = Self::lookahead(request.urgency);
        let min_duration = request.category.base_duration_minutes().min(30.0) as i64;
        let filters = describe_filters(request, constraints, horizon, min_duration);

        let free = self.store.list_free(
            constraints.preferred_provider,
            (now, now + horizon),
            min_duration,
        );

        // Resolve providers and drop incompatible or preference-excluded slots
        let mut eligible: Vec<(Slot, Provider)> = Vec::with_capacity(free.len());
        for slot in free {
            let Some(provider) = self.store.get_provider(&slot.provider_id) else {
                continue;
            };
            if !specialty_compatible(provider.specialty, request.category) {
                continue;
            }
            if let Some(window) = &constraints.preferred_window {
                if !window.contains(&slot.start) {
                    continue;
                }
            }
            if let Some(dates) = &constraints.preferred_dates {
                if !dates.contains(&slot.start.date_naive()) {
                    continue;
                }
            }
            eligible.push((slot, provider));
        }

        debug!(
            eligible = eligible.len(),
            urgency = %request.urgency,
            "enumerated candidate slots"
        );

        // Score every candidate exactly once, in parallel
        let request_features = RequestFeatures::from_request(request);
        let scored = join_all(eligible.into_iter().map(|(slot, provider)| {
            let request_features = request_features.clone();
            async move {
                let slot_features = SlotFeatures::from_slot(&slot, &provider);
                let score = match self.scorer.predict(&request_features, &slot_features).await {
                    Ok(triple) => triple,
                    Err(e) => {
                        warn!(error = %e, slot = %slot.id, "scorer unavailable, using rule-based fallback");
                        self.fallback.score(&request_features, &slot_features)
                    }
                };
                (slot, provider, score)
            }
        }))
        .await;

        let mut candidates: Vec<Candidate> = scored
            .into_iter()
            .map(|(slot, provider, score)| {
                let preference_bonus = preference_bonus(&slot, constraints);
                let rank_score = self.weights.success * score.success_likelihood
                    - self.weights.duration
                        * (score.estimated_duration_minutes / shared::ScoreTriple::MAX_DURATION_MINUTES)
                    + self.weights.match_quality * score.match_quality
                    + self.weights.preference * preference_bonus;
                Candidate {
                    slot,
                    provider_load: provider.current_load,
                    score,
                    preference_bonus,
                    rank_score,
                }
            })
            .collect();

        candidates.sort_by(compare_candidates);
        candidates.truncate(limit);

        Ok(Ranking { candidates, filters })
    }
}

/// Total order over candidates: rank score, then the fixed tie-break chain
/// (higher success likelihood, earlier start, lower provider load, slot id).
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.rank_score
        .partial_cmp(&a.rank_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            b.score
                .success_likelihood
                .partial_cmp(&a.score.success_likelihood)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.slot.start.cmp(&b.slot.start))
        .then_with(|| a.provider_load.cmp(&b.provider_load))
        .then_with(|| a.slot.id.cmp(&b.slot.id))
}

fn preference_bonus(slot: &Slot, constraints: &EffectiveConstraints) -> f64 {
    let provider_match = constraints
        .preferred_provider
        .map_or(false, |p| slot.provider_id == p);
    let window_match = constraints
        .preferred_window
        .map_or(false, |w| w.contains(&slot.start));
    if provider_match || window_match {
        1.0
    } else {
        0.0
    }
}

fn describe_filters(
    request: &AppointmentRequest,
    constraints: &EffectiveConstraints,
    horizon: Duration,
    min_duration: i64,
) -> String {
    let provider = constraints
        .preferred_provider
        .map(|p| p.to_string())
        .unwrap_or_else(|| "any".to_string());
    let window = constraints
        .preferred_window
        .map(|w| format!("{:02}:00-{:02}:00", w.start_hour, w.end_hour))
        .unwrap_or_else(|| "any".to_string());
    let dates = constraints
        .preferred_dates
        .as_ref()
        .map(|d| format!("{} date(s)", d.len()))
        .unwrap_or_else(|| "any".to_string());
    format!(
        "category={}, urgency={}, lookahead={}h, provider={}, window={}, dates={}, min_duration={}min",
        request.category,
        request.urgency,
        horizon.num_hours(),
        provider,
        window,
        dates,
        min_duration
    )
}
