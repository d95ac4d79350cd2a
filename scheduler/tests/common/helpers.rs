//! Test helpers and builder patterns for scheduler tests

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use scheduler::{
    Provider, RuleBasedScorer, SchedulingOrchestrator, Scorer, Slot, SlotStore,
};
use shared::{ProviderId, SlotId};

/// Builder for a seeded store plus orchestrator with sensible defaults
/// (rule-based scorer, no slots).
pub struct SchedulerBuilder {
    store: Arc<SlotStore>,
    scorer: Arc<dyn Scorer>,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self {
            store: Arc::new(SlotStore::new()),
            scorer: Arc::new(RuleBasedScorer::new()),
        }
    }

    /// Swap in a custom (usually mock) scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Register a provider and return its id
    pub fn add_provider(&self, provider: Provider) -> ProviderId {
        let id = provider.id;
        self.store.add_provider(provider);
        id
    }

    /// Add a 30-minute Free slot starting `hours_from_now` from now
    pub fn add_slot(&self, provider_id: ProviderId, hours_from_now: i64) -> SlotId {
        self.add_slot_at(provider_id, Utc::now() + Duration::hours(hours_from_now))
    }

    /// Add a 30-minute Free slot at an explicit start time
    pub fn add_slot_at(&self, provider_id: ProviderId, start: DateTime<Utc>) -> SlotId {
        self.store
            .add_slot(Slot::new(provider_id, start, 30))
            .expect("provider must be registered before its slots")
    }

    pub fn store(&self) -> Arc<SlotStore> {
        Arc::clone(&self.store)
    }

    pub fn build(self) -> (Arc<SlotStore>, Arc<SchedulingOrchestrator>) {
        let orchestrator = Arc::new(SchedulingOrchestrator::new(
            Arc::clone(&self.store),
            self.scorer,
        ));
        (self.store, orchestrator)
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
