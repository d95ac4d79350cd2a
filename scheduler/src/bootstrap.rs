//! Inventory bootstrap
//!
//! One-time population of the provider roster and the slot grid before the
//! system takes traffic. This stands in for the external inventory
//! generator; the scheduling core itself never creates slots at runtime.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use rand::Rng;
use shared::Specialty;
use tracing::info;

use crate::error::SchedulerResult;
use crate::store::SlotStore;
use crate::types::{Provider, Slot};

/// Inventory horizon in days
pub const DEFAULT_DAYS_AHEAD: i64 = 30;

/// Slot length of the generated grid
pub const SLOT_MINUTES: i64 = 30;

/// The seed roster: one provider per specialty, experience from the
/// historical staffing records.
pub fn seed_providers() -> Vec<Provider> {
    vec![
        Provider::new("Dr. Sarah Johnson", Specialty::GeneralPractice, 8),
        Provider::new("Dr. Michael Chen", Specialty::Surgery, 12),
        Provider::new("Dr. Emily Rodriguez", Specialty::Emergency, 6),
        Provider::new("Dr. James Wilson", Specialty::Dermatology, 10),
        Provider::new("Dr. Lisa Thompson", Specialty::Cardiology, 15),
    ]
}

/// Populate `store` with the seed roster and a slot grid starting at `base`.
///
/// Per provider and day: 4-8 hourly slots from 09:00, each 30 minutes;
/// weekend days are skipped with probability 0.3.
pub fn seed_inventory(
    store: &SlotStore,
    base: DateTime<Utc>,
    days_ahead: i64,
) -> SchedulerResult<usize> {
    let mut rng = rand::thread_rng();
    let providers = seed_providers();
    let mut slot_count = 0usize;

    for provider in providers {
        let provider_id = provider.id;
        store.add_provider(provider);

        for day in 0..days_ahead {
            let date = base + Duration::days(day);
            let is_weekend = date.weekday().num_days_from_monday() >= 5;
            if is_weekend && rng.gen_bool(0.3) {
                continue;
            }

            let num_slots = rng.gen_range(4..=8);
            for offset in 0..num_slots {
                let start = date
                    .with_hour(9 + offset)
                    .and_then(|d| d.with_minute(0))
                    .and_then(|d| d.with_second(0))
                    .and_then(|d| d.with_nanosecond(0));
                let Some(start) = start else { continue };
                store.add_slot(Slot::new(provider_id, start, SLOT_MINUTES))?;
                slot_count += 1;
            }
        }
    }

    info!(
        slots = slot_count,
        days = days_ahead,
        "🗓️ Seeded slot inventory"
    );
    Ok(slot_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_seed_inventory_populates_all_providers() {
        let store = SlotStore::new();
        let base = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let count = seed_inventory(&store, base, 7).unwrap();

        assert!(count > 0);
        assert_eq!(store.providers_snapshot().len(), 5);
        // 5 providers, 7 days, at least 4 slots per scheduled day, weekends
        // only probabilistically skipped (5 weekdays are guaranteed)
        assert!(count >= 5 * 5 * 4);
        assert_eq!(store.status_counts().free, count);
    }
}
