//! Concrete scorer implementations
//!
//! Two interchangeable implementations of the `Scorer` capability: a
//! deterministic rule-based scorer (also the fail-closed fallback) and a
//! learned-model-backed scorer constructed once from an external weight
//! artifact. Selection happens at construction time; the scheduling
//! pipeline only ever sees the trait.

pub mod model;
pub mod rule_based;

pub use model::{LinearModelScorer, ModelWeights};
pub use rule_based::RuleBasedScorer;

use shared::{AppointmentCategory, Specialty};

/// Provider specialty vs. appointment category fit.
///
/// 0.5 is the neutral baseline for pairings with no specific affinity.
pub fn specialty_match(specialty: Specialty, category: AppointmentCategory) -> f64 {
    match (specialty, category) {
        (Specialty::Surgery, AppointmentCategory::Surgery) => 1.0,
        (Specialty::Emergency, AppointmentCategory::Emergency) => 1.0,
        (Specialty::GeneralPractice, AppointmentCategory::Checkup) => 0.9,
        (Specialty::GeneralPractice, AppointmentCategory::Vaccination) => 0.8,
        (Specialty::Dermatology, AppointmentCategory::Checkup) => 0.7,
        (Specialty::Cardiology, AppointmentCategory::Checkup) => 0.6,
        _ => 0.5,
    }
}

/// Whether a provider is an acceptable match for a request category at all.
///
/// Emergency appointments only go to emergency or general practice
/// providers; everything else is admitted at the neutral baseline.
pub fn specialty_compatible(specialty: Specialty, category: AppointmentCategory) -> bool {
    match category {
        AppointmentCategory::Emergency => matches!(
            specialty,
            Specialty::Emergency | Specialty::GeneralPractice
        ),
        _ => true,
    }
}
