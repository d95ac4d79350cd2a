//! Test fixtures and data for scheduler tests

use scheduler::{AppointmentRequest, Provider};
use shared::{AppointmentCategory, Specialty, Urgency};

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    /// A routine checkup request with no preferences
    pub fn checkup_request() -> AppointmentRequest {
        AppointmentRequest::new(
            "John Doe",
            "Buddy",
            "Dog",
            AppointmentCategory::Checkup,
            Urgency::Medium,
        )
    }

    /// An emergency request, narrow lookahead and restricted specialties
    pub fn emergency_request() -> AppointmentRequest {
        AppointmentRequest::new(
            "Maria Garcia",
            "Rex",
            "Dog",
            AppointmentCategory::Emergency,
            Urgency::Emergency,
        )
    }

    /// Request with an empty requester name; must be rejected
    pub fn invalid_request() -> AppointmentRequest {
        AppointmentRequest::new(
            "  ",
            "Buddy",
            "Dog",
            AppointmentCategory::Checkup,
            Urgency::Medium,
        )
    }

    /// General practice provider; strong match for checkups
    pub fn general_practice_provider() -> Provider {
        Provider::new("Dr. Sarah Johnson", Specialty::GeneralPractice, 8)
    }

    /// Cardiology provider; neutral match for checkups
    pub fn cardiology_provider() -> Provider {
        Provider::new("Dr. Lisa Thompson", Specialty::Cardiology, 15)
    }

    /// Dermatology provider; incompatible with emergency appointments
    pub fn dermatology_provider() -> Provider {
        Provider::new("Dr. James Wilson", Specialty::Dermatology, 10)
    }

    /// Emergency provider
    pub fn emergency_provider() -> Provider {
        Provider::new("Dr. Emily Rodriguez", Specialty::Emergency, 6)
    }

    /// Provider with a preset load counter, for tie-break tests
    pub fn provider_with_load(name: &str, specialty: Specialty, load: u32) -> Provider {
        let mut provider = Provider::new(name, specialty, 8);
        provider.current_load = load;
        provider
    }
}
