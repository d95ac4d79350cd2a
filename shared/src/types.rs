//! Core shared types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for service providers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderId(Uuid);

impl ProviderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ProviderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for bookable time slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(Uuid);

impl SlotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for committed bookings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency of an appointment request, ordered from least to most urgent
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

impl Urgency {
    /// Numeric score used as a scorer feature
    pub fn score(&self) -> f64 {
        match self {
            Urgency::Low => 0.2,
            Urgency::Medium => 0.5,
            Urgency::High => 0.8,
            Urgency::Emergency => 1.0,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            "emergency" => Some(Urgency::Emergency),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider specialty tags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    GeneralPractice,
    Surgery,
    Emergency,
    Dermatology,
    Cardiology,
}

impl Specialty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general practice" | "general_practice" => Some(Specialty::GeneralPractice),
            "surgery" => Some(Specialty::Surgery),
            "emergency" => Some(Specialty::Emergency),
            "dermatology" => Some(Specialty::Dermatology),
            "cardiology" => Some(Specialty::Cardiology),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "general_practice",
            Specialty::Surgery => "surgery",
            Specialty::Emergency => "emergency",
            Specialty::Dermatology => "dermatology",
            Specialty::Cardiology => "cardiology",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a requested appointment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentCategory {
    Checkup,
    Vaccination,
    Surgery,
    Emergency,
    FollowUp,
    Grooming,
}

impl AppointmentCategory {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checkup" => Some(AppointmentCategory::Checkup),
            "vaccination" => Some(AppointmentCategory::Vaccination),
            "surgery" => Some(AppointmentCategory::Surgery),
            "emergency" => Some(AppointmentCategory::Emergency),
            "follow-up" | "followup" | "follow_up" => Some(AppointmentCategory::FollowUp),
            "grooming" => Some(AppointmentCategory::Grooming),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentCategory::Checkup => "checkup",
            AppointmentCategory::Vaccination => "vaccination",
            AppointmentCategory::Surgery => "surgery",
            AppointmentCategory::Emergency => "emergency",
            AppointmentCategory::FollowUp => "follow-up",
            AppointmentCategory::Grooming => "grooming",
        }
    }

    /// Nominal appointment length in minutes, used by the rule-based scorer
    pub fn base_duration_minutes(&self) -> f64 {
        match self {
            AppointmentCategory::Checkup => 30.0,
            AppointmentCategory::Vaccination => 20.0,
            AppointmentCategory::Surgery => 90.0,
            AppointmentCategory::Emergency => 45.0,
            AppointmentCategory::FollowUp => 20.0,
            AppointmentCategory::Grooming => 40.0,
        }
    }
}

impl fmt::Display for AppointmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a bookable slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Open for reservation
    Free,
    /// Held by an in-flight reservation, not yet confirmed
    Reserved,
    /// Committed to a confirmed booking
    Booked,
    /// Provider unavailable; never returns to Free
    Blocked,
}

/// Lifecycle status of a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    /// Replaced by a rescheduling attempt
    Superseded,
}

/// Prediction triple produced by a scorer for one (request, slot) pairing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    /// Probability the appointment completes successfully, in [0, 1]
    pub success_likelihood: f64,
    /// Predicted appointment length in minutes, clamped to [15, 120]
    pub estimated_duration_minutes: f64,
    /// Provider/category fit, in [0, 1]
    pub match_quality: f64,
}

impl ScoreTriple {
    /// Duration predictions outside this range are clamped
    pub const MIN_DURATION_MINUTES: f64 = 15.0;
    pub const MAX_DURATION_MINUTES: f64 = 120.0;

    pub fn new(success_likelihood: f64, estimated_duration_minutes: f64, match_quality: f64) -> Self {
        Self {
            success_likelihood: success_likelihood.clamp(0.0, 1.0),
            estimated_duration_minutes: estimated_duration_minutes
                .clamp(Self::MIN_DURATION_MINUTES, Self::MAX_DURATION_MINUTES),
            match_quality: match_quality.clamp(0.0, 1.0),
        }
    }
}

/// Preferred hour-of-day window for an appointment.
///
/// Half-open: an instant matches when `start_hour <= hour < end_hour`, so
/// `TimeWindow::new(9, 12)` covers 09:00 up to but not including 12:00.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl TimeWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    /// Window is structurally sane: within a day and non-empty
    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        use chrono::Timelike;
        let hour = instant.hour();
        hour >= self.start_hour && hour < self.end_hour
    }
}
