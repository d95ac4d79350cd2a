//! Shared types for the appointment scheduling system
//!
//! Contains only truly shared vocabulary: identifiers, domain enums, the
//! score triple, and error/logging plumbing. Component-internal types (like
//! ranking candidates or reservation outcomes) live in the scheduler crate.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
