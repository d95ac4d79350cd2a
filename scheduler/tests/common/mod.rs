//! Shared test infrastructure
//!
//! Fixtures provide consistent domain data; helpers provide builder-style
//! setup so individual tests stay focused on behavior.

pub mod fixtures;
pub mod helpers;

#[allow(unused_imports)]
pub use fixtures::TestFixtures;
#[allow(unused_imports)]
pub use helpers::SchedulerBuilder;
