// --- File: crates/slotsync_engine/src/lib.rs ---
// Declare modules within this crate
pub mod coordinator;
pub mod error;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod split;
#[cfg(test)]
mod split_test;

pub use coordinator::{AvailabilityCoordinator, CoordinatorSettings};
pub use error::EngineError;
pub use logic::{compute_free_intervals, GapPolicy};
pub use split::split_at_day_boundaries;
