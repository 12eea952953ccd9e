// --- File: crates/slotsync_common/src/lib.rs ---

// Declare modules within this crate
pub mod http; // Shared HTTP client
pub mod logging; // Logging utilities
pub mod models; // Domain value types
pub mod retry; // Bounded-retry policy for collaborators
pub mod services; // Service abstractions

// Re-export the domain types for easier access
pub use models::{
    AvailableSlot, BusyInterval, FreeInterval, ParticipantCredential, SchedulingWindow,
};

// Re-export the service seam
pub use services::{
    BoxFuture, BoxedError, CalendarProvider, GroupRepository, Notifier, NullNotifier, SlotStore,
};

pub use http::{create_client, HTTP_CLIENT};
pub use retry::RetryPolicy;
