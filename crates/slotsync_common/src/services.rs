// --- File: crates/slotsync_common/src/services.rs ---
//! Service abstractions for external collaborators of the availability
//! engine.
//!
//! The engine itself is pure interval arithmetic; everything with a side
//! effect (calendar fetches, group/slot storage, change notifications)
//! sits behind one of these traits so hosts can inject real or mock
//! implementations.

use crate::models::{AvailableSlot, BusyInterval, ParticipantCredential, SchedulingWindow};
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>, so heterogeneous service
/// implementations can share one trait-object error type.
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl BoxedError {
    /// Box any concrete service error.
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }
}

/// Read access to one participant's external calendar.
pub trait CalendarProvider: Send + Sync {
    /// Error type returned by provider operations.
    type Error: StdError + Send + Sync + 'static;

    /// List the participant's busy intervals inside `[window_start, window_end]`.
    ///
    /// Implementations clone what they need from `credential` before
    /// returning the future.
    fn list_busy_intervals(
        &self,
        credential: &ParticipantCredential,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error>;
}

/// Read access to a scheduling group's window and roster.
pub trait GroupRepository: Send + Sync {
    /// Error type returned by repository operations.
    type Error: StdError + Send + Sync + 'static;

    /// The group's scheduling window, or `None` for an unknown group.
    fn get_scheduling_window(
        &self,
        group_id: &str,
    ) -> BoxFuture<'_, Option<SchedulingWindow>, Self::Error>;

    /// Credentials of every participant in the group, usable or not.
    fn get_participant_credentials(
        &self,
        group_id: &str,
    ) -> BoxFuture<'_, Vec<ParticipantCredential>, Self::Error>;
}

/// Persistence for computed slots.
pub trait SlotStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: StdError + Send + Sync + 'static;

    /// Atomically delete every stored slot for `group_id` and insert `slots`
    /// in their place. All-or-nothing: on failure the previously stored set
    /// must remain intact.
    fn replace_slots(
        &self,
        group_id: &str,
        slots: Vec<AvailableSlot>,
    ) -> BoxFuture<'_, (), Self::Error>;

    /// The currently stored slots for `group_id`, ascending by start.
    fn list_slots(&self, group_id: &str) -> BoxFuture<'_, Vec<AvailableSlot>, Self::Error>;
}

/// Change-notification channel for slot consumers.
///
/// Announcements carry no slot data; subscribers re-fetch the persisted set.
/// Delivery is fire-and-forget and best-effort, so the trait is synchronous
/// and infallible from the coordinator's point of view.
pub trait Notifier: Send + Sync {
    fn announce_slots_changed(&self, group_id: &str);
}

/// A notifier that drops every announcement, for hosts and tests that do not
/// wire a channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn announce_slots_changed(&self, _group_id: &str) {}
}
