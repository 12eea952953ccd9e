// --- File: crates/services/slotsync_backend/src/lib.rs ---
//! HTTP service hosting the Slotsync availability engine.

pub mod app_state;
pub mod handlers;
pub mod notifier;
pub mod routes;

pub use app_state::{AppState, AppStateError};
pub use notifier::{BroadcastNotifier, SlotsChanged};
