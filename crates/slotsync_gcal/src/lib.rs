// --- File: crates/slotsync_gcal/src/lib.rs ---
//! Google Calendar integration: fetches participants' busy intervals over
//! the freeBusy REST API.

pub mod service;

pub use service::{GcalBusyProvider, GcalProviderError};
