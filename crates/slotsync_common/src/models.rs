// --- File: crates/slotsync_common/src/models.rs ---
//! Domain value types shared across the Slotsync crates.
//!
//! All instants are `DateTime<Utc>`; day-boundary arithmetic happens in a
//! single fixed UTC offset chosen by configuration, never per user.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The date range a scheduling group computes shared availability over.
///
/// Owned by the group for its lifetime. `min_slot_duration` is retained for
/// compatibility with older groups but is non-binding unless the gap policy
/// is explicitly configured to enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub min_slot_duration: Duration,
}

impl SchedulingWindow {
    /// A window is valid only when `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

/// A time range during which one participant is unavailable, as reported by
/// their external calendar. Fetched transiently per recomputation and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub owner_id: String,
}

/// A maximal range, bounded by the scheduling window, with no busy interval
/// from any participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A persisted, day-bounded free interval ready for display and booking.
///
/// Slot identity is not stable: every recomputation deletes and regenerates
/// the full set for a group, so only `(start, end)` pairs are comparable
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub id: Uuid,
    pub group_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// External-calendar credential of one group participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantCredential {
    pub user_id: String,
    /// OAuth access token for the participant's calendar account. A missing
    /// or empty token means the participant contributes no busy intervals.
    pub access_token: Option<String>,
    /// Which of the participant's calendars to read, usually `"primary"`.
    pub calendar_id: String,
}

impl ParticipantCredential {
    pub fn is_usable(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_validity() {
        let start = Utc.with_ymd_and_hms(2025, 4, 13, 0, 0, 0).unwrap();
        let window = SchedulingWindow {
            start,
            end: start + Duration::days(2),
            min_slot_duration: Duration::minutes(30),
        };
        assert!(window.is_valid());

        let inverted = SchedulingWindow {
            start: window.end,
            end: window.start,
            min_slot_duration: Duration::zero(),
        };
        assert!(!inverted.is_valid());

        let empty = SchedulingWindow {
            start,
            end: start,
            min_slot_duration: Duration::zero(),
        };
        assert!(!empty.is_valid());
    }

    #[test]
    fn credential_usability() {
        let mut credential = ParticipantCredential {
            user_id: "user-1".into(),
            access_token: Some("ya29.token".into()),
            calendar_id: "primary".into(),
        };
        assert!(credential.is_usable());

        credential.access_token = Some(String::new());
        assert!(!credential.is_usable());

        credential.access_token = None;
        assert!(!credential.is_usable());
    }
}
