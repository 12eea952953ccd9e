// --- File: crates/slotsync_engine/src/coordinator.rs ---
//! Recomputation coordinator: ties the pure interval logic to the external
//! collaborators.
//!
//! One recomputation runs Idle → Fetching → Computing → Persisting. The only
//! suspension points are the per-participant fetches (independent, run
//! concurrently) and the storage transaction. Re-entrancy needs no
//! in-process lock: the transactional delete+insert is the synchronization
//! primitive, and the last commit wins.

use crate::error::EngineError;
use crate::logic::{compute_free_intervals, GapPolicy};
use crate::split::split_at_day_boundaries;
use chrono::{FixedOffset, SubsecRound, Utc};
use futures::future::join_all;
use slotsync_common::{
    AvailableSlot, BoxedError, BusyInterval, CalendarProvider, GroupRepository, Notifier,
    ParticipantCredential, SchedulingWindow, SlotStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tunables of a coordinator, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatorSettings {
    pub gap_policy: GapPolicy,
    /// The single offset used for day-boundary arithmetic.
    pub day_offset: FixedOffset,
    /// Budget per participant fetch; exceeding it counts as a fetch failure.
    pub fetch_timeout: Duration,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::default(),
            day_offset: FixedOffset::east_opt(0).expect("zero offset is valid"),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Orchestrates one scheduling group's availability recomputation.
pub struct AvailabilityCoordinator {
    groups: Arc<dyn GroupRepository<Error = BoxedError>>,
    provider: Arc<dyn CalendarProvider<Error = BoxedError>>,
    slots: Arc<dyn SlotStore<Error = BoxedError>>,
    notifier: Arc<dyn Notifier>,
    settings: CoordinatorSettings,
}

impl AvailabilityCoordinator {
    pub fn new(
        groups: Arc<dyn GroupRepository<Error = BoxedError>>,
        provider: Arc<dyn CalendarProvider<Error = BoxedError>>,
        slots: Arc<dyn SlotStore<Error = BoxedError>>,
        notifier: Arc<dyn Notifier>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            groups,
            provider,
            slots,
            notifier,
            settings,
        }
    }

    /// Recompute and atomically replace the stored slots for `group_id`.
    ///
    /// A participant whose fetch fails or times out contributes zero busy
    /// intervals; partial data is better than none. A persistence failure is
    /// fatal and leaves the previously stored slots intact. On success,
    /// subscribers are told the group's slots changed (with no payload) and
    /// the freshly persisted set is returned.
    pub async fn recompute(&self, group_id: &str) -> Result<Vec<AvailableSlot>, EngineError> {
        let window = self
            .groups
            .get_scheduling_window(group_id)
            .await
            .map_err(EngineError::Repository)?
            .ok_or_else(|| EngineError::GroupNotFound(group_id.to_string()))?;

        // Configuration error from upstream; reject before fetching anything.
        if !window.is_valid() {
            return Err(EngineError::InvalidWindow {
                start: window.start,
                end: window.end,
            });
        }

        let credentials = self
            .groups
            .get_participant_credentials(group_id)
            .await
            .map_err(EngineError::Repository)?;

        let busy = self.fetch_busy_intervals(group_id, &window, &credentials).await;

        debug!(
            "Group {}: {} busy intervals from {} participants",
            group_id,
            busy.len(),
            credentials.len()
        );

        let free = compute_free_intervals(&window, &busy, &self.settings.gap_policy);
        let day_bounded = split_at_day_boundaries(&free, self.settings.day_offset);

        // Millisecond precision, matching what stores can round-trip.
        let now = Utc::now().trunc_subsecs(3);
        let slots: Vec<AvailableSlot> = day_bounded
            .into_iter()
            .map(|interval| AvailableSlot {
                id: Uuid::new_v4(),
                group_id: group_id.to_string(),
                start: interval.start,
                end: interval.end,
                created_at: now,
            })
            .collect();

        self.slots
            .replace_slots(group_id, slots.clone())
            .await
            .map_err(EngineError::Persistence)?;

        info!(
            "Group {}: stored {} available slots, announcing change",
            group_id,
            slots.len()
        );
        self.notifier.announce_slots_changed(group_id);

        Ok(slots)
    }

    /// Fetch every usable participant's busy intervals concurrently,
    /// degrading each failure or timeout to an empty contribution.
    async fn fetch_busy_intervals(
        &self,
        group_id: &str,
        window: &SchedulingWindow,
        credentials: &[ParticipantCredential],
    ) -> Vec<BusyInterval> {
        let fetches = credentials.iter().filter(|c| c.is_usable()).map(|cred| {
            let provider = Arc::clone(&self.provider);
            let timeout = self.settings.fetch_timeout;
            let (start, end) = (window.start, window.end);
            async move {
                let result =
                    tokio::time::timeout(timeout, provider.list_busy_intervals(cred, start, end))
                        .await;
                match result {
                    Ok(Ok(intervals)) => intervals,
                    Ok(Err(err)) => {
                        warn!(
                            "Group {}: fetch failed for participant {}, treating as free: {}",
                            group_id, cred.user_id, err
                        );
                        Vec::new()
                    }
                    Err(_) => {
                        warn!(
                            "Group {}: fetch timed out for participant {}, treating as free",
                            group_id, cred.user_id
                        );
                        Vec::new()
                    }
                }
            }
        });

        for cred in credentials.iter().filter(|c| !c.is_usable()) {
            debug!(
                "Group {}: participant {} has no usable credential, skipping fetch",
                group_id, cred.user_id
            );
        }

        join_all(fetches).await.into_iter().flatten().collect()
    }
}
