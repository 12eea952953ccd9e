// --- File: crates/slotsync_engine/src/logic.rs ---
//! Interval merger: the complement of everyone's busy time inside a
//! scheduling window.

use chrono::Duration;
use slotsync_common::{BusyInterval, FreeInterval, SchedulingWindow};
use tracing::debug;

/// Policy for which gaps become free intervals.
///
/// The historical behavior discarded gaps shorter than the window's minimum
/// slot duration; the current default emits every gap regardless of length,
/// sub-minute ones included. The filter survives here as an opt-in toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapPolicy {
    pub min_duration: Option<Duration>,
}

impl GapPolicy {
    /// Emit every gap unconditionally (the default).
    pub fn emit_all() -> Self {
        Self { min_duration: None }
    }

    /// Discard gaps shorter than `min`.
    pub fn with_min_duration(min: Duration) -> Self {
        Self {
            min_duration: Some(min),
        }
    }

    fn admits(&self, gap: Duration) -> bool {
        match self.min_duration {
            Some(min) => gap >= min,
            None => true,
        }
    }
}

/// Computes the maximal free intervals of `window` given every participant's
/// busy intervals.
///
/// `busy` may be unsorted, overlapping, and may contain intervals entirely
/// outside the window; none of that is an error. Zero- and negative-width
/// intervals are skipped so they cannot split a free interval in two.
/// Output is ascending by start, mutually non-overlapping, and maximal, and
/// depends only on the multiset of inputs, not their order.
pub fn compute_free_intervals(
    window: &SchedulingWindow,
    busy: &[BusyInterval],
    policy: &GapPolicy,
) -> Vec<FreeInterval> {
    debug_assert!(window.is_valid());

    let mut sorted: Vec<&BusyInterval> = busy.iter().filter(|b| b.end > b.start).collect();
    sorted.sort_by_key(|b| b.start);

    debug!(
        "Sweeping {} busy intervals over window {} - {}",
        sorted.len(),
        window.start,
        window.end
    );

    let mut free = Vec::new();
    let mut cursor = window.start;

    for interval in sorted {
        if cursor >= window.end {
            break;
        }
        // A busy interval starting past the cursor leaves a gap; clip it to
        // the window end in case the interval starts beyond it.
        if interval.start > cursor {
            let gap_end = interval.start.min(window.end);
            if gap_end > cursor && policy.admits(gap_end - cursor) {
                free.push(FreeInterval {
                    start: cursor,
                    end: gap_end,
                });
            }
        }
        if interval.end > cursor {
            cursor = interval.end;
        }
    }

    // Trailing gap after the last busy interval.
    if cursor < window.end && policy.admits(window.end - cursor) {
        free.push(FreeInterval {
            start: cursor,
            end: window.end,
        });
    }

    free
}
