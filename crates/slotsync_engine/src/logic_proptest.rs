#[cfg(test)]
mod tests {
    use crate::logic::{compute_free_intervals, GapPolicy};
    use crate::split::split_at_day_boundaries;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
    use proptest::prelude::*;
    use slotsync_common::{BusyInterval, SchedulingWindow};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
    }

    fn test_window(days: i64) -> SchedulingWindow {
        SchedulingWindow {
            start: base(),
            end: base() + Duration::days(days),
            min_slot_duration: Duration::zero(),
        }
    }

    /// Arbitrary busy intervals as (offset-minutes, length-minutes) pairs,
    /// some of them outside the window or zero-width on purpose.
    fn busy_strategy() -> impl Strategy<Value = Vec<BusyInterval>> {
        prop::collection::vec((-120i64..10_200, 0i64..600), 0..40).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (offset_min, len_min))| BusyInterval {
                    start: base() + Duration::minutes(offset_min),
                    end: base() + Duration::minutes(offset_min + len_min),
                    owner_id: format!("user-{}", i % 5),
                })
                .collect()
        })
    }

    proptest! {
        // Free intervals never overlap and are strictly ordered by start.
        #[test]
        fn free_intervals_are_ordered_and_disjoint(busy in busy_strategy()) {
            let window = test_window(7);
            let free = compute_free_intervals(&window, &busy, &GapPolicy::default());

            for interval in &free {
                prop_assert!(interval.start < interval.end);
                prop_assert!(interval.start >= window.start);
                prop_assert!(interval.end <= window.end);
            }
            for pair in free.windows(2) {
                // Strictly after, with busy time in between (maximality).
                prop_assert!(pair[1].start > pair[0].end);
            }
        }

        // Busy time (clipped to the window) plus free time covers the window
        // exactly, with no double counting.
        #[test]
        fn busy_plus_free_covers_the_window(busy in busy_strategy()) {
            let window = test_window(7);
            let free = compute_free_intervals(&window, &busy, &GapPolicy::default());

            // Merge the busy intervals clipped to the window.
            let mut clipped: Vec<(DateTime<Utc>, DateTime<Utc>)> = busy
                .iter()
                .filter(|b| b.end > b.start)
                .map(|b| (b.start.max(window.start), b.end.min(window.end)))
                .filter(|(s, e)| e > s)
                .collect();
            clipped.sort_by_key(|(s, _)| *s);
            let mut busy_total = Duration::zero();
            let mut cover_end = window.start;
            for (s, e) in clipped {
                let s = s.max(cover_end);
                if e > s {
                    busy_total = busy_total + (e - s);
                    cover_end = e;
                }
            }

            let free_total = free
                .iter()
                .fold(Duration::zero(), |acc, f| acc + (f.end - f.start));

            prop_assert_eq!(busy_total + free_total, window.end - window.start);
        }

        // Shuffling the busy input never changes the output.
        #[test]
        fn output_is_order_independent(busy in busy_strategy(), seed in any::<u64>()) {
            let window = test_window(7);
            let baseline = compute_free_intervals(&window, &busy, &GapPolicy::default());

            let mut shuffled = busy.clone();
            // Cheap deterministic shuffle from the seed.
            let len = shuffled.len();
            if len > 1 {
                let mut state = seed | 1;
                for i in (1..len).rev() {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    let j = (state % (i as u64 + 1)) as usize;
                    shuffled.swap(i, j);
                }
            }

            prop_assert_eq!(
                baseline,
                compute_free_intervals(&window, &shuffled, &GapPolicy::default())
            );
        }

        // Splitting reconstructs each input interval: piece starts/ends chain
        // with 1 ms seams and the outer bounds are preserved (modulo the
        // midnight-exclusive clamp).
        #[test]
        fn split_pieces_chain_without_gaps(busy in busy_strategy()) {
            let window = test_window(7);
            let offset = FixedOffset::east_opt(0).unwrap();
            let free = compute_free_intervals(&window, &busy, &GapPolicy::default());

            for interval in &free {
                let pieces = split_at_day_boundaries(&[*interval], offset);
                prop_assert!(!pieces.is_empty());
                prop_assert_eq!(pieces[0].start, interval.start);
                let last = pieces[pieces.len() - 1];
                prop_assert!(
                    last.end == interval.end
                        || interval.end - last.end == Duration::milliseconds(1)
                );
                for pair in pieces.windows(2) {
                    prop_assert_eq!(pair[1].start - pair[0].end, Duration::milliseconds(1));
                }
                for piece in &pieces {
                    // No piece crosses a local midnight.
                    let s = piece.start.with_timezone(&offset).date_naive();
                    let e = piece.end.with_timezone(&offset).date_naive();
                    prop_assert_eq!(s, e);
                }
            }
        }
    }
}
