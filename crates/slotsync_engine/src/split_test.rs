#[cfg(test)]
mod tests {
    use crate::split::split_at_day_boundaries;
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike, Utc};
    use slotsync_common::FreeInterval;

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> FreeInterval {
        FreeInterval { start, end }
    }

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn end_of_day(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        ymd_hms(y, mo, d, 23, 59, 59) + Duration::milliseconds(999)
    }

    #[test]
    fn interval_within_one_day_passes_through_unchanged() {
        let input = interval(ymd_hms(2025, 4, 13, 8, 0, 0), ymd_hms(2025, 4, 13, 18, 0, 0));
        let out = split_at_day_boundaries(&[input], utc_offset());
        assert_eq!(out, vec![input]);
    }

    #[test]
    fn overnight_interval_splits_into_two_pieces() {
        let start = ymd_hms(2025, 4, 13, 20, 0, 0);
        let end = ymd_hms(2025, 4, 14, 9, 30, 0);
        let out = split_at_day_boundaries(&[interval(start, end)], utc_offset());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start, start);
        assert_eq!(out[0].end, end_of_day(2025, 4, 13));
        assert_eq!(out[1].start, ymd_hms(2025, 4, 14, 0, 0, 0));
        assert_eq!(out[1].end, end);
    }

    #[test]
    fn three_midnights_yield_four_pieces() {
        // 2025-06-01T20:00 .. 2025-06-04T09:00
        let start = ymd_hms(2025, 6, 1, 20, 0, 0);
        let end = ymd_hms(2025, 6, 4, 9, 0, 0);
        let out = split_at_day_boundaries(&[interval(start, end)], utc_offset());

        assert_eq!(out.len(), 4);
        assert_eq!((out[0].start, out[0].end), (start, end_of_day(2025, 6, 1)));
        assert_eq!(
            (out[1].start, out[1].end),
            (ymd_hms(2025, 6, 2, 0, 0, 0), end_of_day(2025, 6, 2))
        );
        assert_eq!(
            (out[2].start, out[2].end),
            (ymd_hms(2025, 6, 3, 0, 0, 0), end_of_day(2025, 6, 3))
        );
        assert_eq!((out[3].start, out[3].end), (ymd_hms(2025, 6, 4, 0, 0, 0), end));
    }

    #[test]
    fn end_exactly_at_midnight_does_not_create_an_empty_trailing_day() {
        // A full two-day window ending at midnight of day 15 (exclusive)
        // yields exactly two day slots, not three.
        let start = ymd_hms(2025, 4, 13, 0, 0, 0);
        let end = ymd_hms(2025, 4, 15, 0, 0, 0);
        let out = split_at_day_boundaries(&[interval(start, end)], utc_offset());

        assert_eq!(out.len(), 2);
        assert_eq!((out[0].start, out[0].end), (start, end_of_day(2025, 4, 13)));
        assert_eq!(
            (out[1].start, out[1].end),
            (ymd_hms(2025, 4, 14, 0, 0, 0), end_of_day(2025, 4, 14))
        );
    }

    #[test]
    fn seams_meet_with_exactly_one_millisecond() {
        let start = ymd_hms(2025, 6, 1, 20, 0, 0);
        let end = ymd_hms(2025, 6, 4, 9, 0, 0);
        let out = split_at_day_boundaries(&[interval(start, end)], utc_offset());

        assert_eq!(out.first().map(|p| p.start), Some(start));
        assert_eq!(out.last().map(|p| p.end), Some(end));
        for pair in out.windows(2) {
            assert_eq!(
                pair[1].start - pair[0].end,
                Duration::milliseconds(1),
                "pieces must meet with a 1 ms midnight seam"
            );
        }
    }

    #[test]
    fn day_boundaries_follow_the_fixed_offset() {
        // UTC+2: local midnight is 22:00 UTC of the previous day. An
        // interval from 21:00 to 23:00 UTC crosses the local boundary.
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = ymd_hms(2025, 4, 13, 21, 0, 0);
        let end = ymd_hms(2025, 4, 13, 23, 0, 0);
        let out = split_at_day_boundaries(&[interval(start, end)], offset);

        assert_eq!(out.len(), 2);
        // First piece ends at local 23:59:59.999 = 21:59:59.999 UTC.
        assert_eq!(
            out[0].end,
            ymd_hms(2025, 4, 13, 21, 59, 59) + Duration::milliseconds(999)
        );
        assert_eq!(out[1].start, ymd_hms(2025, 4, 13, 22, 0, 0));
        assert_eq!(out[1].end, end);
        assert_eq!(out[1].start.with_timezone(&offset).hour(), 0);
    }

    #[test]
    fn empty_and_inverted_intervals_are_skipped() {
        let at = ymd_hms(2025, 4, 13, 12, 0, 0);
        let out = split_at_day_boundaries(
            &[interval(at, at), interval(at, at - Duration::hours(1))],
            utc_offset(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn multiple_inputs_stay_in_order() {
        let a = interval(ymd_hms(2025, 4, 13, 8, 0, 0), ymd_hms(2025, 4, 13, 9, 0, 0));
        let b = interval(ymd_hms(2025, 4, 13, 22, 0, 0), ymd_hms(2025, 4, 14, 2, 0, 0));
        let out = split_at_day_boundaries(&[a, b], utc_offset());

        assert_eq!(out.len(), 3);
        assert_eq!(out[0], a);
        assert!(out[1].start < out[2].start);
    }
}
