// --- File: crates/slotsync_engine/src/split.rs ---
//! Day-boundary splitter: normalizes free intervals into per-day segments.
//!
//! Days are taken in one fixed UTC offset. Each local day runs
//! [00:00:00.000, 23:59:59.999]; consecutive pieces of a split interval meet
//! with a one-millisecond seam at midnight.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use slotsync_common::FreeInterval;

/// Instant of `day`'s 00:00:00.000 in `offset`, as UTC.
fn start_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // Fixed offsets have no DST gaps, so the local time always maps to
    // exactly one instant.
    offset
        .from_local_datetime(&day.and_time(NaiveTime::MIN))
        .unwrap()
        .with_timezone(&Utc)
}

/// Instant of `day`'s 23:59:59.999 in `offset`, as UTC.
fn end_of_day(day: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let last_ms = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid time of day");
    offset
        .from_local_datetime(&last_ms)
        .unwrap()
        .with_timezone(&Utc)
}

/// Splits each interval at local midnights so no output piece spans two
/// calendar days of the fixed offset.
///
/// An interval contained in one day passes through unchanged. An interval
/// crossing `n` midnights yields `n + 1` pieces: the first from its start to
/// 23:59:59.999 of that day, full intermediate days as
/// [00:00:00.000, 23:59:59.999], and the last from 00:00:00.000 to the
/// original end. An end landing exactly on 00:00:00.000 belongs to the prior
/// day and never produces an empty trailing piece.
pub fn split_at_day_boundaries(
    intervals: &[FreeInterval],
    offset: FixedOffset,
) -> Vec<FreeInterval> {
    let mut out = Vec::with_capacity(intervals.len());

    for interval in intervals {
        if interval.end <= interval.start {
            continue;
        }

        let start_day = interval.start.with_timezone(&offset).date_naive();
        // The exclusive end's day, with an end exactly at midnight counted
        // as the prior day.
        let end_day = (interval.end - Duration::milliseconds(1))
            .with_timezone(&offset)
            .date_naive();

        let mut day = start_day;
        loop {
            let piece_start = if day == start_day {
                interval.start
            } else {
                start_of_day(day, offset)
            };
            let piece_end = if day == end_day {
                interval.end.min(end_of_day(day, offset))
            } else {
                end_of_day(day, offset)
            };
            out.push(FreeInterval {
                start: piece_start,
                end: piece_end,
            });

            if day >= end_day {
                break;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
    }

    out
}
