//! Availability: which catalog windows the sampled history actually covers.

use super::AvailableRanges;
use crate::domain::history::{HistoryPoint, RawTimestamp};
use crate::shared::{Range, DAY_MS};
use chrono::{DateTime, Utc};

/// Compute the available ranges for a set of raw timestamps.
///
/// A bounded window is available when the samples span at least its nominal
/// duration *and* the latest sample is no older than `max(duration, 1 day)`
/// relative to `now`. `max` is available whenever any timestamp parses.
/// Unparseable inputs are discarded; if none parse the result is empty.
///
/// `now` defaults to the wall clock.
pub fn compute_available_ranges(
    timestamps: &[RawTimestamp],
    now: Option<DateTime<Utc>>,
) -> AvailableRanges {
    available_from_millis(timestamps.iter().filter_map(RawTimestamp::epoch_ms), now)
}

/// [`compute_available_ranges`] over the timestamps of a point list.
pub fn compute_available_ranges_from_points(
    points: &[HistoryPoint],
    now: Option<DateTime<Utc>>,
) -> AvailableRanges {
    available_from_millis(points.iter().filter_map(|p| p.timestamp.epoch_ms()), now)
}

fn available_from_millis(
    millis: impl Iterator<Item = i64>,
    now: Option<DateTime<Utc>>,
) -> AvailableRanges {
    let bounds = millis.fold(None, |acc: Option<(i64, i64)>, ms| match acc {
        None => Some((ms, ms)),
        Some((lo, hi)) => Some((lo.min(ms), hi.max(ms))),
    });

    let Some((earliest, latest)) = bounds else {
        return AvailableRanges::new();
    };

    let now_ms = now.unwrap_or_else(Utc::now).timestamp_millis();
    let span = latest.saturating_sub(earliest);
    let lag = now_ms.saturating_sub(latest);

    let mut available: AvailableRanges = Range::ALL
        .iter()
        .copied()
        .filter(|range| match range.nominal_duration_ms() {
            Some(duration) => span >= duration && lag <= duration.max(DAY_MS),
            None => false,
        })
        .collect();
    available.insert(Range::Max);
    available
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn text(values: &[&str]) -> Vec<RawTimestamp> {
        values.iter().map(|v| RawTimestamp::from(*v)).collect()
    }

    #[test]
    fn test_no_timestamps_is_empty() {
        let set = compute_available_ranges(&[], Some(at(2024, 1, 8)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_all_unparseable_is_empty() {
        let ts = vec![
            RawTimestamp::Missing,
            RawTimestamp::from("garbage"),
            RawTimestamp::Millis(f64::NAN),
        ];
        assert!(compute_available_ranges(&ts, Some(at(2024, 1, 8))).is_empty());
    }

    #[test]
    fn test_single_point_is_max_only() {
        let set = compute_available_ranges(&text(&["2024-01-08"]), Some(at(2024, 1, 8)));
        assert_eq!(set, AvailableRanges::from([Range::Max]));
    }

    #[test]
    fn test_identical_points_are_max_only() {
        let ts = text(&["2024-01-08", "2024-01-08", "2024-01-08"]);
        let set = compute_available_ranges(&ts, Some(at(2024, 1, 8)));
        assert_eq!(set, AvailableRanges::from([Range::Max]));
    }

    #[test]
    fn test_one_week_span_ending_now() {
        let ts = text(&["2024-01-01", "2024-01-08"]);
        let set = compute_available_ranges(&ts, Some(at(2024, 1, 8)));
        assert_eq!(set, AvailableRanges::from([Range::Day1, Range::Day7, Range::Max]));
    }

    #[test]
    fn test_ten_day_span_under_covers_month() {
        let now = at(2024, 3, 20);
        let ts: Vec<RawTimestamp> = (0..=10)
            .map(|d| RawTimestamp::from(now - Duration::days(10 - d)))
            .collect();
        let set = compute_available_ranges(&ts, Some(now));
        assert!(set.contains(Range::Day1));
        assert!(set.contains(Range::Day7));
        assert!(!set.contains(Range::Month1));
        assert!(set.contains(Range::Max));
    }

    #[test]
    fn test_stale_data_fails_recency_for_short_windows() {
        // Two years of data that stopped 60 days ago.
        let now = at(2024, 6, 1);
        let latest = now - Duration::days(60);
        let earliest = latest - Duration::days(800);
        let ts = vec![RawTimestamp::from(earliest), RawTimestamp::from(latest)];
        let set = compute_available_ranges(&ts, Some(now));
        assert!(!set.contains(Range::Day1));
        assert!(!set.contains(Range::Day7));
        assert!(!set.contains(Range::Month1));
        assert!(set.contains(Range::Month3));
        assert!(set.contains(Range::Year1));
        assert!(set.contains(Range::Year2));
        assert!(!set.contains(Range::Year5));
        assert!(set.contains(Range::Max));
    }

    #[test]
    fn test_one_day_recency_floor() {
        // A 24h window with the last sample 20 hours old is still fresh.
        let now = at(2024, 1, 10);
        let latest = now - Duration::hours(20);
        let ts = vec![
            RawTimestamp::from(latest - Duration::days(2)),
            RawTimestamp::from(latest),
        ];
        let set = compute_available_ranges(&ts, Some(now));
        assert!(set.contains(Range::Day1));
    }

    #[test]
    fn test_unordered_mixed_inputs() {
        let ts = vec![
            RawTimestamp::from("2024-01-08"),
            RawTimestamp::Missing,
            RawTimestamp::from(at(2024, 1, 1).timestamp_millis()),
            RawTimestamp::from("nope"),
        ];
        let set = compute_available_ranges(&ts, Some(at(2024, 1, 8)));
        assert_eq!(set.keys(), vec!["24h", "7d", "max"]);
    }

    #[test]
    fn test_max_present_iff_any_valid() {
        let now = at(2024, 1, 8);
        for ts in [text(&[]), text(&["x"]), text(&["2020-05-05"]), text(&["x", "2030-01-01"])] {
            let any_valid = ts.iter().any(|t| t.epoch_ms().is_some());
            let set = compute_available_ranges(&ts, Some(now));
            assert_eq!(set.contains(Range::Max), any_valid);
        }
    }

    #[test]
    fn test_from_points_matches_timestamps() {
        let points: Vec<HistoryPoint> = ["2024-01-01", "2024-01-08"]
            .iter()
            .map(|t| HistoryPoint {
                timestamp: RawTimestamp::from(*t),
                ..Default::default()
            })
            .collect();
        let now = Some(at(2024, 1, 8));
        assert_eq!(
            compute_available_ranges_from_points(&points, now),
            compute_available_ranges(&text(&["2024-01-01", "2024-01-08"]), now)
        );
    }

    #[test]
    fn test_out_of_range_millis_are_discarded() {
        let stamps = [RawTimestamp::Millis(-1e300), RawTimestamp::Millis(1e300)];
        assert!(compute_available_ranges(&stamps, Some(at(2024, 1, 8))).is_empty());

        let mut mixed = stamps.to_vec();
        mixed.push(RawTimestamp::from("2024-01-08"));
        assert_eq!(
            compute_available_ranges(&mixed, Some(at(2024, 1, 8))),
            AvailableRanges::from([Range::Max])
        );
    }

    #[test]
    fn test_extreme_valid_millis_do_not_overflow() {
        let stamps = [
            RawTimestamp::Millis(-8.64e15),
            RawTimestamp::Millis(8.64e15),
        ];
        let set = compute_available_ranges(&stamps, Some(at(2024, 1, 8)));
        assert_eq!(set.len(), Range::ALL.len());
    }
}
