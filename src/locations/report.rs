//! Aggregate counts over the whole location collection
//!
//! Both reports ignore the active filter and bucket every record into
//! exactly one tier, so the tier counts always add up to `total`.

use crate::core::location::Location;
use crate::core::util::{Elapsed, RecencyThresholds, elapsed_time};
use serde::{Deserialize, Serialize};

/// Record count per rating tier.
///
/// - high: `rate > 4`
/// - medium: `3 <= rate <= 4`
/// - low: everything else, including NaN
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

/// Record count per time since last update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyTierCounts {
    #[serde(rename = "just Now")]
    pub just_now: usize,

    #[serde(rename = "last Hour")]
    pub last_hour: usize,

    #[serde(rename = "today")]
    pub today: usize,

    #[serde(rename = "more then a day")]
    pub older: usize,

    pub total: usize,
}

pub fn count_by_rate(locs: &[Location]) -> RateTierCounts {
    let mut counts = locs.iter().fold(RateTierCounts::default(), |mut map, loc| {
        if loc.rate > 4.0 {
            map.high += 1;
        } else if loc.rate >= 3.0 {
            map.medium += 1;
        } else {
            map.low += 1;
        }
        map
    });
    counts.total = locs.len();
    counts
}

pub fn count_by_recency(
    locs: &[Location],
    now_ms: i64,
    thresholds: &RecencyThresholds,
) -> RecencyTierCounts {
    let mut counts = locs
        .iter()
        .fold(RecencyTierCounts::default(), |mut map, loc| {
            match elapsed_time(loc.updated_at, now_ms, thresholds) {
                Elapsed::JustNow => map.just_now += 1,
                Elapsed::LastHour => map.last_hour += 1,
                Elapsed::Today => map.today += 1,
                Elapsed::Older => map.older += 1,
            }
            map
        });
    counts.total = locs.len();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::Geo;
    use serde_json::json;

    const NOW: i64 = 1_706_562_160_181;

    fn rated(rate: f64) -> Location {
        Location::new("x", rate, Geo::default())
    }

    fn updated(ago_ms: i64) -> Location {
        let mut loc = Location::new("x", 3.0, Geo::default());
        loc.created_at = NOW - ago_ms;
        loc.updated_at = NOW - ago_ms;
        loc
    }

    #[test]
    fn test_rate_tiers_scenario() {
        let counts = count_by_rate(&[rated(2.0), rated(4.0), rated(5.0)]);
        assert_eq!(
            counts,
            RateTierCounts {
                high: 1,
                medium: 1,
                low: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_rate_tier_boundaries() {
        assert_eq!(count_by_rate(&[rated(4.0)]).medium, 1);
        assert_eq!(count_by_rate(&[rated(4.0001)]).high, 1);
        assert_eq!(count_by_rate(&[rated(3.0)]).medium, 1);
        assert_eq!(count_by_rate(&[rated(2.999)]).low, 1);
        assert_eq!(count_by_rate(&[rated(f64::NAN)]).low, 1);
        assert_eq!(count_by_rate(&[rated(-1.0)]).low, 1);
    }

    #[test]
    fn test_rate_tiers_sum_to_total() {
        let locs: Vec<Location> = (0..25).map(|i| rated(i as f64 * 0.25)).collect();
        let c = count_by_rate(&locs);
        assert_eq!(c.high + c.medium + c.low, c.total);
        assert_eq!(c.total, 25);
    }

    #[test]
    fn test_rate_tiers_empty() {
        assert_eq!(count_by_rate(&[]), RateTierCounts::default());
    }

    #[test]
    fn test_recency_tiers() {
        let locs = vec![
            updated(1_000),
            updated(5 * 60 * 1000),
            updated(3 * 60 * 60 * 1000),
            updated(2 * 24 * 60 * 60 * 1000),
            updated(30 * 1000),
        ];
        let counts = count_by_recency(&locs, NOW, &RecencyThresholds::default());
        assert_eq!(
            counts,
            RecencyTierCounts {
                just_now: 2,
                last_hour: 1,
                today: 1,
                older: 1,
                total: 5
            }
        );
    }

    #[test]
    fn test_recency_serialized_keys() {
        let counts = count_by_recency(&[updated(0)], NOW, &RecencyThresholds::default());
        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            json!({
                "just Now": 1,
                "last Hour": 0,
                "today": 0,
                "more then a day": 0,
                "total": 1
            })
        );
    }

    #[test]
    fn test_rate_serialized_keys() {
        let counts = count_by_rate(&[rated(5.0)]);
        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            json!({"high": 1, "medium": 0, "low": 0, "total": 1})
        );
    }
}
