//! First-run demo data

use crate::core::location::{Geo, Location};
use crate::core::util::random_past_time;

/// The three sample locations written into an empty collection.
///
/// Each is last updated at `now_ms` and created at a random moment during
/// the preceding week.
pub fn demo_locations(now_ms: i64) -> Vec<Location> {
    vec![
        demo(
            "Ben Gurion Airport",
            2.0,
            Geo::new(32.0004465, 34.8706095, 12, "Ben Gurion Airport, 7015001, Israel"),
            now_ms,
        ),
        demo(
            "Dekel Beach",
            4.0,
            Geo::new(29.5393848, 34.9457792, 15, "Derekh Mitsrayim 1, Eilat, 88000, Israel"),
            now_ms,
        ),
        demo(
            "Dahab, Egypt",
            5.0,
            Geo::new(28.5096676, 34.5165187, 11, "Dahab, South Sinai, Egypt"),
            now_ms,
        ),
    ]
}

fn demo(name: &str, rate: f64, geo: Geo, now_ms: i64) -> Location {
    let mut loc = Location::new(name, rate, geo);
    loc.updated_at = now_ms;
    loc.created_at = random_past_time(now_ms);
    loc
}
