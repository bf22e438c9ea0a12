//! Pre-built timestamped datasets for windowing tests.

use crate::window::{Timestamp, Timestamped};
use serde::{Deserialize, Serialize};

const DAY: Timestamp = 86_400_000;

/// A page view from a web clickstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageView {
    pub user: String,
    pub path: String,
}

/// Clickstream with two users.
///
/// With a 30-minute session gap, `alice` has two sessions (3 views, then 1)
/// and `bob` has one session (2 views).
///
/// ```
/// use beamwindow::testing::clickstream;
///
/// assert_eq!(clickstream().len(), 6);
/// ```
#[must_use]
pub fn clickstream() -> Vec<(String, Timestamped<PageView>)> {
    let min: Timestamp = 60_000;
    let view = |user: &str, ts: Timestamp, path: &str| {
        (
            user.to_string(),
            Timestamped::new(ts, PageView { user: user.to_string(), path: path.to_string() }),
        )
    };
    vec![
        view("alice", 0, "/"),
        view("alice", 10 * min, "/products"),
        view("bob", 5 * min, "/"),
        view("alice", 25 * min, "/cart"),
        view("bob", 20 * min, "/about"),
        view("alice", 120 * min, "/"),
    ]
}

/// Temperature readings (whole degrees) from two sensors, one per 15 seconds
/// over one minute.
#[must_use]
pub fn sensor_readings() -> Vec<(&'static str, Timestamped<i32>)> {
    let s: Timestamp = 1_000;
    vec![
        ("sensor-a", Timestamped::new(0, 20)),
        ("sensor-a", Timestamped::new(15 * s, 22)),
        ("sensor-a", Timestamped::new(30 * s, 21)),
        ("sensor-a", Timestamped::new(45 * s, 25)),
        ("sensor-b", Timestamped::new(0, 30)),
        ("sensor-b", Timestamped::new(15 * s, 28)),
        ("sensor-b", Timestamped::new(30 * s, 29)),
        ("sensor-b", Timestamped::new(45 * s, 31)),
    ]
}

/// Events on day 0, day 20 and day 100, for 30-day session windows.
#[must_use]
pub fn sparse_daily_events() -> Vec<Timestamped<&'static str>> {
    vec![
        Timestamped::new(0, "signup"),
        Timestamped::new(20 * DAY, "purchase"),
        Timestamped::new(100 * DAY, "return"),
    ]
}

/// Length of one day in milliseconds.
#[must_use]
pub const fn day() -> Timestamp {
    DAY
}
