use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Event-time timestamp. Units are chosen by the caller (docs and tests use milliseconds).
pub type Timestamp = i64;

/// A closed-open time range: [start, end).
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Eq)]
pub struct Window {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Window {
    #[inline]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// The single window covering all time.
    #[inline]
    pub const fn global() -> Self {
        Self { start: Timestamp::MIN, end: Timestamp::MAX }
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        *self == Self::global()
    }

    /// Last timestamp that still falls inside the window (`end - 1`).
    #[inline]
    pub fn max_timestamp(&self) -> Timestamp {
        self.end - 1
    }

    /// Width of the window, saturating for [`Window::global`].
    #[inline]
    pub fn len(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }

    /// Overlapping or abutting (`a.end == b.start`) windows touch.
    #[inline]
    pub fn touches(&self, other: &Window) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest window covering both `self` and `other`.
    #[inline]
    pub fn span(&self, other: &Window) -> Window {
        Window { start: self.start.min(other.start), end: self.end.max(other.end) }
    }
}

/// Distance from the latest boundary `offset + k * period` at or before `ts`.
///
/// Always in `0..period`. Computed in `i128` so that any `ts`/`offset` pair is
/// valid, even when `ts - offset` does not fit in a [`Timestamp`].
#[inline]
pub(crate) fn phase(ts: Timestamp, offset: Timestamp, period: i64) -> i64 {
    let r = (i128::from(ts) - i128::from(offset)).rem_euclid(i128::from(period));
    // r < period, so it fits back into i64
    r as i64
}

// Hash/Ord so Windows can be used as keys and sorted deterministically.
impl PartialEq for Window {
    #[inline] fn eq(&self, other: &Self) -> bool { self.start == other.start && self.end == other.end }
}
impl Hash for Window {
    #[inline] fn hash<H: Hasher>(&self, state: &mut H) { self.start.hash(state); self.end.hash(state); }
}
impl Ord for Window {
    #[inline] fn cmp(&self, o: &Self) -> std::cmp::Ordering {
        self.start.cmp(&o.start).then(self.end.cmp(&o.end))
    }
}
impl PartialOrd for Window {
    #[inline] fn partial_cmp(&self, o: &Self) -> Option<std::cmp::Ordering> { Some(self.cmp(o)) }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_global() {
            write!(f, "[global)")
        } else {
            write!(f, "[{}, {})", self.start, self.end)
        }
    }
}

/// A timestamped element (event-time semantics).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamped<T> {
    pub ts: Timestamp,
    pub value: T,
}

impl<T> Timestamped<T> {
    #[inline] pub fn new(ts: Timestamp, value: T) -> Self { Self { ts, value } }
}

/// Attach event timestamps to plain records using a user function.
///
/// ```
/// use beamwindow::with_timestamps;
///
/// let rows = vec![(5, "a"), (35, "b")];
/// let stamped = with_timestamps(rows, |r| r.0);
/// assert_eq!(stamped[1].ts, 35);
/// ```
pub fn with_timestamps<T, F>(items: impl IntoIterator<Item = T>, ts_fn: F) -> Vec<Timestamped<T>>
where
    F: Fn(&T) -> Timestamp,
{
    items.into_iter().map(|t| Timestamped::new(ts_fn(&t), t)).collect()
}
