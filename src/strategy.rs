//! Window assignment strategies.
//!
//! A [`WindowStrategy`] is a closed set of windowing functions. Given a record's
//! timestamp, [`WindowStrategy::assign`] returns the windows the record belongs
//! to. Assignment is a pure function of the strategy parameters and the
//! timestamp, so the same timestamp always lands in the same windows and the
//! strategy can be shared freely across threads.
//!
//! | Strategy | Windows per record | Boundaries |
//! |----------|--------------------|------------|
//! | [`Fixed`](WindowStrategy::Fixed) | exactly 1 | `[n*W + O, (n+1)*W + O)` |
//! | [`Sliding`](WindowStrategy::Sliding) | `ceil(W/P)` (0 in gaps when `P > W`) | `[k*P + O, k*P + O + W)` |
//! | [`Session`](WindowStrategy::Session) | 1 provisional, merged later | `[ts, ts + G)` |
//! | [`Global`](WindowStrategy::Global) | exactly 1 | all time |
//!
//! ## Example
//! ```
//! use beamwindow::{Window, WindowStrategy};
//!
//! let fixed = WindowStrategy::fixed(30)?;
//! assert_eq!(fixed.assign(35)?, vec![Window::new(30, 60)]);
//!
//! let sliding = WindowStrategy::sliding(90, 30)?;
//! assert_eq!(
//!     sliding.assign(45)?,
//!     vec![Window::new(-30, 60), Window::new(0, 90), Window::new(30, 120)]
//! );
//! # Ok::<(), beamwindow::WindowError>(())
//! ```

use crate::error::WindowError;
use crate::window::{Timestamp, Window, phase};
use serde::{Deserialize, Serialize};

/// How records are grouped into windows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowStrategy {
    /// Non-overlapping windows of `width`, shifted by `offset`.
    Fixed {
        width: i64,
        #[serde(default)]
        offset: i64,
    },
    /// Windows of `width` starting every `period`, shifted by `offset`.
    Sliding {
        width: i64,
        period: i64,
        #[serde(default)]
        offset: i64,
    },
    /// Per-key windows closed by `gap` units of inactivity.
    Session { gap: i64 },
    /// One window over all time.
    #[default]
    Global,
}

impl WindowStrategy {
    /// Fixed windows of `width` with no offset.
    pub fn fixed(width: i64) -> Result<Self, WindowError> {
        Self::fixed_with_offset(width, 0)
    }

    pub fn fixed_with_offset(width: i64, offset: i64) -> Result<Self, WindowError> {
        let s = Self::Fixed { width, offset };
        s.validate()?;
        Ok(s)
    }

    /// Sliding windows of `width` emitted every `period`.
    pub fn sliding(width: i64, period: i64) -> Result<Self, WindowError> {
        Self::sliding_with_offset(width, period, 0)
    }

    pub fn sliding_with_offset(width: i64, period: i64, offset: i64) -> Result<Self, WindowError> {
        let s = Self::Sliding { width, period, offset };
        s.validate()?;
        Ok(s)
    }

    /// Session windows separated by at least `gap`.
    pub fn session(gap: i64) -> Result<Self, WindowError> {
        let s = Self::Session { gap };
        s.validate()?;
        Ok(s)
    }

    pub fn global() -> Self {
        Self::Global
    }

    /// Check that every width, period and gap is strictly positive.
    ///
    /// A sliding `period` larger than `width` is accepted: it leaves gaps
    /// between consecutive windows.
    pub fn validate(&self) -> Result<(), WindowError> {
        match *self {
            Self::Fixed { width, .. } if width <= 0 => {
                Err(WindowError::config(format!("fixed window width must be > 0, got {width}")))
            }
            Self::Sliding { width, .. } if width <= 0 => {
                Err(WindowError::config(format!("sliding window width must be > 0, got {width}")))
            }
            Self::Sliding { period, .. } if period <= 0 => {
                Err(WindowError::config(format!("sliding window period must be > 0, got {period}")))
            }
            Self::Session { gap } if gap <= 0 => {
                Err(WindowError::config(format!("session gap must be > 0, got {gap}")))
            }
            _ => Ok(()),
        }
    }

    /// Only session windows are merged after assignment.
    #[inline]
    pub fn is_merging(&self) -> bool {
        matches!(self, Self::Session { .. })
    }

    /// Windows containing `ts`, in ascending start order.
    ///
    /// # Errors
    /// - [`WindowError::Config`] if the strategy parameters are invalid
    /// - [`WindowError::Overflow`] if a window bound does not fit in a [`Timestamp`]
    pub fn assign(&self, ts: Timestamp) -> Result<Vec<Window>, WindowError> {
        self.validate()?;
        let overflow = || WindowError::Overflow { ts };
        match *self {
            Self::Fixed { width, offset } => {
                let start = ts.checked_sub(phase(ts, offset, width)).ok_or_else(overflow)?;
                let end = start.checked_add(width).ok_or_else(overflow)?;
                Ok(vec![Window::new(start, end)])
            }
            Self::Sliding { width, period, offset } => {
                // latest window start at or before ts; walk back one period at a time
                let mut start = ts.checked_sub(phase(ts, offset, period)).ok_or_else(overflow)?;
                let mut windows = Vec::new();
                loop {
                    let end = start.checked_add(width).ok_or_else(overflow)?;
                    if end <= ts {
                        break;
                    }
                    windows.push(Window::new(start, end));
                    start = match start.checked_sub(period) {
                        Some(s) => s,
                        // the previous window would start before Timestamp::MIN
                        None if end.checked_sub(period).is_some_and(|e| e > ts) => {
                            return Err(overflow());
                        }
                        None => break,
                    };
                }
                windows.reverse();
                Ok(windows)
            }
            Self::Session { gap } => {
                let end = ts.checked_add(gap).ok_or_else(overflow)?;
                Ok(vec![Window::new(ts, end)])
            }
            Self::Global => Ok(vec![Window::global()]),
        }
    }
}

impl std::fmt::Display for WindowStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed { width, offset: 0 } => write!(f, "Fixed({width})"),
            Self::Fixed { width, offset } => write!(f, "Fixed({width}, offset={offset})"),
            Self::Sliding { width, period, offset: 0 } => write!(f, "Sliding({width}, {period})"),
            Self::Sliding { width, period, offset } => {
                write!(f, "Sliding({width}, {period}, offset={offset})")
            }
            Self::Session { gap } => write!(f, "Session({gap})"),
            Self::Global => write!(f, "Global"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_with_offset_shifts_boundaries() {
        let s = WindowStrategy::fixed_with_offset(10, 3).unwrap();
        assert_eq!(s.assign(3).unwrap(), vec![Window::new(3, 13)]);
        assert_eq!(s.assign(2).unwrap(), vec![Window::new(-7, 3)]);
    }

    #[test]
    fn fixed_negative_timestamps_floor() {
        let s = WindowStrategy::fixed(30).unwrap();
        assert_eq!(s.assign(-1).unwrap(), vec![Window::new(-30, 0)]);
        assert_eq!(s.assign(-30).unwrap(), vec![Window::new(-30, 0)]);
    }

    #[test]
    fn sliding_with_gaps_can_yield_no_windows() {
        // period 30, width 10: [0,10), [30,40), ...
        let s = WindowStrategy::sliding(10, 30).unwrap();
        assert_eq!(s.assign(5).unwrap(), vec![Window::new(0, 10)]);
        assert!(s.assign(15).unwrap().is_empty());
    }

    #[test]
    fn sliding_with_offset_shifts_boundaries() {
        let s = WindowStrategy::sliding_with_offset(10, 5, 3).unwrap();
        assert_eq!(s.assign(4).unwrap(), vec![Window::new(-2, 8), Window::new(3, 13)]);
        // 3 starts a window and 13 ends the later one
        assert_eq!(s.assign(3).unwrap(), vec![Window::new(-2, 8), Window::new(3, 13)]);
        assert_eq!(s.assign(-3).unwrap(), vec![Window::new(-12, -2), Window::new(-7, 3)]);
    }

    #[test]
    fn large_offsets_do_not_overflow() {
        // ts - offset leaves the i64 range, the windows themselves do not
        let f = WindowStrategy::fixed_with_offset(10, Timestamp::MAX).unwrap();
        let w = f.assign(-3).unwrap()[0];
        assert!(w.contains(-3));
        assert_eq!((i128::from(w.start) - i128::from(Timestamp::MAX)).rem_euclid(10), 0);

        let s = WindowStrategy::sliding_with_offset(10, 5, Timestamp::MAX).unwrap();
        let windows = s.assign(-3).unwrap();
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| w.contains(-3)));
    }

    #[test]
    fn sliding_windows_at_the_lower_limit() {
        let min = Timestamp::MIN;
        let s = WindowStrategy::sliding_with_offset(10, 5, 3).unwrap();
        // MIN + 6 - 3 is a multiple of 5; both windows fit
        assert_eq!(
            s.assign(min + 6).unwrap(),
            vec![Window::new(min + 1, min + 11), Window::new(min + 6, min + 16)]
        );
        // MIN + 1 also lies in [MIN - 4, MIN + 6), which cannot be represented
        assert_eq!(s.assign(min + 1), Err(WindowError::Overflow { ts: min + 1 }));
    }

    #[test]
    fn session_window_overflow_is_reported() {
        let s = WindowStrategy::session(10).unwrap();
        assert_eq!(
            s.assign(Timestamp::MAX - 5),
            Err(WindowError::Overflow { ts: Timestamp::MAX - 5 })
        );
    }

    #[test]
    fn invalid_parameters_are_config_errors() {
        assert!(WindowStrategy::fixed(0).unwrap_err().is_config());
        assert!(WindowStrategy::sliding(10, 0).unwrap_err().is_config());
        assert!(WindowStrategy::sliding(-1, 5).unwrap_err().is_config());
        assert!(WindowStrategy::session(-3).unwrap_err().is_config());
        // hand-built invalid strategies fail at assignment time
        let bad = WindowStrategy::Fixed { width: 0, offset: 0 };
        assert!(bad.assign(1).unwrap_err().is_config());
    }

    #[test]
    fn serde_uses_kind_tag() {
        let s: WindowStrategy =
            serde_json::from_str(r#"{"kind":"sliding","width":90,"period":30}"#).unwrap();
        assert_eq!(s, WindowStrategy::Sliding { width: 90, period: 30, offset: 0 });
        let g: WindowStrategy = serde_json::from_str(r#"{"kind":"global"}"#).unwrap();
        assert_eq!(g, WindowStrategy::Global);
    }
}
