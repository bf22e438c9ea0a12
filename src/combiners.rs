//! Per-window aggregation functions.
//!
//! Every window's state is an accumulator produced by a [`CombineFn`]. The
//! accumulator grows with [`CombineFn::add_input`] as records are assigned,
//! two accumulators are joined with [`CombineFn::merge`] when session windows
//! merge, and [`CombineFn::finish`] turns the final accumulator into the value
//! emitted for the window.
//!
//! Combiners must be associative and commutative: session merging and
//! parallel execution may combine partial states in any order.
//!
//! Built-ins:
//!
//! - [`Count`] -- number of records.
//! - [`Sum<T>`] -- sum of values.
//! - [`Min<T>`] / [`Max<T>`] -- smallest/largest value.
//! - [`ToList<T>`] -- all values, in insertion order.
//! - [`AverageF64`] -- average as `f64` (values convertible to `f64`).
//!
//! # Examples
//! ```
//! use beamwindow::*;
//!
//! let events = vec![Timestamped::new(5, 2u64), Timestamped::new(35, 3), Timestamped::new(40, 4)];
//! let sums = window_unkeyed(events, WindowStrategy::fixed(30)?, Sum::<u64>::new())?;
//! let sums = WindowEmitter::sorted(sums);
//! assert_eq!(sums[0].value, 2);
//! assert_eq!(sums[1].value, 7);
//! # anyhow::Result::<()>::Ok(())
//! ```

mod basic;
mod statistical;

pub use basic::{Max, Min, Sum, ToList};
pub use statistical::{AverageF64, MeanAcc};

/// An associative, commutative aggregation over values `V` with accumulator `A`
/// and output `O`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    /// Fresh accumulator for a new window.
    fn create(&self) -> A;
    /// Fold one value into the accumulator.
    fn add_input(&self, acc: &mut A, v: V);
    /// Fold another accumulator (e.g. from a merged session) into `acc`.
    fn merge(&self, acc: &mut A, other: A);
    /// Produce the emitted value.
    fn finish(&self, acc: A) -> O;
}

/// Number of records per window.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> CombineFn<V, u64, u64> for Count {
    fn create(&self) -> u64 {
        0
    }

    fn add_input(&self, acc: &mut u64, _v: V) {
        *acc += 1;
    }

    fn merge(&self, acc: &mut u64, other: u64) {
        *acc += other;
    }

    fn finish(&self, acc: u64) -> u64 {
        acc
    }
}
