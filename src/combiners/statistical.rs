//! Mean per window.

use super::CombineFn;

/// Running total and record count of one window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeanAcc {
    pub total: f64,
    pub n: u64,
}

/// Arithmetic mean of the values in a window, as `f64`.
///
/// A window only exists once a record was assigned to it, so `n` is never
/// zero at finish time; an empty accumulator still yields `0.0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AverageF64;

impl<V> CombineFn<V, MeanAcc, f64> for AverageF64
where
    V: Into<f64>,
{
    fn create(&self) -> MeanAcc {
        MeanAcc::default()
    }

    fn add_input(&self, acc: &mut MeanAcc, v: V) {
        acc.total += v.into();
        acc.n += 1;
    }

    fn merge(&self, acc: &mut MeanAcc, other: MeanAcc) {
        acc.total += other.total;
        acc.n += other.n;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: MeanAcc) -> f64 {
        match acc.n {
            0 => 0.0,
            n => acc.total / n as f64,
        }
    }
}
