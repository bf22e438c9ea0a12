//! Sum, Min, Max and ToList.

use super::CombineFn;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::mem::take;
use std::ops::Add;

/// Sum of the values assigned to a window. `T::default()` is the empty sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<T>);

impl<T> Sum<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, T, T> for Sum<T>
where
    T: Send + Sync + 'static + Add<Output = T> + Default,
{
    fn create(&self) -> T {
        T::default()
    }

    fn add_input(&self, acc: &mut T, v: T) {
        *acc = take(acc) + v;
    }

    fn merge(&self, acc: &mut T, other: T) {
        self.add_input(acc, other);
    }

    fn finish(&self, acc: T) -> T {
        acc
    }
}

/// Replace `slot` with `v` when it is empty or `v` compares as `wanted`.
fn keep_extreme<T: Ord>(slot: &mut Option<T>, v: T, wanted: Ordering) {
    match slot {
        Some(cur) if v.cmp(cur) != wanted => {}
        _ => *slot = Some(v),
    }
}

/// Smallest value in a window; `None` only if the window never saw a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(pub PhantomData<T>);

impl<T> Min<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, Option<T>, Option<T>> for Min<T>
where
    T: Send + Sync + 'static + Ord,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        keep_extreme(acc, v, Ordering::Less);
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(v) = other {
            keep_extreme(acc, v, Ordering::Less);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// Largest value in a window; `None` only if the window never saw a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(pub PhantomData<T>);

impl<T> Max<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, Option<T>, Option<T>> for Max<T>
where
    T: Send + Sync + 'static + Ord,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        keep_extreme(acc, v, Ordering::Greater);
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(v) = other {
            keep_extreme(acc, v, Ordering::Greater);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// Every value assigned to a window, in arrival order.
///
/// When two sessions merge, the values of the session that starts later are
/// appended after those of the earlier one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToList<T>(pub PhantomData<T>);

impl<T> ToList<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> CombineFn<T, Vec<T>, Vec<T>> for ToList<T>
where
    T: Send + Sync + 'static,
{
    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        acc.append(&mut other);
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}
