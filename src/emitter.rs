//! Single-pass window completion.
//!
//! Input is bounded, so every window is complete once the last record has been
//! assigned. [`WindowAccumulator::finalize`] closes the accumulator and emits
//! one [`WindowedValue`] per `(key, window)`; any later `assign`/`push` fails
//! with [`WindowError::Closed`](crate::WindowError::Closed).
//!
//! Finalizing is idempotent: a repeated `finalize()` returns the results of
//! the first call. Results are unordered across windows; use
//! [`WindowEmitter::sorted`] when a deterministic order is needed.

use crate::accumulator::WindowAccumulator;
use crate::combiners::CombineFn;
use crate::window::Window;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::debug;

/// Final aggregate of one window of one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowedValue<K, O> {
    pub key: K,
    pub window: Window,
    pub value: O,
}

impl<K, O> WindowedValue<K, O> {
    pub fn new(key: K, window: Window, value: O) -> Self {
        Self { key, window, value }
    }
}

/// Turns accumulator tables into results and orders them for sinks.
pub struct WindowEmitter;

impl WindowEmitter {
    /// Finish every accumulator in `tables` with `combiner`.
    pub fn emit<K, V, A, O, C>(combiner: &C, tables: HashMap<K, BTreeMap<Window, A>>) -> Vec<WindowedValue<K, O>>
    where
        K: Clone,
        C: CombineFn<V, A, O>,
    {
        let mut out = Vec::with_capacity(tables.values().map(BTreeMap::len).sum());
        for (key, table) in tables {
            for (window, acc) in table {
                out.push(WindowedValue::new(key.clone(), window, combiner.finish(acc)));
            }
        }
        out
    }

    /// Sort results by `(key, window)`.
    pub fn sorted<K: Ord, O>(mut results: Vec<WindowedValue<K, O>>) -> Vec<WindowedValue<K, O>> {
        results.sort_by(|a, b| a.key.cmp(&b.key).then(a.window.cmp(&b.window)));
        results
    }

    /// Drop keys and sort by window; meant for unkeyed (`K = ()`) runs.
    pub fn by_window<K, O>(results: Vec<WindowedValue<K, O>>) -> Vec<(Window, O)> {
        let mut out: Vec<(Window, O)> = results.into_iter().map(|r| (r.window, r.value)).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Group results per key, each key's windows in ascending order.
    pub fn group_by_key<K: Eq + Hash, O>(results: Vec<WindowedValue<K, O>>) -> HashMap<K, Vec<(Window, O)>> {
        let mut grouped: HashMap<K, Vec<(Window, O)>> = HashMap::new();
        for r in results {
            grouped.entry(r.key).or_default().push((r.window, r.value));
        }
        for windows in grouped.values_mut() {
            windows.sort_by(|a, b| a.0.cmp(&b.0));
        }
        grouped
    }
}

impl<K, V, A, O, C> WindowAccumulator<K, V, A, O, C>
where
    K: Eq + Hash + Clone,
    C: CombineFn<V, A, O>,
{
    /// Close the accumulator and emit one result per `(key, window)`.
    ///
    /// The first call drains all window state; later calls return the same
    /// results again.
    pub fn finalize(&mut self) -> Vec<WindowedValue<K, O>>
    where
        O: Clone,
    {
        if let Some(done) = &self.emitted {
            return done.clone();
        }
        let out = self.drain_results();
        self.emitted = Some(out.clone());
        out
    }

    /// Consuming variant of [`finalize`](Self::finalize) that needs no `O: Clone`.
    pub fn into_results(mut self) -> Vec<WindowedValue<K, O>> {
        match self.emitted.take() {
            Some(done) => done,
            None => self.drain_results(),
        }
    }

    fn drain_results(&mut self) -> Vec<WindowedValue<K, O>> {
        let tables = std::mem::take(&mut self.keys);
        let out = WindowEmitter::emit::<K, V, A, O, C>(self.combiner.as_ref(), tables);
        debug!(
            strategy = %self.strategy,
            windows = out.len(),
            records = self.stats.records_assigned,
            merges = self.stats.session_merges,
            "finalized window accumulator"
        );
        out
    }
}
