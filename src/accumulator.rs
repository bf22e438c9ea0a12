//! Per-key, per-window aggregation state.
//!
//! A [`WindowAccumulator`] owns one table per grouping key. Each table maps a
//! [`Window`] to the accumulator of the configured [`CombineFn`]:
//!
//! - **Fixed, sliding and global** windows are deterministic, so a record is
//!   folded into the state of every window it was assigned to, creating the
//!   state on first use.
//! - **Session** windows are provisional `[ts, ts + gap)` intervals. Before a
//!   provisional window is stored it is merged with every open window of the
//!   same key that overlaps or abuts it, until no neighbour touches the merged
//!   interval. Windows of one key therefore stay pairwise disjoint and
//!   non-touching, and the final partition does not depend on record order.
//!
//! Tables are `BTreeMap`s ordered by window start, so each session merge step
//! is a single `O(log K)` range lookup.
//!
//! Keys never interact: all merging is scoped to the record's key.
//!
//! ```
//! use beamwindow::*;
//!
//! let mut acc = WindowAccumulator::new(WindowStrategy::session(30)?, Count)?;
//! for ts in [0, 20, 100] {
//!     acc.push("user-1", Timestamped::new(ts, ()))?;
//! }
//! assert_eq!(
//!     acc.windows_for(&"user-1"),
//!     vec![Window::new(0, 50), Window::new(100, 130)]
//! );
//! # Ok::<(), beamwindow::WindowError>(())
//! ```

use crate::combiners::CombineFn;
use crate::emitter::WindowedValue;
use crate::error::WindowError;
use crate::strategy::WindowStrategy;
use crate::window::{Timestamp, Timestamped, Window};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// Counters describing what an accumulator has done so far.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorStats {
    /// Records accepted by `assign`/`push`.
    pub records_assigned: u64,
    /// Records that fell into no window (sliding windows with gaps).
    pub records_dropped: u64,
    /// Window states created, including provisional session windows.
    pub windows_created: u64,
    /// Session merge steps; each removes one window.
    pub session_merges: u64,
}

impl AccumulatorStats {
    /// Fold another accumulator's counters into these.
    pub fn absorb(&mut self, other: &AccumulatorStats) {
        self.records_assigned += other.records_assigned;
        self.records_dropped += other.records_dropped;
        self.windows_created += other.windows_created;
        self.session_merges += other.session_merges;
    }
}

/// Evolving mapping from `(key, window)` to aggregation state.
///
/// Generic over the key `K`, the record value `V` and a [`CombineFn`] `C`
/// with accumulator `A` and output `O`. Use `K = ()` for unkeyed streams.
pub struct WindowAccumulator<K, V, A, O, C> {
    pub(crate) strategy: WindowStrategy,
    pub(crate) combiner: Arc<C>,
    pub(crate) keys: HashMap<K, BTreeMap<Window, A>>,
    /// Cached results; `Some` once the accumulator has been finalized.
    pub(crate) emitted: Option<Vec<WindowedValue<K, O>>>,
    pub(crate) stats: AccumulatorStats,
    _m: PhantomData<fn(V)>,
}

impl<K, V, A, O, C> WindowAccumulator<K, V, A, O, C>
where
    K: Eq + Hash,
    C: CombineFn<V, A, O>,
{
    /// Create an accumulator for `strategy`.
    ///
    /// # Errors
    /// [`WindowError::Config`] if the strategy parameters are invalid.
    pub fn new(strategy: WindowStrategy, combiner: C) -> Result<Self, WindowError> {
        Self::with_shared(strategy, Arc::new(combiner))
    }

    /// Like [`WindowAccumulator::new`], sharing one combiner between
    /// accumulators (e.g. one accumulator per worker).
    pub fn with_shared(strategy: WindowStrategy, combiner: Arc<C>) -> Result<Self, WindowError> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            combiner,
            keys: HashMap::new(),
            emitted: None,
            stats: AccumulatorStats::default(),
            _m: PhantomData,
        })
    }

    pub fn strategy(&self) -> WindowStrategy {
        self.strategy
    }

    /// True once `finalize` has been called.
    pub fn is_closed(&self) -> bool {
        self.emitted.is_some()
    }

    pub fn stats(&self) -> AccumulatorStats {
        self.stats
    }

    /// Number of keys holding at least one open window.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of open windows across all keys.
    pub fn window_count(&self) -> usize {
        self.keys.values().map(BTreeMap::len).sum()
    }

    /// Open windows of `key` in ascending start order (empty after finalize).
    pub fn windows_for(&self, key: &K) -> Vec<Window> {
        self.keys
            .get(key)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Assign `record` to `windows` (as returned by [`WindowStrategy::assign`]).
    ///
    /// For session strategies the windows are covered by one provisional
    /// window (their span) holding the record once, which is merged with the
    /// touching open windows of `key` before it is stored. An empty `windows`
    /// slice counts the record as dropped.
    ///
    /// # Errors
    /// [`WindowError::Closed`] after `finalize`.
    pub fn assign(
        &mut self,
        key: K,
        record: Timestamped<V>,
        windows: &[Window],
    ) -> Result<(), WindowError>
    where
        V: Clone,
    {
        if self.is_closed() {
            return Err(WindowError::Closed);
        }
        self.stats.records_assigned += 1;
        let Some((last, rest)) = windows.split_last() else {
            self.stats.records_dropped += 1;
            trace!(ts = record.ts, "record falls into no window");
            return Ok(());
        };

        let merging = self.strategy.is_merging();
        let Self { combiner, keys, stats, .. } = self;
        let table = keys.entry(key).or_default();

        if merging {
            // several session windows for one record would merge anyway; fold the value once
            let span = rest.iter().fold(*last, |acc, w| acc.span(w));
            fold_into::<V, A, O, C>(combiner.as_ref(), table, stats, span, record.value, true);
            return Ok(());
        }
        for w in rest {
            fold_into::<V, A, O, C>(combiner.as_ref(), table, stats, *w, record.value.clone(), false);
        }
        fold_into::<V, A, O, C>(combiner.as_ref(), table, stats, *last, record.value, false);
        Ok(())
    }

    /// Run the configured assigner on `record.ts`, then [`assign`](Self::assign).
    ///
    /// # Errors
    /// - [`WindowError::Closed`] after `finalize`
    /// - [`WindowError::Overflow`] if the record's windows leave the timestamp range
    pub fn push(&mut self, key: K, record: Timestamped<V>) -> Result<(), WindowError>
    where
        V: Clone,
    {
        if self.is_closed() {
            return Err(WindowError::Closed);
        }
        let windows = self.strategy.assign(record.ts)?;
        self.assign(key, record, &windows)
    }

    /// Push every record of `input`, stopping at the first error.
    pub fn extend<I>(&mut self, input: I) -> Result<(), WindowError>
    where
        I: IntoIterator<Item = (K, Timestamped<V>)>,
        V: Clone,
    {
        for (k, r) in input {
            self.push(k, r)?;
        }
        Ok(())
    }
}

fn fold_into<V, A, O, C>(
    combiner: &C,
    table: &mut BTreeMap<Window, A>,
    stats: &mut AccumulatorStats,
    window: Window,
    value: V,
    merging: bool,
) where
    C: CombineFn<V, A, O>,
{
    if merging {
        let mut acc = combiner.create();
        combiner.add_input(&mut acc, value);
        stats.windows_created += 1;
        insert_merging::<V, A, O, C>(combiner, table, stats, window, acc);
    } else {
        let acc = table.entry(window).or_insert_with(|| {
            stats.windows_created += 1;
            combiner.create()
        });
        combiner.add_input(acc, value);
    }
}

/// Insert a session window, absorbing every open window it touches.
///
/// Open windows are disjoint and non-touching, so among those starting at or
/// before `window.end` only the last one can touch `window`. Absorbing it may
/// extend `window` to the left, which is why the lookup repeats.
fn insert_merging<V, A, O, C>(
    combiner: &C,
    table: &mut BTreeMap<Window, A>,
    stats: &mut AccumulatorStats,
    mut window: Window,
    mut acc: A,
) where
    C: CombineFn<V, A, O>,
{
    loop {
        let neighbour = table
            .range(..=Window::new(window.end, Timestamp::MAX))
            .next_back()
            .map(|(w, _)| *w)
            .filter(|w| w.touches(&window));
        let Some(w) = neighbour else {
            table.insert(window, acc);
            return;
        };
        let Some(mut other) = table.remove(&w) else {
            table.insert(window, acc);
            return;
        };
        // keep start order so order-preserving combiners concatenate earlier sessions first
        if w.start <= window.start {
            combiner.merge(&mut other, acc);
            acc = other;
        } else {
            combiner.merge(&mut acc, other);
        }
        let merged = window.span(&w);
        trace!(%window, neighbour = %w, %merged, "merged session windows");
        window = merged;
        stats.session_merges += 1;
    }
}
