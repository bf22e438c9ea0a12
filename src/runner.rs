use crate::accumulator::{AccumulatorStats, WindowAccumulator};
use crate::combiners::CombineFn;
use crate::config::WindowingConfig;
use crate::emitter::WindowedValue;
use crate::error::WindowError;
#[cfg(feature = "metrics")]
use crate::metrics::MetricsCollector;
use crate::partition::partition_by_key;
use crate::strategy::WindowStrategy;
use crate::window::Timestamped;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecMode {
    /// One accumulator, records processed in input order.
    #[default]
    Sequential,
    /// Records sharded by key hash; one accumulator per shard on a rayon pool.
    Parallel {
        #[serde(default)]
        threads: Option<usize>,
        #[serde(default)]
        partitions: Option<usize>,
    },
}

impl ExecMode {
    pub fn validate(&self) -> Result<(), WindowError> {
        match *self {
            Self::Parallel { threads: Some(0), .. } => {
                Err(WindowError::config("parallel thread count must be > 0"))
            }
            Self::Parallel { partitions: Some(0), .. } => {
                Err(WindowError::config("parallel partition count must be > 0"))
            }
            _ => Ok(()),
        }
    }
}

/// Drives records through assignment, accumulation and emission.
pub struct Runner {
    pub mode: ExecMode,
    /// Shard count for parallel runs that do not set `partitions`.
    pub default_partitions: usize,
    /// Truncate input after this many records.
    pub max_records: Option<usize>,
    #[cfg(feature = "metrics")]
    pub metrics: Option<MetricsCollector>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Sequential,
            default_partitions: 2 * num_cpus::get().max(2),
            max_records: None,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }
}

impl Runner {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self { mode: ExecMode::Parallel { threads, partitions }, ..Self::default() }
    }

    pub fn from_config(cfg: &WindowingConfig) -> Self {
        Self { mode: cfg.mode, max_records: cfg.max_records, ..Self::default() }
    }

    /// Window and aggregate keyed `input`, returning one result per `(key, window)`.
    ///
    /// Results are unordered; see [`WindowEmitter::sorted`](crate::WindowEmitter::sorted).
    ///
    /// # Errors
    /// - [`WindowError::Config`] for an invalid strategy or parallelism setting
    /// - [`WindowError::Overflow`] if a record's windows leave the timestamp range
    pub fn run<K, V, A, O, C, I>(
        &self,
        strategy: WindowStrategy,
        combiner: C,
        input: I,
    ) -> Result<Vec<WindowedValue<K, O>>, WindowError>
    where
        K: Eq + Hash + Clone + Send,
        V: Clone + Send,
        O: Send,
        C: CombineFn<V, A, O>,
        I: IntoIterator<Item = (K, Timestamped<V>)>,
    {
        strategy.validate()?;
        self.mode.validate()?;
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_start();
        }

        let limit = self.max_records.unwrap_or(usize::MAX);
        let records = input.into_iter().take(limit);
        let combiner = Arc::new(combiner);

        let (stats, results) = match self.mode {
            ExecMode::Sequential => {
                info!(%strategy, "starting sequential windowing run");
                let mut acc = WindowAccumulator::<K, V, A, O, C>::with_shared(strategy, combiner)?;
                acc.extend(records)?;
                (acc.stats(), acc.into_results())
            }
            ExecMode::Parallel { threads, partitions } => {
                let records: Vec<(K, Timestamped<V>)> = records.collect();
                let parts = partitions
                    .unwrap_or(self.default_partitions)
                    .max(1)
                    .min(records.len().max(1));
                info!(%strategy, records = records.len(), partitions = parts, "starting parallel windowing run");
                let shards = partition_by_key(records, parts)?;
                match threads {
                    Some(t) => rayon::ThreadPoolBuilder::new()
                        .num_threads(t)
                        .build()
                        .map_err(|e| WindowError::config(format!("cannot build worker pool: {e}")))?
                        .install(|| run_shards::<K, V, A, O, C>(strategy, &combiner, shards))?,
                    None => run_shards::<K, V, A, O, C>(strategy, &combiner, shards)?,
                }
            }
        };

        info!(
            records = stats.records_assigned,
            dropped = stats.records_dropped,
            merges = stats.session_merges,
            windows = results.len(),
            "windowing run finished"
        );
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_stats(&stats);
            m.increment_counter("windows_emitted", results.len() as u64);
            m.record_end();
        }
        Ok(results)
    }
}

/// Accumulate and finalize every shard on the current rayon pool.
fn run_shards<K, V, A, O, C>(
    strategy: WindowStrategy,
    combiner: &Arc<C>,
    shards: Vec<Vec<(K, Timestamped<V>)>>,
) -> Result<(AccumulatorStats, Vec<WindowedValue<K, O>>), WindowError>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    O: Send,
    C: CombineFn<V, A, O>,
{
    let per_shard: Vec<(AccumulatorStats, Vec<WindowedValue<K, O>>)> = shards
        .into_par_iter()
        .enumerate()
        .map(|(i, shard)| -> Result<_, WindowError> {
            let mut acc = WindowAccumulator::<K, V, A, O, C>::with_shared(strategy, Arc::clone(combiner))?;
            acc.extend(shard)?;
            debug!(shard = i, keys = acc.key_count(), windows = acc.window_count(), "shard accumulated");
            Ok((acc.stats(), acc.into_results()))
        })
        .collect::<Result<Vec<_>, WindowError>>()?;

    let mut stats = AccumulatorStats::default();
    let mut results = Vec::new();
    for (s, r) in per_shard {
        stats.absorb(&s);
        results.extend(r);
    }
    Ok((stats, results))
}

/// Window keyed records sequentially.
///
/// ```
/// use beamwindow::*;
///
/// let events = vec![
///     ("a", Timestamped::new(5, 1u64)),
///     ("a", Timestamped::new(35, 1)),
///     ("b", Timestamped::new(40, 1)),
/// ];
/// let out = WindowEmitter::sorted(window_keyed(events, WindowStrategy::fixed(30)?, Count)?);
/// assert_eq!(out[0], WindowedValue::new("a", Window::new(0, 30), 1));
/// assert_eq!(out.len(), 3);
/// # Ok::<(), beamwindow::WindowError>(())
/// ```
pub fn window_keyed<K, V, A, O, C, I>(
    input: I,
    strategy: WindowStrategy,
    combiner: C,
) -> Result<Vec<WindowedValue<K, O>>, WindowError>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    O: Send,
    C: CombineFn<V, A, O>,
    I: IntoIterator<Item = (K, Timestamped<V>)>,
{
    Runner::sequential().run(strategy, combiner, input)
}

/// Window keyed records in parallel, sharding keys over the rayon pool.
pub fn window_keyed_par<K, V, A, O, C, I>(
    input: I,
    strategy: WindowStrategy,
    combiner: C,
) -> Result<Vec<WindowedValue<K, O>>, WindowError>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    O: Send,
    C: CombineFn<V, A, O>,
    I: IntoIterator<Item = (K, Timestamped<V>)>,
{
    Runner::parallel(None, None).run(strategy, combiner, input)
}

/// Window an unkeyed stream; every record shares the unit key.
pub fn window_unkeyed<V, A, O, C, I>(
    input: I,
    strategy: WindowStrategy,
    combiner: C,
) -> Result<Vec<WindowedValue<(), O>>, WindowError>
where
    V: Clone + Send,
    O: Send,
    C: CombineFn<V, A, O>,
    I: IntoIterator<Item = Timestamped<V>>,
{
    Runner::sequential().run(strategy, combiner, input.into_iter().map(|r| ((), r)))
}

/// Run keyed `input` with everything taken from `cfg`.
pub fn run_with_config<K, V, A, O, C, I>(
    cfg: &WindowingConfig,
    combiner: C,
    input: I,
) -> Result<Vec<WindowedValue<K, O>>, WindowError>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
    O: Send,
    C: CombineFn<V, A, O>,
    I: IntoIterator<Item = (K, Timestamped<V>)>,
{
    Runner::from_config(cfg).run(cfg.strategy, combiner, input)
}
