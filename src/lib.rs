//! # beamwindow
//!
//! **Event-time windowing** for bounded record streams, in the style of Apache
//! Beam's `WindowInto` + `CombinePerKey`. Records are assigned to windows,
//! aggregated per `(key, window)` with a pluggable combiner and emitted once the
//! input is exhausted.
//!
//! ## Key Features
//!
//! - **Fixed, sliding, session and global windows** via one closed [`WindowStrategy`] enum
//! - **Order-independent session merging** - overlapping or touching sessions merge per key
//! - **Pluggable aggregation** - [`Count`], [`Sum`], [`Min`], [`Max`], [`ToList`], [`AverageF64`],
//!   or any custom [`CombineFn`]
//! - **Sequential and parallel execution** - parallel runs shard keys over a Rayon pool
//! - **Serde configuration** - load a [`WindowingConfig`] from JSON
//! - **Metrics** (feature `metrics`) - counters for records, windows and merges
//!
//! ## Quick Start
//!
//! ```
//! use beamwindow::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! // Count events per 30-unit window
//! let events = vec![
//!     Timestamped::new(5, "a"),
//!     Timestamped::new(35, "b"),
//!     Timestamped::new(40, "c"),
//!     Timestamped::new(65, "d"),
//! ];
//!
//! let counts = window_unkeyed(events, WindowStrategy::fixed(30)?, Count)?;
//! let counts = WindowEmitter::by_window(counts);
//!
//! assert_eq!(counts, vec![
//!     (Window::new(0, 30), 1),
//!     (Window::new(30, 60), 2),
//!     (Window::new(60, 90), 1),
//! ]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Windows and strategies
//!
//! A [`Window`] is a half-open interval `[start, end)` of [`Timestamp`]s. A
//! [`WindowStrategy`] maps a timestamp to the windows that contain it:
//!
//! - [`WindowStrategy::fixed`] - one window of a given width
//! - [`WindowStrategy::sliding`] - every window of a given width starting at multiples of a period
//! - [`WindowStrategy::session`] - a provisional `[ts, ts + gap)` window, merged later
//! - [`WindowStrategy::global`] - a single window covering all time
//!
//! ### Accumulation
//!
//! A [`WindowAccumulator`] holds per-key window state. Session windows of the
//! same key that overlap or abut are merged; keys never interact.
//!
//! ### Emission
//!
//! [`WindowAccumulator::finalize`] closes the accumulator and produces one
//! [`WindowedValue`] per `(key, window)`. Later assignments fail with
//! [`WindowError::Closed`].
//!
//! ### Sessions per user
//!
//! ```
//! use beamwindow::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let clicks = vec![
//!     ("alice", Timestamped::new(0, ())),
//!     ("alice", Timestamped::new(20, ())),
//!     ("alice", Timestamped::new(100, ())),
//!     ("bob", Timestamped::new(10, ())),
//! ];
//!
//! let sessions = window_keyed(clicks, WindowStrategy::session(30)?, Count)?;
//! let sessions = WindowEmitter::sorted(sessions);
//!
//! assert_eq!(sessions, vec![
//!     WindowedValue::new("alice", Window::new(0, 50), 2),
//!     WindowedValue::new("alice", Window::new(100, 130), 1),
//!     WindowedValue::new("bob", Window::new(10, 40), 1),
//! ]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Modes
//!
//! - **Sequential** - [`Runner::sequential`] / [`window_keyed`] - single accumulator, input order
//! - **Parallel** - [`Runner::parallel`] / [`window_keyed_par`] - keys sharded by hash, one
//!   accumulator per shard
//!
//! Both modes produce the same results (up to ordering).
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: `info` for run boundaries, `debug` for
//! accumulator finalization and shards, `trace` for individual session merges.
//! Install a subscriber in your binary to see them.
//!
//! ## Module Overview
//!
//! - [`window`] - `Window`, `Timestamp`, `Timestamped`
//! - [`strategy`] - window assignment
//! - [`accumulator`] - per-key window state and session merging
//! - [`emitter`] - finalization and result ordering
//! - [`combiners`] - built-in aggregation functions
//! - [`runner`] - sequential and parallel drivers
//! - [`config`] - serde run configuration
//! - [`partition`] - bucketing records (the `Partition` transform)
//! - [`metrics`] - run metrics
//! - [`testing`] - assertions and fixtures for tests

pub mod accumulator;
pub mod combiners;
pub mod config;
pub mod emitter;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod partition;
pub mod runner;
pub mod strategy;
pub mod testing;
pub mod window;

// General re-exports
pub use accumulator::{AccumulatorStats, WindowAccumulator};
pub use combiners::{AverageF64, CombineFn, Count, Max, Min, Sum, ToList};
pub use config::WindowingConfig;
pub use emitter::{WindowEmitter, WindowedValue};
pub use error::WindowError;
pub use partition::{key_bucket, partition, partition_by_key};
pub use runner::{ExecMode, Runner, run_with_config, window_keyed, window_keyed_par, window_unkeyed};
pub use strategy::WindowStrategy;
pub use window::{Timestamp, Timestamped, Window, with_timestamps};
