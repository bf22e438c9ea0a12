//! Testing utilities for windowing code.
//!
//! - **Assertions**: compare window results regardless of emission order
//! - **Fixtures**: ready-made timestamped datasets
//!
//! # Quick Start
//!
//! ```
//! use beamwindow::*;
//! use beamwindow::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let out = window_unkeyed(sparse_daily_events(), WindowStrategy::session(30 * day())?, Count)?;
//! assert_window_values(out, &[
//!     (Window::new(0, 50 * day()), 2),
//!     (Window::new(100 * day(), 130 * day()), 1),
//! ]);
//! # Ok(())
//! # }
//! ```
//!
//! # Assertion Functions
//!
//! - [`assert_collections_equal`]: exact order-dependent comparison
//! - [`assert_collections_unordered_equal`]: order-independent comparison
//! - [`assert_window_values`]: per-window values of an unkeyed run
//! - [`assert_keyed_results_equal`]: keyed results compared after sorting
//! - [`assert_all`]: every element matches a predicate

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
