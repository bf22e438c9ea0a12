//! Error type shared by the windowing engine.
//!
//! Every operation in the engine is in-memory and pure apart from the
//! accumulator's closed flag, so errors are few and always fatal to the call
//! that raised them:
//!
//! - [`WindowError::Config`] for invalid strategy or driver parameters
//! - [`WindowError::Closed`] for assignments after the accumulator was finalized
//! - [`WindowError::Overflow`] when window bounds leave the `i64` range

use crate::window::Timestamp;

/// Errors raised by window assignment, accumulation and emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Invalid configuration, e.g. a non-positive width, period or gap.
    #[error("invalid windowing configuration: {reason}")]
    Config { reason: String },

    /// `assign`/`push` was called after `finalize`.
    #[error("window accumulator is closed; no records may be assigned after finalize")]
    Closed,

    /// Window arithmetic for `ts` does not fit in a `Timestamp`.
    #[error("window bounds for timestamp {ts} overflow the timestamp range")]
    Overflow { ts: Timestamp },
}

impl WindowError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True for [`WindowError::Config`].
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// True for [`WindowError::Closed`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
