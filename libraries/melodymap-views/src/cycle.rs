//! Fetch-cycle bookkeeping shared by the data views.

use crate::error::ViewError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::warn;

/// What a data view renders.
///
/// After a failed cycle `data` is `None` and `error` holds the single
/// user-facing message; nothing from the failed cycle is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    /// A cycle is in flight
    pub is_loading: bool,
    /// Result of the last successful cycle
    pub data: Option<T>,
    /// Message of the last failed cycle
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            is_loading: true,
            data: None,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    pub(crate) fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Apply the outcome of a cycle.
    ///
    /// Failures drop any previous data and keep only the user-facing message.
    pub fn settle(&mut self, outcome: Result<T, ViewError>) {
        self.is_loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Fetch cycle failed");
                self.data = None;
                self.error = Some(e.user_message().to_string());
            }
        }
    }
}

/// Tracks whether a view is mounted and which cycle is the newest.
///
/// A cycle's results may only be applied while [`is_current`] holds for
/// its generation.
///
/// [`is_current`]: CycleTracker::is_current
#[derive(Debug, Default)]
pub(crate) struct CycleTracker {
    mounted: AtomicBool,
    generation: AtomicU64,
}

impl CycleTracker {
    pub(crate) fn mount(&self) {
        self.mounted.store(true, Ordering::SeqCst);
    }

    pub(crate) fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Start a new cycle and return its generation.
    pub(crate) fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.is_mounted() && self.generation.load(Ordering::SeqCst) == generation
    }
}
