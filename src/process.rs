//! Observable lifecycle of one playlist build.
//!
//! The builder is the only writer; any number of observers read snapshots of
//! the current value through a `tokio::sync::watch` receiver.

use crate::{error::RunFailure, types::PlaylistDescriptor};

/// Lifecycle of a remote process.
///
/// Exactly one variant is active at a time. Within a run `Pending.progress`
/// is in `[0, 100]` and never decreases.
#[derive(Debug, Clone, PartialEq)]
pub enum Process<T, E> {
    /// Nothing has run yet, or the state was reset.
    Unresolved,
    /// A run is in flight.
    Pending { status: String, progress: f64 },
    /// The run completed.
    Ready { value: T },
    /// The run terminated abnormally.
    Errored { error: E },
}

/// Process state published by [`crate::builder::Playlistify`].
pub type PlaylistifyProcess = Process<PlaylistDescriptor, RunFailure>;

impl<T, E> Default for Process<T, E> {
    fn default() -> Self {
        Process::Unresolved
    }
}

impl<T, E> Process<T, E> {
    pub fn pending(status: impl Into<String>, progress: f64) -> Self {
        Process::Pending {
            status: status.into(),
            progress: progress.clamp(0.0, 100.0),
        }
    }

    /// Next pending state derived from this one.
    ///
    /// Fields left as `None` keep their previous value. Progress is clamped
    /// to `[0, 100]` and never moves backwards.
    pub fn advance(&self, status: Option<&str>, progress: Option<f64>) -> Self {
        match self {
            Process::Pending {
                status: prev_status,
                progress: prev_progress,
            } => Process::Pending {
                status: status.unwrap_or(prev_status.as_str()).to_string(),
                progress: progress
                    .map_or(*prev_progress, |p| p.clamp(0.0, 100.0).max(*prev_progress)),
            },
            _ => Process::pending(status.unwrap_or_default(), progress.unwrap_or(0.0)),
        }
    }

    /// Progress in percent. `Ready` counts as complete.
    pub fn progress(&self) -> f64 {
        match self {
            Process::Pending { progress, .. } => *progress,
            Process::Ready { .. } => 100.0,
            Process::Unresolved | Process::Errored { .. } => 0.0,
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Process::Pending { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Process::Ready { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_errored(&self) -> Option<&E> {
        match self {
            Process::Errored { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Process::Unresolved)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Process::Pending { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Process::Ready { .. } | Process::Errored { .. })
    }
}
