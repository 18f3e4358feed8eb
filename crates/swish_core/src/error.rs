//! Transition error types

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the transition system
///
/// These are always returned inside a [`TransitionResult`] value; the public
/// navigation API never panics and never propagates an `Err` directly, so
/// callers can await every navigation without extra error plumbing.
#[derive(Error, Debug)]
pub enum TransitionError {
    /// The requested operation is not valid for the current stack shape
    /// (e.g. pop with nothing to go back to)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// An awaited lifecycle hook returned an error
    #[error("Lifecycle callback failed: {0}")]
    Lifecycle(#[source] anyhow::Error),

    /// The animation driver or synchronized-swap primitive failed
    #[error("Animation failed: {0}")]
    Animation(String),
}

/// Outcome of one navigation episode
///
/// `success: false` carries the error and the elapsed wall time up to the
/// failure point. A stack mutation that committed before the failure is not
/// rolled back.
#[derive(Debug)]
pub struct TransitionResult {
    /// Whether the transition ran to completion
    pub success: bool,
    /// Wall time spent in the episode
    pub elapsed: Duration,
    /// The failure, when `success` is false
    pub error: Option<TransitionError>,
}

impl TransitionResult {
    /// A successful result with the given elapsed time
    pub fn ok(elapsed: Duration) -> Self {
        Self {
            success: true,
            elapsed,
            error: None,
        }
    }

    /// A failed result carrying the error
    pub fn failed(elapsed: Duration, error: TransitionError) -> Self {
        Self {
            success: false,
            elapsed,
            error: Some(error),
        }
    }
}
