//! Synchronized visual swap
//!
//! Some environments provide a primitive that captures before/after visual
//! snapshots around a tree mutation and animates the difference on its own
//! (the progressive-enhancement path). The controller hands it a single
//! closure performing the stack mutation plus visibility commit, then awaits
//! the settle future; it drives no keyframes of its own on this path.

use std::future::Future;
use std::pin::Pin;

use swish_core::{Direction, TransitionError};

/// Future that resolves when the swap's own animation settles
pub type SwapFuture<'a> = Pin<Box<dyn Future<Output = Result<(), TransitionError>> + 'a>>;

/// Environment-provided synchronized swap primitive
pub trait SynchronizedSwap: Send + Sync {
    /// Whether the environment can actually capture and animate swaps
    ///
    /// When false the controller silently falls back to the keyframe path.
    fn is_supported(&self) -> bool {
        true
    }

    /// Capture, run `update`, then animate the difference
    ///
    /// `update` must be invoked exactly once, before the returned future
    /// resolves.
    fn run<'a>(&'a self, direction: Direction, update: Box<dyn FnOnce() + 'a>) -> SwapFuture<'a>;
}

/// Swap primitive for hosts without snapshot support
///
/// Runs the update immediately and settles with no animation, matching the
/// original progressive-enhancement contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateSwap;

impl SynchronizedSwap for ImmediateSwap {
    fn run<'a>(&'a self, _direction: Direction, update: Box<dyn FnOnce() + 'a>) -> SwapFuture<'a> {
        update();
        Box::pin(std::future::ready(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_immediate_swap_runs_update_before_settle() {
        let mut ran = false;
        ImmediateSwap
            .run(Direction::Forward, Box::new(|| ran = true))
            .await
            .unwrap();
        assert!(ran);
    }
}
