//! Animation drivers and completion handles
//!
//! The controller treats animation execution as a black box: it hands a
//! [`KeyframeAnimation`] to a driver and gets back an [`AnimationHandle`]
//! it can await or cancel. Cancelling resolves the wait immediately as
//! "finished" rather than failing it - downstream lifecycle callbacks of a
//! cancelled episode still fire; only the visual result is truncated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use swish_core::TransitionError;

use crate::keyframe::KeyframeAnimation;

struct HandleInner {
    done: AtomicBool,
    error: Mutex<Option<String>>,
    notify: Notify,
}

/// Cancellable completion handle for one running animation
///
/// Clones refer to the same animation. All waiters resolve together.
#[derive(Clone)]
pub struct AnimationHandle {
    inner: Arc<HandleInner>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HandleInner {
                done: AtomicBool::new(false),
                error: Mutex::new(None),
                notify: Notify::new(),
            }),
        }
    }

    /// Mark the animation as finished, waking all waiters
    pub fn finish(&self) {
        self.inner.done.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Mark the animation as failed, waking all waiters with the error
    pub fn fail(&self, message: impl Into<String>) {
        *self.inner.error.lock().unwrap() = Some(message.into());
        self.finish();
    }

    /// Cancel the animation
    ///
    /// Resolves the wait as finished, never as an error.
    pub fn cancel(&self) {
        self.finish();
    }

    pub fn is_done(&self) -> bool {
        self.inner.done.load(Ordering::Acquire)
    }

    /// Wait until the animation finishes, is cancelled, or fails
    pub async fn wait(&self) -> Result<(), TransitionError> {
        while !self.is_done() {
            let notified = self.inner.notify.notified();
            if self.is_done() {
                break;
            }
            notified.await;
        }
        match self.inner.error.lock().unwrap().take() {
            Some(message) => Err(TransitionError::Animation(message)),
            None => Ok(()),
        }
    }
}

impl Default for AnimationHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancel every handle in a set (fire-and-forget)
pub fn cancel_all(handles: &[AnimationHandle]) {
    for handle in handles {
        handle.cancel();
    }
}

/// Wait for every handle; the first failure wins
pub async fn wait_all(handles: &[AnimationHandle]) -> Result<(), TransitionError> {
    for handle in handles {
        handle.wait().await?;
    }
    Ok(())
}

/// Executes keyframe animations and issues completion handles
pub trait AnimationDriver: Send + Sync {
    /// Begin executing one animation; the returned handle resolves when the
    /// animation completes or is cancelled
    fn start(&self, animation: &KeyframeAnimation) -> AnimationHandle;
}

/// Driver that completes every animation immediately
///
/// Used for reduced-motion rendering and in tests. Final keyframe values
/// are applied (fill-forward) before the handle resolves.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantDriver;

impl AnimationDriver for InstantDriver {
    fn start(&self, animation: &KeyframeAnimation) -> AnimationHandle {
        animation.apply_fill();
        let handle = AnimationHandle::new();
        handle.finish();
        handle
    }
}

/// Headless driver that resolves handles on a real (or test-paused) clock
///
/// Interpolation happens wherever the host renders; this driver only models
/// the animation's timing. On natural completion it applies the final
/// keyframe (fill-forward); a cancelled animation skips that, leaving the
/// target wherever the host last drew it.
///
/// Must be used from within a tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockDriver;

impl AnimationDriver for ClockDriver {
    fn start(&self, animation: &KeyframeAnimation) -> AnimationHandle {
        let handle = AnimationHandle::new();
        let completer = handle.clone();
        let animation = animation.clone();
        tracing::trace!(duration_ms = animation.duration.as_millis() as u64, "animation started");
        tokio::spawn(async move {
            tokio::time::sleep(animation.duration).await;
            if !completer.is_done() {
                animation.apply_fill();
                completer.finish();
            }
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::ResolvedEasing;
    use crate::keyframe::Keyframe;
    use std::time::Duration;
    use swish_core::ElementHandle;

    fn fade_out(target: &ElementHandle, millis: u64) -> KeyframeAnimation {
        KeyframeAnimation::new(
            target.clone(),
            vec![Keyframe::at(0.0).opacity(1.0), Keyframe::at(1.0).opacity(0.0)],
            Duration::from_millis(millis),
            ResolvedEasing::Keyword("linear"),
        )
    }

    #[tokio::test]
    async fn test_cancel_resolves_wait_as_finished() {
        let handle = AnimationHandle::new();
        let waiter = handle.clone();
        let wait = tokio::spawn(async move { waiter.wait().await });
        handle.cancel();
        assert!(wait.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_fail_surfaces_animation_error() {
        let handle = AnimationHandle::new();
        handle.fail("compositor went away");
        let err = handle.wait().await.unwrap_err();
        assert!(matches!(err, TransitionError::Animation(_)));
    }

    #[tokio::test]
    async fn test_instant_driver_applies_fill() {
        let target = ElementHandle::new("page");
        let handle = InstantDriver.start(&fade_out(&target, 300));
        handle.wait().await.unwrap();
        assert!((target.style().opacity - 0.0).abs() < f32::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_driver_completes_after_duration() {
        let target = ElementHandle::new("page");
        let handle = ClockDriver.start(&fade_out(&target, 300));
        handle.wait().await.unwrap();
        assert!(handle.is_done());
        assert!((target.style().opacity - 0.0).abs() < f32::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_clock_animation_skips_fill() {
        let target = ElementHandle::new("page");
        let handle = ClockDriver.start(&fade_out(&target, 60_000));
        handle.cancel();
        handle.wait().await.unwrap();
        // Fill-forward must not run for a cancelled animation.
        tokio::task::yield_now().await;
        assert!((target.style().opacity - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_wait_all_and_cancel_all() {
        let handles = vec![AnimationHandle::new(), AnimationHandle::new()];
        cancel_all(&handles);
        wait_all(&handles).await.unwrap();
    }
}
