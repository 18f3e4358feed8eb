//! Controller and per-call transition configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use swish_animation::{Easing, Keyframe};
use swish_core::Direction;
use swish_platform::{Platform, ResolvedPlatform};

/// Custom platform detection override
pub type DetectFn = Arc<dyn Fn() -> ResolvedPlatform + Send + Sync>;

/// Controller-wide configuration
///
/// Per-call [`TransitionConfig`] values override these; these override the
/// resolved platform's defaults.
#[derive(Clone, Default)]
pub struct GlobalConfig {
    /// Platform selector (default `auto`)
    pub platform: Platform,
    /// Default transition duration; platform-derived when absent
    pub duration: Option<Duration>,
    /// Default easing; platform-derived when absent
    pub easing: Option<Easing>,
    /// Prefer the synchronized-swap path when a primitive is available
    pub use_synchronized_swap: bool,
    /// Shrink effective durations to near-zero (reduced motion)
    pub reduced_motion: bool,
    /// Custom platform detection, consulted for the `auto` selector
    pub detect_platform: Option<DetectFn>,
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self {
            use_synchronized_swap: true,
            ..Default::default()
        }
    }

    /// Apply a partial configuration patch
    ///
    /// Fields absent from the patch are left unchanged, so an empty patch
    /// is a no-op.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(easing) = patch.easing {
            self.easing = Some(easing);
        }
        if let Some(use_swap) = patch.use_synchronized_swap {
            self.use_synchronized_swap = use_swap;
        }
        if let Some(reduced_motion) = patch.reduced_motion {
            self.reduced_motion = reduced_motion;
        }
        if let Some(detect) = patch.detect_platform {
            self.detect_platform = Some(detect);
        }
    }
}

impl fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("platform", &self.platform)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("use_synchronized_swap", &self.use_synchronized_swap)
            .field("reduced_motion", &self.reduced_motion)
            .field("detect_platform", &self.detect_platform.is_some())
            .finish()
    }
}

/// Partial update applied through `configure`
#[derive(Clone, Default)]
pub struct ConfigPatch {
    pub platform: Option<Platform>,
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
    pub use_synchronized_swap: Option<bool>,
    pub reduced_motion: Option<bool>,
    pub detect_platform: Option<DetectFn>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn use_synchronized_swap(mut self, enabled: bool) -> Self {
        self.use_synchronized_swap = Some(enabled);
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = Some(enabled);
        self
    }

    pub fn detect_platform<F>(mut self, detect: F) -> Self
    where
        F: Fn() -> ResolvedPlatform + Send + Sync + 'static,
    {
        self.detect_platform = Some(Arc::new(detect));
        self
    }
}

/// Which page regions a transition animates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Header,
    Content,
    Footer,
}

/// Subset of regions to animate (default: all)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSet {
    header: bool,
    content: bool,
    footer: bool,
}

impl TargetSet {
    /// Animate every region
    pub fn all() -> Self {
        Self {
            header: true,
            content: true,
            footer: true,
        }
    }

    /// Animate nothing (combine with [`TargetSet::with`])
    pub fn none() -> Self {
        Self {
            header: false,
            content: false,
            footer: false,
        }
    }

    pub fn with(mut self, target: Target) -> Self {
        match target {
            Target::Header => self.header = true,
            Target::Content => self.content = true,
            Target::Footer => self.footer = true,
        }
        self
    }

    pub fn contains(&self, target: Target) -> bool {
        match target {
            Target::Header => self.header,
            Target::Content => self.content,
            Target::Footer => self.footer,
        }
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration for a single navigation
#[derive(Default)]
pub struct TransitionConfig {
    pub duration: Option<Duration>,
    pub easing: Option<Easing>,
    pub direction: Option<Direction>,
    /// Regions to animate (default all)
    pub targets: TargetSet,
    /// Replace the strategy's entering keyframes
    pub enter_keyframes: Option<Vec<Keyframe>>,
    /// Replace the strategy's leaving keyframes
    pub leave_keyframes: Option<Vec<Keyframe>>,
    /// Invoked after the leaving page's will-leave hook, before animation
    pub on_start: Option<Box<dyn FnMut()>>,
    /// Invoked once the episode completes
    pub on_complete: Option<Box<dyn FnMut()>>,
    /// Per-call synchronized-swap override
    pub use_synchronized_swap: Option<bool>,
}

impl TransitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn targets(mut self, targets: TargetSet) -> Self {
        self.targets = targets;
        self
    }

    pub fn enter_keyframes(mut self, frames: Vec<Keyframe>) -> Self {
        self.enter_keyframes = Some(frames);
        self
    }

    pub fn leave_keyframes(mut self, frames: Vec<Keyframe>) -> Self {
        self.leave_keyframes = Some(frames);
        self
    }

    pub fn on_start<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_complete<F: FnMut() + 'static>(mut self, f: F) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn use_synchronized_swap(mut self, enabled: bool) -> Self {
        self.use_synchronized_swap = Some(enabled);
        self
    }
}

impl fmt::Debug for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionConfig")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("direction", &self.direction)
            .field("targets", &self.targets)
            .field("enter_keyframes", &self.enter_keyframes.is_some())
            .field("leave_keyframes", &self.leave_keyframes.is_some())
            .field("use_synchronized_swap", &self.use_synchronized_swap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_is_noop() {
        let mut config = GlobalConfig::new();
        let before = format!("{config:?}");
        config.apply(ConfigPatch::new());
        assert_eq!(format!("{config:?}"), before);
    }

    #[test]
    fn test_patch_overrides_fields() {
        let mut config = GlobalConfig::new();
        config.apply(
            ConfigPatch::new()
                .platform(Platform::Android)
                .duration(Duration::from_millis(200))
                .use_synchronized_swap(false),
        );
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.duration, Some(Duration::from_millis(200)));
        assert!(!config.use_synchronized_swap);
        // Untouched fields keep their values
        assert!(config.easing.is_none());
    }

    #[test]
    fn test_target_set() {
        let targets = TargetSet::none().with(Target::Content);
        assert!(targets.contains(Target::Content));
        assert!(!targets.contains(Target::Header));
        assert!(TargetSet::default().contains(Target::Footer));
    }
}
