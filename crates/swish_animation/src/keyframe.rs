//! Keyframe descriptions handed to animation drivers

use std::time::Duration;

use swish_core::{ElementHandle, Transform};

use crate::easing::ResolvedEasing;

/// What happens to the animated properties when the animation ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Properties snap back to their pre-animation values
    None,
    /// The final keyframe's values stick
    #[default]
    Forwards,
}

/// One keyframe: an offset along the animation plus the properties it pins
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Progress along the animation, 0.0 to 1.0
    pub offset: f32,
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
}

impl Keyframe {
    /// Start a keyframe at the given offset
    pub fn at(offset: f32) -> Self {
        Self {
            offset,
            opacity: None,
            transform: None,
        }
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// A complete keyframe animation targeting one element
#[derive(Clone, Debug)]
pub struct KeyframeAnimation {
    pub target: ElementHandle,
    /// Ordered keyframes; first is the starting state, last the end state
    pub frames: Vec<Keyframe>,
    pub duration: Duration,
    pub easing: ResolvedEasing,
    pub fill: FillMode,
}

impl KeyframeAnimation {
    pub fn new(
        target: ElementHandle,
        frames: Vec<Keyframe>,
        duration: Duration,
        easing: ResolvedEasing,
    ) -> Self {
        Self {
            target,
            frames,
            duration,
            easing,
            fill: FillMode::Forwards,
        }
    }

    /// The starting keyframe, when any frames exist
    pub fn first_frame(&self) -> Option<&Keyframe> {
        self.frames.first()
    }

    /// The final keyframe, when any frames exist
    pub fn last_frame(&self) -> Option<&Keyframe> {
        self.frames.last()
    }

    /// Apply the final keyframe's properties to the target element
    ///
    /// Drivers call this on natural completion when `fill` is `Forwards`;
    /// cancelled animations skip it, truncating the visual result.
    pub fn apply_fill(&self) {
        if self.fill != FillMode::Forwards {
            return;
        }
        let Some(last) = self.last_frame() else {
            return;
        };
        if let Some(opacity) = last.opacity {
            self.target.set_opacity(opacity);
        }
        if let Some(transform) = last.transform {
            self.target.set_transform(transform);
        }
    }
}
