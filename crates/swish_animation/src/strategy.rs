//! Platform transition strategies
//!
//! Deterministic keyframe generators, one per platform plus a no-op for
//! `Direction::None`. Strategies never decide *whether* to run - the
//! controller does - they map (entering, leaving, direction, timing) to the
//! keyframe animations appropriate for the platform's motion language:
//!
//! - **iOS**: horizontal slide; forward pushes in from the trailing edge
//!   while the old page recedes left at reduced opacity
//! - **Android**: vertical slide with a scale/fade recede
//!
//! Header and footer companion animations run at a fraction of the main
//! duration; footers only animate when the footer actually changes.

use std::time::Duration;

use swish_core::{Direction, ElementHandle, Length, Transform};
use swish_platform::ResolvedPlatform;

use crate::easing::ResolvedEasing;
use crate::keyframe::{Keyframe, KeyframeAnimation};

/// Fraction of the main duration used for header companions
pub const HEADER_DURATION_FRACTION: f32 = 0.7;

/// Fraction of the main duration used for footer companions
pub const FOOTER_DURATION_FRACTION: f32 = 0.5;

/// How far the receding iOS page travels, as a percent of its width
const IOS_RECEDE_PERCENT: f32 = -30.0;

/// Opacity of a receded page (conveys depth without fully hiding it)
const RECEDE_OPACITY: f32 = 0.8;

/// Scale of a receded Android page
const RECEDE_SCALE: f32 = 0.95;

/// Horizontal travel of header companions, in pixels
const HEADER_SLIDE_PX: f32 = 20.0;

/// Inputs to a strategy, fixed once per episode
#[derive(Clone, Debug)]
pub struct StrategyOptions {
    pub entering: ElementHandle,
    pub leaving: Option<ElementHandle>,
    pub direction: Direction,
    pub duration: Duration,
    pub easing: ResolvedEasing,
}

impl StrategyOptions {
    fn animation(&self, target: &ElementHandle, frames: Vec<Keyframe>) -> KeyframeAnimation {
        KeyframeAnimation::new(
            target.clone(),
            frames,
            self.duration,
            self.easing.clone(),
        )
    }

    fn companion(
        &self,
        target: &ElementHandle,
        frames: Vec<Keyframe>,
        fraction: f32,
    ) -> KeyframeAnimation {
        KeyframeAnimation::new(
            target.clone(),
            frames,
            self.duration.mul_f32(fraction),
            self.easing.clone(),
        )
    }
}

/// Tagged strategy variant, selected once per episode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStrategy {
    Ios,
    Android,
    /// Instant swap, no keyframes
    None,
}

impl TransitionStrategy {
    /// Select the strategy for a resolved platform and direction
    pub fn select(platform: ResolvedPlatform, direction: Direction) -> Self {
        if direction == Direction::None {
            return Self::None;
        }
        match platform {
            ResolvedPlatform::Ios => Self::Ios,
            ResolvedPlatform::Android => Self::Android,
        }
    }

    /// Build the main content animations for this strategy
    ///
    /// The `None` strategy applies the end state directly and returns no
    /// animations.
    pub fn content_animations(&self, opts: &StrategyOptions) -> Vec<KeyframeAnimation> {
        match self {
            Self::Ios => ios_content(opts),
            Self::Android => android_content(opts),
            Self::None => {
                opts.entering.set_opacity(1.0);
                opts.entering.reset_transform();
                if let Some(leaving) = &opts.leaving {
                    leaving.set_opacity(0.0);
                    leaving.reset_transform();
                }
                Vec::new()
            }
        }
    }
}

fn slide_x(from_pct: f32, from_opacity: f32, to_pct: f32, to_opacity: f32) -> Vec<Keyframe> {
    vec![
        Keyframe::at(0.0)
            .opacity(from_opacity)
            .transform(Transform::translate_x(Length::Percent(from_pct))),
        Keyframe::at(1.0)
            .opacity(to_opacity)
            .transform(Transform::translate_x(Length::Percent(to_pct))),
    ]
}

fn slide_y(from_pct: f32, to_pct: f32) -> Vec<Keyframe> {
    vec![
        Keyframe::at(0.0)
            .opacity(1.0)
            .transform(Transform::translate_y(Length::Percent(from_pct))),
        Keyframe::at(1.0)
            .opacity(1.0)
            .transform(Transform::translate_y(Length::Percent(to_pct))),
    ]
}

fn fade_scale(from_opacity: f32, from_scale: f32, to_opacity: f32, to_scale: f32) -> Vec<Keyframe> {
    vec![
        Keyframe::at(0.0)
            .opacity(from_opacity)
            .transform(Transform::scale(from_scale)),
        Keyframe::at(1.0)
            .opacity(to_opacity)
            .transform(Transform::scale(to_scale)),
    ]
}

/// iOS horizontal slide
///
/// Forward: entering slides in from the right while the old page recedes
/// left at reduced opacity. Back is the exact mirror. Root fades the new
/// page in and leaves the old page untouched.
fn ios_content(opts: &StrategyOptions) -> Vec<KeyframeAnimation> {
    let mut animations = Vec::new();

    match opts.direction {
        Direction::Root => {
            animations.push(opts.animation(
                &opts.entering,
                vec![Keyframe::at(0.0).opacity(0.0), Keyframe::at(1.0).opacity(1.0)],
            ));
        }
        Direction::Back => {
            animations.push(opts.animation(
                &opts.entering,
                slide_x(IOS_RECEDE_PERCENT, RECEDE_OPACITY, 0.0, 1.0),
            ));
            if let Some(leaving) = &opts.leaving {
                animations.push(opts.animation(leaving, slide_x(0.0, 1.0, 100.0, 1.0)));
            }
        }
        _ => {
            animations.push(opts.animation(&opts.entering, slide_x(100.0, 1.0, 0.0, 1.0)));
            if let Some(leaving) = &opts.leaving {
                animations.push(opts.animation(
                    leaving,
                    slide_x(0.0, 1.0, IOS_RECEDE_PERCENT, RECEDE_OPACITY),
                ));
            }
        }
    }

    animations
}

/// Android vertical slide with scale/fade recede
fn android_content(opts: &StrategyOptions) -> Vec<KeyframeAnimation> {
    let mut animations = Vec::new();

    match opts.direction {
        Direction::Root => {
            animations.push(opts.animation(
                &opts.entering,
                fade_scale(0.0, RECEDE_SCALE, 1.0, 1.0),
            ));
        }
        Direction::Back => {
            animations.push(opts.animation(
                &opts.entering,
                fade_scale(RECEDE_OPACITY, RECEDE_SCALE, 1.0, 1.0),
            ));
            if let Some(leaving) = &opts.leaving {
                animations.push(opts.animation(leaving, slide_y(0.0, 100.0)));
            }
        }
        _ => {
            animations.push(opts.animation(&opts.entering, slide_y(100.0, 0.0)));
            if let Some(leaving) = &opts.leaving {
                animations.push(opts.animation(
                    leaving,
                    fade_scale(1.0, 1.0, RECEDE_OPACITY, RECEDE_SCALE),
                ));
            }
        }
    }

    animations
}

fn header_slide(from_px: f32, from_opacity: f32, to_px: f32, to_opacity: f32) -> Vec<Keyframe> {
    vec![
        Keyframe::at(0.0)
            .opacity(from_opacity)
            .transform(Transform::translate_x(Length::Px(from_px))),
        Keyframe::at(1.0)
            .opacity(to_opacity)
            .transform(Transform::translate_x(Length::Px(to_px))),
    ]
}

/// Header companion animations at [`HEADER_DURATION_FRACTION`] of the main
/// duration
///
/// Headers fade while sliding a short fixed distance toward the direction
/// of travel (title change, back button appearing).
pub fn header_animations(
    opts: &StrategyOptions,
    entering_header: Option<&ElementHandle>,
    leaving_header: Option<&ElementHandle>,
) -> Vec<KeyframeAnimation> {
    let mut animations = Vec::new();
    let is_back = opts.direction == Direction::Back;
    let enter_from = if is_back { -HEADER_SLIDE_PX } else { HEADER_SLIDE_PX };
    let leave_to = if is_back { HEADER_SLIDE_PX } else { -HEADER_SLIDE_PX };

    if let Some(header) = entering_header {
        animations.push(opts.companion(
            header,
            header_slide(enter_from, 0.0, 0.0, 1.0),
            HEADER_DURATION_FRACTION,
        ));
    }
    if let Some(header) = leaving_header {
        animations.push(opts.companion(
            header,
            header_slide(0.0, 1.0, leave_to, 0.0),
            HEADER_DURATION_FRACTION,
        ));
    }

    animations
}

/// Footer companion animations at [`FOOTER_DURATION_FRACTION`] of the main
/// duration
///
/// Footers are assumed persistent: a cross-fade only happens when the
/// entering and leaving footers are different elements.
pub fn footer_animations(
    opts: &StrategyOptions,
    entering_footer: Option<&ElementHandle>,
    leaving_footer: Option<&ElementHandle>,
) -> Vec<KeyframeAnimation> {
    let (Some(entering), Some(leaving)) = (entering_footer, leaving_footer) else {
        return Vec::new();
    };
    if entering.same(leaving) {
        return Vec::new();
    }

    vec![
        opts.companion(
            entering,
            vec![Keyframe::at(0.0).opacity(0.0), Keyframe::at(1.0).opacity(1.0)],
            FOOTER_DURATION_FRACTION,
        ),
        opts.companion(
            leaving,
            vec![Keyframe::at(0.0).opacity(1.0), Keyframe::at(1.0).opacity(0.0)],
            FOOTER_DURATION_FRACTION,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(direction: Direction, leaving: bool) -> StrategyOptions {
        StrategyOptions {
            entering: ElementHandle::new("entering"),
            leaving: leaving.then(|| ElementHandle::new("leaving")),
            direction,
            duration: Duration::from_millis(540),
            easing: ResolvedEasing::Bezier(swish_platform::IOS_CURVE),
        }
    }

    fn endpoints(anim: &KeyframeAnimation) -> (Keyframe, Keyframe) {
        (
            anim.first_frame().unwrap().clone(),
            anim.last_frame().unwrap().clone(),
        )
    }

    #[test]
    fn test_select_none_direction() {
        assert_eq!(
            TransitionStrategy::select(ResolvedPlatform::Ios, Direction::None),
            TransitionStrategy::None
        );
        assert_eq!(
            TransitionStrategy::select(ResolvedPlatform::Android, Direction::Forward),
            TransitionStrategy::Android
        );
    }

    #[test]
    fn test_forward_and_back_are_mirrors_ios() {
        let forward = TransitionStrategy::Ios.content_animations(&opts(Direction::Forward, true));
        let back = TransitionStrategy::Ios.content_animations(&opts(Direction::Back, true));

        // forward entering endpoints == back leaving endpoints, reversed
        let (f_enter_start, f_enter_end) = endpoints(&forward[0]);
        let (b_leave_start, b_leave_end) = endpoints(&back[1]);
        assert_eq!(f_enter_start.transform, b_leave_end.transform);
        assert_eq!(f_enter_end.transform, b_leave_start.transform);

        // and vice versa: forward leaving endpoints == back entering endpoints
        let (f_leave_start, f_leave_end) = endpoints(&forward[1]);
        let (b_enter_start, b_enter_end) = endpoints(&back[0]);
        assert_eq!(f_leave_start.transform, b_enter_end.transform);
        assert_eq!(f_leave_end.transform, b_enter_start.transform);
        assert_eq!(f_leave_end.opacity, b_enter_start.opacity);
    }

    #[test]
    fn test_forward_and_back_are_mirrors_android() {
        let forward =
            TransitionStrategy::Android.content_animations(&opts(Direction::Forward, true));
        let back = TransitionStrategy::Android.content_animations(&opts(Direction::Back, true));

        let (f_enter_start, f_enter_end) = endpoints(&forward[0]);
        let (b_leave_start, b_leave_end) = endpoints(&back[1]);
        assert_eq!(f_enter_start.transform, b_leave_end.transform);
        assert_eq!(f_enter_end.transform, b_leave_start.transform);
    }

    #[test]
    fn test_root_leaves_old_page_untouched() {
        let animations = TransitionStrategy::Ios.content_animations(&opts(Direction::Root, true));
        assert_eq!(animations.len(), 1);
        let (start, end) = endpoints(&animations[0]);
        assert_eq!(start.opacity, Some(0.0));
        assert_eq!(end.opacity, Some(1.0));
    }

    #[test]
    fn test_forward_recede_conveys_depth() {
        let animations =
            TransitionStrategy::Ios.content_animations(&opts(Direction::Forward, true));
        let (_, leave_end) = endpoints(&animations[1]);
        assert_eq!(leave_end.opacity, Some(RECEDE_OPACITY));
        assert_eq!(
            leave_end.transform,
            Some(Transform::translate_x(Length::Percent(IOS_RECEDE_PERCENT)))
        );
    }

    #[test]
    fn test_none_strategy_swaps_instantly() {
        let o = opts(Direction::None, true);
        let animations = TransitionStrategy::None.content_animations(&o);
        assert!(animations.is_empty());
        assert!((o.entering.style().opacity - 1.0).abs() < f32::EPSILON);
        assert!((o.leaving.as_ref().unwrap().style().opacity - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_first_navigation_has_no_leaving_animation() {
        let animations =
            TransitionStrategy::Ios.content_animations(&opts(Direction::Forward, false));
        assert_eq!(animations.len(), 1);
    }

    #[test]
    fn test_header_companion_duration_fraction() {
        let o = opts(Direction::Forward, true);
        let entering_header = ElementHandle::new("header");
        let animations = header_animations(&o, Some(&entering_header), None);
        assert_eq!(animations.len(), 1);
        assert_eq!(animations[0].duration, o.duration.mul_f32(0.7));
    }

    #[test]
    fn test_header_back_slides_from_leading_edge() {
        let o = opts(Direction::Back, true);
        let header = ElementHandle::new("header");
        let animations = header_animations(&o, Some(&header), None);
        let (start, _) = endpoints(&animations[0]);
        assert_eq!(
            start.transform,
            Some(Transform::translate_x(Length::Px(-HEADER_SLIDE_PX)))
        );
    }

    #[test]
    fn test_same_footer_produces_no_animation() {
        let o = opts(Direction::Forward, true);
        let footer = ElementHandle::new("footer");
        assert!(footer_animations(&o, Some(&footer), Some(&footer)).is_empty());
        assert!(footer_animations(&o, Some(&footer), None).is_empty());
    }

    #[test]
    fn test_changed_footer_cross_fades_at_half_duration() {
        let o = opts(Direction::Forward, true);
        let entering = ElementHandle::new("footer");
        let leaving = ElementHandle::new("footer");
        let animations = footer_animations(&o, Some(&entering), Some(&leaving));
        assert_eq!(animations.len(), 2);
        assert_eq!(animations[0].duration, o.duration.mul_f32(0.5));
    }
}
