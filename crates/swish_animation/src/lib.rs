//! Swish Animation System
//!
//! Keyframe descriptions, easing, animation drivers, and the platform
//! transition strategies.
//!
//! # Features
//!
//! - **Easing**: named presets, platform curve keywords, custom pass-through
//! - **Keyframes**: timed property sequences with fill-forward semantics
//! - **Drivers**: black-box execution behind cancellable completion handles
//! - **Strategies**: iOS / Android / none keyframe generators with header
//!   and footer companion animations
//! - **Synchronized swap**: trait for environments that capture and animate
//!   tree mutations on their own

pub mod driver;
pub mod easing;
pub mod keyframe;
pub mod strategy;
pub mod swap;

pub use driver::{
    cancel_all, wait_all, AnimationDriver, AnimationHandle, ClockDriver, InstantDriver,
};
pub use easing::{Easing, ResolvedEasing};
pub use keyframe::{FillMode, Keyframe, KeyframeAnimation};
pub use strategy::{
    footer_animations, header_animations, StrategyOptions, TransitionStrategy,
    FOOTER_DURATION_FRACTION, HEADER_DURATION_FRACTION,
};
pub use swap::{ImmediateSwap, SwapFuture, SynchronizedSwap};
