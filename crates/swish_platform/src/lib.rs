//! Swish Platform
//!
//! Resolves the abstract platform selector (`ios` / `android` / `auto`) to a
//! concrete platform and derives the default transition duration and easing
//! curve for it. Stateless and infallible.
//!
//! `auto` inspects the compile-time target; when that is inconclusive
//! (desktop, web) it deliberately falls back to iOS as the more polished
//! animation style, not as an environment guess. Callers that need accurate
//! detection supply their own override.

use std::time::Duration;

/// Abstract platform selector accepted by configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Auto,
}

impl Platform {
    /// Parse a selector from its attribute form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}

/// Concrete platform after resolution (never `auto`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedPlatform {
    Ios,
    Android,
}

/// Default iOS transition duration (matches UIKit push timing)
pub const IOS_DURATION: Duration = Duration::from_millis(540);

/// Default Android transition duration (Material motion)
pub const ANDROID_DURATION: Duration = Duration::from_millis(300);

/// iOS easing control points - matches the UIKit spring animation feel
pub const IOS_CURVE: [f32; 4] = [0.32, 0.72, 0.0, 1.0];

/// Android Material Design standard easing control points
pub const ANDROID_CURVE: [f32; 4] = [0.4, 0.0, 0.2, 1.0];

/// Detect the concrete platform from the build target
///
/// Only mobile targets detect conclusively; everything else resolves to iOS.
pub fn detect_platform() -> ResolvedPlatform {
    if cfg!(target_os = "android") {
        ResolvedPlatform::Android
    } else {
        ResolvedPlatform::Ios
    }
}

/// Resolve a selector to a concrete platform
///
/// A caller-supplied `detect` override takes precedence over the built-in
/// target inspection for `auto`.
pub fn resolve(
    selector: Platform,
    detect: Option<&(dyn Fn() -> ResolvedPlatform + Send + Sync)>,
) -> ResolvedPlatform {
    match selector {
        Platform::Ios => ResolvedPlatform::Ios,
        Platform::Android => ResolvedPlatform::Android,
        Platform::Auto => match detect {
            Some(detect) => detect(),
            None => detect_platform(),
        },
    }
}

/// Default transition duration for a resolved platform
pub fn default_duration(platform: ResolvedPlatform) -> Duration {
    match platform {
        ResolvedPlatform::Ios => IOS_DURATION,
        ResolvedPlatform::Android => ANDROID_DURATION,
    }
}

/// Default easing control points for a resolved platform
pub fn default_curve(platform: ResolvedPlatform) -> [f32; 4] {
    match platform {
        ResolvedPlatform::Ios => IOS_CURVE,
        ResolvedPlatform::Android => ANDROID_CURVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_selectors_resolve_directly() {
        assert_eq!(resolve(Platform::Ios, None), ResolvedPlatform::Ios);
        assert_eq!(resolve(Platform::Android, None), ResolvedPlatform::Android);
    }

    #[test]
    fn test_auto_prefers_override() {
        let detect = || ResolvedPlatform::Android;
        assert_eq!(
            resolve(Platform::Auto, Some(&detect)),
            ResolvedPlatform::Android
        );
    }

    #[test]
    fn test_auto_without_override_is_conclusive() {
        // Whatever the build target, auto must resolve to something concrete.
        let resolved = resolve(Platform::Auto, None);
        assert!(matches!(
            resolved,
            ResolvedPlatform::Ios | ResolvedPlatform::Android
        ));
    }

    #[test]
    fn test_platform_defaults() {
        assert_eq!(
            default_duration(ResolvedPlatform::Ios),
            Duration::from_millis(540)
        );
        assert_eq!(
            default_duration(ResolvedPlatform::Android),
            Duration::from_millis(300)
        );
        assert_eq!(default_curve(ResolvedPlatform::Ios), IOS_CURVE);
        assert_eq!(default_curve(ResolvedPlatform::Android), ANDROID_CURVE);
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Platform::parse("ios"), Some(Platform::Ios));
        assert_eq!(Platform::parse("android"), Some(Platform::Android));
        assert_eq!(Platform::parse("auto"), Some(Platform::Auto));
        assert_eq!(Platform::parse("windows"), None);
    }
}
