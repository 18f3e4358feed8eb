//! Easing specifications
//!
//! Configuration accepts either a named preset, a platform keyword, or a
//! custom curve. Platform keywords expand to that platform's bezier control
//! points at resolve time; any other custom string passes through verbatim
//! for the host animation engine to interpret.

use swish_platform::{ResolvedPlatform, ANDROID_CURVE, IOS_CURVE};

/// An easing specification as it appears in configuration
#[derive(Clone, Debug, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// The iOS platform curve keyword
    Ios,
    /// The Android platform curve keyword
    Android,
    /// Explicit cubic bezier control points
    CubicBezier(f32, f32, f32, f32),
    /// A custom curve string, used verbatim
    Custom(String),
}

impl Easing {
    /// Parse an easing from its attribute form
    ///
    /// Unknown values become [`Easing::Custom`] rather than an error, so
    /// host-specific curve syntax flows through untouched.
    pub fn parse(value: &str) -> Self {
        match value {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "ios" => Self::Ios,
            "android" => Self::Android,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Resolve to the concrete form handed to animation drivers
    pub fn resolve(&self) -> ResolvedEasing {
        match self {
            Self::Linear => ResolvedEasing::Keyword("linear"),
            Self::Ease => ResolvedEasing::Keyword("ease"),
            Self::EaseIn => ResolvedEasing::Keyword("ease-in"),
            Self::EaseOut => ResolvedEasing::Keyword("ease-out"),
            Self::EaseInOut => ResolvedEasing::Keyword("ease-in-out"),
            Self::Ios => ResolvedEasing::Bezier(IOS_CURVE),
            Self::Android => ResolvedEasing::Bezier(ANDROID_CURVE),
            Self::CubicBezier(x1, y1, x2, y2) => ResolvedEasing::Bezier([*x1, *y1, *x2, *y2]),
            Self::Custom(curve) => ResolvedEasing::Custom(curve.clone()),
        }
    }

    /// The default easing keyword for a platform
    pub fn platform_default(platform: ResolvedPlatform) -> Self {
        match platform {
            ResolvedPlatform::Ios => Self::Ios,
            ResolvedPlatform::Android => Self::Android,
        }
    }
}

/// A fully-resolved easing, ready for an animation driver
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedEasing {
    /// A named preset the driver understands directly
    Keyword(&'static str),
    /// Cubic bezier control points
    Bezier([f32; 4]),
    /// Host-specific curve syntax, passed through
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_keywords_expand_to_curves() {
        assert_eq!(Easing::Ios.resolve(), ResolvedEasing::Bezier(IOS_CURVE));
        assert_eq!(
            Easing::Android.resolve(),
            ResolvedEasing::Bezier(ANDROID_CURVE)
        );
    }

    #[test]
    fn test_custom_string_passes_through() {
        let easing = Easing::parse("steps(4, end)");
        assert_eq!(
            easing.resolve(),
            ResolvedEasing::Custom("steps(4, end)".to_string())
        );
    }

    #[test]
    fn test_named_presets() {
        assert_eq!(Easing::parse("linear"), Easing::Linear);
        assert_eq!(
            Easing::parse("ease-in-out").resolve(),
            ResolvedEasing::Keyword("ease-in-out")
        );
    }
}
