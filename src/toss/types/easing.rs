//! Easing curves for camera and die moves
//!
//! Named after the tween curves level designers already know; evaluation is
//! delegated to Bevy's `EaseFunction`.

use bevy::math::curve::{Curve, EaseFunction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseOutBack,
    EaseOutBounce,
    EaseOutElastic,
}

impl Easing {
    pub fn ease_function(self) -> EaseFunction {
        match self {
            Easing::Linear => EaseFunction::Linear,
            Easing::EaseInQuad => EaseFunction::QuadraticIn,
            Easing::EaseOutQuad => EaseFunction::QuadraticOut,
            Easing::EaseInOutQuad => EaseFunction::QuadraticInOut,
            Easing::EaseInCubic => EaseFunction::CubicIn,
            Easing::EaseOutCubic => EaseFunction::CubicOut,
            Easing::EaseInOutCubic => EaseFunction::CubicInOut,
            Easing::EaseInSine => EaseFunction::SineIn,
            Easing::EaseOutSine => EaseFunction::SineOut,
            Easing::EaseInOutSine => EaseFunction::SineInOut,
            Easing::EaseInExpo => EaseFunction::ExponentialIn,
            Easing::EaseOutExpo => EaseFunction::ExponentialOut,
            Easing::EaseInOutExpo => EaseFunction::ExponentialInOut,
            Easing::EaseOutBack => EaseFunction::BackOut,
            Easing::EaseOutBounce => EaseFunction::BounceOut,
            Easing::EaseOutElastic => EaseFunction::ElasticOut,
        }
    }

    /// Eased progress for linear progress `t`, clamped to `[0, 1]` first.
    pub fn sample(self, t: f32) -> f32 {
        self.ease_function().sample_clamped(t.clamp(0.0, 1.0))
    }
}
