//! Easing curves and timed transitions

use crate::foundation::math::utils::lerp;

/// Easing curve applied to normalised progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic acceleration
    EaseIn,
    /// Quadratic deceleration
    EaseOut,
    /// Accelerate then decelerate
    EaseInOut,
}

impl Easing {
    /// Map progress in `[0, 1]` through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A scalar moving from `from` to `to` over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedTransition {
    start: f64,
    duration: f32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl TimedTransition {
    /// Start a transition at session time `start`
    pub fn new(start: f64, duration: f32, from: f32, to: f32, easing: Easing) -> Self {
        Self { start, duration: duration.max(0.0), from, to, easing }
    }

    /// Normalised progress at `now`, clamped to `[0, 1]`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = (now - self.start) as f32;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased value at `now`
    pub fn value_at(&self, now: f64) -> f32 {
        lerp(self.from, self.to, self.easing.apply(self.progress(now)))
    }

    /// Whether the transition has reached its end value
    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
