use std::fmt;

use swipekit_animation::{AnimationSpec, Easing};

use super::SwipeDirection;
use crate::gesture_constants::{
    COLLAPSED_HEIGHT, DRAG_THRESHOLD, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY,
    SHORT_ANIMATION_MILLIS, VELOCITY_WINDOW_MILLIS,
};

/// Immutable tuning for a [`SwipeGestureController`](super::SwipeGestureController).
///
/// `Default` uses the platform-style values from [`gesture_constants`](crate::gesture_constants).
/// Both directions collapse the element by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Horizontal distance before a touch becomes a swipe.
    pub slop: f32,
    /// Inclusive fling velocity range in px/s.
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    /// Duration of the exit, return and collapse animations.
    pub animation_duration_millis: u64,
    pub easing: Easing,
    /// Pointer history window for the release velocity estimate.
    pub velocity_window_millis: i64,
    /// Height collapsing elements shrink to. Zero is allowed.
    pub collapsed_height: i32,
    pub collapse_on_swipe_left: bool,
    pub collapse_on_swipe_right: bool,
}

impl SwipeConfig {
    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop;
        self
    }

    pub fn with_fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_animation_duration(mut self, duration_millis: u64) -> Self {
        self.animation_duration_millis = duration_millis;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_velocity_window(mut self, window_millis: i64) -> Self {
        self.velocity_window_millis = window_millis;
        self
    }

    pub fn with_collapsed_height(mut self, height: i32) -> Self {
        self.collapsed_height = height;
        self
    }

    /// Chooses per direction whether a confirmed swipe shrinks the element
    /// or only slides it out and back.
    pub fn with_collapse(mut self, on_swipe_left: bool, on_swipe_right: bool) -> Self {
        self.collapse_on_swipe_left = on_swipe_left;
        self.collapse_on_swipe_right = on_swipe_right;
        self
    }

    pub fn collapses(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => self.collapse_on_swipe_left,
            SwipeDirection::Right => self.collapse_on_swipe_right,
        }
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(self.animation_duration_millis, self.easing)
    }

    pub fn validate(&self) -> Result<(), SwipeConfigError> {
        if !(self.slop >= 0.0) {
            return Err(SwipeConfigError::NegativeSlop { slop: self.slop });
        }
        if !(self.min_fling_velocity >= 0.0 && self.min_fling_velocity <= self.max_fling_velocity)
        {
            return Err(SwipeConfigError::InvalidFlingRange {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        if self.velocity_window_millis <= 0 {
            return Err(SwipeConfigError::NonPositiveVelocityWindow {
                window_millis: self.velocity_window_millis,
            });
        }
        if self.collapsed_height < 0 {
            return Err(SwipeConfigError::NegativeCollapsedHeight {
                height: self.collapsed_height,
            });
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            slop: DRAG_THRESHOLD,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            animation_duration_millis: SHORT_ANIMATION_MILLIS,
            easing: Easing::AccelerateDecelerateEasing,
            velocity_window_millis: VELOCITY_WINDOW_MILLIS,
            collapsed_height: COLLAPSED_HEIGHT,
            collapse_on_swipe_left: true,
            collapse_on_swipe_right: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeConfigError {
    NegativeSlop { slop: f32 },
    InvalidFlingRange { min: f32, max: f32 },
    NonPositiveVelocityWindow { window_millis: i64 },
    NegativeCollapsedHeight { height: i32 },
}

impl fmt::Display for SwipeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeConfigError::NegativeSlop { slop } => {
                write!(f, "slop must be a non-negative distance, got {slop}")
            }
            SwipeConfigError::InvalidFlingRange { min, max } => {
                write!(f, "fling velocity range {min}..={max} is empty or negative")
            }
            SwipeConfigError::NonPositiveVelocityWindow { window_millis } => {
                write!(f, "velocity window must be positive, got {window_millis}ms")
            }
            SwipeConfigError::NegativeCollapsedHeight { height } => {
                write!(f, "collapsed height must not be negative, got {height}")
            }
        }
    }
}

impl std::error::Error for SwipeConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SwipeConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.slop, DRAG_THRESHOLD);
        assert!(config.collapses(SwipeDirection::Left));
        assert!(config.collapses(SwipeDirection::Right));
        assert_eq!(config.animation_spec().duration_millis, SHORT_ANIMATION_MILLIS);
    }

    #[test]
    fn collapse_flags_are_independent() {
        let config = SwipeConfig::default().with_collapse(false, true);
        assert!(!config.collapses(SwipeDirection::Left));
        assert!(config.collapses(SwipeDirection::Right));
    }

    #[test]
    fn inverted_fling_range_is_rejected() {
        let config = SwipeConfig::default().with_fling_velocity(900.0, 100.0);
        assert_eq!(
            config.validate(),
            Err(SwipeConfigError::InvalidFlingRange {
                min: 900.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn nan_slop_is_rejected() {
        let error = SwipeConfig::default()
            .with_slop(f32::NAN)
            .validate()
            .expect_err("NaN slop");
        assert!(matches!(error, SwipeConfigError::NegativeSlop { .. }));
    }

    #[test]
    fn zero_velocity_window_is_rejected() {
        let error = SwipeConfig::default()
            .with_velocity_window(0)
            .validate()
            .expect_err("empty window");
        assert_eq!(
            error.to_string(),
            "velocity window must be positive, got 0ms"
        );
    }

    #[test]
    fn negative_collapsed_height_is_rejected() {
        assert_eq!(
            SwipeConfig::default().with_collapsed_height(-1).validate(),
            Err(SwipeConfigError::NegativeCollapsedHeight { height: -1 })
        );
    }

    #[test]
    fn zero_collapsed_height_is_accepted() {
        assert_eq!(
            SwipeConfig::default().with_collapsed_height(0).validate(),
            Ok(())
        );
    }
}
