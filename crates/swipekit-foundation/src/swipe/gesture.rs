//! Gesture classification: per-touch session state and the release rule.

use std::rc::Rc;

use super::config::SwipeConfig;
use super::element::SwipeElementRef;
use crate::geometry::Velocity;
use crate::input::{PointerEvent, PointerId};
use crate::velocity_tracker::VelocityTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Positive values point right; zero and negative values point left.
    pub fn from_sign(value: f32) -> Self {
        if value > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Outcome of releasing the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeResolution {
    Swipe(SwipeDirection),
    Cancelled,
}

impl SwipeResolution {
    pub fn is_swipe(self) -> bool {
        matches!(self, SwipeResolution::Swipe(_))
    }
}

/// Where the controller is within a touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// Pointer is down but has not moved past the slop.
    Tracking,
    /// Element follows the pointer.
    Swiping,
}

/// Classifies a release. First match wins:
///
/// 1. travelled more than half the width: swipe toward the displacement;
/// 2. horizontal speed within the fling range and faster than vertical:
///    swipe toward the horizontal velocity;
/// 3. otherwise cancelled.
pub fn resolve_release(
    delta_x: f32,
    velocity: Velocity,
    width: f32,
    config: &SwipeConfig,
) -> SwipeResolution {
    if delta_x.abs() > width / 2.0 {
        return SwipeResolution::Swipe(SwipeDirection::from_sign(delta_x));
    }

    let speed_x = velocity.x.abs();
    let speed_y = velocity.y.abs();
    if config.min_fling_velocity <= speed_x
        && speed_x <= config.max_fling_velocity
        && speed_y < speed_x
    {
        return SwipeResolution::Swipe(SwipeDirection::from_sign(velocity.x));
    }

    SwipeResolution::Cancelled
}

/// State of one touch sequence, from pointer-down to release.
pub(crate) struct GestureSession {
    pub(crate) pointer_id: PointerId,
    pub(crate) down_x: f32,
    pub(crate) element: SwipeElementRef,
    pub(crate) position: i32,
    pub(crate) tracker: VelocityTracker,
    pub(crate) swiping: bool,
    pub(crate) last_event: PointerEvent,
}

impl GestureSession {
    pub(crate) fn start(element: &SwipeElementRef, event: &PointerEvent, window_millis: i64) -> Self {
        let mut tracker = VelocityTracker::with_window(window_millis);
        tracker.add_event(event);
        Self {
            pointer_id: event.id,
            down_x: event.global_position.x,
            element: Rc::clone(element),
            position: element.logical_position(),
            tracker,
            swiping: false,
            last_event: event.clone(),
        }
    }

    pub(crate) fn accepts(&self, event: &PointerEvent) -> bool {
        event.id == self.pointer_id
    }

    /// Records the sample and returns the horizontal displacement from the
    /// press position.
    pub(crate) fn record(&mut self, event: &PointerEvent) -> f32 {
        self.tracker.add_event(event);
        self.last_event = event.clone();
        event.global_position.x - self.down_x
    }

    pub(crate) fn phase(&self) -> GesturePhase {
        if self.swiping {
            GesturePhase::Swiping
        } else {
            GesturePhase::Tracking
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SwipeConfig {
        SwipeConfig::default().with_fling_velocity(50.0, 8_000.0)
    }

    #[test]
    fn distance_past_half_width_wins_regardless_of_velocity() {
        let against = Velocity::new(-5_000.0, 0.0);
        assert_eq!(
            resolve_release(160.0, against, 300.0, &config()),
            SwipeResolution::Swipe(SwipeDirection::Right)
        );
        assert_eq!(
            resolve_release(-151.0, Velocity::new(20_000.0, 90_000.0), 300.0, &config()),
            SwipeResolution::Swipe(SwipeDirection::Left)
        );
    }

    #[test]
    fn exactly_half_width_falls_through_to_velocity() {
        assert_eq!(
            resolve_release(150.0, Velocity::ZERO, 300.0, &config()),
            SwipeResolution::Cancelled
        );
    }

    #[test]
    fn fling_inside_range_follows_velocity_sign() {
        assert_eq!(
            resolve_release(20.0, Velocity::new(2_000.0, 100.0), 300.0, &config()),
            SwipeResolution::Swipe(SwipeDirection::Right)
        );
        // Displacement and velocity can disagree; velocity decides.
        assert_eq!(
            resolve_release(20.0, Velocity::new(-2_000.0, 100.0), 300.0, &config()),
            SwipeResolution::Swipe(SwipeDirection::Left)
        );
    }

    #[test]
    fn fling_range_bounds_are_inclusive() {
        assert!(resolve_release(0.0, Velocity::new(50.0, 0.0), 300.0, &config()).is_swipe());
        assert!(resolve_release(0.0, Velocity::new(8_000.0, 0.0), 300.0, &config()).is_swipe());
        assert!(!resolve_release(0.0, Velocity::new(49.0, 0.0), 300.0, &config()).is_swipe());
        assert!(!resolve_release(0.0, Velocity::new(8_001.0, 0.0), 300.0, &config()).is_swipe());
    }

    #[test]
    fn mostly_vertical_fling_is_cancelled() {
        assert_eq!(
            resolve_release(10.0, Velocity::new(1_000.0, 1_000.0), 300.0, &config()),
            SwipeResolution::Cancelled
        );
        assert_eq!(
            resolve_release(10.0, Velocity::new(1_000.0, -1_500.0), 300.0, &config()),
            SwipeResolution::Cancelled
        );
    }

    #[test]
    fn direction_sign_round_trips() {
        for direction in [SwipeDirection::Left, SwipeDirection::Right] {
            assert_eq!(SwipeDirection::from_sign(direction.sign()), direction);
        }
        assert_eq!(SwipeDirection::from_sign(0.0), SwipeDirection::Left);
    }
}
