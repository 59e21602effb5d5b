//! Default gesture thresholds shared by every swipe controller.
//!
//! These values are in logical pixels and milliseconds. Hosts running on
//! high-density touch screens should scale the distances and velocities by
//! their density factor before building a [`SwipeConfig`](crate::SwipeConfig).

/// Drag threshold in logical pixels.
///
/// Horizontal movement beyond this distance from the press position turns
/// the touch into a swipe and cancels the element's own click handling.
/// Matches common platform conventions (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Minimum horizontal velocity, in logical pixels per second, for a short
/// gesture to count as a fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Anything faster is treated as a sensor glitch rather than a fling.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Duration of the exit, return and collapse animations.
pub const SHORT_ANIMATION_MILLIS: u64 = 200;

/// Window of pointer history used to estimate release velocity.
pub const VELOCITY_WINDOW_MILLIS: i64 = 500;

/// Height, in pixels, a dismissed element shrinks to before the swipe
/// callback fires. Must not be negative; zero hides the element entirely.
pub const COLLAPSED_HEIGHT: i32 = 1;

/// Cached widths below this are treated as "not measured yet".
pub const MIN_MEASURED_WIDTH: f32 = 2.0;
