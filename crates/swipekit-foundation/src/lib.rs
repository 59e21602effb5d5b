//! Foundation for swipekit: pointer input, velocity tracking and the
//! swipe-to-dismiss gesture controller.

pub mod geometry;
pub mod gesture_constants;
pub mod input;
pub mod swipe;
pub mod velocity_tracker;

pub use geometry::{Point, Velocity};
pub use input::{PointerEvent, PointerEventKind, PointerId};
pub use swipe::{
    resolve_release, GesturePhase, PendingCompletion, SwipeCallback, SwipeCallbacks,
    SwipeConfig, SwipeConfigError, SwipeDirection, SwipeElement, SwipeElementRef,
    SwipeGestureController, SwipeOffset, SwipeResolution,
};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};
