//! Animation system for swipekit
//!
//! Provides time-based tweens with easing curves, driven by the runtime's
//! frame clock.

mod animation;

pub use animation::{AnimationSpec, AnimationStatus, Easing, Lerp, TweenAnimation};
