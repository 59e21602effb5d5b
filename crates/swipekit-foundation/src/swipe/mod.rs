//! Swipe-to-dismiss: gesture classification, exit/return animations and the
//! collapse barrier that reports a batch of swipes once.

mod callback;
mod collapse;
mod config;
mod controller;
mod element;
mod gesture;

pub use callback::{SwipeCallback, SwipeCallbacks};
pub use collapse::PendingCompletion;
pub use config::{SwipeConfig, SwipeConfigError};
pub use controller::SwipeGestureController;
pub use element::{SwipeElement, SwipeElementRef, SwipeOffset};
pub use gesture::{resolve_release, GesturePhase, SwipeDirection, SwipeResolution};
