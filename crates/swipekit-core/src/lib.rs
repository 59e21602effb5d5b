//! Core runtime for swipekit: a single-threaded frame-callback queue and the
//! platform traits hosts implement to drive it.

mod frame_clock;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, DefaultScheduler, RuntimeScheduler, StdClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
