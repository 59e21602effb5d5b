//! Platform abstraction traits for the swipekit runtime.
//!
//! These traits let the runtime delegate frame scheduling and timing to the
//! host UI toolkit instead of depending on a particular event loop.

use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are responsible for asking the host to produce a new
/// frame (vsync, `request_redraw`, `postFrameCallback`, ...). They must be
/// safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that ignores frame requests. Hosts that pump frames on a fixed
/// cadence (and tests) use this.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Monotonic clock backed by `web_time`, which maps to `std::time` on native
/// targets and `performance.now()` on the web.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}
