use swipekit_core::{FrameClock, Runtime, RuntimeHandle};

/// Frame interval of a 60Hz display, rounded up.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Frames [`SwipeTestRule::pump_until_idle`] runs before giving up.
const MAX_IDLE_FRAMES: usize = 1_000;

/// Headless harness for exercising swipe controllers in tests.
///
/// `SwipeTestRule` owns a runtime and a synthetic frame timeline. Animations
/// started through [`frame_clock`](Self::frame_clock) only advance when the
/// test advances frames, so every assertion sees a deterministic state.
pub struct SwipeTestRule {
    runtime: Runtime,
    frame_time_nanos: u64,
    frames: usize,
}

impl SwipeTestRule {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            frame_time_nanos: 0,
            frames: 0,
        }
    }

    /// Clock to hand to controllers under test.
    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Timestamp of the most recent frame.
    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Frames drained so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn has_pending_frames(&self) -> bool {
        self.runtime.has_frame_callbacks()
    }

    /// Drains one frame, one interval after the previous one.
    pub fn advance_frame(&mut self) {
        self.advance_frame_at(self.frame_time_nanos + FRAME_INTERVAL_NANOS);
    }

    /// Drains one frame at an explicit timestamp. Timestamps must not go
    /// backwards.
    pub fn advance_frame_at(&mut self, frame_time_nanos: u64) {
        assert!(
            frame_time_nanos >= self.frame_time_nanos,
            "frame time went backwards: {} -> {}",
            self.frame_time_nanos,
            frame_time_nanos
        );
        self.frame_time_nanos = frame_time_nanos;
        self.frames += 1;
        self.runtime.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Runs whole frames until at least `millis` of frame time has passed.
    pub fn advance_by_millis(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Runs frames until no frame callbacks remain. Panics if animations keep
    /// rescheduling themselves.
    pub fn pump_until_idle(&mut self) {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("pump_until_idle ran {MAX_IDLE_FRAMES} frames without settling");
            }
            self.advance_frame();
        }
        log::trace!("idle after {frames} frames");
    }
}

impl Default for SwipeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
