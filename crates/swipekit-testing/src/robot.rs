//! Scripted pointer input for swipe tests
//!
//! [`SwipeRobot`] produces timestamped [`PointerEvent`]s for a single
//! pointer. Event time is independent of frame time: gestures are delivered
//! between frames, as a host would.
//!
//! # Example
//!
//! ```
//! use swipekit_testing::SwipeRobot;
//!
//! let mut robot = SwipeRobot::new();
//! let down = robot.down(100.0);
//! let moved = robot.move_to(180.0, 16);
//! assert_eq!(moved.uptime_millis - down.uptime_millis, 16);
//! ```

use swipekit_foundation::{Point, PointerEvent, PointerEventKind, PointerId};

/// Generates the events of one pointer.
#[derive(Clone, Debug)]
pub struct SwipeRobot {
    pointer_id: PointerId,
    y: f32,
    window_offset: Point,
    time_millis: i64,
    last_x: f32,
}

impl SwipeRobot {
    pub fn new() -> Self {
        Self {
            pointer_id: 0,
            y: 0.0,
            window_offset: Point::ZERO,
            time_millis: 0,
            last_x: 0.0,
        }
    }

    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Vertical position of every generated event, in element space.
    pub fn at_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Offset added to element-space positions to produce window positions.
    pub fn with_window_offset(mut self, offset: Point) -> Self {
        self.window_offset = offset;
        self
    }

    /// Uptime of the next event if no time passes.
    pub fn now_millis(&self) -> i64 {
        self.time_millis
    }

    /// Lets time pass without producing events.
    pub fn wait(&mut self, millis: i64) {
        self.time_millis += millis;
    }

    pub fn down(&mut self, x: f32) -> PointerEvent {
        self.event(PointerEventKind::Down, x)
    }

    pub fn move_to(&mut self, x: f32, after_millis: i64) -> PointerEvent {
        self.wait(after_millis);
        self.event(PointerEventKind::Move, x)
    }

    pub fn up(&mut self, x: f32, after_millis: i64) -> PointerEvent {
        self.wait(after_millis);
        self.event(PointerEventKind::Up, x)
    }

    /// Host-side cancellation at the last known position.
    pub fn cancel(&mut self, after_millis: i64) -> PointerEvent {
        self.wait(after_millis);
        self.event(PointerEventKind::Cancel, self.last_x)
    }

    /// Full press-drag-release from `from_x` to `to_x`, `steps` evenly spaced
    /// moves over `duration_millis`, with the release right after the last
    /// move. Every event goes through `dispatch`; returns its result for the
    /// release.
    pub fn swipe(
        &mut self,
        from_x: f32,
        to_x: f32,
        duration_millis: i64,
        steps: u32,
        mut dispatch: impl FnMut(&PointerEvent) -> bool,
    ) -> bool {
        self.drag(from_x, to_x, duration_millis, steps, &mut dispatch);
        let up = self.up(to_x, 0);
        dispatch(&up)
    }

    /// Like [`swipe`](Self::swipe) but the pointer rests at `to_x` for
    /// `hold_millis` before release, so no fling velocity is left.
    pub fn drag_and_hold(
        &mut self,
        from_x: f32,
        to_x: f32,
        duration_millis: i64,
        hold_millis: i64,
        mut dispatch: impl FnMut(&PointerEvent) -> bool,
    ) -> bool {
        self.drag(from_x, to_x, duration_millis, 8, &mut dispatch);
        let up = self.up(to_x, hold_millis);
        dispatch(&up)
    }

    fn drag(
        &mut self,
        from_x: f32,
        to_x: f32,
        duration_millis: i64,
        steps: u32,
        dispatch: &mut impl FnMut(&PointerEvent) -> bool,
    ) {
        let steps = steps.max(1);
        dispatch(&self.down(from_x));
        let start = self.time_millis;
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            let x = from_x + (to_x - from_x) * fraction;
            let at = start + duration_millis * step as i64 / steps as i64;
            let event = self.move_to(x, at - self.time_millis);
            dispatch(&event);
        }
    }

    fn event(&mut self, kind: PointerEventKind, x: f32) -> PointerEvent {
        self.last_x = x;
        let position = Point::new(x, self.y);
        let global = Point::new(x + self.window_offset.x, self.y + self.window_offset.y);
        PointerEvent::new(kind, position, global)
            .with_pointer_id(self.pointer_id)
            .with_uptime_millis(self.time_millis)
    }
}

impl Default for SwipeRobot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/robot_tests.rs"]
mod tests;
