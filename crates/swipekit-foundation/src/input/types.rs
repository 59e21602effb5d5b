use crate::geometry::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking for gesture disambiguation.
///
/// Events can be consumed by handlers (e.g. a swipe in progress) to prevent
/// other handlers (e.g. clicks) from acting on them.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    /// Position relative to the element receiving the event.
    pub position: Point,
    /// Position in window coordinates. Swipe displacement is measured here so
    /// that translating the element does not feed back into the gesture.
    pub global_position: Point,
    /// Monotonic timestamp of the sample in milliseconds.
    pub uptime_millis: i64,
    /// Shared via Rc<Cell> so consumption can be tracked across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, global_position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            global_position,
            uptime_millis: 0,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_pointer_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_uptime_millis(mut self, uptime_millis: i64) -> Self {
        self.uptime_millis = uptime_millis;
        self
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// A cancel event at the same position and time, with its own
    /// consumption state. Sent to an element's default handling when a
    /// gesture recogniser takes the pointer stream over.
    pub fn to_cancel(&self) -> Self {
        Self {
            id: self.id,
            kind: PointerEventKind::Cancel,
            position: self.position,
            global_position: self.global_position,
            uptime_millis: self.uptime_millis,
            consumed: Rc::new(Cell::new(false)),
        }
    }
}
