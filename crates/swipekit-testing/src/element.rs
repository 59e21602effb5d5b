//! Recording fakes for the host side of a swipe: elements and callbacks.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use swipekit_foundation::{
    PointerEvent, PointerEventKind, SwipeCallback, SwipeDirection, SwipeElement, SwipeElementRef,
};

/// One property change or forwarded touch seen by a [`TestElement`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementChange {
    TranslationX(f32),
    Alpha(f32),
    Height(i32),
    DefaultTouch(PointerEventKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JournalEntry {
    /// Logical position of the element that changed.
    pub position: i32,
    pub change: ElementChange,
}

/// Ordered log of changes, shareable between several elements so tests can
/// assert on interleaving.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, position: i32, change: ElementChange) {
        self.entries
            .borrow_mut()
            .push(JournalEntry { position, change });
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Every height set on the element at `position`, oldest first.
    pub fn heights_of(&self, position: i32) -> Vec<i32> {
        self.filter(position, |change| match change {
            ElementChange::Height(height) => Some(height),
            _ => None,
        })
    }

    /// Kinds of the events forwarded to the element's default handling.
    pub fn default_touches_of(&self, position: i32) -> Vec<PointerEventKind> {
        self.filter(position, |change| match change {
            ElementChange::DefaultTouch(kind) => Some(kind),
            _ => None,
        })
    }

    fn filter<T>(&self, position: i32, select: impl Fn(ElementChange) -> Option<T>) -> Vec<T> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.position == position)
            .filter_map(|entry| select(entry.change))
            .collect()
    }
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.borrow().iter()).finish()
    }
}

/// In-memory [`SwipeElement`] that records every change into a [`Journal`].
///
/// Starts at rest: zero offset, fully opaque.
pub struct TestElement {
    width: Cell<f32>,
    height: Cell<i32>,
    position: i32,
    translation_x: Cell<f32>,
    alpha: Cell<f32>,
    default_touch_result: Cell<bool>,
    journal: Journal,
}

impl TestElement {
    pub fn new(width: f32, height: i32, position: i32) -> Rc<Self> {
        Self::with_journal(&Journal::new(), width, height, position)
    }

    pub fn with_journal(journal: &Journal, width: f32, height: i32, position: i32) -> Rc<Self> {
        Rc::new(Self {
            width: Cell::new(width),
            height: Cell::new(height),
            position,
            translation_x: Cell::new(0.0),
            alpha: Cell::new(1.0),
            default_touch_result: Cell::new(true),
            journal: journal.clone(),
        })
    }

    /// Shared handle for passing to a controller.
    pub fn handle(self: &Rc<Self>) -> SwipeElementRef {
        Rc::clone(self) as SwipeElementRef
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Simulates a relayout.
    pub fn set_width(&self, width: f32) {
        self.width.set(width);
    }

    /// What [`SwipeElement::dispatch_default_touch`] reports. Defaults to
    /// `true`.
    pub fn set_default_touch_result(&self, consumed: bool) {
        self.default_touch_result.set(consumed);
    }

    pub fn default_touches(&self) -> Vec<PointerEventKind> {
        self.journal.default_touches_of(self.position)
    }

    pub fn heights(&self) -> Vec<i32> {
        self.journal.heights_of(self.position)
    }

    pub fn is_at_rest(&self) -> bool {
        self.translation_x.get() == 0.0 && self.alpha.get() == 1.0
    }
}

impl SwipeElement for TestElement {
    fn width(&self) -> f32 {
        self.width.get()
    }

    fn height(&self) -> i32 {
        self.height.get()
    }

    fn logical_position(&self) -> i32 {
        self.position
    }

    fn translation_x(&self) -> f32 {
        self.translation_x.get()
    }

    fn set_translation_x(&self, translation_x: f32) {
        self.translation_x.set(translation_x);
        self.journal
            .record(self.position, ElementChange::TranslationX(translation_x));
    }

    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
        self.journal.record(self.position, ElementChange::Alpha(alpha));
    }

    fn set_layout_height(&self, height: i32) {
        self.height.set(height);
        self.journal.record(self.position, ElementChange::Height(height));
    }

    fn dispatch_default_touch(&self, event: &PointerEvent) -> bool {
        self.journal
            .record(self.position, ElementChange::DefaultTouch(event.kind));
        self.default_touch_result.get()
    }
}

impl fmt::Debug for TestElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestElement")
            .field("position", &self.position)
            .field("width", &self.width.get())
            .field("height", &self.height.get())
            .field("translation_x", &self.translation_x.get())
            .field("alpha", &self.alpha.get())
            .finish()
    }
}

/// One reported swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeRecord {
    pub direction: SwipeDirection,
    /// Logical position of the element passed to the callback.
    pub position: i32,
}

/// [`SwipeCallback`] that records every invocation. Clones share the record.
#[derive(Clone, Default)]
pub struct RecordingCallback {
    records: Rc<RefCell<Vec<SwipeRecord>>>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SwipeRecord> {
        self.records.borrow().clone()
    }

    pub fn directions(&self) -> Vec<SwipeDirection> {
        self.records
            .borrow()
            .iter()
            .map(|record| record.direction)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.records.borrow().len()
    }

    fn push(&self, direction: SwipeDirection, element: &SwipeElementRef) {
        log::debug!("recorded swipe {direction:?}");
        self.records.borrow_mut().push(SwipeRecord {
            direction,
            position: element.logical_position(),
        });
    }
}

impl SwipeCallback for RecordingCallback {
    fn on_swipe_left(&self, element: &SwipeElementRef) {
        self.push(SwipeDirection::Left, element);
    }

    fn on_swipe_right(&self, element: &SwipeElementRef) {
        self.push(SwipeDirection::Right, element);
    }
}

impl fmt::Debug for RecordingCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordingCallback")
            .field(&self.records.borrow())
            .finish()
    }
}
