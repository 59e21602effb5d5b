use std::rc::Rc;

use swipekit_animation::Lerp;

use crate::input::PointerEvent;

/// The host-side view a swipe controller moves around.
///
/// All setters take `&self`: elements are shared between the controller,
/// running animations and the pending-completion list, so hosts back them
/// with `Cell`s or forward to their own retained view tree. Every setter must
/// take effect immediately; the host re-renders on its own schedule.
pub trait SwipeElement {
    /// Current laid-out width in logical pixels.
    fn width(&self) -> f32;

    /// Current laid-out height in pixels.
    fn height(&self) -> i32;

    /// Position used to order completions of one batch, e.g. the bottom edge
    /// or the list index. Larger values are reported first.
    fn logical_position(&self) -> i32;

    fn translation_x(&self) -> f32;

    fn set_translation_x(&self, translation_x: f32);

    fn alpha(&self) -> f32;

    fn set_alpha(&self, alpha: f32);

    /// Overrides the height the host lays the element out with.
    fn set_layout_height(&self, height: i32);

    /// Forwards an event to the element's own touch handling (click,
    /// pressed state, ...). Returns whether the element consumed it.
    fn dispatch_default_touch(&self, event: &PointerEvent) -> bool;
}

/// Shared handle to a swipeable element.
pub type SwipeElementRef = Rc<dyn SwipeElement>;

/// Horizontal offset and opacity of a swiped element, animated together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeOffset {
    pub translation_x: f32,
    pub alpha: f32,
}

impl SwipeOffset {
    /// Untouched element: no offset, fully opaque.
    pub const REST: SwipeOffset = SwipeOffset {
        translation_x: 0.0,
        alpha: 1.0,
    };

    /// Offset while the pointer drags the element by `delta_x`; the element is
    /// fully transparent once it has travelled half of `width`.
    pub fn following(delta_x: f32, width: f32) -> Self {
        let alpha = if width > 0.0 {
            (1.0 - 2.0 * delta_x.abs() / width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            translation_x: delta_x,
            alpha,
        }
    }

    /// Fully off-screen on the side `sign` points to.
    pub fn dismissed(sign: f32, width: f32) -> Self {
        Self {
            translation_x: sign * width,
            alpha: 0.0,
        }
    }

    pub fn of(element: &dyn SwipeElement) -> Self {
        Self {
            translation_x: element.translation_x(),
            alpha: element.alpha(),
        }
    }

    pub fn apply(&self, element: &dyn SwipeElement) {
        element.set_translation_x(self.translation_x);
        element.set_alpha(self.alpha);
    }
}

impl Lerp for SwipeOffset {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Self {
            translation_x: self.translation_x.lerp(&target.translation_x, fraction),
            alpha: self.alpha.lerp(&target.alpha, fraction),
        }
    }
}
