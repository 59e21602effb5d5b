use std::fmt;

use super::element::SwipeElementRef;

/// Receives the outcome of a batch of swipes.
///
/// Called once per batch, after every collapse animation of the batch has
/// finished, with the element the controller was created for.
pub trait SwipeCallback {
    fn on_swipe_left(&self, element: &SwipeElementRef);

    fn on_swipe_right(&self, element: &SwipeElementRef);
}

/// [`SwipeCallback`] built from two closures.
pub struct SwipeCallbacks<L, R> {
    on_left: L,
    on_right: R,
}

impl<L, R> SwipeCallbacks<L, R>
where
    L: Fn(&SwipeElementRef),
    R: Fn(&SwipeElementRef),
{
    pub fn new(on_left: L, on_right: R) -> Self {
        Self { on_left, on_right }
    }
}

impl<L, R> SwipeCallback for SwipeCallbacks<L, R>
where
    L: Fn(&SwipeElementRef),
    R: Fn(&SwipeElementRef),
{
    fn on_swipe_left(&self, element: &SwipeElementRef) {
        (self.on_left)(element)
    }

    fn on_swipe_right(&self, element: &SwipeElementRef) {
        (self.on_right)(element)
    }
}

impl<L, R> fmt::Debug for SwipeCallbacks<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeCallbacks").finish_non_exhaustive()
    }
}
