//! Height-collapse animations and the barrier that turns a batch of them into
//! one swipe callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use swipekit_animation::{AnimationSpec, TweenAnimation};
use swipekit_core::FrameClock;

use super::callback::SwipeCallback;
use super::element::{SwipeElement, SwipeElementRef, SwipeOffset};
use super::gesture::SwipeDirection;

/// An element whose collapse has started but whose batch callback has not
/// fired yet.
#[derive(Debug, Clone)]
pub struct PendingCompletion {
    pub position: i32,
    pub original_height: i32,
    element: Weak<dyn SwipeElement>,
}

impl PendingCompletion {
    /// Puts the element back the way it was before the swipe. Elements the
    /// host has already dropped are skipped.
    fn restore(&self) {
        match self.element.upgrade() {
            Some(element) => {
                SwipeOffset::REST.apply(&*element);
                element.set_layout_height(self.original_height);
            }
            None => log::debug!(
                "element at position {} dropped before its swipe batch completed",
                self.position
            ),
        }
    }
}

#[derive(Default)]
struct CollapseState {
    /// Confirmed swipes still sliding out; their collapse has not started.
    exiting: usize,
    active: usize,
    pending: SmallVec<[PendingCompletion; 4]>,
}

/// Shared by the controller and every running exit/collapse animation.
#[derive(Clone)]
pub(crate) struct CollapseOrchestrator {
    state: Rc<RefCell<CollapseState>>,
    clock: FrameClock,
    spec: AnimationSpec,
    collapsed_height: i32,
    owner: SwipeElementRef,
    callback: Rc<dyn SwipeCallback>,
}

impl CollapseOrchestrator {
    pub(crate) fn new(
        clock: FrameClock,
        spec: AnimationSpec,
        collapsed_height: i32,
        owner: SwipeElementRef,
        callback: Rc<dyn SwipeCallback>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(CollapseState::default())),
            clock,
            spec,
            collapsed_height,
            owner,
            callback,
        }
    }

    /// Collapse animations currently running.
    pub(crate) fn active_count(&self) -> usize {
        self.state.borrow().active
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Confirmed swipes whose exit animation is still running.
    pub(crate) fn exiting_count(&self) -> usize {
        self.state.borrow().exiting
    }

    /// Registers a confirmed swipe with the current batch. Must be followed
    /// by exactly one [`begin_collapse`](Self::begin_collapse) once the exit
    /// animation ends; until then the batch cannot complete.
    pub(crate) fn confirm_swipe(&self) {
        let mut state = self.state.borrow_mut();
        state.exiting += 1;
        log::trace!("swipe confirmed, {} exiting", state.exiting);
    }

    /// Starts the size animation for a confirmed swipe and records it in the
    /// current batch. A non-collapsing swipe still animates (holding its
    /// height) so it joins the batch and is restored with the others.
    pub(crate) fn begin_collapse(
        &self,
        element: &SwipeElementRef,
        position: i32,
        direction: SwipeDirection,
        should_collapse: bool,
    ) {
        let original_height = element.height();
        let target_height = if should_collapse {
            self.collapsed_height
        } else {
            original_height
        };

        {
            let mut state = self.state.borrow_mut();
            state.exiting = match state.exiting.checked_sub(1) {
                Some(exiting) => exiting,
                None => panic!("collapse started for a swipe that was never confirmed"),
            };
            state.active += 1;
            state.pending.push(PendingCompletion {
                position,
                original_height,
                element: Rc::downgrade(element),
            });
            log::debug!(
                "collapse {:?} at position {} ({} -> {}), {} active",
                direction,
                position,
                original_height,
                target_height,
                state.active
            );
        }

        let weak = Rc::downgrade(element);
        let orchestrator = self.clone();
        TweenAnimation::new(&self.clock, original_height, target_height, self.spec)
            .on_update(move |height| {
                if let Some(element) = weak.upgrade() {
                    element.set_layout_height(*height);
                }
            })
            .on_end(move || orchestrator.finish_one(direction))
            .start();
    }

    /// Completion of one collapse animation. The last one of a batch, with no
    /// confirmed swipe still sliding out, fires the callback for `direction`
    /// and restores every participant.
    pub(crate) fn finish_one(&self, direction: SwipeDirection) {
        let batch = {
            let mut state = self.state.borrow_mut();
            state.active = match state.active.checked_sub(1) {
                Some(active) => active,
                None => panic!("collapse animation finished with no collapse in flight"),
            };
            if state.active > 0 || state.exiting > 0 {
                log::trace!(
                    "collapse finished, {} still running, {} exiting",
                    state.active,
                    state.exiting
                );
                return;
            }
            let mut batch = std::mem::take(&mut state.pending);
            // Descending position, stable for ties.
            batch.sort_by(|a, b| b.position.cmp(&a.position));
            batch
        };

        log::debug!(
            "swipe batch of {} complete, reporting {:?}",
            batch.len(),
            direction
        );
        match direction {
            SwipeDirection::Left => self.callback.on_swipe_left(&self.owner),
            SwipeDirection::Right => self.callback.on_swipe_right(&self.owner),
        }

        for completion in &batch {
            completion.restore();
        }
    }
}
