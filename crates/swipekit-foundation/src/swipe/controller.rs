use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use swipekit_animation::TweenAnimation;
use swipekit_core::FrameClock;

use super::callback::SwipeCallback;
use super::collapse::CollapseOrchestrator;
use super::config::{SwipeConfig, SwipeConfigError};
use super::element::{SwipeElement, SwipeElementRef, SwipeOffset};
use super::gesture::{resolve_release, GesturePhase, GestureSession, SwipeDirection, SwipeResolution};
use crate::gesture_constants::MIN_MEASURED_WIDTH;
use crate::input::{PointerEvent, PointerEventKind};

/// Swipe-to-dismiss touch handling for one element.
///
/// Feed every pointer event for the element through
/// [`on_touch_event`](Self::on_touch_event). A drag past the slop makes the
/// element follow the pointer and fade out. On release the gesture is either
/// confirmed (distance past half the width, or a horizontal fling) and the
/// element slides out, collapses and reports to the [`SwipeCallback`], or it
/// is cancelled and the element slides back.
///
/// Several swipes confirmed in quick succession form one batch: the callback
/// fires once, after the last collapse of the batch finishes, and every
/// element of the batch is then restored to its original state.
///
/// One controller may also serve several elements (e.g. list rows) through
/// [`on_touch`](Self::on_touch); the callback always receives the element
/// the controller was created for.
pub struct SwipeGestureController {
    element: SwipeElementRef,
    config: SwipeConfig,
    clock: FrameClock,
    orchestrator: CollapseOrchestrator,
    view_width: f32,
    enabled: bool,
    session: Option<GestureSession>,
    settling: SmallVec<[(Weak<dyn SwipeElement>, TweenAnimation<SwipeOffset>); 2]>,
}

impl SwipeGestureController {
    pub fn new(
        element: SwipeElementRef,
        callback: impl SwipeCallback + 'static,
        clock: FrameClock,
        config: SwipeConfig,
    ) -> Result<Self, SwipeConfigError> {
        config.validate()?;
        let orchestrator = CollapseOrchestrator::new(
            clock.clone(),
            config.animation_spec(),
            config.collapsed_height,
            Rc::clone(&element),
            Rc::new(callback),
        );
        Ok(Self {
            element,
            config,
            clock,
            orchestrator,
            view_width: 0.0,
            enabled: true,
            session: None,
            settling: SmallVec::new(),
        })
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn element(&self) -> &SwipeElementRef {
        &self.element
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pauses or resumes swipe detection.
    ///
    /// Disabling ends the current touch sequence on the spot: a swiping
    /// element slides back to rest, an element that was only pressed gets a
    /// cancel event. The rest of that sequence is ignored. Exit and collapse
    /// animations already running are not affected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            return;
        }
        if let Some(session) = self.session.take() {
            log::debug!("controller disabled mid-gesture; cancelling session");
            if session.swiping {
                self.settle(&session.element);
            } else {
                session
                    .element
                    .dispatch_default_touch(&session.last_event.to_cancel());
            }
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.session
            .as_ref()
            .map(GestureSession::phase)
            .unwrap_or(GesturePhase::Idle)
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_swiping(&self) -> bool {
        self.phase() == GesturePhase::Swiping
    }

    /// Collapse animations in flight. Zero between batches.
    pub fn active_collapse_count(&self) -> usize {
        self.orchestrator.active_count()
    }

    /// Elements waiting for the current batch's callback.
    pub fn pending_completion_count(&self) -> usize {
        self.orchestrator.pending_count()
    }

    /// Confirmed swipes still sliding out. The batch stays open while any
    /// remain.
    pub fn exiting_swipe_count(&self) -> usize {
        self.orchestrator.exiting_count()
    }

    /// Handles an event aimed at the element this controller was created for.
    /// Returns whether the event was consumed.
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> bool {
        let element = Rc::clone(&self.element);
        self.on_touch(&element, event)
    }

    /// Handles an event aimed at `element`. Returns whether the event was
    /// consumed; consumed events are also marked via [`PointerEvent::consume`].
    pub fn on_touch(&mut self, element: &SwipeElementRef, event: &PointerEvent) -> bool {
        if self.view_width < MIN_MEASURED_WIDTH {
            self.view_width = self.element.width();
        }

        let consumed = match event.kind {
            PointerEventKind::Down => self.on_pointer_down(element, event),
            PointerEventKind::Move => self.on_pointer_move(event),
            PointerEventKind::Up => self.on_pointer_up(event),
            PointerEventKind::Cancel => self.on_pointer_cancel(event),
        };
        if consumed {
            event.consume();
        }
        consumed
    }

    fn on_pointer_down(&mut self, element: &SwipeElementRef, event: &PointerEvent) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(previous) = self.session.take() {
            log::debug!("pointer down while a gesture was open; dropping it");
            if previous.swiping {
                self.settle(&previous.element);
            }
        }
        if self.view_width < MIN_MEASURED_WIDTH {
            log::warn!(
                "swipe started on an element without a usable width ({})",
                self.view_width
            );
        }

        self.stop_settling(element);
        self.session = Some(GestureSession::start(
            element,
            event,
            self.config.velocity_window_millis,
        ));
        element.dispatch_default_touch(event);
        true
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) -> bool {
        if !self.enabled {
            return false;
        }
        let slop = self.config.slop;
        let width = self.view_width;
        let Some(session) = self.session.as_mut().filter(|session| session.accepts(event)) else {
            return false;
        };

        let delta_x = session.record(event);
        if !session.swiping && delta_x.abs() > slop {
            session.swiping = true;
            log::debug!("swipe started at dx={delta_x}");
            session.element.dispatch_default_touch(&event.to_cancel());
        }

        if session.swiping {
            SwipeOffset::following(delta_x, width).apply(&*session.element);
            return true;
        }
        false
    }

    fn on_pointer_up(&mut self, event: &PointerEvent) -> bool {
        let Some(mut session) = self.take_session_for(event) else {
            return false;
        };

        let delta_x = session.record(event);
        let velocity = session.tracker.calculate_velocity();
        let resolution = resolve_release(delta_x, velocity, self.view_width, &self.config);
        log::debug!("release dx={delta_x} v={velocity:?} -> {resolution:?}");

        match resolution {
            SwipeResolution::Swipe(direction) => {
                self.dismiss(session.element.clone(), session.position, direction)
            }
            SwipeResolution::Cancelled => self.settle(&session.element),
        }
        session.swiping || resolution.is_swipe()
    }

    fn on_pointer_cancel(&mut self, event: &PointerEvent) -> bool {
        if let Some(session) = self.take_session_for(event) {
            if session.swiping {
                self.settle(&session.element);
            }
        }
        false
    }

    fn take_session_for(&mut self, event: &PointerEvent) -> Option<GestureSession> {
        match self.session.take() {
            Some(session) if session.accepts(event) => Some(session),
            other => {
                self.session = other;
                None
            }
        }
    }

    /// Slides the element off toward `direction`, then hands it to the
    /// collapse orchestrator.
    fn dismiss(&mut self, element: SwipeElementRef, position: i32, direction: SwipeDirection) {
        let from = SwipeOffset::of(&*element);
        let to = SwipeOffset::dismissed(direction.sign(), self.view_width);
        let should_collapse = self.config.collapses(direction);
        let orchestrator = self.orchestrator.clone();
        let weak = Rc::downgrade(&element);
        orchestrator.confirm_swipe();

        TweenAnimation::new(&self.clock, from, to, self.config.animation_spec())
            .on_update(move |offset| {
                if let Some(element) = weak.upgrade() {
                    offset.apply(&*element);
                }
            })
            .on_end(move || {
                orchestrator.begin_collapse(&element, position, direction, should_collapse)
            })
            .start();
    }

    /// Animates the element back to zero offset and full opacity.
    fn settle(&mut self, element: &SwipeElementRef) {
        let from = SwipeOffset::of(&**element);
        let weak = Rc::downgrade(element);
        let animation = TweenAnimation::new(
            &self.clock,
            from,
            SwipeOffset::REST,
            self.config.animation_spec(),
        )
        .on_update(move |offset| {
            if let Some(element) = weak.upgrade() {
                offset.apply(&*element);
            }
        })
        .start();

        self.settling.retain(|(_, animation)| animation.is_running());
        self.settling.push((Rc::downgrade(element), animation));
    }

    fn stop_settling(&mut self, element: &SwipeElementRef) {
        let target = Rc::as_ptr(element) as *const ();
        self.settling.retain(|(settling, animation)| {
            if settling.as_ptr() as *const () == target {
                animation.cancel();
                false
            } else {
                animation.is_running()
            }
        });
    }
}

impl fmt::Debug for SwipeGestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeGestureController")
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("phase", &self.phase())
            .field("view_width", &self.view_width)
            .field("active_collapses", &self.active_collapse_count())
            .field("exiting_swipes", &self.exiting_swipe_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/swipe_controller_tests.rs"]
mod tests;
