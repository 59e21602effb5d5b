//! Tween animations driven by [`FrameClock`] callbacks.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::fmt;
use std::rc::Rc;

use swipekit_core::{FrameCallbackRegistration, FrameClock};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Integer sizes truncate toward zero, so a shrinking height only reaches
/// its target on the final frame.
impl Lerp for i32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let start = *self as f64;
        let delta = (*target as f64) - start;
        (start + delta * fraction as f64) as i32
    }
}

/// Easing curves applied to the linear progress of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Cosine ease in and out; the classic view-animation default.
    AccelerateDecelerateEasing,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear out, slow in (material design).
    LinearOutSlowInEasing,
    /// Fast out, linear in (material design).
    FastOutLinearEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::AccelerateDecelerateEasing => ((fraction + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |t: f32| (3.0 * ax * t + 2.0 * bx) * t + cx;

    // Newton-Raphson for the parametric t matching `fraction` on the x axis,
    // falling back to bisection when the slope flattens out.
    let mut t = fraction;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            return sample(ay, by, cy, t);
        }
        let dx = slope(t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..16 {
        let delta = sample(ax, bx, cx, t) - fraction;
        if delta.abs() < 1e-6 {
            break;
        }
        if delta > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample(ay, by, cy, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Lifecycle of a [`TweenAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Built but not started.
    Idle,
    Running,
    /// Reached its target; the end listener has run.
    Finished,
    /// Stopped early; the end listener never runs.
    Cancelled,
}

type UpdateListener<T> = Box<dyn FnMut(&T) + 'static>;
type EndListener = Box<dyn FnOnce() + 'static>;

/// A tween from one value to another, advanced once per frame.
///
/// While running, the pending frame callback holds the animation alive, so
/// the handle returned by [`TweenAnimation::start`] may be dropped without
/// stopping it. Keep the handle only if you need to cancel or inspect it.
///
/// Listeners are invoked with no internal borrow held; they may cancel this
/// animation or start new ones.
pub struct TweenAnimation<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<TweenInner<T>>>,
}

struct TweenInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    start: T,
    target: T,
    current: T,
    spec: AnimationSpec,
    status: AnimationStatus,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_update: Option<UpdateListener<T>>,
    on_end: Option<EndListener>,
}

impl<T: Lerp + Clone + 'static> TweenAnimation<T> {
    pub fn new(clock: &FrameClock, from: T, to: T, spec: AnimationSpec) -> Self {
        let inner = TweenInner {
            clock: clock.clone(),
            current: from.clone(),
            start: from,
            target: to,
            spec,
            status: AnimationStatus::Idle,
            start_time_nanos: None,
            registration: None,
            on_update: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Called every frame with the interpolated value, including the final one.
    pub fn on_update(self, listener: impl FnMut(&T) + 'static) -> Self {
        self.inner.borrow_mut().on_update = Some(Box::new(listener));
        self
    }

    /// Called once after the final frame. Not called on cancellation.
    pub fn on_end(self, listener: impl FnOnce() + 'static) -> Self {
        self.inner.borrow_mut().on_end = Some(Box::new(listener));
        self
    }

    pub fn start(self) -> Self {
        let idle = {
            let mut inner = self.inner.borrow_mut();
            let idle = inner.status == AnimationStatus::Idle;
            if idle {
                inner.status = AnimationStatus::Running;
            }
            idle
        };
        if idle {
            Self::schedule_frame(&self.inner);
        }
        self
    }

    /// Stops the animation where it is. The end listener is dropped unrun.
    pub fn cancel(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            if inner.status != AnimationStatus::Running {
                return;
            }
            inner.status = AnimationStatus::Cancelled;
            inner.on_end = None;
            inner.registration.take()
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
    }

    pub fn status(&self) -> AnimationStatus {
        self.inner.borrow().status
    }

    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }

    /// Most recent value produced by the animation.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn spec(&self) -> AnimationSpec {
        self.inner.borrow().spec
    }

    fn schedule_frame(this: &Rc<RefCell<TweenInner<T>>>) {
        let clock = this.borrow().clock.clone();
        let strong = Rc::clone(this);
        let registration = clock.with_frame_nanos(move |time| {
            Self::on_frame(&strong, time);
        });
        if !registration.is_active() {
            log::warn!("tween scheduled after its runtime was dropped; it will never finish");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<TweenInner<T>>>, frame_time_nanos: u64) {
        let step = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.status != AnimationStatus::Running {
                return;
            }

            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = inner.spec.delay_millis.saturating_mul(1_000_000);

            if elapsed_nanos < delay_nanos {
                None
            } else {
                let duration_nanos = inner.spec.duration_millis.saturating_mul(1_000_000);
                let linear_progress = if duration_nanos == 0 {
                    1.0
                } else {
                    ((elapsed_nanos - delay_nanos) as f64 / duration_nanos as f64).clamp(0.0, 1.0)
                        as f32
                };
                let finished = linear_progress >= 1.0;
                let value = if finished {
                    inner.target.clone()
                } else {
                    let progress = inner.spec.easing.transform(linear_progress);
                    inner.start.lerp(&inner.target, progress)
                };
                inner.current = value.clone();
                if finished {
                    inner.status = AnimationStatus::Finished;
                }
                log::trace!("tween frame at {frame_time_nanos}ns progress {linear_progress:.3}");
                Some((value, finished))
            }
        };

        let Some((value, finished)) = step else {
            Self::schedule_frame(this);
            return;
        };

        Self::notify_update(this, &value);

        if finished {
            let on_end = this.borrow_mut().on_end.take();
            if let Some(on_end) = on_end {
                on_end();
            }
        } else if this.borrow().status == AnimationStatus::Running {
            Self::schedule_frame(this);
        }
    }

    fn notify_update(this: &Rc<RefCell<TweenInner<T>>>, value: &T) {
        let listener = this.borrow_mut().on_update.take();
        if let Some(mut listener) = listener {
            listener(value);
            let mut inner = this.borrow_mut();
            if inner.on_update.is_none() {
                inner.on_update = Some(listener);
            }
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for TweenAnimation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Lerp + Clone + 'static> fmt::Debug for TweenAnimation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TweenAnimation")
            .field("status", &inner.status)
            .field("spec", &inner.spec)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
