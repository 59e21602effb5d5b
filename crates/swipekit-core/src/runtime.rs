use crate::frame_clock::FrameClock;
use crate::platform::{Clock, DefaultScheduler, RuntimeScheduler, StdClock};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>, // FUTURE(no_std): migrate to ring buffer.
    next_frame_callback_id: Cell<u64>,
    origin: <StdClock as Clock>::Instant,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            origin: StdClock.now(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        // Cancellation can happen from inside a draining callback; the queue is
        // never borrowed while callbacks run, so this borrow cannot conflict.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "draining {} frame callbacks at {}ns",
            pending.len(),
            frame_time_nanos
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }
}

/// Owner of the frame-callback queue.
///
/// Everything registered here runs on the thread that drains it, which is
/// the host UI thread. Callbacks registered while a frame is being drained
/// run on the following frame.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    /// Runs every callback registered before this call with the given frame time.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    /// Drains the queue using wall-clock time measured from runtime creation.
    ///
    /// Hosts without their own vsync timestamp call this once per frame.
    pub fn drain_frame(&self) {
        let now = StdClock.elapsed_nanos(self.inner.origin);
        self.inner.drain_frame_callbacks(now);
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    /// Whether a callback was registered since the queue last became empty.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("needs_frame", &self.inner.needs_frame.get())
            .field("frame_callbacks", &self.inner.frame_callbacks.borrow().len())
            .finish()
    }
}

/// Weak handle to a [`Runtime`]. Every operation is a no-op once the runtime
/// has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingScheduler {
        requests: AtomicUsize,
    }

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn callbacks_run_once_with_frame_time() {
        let runtime = Runtime::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            runtime
                .handle()
                .register_frame_callback(move |time| seen.borrow_mut().push(time));
        }
        assert!(runtime.needs_frame());

        runtime.drain_frame_callbacks(16);
        runtime.drain_frame_callbacks(32);

        assert_eq!(seen.borrow().as_slice(), &[16]);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn callbacks_registered_while_draining_wait_for_next_frame() {
        let runtime = Runtime::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = runtime.handle();
        {
            let seen = Rc::clone(&seen);
            runtime.handle().register_frame_callback(move |time| {
                seen.borrow_mut().push(time);
                let seen = Rc::clone(&seen);
                handle.register_frame_callback(move |time| seen.borrow_mut().push(time));
            });
        }

        runtime.drain_frame_callbacks(1);
        assert_eq!(seen.borrow().as_slice(), &[1]);
        assert!(runtime.has_frame_callbacks());

        runtime.drain_frame_callbacks(2);
        assert_eq!(seen.borrow().as_slice(), &[1, 2]);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let runtime = Runtime::default();
        let ran = Rc::new(Cell::new(false));
        let id = {
            let ran = Rc::clone(&ran);
            runtime
                .handle()
                .register_frame_callback(move |_| ran.set(true))
                .expect("runtime alive")
        };
        runtime.handle().cancel_frame_callback(id);
        runtime.drain_frame_callbacks(16);
        assert!(!ran.get());
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn registering_requests_a_frame_from_the_scheduler() {
        let scheduler = Arc::new(CountingScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        runtime.handle().register_frame_callback(|_| {});
        runtime.handle().register_frame_callback(|_| {});
        assert_eq!(scheduler.requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_is_inert_after_runtime_drop() {
        let runtime = Runtime::default();
        let handle = runtime.handle();
        drop(runtime);
        assert!(!handle.is_alive());
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert!(!handle.has_frame_callbacks());
    }

    #[test]
    fn drain_frame_uses_monotonic_time() {
        let runtime = Runtime::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            runtime
                .handle()
                .register_frame_callback(move |time| seen.borrow_mut().push(time));
            runtime.drain_frame();
        }
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[1] >= seen[0]);
    }
}
