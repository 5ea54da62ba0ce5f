//! # Frame scheduling
//!
//! Hosts expose display frames through [`FrameScheduler`], the same shape as
//! `requestAnimationFrame` / `cancelAnimationFrame`: a callback is queued for
//! the next frame and receives the frame timestamp in milliseconds.
//!
//! [`FrameCoalescer`] sits on top and keeps at most one request in flight.
//! Every `schedule` cancels the previous pending request and queues a fresh
//! one, so a burst of events between two frames costs one unit of work.
//!
//! ```rust
//! use std::rc::Rc;
//! use scrollring_core::frame::{FrameCoalescer, ManualFrames};
//!
//! let frames = Rc::new(ManualFrames::new());
//! let coalescer = FrameCoalescer::new(frames.clone());
//! for _ in 0..100 {
//!     coalescer.schedule(|_ts| {});
//! }
//! frames.run_frame(16.0);
//! assert_eq!(coalescer.runs(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait FrameScheduler {
    /// `None` when the host refused the request; the callback is dropped.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;
    /// Cancelling a handle that already ran (or was never issued) does nothing.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Frame source driven by hand, for tests and the native simulator.
#[derive(Default)]
pub struct ManualFrames {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
    live: RefCell<HashSet<FrameHandle>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback queued before this call, in request order.
    /// Callbacks requested while the frame runs wait for the next one.
    /// Returns how many callbacks ran.
    pub fn run_frame(&self, timestamp_ms: f64) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let mut ran = 0;
        for (handle, callback) in batch {
            // An earlier callback in this batch may have cancelled it.
            if self.live.borrow_mut().remove(&handle) {
                callback(timestamp_ms);
                ran += 1;
            }
        }
        ran
    }

    pub fn pending(&self) -> usize {
        self.live.borrow().len()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.live.borrow_mut().insert(handle);
        self.queue.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if self.live.borrow_mut().remove(&handle) {
            self.queue.borrow_mut().retain(|(h, _)| *h != handle);
        }
    }
}

/// Debounce-to-next-frame. Clones share the pending request.
#[derive(Clone)]
pub struct FrameCoalescer {
    frames: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameHandle>>>,
    runs: Rc<Cell<u64>>,
}

impl FrameCoalescer {
    pub fn new(frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            frames,
            pending: Rc::new(Cell::new(None)),
            runs: Rc::new(Cell::new(0)),
        }
    }

    /// Replaces any pending work with `work`, to run on the next frame. If the
    /// host refuses the frame, nothing is left pending.
    pub fn schedule(&self, work: impl FnOnce(f64) + 'static) {
        self.cancel();
        let pending = self.pending.clone();
        let runs = self.runs.clone();
        let handle = self.frames.request_frame(Box::new(move |ts| {
            pending.set(None);
            runs.set(runs.get() + 1);
            work(ts);
        }));
        self.pending.set(handle);
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.frames.cancel_frame(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Scheduled work that actually ran.
    pub fn runs(&self) -> u64 {
        self.runs.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_run_in_request_order_with_timestamp() {
        let frames = ManualFrames::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            frames.request_frame(Box::new(move |ts| log.borrow_mut().push((i, ts))));
        }
        assert_eq!(frames.run_frame(16.0), 3);
        assert_eq!(*log.borrow(), vec![(0, 16.0), (1, 16.0), (2, 16.0)]);
        assert_eq!(frames.run_frame(32.0), 0);
    }

    #[test]
    fn requests_made_during_a_frame_wait_for_the_next() {
        let frames = Rc::new(ManualFrames::new());
        let hits = Rc::new(Cell::new(0));
        {
            let frames2 = frames.clone();
            let hits = hits.clone();
            frames.request_frame(Box::new(move |_| {
                hits.set(hits.get() + 1);
                let hits = hits.clone();
                frames2.request_frame(Box::new(move |_| hits.set(hits.get() + 10)));
            }));
        }
        frames.run_frame(16.0);
        assert_eq!(hits.get(), 1);
        frames.run_frame(32.0);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn cancel_removes_request() {
        let frames = ManualFrames::new();
        let hit = Rc::new(Cell::new(false));
        let h = {
            let hit = hit.clone();
            frames
                .request_frame(Box::new(move |_| hit.set(true)))
                .unwrap()
        };
        frames.cancel_frame(h);
        frames.cancel_frame(h);
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.run_frame(16.0), 0);
        assert!(!hit.get());
    }

    #[test]
    fn coalescer_keeps_only_latest_work() {
        let frames = Rc::new(ManualFrames::new());
        let coalescer = FrameCoalescer::new(frames.clone());
        let last = Rc::new(Cell::new(0));
        for i in 1..=100 {
            let last = last.clone();
            coalescer.schedule(move |_| last.set(i));
            assert_eq!(frames.pending(), 1);
        }
        assert!(coalescer.is_pending());
        assert_eq!(frames.run_frame(16.0), 1);
        assert_eq!(last.get(), 100);
        assert_eq!(coalescer.runs(), 1);
        assert!(!coalescer.is_pending());
    }

    #[test]
    fn coalescer_cancel_drops_pending() {
        let frames = Rc::new(ManualFrames::new());
        let coalescer = FrameCoalescer::new(frames.clone());
        coalescer.schedule(|_| panic!("cancelled work ran"));
        coalescer.cancel();
        assert_eq!(frames.run_frame(16.0), 0);
        assert_eq!(coalescer.runs(), 0);
    }

    struct RefusingFrames;

    impl FrameScheduler for RefusingFrames {
        fn request_frame(&self, _callback: FrameCallback) -> Option<FrameHandle> {
            None
        }

        fn cancel_frame(&self, _handle: FrameHandle) {
            panic!("nothing was ever issued");
        }
    }

    #[test]
    fn refused_frame_leaves_nothing_pending() {
        let coalescer = FrameCoalescer::new(Rc::new(RefusingFrames));
        coalescer.schedule(|_| {});
        assert!(!coalescer.is_pending());
        coalescer.schedule(|_| {});
        coalescer.cancel();
        assert_eq!(coalescer.runs(), 0);
    }
}
