use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use scrollring_core::{FrameHandle, FrameScheduler};
use scrollring_core::frame::FrameCallback;

type RafClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
///
/// A closure cannot be freed while it is running, so finished ones are parked
/// in `spent` and released on the next request or cancel.
pub struct WebFrames {
    window: Window,
    live: Rc<RefCell<HashMap<i32, RafClosure>>>,
    spent: Rc<RefCell<Vec<i32>>>,
}

impl WebFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            live: Rc::new(RefCell::new(HashMap::new())),
            spent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn reap(&self) {
        let spent = std::mem::take(&mut *self.spent.borrow_mut());
        let mut live = self.live.borrow_mut();
        for id in spent {
            live.remove(&id);
        }
    }
}

impl FrameScheduler for WebFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        self.reap();

        let id_cell = Rc::new(Cell::new(0));
        let spent = self.spent.clone();
        let mut callback = Some(callback);
        let closure = {
            let id_cell = id_cell.clone();
            RafClosure::new(move |ts: f64| {
                if let Some(cb) = callback.take() {
                    cb(ts);
                }
                // Parked only after `cb`, which may itself request frames.
                spent.borrow_mut().push(id_cell.get());
            })
        };

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => {
                id_cell.set(id);
                self.live.borrow_mut().insert(id, closure);
                Some(FrameHandle(id as u64))
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.reap();
        let id = handle.0 as i32;
        if self.live.borrow_mut().remove(&id).is_some()
            && let Err(e) = self.window.cancel_animation_frame(id)
        {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}
