//! In-memory [`Viewport`] for tests and the native simulator.
//!
//! Offsets are clamped into `[0, document_height - viewport_height]` and
//! listeners fire whenever the offset actually moves, like a browser window.
//! Smooth scrolls are tweens advanced by [`SimulatedViewport::tick`]; a user
//! scroll in the middle of one interrupts it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::SlotMap;
use web_time::Duration;

use crate::animation::{AnimatedValue, AnimationSpec, Clock, Easing};
use crate::viewport::{ListenerId, ScrollBehavior, ScrollListener, Viewport};

pub struct SimulatedViewport {
    scroll_top: Cell<f32>,
    viewport_height: Cell<f32>,
    document_height: Cell<f32>,
    listeners: RefCell<SlotMap<ListenerId, ScrollListener>>,
    anchors: RefCell<HashMap<String, f32>>,
    smooth: RefCell<Option<AnimatedValue<f32>>>,
    smooth_spec: AnimationSpec,
    clock: Rc<dyn Clock>,
    notifications: Cell<u64>,
}

impl SimulatedViewport {
    pub fn new(viewport_height: f32, document_height: f32, clock: Rc<dyn Clock>) -> Self {
        Self {
            scroll_top: Cell::new(0.0),
            viewport_height: Cell::new(viewport_height.max(0.0)),
            document_height: Cell::new(document_height.max(0.0)),
            listeners: RefCell::new(SlotMap::with_key()),
            anchors: RefCell::new(HashMap::new()),
            smooth: RefCell::new(None),
            smooth_spec: AnimationSpec::tween(Duration::from_millis(400), Easing::EaseInOut),
            clock,
            notifications: Cell::new(0),
        }
    }

    pub fn with_smooth_duration(mut self, duration: Duration) -> Self {
        self.smooth_spec.duration = duration;
        self
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height.get() - self.viewport_height.get()).max(0.0)
    }

    /// A user-driven scroll (wheel, touch). Interrupts smooth scrolling.
    pub fn scroll_by(&self, dy: f32) {
        self.smooth.borrow_mut().take();
        self.set_offset(self.scroll_top.get() + dy);
    }

    pub fn set_document_height(&self, h: f32) {
        self.document_height.set(h.max(0.0));
        self.set_offset(self.scroll_top.get());
    }

    pub fn set_viewport_height(&self, h: f32) {
        self.viewport_height.set(h.max(0.0));
        self.set_offset(self.scroll_top.get());
    }

    pub fn set_anchor(&self, id: impl Into<String>, offset: f32) {
        self.anchors.borrow_mut().insert(id.into(), offset);
    }

    /// Advances a running smooth scroll to the clock's current time.
    /// Returns true while it is still moving.
    pub fn tick(&self) -> bool {
        let step = {
            let mut smooth = self.smooth.borrow_mut();
            let Some(anim) = smooth.as_mut() else {
                return false;
            };
            let running = anim.update(self.clock.now());
            let value = *anim.get();
            if !running {
                *smooth = None;
            }
            (value, running)
        };
        self.set_offset(step.0);
        step.1
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.borrow().is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Scroll notifications delivered so far.
    pub fn notifications(&self) -> u64 {
        self.notifications.get()
    }

    fn set_offset(&self, top: f32) {
        let top = top.clamp(0.0, self.max_scroll());
        if top == self.scroll_top.get() {
            return;
        }
        self.scroll_top.set(top);
        self.notify();
    }

    // Listeners may add or remove listeners while being notified.
    fn notify(&self) {
        let listeners: Vec<ScrollListener> = self.listeners.borrow().values().cloned().collect();
        for l in listeners {
            self.notifications.set(self.notifications.get() + 1);
            l();
        }
    }
}

impl Viewport for SimulatedViewport {
    fn scroll_top(&self) -> f32 {
        self.scroll_top.get()
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height.get()
    }

    fn document_height(&self) -> f32 {
        self.document_height.get()
    }

    fn scroll_to(&self, top: f32, behavior: ScrollBehavior) {
        let target = top.clamp(0.0, self.max_scroll());
        match behavior {
            ScrollBehavior::Instant => {
                self.smooth.borrow_mut().take();
                self.set_offset(target);
            }
            ScrollBehavior::Smooth => {
                let mut anim = AnimatedValue::new(self.scroll_top.get(), self.smooth_spec);
                anim.set_target(target, self.clock.now());
                let moving = anim.is_animating();
                *self.smooth.borrow_mut() = moving.then_some(anim);
            }
        }
    }

    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }

    fn anchor_offset(&self, id: &str) -> Option<f32> {
        self.anchors.borrow().get(id).copied()
    }
}
