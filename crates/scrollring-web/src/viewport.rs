use std::cell::RefCell;

use slotmap::SlotMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, ScrollToOptions, Window};

use scrollring_core::{ListenerId, ScrollBehavior, Viewport};
use scrollring_core::viewport::ScrollListener;

/// The browser window as a [`Viewport`].
pub struct WebViewport {
    window: Window,
    listeners: RefCell<SlotMap<ListenerId, Closure<dyn Fn()>>>,
}

impl WebViewport {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            listeners: RefCell::new(SlotMap::with_key()),
        }
    }
}

impl Viewport for WebViewport {
    fn scroll_top(&self) -> f32 {
        self.window.scroll_y().unwrap_or(0.0) as f32
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn document_height(&self) -> f32 {
        self.window
            .document()
            .and_then(|d| d.document_element())
            .map(|e| e.scroll_height() as f32)
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f32, behavior: ScrollBehavior) {
        let opts = ScrollToOptions::new();
        opts.set_top(top as f64);
        opts.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&opts);
    }

    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId {
        let closure = Closure::<dyn Fn()>::new(move || listener());
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        {
            log::warn!("scroll listener not registered: {e:?}");
        }
        self.listeners.borrow_mut().insert(closure)
    }

    fn remove_scroll_listener(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(id) else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        {
            log::warn!("scroll listener not removed: {e:?}");
        }
    }

    fn anchor_offset(&self, id: &str) -> Option<f32> {
        let el = self.window.document()?.get_element_by_id(id)?;
        let top = el.get_bounding_client_rect().top() as f32;
        Some(top + self.scroll_top())
    }
}
